//! Field-level readers and the cross-cutting allow-list checks.
//!
//! [`Payload`] wraps a JSON object and hands out typed fields, failing fast
//! with a [`CoreError::Validation`] on the first violation. Absent keys and
//! explicit `null` are distinguished where an update can clear a field.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};
use crate::identifier::{EntityKind, Identifier};
use crate::types::Date;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid regex"));

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.]?[(]?[0-9]{1,4}[)]?[-\s.]?[0-9]{1,9}$")
        .expect("valid regex")
});

/// Three-state value for partial updates.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Patch<T> {
    /// Key not supplied: leave the stored value alone.
    #[default]
    Keep,
    /// Key supplied as `null` (or an empty optional string): clear it.
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    /// `None` for [`Patch::Keep`], otherwise the new (possibly cleared) value.
    pub fn into_change(self) -> Option<Option<T>> {
        match self {
            Patch::Keep => None,
            Patch::Clear => Some(None),
            Patch::Set(v) => Some(Some(v)),
        }
    }

    /// Collapse to the value a freshly created record would get.
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Set(v) => Some(v),
            Patch::Keep | Patch::Clear => None,
        }
    }
}

/// Read-only view over a request body with fail-fast field accessors.
pub struct Payload<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Payload<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Reject any key outside `allowed`, naming the offenders and the allowed set.
    pub fn reject_unknown(&self, allowed: &[&str], endpoint: &str) -> CoreResult<()> {
        let unknown: Vec<&str> = self
            .map
            .keys()
            .map(String::as_str)
            .filter(|k| !allowed.contains(k))
            .collect();
        if unknown.is_empty() {
            return Ok(());
        }
        Err(CoreError::validation(format!(
            "{endpoint} does not accept the following field(s): {}. Allowed fields: {}",
            unknown.join(", "),
            allowed.join(", ")
        )))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// A string that must be present and non-blank; returned trimmed.
    pub fn required_str(&self, key: &str, missing: &str) -> CoreResult<&'a str> {
        match self.present(key) {
            None => Err(CoreError::validation(missing)),
            Some(Value::String(s)) if s.trim().is_empty() => Err(CoreError::validation(missing)),
            Some(Value::String(s)) => Ok(s.trim()),
            Some(_) => Err(CoreError::validation(format!("{key} must be a string"))),
        }
    }

    /// Like [`Payload::required_str`] but returned verbatim, for secrets.
    pub fn required_secret(&self, key: &str, missing: &str) -> CoreResult<&'a str> {
        match self.present(key) {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
            Some(Value::String(_)) | None => Err(CoreError::validation(missing)),
            Some(_) => Err(CoreError::validation(format!("{key} must be a string"))),
        }
    }

    /// An enum field parsed through its `FromStr` impl.
    pub fn optional_enum<T>(&self, key: &str) -> CoreResult<Option<T>>
    where
        T: FromStr<Err = CoreError>,
    {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(s)) => s.parse().map(Some),
            Some(other) => other.to_string().parse().map(Some),
        }
    }

    /// A string that may be absent or `null`; returned trimmed.
    pub fn optional_str(&self, key: &str) -> CoreResult<Option<&'a str>> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.trim())),
            Some(_) => Err(CoreError::validation(format!("{key} must be a string"))),
        }
    }

    /// A string for a partial update. `null` or a blank string clears.
    pub fn patch_str(&self, key: &str) -> CoreResult<Patch<String>> {
        if !self.contains(key) {
            return Ok(Patch::Keep);
        }
        Ok(match self.optional_str(key)? {
            None => Patch::Clear,
            Some("") => Patch::Clear,
            Some(s) => Patch::Set(s.to_string()),
        })
    }

    /// A string for a partial update that may not be cleared.
    pub fn patch_required_str(&self, key: &str, empty: &str) -> CoreResult<Option<&'a str>> {
        if !self.contains(key) {
            return Ok(None);
        }
        self.required_str(key, empty).map(Some)
    }

    pub fn optional_bool(&self, key: &str) -> CoreResult<Option<bool>> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(CoreError::validation(format!("{key} must be a boolean value"))),
        }
    }

    /// A non-negative finite number; `null` clears.
    pub fn patch_non_negative(&self, key: &str, message: &str) -> CoreResult<Patch<f64>> {
        if !self.contains(key) {
            return Ok(Patch::Keep);
        }
        match self.present(key) {
            None => Ok(Patch::Clear),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if v.is_finite() && v >= 0.0 => Ok(Patch::Set(v)),
                _ => Err(CoreError::validation(message)),
            },
            Some(_) => Err(CoreError::validation(message)),
        }
    }

    /// An array of non-blank strings, trimmed. `null` yields `None`.
    pub fn string_array(&self, key: &str) -> CoreResult<Option<Vec<String>>> {
        let Some(value) = self.present(key) else {
            return Ok(None);
        };
        let Value::Array(items) = value else {
            return Err(CoreError::validation(format!("{key} must be an array")));
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
                _ => Err(CoreError::validation(format!(
                    "{key}[{i}] must be a non-empty string"
                ))),
            })
            .collect::<CoreResult<Vec<_>>>()
            .map(Some)
    }

    /// An entity reference (id or code) for a partial update. `null` clears.
    pub fn patch_reference(
        &self,
        key: &str,
        kind: EntityKind,
        label: &str,
    ) -> CoreResult<Patch<Identifier>> {
        if !self.contains(key) {
            return Ok(Patch::Keep);
        }
        match self.present(key) {
            None => Ok(Patch::Clear),
            Some(Value::String(s)) if s.is_empty() => Ok(Patch::Clear),
            Some(Value::String(s)) => Identifier::parse(s, kind, label).map(Patch::Set),
            Some(_) => Err(CoreError::validation(format!(
                "{label} must be a string ({})",
                reference_forms(kind)
            ))),
        }
    }

    /// A list of entity references. Each element is classified in order.
    pub fn reference_array(
        &self,
        key: &str,
        kind: EntityKind,
    ) -> CoreResult<Option<Vec<Identifier>>> {
        let Some(value) = self.present(key) else {
            return Ok(None);
        };
        let Value::Array(items) = value else {
            return Err(CoreError::validation(format!("{key} must be an array")));
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) if !s.is_empty() => Identifier::parse(s, kind, &format!("{key}[{i}]")),
                _ => Err(CoreError::validation(format!(
                    "{key}[{i}] must be a string ({})",
                    reference_forms(kind)
                ))),
            })
            .collect::<CoreResult<Vec<_>>>()
            .map(Some)
    }

    /// A calendar date for a partial update. `null` clears.
    pub fn patch_date(&self, key: &str) -> CoreResult<Patch<Date>> {
        if !self.contains(key) {
            return Ok(Patch::Keep);
        }
        match self.optional_str(key)? {
            None | Some("") => Ok(Patch::Clear),
            Some(s) => parse_date(s)
                .map(Patch::Set)
                .ok_or_else(|| {
                    CoreError::validation(format!(
                        "{key} must be a date (YYYY-MM-DD or RFC 3339), got \"{s}\""
                    ))
                }),
        }
    }
}

fn reference_forms(kind: EntityKind) -> String {
    format!("id or {}", kind.code_field())
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp into a date.
pub fn parse_date(raw: &str) -> Option<Date> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Validate an email address and normalize it to lower case.
pub fn normalize_email(raw: &str) -> CoreResult<String> {
    let email = raw.trim();
    if !EMAIL_RE.is_match(email) {
        return Err(CoreError::validation("Please provide a valid email"));
    }
    Ok(email.to_lowercase())
}

/// Validate a phone number. Blank input means "no phone".
pub fn normalize_phone(raw: &str) -> CoreResult<Option<String>> {
    let phone = raw.trim();
    if phone.is_empty() {
        return Ok(None);
    }
    if !PHONE_RE.is_match(phone) {
        return Err(CoreError::validation("Please provide a valid phone number"));
    }
    Ok(Some(phone.to_string()))
}

/// Enforce the minimum password length. `label` prefixes the message.
pub fn check_password_length(password: &str, label: &str) -> CoreResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::validation(format!(
            "{label} must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Reject any query string on endpoints that declare no parameters.
pub fn validate_no_query(query: &HashMap<String, String>, endpoint: &str) -> CoreResult<()> {
    if query.is_empty() {
        return Ok(());
    }
    let mut received: Vec<&str> = query.keys().map(String::as_str).collect();
    received.sort_unstable();
    Err(CoreError::validation(format!(
        "{endpoint} does not accept query parameters. Received: {}",
        received.join(", ")
    )))
}

/// Reject query parameters outside `allowed`.
pub fn reject_unknown_params(query: &HashMap<String, String>, allowed: &[&str]) -> CoreResult<()> {
    let mut unknown: Vec<&str> = query
        .keys()
        .map(String::as_str)
        .filter(|k| !allowed.contains(k))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort_unstable();
    Err(CoreError::validation(format!(
        "Invalid query parameter(s): {}. Allowed parameters are: {}",
        unknown.join(", "),
        allowed.join(", ")
    )))
}

/// Optional `search` parameter: absent is fine, blank is not.
pub fn search_param(query: &HashMap<String, String>) -> CoreResult<Option<String>> {
    match query.get("search") {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Err(CoreError::validation(
            "Search parameter must be a non-empty string",
        )),
        Some(s) => Ok(Some(s.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn unknown_fields_are_named_with_allowed_set() {
        let body = obj(json!({"firstName": "A", "role": "ADMIN", "zzz": 1}));
        let err = Payload::new(&body)
            .reject_unknown(&["firstName"], "PATCH /api/users/me")
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) => {
            assert!(msg.starts_with("PATCH /api/users/me does not accept"));
            assert!(msg.contains("role, zzz"));
            assert!(msg.ends_with("Allowed fields: firstName"));
        });
    }

    #[test]
    fn required_str_rejects_blank_null_and_wrong_type() {
        let body = obj(json!({"a": "  ", "b": null, "c": 5, "d": " ok "}));
        let p = Payload::new(&body);
        assert!(p.required_str("a", "a required").is_err());
        assert!(p.required_str("b", "b required").is_err());
        assert!(p.required_str("missing", "required").is_err());
        assert_matches!(p.required_str("c", "c"), Err(CoreError::Validation(m)) if m == "c must be a string");
        assert_eq!(p.required_str("d", "d").unwrap(), "ok");
    }

    #[test]
    fn patch_str_distinguishes_absent_null_and_value() {
        let body = obj(json!({"n": null, "e": "", "v": "x"}));
        let p = Payload::new(&body);
        assert_eq!(p.patch_str("absent").unwrap(), Patch::Keep);
        assert_eq!(p.patch_str("n").unwrap(), Patch::Clear);
        assert_eq!(p.patch_str("e").unwrap(), Patch::Clear);
        assert_eq!(p.patch_str("v").unwrap(), Patch::Set("x".to_string()));
    }

    #[test]
    fn email_pattern_and_normalization() {
        assert_eq!(normalize_email(" Jane.Doe@Example.COM ").unwrap(), "jane.doe@example.com");
        assert!(normalize_email("jane@example").is_err());
        assert!(normalize_email("jane example@x.io").is_err());
        assert!(normalize_email("@x.io").is_err());
    }

    #[test]
    fn phone_pattern_is_loosely_international() {
        for ok in ["+1234567890", "(555) 123-4567", "+44 20 79460958", "555.123.4567"] {
            assert!(normalize_phone(ok).unwrap().is_some(), "{ok}");
        }
        // At most two separators before the final digit group.
        for bad in ["phone", "++123", "+1 (555) 123-4567", "12-34-56-78-90", "+1 555 123 4567 ext 9"] {
            assert!(normalize_phone(bad).is_err(), "{bad}");
        }
        assert_eq!(normalize_phone("  ").unwrap(), None);
    }

    #[test]
    fn password_minimum_length_counts_characters() {
        assert!(check_password_length("12345", "Password").is_err());
        assert!(check_password_length("123456", "Password").is_ok());
        assert!(check_password_length("ééééé", "Password").is_err());
    }

    #[test]
    fn non_negative_numbers() {
        let body = obj(json!({"a": 0, "b": -1, "c": "3", "d": 2.5, "e": null}));
        let p = Payload::new(&body);
        assert_eq!(p.patch_non_negative("a", "m").unwrap(), Patch::Set(0.0));
        assert!(p.patch_non_negative("b", "m").is_err());
        assert!(p.patch_non_negative("c", "m").is_err());
        assert_eq!(p.patch_non_negative("d", "m").unwrap(), Patch::Set(2.5));
        assert_eq!(p.patch_non_negative("e", "m").unwrap(), Patch::Clear);
    }

    #[test]
    fn string_arrays_reject_blank_items() {
        let body = obj(json!({"ok": ["rust", " sql "], "blank": ["a", ""], "num": [1], "scalar": "a"}));
        let p = Payload::new(&body);
        assert_eq!(p.string_array("ok").unwrap().unwrap(), vec!["rust", "sql"]);
        assert_matches!(p.string_array("blank"), Err(CoreError::Validation(m)) if m == "blank[1] must be a non-empty string");
        assert!(p.string_array("num").is_err());
        assert!(p.string_array("scalar").is_err());
    }

    #[test]
    fn reference_arrays_classify_each_item() {
        let body = obj(json!({
            "good": ["PROJ-CRM-001", "507f1f77bcf86cd799439011"],
            "bad": ["PROJ-CRM-001", "EMP-2025-0001"]
        }));
        let p = Payload::new(&body);
        assert_eq!(p.reference_array("good", EntityKind::Project).unwrap().unwrap().len(), 2);
        assert_matches!(
            p.reference_array("bad", EntityKind::Project),
            Err(CoreError::Validation(m)) if m.contains("bad[1]")
        );
    }

    #[test]
    fn dates_accept_plain_and_rfc3339() {
        assert_eq!(parse_date("2025-01-15"), NaiveDate::from_ymd_opt(2025, 1, 15));
        assert_eq!(parse_date("2025-01-15T09:30:00Z"), NaiveDate::from_ymd_opt(2025, 1, 15));
        assert_eq!(parse_date("15/01/2025"), None);
    }

    #[test]
    fn no_query_lists_received_params_sorted() {
        let mut q = HashMap::new();
        assert!(validate_no_query(&q, "GET /api/users").is_ok());
        q.insert("page".to_string(), "1".to_string());
        q.insert("limit".to_string(), "5".to_string());
        assert_matches!(
            validate_no_query(&q, "GET /api/users"),
            Err(CoreError::Validation(m)) if m.ends_with("Received: limit, page")
        );
    }

    #[test]
    fn unknown_query_params_rejected() {
        let mut q = HashMap::new();
        q.insert("status".to_string(), "ACTIVE".to_string());
        assert!(reject_unknown_params(&q, &["status", "search"]).is_ok());
        q.insert("sort".to_string(), "name".to_string());
        assert_matches!(
            reject_unknown_params(&q, &["status", "search"]),
            Err(CoreError::Validation(m)) if m.starts_with("Invalid query parameter(s): sort.")
        );
    }

    #[test]
    fn blank_search_is_rejected() {
        let mut q = HashMap::new();
        q.insert("search".to_string(), "   ".to_string());
        assert!(search_param(&q).is_err());
        q.insert("search".to_string(), " ann ".to_string());
        assert_eq!(search_param(&q).unwrap().as_deref(), Some("ann"));
    }
}
