//! Dual-key identifier classification.
//!
//! Every lookup that accepts a caller-supplied identifier goes through
//! [`classify`]: a 24-hex-character string is an opaque id, otherwise the
//! string must match the human-readable code pattern of the entity kind.
//! Anything else is malformed and rejected before a query is issued.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::ids::ObjectId;

/// `EMP-YYYY-XXXX`
pub const EMPLOYEE_CODE_PATTERN: &str = r"^EMP-[0-9]{4}-[0-9]{4}$";

/// `PROJ-XXX-NNN`
pub const PROJECT_CODE_PATTERN: &str = r"^PROJ-[A-Z0-9]{3}-[0-9]{3}$";

static EMPLOYEE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMPLOYEE_CODE_PATTERN).expect("valid regex"));
static PROJECT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PROJECT_CODE_PATTERN).expect("valid regex"));

/// The entity families that carry a human-readable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Project,
}

impl EntityKind {
    /// Entity name used in error messages.
    pub fn entity_name(self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Project => "Project",
        }
    }

    /// Name of the code field in API payloads.
    pub fn code_field(self) -> &'static str {
        match self {
            EntityKind::User => "employeeId",
            EntityKind::Project => "projectCode",
        }
    }

    fn code_format(self) -> &'static str {
        match self {
            EntityKind::User => "EMP-YYYY-XXXX",
            EntityKind::Project => "PROJ-XXX-XXX",
        }
    }

    /// Whether `raw` matches this kind's human-readable code pattern.
    pub fn matches_code(self, raw: &str) -> bool {
        match self {
            EntityKind::User => EMPLOYEE_CODE_RE.is_match(raw),
            EntityKind::Project => PROJECT_CODE_RE.is_match(raw),
        }
    }
}

/// A classified caller-supplied identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    OpaqueId(ObjectId),
    HumanCode(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::OpaqueId(id) => write!(f, "{id}"),
            Identifier::HumanCode(code) => f.write_str(code),
        }
    }
}

/// Classify `raw` for the given entity kind. `None` means malformed.
pub fn classify(raw: &str, kind: EntityKind) -> Option<Identifier> {
    if ObjectId::is_valid(raw) {
        return raw.parse().ok().map(Identifier::OpaqueId);
    }
    if kind.matches_code(raw) {
        return Some(Identifier::HumanCode(raw.to_string()));
    }
    None
}

impl Identifier {
    /// Classify `raw`, failing with a validation error that names `field`
    /// and the accepted formats when it is malformed.
    pub fn parse(raw: &str, kind: EntityKind, field: &str) -> Result<Self, CoreError> {
        classify(raw, kind).ok_or_else(|| {
            CoreError::validation(format!(
                "Invalid {field}: \"{raw}\". Must be a valid id (24 hex characters) or {} (format: {})",
                kind.code_field(),
                kind.code_format()
            ))
        })
    }
}
