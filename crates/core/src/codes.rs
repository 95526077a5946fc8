//! Human-readable code formatting and sequencing.
//!
//! Codes are allocated per scope: `EMP-{year}-` for employees and
//! `PROJ-{name prefix}-` for projects. The store is asked for the greatest
//! existing code in the scope and [`CodeScope::next`] derives the following
//! one. Sequences are fixed-width, so lexicographic order equals numeric
//! order within a scope.

use crate::error::CoreError;

/// Digits in the employee sequence (`EMP-2025-0001`).
pub const EMPLOYEE_SEQUENCE_WIDTH: usize = 4;

/// Digits in the project sequence (`PROJ-CRM-001`).
pub const PROJECT_SEQUENCE_WIDTH: usize = 3;

/// Characters taken from the project name to build its code prefix.
pub const PROJECT_PREFIX_LEN: usize = 3;

/// Padding character for project names with fewer usable characters.
const PROJECT_PREFIX_PAD: char = 'X';

/// A code allocation scope: a literal prefix plus a zero-padded sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeScope {
    prefix: String,
    width: usize,
}

impl CodeScope {
    /// Employee codes for the given calendar year.
    pub fn employee(year: i32) -> Self {
        Self {
            prefix: format!("EMP-{year}-"),
            width: EMPLOYEE_SEQUENCE_WIDTH,
        }
    }

    /// Project codes derived from a project name.
    ///
    /// Fails with [`CoreError::InvalidInput`] for an empty or whitespace-only
    /// name.
    pub fn project(name: &str) -> Result<Self, CoreError> {
        let prefix = project_name_prefix(name)?;
        Ok(Self {
            prefix: format!("PROJ-{prefix}-"),
            width: PROJECT_SEQUENCE_WIDTH,
        })
    }

    /// The literal prefix shared by every code in this scope.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Format the code for a given sequence number.
    pub fn format(&self, sequence: u32) -> String {
        format!("{}{:0width$}", self.prefix, sequence, width = self.width)
    }

    /// Largest sequence number representable in this scope.
    pub fn max_sequence(&self) -> u32 {
        10u32.pow(self.width as u32) - 1
    }

    /// Derive the next code given the greatest existing code in the scope.
    ///
    /// `latest = None` starts the sequence at 1. A latest code outside this
    /// scope or with a non-numeric suffix is an internal inconsistency. A
    /// scope whose sequence is used up fails with [`CoreError::Conflict`].
    pub fn next(&self, latest: Option<&str>) -> Result<String, CoreError> {
        let sequence = match latest {
            None => 1,
            Some(code) => {
                let suffix = code.strip_prefix(self.prefix.as_str()).ok_or_else(|| {
                    CoreError::Internal(format!(
                        "code {code} does not belong to scope {}",
                        self.prefix
                    ))
                })?;
                let current: u32 = suffix.parse().map_err(|_| {
                    CoreError::Internal(format!("code {code} has a non-numeric sequence"))
                })?;
                current + 1
            }
        };

        if sequence > self.max_sequence() {
            return Err(CoreError::Conflict(format!(
                "No codes left in scope {}",
                self.prefix
            )));
        }

        Ok(self.format(sequence))
    }
}

/// Derive the 3-character project code prefix from a project name.
///
/// Non-alphanumeric characters are dropped, the first three remaining are
/// upper-cased, and the result is right-padded with `X`.
pub fn project_name_prefix(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput(
            "Project name is required to generate project code".into(),
        ));
    }

    let mut prefix: String = trimmed
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(PROJECT_PREFIX_LEN)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    while prefix.len() < PROJECT_PREFIX_LEN {
        prefix.push(PROJECT_PREFIX_PAD);
    }
    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::identifier::{EntityKind, Identifier};

    #[test]
    fn first_employee_code_of_a_year() {
        let scope = CodeScope::employee(2025);
        assert_eq!(scope.next(None).unwrap(), "EMP-2025-0001");
    }

    #[test]
    fn employee_codes_increment_within_year() {
        let scope = CodeScope::employee(2025);
        assert_eq!(scope.next(Some("EMP-2025-0041")).unwrap(), "EMP-2025-0042");
    }

    #[test]
    fn employee_codes_roll_over_per_year() {
        // The 2025 scope never sees 2024 codes; the lookup for "EMP-2025-"
        // returns nothing, so numbering restarts.
        let scope = CodeScope::employee(2025);
        assert_eq!(scope.next(None).unwrap(), "EMP-2025-0001");
        assert_matches!(
            scope.next(Some("EMP-2024-9999")),
            Err(CoreError::Internal(_))
        );
    }

    #[test]
    fn exhausted_scope_is_a_conflict() {
        let scope = CodeScope::employee(2024);
        assert_matches!(scope.next(Some("EMP-2024-9999")), Err(CoreError::Conflict(_)));

        let scope = CodeScope::project("Alpha").unwrap();
        assert_matches!(scope.next(Some("PROJ-ALP-999")), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn project_sequence_per_prefix() {
        let abc = CodeScope::project("ABC Platform").unwrap();
        assert_eq!(abc.next(Some("PROJ-ABC-002")).unwrap(), "PROJ-ABC-003");

        let crm = CodeScope::project("crm rollout").unwrap();
        assert_eq!(crm.next(None).unwrap(), "PROJ-CRM-001");
    }

    #[test]
    fn project_prefix_strips_and_uppercases() {
        assert_eq!(project_name_prefix("c-r.m system").unwrap(), "CRM");
        assert_eq!(project_name_prefix("  hr2go ").unwrap(), "HR2");
    }

    #[test]
    fn short_project_names_are_padded() {
        assert_eq!(project_name_prefix("AI").unwrap(), "AIX");
        assert_eq!(project_name_prefix("a!").unwrap(), "AXX");
        assert_eq!(project_name_prefix("!!!").unwrap(), "XXX");
    }

    #[test]
    fn empty_project_name_is_invalid_input() {
        assert_matches!(project_name_prefix(""), Err(CoreError::InvalidInput(_)));
        assert_matches!(project_name_prefix("   "), Err(CoreError::InvalidInput(_)));
        assert_matches!(CodeScope::project("\t"), Err(CoreError::InvalidInput(_)));
    }

    #[test]
    fn generated_project_codes_match_the_resolver_pattern() {
        for name in ["Customer Portal", "x", "42", "ünïcode name", "a b c d"] {
            let code = CodeScope::project(name).unwrap().next(None).unwrap();
            assert_matches!(
                crate::identifier::classify(&code, EntityKind::Project),
                Some(Identifier::HumanCode(_)),
                "{code} from {name:?}"
            );
        }
    }

    #[test]
    fn generated_employee_codes_match_the_resolver_pattern() {
        let code = CodeScope::employee(2031).next(Some("EMP-2031-0998")).unwrap();
        assert_eq!(code, "EMP-2031-0999");
        assert!(EntityKind::User.matches_code(&code));
    }

    #[test]
    fn foreign_or_garbled_latest_is_internal() {
        let scope = CodeScope::project("CRM").unwrap();
        assert_matches!(scope.next(Some("PROJ-ABC-001")), Err(CoreError::Internal(_)));
        assert_matches!(scope.next(Some("PROJ-CRM-0x1")), Err(CoreError::Internal(_)));
    }
}
