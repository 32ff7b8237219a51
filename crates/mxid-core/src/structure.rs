//! # Structural Validator
//!
//! Checks an identifier against its format's fixed length and segment
//! grammar (see [`crate::format`]). The length check runs first and fails
//! fast: without the right length no segment boundary is meaningful. After
//! that every segment is checked independently, so a caller can see every
//! violated sub-check at once rather than only the first.
//!
//! The checksum engine only runs over inputs without grammar violations.

use serde::{Deserialize, Serialize};

use crate::catalog::is_state_code;
use crate::error::ValidationError;
use crate::format::{CharClass, IdentifierKind, SubCheck};
use crate::temporal::is_valid_yymmdd;

/// One failed sub-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    /// Failed sub-check.
    pub check: SubCheck,
    /// Zero-based character position where the violation starts.
    pub position: usize,
    /// Human-readable description.
    pub detail: String,
}

impl Reason {
    /// Convert into the matching [`ValidationError`] variant.
    pub fn into_error(self, kind: IdentifierKind) -> ValidationError {
        ValidationError::Structure {
            kind,
            check: self.check,
            position: self.position,
            detail: self.detail,
        }
    }
}

/// Canonical form of raw input: whitespace removed, upper-cased.
pub fn canonicalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Check that `canonical` has one of the format's lengths.
///
/// # Errors
///
/// Returns [`ValidationError::Length`] otherwise.
pub fn check_length(kind: IdentifierKind, canonical: &str) -> Result<usize, ValidationError> {
    let actual = canonical.chars().count();
    if kind.lengths().contains(&actual) {
        Ok(actual)
    } else {
        Err(ValidationError::Length {
            kind,
            expected: kind.spec().expected,
            actual,
        })
    }
}

/// Every grammar violation in `canonical`, in position order.
///
/// Assumes [`check_length`] passed; returns an empty list for an unknown
/// length so callers must length-check first.
pub fn grammar_violations(kind: IdentifierKind, canonical: &str) -> Vec<Reason> {
    let chars: Vec<char> = canonical.chars().collect();
    let Some(grammar) = kind.grammar_for(chars.len()) else {
        return Vec::new();
    };

    let mut reasons = Vec::new();
    let mut start = 0;
    for segment in grammar {
        let run = &chars[start..start + segment.len];
        let text: String = run.iter().collect();

        if let Some(offset) = run.iter().position(|c| !segment.class.admits(*c)) {
            reasons.push(Reason {
                check: segment.check,
                position: start + offset,
                detail: format!(
                    "{} segment {text:?} has invalid character {:?}",
                    segment.name, run[offset]
                ),
            });
        } else {
            match segment.class {
                CharClass::Date if !is_valid_yymmdd(&text) => reasons.push(Reason {
                    check: segment.check,
                    position: start,
                    detail: format!("{text:?} is not a valid YYMMDD date"),
                }),
                CharClass::StateCode if !is_state_code(&text) => reasons.push(Reason {
                    check: segment.check,
                    position: start,
                    detail: format!("{text:?} is not a state code"),
                }),
                _ => {}
            }
        }
        start += segment.len;
    }
    reasons
}

/// Length and grammar check, failing on the first violation.
///
/// Returns the canonical form on success.
///
/// # Errors
///
/// [`ValidationError::Length`] or [`ValidationError::Structure`].
pub fn validate_structure(kind: IdentifierKind, raw: &str) -> Result<String, ValidationError> {
    let canonical = canonicalize(raw);
    check_length(kind, &canonical)?;
    match grammar_violations(kind, &canonical).into_iter().next() {
        Some(reason) => Err(reason.into_error(kind)),
        None => Ok(canonical),
    }
}

/// Whether `raw` passes the length and grammar checks.
pub fn is_well_formed(kind: IdentifierKind, raw: &str) -> bool {
    validate_structure(kind, raw).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_strips_whitespace_and_uppercases() {
        assert_eq!(canonicalize(" gode 561231 gr8 "), "GODE561231GR8");
        assert_eq!(canonicalize("muñoz"), "MUÑOZ");
    }

    #[test]
    fn rfc_well_formed() {
        assert!(is_well_formed(IdentifierKind::Rfc, "GODE561231GR8"));
        assert!(is_well_formed(IdentifierKind::Rfc, "TSI090909BZ1"));
        assert!(is_well_formed(IdentifierKind::Rfc, "ÑAÑ&561231GR8"));
    }

    #[test]
    fn rfc_date_rejected() {
        let err = validate_structure(IdentifierKind::Rfc, "GODE561331GR8").unwrap_err();
        assert_eq!(err.sub_check(), SubCheck::Date);
        let err = validate_structure(IdentifierKind::Rfc, "GODE561232GR8").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Structure { check: SubCheck::Date, position: 4, .. }
        ));
    }

    #[test]
    fn rfc_homoclave_excludes_letter_o() {
        let err = validate_structure(IdentifierKind::Rfc, "GODE561231OR8").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Structure { check: SubCheck::HomoclaveCharset, position: 10, .. }
        ));
    }

    #[test]
    fn rfc_collects_every_violation() {
        let reasons = grammar_violations(IdentifierKind::Rfc, "G0DE561340OR#");
        let checks: Vec<SubCheck> = reasons.iter().map(|r| r.check).collect();
        assert_eq!(
            checks,
            vec![SubCheck::Grammar, SubCheck::Date, SubCheck::HomoclaveCharset, SubCheck::Grammar]
        );
    }

    #[test]
    fn curp_grammar() {
        assert!(is_well_formed(IdentifierKind::Curp, "GORS561231HVZNNL00"));
        assert!(is_well_formed(IdentifierKind::Curp, "GALJ900515HJCRPN01"));
        // Sex must be H or M.
        assert!(!is_well_formed(IdentifierKind::Curp, "GORS561231XVZNNL00"));
        // ZZ is not a state code.
        assert!(!is_well_formed(IdentifierKind::Curp, "GORS561231HZZNNL00"));
        // Second position must be a vowel or X.
        assert!(!is_well_formed(IdentifierKind::Curp, "GBRS561231HVZNNL00"));
        // Consonant block may not contain vowels.
        assert!(!is_well_formed(IdentifierKind::Curp, "GORS561231HVZANL00"));
    }

    #[test]
    fn invalid_fails_length_and_grammar() {
        let err = validate_structure(IdentifierKind::Curp, "INVALID").unwrap_err();
        assert!(matches!(err, ValidationError::Length { actual: 7, .. }));
        let err = validate_structure(IdentifierKind::Rfc, "INVALID").unwrap_err();
        assert_eq!(err.sub_check(), SubCheck::Length);
        let padded = "INVALID".repeat(3);
        assert!(!is_well_formed(IdentifierKind::Curp, &padded[..18]));
    }

    #[test]
    fn digit_formats() {
        assert!(is_well_formed(IdentifierKind::Clabe, "002010077777777771"));
        assert!(is_well_formed(IdentifierKind::Nss, "12345678903"));
        let err = validate_structure(IdentifierKind::Nss, "1234567890A").unwrap_err();
        assert!(matches!(err, ValidationError::Structure { position: 10, .. }));
        let err = validate_structure(IdentifierKind::Clabe, "0020100777").unwrap_err();
        assert!(matches!(err, ValidationError::Length { expected: "18", actual: 10, .. }));
    }
}
