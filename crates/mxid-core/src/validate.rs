//! # Public Validator
//!
//! Composes the structural validator and the checksum engine behind one
//! contract per format:
//!
//! - [`validate`] / [`validate_with`] return the canonical identifier or the
//!   first [`ValidationError`];
//! - [`is_valid`] folds the same check to a `bool` and never fails;
//! - [`validate_report`] evaluates every sub-check independently and
//!   returns a [`ValidationReport`] naming each failure, for diagnostics.
//!
//! RFC and CURP accept a non-strict mode ([`ValidationOptions::lenient`])
//! that skips the checksum sub-check. Around 1% of issued RFCs fail the
//! published algorithm; non-strict mode is a caller-chosen relaxation, not a
//! recovery path. CLABE and NSS checksums are always enforced.

use serde::{Deserialize, Serialize};

use crate::catalog::Lookup;
use crate::error::ValidationError;
use crate::format::{IdentifierKind, SubCheck};
use crate::structure::{canonicalize, check_length, grammar_violations, is_well_formed, Reason};

/// Validation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Enforce the checksum sub-check. Only RFC and CURP honour `false`.
    pub strict: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self::strict()
    }
}

impl ValidationOptions {
    /// Enforce every sub-check.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Skip the checksum sub-check where the format allows it.
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    fn checks_checksum(&self, kind: IdentifierKind) -> bool {
        self.strict || !kind.allows_lenient()
    }
}

/// Outcome of evaluating every sub-check of one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Format validated against.
    pub kind: IdentifierKind,
    /// Canonical (whitespace-free, upper-case) input.
    pub input: String,
    /// Whether every evaluated sub-check passed.
    pub valid: bool,
    /// Whether the checksum sub-check was evaluated.
    pub checksum_checked: bool,
    /// Every failed sub-check.
    pub reasons: Vec<Reason>,
}

impl ValidationReport {
    /// Whether `check` passed (or was not reached because an earlier
    /// fail-fast check failed: see [`ValidationReport::length_ok`]).
    pub fn passed(&self, check: SubCheck) -> bool {
        !self.reasons.iter().any(|r| r.check == check)
    }

    /// Length sub-check.
    pub fn length_ok(&self) -> bool {
        self.passed(SubCheck::Length)
    }

    /// Character-class grammar sub-check.
    pub fn grammar_ok(&self) -> bool {
        self.length_ok() && self.passed(SubCheck::Grammar)
    }

    /// YYMMDD calendar-date sub-check. Always `true` for CLABE and NSS.
    pub fn date_ok(&self) -> bool {
        self.length_ok() && self.passed(SubCheck::Date)
    }

    /// RFC homoclave charset sub-check. Always `true` for other formats.
    pub fn homoclave_ok(&self) -> bool {
        self.length_ok() && self.passed(SubCheck::HomoclaveCharset)
    }

    /// Checksum sub-check, or `None` when it was skipped or unreachable.
    pub fn checksum_ok(&self) -> Option<bool> {
        self.checksum_checked.then(|| self.passed(SubCheck::Checksum))
    }

    /// First failure as a typed error, or `None` if the report is valid.
    pub fn first_error(&self) -> Option<ValidationError> {
        let reason = self.reasons.first()?;
        Some(match reason.check {
            SubCheck::Length => ValidationError::Length {
                kind: self.kind,
                expected: self.kind.spec().expected,
                actual: self.input.chars().count(),
            },
            SubCheck::Checksum => {
                let found = self.input.chars().last().unwrap_or(' ');
                let len = self.input.chars().count();
                let prefix: String = self.input.chars().take(len.saturating_sub(1)).collect();
                ValidationError::CheckDigit {
                    kind: self.kind,
                    expected: self.kind.calculate_check(&prefix).unwrap_or(' '),
                    found,
                }
            }
            _ => reason.clone().into_error(self.kind),
        })
    }
}

/// Evaluate every sub-check of `raw` as `kind`.
///
/// Length fails fast. Grammar, date, homoclave and checksum sub-checks are
/// evaluated independently: a bad date or homoclave does not hide the
/// checksum result. The checksum is unreachable only when a grammar
/// violation or a character outside the checksum table leaves it undefined.
pub fn validate_report(
    kind: IdentifierKind,
    raw: &str,
    options: ValidationOptions,
) -> ValidationReport {
    let input = canonicalize(raw);
    let mut report = ValidationReport {
        kind,
        input,
        valid: false,
        checksum_checked: false,
        reasons: Vec::new(),
    };

    if let Err(err) = check_length(kind, &report.input) {
        report.reasons.push(Reason {
            check: SubCheck::Length,
            position: 0,
            detail: err.to_string(),
        });
        return report;
    }

    report.reasons = grammar_violations(kind, &report.input);

    let grammar_clean = report.passed(SubCheck::Grammar);
    if grammar_clean && checksum_defined(kind, &report.input) {
        if options.checks_checksum(kind) {
            report.checksum_checked = true;
            if !kind.verify_check(&report.input) {
                report.reasons.push(Reason {
                    check: SubCheck::Checksum,
                    position: report.input.chars().count() - 1,
                    detail: "check character does not match".to_string(),
                });
            }
        } else {
            tracing::debug!(
                %kind,
                input = %report.input,
                "non-strict validation, checksum skipped"
            );
        }
    }

    report.valid = report.reasons.is_empty();
    report
}

/// Whether every character before the check character has a checksum
/// value, so the checksum sub-check can be evaluated at all.
fn checksum_defined(kind: IdentifierKind, canonical: &str) -> bool {
    let len = canonical.chars().count();
    let prefix: String = canonical.chars().take(len.saturating_sub(1)).collect();
    kind.calculate_check(&prefix).is_ok()
}

/// Validate `raw` as `kind` in strict mode.
///
/// Returns the canonical identifier.
///
/// # Errors
///
/// The first failing sub-check as a [`ValidationError`].
pub fn validate(kind: IdentifierKind, raw: &str) -> Result<String, ValidationError> {
    validate_with(kind, raw, ValidationOptions::strict())
}

/// Validate `raw` as `kind` with explicit options.
///
/// # Errors
///
/// The first failing sub-check as a [`ValidationError`].
pub fn validate_with(
    kind: IdentifierKind,
    raw: &str,
    options: ValidationOptions,
) -> Result<String, ValidationError> {
    let report = validate_report(kind, raw, options);
    match report.first_error() {
        Some(err) => Err(err),
        None => Ok(report.input),
    }
}

/// Whether `raw` is a valid `kind` identifier in strict mode. Never fails.
pub fn is_valid(kind: IdentifierKind, raw: &str) -> bool {
    validate(kind, raw).is_ok()
}

/// Whether `raw` is a valid `kind` identifier under `options`. Never fails.
pub fn is_valid_with(kind: IdentifierKind, raw: &str, options: ValidationOptions) -> bool {
    validate_with(kind, raw, options).is_ok()
}

/// First format, in [`IdentifierKind::ALL`] order, whose length and
/// grammar `raw` satisfies. The checksum is not consulted.
///
/// CURP and CLABE share a length but not an alphabet, so at most one
/// format matches any input.
pub fn detect(raw: &str) -> Option<IdentifierKind> {
    IdentifierKind::ALL.into_iter().find(|kind| is_well_formed(*kind, raw))
}

/// Validate a CLABE and resolve its bank code through `banks`.
///
/// # Errors
///
/// Any [`validate`] error, or a [`SubCheck::BankCode`] structure error if
/// the first three digits are not a known bank.
pub fn check_bank_code<L: Lookup>(raw: &str, banks: &L) -> Result<L::Record, ValidationError> {
    let clabe = validate(IdentifierKind::Clabe, raw)?;
    let code = &clabe[..3];
    banks.lookup(code).ok_or_else(|| ValidationError::Structure {
        kind: IdentifierKind::Clabe,
        check: SubCheck::BankCode,
        position: 0,
        detail: format!("bank code {code:?} not found in catalog"),
    })
}
