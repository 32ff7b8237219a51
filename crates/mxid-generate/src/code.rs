//! # Generated Code
//!
//! The intermediate every generator produces: the identifier without its
//! check character, tagged with its format. [`GeneratedCode::finish`]
//! appends the check character through the same per-format dispatch the
//! validator uses, so generation and validation can never disagree on the
//! algorithm.

use mxid_core::{IdentifierKind, ValidationError};

/// Identifier prefix awaiting its check character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    kind: IdentifierKind,
    prefix: String,
}

impl GeneratedCode {
    /// Tag `prefix` with its format.
    pub fn new(kind: IdentifierKind, prefix: impl Into<String>) -> Self {
        Self {
            kind,
            prefix: prefix.into(),
        }
    }

    /// Format of the code.
    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// Everything but the check character.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Append the check character and return the full identifier.
    ///
    /// # Errors
    ///
    /// Propagates the checksum engine's error if the prefix has the wrong
    /// length or a character outside the format alphabet.
    pub fn finish(self) -> Result<String, ValidationError> {
        let check = self.kind.calculate_check(&self.prefix)?;
        let mut full = self.prefix;
        full.push(check);
        Ok(full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_appends_check() {
        let code = GeneratedCode::new(IdentifierKind::Clabe, "00201007777777777");
        assert_eq!(code.prefix(), "00201007777777777");
        assert_eq!(code.finish().unwrap(), "002010077777777771");
    }

    #[test]
    fn finish_rejects_bad_prefix() {
        let err = GeneratedCode::new(IdentifierKind::Nss, "123").finish().unwrap_err();
        assert!(matches!(err, ValidationError::Length { .. }));
    }
}
