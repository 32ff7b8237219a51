//! # Checksum Engine
//!
//! Four independent, pure check-character algorithms. Each submodule
//! exposes `calculate(prefix)`, which takes the identifier without its
//! trailing check character, and `verify(full)`, which recomputes and
//! compares it.
//!
//! | Format | Algorithm |
//! |--------|-----------|
//! | RFC    | [`RFC_CHECKSUM_TABLE`] values × weights 13..2, `11 - sum mod 11` |
//! | CURP   | [`CURP_CHECKSUM_ALPHABET`] index × `18 - i`, `10 - sum mod 10` |
//! | CLABE  | digits × `[3, 7, 1]` cycled, `(10 - sum mod 10) mod 10` |
//! | NSS    | Luhn over 10 digits, `(10 - sum mod 10) mod 10` |
//!
//! The RFC checksum table is distinct from the homoclave citation table
//! used during RFC generation. The two assign different values to the same
//! characters and must never be shared.

use crate::error::ValidationError;
use crate::format::{IdentifierKind, SubCheck};
use crate::structure::canonicalize;

/// Character values for the RFC check character.
pub const RFC_CHECKSUM_TABLE: [(char, u32); 39] = [
    ('0', 0), ('1', 1), ('2', 2), ('3', 3), ('4', 4),
    ('5', 5), ('6', 6), ('7', 7), ('8', 8), ('9', 9),
    ('A', 10), ('B', 11), ('C', 12), ('D', 13), ('E', 14),
    ('F', 15), ('G', 16), ('H', 17), ('I', 18), ('J', 19),
    ('K', 20), ('L', 21), ('M', 22), ('N', 23), ('&', 24),
    ('O', 25), ('P', 26), ('Q', 27), ('R', 28), ('S', 29),
    ('T', 30), ('U', 31), ('V', 32), ('W', 33), ('X', 34),
    ('Y', 35), ('Z', 36), (' ', 37), ('Ñ', 38),
];

/// Ordered alphabet whose indices are the CURP check-digit values.
pub const CURP_CHECKSUM_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNÑOPQRSTUVWXYZ";

/// Generic RFCs exempt from the checksum: national and foreign counterparts.
pub const GENERIC_RFCS: [&str; 2] = ["XAXX010101000", "XEXX010101000"];

fn prefix_length_error(
    kind: IdentifierKind,
    expected: &'static str,
    actual: usize,
) -> ValidationError {
    ValidationError::Length { kind, expected, actual }
}

fn unmappable(kind: IdentifierKind, position: usize, c: char) -> ValidationError {
    ValidationError::Structure {
        kind,
        check: SubCheck::Grammar,
        position,
        detail: format!("character {c:?} has no checksum value"),
    }
}

/// Split a full identifier into (prefix, trailing check character).
fn split_check(full: &str) -> Option<(String, char)> {
    let canonical = canonicalize(full);
    let mut chars: Vec<char> = canonical.chars().collect();
    let last = chars.pop()?;
    Some((chars.into_iter().collect(), last))
}

fn digits(
    kind: IdentifierKind,
    prefix: &str,
    expected: usize,
    label: &'static str,
) -> Result<Vec<u32>, ValidationError> {
    let chars: Vec<char> = prefix.chars().collect();
    if chars.len() != expected {
        return Err(prefix_length_error(kind, label, chars.len()));
    }
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| c.to_digit(10).ok_or_else(|| unmappable(kind, i, *c)))
        .collect()
}

fn digit_char(value: u32) -> char {
    char::from_digit(value % 10, 10).unwrap_or('0')
}

/// RFC check character (SAT algorithm).
pub mod rfc {
    use super::*;

    fn value(c: char) -> Option<u32> {
        RFC_CHECKSUM_TABLE.iter().find(|(k, _)| *k == c).map(|(_, v)| *v)
    }

    /// Compute the check character for an 11-char (persona moral) or
    /// 12-char (persona física) prefix.
    ///
    /// An 11-char prefix is left-padded with a space so both kinds are
    /// weighted over 12 positions.
    pub fn calculate(prefix: &str) -> Result<char, ValidationError> {
        let mut chars: Vec<char> = prefix.chars().collect();
        match chars.len() {
            11 => chars.insert(0, ' '),
            12 => {}
            n => return Err(prefix_length_error(IdentifierKind::Rfc, "11 or 12", n)),
        }

        let mut sum = 0u32;
        for (i, c) in chars.iter().enumerate() {
            let v = value(*c).ok_or_else(|| unmappable(IdentifierKind::Rfc, i, *c))?;
            sum += v * (13 - i as u32);
        }

        Ok(match sum % 11 {
            0 => '0',
            1 => 'A',
            r => digit_char(11 - r),
        })
    }

    /// Whether `rfc` is one of the generic codes exempt from the checksum.
    pub fn is_generic(rfc: &str) -> bool {
        let canonical = canonicalize(rfc);
        GENERIC_RFCS.contains(&canonical.as_str())
    }

    /// Recompute and compare the check character of a 12- or 13-char RFC.
    pub fn verify(full: &str) -> bool {
        if is_generic(full) {
            tracing::debug!(rfc = %full, "generic RFC exempt from checksum");
            return true;
        }
        match split_check(full) {
            Some((prefix, check)) => calculate(&prefix).is_ok_and(|c| c == check),
            None => false,
        }
    }
}

/// CURP check digit (RENAPO algorithm).
pub mod curp {
    use super::*;

    /// Compute the check digit for the first 17 characters of a CURP.
    pub fn calculate(prefix: &str) -> Result<char, ValidationError> {
        let chars: Vec<char> = prefix.chars().collect();
        if chars.len() != 17 {
            return Err(prefix_length_error(IdentifierKind::Curp, "17", chars.len()));
        }

        let mut sum = 0u32;
        for (i, c) in chars.iter().enumerate() {
            let index = CURP_CHECKSUM_ALPHABET
                .chars()
                .position(|a| a == *c)
                .ok_or_else(|| unmappable(IdentifierKind::Curp, i, *c))?;
            sum += index as u32 * (18 - i as u32);
        }

        Ok(digit_char((10 - sum % 10) % 10))
    }

    /// Recompute and compare the check digit of an 18-char CURP.
    pub fn verify(full: &str) -> bool {
        match split_check(full) {
            Some((prefix, check)) => calculate(&prefix).is_ok_and(|c| c == check),
            None => false,
        }
    }
}

/// CLABE check digit (Banxico weighted modulus 10).
pub mod clabe {
    use super::*;

    const WEIGHTS: [u32; 3] = [3, 7, 1];

    /// Compute the check digit for the first 17 digits of a CLABE.
    pub fn calculate(prefix: &str) -> Result<char, ValidationError> {
        let values = digits(IdentifierKind::Clabe, prefix, 17, "17")?;
        let sum: u32 = values
            .iter()
            .zip(WEIGHTS.iter().cycle())
            .map(|(d, w)| (d * w) % 10)
            .sum();
        Ok(digit_char((10 - sum % 10) % 10))
    }

    /// Recompute and compare the check digit of an 18-digit CLABE.
    pub fn verify(full: &str) -> bool {
        match split_check(full) {
            Some((prefix, check)) => calculate(&prefix).is_ok_and(|c| c == check),
            None => false,
        }
    }
}

/// NSS check digit (IMSS modified Luhn).
pub mod nss {
    use super::*;

    /// Compute the check digit for the first 10 digits of an NSS.
    ///
    /// Digits at odd zero-based positions are doubled; doubled values above
    /// 9 are folded to their digit sum.
    pub fn calculate(prefix: &str) -> Result<char, ValidationError> {
        let values = digits(IdentifierKind::Nss, prefix, 10, "10")?;
        let sum: u32 = values
            .iter()
            .enumerate()
            .map(|(i, d)| {
                if i % 2 == 1 {
                    let doubled = d * 2;
                    doubled / 10 + doubled % 10
                } else {
                    *d
                }
            })
            .sum();
        Ok(digit_char((10 - sum % 10) % 10))
    }

    /// Recompute and compare the check digit of an 11-digit NSS.
    pub fn verify(full: &str) -> bool {
        match split_check(full) {
            Some((prefix, check)) => calculate(&prefix).is_ok_and(|c| c == check),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -- RFC --

    #[test]
    fn rfc_sat_persona_fisica_example() {
        assert_eq!(rfc::calculate("GODE561231GR").unwrap(), '8');
        assert!(rfc::verify("GODE561231GR8"));
        assert!(!rfc::verify("GODE561231GR9"));
    }

    #[test]
    fn rfc_moral_prefix_is_space_padded() {
        // ' ' (37) pads the 11-char prefix; remainder 1 maps to 'A'.
        assert_eq!(rfc::calculate("TSI090909BZ").unwrap(), 'A');
        assert!(rfc::verify("TSI090909BZA"));
    }

    #[test]
    fn rfc_generic_codes_are_exempt() {
        assert!(rfc::is_generic("xaxx010101000"));
        assert!(rfc::verify("XAXX010101000"));
        assert!(rfc::verify("XEXX010101000"));
    }

    #[test]
    fn rfc_prefix_length_rejected() {
        let err = rfc::calculate("GODE56").unwrap_err();
        assert!(matches!(err, ValidationError::Length { actual: 6, .. }));
    }

    #[test]
    fn rfc_unmappable_character_rejected() {
        let err = rfc::calculate("GOD#561231GR").unwrap_err();
        assert!(matches!(err, ValidationError::Structure { position: 3, .. }));
    }

    #[test]
    fn rfc_table_has_unique_values() {
        let mut seen = std::collections::HashSet::new();
        for (_, v) in RFC_CHECKSUM_TABLE {
            assert!(seen.insert(v));
        }
    }

    // -- CURP --

    #[test]
    fn curp_known_check_digit() {
        assert_eq!(curp::calculate("GALJ900515HJCRPN0").unwrap(), '1');
        assert!(curp::verify("GALJ900515HJCRPN01"));
        assert_eq!(curp::calculate("GORS561231HVZNNL0").unwrap(), '7');
        assert!(!curp::verify("GORS561231HVZNNL00"));
    }

    #[test]
    fn curp_alphabet_places_enye_after_n() {
        assert_eq!(CURP_CHECKSUM_ALPHABET.chars().count(), 37);
        assert_eq!(CURP_CHECKSUM_ALPHABET.chars().position(|c| c == 'Ñ'), Some(24));
    }

    // -- CLABE --

    #[test]
    fn clabe_known_vector() {
        assert_eq!(clabe::calculate("00201007777777777").unwrap(), '1');
        assert!(clabe::verify("002010077777777771"));
        assert!(!clabe::verify("002010077777777770"));
    }

    #[test]
    fn clabe_rejects_non_digits() {
        assert!(clabe::calculate("0020100777777777A").is_err());
        assert!(!clabe::verify("00201007777777777"));
    }

    // -- NSS --

    #[test]
    fn nss_known_vector() {
        assert_eq!(nss::calculate("1234567890").unwrap(), '3');
        assert!(nss::verify("12345678903"));
        assert!(!nss::verify("12345678902"));
    }

    #[test]
    fn empty_input_never_verifies() {
        assert!(!rfc::verify(""));
        assert!(!curp::verify(""));
        assert!(!clabe::verify(""));
        assert!(!nss::verify(""));
    }

    // -- Properties --

    proptest! {
        /// Same prefix always yields the same check digit.
        #[test]
        fn clabe_deterministic(prefix in "[0-9]{17}") {
            prop_assert_eq!(clabe::calculate(&prefix).unwrap(), clabe::calculate(&prefix).unwrap());
        }

        /// A freshly computed check digit always verifies.
        #[test]
        fn nss_calculate_then_verify(prefix in "[0-9]{10}") {
            let check = nss::calculate(&prefix).unwrap();
            let full = format!("{prefix}{check}");
            prop_assert!(nss::verify(&full));
        }

        /// Changing one CLABE digit by +1 (mod 10) always changes the check
        /// digit, since every weight is coprime with 10.
        #[test]
        fn clabe_single_digit_sensitivity(prefix in "[0-9]{17}", pos in 0usize..17) {
            let mut chars: Vec<char> = prefix.chars().collect();
            let d = chars[pos].to_digit(10).unwrap();
            chars[pos] = char::from_digit((d + 1) % 10, 10).unwrap();
            let mutated: String = chars.into_iter().collect();
            prop_assert_ne!(
                clabe::calculate(&prefix).unwrap(),
                clabe::calculate(&mutated).unwrap()
            );
        }

        /// RFC check characters stay within {0-9, A}.
        #[test]
        fn rfc_check_alphabet(prefix in "[A-Z]{4}[0-9]{6}[1-9A-Z]{2}") {
            let c = rfc::calculate(&prefix).unwrap();
            prop_assert!(c.is_ascii_digit() || c == 'A');
        }
    }
}
