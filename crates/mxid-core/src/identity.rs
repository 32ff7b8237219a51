//! # Identity Newtypes
//!
//! Validated newtypes for the four identifier formats. Each identifier is a
//! distinct type: a [`Curp`] cannot be passed where an [`Rfc`] is expected,
//! and holding one proves the string passed validation.
//!
//! ## Validation
//!
//! `new()` runs the strict validator. [`Rfc::new_lenient`] and
//! [`Curp::new_lenient`] skip the checksum sub-check for historical codes
//! that fail the published algorithm. Storage is always the canonical
//! upper-case form, and deserialization routes through `new()` so invalid
//! values are rejected at the boundary.
//!
//! ## Segment Accessors
//!
//! | Type  | Layout |
//! |-------|--------|
//! | RFC   | letters (3/4) · YYMMDD · homoclave (2) · check |
//! | CURP  | letters (4) · YYMMDD · sex · state (2) · consonants (3) · differentiator · check |
//! | CLABE | bank (3) · plaza (3) · account (11) · check |
//! | NSS   | subdelegation (2) · registration year (2) · birth year (2) · serial (4) · check |

use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{state_name, Lookup};
use crate::checksum::GENERIC_RFCS;
use crate::error::{GenerationError, ValidationError};
use crate::format::IdentifierKind;
use crate::temporal::resolve_yymmdd;
use crate::validate::{validate, validate_with, ValidationOptions};

/// Implement `Deserialize` for string newtypes that must validate their
/// contents: deserialize a plain `String`, then route it through `new()`.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// `as_str`, `into_inner`, `Display`, `AsRef<str>` and `FromStr` for a
/// validated string newtype.
macro_rules! impl_identifier_common {
    ($ty:ident) => {
        impl $ty {
            /// Canonical upper-case form.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume into the canonical string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Sex
// ---------------------------------------------------------------------------

/// Sex marker carried by a CURP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// `H` (hombre).
    #[serde(rename = "H")]
    Male,
    /// `M` (mujer).
    #[serde(rename = "M")]
    Female,
}

impl Sex {
    /// The single-letter CURP code.
    pub fn code(&self) -> char {
        match self {
            Self::Male => 'H',
            Self::Female => 'M',
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Sex {
    type Err = GenerationError;

    /// Parse `H` or `M`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "H" => Ok(Self::Male),
            "M" => Ok(Self::Female),
            _ => Err(GenerationError::InvalidSex(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// RFC
// ---------------------------------------------------------------------------

/// Category of an RFC, read from its length and the generic-code list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RfcKind {
    /// 13 characters, natural person.
    Fisica,
    /// 12 characters, legal entity.
    Moral,
    /// `XAXX010101000`, generic national counterpart.
    GenericNational,
    /// `XEXX010101000`, generic foreign counterpart.
    GenericForeign,
}

/// Registro Federal de Contribuyentes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Rfc(String);

impl_validating_deserialize!(Rfc);
impl_identifier_common!(Rfc);

impl Rfc {
    /// Validate an RFC in strict mode.
    ///
    /// # Errors
    ///
    /// Returns the first failing sub-check as a [`ValidationError`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate(IdentifierKind::Rfc, value.as_ref()).map(Self)
    }

    /// Validate an RFC without checking its check character.
    ///
    /// # Errors
    ///
    /// Returns length, grammar, date or homoclave failures.
    pub fn new_lenient(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate_with(IdentifierKind::Rfc, value.as_ref(), ValidationOptions::lenient()).map(Self)
    }

    /// Persona física, persona moral, or one of the generic codes.
    pub fn kind(&self) -> RfcKind {
        match self.0.as_str() {
            s if s == GENERIC_RFCS[0] => RfcKind::GenericNational,
            s if s == GENERIC_RFCS[1] => RfcKind::GenericForeign,
            // The letter block may hold a multi-byte Ñ, so count chars.
            s if s.chars().count() == 12 => RfcKind::Moral,
            _ => RfcKind::Fisica,
        }
    }

    // The trailing nine characters are ASCII: date, homoclave, check.
    fn tail(&self) -> &str {
        &self.0[self.0.len() - 9..]
    }

    /// The 3 (moral) or 4 (física) name letters.
    pub fn letters(&self) -> &str {
        &self.0[..self.0.len() - 9]
    }

    /// The raw `YYMMDD` segment.
    pub fn date_segment(&self) -> &str {
        &self.tail()[..6]
    }

    /// Birth or foundation date, resolved to the latest matching date that
    /// is not in the future.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date_at(Utc::now().date_naive())
    }

    /// Birth or foundation date resolved against an explicit reference day.
    pub fn date_at(&self, reference: NaiveDate) -> Option<NaiveDate> {
        resolve_yymmdd(self.date_segment(), reference)
    }

    /// Two-character homoclave.
    pub fn homoclave(&self) -> &str {
        &self.tail()[6..8]
    }

    /// Trailing check character.
    pub fn check_char(&self) -> char {
        self.tail()[8..].chars().next().unwrap_or('0')
    }
}

// ---------------------------------------------------------------------------
// CURP
// ---------------------------------------------------------------------------

/// Clave Única de Registro de Población.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Curp(String);

impl_validating_deserialize!(Curp);
impl_identifier_common!(Curp);

impl Curp {
    /// Validate a CURP in strict mode.
    ///
    /// # Errors
    ///
    /// Returns the first failing sub-check as a [`ValidationError`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate(IdentifierKind::Curp, value.as_ref()).map(Self)
    }

    /// Validate a CURP without checking its check digit.
    ///
    /// # Errors
    ///
    /// Returns length or grammar failures.
    pub fn new_lenient(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate_with(IdentifierKind::Curp, value.as_ref(), ValidationOptions::lenient()).map(Self)
    }

    /// The four name letters.
    pub fn letters(&self) -> &str {
        &self.0[..4]
    }

    /// The raw `YYMMDD` segment.
    pub fn date_segment(&self) -> &str {
        &self.0[4..10]
    }

    /// Birth date. The differentiator encodes the century: a digit for
    /// births before 2000, a letter from 2000 on.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        let century = if self.differentiator().is_ascii_digit() { 1900 } else { 2000 };
        crate::temporal::date_in_century(self.date_segment(), century)
    }

    /// Sex marker.
    pub fn sex(&self) -> Sex {
        if &self.0[10..11] == "M" {
            Sex::Female
        } else {
            Sex::Male
        }
    }

    /// Two-letter birth-state code.
    pub fn state_code(&self) -> &str {
        &self.0[11..13]
    }

    /// Official name of the birth state.
    pub fn state_name(&self) -> Option<&'static str> {
        state_name(self.state_code())
    }

    /// First internal consonants of paterno, materno and nombre.
    pub fn consonants(&self) -> &str {
        &self.0[13..16]
    }

    /// Registry-assigned homonym differentiator.
    pub fn differentiator(&self) -> char {
        self.0[16..17].chars().next().unwrap_or('0')
    }

    /// Trailing check digit.
    pub fn check_digit(&self) -> char {
        self.0[17..].chars().next().unwrap_or('0')
    }
}

// ---------------------------------------------------------------------------
// CLABE
// ---------------------------------------------------------------------------

/// Clave Bancaria Estandarizada.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Clabe(String);

impl_validating_deserialize!(Clabe);
impl_identifier_common!(Clabe);

impl Clabe {
    /// Validate a CLABE. The check digit is always enforced.
    ///
    /// # Errors
    ///
    /// Returns the first failing sub-check as a [`ValidationError`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate(IdentifierKind::Clabe, value.as_ref()).map(Self)
    }

    /// Three-digit bank code.
    pub fn bank_code(&self) -> &str {
        &self.0[..3]
    }

    /// Three-digit plaza (branch city) code.
    pub fn plaza_code(&self) -> &str {
        &self.0[3..6]
    }

    /// Eleven-digit account number.
    pub fn account_number(&self) -> &str {
        &self.0[6..17]
    }

    /// Trailing check digit.
    pub fn check_digit(&self) -> char {
        self.0[17..].chars().next().unwrap_or('0')
    }

    /// Resolve the bank record through an injected catalog.
    pub fn bank<L: Lookup>(&self, banks: &L) -> Option<L::Record> {
        banks.lookup(self.bank_code())
    }
}

// ---------------------------------------------------------------------------
// NSS
// ---------------------------------------------------------------------------

/// Número de Seguridad Social (IMSS).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Nss(String);

impl_validating_deserialize!(Nss);
impl_identifier_common!(Nss);

impl Nss {
    /// Validate an NSS. The check digit is always enforced.
    ///
    /// # Errors
    ///
    /// Returns the first failing sub-check as a [`ValidationError`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate(IdentifierKind::Nss, value.as_ref()).map(Self)
    }

    /// Two-digit IMSS subdelegation.
    pub fn subdelegation(&self) -> &str {
        &self.0[..2]
    }

    /// Two-digit year of IMSS registration.
    pub fn registration_year(&self) -> &str {
        &self.0[2..4]
    }

    /// Two-digit year of birth.
    pub fn birth_year(&self) -> &str {
        &self.0[4..6]
    }

    /// Four-digit serial.
    pub fn serial(&self) -> &str {
        &self.0[6..10]
    }

    /// Trailing check digit.
    pub fn check_digit(&self) -> char {
        self.0[10..].chars().next().unwrap_or('0')
    }
}
