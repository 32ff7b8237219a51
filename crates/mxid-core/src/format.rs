//! # Identifier Formats — Single Source of Truth
//!
//! Defines [`IdentifierKind`], the closed set of supported formats, and the
//! per-format table that drives structural validation and check-digit
//! dispatch. Every format is described by data: its accepted lengths, one
//! segment grammar per length, and a pair of checksum functions. Adding a
//! format means adding a row here, not a new validation code path.
//!
//! | Format | Length | Grammar |
//! |--------|--------|---------|
//! | RFC    | 12/13  | 3–4 letters {A–Z,&,Ñ}; YYMMDD; 2 × {A–Z,0–9}\{O}; 1 × {0–9,A} |
//! | CURP   | 18     | letter; vowel-or-X; 2 letters; YYMMDD; H/M; state; 3 consonants; 2 × {0–9,A–Z} |
//! | CLABE  | 18     | digits |
//! | NSS    | 11     | digits |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::checksum;
use crate::error::{UnknownKindError, ValidationError};

/// The four supported Mexican identifier formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IdentifierKind {
    /// Registro Federal de Contribuyentes (tax ID).
    Rfc,
    /// Clave Única de Registro de Población.
    Curp,
    /// Clave Bancaria Estandarizada.
    Clabe,
    /// Número de Seguridad Social.
    Nss,
}

impl IdentifierKind {
    /// All formats, in detection order.
    pub const ALL: [IdentifierKind; 4] = [Self::Rfc, Self::Curp, Self::Clabe, Self::Nss];

    /// Upper-case acronym of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rfc => "RFC",
            Self::Curp => "CURP",
            Self::Clabe => "CLABE",
            Self::Nss => "NSS",
        }
    }

    /// The format table row for this kind.
    pub fn spec(&self) -> &'static FormatSpec {
        match self {
            Self::Rfc => &RFC_SPEC,
            Self::Curp => &CURP_SPEC,
            Self::Clabe => &CLABE_SPEC,
            Self::Nss => &NSS_SPEC,
        }
    }

    /// Accepted lengths in characters.
    pub fn lengths(&self) -> &'static [usize] {
        self.spec().lengths
    }

    /// Whether callers may skip the checksum sub-check for this format.
    ///
    /// Only RFC and CURP carry historical codes that fail the published
    /// algorithm; CLABE and NSS checksums are always enforced.
    pub fn allows_lenient(&self) -> bool {
        matches!(self, Self::Rfc | Self::Curp)
    }

    /// Segment grammar for an identifier of `len` characters, if `len` is
    /// one of the accepted lengths.
    pub fn grammar_for(&self, len: usize) -> Option<&'static [Segment]> {
        let spec = self.spec();
        spec.lengths
            .iter()
            .position(|l| *l == len)
            .map(|i| spec.grammars[i])
    }

    /// Compute the check character for a structurally valid prefix.
    pub fn calculate_check(&self, prefix: &str) -> Result<char, ValidationError> {
        (self.spec().calculate)(prefix)
    }

    /// Recompute and compare the trailing check character of `full`.
    pub fn verify_check(&self, full: &str) -> bool {
        (self.spec().verify)(full)
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierKind {
    type Err = UnknownKindError;

    /// Parse a kind from its acronym, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RFC" => Ok(Self::Rfc),
            "CURP" => Ok(Self::Curp),
            "CLABE" => Ok(Self::Clabe),
            "NSS" => Ok(Self::Nss),
            _ => Err(UnknownKindError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-checks and character classes
// ---------------------------------------------------------------------------

/// Independent sub-checks a validation report can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubCheck {
    /// Fixed-length check; always evaluated first.
    Length,
    /// Character-class grammar of a segment.
    Grammar,
    /// YYMMDD segment is a real calendar date.
    Date,
    /// RFC homoclave characters are drawn from {A–Z,0–9} without `O`.
    HomoclaveCharset,
    /// CLABE bank code resolves in the injected bank catalog.
    BankCode,
    /// Trailing check character matches the recomputed one.
    Checksum,
}

impl SubCheck {
    /// Snake-case name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Grammar => "grammar",
            Self::Date => "date",
            Self::HomoclaveCharset => "homoclave_charset",
            Self::BankCode => "bank_code",
            Self::Checksum => "checksum",
        }
    }
}

impl std::fmt::Display for SubCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Character class of a grammar segment.
///
/// `Date` and `StateCode` span the whole segment and are checked as a unit;
/// every other class is checked character by character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// `A`–`Z`.
    Letter,
    /// `A`–`Z`, `&`, `Ñ`.
    RfcLetter,
    /// `A`, `E`, `I`, `O`, `U` or `X`.
    VowelOrX,
    /// `A`–`Z` excluding vowels.
    Consonant,
    /// `0`–`9`.
    Digit,
    /// `0`–`9`, `A`–`Z`.
    Alphanumeric,
    /// `0`–`9`, `A`–`Z` excluding `O`.
    Homoclave,
    /// `0`–`9` or `A`.
    RfcCheck,
    /// `H` or `M`.
    Sex,
    /// Six digits forming a valid YYMMDD calendar date.
    Date,
    /// Two-letter state code from the fixed state table.
    StateCode,
}

impl CharClass {
    /// Whether `c` belongs to a per-character class. Segment-wide classes
    /// (`Date`, `StateCode`) only constrain the alphabet here.
    pub fn admits(&self, c: char) -> bool {
        match self {
            Self::Letter | Self::StateCode => c.is_ascii_uppercase(),
            Self::RfcLetter => c.is_ascii_uppercase() || c == '&' || c == 'Ñ',
            Self::VowelOrX => matches!(c, 'A' | 'E' | 'I' | 'O' | 'U' | 'X'),
            Self::Consonant => c.is_ascii_uppercase() && !is_vowel(c),
            Self::Digit | Self::Date => c.is_ascii_digit(),
            Self::Alphanumeric => c.is_ascii_uppercase() || c.is_ascii_digit(),
            Self::Homoclave => (c.is_ascii_uppercase() && c != 'O') || c.is_ascii_digit(),
            Self::RfcCheck => c.is_ascii_digit() || c == 'A',
            Self::Sex => c == 'H' || c == 'M',
        }
    }
}

/// Whether `c` is an upper-case Spanish vowel.
pub fn is_vowel(c: char) -> bool {
    matches!(c, 'A' | 'E' | 'I' | 'O' | 'U')
}

/// One fixed-width run of an identifier grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Name used in diagnostics.
    pub name: &'static str,
    /// Width in characters.
    pub len: usize,
    /// Allowed characters.
    pub class: CharClass,
    /// Sub-check reported when the segment is violated.
    pub check: SubCheck,
}

const fn seg(name: &'static str, len: usize, class: CharClass, check: SubCheck) -> Segment {
    Segment { name, len, class, check }
}

// ---------------------------------------------------------------------------
// Format table
// ---------------------------------------------------------------------------

/// One row of the format table.
pub struct FormatSpec {
    /// Format described by this row.
    pub kind: IdentifierKind,
    /// Accepted lengths, shortest first.
    pub lengths: &'static [usize],
    /// Human-readable rendering of `lengths` for error messages.
    pub expected: &'static str,
    /// One grammar per entry of `lengths`, in the same order.
    pub grammars: &'static [&'static [Segment]],
    calculate: fn(&str) -> Result<char, ValidationError>,
    verify: fn(&str) -> bool,
}

impl std::fmt::Debug for FormatSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatSpec")
            .field("kind", &self.kind)
            .field("lengths", &self.lengths)
            .field("grammars", &self.grammars)
            .finish_non_exhaustive()
    }
}

const RFC_MORAL_GRAMMAR: &[Segment] = &[
    seg("name letters", 3, CharClass::RfcLetter, SubCheck::Grammar),
    seg("date", 6, CharClass::Date, SubCheck::Date),
    seg("homoclave", 2, CharClass::Homoclave, SubCheck::HomoclaveCharset),
    seg("check character", 1, CharClass::RfcCheck, SubCheck::Grammar),
];

const RFC_FISICA_GRAMMAR: &[Segment] = &[
    seg("name letters", 4, CharClass::RfcLetter, SubCheck::Grammar),
    seg("date", 6, CharClass::Date, SubCheck::Date),
    seg("homoclave", 2, CharClass::Homoclave, SubCheck::HomoclaveCharset),
    seg("check character", 1, CharClass::RfcCheck, SubCheck::Grammar),
];

const CURP_GRAMMAR: &[Segment] = &[
    seg("initial", 1, CharClass::Letter, SubCheck::Grammar),
    seg("internal vowel", 1, CharClass::VowelOrX, SubCheck::Grammar),
    seg("name letters", 2, CharClass::Letter, SubCheck::Grammar),
    seg("date", 6, CharClass::Date, SubCheck::Date),
    seg("sex", 1, CharClass::Sex, SubCheck::Grammar),
    seg("state", 2, CharClass::StateCode, SubCheck::Grammar),
    seg("internal consonants", 3, CharClass::Consonant, SubCheck::Grammar),
    seg("differentiator", 1, CharClass::Alphanumeric, SubCheck::Grammar),
    seg("check digit", 1, CharClass::Alphanumeric, SubCheck::Grammar),
];

const CLABE_GRAMMAR: &[Segment] = &[seg("digits", 18, CharClass::Digit, SubCheck::Grammar)];

const NSS_GRAMMAR: &[Segment] = &[seg("digits", 11, CharClass::Digit, SubCheck::Grammar)];

static RFC_SPEC: FormatSpec = FormatSpec {
    kind: IdentifierKind::Rfc,
    lengths: &[12, 13],
    expected: "12 or 13",
    grammars: &[RFC_MORAL_GRAMMAR, RFC_FISICA_GRAMMAR],
    calculate: checksum::rfc::calculate,
    verify: checksum::rfc::verify,
};

static CURP_SPEC: FormatSpec = FormatSpec {
    kind: IdentifierKind::Curp,
    lengths: &[18],
    expected: "18",
    grammars: &[CURP_GRAMMAR],
    calculate: checksum::curp::calculate,
    verify: checksum::curp::verify,
};

static CLABE_SPEC: FormatSpec = FormatSpec {
    kind: IdentifierKind::Clabe,
    lengths: &[18],
    expected: "18",
    grammars: &[CLABE_GRAMMAR],
    calculate: checksum::clabe::calculate,
    verify: checksum::clabe::verify,
};

static NSS_SPEC: FormatSpec = FormatSpec {
    kind: IdentifierKind::Nss,
    lengths: &[11],
    expected: "11",
    grammars: &[NSS_GRAMMAR],
    calculate: checksum::nss::calculate,
    verify: checksum::nss::verify,
};
