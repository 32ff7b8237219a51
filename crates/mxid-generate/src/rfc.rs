//! # RFC Generators
//!
//! [`RfcFisicaGenerator`] builds the 13-character RFC of a natural person,
//! [`RfcMoralGenerator`] the 12-character RFC of a legal entity. Both
//! assemble `letters · YYMMDD · homoclave` and hand the prefix to the
//! checksum engine.
//!
//! ## Persona física letters
//!
//! | Case | Letters |
//! |------|---------|
//! | regular | paterno[0], first internal vowel of paterno (`X` if none), materno[0], nombre[0] |
//! | no materno | paterno[0], first internal vowel of paterno, nombre[0..2] |
//! | paterno under 3 letters | paterno[0], materno[0], nombre[0..2] |
//!
//! `nombre` skips a leading `MARIA`/`JOSE` when another given name follows.
//!
//! ## Persona moral letters
//!
//! One word: its first three letters. Two words: w1[0], w2[0], w2[1].
//! Three or more: the first letter of each of the first three.
//!
//! ## Caching
//!
//! A generator computes its RFC once, on first request, and keeps it. The
//! cache is a [`std::cell::OnceCell`]: generators are `!Sync`, so sharing
//! one instance across threads needs caller-side synchronization.

use std::cell::OnceCell;

use chrono::NaiveDate;

use mxid_core::temporal::format_yymmdd;
use mxid_core::{IdentifierKind, MxidError, Rfc};

use crate::code::GeneratedCode;
use crate::homoclave::homoclave;
use crate::input::{EntityName, EntityRequest, PersonName, PersonRequest};
use crate::words::{first_internal_vowel, initial, is_cacophonic_rfc};

/// Force the last letter to `X` when the block is on the cacophony list.
fn apply_rfc_cacophony(letters: &mut String) {
    if is_cacophonic_rfc(letters) {
        tracing::debug!(letters = %letters, "cacophonic RFC letters, last letter replaced");
        letters.pop();
        letters.push('X');
    }
}

/// First `n` letters of `word`, padded with `X`.
fn leading(word: &str, n: usize) -> impl Iterator<Item = char> + '_ {
    word.chars().chain(std::iter::repeat('X')).take(n)
}

/// Four-letter block of a persona física RFC.
pub fn fisica_letters(name: &PersonName) -> String {
    let paterno = name.paterno();
    let nombre = name.nombre_for_initials();
    let p0 = initial(paterno).unwrap_or('X');

    let mut letters = String::with_capacity(4);
    letters.push(p0);
    match name.materno() {
        None => {
            letters.push(first_internal_vowel(paterno).unwrap_or('X'));
            letters.extend(leading(nombre, 2));
        }
        Some(materno) if paterno.chars().count() < 3 => {
            letters.push(initial(materno).unwrap_or('X'));
            letters.extend(leading(nombre, 2));
        }
        Some(materno) => {
            letters.push(first_internal_vowel(paterno).unwrap_or('X'));
            letters.push(initial(materno).unwrap_or('X'));
            letters.push(initial(nombre).unwrap_or('X'));
        }
    }
    apply_rfc_cacophony(&mut letters);
    letters
}

/// Three-letter block of a persona moral RFC.
pub fn moral_letters(name: &EntityName) -> String {
    let mut letters: String = match name.words() {
        [] => "XXX".to_string(),
        [only] => leading(only, 3).collect(),
        [first, second] => leading(first, 1).chain(leading(second, 2)).collect(),
        [first, second, third, ..] => [first, second, third]
            .iter()
            .map(|w| initial(w).unwrap_or('X'))
            .collect(),
    };
    apply_rfc_cacophony(&mut letters);
    letters
}

// ---------------------------------------------------------------------------
// Persona física
// ---------------------------------------------------------------------------

/// RFC generator for a natural person.
#[derive(Debug, Clone)]
pub struct RfcFisicaGenerator {
    name: PersonName,
    birth_date: NaiveDate,
    rfc: OnceCell<String>,
}

impl RfcFisicaGenerator {
    /// Generator over already validated inputs.
    pub fn new(name: PersonName, birth_date: NaiveDate) -> Self {
        Self {
            name,
            birth_date,
            rfc: OnceCell::new(),
        }
    }

    /// Validate a request and build a generator from it.
    ///
    /// # Errors
    ///
    /// Any name or birth-date [`GenerationError`](mxid_core::GenerationError).
    pub fn from_request(request: &PersonRequest) -> Result<Self, MxidError> {
        let name = request.name()?;
        let birth_date = request.birth_date()?;
        Ok(Self::new(name, birth_date))
    }

    /// Cleaned name.
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Birth date.
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Twelve-character prefix, check character pending.
    pub fn code(&self) -> GeneratedCode {
        let prefix = format!(
            "{}{}{}",
            fisica_letters(&self.name),
            format_yymmdd(self.birth_date),
            homoclave(&self.name.full_name()),
        );
        GeneratedCode::new(IdentifierKind::Rfc, prefix)
    }

    /// The 13-character RFC, computed on first call and cached.
    ///
    /// # Errors
    ///
    /// Propagates a checksum-engine error; cleaned names stay inside the
    /// checksum alphabet, so this does not occur for generator-built codes.
    pub fn generate(&self) -> Result<&str, MxidError> {
        if let Some(rfc) = self.rfc.get() {
            return Ok(rfc);
        }
        let rfc = self.code().finish()?;
        Ok(self.rfc.get_or_init(|| rfc))
    }

    /// The RFC as a validated [`Rfc`].
    ///
    /// # Errors
    ///
    /// As [`RfcFisicaGenerator::generate`], plus re-validation failures.
    pub fn to_rfc(&self) -> Result<Rfc, MxidError> {
        Ok(Rfc::new(self.generate()?)?)
    }
}

// ---------------------------------------------------------------------------
// Persona moral
// ---------------------------------------------------------------------------

/// RFC generator for a legal entity.
#[derive(Debug, Clone)]
pub struct RfcMoralGenerator {
    name: EntityName,
    fecha_constitucion: NaiveDate,
    rfc: OnceCell<String>,
}

impl RfcMoralGenerator {
    /// Generator over already validated inputs.
    pub fn new(name: EntityName, fecha_constitucion: NaiveDate) -> Self {
        Self {
            name,
            fecha_constitucion,
            rfc: OnceCell::new(),
        }
    }

    /// Validate a request and build a generator from it.
    ///
    /// # Errors
    ///
    /// Any name or date [`GenerationError`](mxid_core::GenerationError).
    pub fn from_request(request: &EntityRequest) -> Result<Self, MxidError> {
        let name = request.name()?;
        let fecha = request.fecha_constitucion()?;
        Ok(Self::new(name, fecha))
    }

    /// Cleaned razón social.
    pub fn name(&self) -> &EntityName {
        &self.name
    }

    /// Incorporation date.
    pub fn fecha_constitucion(&self) -> NaiveDate {
        self.fecha_constitucion
    }

    /// Eleven-character prefix, check character pending.
    pub fn code(&self) -> GeneratedCode {
        let prefix = format!(
            "{}{}{}",
            moral_letters(&self.name),
            format_yymmdd(self.fecha_constitucion),
            homoclave(&self.name.full_name()),
        );
        GeneratedCode::new(IdentifierKind::Rfc, prefix)
    }

    /// The 12-character RFC, computed on first call and cached.
    ///
    /// # Errors
    ///
    /// Propagates a checksum-engine error.
    pub fn generate(&self) -> Result<&str, MxidError> {
        if let Some(rfc) = self.rfc.get() {
            return Ok(rfc);
        }
        let rfc = self.code().finish()?;
        Ok(self.rfc.get_or_init(|| rfc))
    }

    /// The RFC as a validated [`Rfc`].
    ///
    /// # Errors
    ///
    /// As [`RfcMoralGenerator::generate`], plus re-validation failures.
    pub fn to_rfc(&self) -> Result<Rfc, MxidError> {
        Ok(Rfc::new(self.generate()?)?)
    }
}

/// Validate a person request and generate its RFC.
///
/// # Errors
///
/// Any input [`GenerationError`](mxid_core::GenerationError).
pub fn generate_rfc_fisica(request: &PersonRequest) -> Result<Rfc, MxidError> {
    RfcFisicaGenerator::from_request(request)?.to_rfc()
}

/// Validate an entity request and generate its RFC.
///
/// # Errors
///
/// Any input [`GenerationError`](mxid_core::GenerationError).
pub fn generate_rfc_moral(request: &EntityRequest) -> Result<Rfc, MxidError> {
    RfcMoralGenerator::from_request(request)?.to_rfc()
}
