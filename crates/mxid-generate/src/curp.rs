//! # CURP Generator
//!
//! Assembles the 18-character CURP:
//!
//! | Positions | Content |
//! |-----------|---------|
//! | 0–3   | paterno[0], first internal vowel of paterno, materno[0], nombre[0] |
//! | 4–9   | birth date, `YYMMDD` |
//! | 10    | sex, `H`/`M` |
//! | 11–12 | birth-state code |
//! | 13–15 | first internal consonant of paterno, materno, nombre |
//! | 16    | differentiator placeholder |
//! | 17    | check digit |
//!
//! Missing letters are `X`, and so is `Ñ` wherever it would be emitted.
//! When positions 0–3 spell a word on the cacophony list, position 1
//! becomes `X`.
//!
//! The differentiator is assigned by the civil registry to separate
//! homonyms and cannot be derived. The generator emits `0` for births
//! before 2000 and `A` from 2000 on; a generated CURP is well-formed and
//! checksum-valid but need not match the one actually issued.

use std::cell::OnceCell;

use chrono::{Datelike, NaiveDate};

use mxid_core::catalog::resolve_state_code;
use mxid_core::temporal::format_yymmdd;
use mxid_core::{Curp, IdentifierKind, MxidError, Sex};

use crate::code::GeneratedCode;
use crate::input::{PersonName, PersonRequest};
use crate::words::{first_internal_consonant, first_internal_vowel, initial, is_cacophonic_curp};

/// CURP letters are plain `A`–`Z`.
fn curp_char(c: Option<char>) -> char {
    match c {
        Some(c) if c.is_ascii_uppercase() => c,
        _ => 'X',
    }
}

/// Four-letter block, cacophony rule applied.
pub fn curp_letters(name: &PersonName) -> String {
    let paterno = name.paterno();
    let mut letters = [
        curp_char(initial(paterno)),
        curp_char(first_internal_vowel(paterno)),
        curp_char(name.materno().and_then(initial)),
        curp_char(initial(name.nombre_for_initials())),
    ];
    let block: String = letters.iter().collect();
    if is_cacophonic_curp(&block) {
        tracing::debug!(letters = %block, "cacophonic CURP letters, second letter replaced");
        letters[1] = 'X';
    }
    letters.iter().collect()
}

/// Three internal consonants of paterno, materno and nombre.
pub fn curp_consonants(name: &PersonName) -> String {
    [
        first_internal_consonant(name.paterno()),
        name.materno().and_then(first_internal_consonant),
        first_internal_consonant(name.nombre_for_initials()),
    ]
    .into_iter()
    .map(curp_char)
    .collect()
}

/// Differentiator placeholder for a birth date.
pub fn differentiator(birth_date: NaiveDate) -> char {
    if birth_date.year() < 2000 {
        '0'
    } else {
        'A'
    }
}

/// CURP generator for a natural person.
#[derive(Debug, Clone)]
pub struct CurpGenerator {
    name: PersonName,
    birth_date: NaiveDate,
    sex: Sex,
    state_code: &'static str,
    curp: OnceCell<String>,
}

impl CurpGenerator {
    /// Generator over validated inputs. `birth_state` is a name or code
    /// resolved through [`resolve_state_code`]; unresolved input maps to
    /// `NE`.
    pub fn new(name: PersonName, birth_date: NaiveDate, sex: Sex, birth_state: &str) -> Self {
        Self {
            name,
            birth_date,
            sex,
            state_code: resolve_state_code(birth_state),
            curp: OnceCell::new(),
        }
    }

    /// Validate a request and build a generator from it. Every field is
    /// checked before anything is computed.
    ///
    /// # Errors
    ///
    /// Any name, birth-date, sex or birth-state
    /// [`GenerationError`](mxid_core::GenerationError).
    pub fn from_request(request: &PersonRequest) -> Result<Self, MxidError> {
        let name = request.name()?;
        let birth_date = request.birth_date()?;
        let sex = request.sex()?;
        let birth_state = request.birth_state()?;
        Ok(Self::new(name, birth_date, sex, birth_state))
    }

    /// Cleaned name.
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Resolved two-letter birth-state code.
    pub fn state_code(&self) -> &'static str {
        self.state_code
    }

    /// Seventeen-character prefix, check digit pending.
    pub fn code(&self) -> GeneratedCode {
        let prefix = format!(
            "{}{}{}{}{}{}",
            curp_letters(&self.name),
            format_yymmdd(self.birth_date),
            self.sex.code(),
            self.state_code,
            curp_consonants(&self.name),
            differentiator(self.birth_date),
        );
        GeneratedCode::new(IdentifierKind::Curp, prefix)
    }

    /// The 18-character CURP, computed on first call and cached.
    ///
    /// # Errors
    ///
    /// Propagates a checksum-engine error.
    pub fn generate(&self) -> Result<&str, MxidError> {
        if let Some(curp) = self.curp.get() {
            return Ok(curp);
        }
        let curp = self.code().finish()?;
        Ok(self.curp.get_or_init(|| curp))
    }

    /// The CURP as a validated [`Curp`].
    ///
    /// # Errors
    ///
    /// As [`CurpGenerator::generate`], plus re-validation failures.
    pub fn to_curp(&self) -> Result<Curp, MxidError> {
        Ok(Curp::new(self.generate()?)?)
    }
}

/// Validate a person request and generate its CURP.
///
/// # Errors
///
/// Any input [`GenerationError`](mxid_core::GenerationError).
pub fn generate_curp(request: &PersonRequest) -> Result<Curp, MxidError> {
    CurpGenerator::from_request(request)?.to_curp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mxid_core::GenerationError;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn curp(
        nombre: &str,
        paterno: &str,
        materno: Option<&str>,
        date: NaiveDate,
        sex: Sex,
        state: &str,
    ) -> String {
        let name = PersonName::new(nombre, paterno, materno).unwrap();
        CurpGenerator::new(name, date, sex, state).generate().unwrap().to_string()
    }

    #[test]
    fn known_vector() {
        let c = curp("Juan", "Garcia", Some("Lopez"), ymd(1990, 5, 15), Sex::Male, "Jalisco");
        assert_eq!(c, "GALJ900515HJCRPN01");
    }

    #[test]
    fn cacophony_replaces_second_letter() {
        let c = curp("Ana", "Baca", Some("Castro"), ymd(1985, 3, 20), Sex::Female, "Jalisco");
        assert_eq!(c, "BXCA850320MJCCSN06");
        let c = curp(
            "Oscar",
            "Perez",
            Some("Dominguez"),
            ymd(1980, 1, 1),
            Sex::Male,
            "Ciudad de México",
        );
        assert_eq!(c, "PXDO800101HDFRMS07");
    }

    #[test]
    fn missing_materno_and_enye() {
        let c = curp("Pedro", "Muñoz", None, ymd(1975, 6, 10), Sex::Male, "Nuevo León");
        assert_eq!(c, "MUXP750610HNLXXD06");
        let c = curp("Juan", "Ñuñez", Some("Ruiz"), ymd(1990, 1, 1), Sex::Male, "JC");
        assert_eq!(c, "XURJ900101HJCXZN08");
    }

    #[test]
    fn particles_and_compound_given_name() {
        let c = curp(
            "María Guadalupe",
            "de la Cruz",
            Some("Hernández"),
            ymd(1988, 11, 22),
            Sex::Female,
            "Distrito Federal",
        );
        assert_eq!(c, "CUHG881122MDFRRD00");
    }

    #[test]
    fn born_after_2000_uses_letter_differentiator() {
        let c = curp("Ana", "Pérez", None, ymd(2005, 1, 1), Sex::Female, "CDMX");
        // "CDMX" resolves to no state name, so the foreign-born code is used.
        assert!(c.starts_with("PEXA050101MNE"));
        let c = curp("Ana", "Pérez", None, ymd(2005, 1, 1), Sex::Female, "Ciudad de Mexico");
        assert_eq!(c, "PEXA050101MDFRXNA3");
        assert_eq!(differentiator(ymd(1999, 12, 31)), '0');
        assert_eq!(differentiator(ymd(2000, 1, 1)), 'A');
    }

    #[test]
    fn generated_curp_parses_back() {
        let generator = CurpGenerator::new(
            PersonName::new("Juan", "Garcia", Some("Lopez")).unwrap(),
            ymd(1990, 5, 15),
            Sex::Male,
            "Jalisco",
        );
        let parsed = generator.to_curp().unwrap();
        assert_eq!(parsed.birth_date(), Some(ymd(1990, 5, 15)));
        assert_eq!(parsed.state_code(), "JC");
        assert_eq!(parsed.sex(), Sex::Male);
        assert!(std::ptr::eq(generator.generate().unwrap(), generator.generate().unwrap()));
    }

    #[test]
    fn request_requires_sex_and_state() {
        let mut request = PersonRequest {
            nombre: "Juan".into(),
            apellido_paterno: "Garcia".into(),
            apellido_materno: Some("Lopez".into()),
            birth_date: "1990-05-15".into(),
            ..Default::default()
        };
        assert_eq!(
            generate_curp(&request).unwrap_err(),
            MxidError::Generation(GenerationError::MissingField("sex_code"))
        );
        request.sex_code = Some("X".into());
        assert_eq!(
            generate_curp(&request).unwrap_err(),
            MxidError::Generation(GenerationError::InvalidSex("X".into()))
        );
        request.sex_code = Some("H".into());
        assert_eq!(
            generate_curp(&request).unwrap_err(),
            MxidError::Generation(GenerationError::MissingField("birth_state"))
        );
        request.birth_state = Some("Jalisco".into());
        assert_eq!(generate_curp(&request).unwrap().as_str(), "GALJ900515HJCRPN01");
    }
}
