//! # Generation Inputs
//!
//! Raw request records as they arrive from callers ([`PersonRequest`],
//! [`EntityRequest`]) and the validated inputs the generators consume
//! ([`PersonName`], [`EntityName`]).
//!
//! Every input error is raised here, before any part of an identifier is
//! computed: a blank required field, an unreadable date, a sex code other
//! than `H`/`M`, or a name with no letters left after normalization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use mxid_core::normalize::Normalizer;
use mxid_core::temporal::parse_date;
use mxid_core::{GenerationError, Sex};

use crate::words::given_name_for_initials;

/// Generation request for a natural person.
///
/// `sex_code` and `birth_state` are only required for CURP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRequest {
    /// Given name(s).
    pub nombre: String,
    /// First (paternal) surname.
    pub apellido_paterno: String,
    /// Second (maternal) surname, if any.
    #[serde(default)]
    pub apellido_materno: Option<String>,
    /// Birth date, `YYYY-MM-DD` or `DD/MM/YYYY`.
    pub birth_date: String,
    /// `H` or `M`.
    #[serde(default)]
    pub sex_code: Option<String>,
    /// Birth state, as a name or two-letter code.
    #[serde(default)]
    pub birth_state: Option<String>,
}

impl PersonRequest {
    /// Validated name fields.
    ///
    /// # Errors
    ///
    /// [`GenerationError::MissingField`] or [`GenerationError::EmptyName`].
    pub fn name(&self) -> Result<PersonName, GenerationError> {
        PersonName::new(&self.nombre, &self.apellido_paterno, self.apellido_materno.as_deref())
    }

    /// Parsed birth date.
    ///
    /// # Errors
    ///
    /// [`GenerationError::MissingField`] or [`GenerationError::InvalidDate`].
    pub fn birth_date(&self) -> Result<NaiveDate, GenerationError> {
        parse_date("birth_date", &self.birth_date)
    }

    /// Parsed sex code.
    ///
    /// # Errors
    ///
    /// [`GenerationError::MissingField`] or [`GenerationError::InvalidSex`].
    pub fn sex(&self) -> Result<Sex, GenerationError> {
        match self.sex_code.as_deref().map(str::trim) {
            None | Some("") => Err(GenerationError::MissingField("sex_code")),
            Some(code) => code.parse(),
        }
    }

    /// Raw birth-state field.
    ///
    /// # Errors
    ///
    /// [`GenerationError::MissingField`] when absent or blank.
    pub fn birth_state(&self) -> Result<&str, GenerationError> {
        match self.birth_state.as_deref().map(str::trim) {
            None | Some("") => Err(GenerationError::MissingField("birth_state")),
            Some(state) => Ok(state),
        }
    }
}

/// Generation request for a legal entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRequest {
    /// Registered company name.
    pub razon_social: String,
    /// Incorporation date, `YYYY-MM-DD` or `DD/MM/YYYY`.
    pub fecha_constitucion: String,
}

impl EntityRequest {
    /// Validated company name.
    ///
    /// # Errors
    ///
    /// [`GenerationError::MissingField`] or [`GenerationError::EmptyName`].
    pub fn name(&self) -> Result<EntityName, GenerationError> {
        EntityName::new(&self.razon_social)
    }

    /// Parsed incorporation date.
    ///
    /// # Errors
    ///
    /// [`GenerationError::MissingField`] or [`GenerationError::InvalidDate`].
    pub fn fecha_constitucion(&self) -> Result<NaiveDate, GenerationError> {
        parse_date("fecha_constitucion", &self.fecha_constitucion)
    }
}

// ---------------------------------------------------------------------------
// Validated names
// ---------------------------------------------------------------------------

/// A natural person's name: raw fields plus their cleaned words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    raw: [String; 3],
    nombre: Vec<String>,
    paterno: Vec<String>,
    materno: Vec<String>,
}

impl PersonName {
    /// Validate and clean the three name fields.
    ///
    /// `materno` may be absent or blank; it may also clean down to nothing
    /// (`"de la"`), which is treated the same as absent.
    ///
    /// # Errors
    ///
    /// [`GenerationError::MissingField`] if `nombre` or `paterno` is blank,
    /// [`GenerationError::EmptyName`] if either has no letters after
    /// normalization.
    pub fn new(
        nombre: &str,
        paterno: &str,
        materno: Option<&str>,
    ) -> Result<Self, GenerationError> {
        let normalizer = Normalizer::person();
        let clean = |field: &'static str, raw: &str| -> Result<Vec<String>, GenerationError> {
            if raw.trim().is_empty() {
                return Err(GenerationError::MissingField(field));
            }
            let words = normalizer.words(raw, normalizer.excluded_words());
            if words.is_empty() {
                return Err(GenerationError::EmptyName(field));
            }
            Ok(words)
        };

        let nombre_words = clean("nombre", nombre)?;
        let paterno_words = clean("apellido_paterno", paterno)?;
        let materno = materno.unwrap_or("");
        let materno_words = normalizer.words(materno, normalizer.excluded_words());

        Ok(Self {
            raw: [nombre.to_string(), paterno.to_string(), materno.to_string()],
            nombre: nombre_words,
            paterno: paterno_words,
            materno: materno_words,
        })
    }

    /// Given name as supplied.
    pub fn raw_nombre(&self) -> &str {
        &self.raw[0]
    }

    /// Paternal surname as supplied.
    pub fn raw_paterno(&self) -> &str {
        &self.raw[1]
    }

    /// Maternal surname as supplied; empty when absent.
    pub fn raw_materno(&self) -> &str {
        &self.raw[2]
    }

    /// Cleaned given-name words.
    pub fn nombre(&self) -> &[String] {
        &self.nombre
    }

    /// First cleaned word of the paternal surname.
    pub fn paterno(&self) -> &str {
        self.paterno.first().map_or("", String::as_str)
    }

    /// First cleaned word of the maternal surname, if any survived.
    pub fn materno(&self) -> Option<&str> {
        self.materno.first().map(String::as_str)
    }

    /// Given-name word used for initials: the first word, unless it is a
    /// common leading `MARIA`/`JOSE` and another word follows.
    pub fn nombre_for_initials(&self) -> &str {
        given_name_for_initials(&self.nombre)
    }

    /// `PATERNO MATERNO NOMBRE`, accent-folded with particles kept, as the
    /// homoclave reads it.
    pub fn full_name(&self) -> String {
        let normalizer = Normalizer::person();
        self.raw[1..]
            .iter()
            .chain(std::iter::once(&self.raw[0]))
            .map(|part| normalizer.normalize_excluding(part, &[]))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A legal entity's razón social: raw text plus its cleaned words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityName {
    raw: String,
    words: Vec<String>,
}

impl EntityName {
    /// Validate and clean a razón social.
    ///
    /// # Errors
    ///
    /// [`GenerationError::MissingField`] if blank,
    /// [`GenerationError::EmptyName`] if nothing survives normalization
    /// (`"S.A. de C.V."`).
    pub fn new(razon_social: &str) -> Result<Self, GenerationError> {
        if razon_social.trim().is_empty() {
            return Err(GenerationError::MissingField("razon_social"));
        }
        let normalizer = Normalizer::entity();
        let words = normalizer.words(razon_social, normalizer.excluded_words());
        if words.is_empty() {
            return Err(GenerationError::EmptyName("razon_social"));
        }
        Ok(Self {
            raw: razon_social.to_string(),
            words,
        })
    }

    /// Razón social as supplied.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Cleaned words, suffixes and articles removed.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Suffix-stripped name with articles kept, as the homoclave reads it.
    pub fn full_name(&self) -> String {
        Normalizer::entity().normalize_excluding(&self.raw, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_name_cleans_fields() {
        let name = PersonName::new("María Guadalupe", "de la Cruz", Some("Hernández")).unwrap();
        assert_eq!(name.paterno(), "CRUZ");
        assert_eq!(name.materno(), Some("HERNANDEZ"));
        assert_eq!(name.nombre(), ["MARIA", "GUADALUPE"]);
        assert_eq!(name.nombre_for_initials(), "GUADALUPE");
        assert_eq!(name.full_name(), "DE LA CRUZ HERNANDEZ MARIA GUADALUPE");
        assert_eq!(name.raw_paterno(), "de la Cruz");
    }

    #[test]
    fn materno_may_be_absent() {
        let name = PersonName::new("Pedro", "Muñoz", None).unwrap();
        assert_eq!(name.materno(), None);
        assert_eq!(name.full_name(), "MUÑOZ PEDRO");
        let name = PersonName::new("Pedro", "Muñoz", Some("  ")).unwrap();
        assert_eq!(name.materno(), None);
    }

    #[test]
    fn missing_and_empty_names() {
        assert_eq!(
            PersonName::new(" ", "Garcia", None),
            Err(GenerationError::MissingField("nombre"))
        );
        assert_eq!(
            PersonName::new("Juan", "", None),
            Err(GenerationError::MissingField("apellido_paterno"))
        );
        assert_eq!(
            PersonName::new("Juan", "de la", None),
            Err(GenerationError::EmptyName("apellido_paterno"))
        );
    }

    #[test]
    fn entity_name_cleans_suffixes() {
        let name = EntityName::new("Tecnologia Sistemas Integrales, S.A. de C.V.").unwrap();
        assert_eq!(name.words(), ["TECNOLOGIA", "SISTEMAS", "INTEGRALES"]);
        assert_eq!(name.full_name(), "TECNOLOGIA SISTEMAS INTEGRALES");
        assert_eq!(
            EntityName::new("S.A. de C.V."),
            Err(GenerationError::EmptyName("razon_social"))
        );
        assert_eq!(EntityName::new(""), Err(GenerationError::MissingField("razon_social")));
    }

    #[test]
    fn person_request_from_json() {
        let req: PersonRequest = serde_json::from_str(
            r#"{
                "nombre": "Juan",
                "apellido_paterno": "Garcia",
                "apellido_materno": "Lopez",
                "birth_date": "1990-05-15",
                "sex_code": "h",
                "birth_state": "Jalisco"
            }"#,
        )
        .unwrap();
        assert_eq!(req.birth_date().unwrap(), NaiveDate::from_ymd_opt(1990, 5, 15).unwrap());
        assert_eq!(req.sex().unwrap(), Sex::Male);
        assert_eq!(req.birth_state().unwrap(), "Jalisco");
        assert_eq!(req.name().unwrap().paterno(), "GARCIA");
    }

    #[test]
    fn person_request_optional_fields() {
        let req: PersonRequest = serde_json::from_str(
            r#"{"nombre": "Ana", "apellido_paterno": "Baca", "birth_date": "20/03/1985"}"#,
        )
        .unwrap();
        assert_eq!(req.apellido_materno, None);
        assert_eq!(req.sex(), Err(GenerationError::MissingField("sex_code")));
        assert_eq!(req.birth_state(), Err(GenerationError::MissingField("birth_state")));
        assert!(req.birth_date().is_ok());
    }

    #[test]
    fn invalid_sex_and_date() {
        let req = PersonRequest {
            nombre: "Ana".into(),
            apellido_paterno: "Baca".into(),
            birth_date: "1985-02-30".into(),
            sex_code: Some("F".into()),
            ..Default::default()
        };
        assert_eq!(req.sex(), Err(GenerationError::InvalidSex("F".into())));
        assert!(matches!(req.birth_date(), Err(GenerationError::InvalidDate { .. })));
    }

    #[test]
    fn entity_request_from_json() {
        let req: EntityRequest = serde_json::from_str(
            r#"{
                "razon_social": "Tecnologia Sistemas Integrales",
                "fecha_constitucion": "2009-09-09"
            }"#,
        )
        .unwrap();
        assert_eq!(req.fecha_constitucion().unwrap(), NaiveDate::from_ymd_opt(2009, 9, 9).unwrap());
        assert_eq!(req.name().unwrap().words().len(), 3);
    }
}
