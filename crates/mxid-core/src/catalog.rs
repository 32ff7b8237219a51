//! # Catalog Capability
//!
//! The identifier core never owns lookup catalogs. Where it needs one (bank
//! codes for CLABE plausibility, for instance) it consults an injected,
//! read-only [`Lookup`]. How that capability is populated is up to the
//! caller: a map, a closure over a database handle, a generated table.
//!
//! The one exception is the fixed table of the 32 federal entities used by
//! CURP: it is part of the CURP grammar itself and ships as [`STATES`].

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::normalize::normalize_person;

/// Synchronous keyed lookup into a read-only catalog.
pub trait Lookup {
    /// Record returned for a hit.
    type Record;

    /// Look up `key`, returning `None` on a miss.
    fn lookup(&self, key: &str) -> Option<Self::Record>;
}

impl<R: Clone> Lookup for HashMap<String, R> {
    type Record = R;

    fn lookup(&self, key: &str) -> Option<R> {
        self.get(key).cloned()
    }
}

impl<R: Clone> Lookup for BTreeMap<String, R> {
    type Record = R;

    fn lookup(&self, key: &str) -> Option<R> {
        self.get(key).cloned()
    }
}

impl<L: Lookup + ?Sized> Lookup for &L {
    type Record = L::Record;

    fn lookup(&self, key: &str) -> Option<L::Record> {
        (**self).lookup(key)
    }
}

/// Adapter turning a closure into a [`Lookup`].
pub struct FnLookup<F>(pub F);

impl<F, R> Lookup for FnLookup<F>
where
    F: Fn(&str) -> Option<R>,
{
    type Record = R;

    fn lookup(&self, key: &str) -> Option<R> {
        (self.0)(key)
    }
}

// ---------------------------------------------------------------------------
// Federal entities
// ---------------------------------------------------------------------------

/// One row of the CURP state table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct State {
    /// Official name, upper-case without accents.
    pub name: &'static str,
    /// Two-letter CURP code.
    pub code: &'static str,
}

const fn state(name: &'static str, code: &'static str) -> State {
    State { name, code }
}

/// Code used when the birth state cannot be resolved or is abroad.
pub const FOREIGN_BORN_CODE: &str = "NE";

/// The 32 federal entities plus the `DISTRITO FEDERAL` alias and the
/// foreign-born entry.
pub const STATES: [State; 34] = [
    state("AGUASCALIENTES", "AS"),
    state("BAJA CALIFORNIA", "BC"),
    state("BAJA CALIFORNIA SUR", "BS"),
    state("CAMPECHE", "CC"),
    state("COAHUILA", "CL"),
    state("COLIMA", "CM"),
    state("CHIAPAS", "CS"),
    state("CHIHUAHUA", "CH"),
    state("CIUDAD DE MEXICO", "DF"),
    state("DURANGO", "DG"),
    state("GUANAJUATO", "GT"),
    state("GUERRERO", "GR"),
    state("HIDALGO", "HG"),
    state("JALISCO", "JC"),
    state("MEXICO", "MC"),
    state("MICHOACAN", "MN"),
    state("MORELOS", "MS"),
    state("NAYARIT", "NT"),
    state("NUEVO LEON", "NL"),
    state("OAXACA", "OC"),
    state("PUEBLA", "PL"),
    state("QUERETARO", "QT"),
    state("QUINTANA ROO", "QR"),
    state("SAN LUIS POTOSI", "SP"),
    state("SINALOA", "SL"),
    state("SONORA", "SR"),
    state("TABASCO", "TC"),
    state("TAMAULIPAS", "TS"),
    state("TLAXCALA", "TL"),
    state("VERACRUZ", "VZ"),
    state("YUCATAN", "YN"),
    state("ZACATECAS", "ZS"),
    state("DISTRITO FEDERAL", "DF"),
    state("NACIDO EN EL EXTRANJERO", FOREIGN_BORN_CODE),
];

/// Whether `code` is a CURP state code.
pub fn is_state_code(code: &str) -> bool {
    STATES.iter().any(|s| s.code == code)
}

/// Official name for a state code. `DF` resolves to `CIUDAD DE MEXICO`.
pub fn state_name(code: &str) -> Option<&'static str> {
    STATES.iter().find(|s| s.code == code).map(|s| s.name)
}

/// Resolve a free-form birth-state string to its two-letter code.
///
/// Resolution runs in three tiers and stops at the first hit:
///
/// 1. exact match on the upper-cased name or code;
/// 2. match after accent folding and particle removal
///    (`"Estado de México"` and `"Mexico"` both fold to a known name);
/// 3. substring match, preferring the longest state name contained in the
///    input, then the first state name containing the input.
///
/// Anything unresolved maps to [`FOREIGN_BORN_CODE`].
pub fn resolve_state_code(input: &str) -> &'static str {
    let upper = input.trim().to_uppercase();
    if upper.is_empty() {
        tracing::warn!("empty birth state, using foreign-born code");
        return FOREIGN_BORN_CODE;
    }

    if let Some(s) = STATES.iter().find(|s| s.name == upper || s.code == upper) {
        return s.code;
    }

    let folded = normalize_person(&upper);
    let folded_names: Vec<(String, &'static str)> =
        STATES.iter().map(|s| (normalize_person(s.name), s.code)).collect();

    if let Some((_, code)) = folded_names.iter().find(|(name, _)| *name == folded) {
        return code;
    }

    if !folded.is_empty() {
        let contained = folded_names
            .iter()
            .filter(|(name, _)| folded.contains(name.as_str()))
            .max_by_key(|(name, _)| name.len());
        if let Some((_, code)) = contained {
            return code;
        }
        if let Some((_, code)) = folded_names
            .iter()
            .find(|(name, _)| name.contains(folded.as_str()))
        {
            return code;
        }
    }

    tracing::warn!(state = %input, "unresolved birth state, using foreign-born code");
    FOREIGN_BORN_CODE
}

/// [`Lookup`] over [`STATES`] keyed by two-letter code.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateCatalog;

impl Lookup for StateCatalog {
    type Record = &'static State;

    fn lookup(&self, key: &str) -> Option<&'static State> {
        STATES.iter().find(|s| s.code == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_two_letters() {
        for s in &STATES {
            assert_eq!(s.code.len(), 2);
            assert!(s.code.bytes().all(|b| b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn exact_tier() {
        assert_eq!(resolve_state_code("JALISCO"), "JC");
        assert_eq!(resolve_state_code("jalisco"), "JC");
        assert_eq!(resolve_state_code("VZ"), "VZ");
    }

    #[test]
    fn folded_tier() {
        assert_eq!(resolve_state_code("Querétaro"), "QT");
        assert_eq!(resolve_state_code("Michoacán"), "MN");
        assert_eq!(resolve_state_code("Nuevo León"), "NL");
    }

    #[test]
    fn substring_tier() {
        assert_eq!(resolve_state_code("Estado de México"), "MC");
        assert_eq!(resolve_state_code("Baja California Sur, México"), "BS");
        assert_eq!(resolve_state_code("Coahuila de Zaragoza"), "CL");
        assert_eq!(resolve_state_code("Tamauli"), "TS");
    }

    #[test]
    fn fallback_is_foreign_born() {
        assert_eq!(resolve_state_code("Texas"), "NE");
        assert_eq!(resolve_state_code(""), "NE");
    }

    #[test]
    fn names_for_codes() {
        assert_eq!(state_name("DF"), Some("CIUDAD DE MEXICO"));
        assert_eq!(state_name("JC"), Some("JALISCO"));
        assert_eq!(state_name("XX"), None);
        assert!(is_state_code("NE"));
        assert!(!is_state_code("ZZ"));
    }

    #[test]
    fn map_and_closure_lookups() {
        let mut banks = HashMap::new();
        banks.insert("002".to_string(), "BANAMEX".to_string());
        assert_eq!(banks.lookup("002").as_deref(), Some("BANAMEX"));
        assert_eq!(banks.lookup("999"), None);

        let closure = FnLookup(|k: &str| (k == "012").then_some("BBVA"));
        assert_eq!(closure.lookup("012"), Some("BBVA"));
        assert_eq!(StateCatalog.lookup("JC").map(|s| s.name), Some("JALISCO"));
    }
}
