//! # mxid-core — Validation Core for Mexican Identifiers
//!
//! This crate validates the four fixed-grammar Mexican identifier formats:
//! RFC (tax ID), CURP (population registry), CLABE (bank account) and NSS
//! (social security). It also owns the name normalizer and the checksum
//! engine that `mxid-generate` builds on. It depends on no other `mxid-*`
//! crate.
//!
//! ## Key Design Principles
//!
//! 1. **One format table.** [`IdentifierKind`] is a closed enum. Each variant
//!    maps to one row of lengths, segment grammars and checksum functions.
//!    Validation is a single code path driven by that table.
//!
//! 2. **Newtype wrappers.** [`Rfc`], [`Curp`], [`Clabe`] and [`Nss`] can only
//!    be built through the validator. Holding one proves the string is valid.
//!
//! 3. **Pure functions.** Nothing reads files, the network or global state.
//!    Catalogs are consulted through the injected [`Lookup`] capability.
//!
//! 4. **Two tables, never shared.** The RFC checksum table and the homoclave
//!    citation table assign different codes to the same characters and live
//!    in separate constants.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Logging goes through `tracing`; no subscriber is installed here.

pub mod catalog;
pub mod checksum;
pub mod error;
pub mod format;
pub mod identity;
pub mod normalize;
pub mod structure;
pub mod temporal;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use catalog::{resolve_state_code, state_name, FnLookup, Lookup, State, StateCatalog, STATES};
pub use error::{GenerationError, MxidError, UnknownKindError, ValidationError};
pub use format::{IdentifierKind, SubCheck};
pub use identity::{Clabe, Curp, Nss, Rfc, RfcKind, Sex};
pub use normalize::{normalize, normalize_entity, normalize_person, NormalizeProfile, Normalizer};
pub use structure::{is_well_formed, validate_structure, Reason};
pub use validate::{
    check_bank_code, detect, is_valid, is_valid_with, validate, validate_report, validate_with,
    ValidationOptions, ValidationReport,
};
