//! # mxid-generate — Identifier Generation
//!
//! Builds RFC, CURP, CLABE and NSS identifiers from structured records.
//! Generation runs one way:
//!
//! ```text
//! request ──▶ validated input ──▶ letter/date/code assembly ──▶ GeneratedCode ──▶ checksum ──▶ identifier
//! ```
//!
//! Input validation ([`input`]) happens first and completely: a generator
//! never starts assembling a code from a request with a blank name, an
//! unreadable date, a bad sex code or a name that cleans down to nothing.
//!
//! ## Modules
//!
//! - [`input`]: request records and validated names.
//! - [`words`]: cacophony lists and letter-picking helpers.
//! - [`homoclave`]: the RFC homoclave and its citation table.
//! - [`rfc`]: persona física and persona moral RFC generators.
//! - [`curp`]: CURP generator.
//! - [`accounts`]: CLABE and NSS assembly.
//! - [`code`]: the prefix-plus-check intermediate shared by all of them.
//!
//! ## Crate Policy
//!
//! - Depends only on `mxid-core` internally.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Generators cache their output in a `OnceCell` and are therefore `!Sync`.

pub mod accounts;
pub mod code;
pub mod curp;
pub mod homoclave;
pub mod input;
pub mod rfc;
pub mod words;

// Re-export primary types for ergonomic imports.
pub use accounts::{generate_clabe, generate_nss};
pub use code::GeneratedCode;
pub use curp::{generate_curp, CurpGenerator};
pub use homoclave::homoclave;
pub use input::{EntityName, EntityRequest, PersonName, PersonRequest};
pub use rfc::{generate_rfc_fisica, generate_rfc_moral, RfcFisicaGenerator, RfcMoralGenerator};
