//! # CLABE and NSS Assembly
//!
//! Both formats are fixed-width digit strings: the generator only checks
//! each component's width, concatenates them and appends the check digit.

use mxid_core::{Clabe, GenerationError, IdentifierKind, MxidError, Nss};

use crate::code::GeneratedCode;

/// Require `value` to be exactly `width` ASCII digits.
fn component(field: &'static str, value: &str, width: usize) -> Result<String, GenerationError> {
    let trimmed = value.trim();
    if trimmed.len() == width && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Ok(trimmed.to_string())
    } else {
        Err(GenerationError::InvalidComponent {
            field,
            expected: width,
            value: value.to_string(),
        })
    }
}

/// Build a CLABE from a 3-digit bank code, 3-digit plaza code and
/// 11-digit account number.
///
/// # Errors
///
/// [`GenerationError::InvalidComponent`] for a component of the wrong
/// width or with non-digits.
pub fn generate_clabe(
    bank_code: &str,
    plaza_code: &str,
    account_number: &str,
) -> Result<Clabe, MxidError> {
    let prefix = [
        component("bank_code", bank_code, 3)?,
        component("plaza_code", plaza_code, 3)?,
        component("account_number", account_number, 11)?,
    ]
    .concat();
    let clabe = GeneratedCode::new(IdentifierKind::Clabe, prefix).finish()?;
    Ok(Clabe::new(clabe)?)
}

/// Build an NSS from a 2-digit subdelegation, 2-digit registration year,
/// 2-digit birth year and 4-digit serial.
///
/// # Errors
///
/// [`GenerationError::InvalidComponent`] for a component of the wrong
/// width or with non-digits.
pub fn generate_nss(
    subdelegation: &str,
    registration_year: &str,
    birth_year: &str,
    serial: &str,
) -> Result<Nss, MxidError> {
    let prefix = [
        component("subdelegation", subdelegation, 2)?,
        component("registration_year", registration_year, 2)?,
        component("birth_year", birth_year, 2)?,
        component("serial", serial, 4)?,
    ]
    .concat();
    let nss = GeneratedCode::new(IdentifierKind::Nss, prefix).finish()?;
    Ok(Nss::new(nss)?)
}
