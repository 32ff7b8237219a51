//! # Homoclave
//!
//! The two-character RFC disambiguator derived from the full name. Each
//! character is cited as a two-digit code from [`HOMOCLAVE_CITATION_TABLE`],
//! the codes are concatenated behind a leading `'0'`, and every adjacent
//! (two-digit, next-digit) pair is multiplied and summed. The last three
//! digits of the sum, split by 34, index [`HOMOCLAVE_ALPHABET`] twice.
//!
//! The citation table is not the RFC checksum table in
//! [`mxid_core::checksum::RFC_CHECKSUM_TABLE`]: the same letters carry
//! different values in each.

/// Two-digit citation codes. Characters not listed cite as `00`.
pub const HOMOCLAVE_CITATION_TABLE: [(char, u32); 39] = [
    (' ', 0), ('0', 0), ('1', 1), ('2', 2), ('3', 3), ('4', 4),
    ('5', 5), ('6', 6), ('7', 7), ('8', 8), ('9', 9), ('&', 10),
    ('A', 11), ('B', 12), ('C', 13), ('D', 14), ('E', 15), ('F', 16),
    ('G', 17), ('H', 18), ('I', 19), ('J', 21), ('K', 22), ('L', 23),
    ('M', 24), ('N', 25), ('O', 26), ('P', 27), ('Q', 28), ('R', 29),
    ('S', 32), ('T', 33), ('U', 34), ('V', 35), ('W', 36), ('X', 37),
    ('Y', 38), ('Z', 39), ('Ñ', 40),
];

/// The 34 homoclave symbols: `1`–`9` then `A`–`Z` without `O`.
pub const HOMOCLAVE_ALPHABET: &[u8; 34] = b"123456789ABCDEFGHIJKLMNPQRSTUVWXYZ";

fn citation(c: char) -> u32 {
    HOMOCLAVE_CITATION_TABLE
        .iter()
        .find(|(k, _)| *k == c)
        .map_or(0, |(_, v)| *v)
}

/// Digit string the homoclave sum runs over.
pub fn citation_digits(full_name: &str) -> Vec<u32> {
    let mut digits = vec![0];
    for c in full_name.chars() {
        let code = citation(c);
        digits.push(code / 10);
        digits.push(code % 10);
    }
    digits
}

/// Homoclave for a cleaned full name (`PATERNO MATERNO NOMBRE` or the
/// razón social).
pub fn homoclave(full_name: &str) -> String {
    let digits = citation_digits(full_name);
    let sum: u32 = digits
        .windows(2)
        .map(|pair| (pair[0] * 10 + pair[1]) * pair[1])
        .sum();
    let last3 = sum % 1000;
    let (quotient, remainder) = ((last3 / 34) as usize, (last3 % 34) as usize);
    [quotient, remainder]
        .iter()
        .map(|i| char::from(HOMOCLAVE_ALPHABET[*i]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mxid_core::checksum::RFC_CHECKSUM_TABLE;
    use proptest::prelude::*;

    #[test]
    fn known_homoclaves() {
        assert_eq!(homoclave("GOMEZ DIAZ EMMA"), "GR");
        assert_eq!(homoclave("GARCIA LOPEZ JUAN"), "I7");
        assert_eq!(homoclave("TECNOLOGIA SISTEMAS INTEGRALES"), "RM");
    }

    #[test]
    fn citation_string_layout() {
        // '0' then "11" for A, "00" for space, "12" for B.
        assert_eq!(citation_digits("A B"), vec![0, 1, 1, 0, 0, 1, 2]);
    }

    #[test]
    fn tables_disagree_on_letters() {
        let checksum_a = RFC_CHECKSUM_TABLE.iter().find(|(c, _)| *c == 'A').map(|(_, v)| *v);
        assert_eq!(checksum_a, Some(10));
        assert_eq!(citation('A'), 11);
    }

    #[test]
    fn alphabet_excludes_letter_o() {
        assert!(!HOMOCLAVE_ALPHABET.contains(&b'O'));
        assert!(!HOMOCLAVE_ALPHABET.contains(&b'0'));
    }

    #[test]
    fn empty_name_is_deterministic() {
        assert_eq!(homoclave(""), "11");
    }

    proptest! {
        #[test]
        fn homoclave_stays_in_alphabet(name in "[A-ZÑ& ]{0,60}") {
            let h = homoclave(&name);
            prop_assert_eq!(h.len(), 2);
            prop_assert!(h.bytes().all(|b| HOMOCLAVE_ALPHABET.contains(&b)));
            prop_assert_eq!(homoclave(&name), h);
        }
    }
}
