//! # Word Tables
//!
//! Fixed word lists consulted while assembling the letter block of an RFC
//! or CURP, and the small letter-picking helpers shared by both generators.

use mxid_core::format::is_vowel;

/// Four-letter RFC prefixes SAT replaces by forcing the last letter to `X`.
pub const CACOPHONIC_RFC: &[&str] = &[
    "BUEI", "BUEY", "CACA", "CACO", "CAGA", "CAGO", "CAKA", "CAKO", "COGE", "COJA", "COJE", "COJI",
    "COJO", "CULO", "FETO", "GUEY", "JOTO", "KACA", "KACO", "KAGA", "KAGO", "KAKA", "KOGE", "KOJO",
    "KULO", "MAME", "MAMO", "MEAR", "MEAS", "MEON", "MION", "MOCO", "MULA", "PEDA", "PEDO", "PENE",
    "PUTA", "PUTO", "QULO", "RATA", "RUIN",
];

/// Four-letter CURP prefixes RENAPO replaces by forcing the second letter
/// to `X`.
pub const CACOPHONIC_CURP: &[&str] = &[
    "BACA", "BAKA", "BUEI", "BUEY", "CACA", "CACO", "CAGA", "CAGO", "CAKA", "CAKO", "COGE", "COGI",
    "COJA", "COJE", "COJI", "COJO", "COLA", "CULO", "FALO", "FETO", "GETA", "GUEI", "GUEY", "JETA",
    "JOTO", "KACA", "KACO", "KAGA", "KAGO", "KAKA", "KAKO", "KOGE", "KOGI", "KOJA", "KOJE", "KOJI",
    "KOJO", "KOLA", "KULO", "LILO", "LOCA", "LOCO", "LOKA", "LOKO", "MAME", "MAMO", "MEAR", "MEAS",
    "MEON", "MIAR", "MION", "MOCO", "MOKO", "MULA", "MULO", "NACA", "NACO", "PEDA", "PEDO", "PENE",
    "PIPI", "PITO", "POPO", "PUTA", "PUTO", "QULO", "RATA", "ROBA", "ROBE", "ROBO", "RUIN", "SENO",
    "TETA", "VACA", "VAGA", "VAGO", "VAKA", "VUEI", "VUEY", "WUEI", "WUEY",
];

/// Leading given names skipped when picking the given-name initial, once
/// cleaned (`MA.` and `J.` clean to `MA` and `J`).
pub const COMMON_GIVEN_NAMES: &[&str] = &["MARIA", "MA", "JOSE", "J"];

/// Whether a four-letter RFC block needs the cacophony substitution.
pub fn is_cacophonic_rfc(letters: &str) -> bool {
    CACOPHONIC_RFC.contains(&letters)
}

/// Whether a four-letter CURP block needs the cacophony substitution.
pub fn is_cacophonic_curp(letters: &str) -> bool {
    CACOPHONIC_CURP.contains(&letters)
}

/// The given-name word that supplies initials.
///
/// A leading `MARIA`/`JOSE` (or abbreviation) is skipped when another word
/// follows it. Returns `""` for an empty slice.
pub fn given_name_for_initials(words: &[String]) -> &str {
    match words {
        [first, second, ..] if COMMON_GIVEN_NAMES.contains(&first.as_str()) => second.as_str(),
        [first, ..] => first.as_str(),
        [] => "",
    }
}

/// First vowel after position 0.
pub fn first_internal_vowel(word: &str) -> Option<char> {
    word.chars().skip(1).find(|c| is_vowel(*c))
}

/// First consonant after position 0. `Ñ` counts as a consonant; `&` does
/// not.
pub fn first_internal_consonant(word: &str) -> Option<char> {
    word.chars()
        .skip(1)
        .find(|c| (c.is_ascii_uppercase() && !is_vowel(*c)) || *c == 'Ñ')
}

/// First letter of `word`, if any.
pub fn initial(word: &str) -> Option<char> {
    word.chars().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn tables_are_four_upper_letters() {
        for w in CACOPHONIC_RFC.iter().chain(CACOPHONIC_CURP) {
            assert_eq!(w.len(), 4, "{w}");
            assert!(w.bytes().all(|b| b.is_ascii_uppercase()), "{w}");
        }
    }

    #[test]
    fn curp_list_is_wider() {
        assert!(is_cacophonic_curp("BACA"));
        assert!(!is_cacophonic_rfc("BACA"));
        assert!(is_cacophonic_rfc("PEDO"));
        assert!(is_cacophonic_curp("PEDO"));
    }

    #[test]
    fn given_name_skips_common_first_names() {
        assert_eq!(given_name_for_initials(&words(&["MARIA", "GUADALUPE"])), "GUADALUPE");
        assert_eq!(given_name_for_initials(&words(&["JOSE", "LUIS"])), "LUIS");
        assert_eq!(given_name_for_initials(&words(&["MA", "LUISA"])), "LUISA");
        assert_eq!(given_name_for_initials(&words(&["MARIA"])), "MARIA");
        assert_eq!(given_name_for_initials(&words(&["JUAN", "CARLOS"])), "JUAN");
        assert_eq!(given_name_for_initials(&[]), "");
    }

    #[test]
    fn internal_letters() {
        assert_eq!(first_internal_vowel("GARCIA"), Some('A'));
        assert_eq!(first_internal_vowel("ALVAREZ"), Some('A'));
        assert_eq!(first_internal_vowel("PRZ"), None);
        assert_eq!(first_internal_consonant("GARCIA"), Some('R'));
        assert_eq!(first_internal_consonant("MUÑOZ"), Some('Ñ'));
        assert_eq!(first_internal_consonant("AI"), None);
    }
}
