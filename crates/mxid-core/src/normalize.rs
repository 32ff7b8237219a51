//! # Text Normalizer
//!
//! Cleans person names and company names into the restricted alphabet the
//! identifier formats are built from. Normalization upper-cases, splits on
//! whitespace, drops excluded words, and folds every character: accents are
//! stripped through Unicode canonical decomposition, `Ñ` and `&` are kept
//! when the profile allows them, and anything else outside `A`–`Z` is
//! dropped.
//!
//! Company names ([`NormalizeProfile::Entity`]) get extra passes, in order:
//!
//! 1. corporate suffixes (`S.A. DE C.V.`, `S. DE R.L.`, `CIA.`, ...) are removed,
//!    whether standalone or punctuation-attached;
//! 2. dotted initials (`F.A.Z.`) expand into single-letter words;
//! 3. arabic numerals `0`–`20` become Spanish words;
//! 4. leading `CH` and `LL` collapse to their first letter;
//! 5. a run of two or more single-letter words is kept as initials: it
//!    survives the exclusion pass even where a letter collides with an
//!    excluded word, and is never read as a roman numeral;
//! 6. other roman numerals `I`–`XX` become Spanish words;
//! 7. excluded articles and prepositions are dropped.
//!
//! Every pass maps its own output to itself, so normalizing a normalized
//! string is a no-op for both profiles.
//!
//! Normalization never fails: empty or fully excluded input yields an empty
//! string.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Particles dropped from person names.
pub const PERSON_EXCLUDED_WORDS: &[&str] = &[
    "DA", "DAS", "DE", "DEL", "DER", "DI", "DIE", "DD", "EL", "LA", "LAS", "LE", "LES", "LOS",
    "MAC", "MC", "MI", "VAN", "VON", "Y",
];

/// Articles, prepositions and conjunctions dropped from company names.
pub const ENTITY_EXCLUDED_WORDS: &[&str] = &[
    "A", "AL", "AND", "CO", "COMPANY", "CON", "DE", "DEL", "E", "EL", "EN", "LA", "LAS", "LOS",
    "MAC", "MC", "MI", "OF", "PARA", "POR", "SUS", "THE", "VAN", "VON", "Y",
];

/// Single-token corporate suffixes, compared after folding (`S.A.` → `SA`).
pub const CORPORATE_SUFFIXES: &[&str] = &[
    "ABP", "AC", "AEP", "CIA", "COMPANIA", "COMPAÑIA", "COOP", "COOPERATIVA", "CV", "RL", "SA",
    "SAB", "SAPI", "SAS", "SC", "SCL", "SCP", "SCS", "SNC", "SOC", "SOCIEDAD", "SPR", "SRL",
];

/// Multi-token corporate suffixes, as folded token sequences.
const CORPORATE_SUFFIX_PHRASES: &[&[&str]] = &[
    &["S", "EN", "C", "POR", "A"],
    &["SPR", "DE", "RL"],
    &["SPR", "DE", "RI"],
    &["S", "DE", "RL"],
    &["S", "DE", "PR"],
    &["S", "DE", "SS"],
    &["S", "EN", "NC"],
    &["S", "EN", "C"],
    &["A", "EN", "P"],
    &["DE", "CV"],
    &["DE", "RL"],
    &["DE", "RI"],
];

const SPANISH_NUMERALS: [&str; 21] = [
    "CERO", "UNO", "DOS", "TRES", "CUATRO", "CINCO", "SEIS", "SIETE", "OCHO", "NUEVE", "DIEZ",
    "ONCE", "DOCE", "TRECE", "CATORCE", "QUINCE", "DIECISEIS", "DIECISIETE", "DIECIOCHO",
    "DIECINUEVE", "VEINTE",
];

const ROMAN_NUMERALS: [&str; 20] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV", "XV",
    "XVI", "XVII", "XVIII", "XIX", "XX",
];

/// Which excluded-word set and extra passes to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeProfile {
    /// A natural person's given name or surname.
    #[default]
    Person,
    /// A legal entity's razón social.
    Entity,
}

/// Configurable normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Normalizer {
    /// Excluded-word set and extra passes.
    pub profile: NormalizeProfile,
    /// Keep `Ñ` instead of folding it to `N`.
    pub allow_enye: bool,
    /// Keep `&` instead of dropping it.
    pub allow_ampersand: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::person()
    }
}

/// A word in flight through the entity passes. `initial` marks letters of
/// an initials run, which survive exclusion.
struct Word {
    text: String,
    initial: bool,
}

impl Normalizer {
    /// Person-name normalizer keeping `Ñ` and `&`.
    pub fn person() -> Self {
        Self {
            profile: NormalizeProfile::Person,
            allow_enye: true,
            allow_ampersand: true,
        }
    }

    /// Company-name normalizer keeping `Ñ` and `&`.
    pub fn entity() -> Self {
        Self {
            profile: NormalizeProfile::Entity,
            allow_enye: true,
            allow_ampersand: true,
        }
    }

    /// Set whether `Ñ` is kept.
    pub fn with_enye(mut self, allow: bool) -> Self {
        self.allow_enye = allow;
        self
    }

    /// Set whether `&` is kept.
    pub fn with_ampersand(mut self, allow: bool) -> Self {
        self.allow_ampersand = allow;
        self
    }

    /// The profile's default excluded-word set.
    pub fn excluded_words(&self) -> &'static [&'static str] {
        match self.profile {
            NormalizeProfile::Person => PERSON_EXCLUDED_WORDS,
            NormalizeProfile::Entity => ENTITY_EXCLUDED_WORDS,
        }
    }

    /// Normalize with the profile's default excluded words.
    pub fn normalize(&self, raw: &str) -> String {
        self.normalize_excluding(raw, self.excluded_words())
    }

    /// Normalize with a caller-supplied excluded-word set.
    pub fn normalize_excluding(&self, raw: &str, excluded: &[&str]) -> String {
        self.words(raw, excluded).join(" ")
    }

    /// Normalize and return the surviving words.
    pub fn words(&self, raw: &str, excluded: &[&str]) -> Vec<String> {
        let upper = raw.to_uppercase();
        let tokens: Vec<&str> = upper.split_whitespace().collect();

        let words: Vec<Word> = match self.profile {
            NormalizeProfile::Person => tokens
                .iter()
                .map(|t| Word {
                    text: self.fold(t),
                    initial: false,
                })
                .collect(),
            NormalizeProfile::Entity => self.entity_words(&tokens),
        };

        words
            .into_iter()
            .filter(|w| !w.text.is_empty())
            .filter(|w| w.initial || !excluded.contains(&w.text.as_str()))
            .map(|w| w.text)
            .collect()
    }

    fn entity_words(&self, tokens: &[&str]) -> Vec<Word> {
        let mut words = Vec::with_capacity(tokens.len());
        for token in self.strip_suffixes(tokens) {
            if let Some(letters) = self.dotted_initials(token) {
                words.extend(letters.into_iter().map(|text| Word { text, initial: true }));
                continue;
            }
            let bare = token.trim_matches(|c: char| !c.is_alphanumeric());
            let text = match arabic_numeral_word(bare) {
                Some(spelled) => spelled.to_string(),
                None => collapse_digraph(self.fold(token)),
            };
            if !text.is_empty() {
                words.push(Word { text, initial: false });
            }
        }

        mark_initial_runs(&mut words);
        for word in words.iter_mut().filter(|w| !w.initial) {
            if let Some(spelled) = roman_numeral_word(&word.text) {
                word.text = spelled.to_string();
            }
        }
        words
    }

    /// Drop corporate suffix phrases and tokens, comparing folded forms.
    fn strip_suffixes<'a>(&self, tokens: &[&'a str]) -> Vec<&'a str> {
        let folded: Vec<String> = tokens
            .iter()
            .map(|t| collapse_digraph(fold_chars(t, true, false)))
            .collect();
        let mut kept = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            let phrase = CORPORATE_SUFFIX_PHRASES.iter().find(|p| {
                p.len() <= folded.len() - i
                    && p.iter().zip(&folded[i..]).all(|(a, b)| *a == b.as_str())
            });
            if let Some(p) = phrase {
                i += p.len();
                continue;
            }
            if folded[i].is_empty() || !CORPORATE_SUFFIXES.contains(&folded[i].as_str()) {
                kept.push(tokens[i]);
            } else {
                tracing::trace!(token = tokens[i], "dropped corporate suffix");
            }
            i += 1;
        }
        kept
    }

    /// Expand `F.A.Z.`-style initials into single letters.
    ///
    /// The token must hold at least two dot-terminated fragments of one or
    /// two letters each; a trailing fragment without a dot is allowed.
    fn dotted_initials(&self, token: &str) -> Option<Vec<String>> {
        let token = token.trim_end_matches([',', ';', ':']);
        if !token.contains('.') {
            return None;
        }
        let fragments: Vec<&str> = token.split('.').filter(|f| !f.is_empty()).collect();
        if fragments.len() < 2 {
            return None;
        }
        let mut letters = Vec::new();
        for fragment in fragments {
            let folded = self.fold(fragment);
            let width = fragment.chars().count();
            if width == 0 || width > 2 || folded.chars().count() != width {
                return None;
            }
            letters.extend(folded.chars().map(String::from));
        }
        Some(letters)
    }

    fn fold(&self, token: &str) -> String {
        fold_chars(token, self.allow_enye, self.allow_ampersand)
    }
}

/// Fold one character into the `A`–`Z` alphabet (plus optional `Ñ`/`&`).
///
/// Returns `None` for characters with no letter in that alphabet.
pub fn fold_char(c: char, allow_enye: bool, allow_ampersand: bool) -> Option<char> {
    match c {
        'Ñ' | 'ñ' if allow_enye => Some('Ñ'),
        '&' if allow_ampersand => Some('&'),
        'A'..='Z' => Some(c),
        'a'..='z' => Some(c.to_ascii_uppercase()),
        _ => std::iter::once(c)
            .nfd()
            .flat_map(char::to_uppercase)
            .find(|d| d.is_ascii_uppercase()),
    }
}

/// Fold every character of `token`, dropping the ones with no letter.
pub fn fold_chars(token: &str, allow_enye: bool, allow_ampersand: bool) -> String {
    token
        .chars()
        .filter_map(|c| fold_char(c, allow_enye, allow_ampersand))
        .collect()
}

/// Spanish word for an arabic numeral between 0 and 20.
fn arabic_numeral_word(token: &str) -> Option<&'static str> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<usize>().ok().and_then(|n| SPANISH_NUMERALS.get(n).copied())
}

/// Spanish word for a roman numeral between I and XX.
fn roman_numeral_word(word: &str) -> Option<&'static str> {
    ROMAN_NUMERALS
        .iter()
        .position(|r| *r == word)
        .map(|i| SPANISH_NUMERALS[i + 1])
}

/// Mark every run of two or more consecutive single-letter words as initials.
fn mark_initial_runs(words: &mut [Word]) {
    let mut start = 0;
    while start < words.len() {
        let len = words[start..]
            .iter()
            .take_while(|w| w.text.chars().count() == 1)
            .count();
        if len >= 2 {
            words[start..start + len].iter_mut().for_each(|w| w.initial = true);
        }
        start += len.max(1);
    }
}

/// Collapse a leading `CH` to `C` and a leading `LL` to `L`, repeatedly.
fn collapse_digraph(mut word: String) -> String {
    while word.starts_with("CH") || word.starts_with("LL") {
        word.remove(1);
    }
    word
}

/// Normalize a person name with a caller-supplied excluded-word set.
pub fn normalize(raw: &str, excluded_words: &[&str]) -> String {
    Normalizer::person().normalize_excluding(raw, excluded_words)
}

/// Normalize a person name with the default particles.
pub fn normalize_person(raw: &str) -> String {
    Normalizer::person().normalize(raw)
}

/// Normalize a company name with every entity pass.
pub fn normalize_entity(raw: &str) -> String {
    Normalizer::entity().normalize(raw)
}
