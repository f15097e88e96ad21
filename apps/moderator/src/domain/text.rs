//! Text normalization shared by intent extraction and roster matching.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text for comparison: NFD-decompose, drop combining marks,
/// lowercase. "Sofía" and "sofia" fold to the same string.
pub fn fold_for_match(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonical display form for an extracted name: first char uppercased,
/// rest lowercased, diacritics preserved.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Split into alphabetic tokens, dropping punctuation and digits.
pub fn alphabetic_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphabetic()).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_strips_diacritics_and_case() {
        assert_eq!(fold_for_match("Sofía"), "sofia");
        assert_eq!(fold_for_match("QUITO"), "quito");
        assert_eq!(fold_for_match("sí"), "si");
    }

    #[test]
    fn capitalize_canonicalizes() {
        assert_eq!(capitalize("maría"), "María");
        assert_eq!(capitalize("LUIS"), "Luis");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn tokens_skip_punctuation() {
        let tokens: Vec<&str> = alphabetic_tokens("me llamo Carlos, gracias!").collect();
        assert_eq!(tokens, vec!["me", "llamo", "Carlos", "gracias"]);
    }
}
