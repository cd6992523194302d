//! Keystroke validation against romanized spellings.
//!
//! The validator is stateless: the host passes the learner's whole input for
//! the current item on every keystroke, together with the index of the first
//! token not yet typed, and gets back the index after any token(s) the input
//! now completes. Matching is by suffix, so earlier keystrokes (including
//! mistakes) never block a later match, and a prefix of a spelling never
//! counts.

use crate::typing::romaji::{
    GEMINATE_MARKER, GEMINATE_SPELLINGS, MORAIC_NASAL, NASAL_DOUBLE, NASAL_SINGLE, RomajiTable,
    nasal_needs_double,
};

/// Validate `input` against `tokens[index]` using the global table.
pub fn validate<S: AsRef<str>>(tokens: &[S], index: usize, input: &str) -> usize {
    validate_with(RomajiTable::global(), tokens, index, input)
}

pub fn validate_with<S: AsRef<str>>(
    table: &RomajiTable,
    tokens: &[S],
    index: usize,
    input: &str,
) -> usize {
    let Some(target) = tokens.get(index).map(AsRef::as_ref) else {
        return index;
    };
    let next = tokens.get(index + 1).map(AsRef::as_ref);

    match target {
        GEMINATE_MARKER => match_geminate(table, next, index, input),
        MORAIC_NASAL => match_nasal(table, next, index, input),
        _ => {
            if ends_with_spelling(table, target, input) {
                index + 1
            } else {
                index
            }
        }
    }
}

fn ends_with_spelling(table: &RomajiTable, token: &str, input: &str) -> bool {
    match table.spellings(token) {
        Some(spellings) => spellings.iter().any(|s| input.ends_with(s)),
        None => input.ends_with(token),
    }
}

/// っ can be typed alone, or folded into the next mora by doubling its first
/// letter ("kko" for っこ), which consumes both tokens.
fn match_geminate(table: &RomajiTable, next: Option<&str>, index: usize, input: &str) -> usize {
    if GEMINATE_SPELLINGS.iter().any(|s| input.ends_with(s)) {
        return index + 1;
    }
    let Some(next) = next else {
        return index;
    };

    let literal = [next];
    let next_spellings: &[&str] = match table.spellings(next) {
        Some(spellings) => spellings,
        None => &literal,
    };
    let doubled = next_spellings.iter().any(|spelling| {
        spelling.chars().next().is_some_and(|first| {
            input
                .strip_suffix(spelling)
                .is_some_and(|rest| rest.ends_with(first))
        })
    });
    if doubled { index + 2 } else { index }
}

/// ん takes a single `n` only before a mora that cannot absorb it; at the end
/// of the text, before vowels, n- and y- sounds, or before anything outside
/// the table, it must be `nn`.
fn match_nasal(table: &RomajiTable, next: Option<&str>, index: usize, input: &str) -> usize {
    let needs_double = match next.and_then(|n| table.spellings(n)) {
        Some(next_spellings) => nasal_needs_double(next_spellings),
        None => true,
    };
    let required = if needs_double { NASAL_DOUBLE } else { NASAL_SINGLE };
    if input.ends_with(required) {
        index + 1
    } else {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(tokens: &[&str], input: &str, index: usize) -> usize {
        validate(tokens, index, input)
    }

    #[test]
    fn test_normal_kana() {
        assert_eq!(check(&["ら", "こ"], "ra", 0), 1);
        assert_eq!(check(&["ら", "こ"], "r", 0), 0);
    }

    #[test]
    fn test_normal_alphabet() {
        assert_eq!(check(&["i", "s", "a"], "a", 2), 3);
        assert_eq!(check(&["i", "s", "a"], "b", 2), 2);
    }

    #[test]
    fn test_literal_match_is_case_sensitive() {
        assert_eq!(check(&["G", "o"], "g", 0), 0);
        assert_eq!(check(&["G", "o"], "G", 0), 1);
    }

    #[test]
    fn test_multiple_spellings() {
        assert_eq!(check(&["し"], "shi", 0), 1);
        assert_eq!(check(&["し"], "si", 0), 1);
        assert_eq!(check(&["し"], "ci", 0), 1);
        assert_eq!(check(&["しゃ"], "sha", 0), 1);
        assert_eq!(check(&["しゃ"], "sixya", 0), 1);
    }

    #[test]
    fn test_prefix_is_not_a_match() {
        assert_eq!(check(&["しゃ"], "sh", 0), 0);
        assert_eq!(check(&["きょ"], "ky", 0), 0);
    }

    #[test]
    fn test_full_width_punctuation() {
        assert_eq!(check(&["ゴ", "ー", "！"], "-", 1), 2);
        assert_eq!(check(&["ゴ", "ー", "！"], "!", 2), 3);
    }

    #[test]
    fn test_geminate_alone() {
        assert_eq!(check(&["ら", "っ", "こ"], "xtu", 1), 2);
        assert_eq!(check(&["ら", "っ", "こ"], "ltu", 1), 2);
    }

    #[test]
    fn test_geminate_with_following_mora() {
        assert_eq!(check(&["ら", "っ", "こ"], "zkko", 1), 3);
        assert_eq!(check(&["ら", "っ", "ぱ"], "aaaappa", 1), 3);
        assert_eq!(check(&["ま", "っ", "ちゃ"], "mattya", 1), 3);
        assert_eq!(check(&["ま", "っ", "ちゃ"], "maccha", 1), 3);
    }

    #[test]
    fn test_geminate_incomplete() {
        assert_eq!(check(&["ら", "っ", "こ"], "kk", 1), 1);
        // Single consonant types こ, not っこ.
        assert_eq!(check(&["ら", "っ", "こ"], "rako", 1), 1);
    }

    #[test]
    fn test_geminate_at_end() {
        assert_eq!(check(&["あ", "っ"], "xtu", 1), 2);
        assert_eq!(check(&["あ", "っ"], "tt", 1), 1);
    }

    #[test]
    fn test_geminate_before_literal() {
        assert_eq!(check(&["っ", "k"], "kk", 0), 2);
        assert_eq!(check(&["っ", "k"], "k", 0), 0);
    }

    #[test]
    fn test_nasal_before_consonant() {
        assert_eq!(check(&["り", "ん", "ご"], "n", 1), 2);
        // "nn" also ends with "n".
        assert_eq!(check(&["り", "ん", "ご"], "nn", 1), 2);
    }

    #[test]
    fn test_nasal_before_vowel() {
        assert_eq!(check(&["か", "ん", "い"], "nn", 1), 2);
        assert_eq!(check(&["か", "ん", "い"], "n", 1), 1);
    }

    #[test]
    fn test_nasal_before_n_sound() {
        assert_eq!(check(&["ほ", "ん", "な"], "nn", 1), 2);
        assert_eq!(check(&["ほ", "ん", "な"], "n", 1), 1);
    }

    #[test]
    fn test_nasal_before_y_sound() {
        assert_eq!(check(&["き", "ん", "よう"], "nn", 1), 2);
        assert_eq!(check(&["き", "ん", "よう"], "n", 1), 1);
    }

    #[test]
    fn test_nasal_at_end() {
        assert_eq!(check(&["ぺ", "ん"], "nn", 1), 2);
        assert_eq!(check(&["ぺ", "ん"], "n", 1), 1);
    }

    #[test]
    fn test_nasal_before_literal() {
        assert_eq!(check(&["ん", "a"], "n", 0), 0);
        assert_eq!(check(&["ん", "a"], "nn", 0), 1);
    }

    #[test]
    fn test_out_of_bounds_and_empty() {
        assert_eq!(check(&["a", "b"], "c", 2), 2);
        assert_eq!(check(&[], "a", 0), 0);
    }

    #[test]
    fn test_full_word_keystroke_by_keystroke() {
        let tokens = ["が", "っ", "こ", "う"];
        let typed = "gakkou";
        let mut index = 0;
        for end in 1..=typed.len() {
            index = validate(&tokens, index, &typed[..end]);
        }
        assert_eq!(index, tokens.len());
    }
}
