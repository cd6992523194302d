use crate::typing::romaji::RomajiTable;

/// Split `text` into typing units using the global romanization table.
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_with(RomajiTable::global(), text)
}

/// Split `text` into typing units. A pair of characters that the table knows
/// as one unit (contracted syllables such as きょ) becomes a single token;
/// everything else is one token per character.
pub fn tokenize_with(table: &RomajiTable, text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if i + 1 < chars.len() {
            let pair: String = chars[i..i + 2].iter().collect();
            if table.contains(&pair) {
                tokens.push(pair);
                i += 2;
                continue;
            }
        }
        tokens.push(chars[i].to_string());
        i += 1;
    }
    tokens
}
