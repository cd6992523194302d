use icu_normalizer::ComposingNormalizerBorrowed;

/// Number of tab-separated fields in one corpus row.
pub const FIELD_COUNT: usize = 9;

/// One learnable item. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    id: u32,
    word: String,
    definition_en: String,
    definition_ja: String,
    example_en: String,
    example_ja: String,
    kana: String,
    level: u32,
    related_ids: Vec<u32>,
}

impl Entry {
    /// Build an entry from the nine raw corpus fields, in file order:
    /// id, word, English definition, Japanese definition, English example,
    /// Japanese example, kana, level, comma-separated related ids.
    ///
    /// Parsing is permissive: malformed numbers become zero instead of
    /// rejecting the row.
    pub fn from_fields(fields: &[&str; FIELD_COUNT]) -> Self {
        let [id, word, definition_en, definition_ja, example_en, example_ja, kana, level, related] =
            *fields;

        Self {
            id: parse_number(id),
            word: clean_text(word),
            definition_en: clean_text(definition_en),
            definition_ja: clean_text(definition_ja),
            example_en: clean_text(example_en),
            example_ja: clean_text(example_ja),
            kana: clean_text(kana),
            level: parse_number(level),
            related_ids: parse_related(related),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn definition_en(&self) -> &str {
        &self.definition_en
    }

    pub fn definition_ja(&self) -> &str {
        &self.definition_ja
    }

    pub fn example_en(&self) -> &str {
        &self.example_en
    }

    pub fn example_ja(&self) -> &str {
        &self.example_ja
    }

    pub fn kana(&self) -> &str {
        &self.kana
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn related_ids(&self) -> &[u32] {
        &self.related_ids
    }
}

/// Trim, then compose to NFC so kana with a separate voicing mark match the
/// romanization table.
fn clean_text(raw: &str) -> String {
    ComposingNormalizerBorrowed::new_nfc()
        .normalize(raw.trim())
        .into_owned()
}

fn parse_number(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

fn parse_related(raw: &str) -> Vec<u32> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(parse_number)
        .collect()
}

#[cfg(test)]
pub(crate) fn sample(id: u32, level: u32) -> Entry {
    let id_text = id.to_string();
    let level_text = level.to_string();
    Entry::from_fields(&[
        &id_text,
        &format!("word{id}"),
        &format!("definition {id}"),
        &format!("定義{id}"),
        "Go!",
        "行け！",
        "いけ",
        &level_text,
        "",
    ])
}
