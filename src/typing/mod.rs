pub mod romaji;
pub mod tokenize;
pub mod validate;

use crate::error::EngineError;

pub use romaji::RomajiTable;
pub use tokenize::tokenize;
pub use validate::validate;

/// Which text of the current item is being typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LanguageMode {
    /// The English example sentence, typed literally.
    English,
    /// The kana rendering, typed in romaji.
    Japanese,
}

/// Host-side integer codes: 1 for English, 2 for Japanese.
impl TryFrom<u8> for LanguageMode {
    type Error = EngineError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(LanguageMode::English),
            2 => Ok(LanguageMode::Japanese),
            other => Err(EngineError::invalid(
                "language_mode",
                format!("expected 1 (English) or 2 (Japanese), got {other}"),
            )),
        }
    }
}
