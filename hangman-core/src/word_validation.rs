use hangman_types::GameError;

pub const DEFAULT_MIN_TARGET_WORD_LENGTH: usize = 8;

/// Validates candidate target words before a game is created.
pub struct WordValidator {
    min_length: usize,
}

impl WordValidator {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Check a candidate target word and return it lowercased.
    ///
    /// A word passes when it is entirely ASCII-alphabetic and at least
    /// `min_length` characters long. Pure function of its input.
    pub fn validate(&self, word: &str) -> Result<String, GameError> {
        if word.is_empty() || !Self::is_alphabetic(word) {
            return Err(GameError::InvalidWord {
                word: word.to_string(),
            });
        }

        let length = word.chars().count();
        if length < self.min_length {
            return Err(GameError::WordTooShort {
                length,
                minimum: self.min_length,
            });
        }

        Ok(word.to_lowercase())
    }

    /// Check if word contains only alphabetic characters
    pub fn is_alphabetic(word: &str) -> bool {
        word.chars().all(|c| c.is_ascii_alphabetic())
    }
}

impl Default for WordValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TARGET_WORD_LENGTH)
    }
}
