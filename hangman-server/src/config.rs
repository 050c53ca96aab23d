use std::env;

use hangman_core::{DEFAULT_MIN_TARGET_WORD_LENGTH, DEFAULT_WRONG_GUESSES_ALLOWED};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub wrong_guesses_allowed: i32,
    pub min_target_word_length: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("Invalid PORT"),
            wrong_guesses_allowed: env::var("WRONG_GUESSES_ALLOWED")
                .unwrap_or_else(|_| DEFAULT_WRONG_GUESSES_ALLOWED.to_string())
                .parse()
                .expect("Invalid WRONG_GUESSES_ALLOWED"),
            min_target_word_length: env::var("MIN_TARGET_WORD_LENGTH")
                .unwrap_or_else(|_| DEFAULT_MIN_TARGET_WORD_LENGTH.to_string())
                .parse()
                .expect("Invalid MIN_TARGET_WORD_LENGTH"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
