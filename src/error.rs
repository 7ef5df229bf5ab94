//! Error types shared across the solver

use std::fmt;

/// A word or phrase contains a symbol outside the encoder's domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingError {
    pub word: String,
    pub symbol: char,
    /// Character (not byte) offset of the offending symbol
    pub position: usize,
}

impl EncodingError {
    pub fn new(word: impl Into<String>, symbol: char, position: usize) -> Self {
        Self {
            word: word.into(),
            symbol,
            position,
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot encode {:?}: unsupported symbol {:?} at position {}",
            self.word, self.symbol, self.position
        )
    }
}

impl std::error::Error for EncodingError {}

/// Invalid run configuration, detected before any search work starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Top-level error for a solver run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    Encoding(EncodingError),
    Config(ConfigError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Encoding(e) => write!(f, "{}", e),
            SolveError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::Encoding(e) => Some(e),
            SolveError::Config(e) => Some(e),
        }
    }
}

impl From<EncodingError> for SolveError {
    fn from(e: EncodingError) -> Self {
        SolveError::Encoding(e)
    }
}

impl From<ConfigError> for SolveError {
    fn from(e: ConfigError) -> Self {
        SolveError::Config(e)
    }
}
