//! Ticker symbol type.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Stock ticker symbol, always stored uppercased and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol.
    #[must_use]
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().trim().to_uppercase())
    }

    /// Get the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the symbol is empty after trimming.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<Symbol> for String {
    fn from(s: Symbol) -> Self {
        s.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_is_uppercased() {
        let sym: Symbol = " aapl ".into();
        assert_eq!(sym.as_str(), "AAPL");
    }

    #[test]
    fn symbol_deserializes_uppercased() {
        let sym: Symbol = serde_json::from_str("\"msft\"").unwrap();
        assert_eq!(sym, Symbol::new("MSFT"));
        assert_eq!(serde_json::to_string(&sym).unwrap(), "\"MSFT\"");
    }

    #[test]
    fn empty_symbol() {
        assert!(Symbol::new("   ").is_empty());
    }
}
