//! Identifiers for simulation entities

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an asset class (a column of the return table, e.g. a ticker)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetClass(pub String);

impl AssetClass {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetClass {
    fn from(s: &str) -> Self {
        AssetClass(s.to_string())
    }
}

impl From<String> for AssetClass {
    fn from(s: String) -> Self {
        AssetClass(s)
    }
}

impl Borrow<str> for AssetClass {
    fn borrow(&self) -> &str {
        &self.0
    }
}
