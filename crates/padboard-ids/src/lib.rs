//! Shared identifiers for cards placed on a dashboard grid.
#![warn(missing_docs)]

use std::{borrow::Borrow, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Identifier for a card as assigned by the entity data provider.
///
/// The engine treats the identifier as an opaque key: it is compared, hashed
/// and logged, never parsed. Cloning is cheap so occupancy cells can hold
/// their own copy without borrowing from the placement list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Arc<str>);

impl CardId {
    /// Construct an identifier from any string-like key.
    #[must_use]
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    /// Borrow the raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl Borrow<str> for CardId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn ids_compare_by_key() {
        let a = CardId::new("light.kitchen");
        let b = CardId::from(String::from("light.kitchen"));
        assert_eq!(a, b);
        assert_ne!(a, CardId::from("light.hall"));
        assert_eq!(a.to_string(), "light.kitchen");
    }

    #[test]
    fn map_lookup_by_str() {
        let mut m = HashMap::new();
        m.insert(CardId::new("sensor.temp"), 3);
        assert_eq!(m.get("sensor.temp"), Some(&3));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = CardId::new("climate.lounge");
        let text = ron::to_string(&id).unwrap();
        assert_eq!(text, "\"climate.lounge\"");
        let back: CardId = ron::from_str(&text).unwrap();
        assert_eq!(back, id);
    }
}
