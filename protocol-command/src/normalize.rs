//! Field/value input normalization.
//!
//! Commands that operate on a set of fields, members, or stream ids accept
//! either an ordered list of pairs or a mapping. Both shapes are reduced to
//! one canonical `Vec<(Bytes, V)>` before any token is emitted.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::error::{Result, invalid_argument};
use crate::geo::GeospatialData;
use crate::token;

/// Either an ordered list of `(key, value)` pairs or a key→value mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Entries<V> {
    /// Caller-ordered pairs; order is preserved exactly.
    Pairs(Vec<(Bytes, V)>),
    /// A mapping; its own key order is used.
    Map(BTreeMap<Bytes, V>),
}

impl<V> Entries<V> {
    /// Build from ordered pairs.
    pub fn pairs<K, W>(pairs: impl IntoIterator<Item = (K, W)>) -> Self
    where
        K: AsRef<[u8]>,
        W: Into<V>,
    {
        Entries::Pairs(
            pairs
                .into_iter()
                .map(|(k, v)| (token::bytes(k), v.into()))
                .collect(),
        )
    }

    /// Build a mapping. Later duplicates replace earlier ones.
    pub fn map<K, W>(entries: impl IntoIterator<Item = (K, W)>) -> Self
    where
        K: AsRef<[u8]>,
        W: Into<V>,
    {
        Entries::Map(
            entries
                .into_iter()
                .map(|(k, v)| (token::bytes(k), v.into()))
                .collect(),
        )
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        match self {
            Entries::Pairs(p) => p.len(),
            Entries::Map(m) => m.len(),
        }
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: EntryValue> Entries<V> {
    /// Reduce to the canonical ordered sequence, validating every entry.
    pub fn normalize(self) -> Result<Vec<(Bytes, V)>> {
        let entries: Vec<(Bytes, V)> = match self {
            Entries::Pairs(pairs) => pairs,
            Entries::Map(map) => {
                if map.keys().any(|k| k.is_empty()) {
                    return Err(invalid_argument("mapping keys must not be empty"));
                }
                map.into_iter().collect()
            }
        };
        for (key, value) in &entries {
            value.check(key)?;
        }
        Ok(entries)
    }
}

impl<V> From<Vec<(Bytes, V)>> for Entries<V> {
    fn from(pairs: Vec<(Bytes, V)>) -> Self {
        Entries::Pairs(pairs)
    }
}

impl<V> From<BTreeMap<Bytes, V>> for Entries<V> {
    fn from(map: BTreeMap<Bytes, V>) -> Self {
        Entries::Map(map)
    }
}

/// A value type that can appear in [`Entries`].
pub trait EntryValue {
    /// Validate this value against its declared type.
    fn check(&self, key: &[u8]) -> Result<()>;
}

impl EntryValue for Bytes {
    fn check(&self, _key: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// Sorted-set scores: any number except NaN (`±inf` are valid scores).
impl EntryValue for f64 {
    fn check(&self, key: &[u8]) -> Result<()> {
        if self.is_nan() {
            return Err(invalid_argument(format!(
                "score for member {:?} must not be NaN",
                String::from_utf8_lossy(key)
            )));
        }
        Ok(())
    }
}

impl EntryValue for GeospatialData {
    fn check(&self, _key: &[u8]) -> Result<()> {
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_preserve_caller_order() {
        let entries: Entries<Bytes> = Entries::pairs([("b", "2"), ("a", "1")]);
        let norm = entries.normalize().unwrap();
        assert_eq!(norm[0].0, "b");
        assert_eq!(norm[1].0, "a");
    }

    #[test]
    fn test_map_and_pairs_agree() {
        let map: Entries<Bytes> = Entries::map([("b", "2"), ("a", "1")]);
        let pairs: Entries<Bytes> = Entries::pairs([("a", "1"), ("b", "2")]);
        assert_eq!(map.normalize().unwrap(), pairs.normalize().unwrap());
    }

    #[test]
    fn test_map_rejects_empty_key() {
        let map: Entries<Bytes> = Entries::map([("", "1")]);
        assert!(map.normalize().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_pairs_allow_empty_key() {
        let pairs: Entries<Bytes> = Entries::pairs([("", "1")]);
        assert!(pairs.normalize().is_ok());
    }

    #[test]
    fn test_nan_score_rejected() {
        let scores: Entries<f64> = Entries::pairs([("m", f64::NAN)]);
        assert!(scores.normalize().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_infinite_score_accepted() {
        let scores: Entries<f64> = Entries::map([("lo", f64::NEG_INFINITY), ("hi", 1.0)]);
        let norm = scores.normalize().unwrap();
        assert_eq!(norm.len(), 2);
        assert_eq!(norm[0].0, "hi");
    }

    #[test]
    fn test_map_duplicate_keys_last_wins() {
        let map: Entries<Bytes> = Entries::map([("a", "1"), ("a", "2")]);
        assert_eq!(map.len(), 1);
        let norm = map.normalize().unwrap();
        assert_eq!(norm[0].1, "2");
    }

    #[test]
    fn test_len_and_is_empty() {
        let empty: Entries<Bytes> = Entries::pairs(Vec::<(&str, &str)>::new());
        assert!(empty.is_empty());
        let one: Entries<Bytes> = Entries::pairs([("a", "1")]);
        assert_eq!(one.len(), 1);
    }
}
