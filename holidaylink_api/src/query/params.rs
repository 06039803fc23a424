//! Query parameters and per-operation whitelists.

use std::collections::BTreeMap;

use url::Url;

use crate::Error;

/// Expands nested relations in read responses.
pub const EXPAND: &str = "expand";
/// Page number for collection reads.
pub const PAGE: &str = "page";
/// Locale filter for collection reads.
pub const LANGUAGE: &str = "language";

/// Caller-supplied query parameters, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: BTreeMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an arbitrary parameter. Whether the operation accepts it is only
    /// checked when the call is made.
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_expand(self) -> Self {
        self.with(EXPAND, 1)
    }

    pub fn with_page(self, page: u32) -> Self {
        self.with(PAGE, page)
    }

    pub fn with_language(self, language: &str) -> Self {
        self.with(LANGUAGE, language)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fails with [`Error::InvalidParameter`] naming every key not in `allowed`.
    pub fn validate(&self, allowed: &[&str]) -> Result<(), Error> {
        let keys: Vec<String> = self
            .pairs
            .keys()
            .filter(|key| !allowed.contains(&key.as_str()))
            .cloned()
            .collect();
        if keys.is_empty() {
            Ok(())
        } else {
            tracing::warn!("Rejected query params: {}", keys.join(", "));
            Err(Error::InvalidParameter { keys })
        }
    }

    /// Copy that keeps only the keys in `allowed`.
    pub fn filtered(&self, allowed: &[&str]) -> Params {
        Params {
            pairs: self
                .pairs
                .iter()
                .filter(|(key, _)| allowed.contains(&key.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Appends the parameters to the given URL, returning the modified URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if !self.pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(self.pairs.iter());
        }
        url
    }
}

impl<K: ToString, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}
