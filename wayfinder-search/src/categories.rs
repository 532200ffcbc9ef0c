//! Controlled synonym table for the category filter.

use std::collections::BTreeMap;

/// Finite mapping from a requested category to the category keywords it
/// admits.
///
/// Requests without an entry fall back to a case-insensitive substring test.
///
/// # Examples
/// ```
/// use wayfinder_search::CategoryAliases;
///
/// let aliases = CategoryAliases::default();
/// assert!(aliases.matches("mosque", "Islamic Architecture"));
/// assert!(aliases.matches("church", "Coptic Heritage"));
/// assert!(!aliases.matches("temple", "Historical Mosques"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAliases {
    table: BTreeMap<String, Vec<String>>,
}

impl Default for CategoryAliases {
    fn default() -> Self {
        Self::empty()
            .with_alias("mosque", ["mosque", "islamic"])
            .with_alias("church", ["church", "coptic"])
            .with_alias("temple", ["temple"])
            .with_alias("museum", ["museum"])
    }
}

impl CategoryAliases {
    /// A table with no aliases; every request uses substring matching.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// Register the keywords admitted for `requested`, replacing any previous
    /// entry.
    #[must_use]
    pub fn with_alias<I, S>(mut self, requested: &str, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalised = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        self.table.insert(requested.trim().to_lowercase(), normalised);
        self
    }

    /// Keywords registered for `requested`, if any.
    #[must_use]
    pub fn keywords(&self, requested: &str) -> Option<&[String]> {
        self.table
            .get(&requested.trim().to_lowercase())
            .map(Vec::as_slice)
    }

    /// Whether a place in `category` satisfies a filter for `requested`.
    ///
    /// A blank request matches every category.
    #[must_use]
    pub fn matches(&self, requested: &str, category: &str) -> bool {
        let wanted = requested.trim().to_lowercase();
        if wanted.is_empty() {
            return true;
        }
        let haystack = category.to_lowercase();
        self.table.get(&wanted).map_or_else(
            || haystack.contains(wanted.as_str()),
            |keywords| {
                keywords
                    .iter()
                    .any(|keyword| haystack.contains(keyword.as_str()))
            },
        )
    }
}
