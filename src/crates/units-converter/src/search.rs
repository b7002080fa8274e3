//! Searching registry keys and metadata
//!
//! A search term containing `*` is a wildcard pattern that must match a
//! whole field (`*` and `**` both match any run of characters). Any other
//! term matches when it appears anywhere in the field. Matching ignores
//! case.

use crate::error::{RegistryError, Result};
use crate::registry::{UnitEntry, UnitRegistry};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Key,
    Name,
    Tags,
    Description,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Key,
        SearchField::Name,
        SearchField::Tags,
        SearchField::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Key => "key",
            SearchField::Name => "name",
            SearchField::Tags => "tags",
            SearchField::Description => "description",
        }
    }

    /// Parse a comma-separated list such as `"key, name"`
    pub fn parse_list(fields: &str) -> Result<Vec<SearchField>> {
        fields
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        SearchField::ALL
            .into_iter()
            .find(|field| field.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| RegistryError::InvalidSearchField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Fields compared against the search term
    pub fields: Vec<SearchField>,
    /// Only entries carrying every one of these tags are returned
    pub tags: Vec<String>,
    /// Return only the first-defined key of entries shared by aliases
    pub hide_aliases: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            fields: SearchField::ALL.to_vec(),
            tags: Vec::new(),
            hide_aliases: false,
        }
    }
}

impl SearchOptions {
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = SearchField>) -> Self {
        self.fields = fields.into_iter().collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn hide_aliases(mut self, hide: bool) -> Self {
        self.hide_aliases = hide;
        self
    }
}

/// A registry key whose metadata matched a search
#[derive(Debug, Clone)]
pub struct SearchHit<'r> {
    pub key: &'r str,
    pub entry: &'r Arc<UnitEntry>,
}

impl UnitRegistry {
    /// Keys whose selected fields match `term`, in definition order
    pub fn search(&self, term: &str, options: &SearchOptions) -> Result<Vec<SearchHit<'_>>> {
        let pattern = search_pattern(term)?;
        let mut seen: Vec<&Arc<UnitEntry>> = Vec::new();
        let mut hits = Vec::new();

        for (key, entry) in self.entries() {
            if !options.tags.iter().all(|tag| entry.has_tag(tag)) {
                continue;
            }
            if !options
                .fields
                .iter()
                .any(|field| field_matches(&pattern, *field, key, entry))
            {
                continue;
            }
            if options.hide_aliases {
                if seen.iter().any(|other| Arc::ptr_eq(other, entry)) {
                    continue;
                }
                seen.push(entry);
            }
            hits.push(SearchHit { key, entry });
        }

        log::debug!("search for {:?} returned {} key(s)", term, hits.len());
        Ok(hits)
    }
}

/// Case-insensitive regex for a search term
///
/// With a `*` the term must match the whole field and each `*` stands for
/// any run of characters. Otherwise the term may appear anywhere.
fn search_pattern(term: &str) -> Result<Regex> {
    let pattern = if term.contains('*') {
        let parts: Vec<String> = term.split('*').map(regex::escape).collect();
        format!("(?is)^{}$", parts.join(".*"))
    } else {
        format!("(?is){}", regex::escape(term))
    };
    Ok(Regex::new(&pattern)?)
}

fn field_matches(pattern: &Regex, field: SearchField, key: &str, entry: &UnitEntry) -> bool {
    match field {
        SearchField::Key => pattern.is_match(key),
        SearchField::Name => entry.name.as_deref().is_some_and(|name| pattern.is_match(name)),
        SearchField::Tags => entry.tags.iter().any(|tag| pattern.is_match(tag)),
        SearchField::Description => entry
            .description
            .as_deref()
            .is_some_and(|description| pattern.is_match(description)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<'r>(hits: &[SearchHit<'r>]) -> Vec<&'r str> {
        hits.iter().map(|hit| hit.key).collect()
    }

    fn matches(term: &str, text: &str) -> bool {
        search_pattern(term).unwrap().is_match(text)
    }

    #[test]
    fn test_wildcard_terms() {
        assert!(matches("k*", "kg"));
        assert!(matches("*meter*", "kilometers"));
        assert!(matches("**", ""));
        assert!(matches("m*m", "mm"));
        assert!(matches("a*b*c", "aXbYbZc"));
        assert!(matches("K*", "kPa"));
        assert!(!matches("k*", "mk"));
        assert!(!matches("*x", "xy"));
        assert!(!matches("k*g", "kgs"));
    }

    #[test]
    fn test_plain_terms() {
        assert!(matches("gram", "Kilogram"));
        assert!(matches("", "anything"));
        assert!(!matches("grams", "kilogram"));
        // regex syntax in a term is matched literally
        assert!(matches("fl_oz.", "fl_oz."));
        assert!(!matches("m.s", "mms"));
        assert!(matches("(kg)*", "(kg)/s"));
    }

    #[test]
    fn test_search_field_from_str() {
        assert_eq!("key".parse::<SearchField>().unwrap(), SearchField::Key);
        assert_eq!(" Tags ".parse::<SearchField>().unwrap(), SearchField::Tags);
        assert!(matches!(
            "color".parse::<SearchField>(),
            Err(RegistryError::InvalidSearchField(field)) if field == "color"
        ));
        assert_eq!(
            SearchField::parse_list("key, description").unwrap(),
            vec![SearchField::Key, SearchField::Description]
        );
        assert!(SearchField::parse_list("key,units").is_err());
    }

    #[test]
    fn test_substring_search() {
        let registry = UnitRegistry::si().unwrap();
        let hits = registry.search(
            "kilogram",
            &SearchOptions::default().with_fields([SearchField::Key]),
        ).unwrap();
        assert_eq!(keys(&hits), vec!["kilogram", "kilograms"]);

        let hits = registry.search("KILOGRAM", &SearchOptions::default()).unwrap();
        assert!(keys(&hits).contains(&"kg"));
    }

    #[test]
    fn test_wildcard_search_matches_whole_field() {
        let registry = UnitRegistry::si().unwrap();
        let options = SearchOptions::default().with_fields([SearchField::Key]);

        let hits = registry.search("k*", &options).unwrap();
        assert!(keys(&hits).contains(&"kg"));
        assert!(keys(&hits).contains(&"km"));
        assert!(!keys(&hits).contains(&"mK"));
        assert!(!keys(&hits).contains(&"m"));
    }

    #[test]
    fn test_tag_filter() {
        let registry = UnitRegistry::si().unwrap();
        let options = SearchOptions::default()
            .with_tags(["temperature"])
            .hide_aliases(true);
        let hits = registry.search("*", &options).unwrap();
        assert_eq!(
            keys(&hits),
            vec!["K", "degC", "degF", "degR", "degC_diff", "degF_diff"]
        );

        let options = SearchOptions::default().with_tags(["temperature", "mass"]);
        assert!(registry.search("*", &options).unwrap().is_empty());
    }

    #[test]
    fn test_hide_aliases() {
        let registry = UnitRegistry::si().unwrap();
        let options = SearchOptions::default().with_fields([SearchField::Name]);

        let hits = registry.search("meter", &options.clone()).unwrap();
        assert!(keys(&hits).contains(&"m"));
        assert!(keys(&hits).contains(&"meters"));

        let hits = registry.search("meter", &options.hide_aliases(true)).unwrap();
        assert!(keys(&hits).contains(&"m"));
        assert!(!keys(&hits).contains(&"meter"));
        assert!(!keys(&hits).contains(&"meters"));
        assert!(keys(&hits).contains(&"km"));
    }
}
