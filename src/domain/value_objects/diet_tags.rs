//! # Diet Tags
//!
//! Canonical set of dietary markers attached to a menu course.
//!
//! The restaurant API sends diet information either as one comma-separated
//! string (`"VEGAN, Gluten-Free"`) or as an array (`["vegan", "gluten-free"]`).
//! Both shapes are folded into [`DietTags`] when a payload is deserialized, so
//! the rest of the crate only ever sees the canonical form: trimmed,
//! non-empty, upper-cased tags.
//!
//! # Examples
//!
//! ```
//! use menu_finder::domain::value_objects::DietTags;
//!
//! let from_text = DietTags::parse("VEGAN, Gluten-Free");
//! let from_list: DietTags = ["vegan", "gluten-free"].into_iter().collect();
//! assert_eq!(from_text, from_list);
//! assert!(from_text.contains("vegan"));
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Normalized set of diet tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DietTags(BTreeSet<String>);

impl DietTags {
    /// Creates an empty tag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated tag list.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        text.split(',').collect()
    }

    /// Returns true if no tags are present.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct tags.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set contains `tag`, compared case-insensitively.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        normalize_tag(tag).is_some_and(|t| self.0.contains(&t))
    }

    /// Returns true if the two sets share at least one tag.
    #[must_use]
    pub fn intersects(&self, other: &DietTags) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    /// Iterates over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

fn normalize_tag(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

impl<S: AsRef<str>> FromIterator<S> for DietTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .filter_map(|tag| normalize_tag(tag.as_ref()))
                .collect(),
        )
    }
}

impl FromStr for DietTags {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for DietTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(tag)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDietTags {
    Text(String),
    List(Vec<Option<String>>),
}

impl<'de> Deserialize<'de> for DietTags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tags = match Option::<RawDietTags>::deserialize(deserializer)? {
            None => Self::default(),
            Some(RawDietTags::Text(text)) => Self::parse(&text),
            Some(RawDietTags::List(items)) => items.into_iter().flatten().collect(),
        };
        Ok(tags)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn string_and_array_normalize_to_same_set() {
        let text: DietTags = serde_json::from_str(r#""VEGAN, Gluten-Free""#).unwrap();
        let list: DietTags = serde_json::from_str(r#"["vegan","gluten-free"]"#).unwrap();
        assert_eq!(text, list);
        assert_eq!(text.iter().collect::<Vec<_>>(), vec!["GLUTEN-FREE", "VEGAN"]);
    }

    #[test]
    fn blank_entries_are_dropped() {
        let tags = DietTags::parse(" , L ,, G ,");
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("l"));
        assert!(tags.contains(" G "));
        assert!(!tags.contains(""));
    }

    #[test]
    fn null_and_nulls_in_list_become_empty() {
        let null: DietTags = serde_json::from_str("null").unwrap();
        assert!(null.is_empty());

        let mixed: DietTags = serde_json::from_str(r#"[null, " veg "]"#).unwrap();
        assert_eq!(mixed, DietTags::parse("VEG"));
    }

    #[test]
    fn intersects_is_case_insensitive_through_normalization() {
        let course = DietTags::parse("A, L, G");
        assert!(course.intersects(&DietTags::parse("g")));
        assert!(!course.intersects(&DietTags::parse("VEG")));
        assert!(!course.intersects(&DietTags::new()));
    }

    #[test]
    fn display_joins_sorted_tags() {
        assert_eq!(DietTags::parse("veg, a").to_string(), "A, VEG");
        assert_eq!(DietTags::new().to_string(), "");
    }

    #[test]
    fn rejects_non_string_shapes() {
        assert!(serde_json::from_str::<DietTags>("42").is_err());
    }
}
