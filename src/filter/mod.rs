//! Visibility Filter: computes which mirror entries are eligible for interaction
//! and aggregation under a query.
//!
//! # Matching
//!
//! The candidate string per entry is picked by [`FilterBehavior`]: the label, the
//! raw value, or `label + "\n" + value`. With case-insensitive filtering both
//! sides are lowercased first. The default mode is substring search; full-value
//! mode truncates the trimmed candidate to the query length and checks that the
//! query contains it; fuzzy mode defers to the Skim matcher.
//!
//! # Group Propagation
//!
//! - A group header is eligible if it matches or any of its members matches.
//! - A member is eligible if it matches or its own group header matches.
//!
//! Entries with an empty label are never re-evaluated and keep their previous
//! eligibility. Ineligible entries keep their stored selection untouched.

pub mod debounce;

pub use debounce::{FilterDebouncer, DEFAULT_QUIET_PERIOD};

use crate::domain::OptionModel;
use crate::mirror::{EntryKind, MirrorId, MirrorSet};
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which string of an entry a query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterBehavior {
    /// Match against the label.
    #[default]
    Text,
    /// Match against the raw value.
    Value,
    /// Match against `label + "\n" + value`.
    Both,
}

impl From<&str> for FilterBehavior {
    /// Parses a behavior name, falling back to [`FilterBehavior::Text`].
    fn from(name: &str) -> Self {
        match name.trim() {
            "text" => Self::Text,
            "value" => Self::Value,
            "both" => Self::Both,
            other => {
                tracing::debug!(behavior = %other, "unknown filter behavior, using text");
                Self::Text
            }
        }
    }
}

impl From<String> for FilterBehavior {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<FilterBehavior> for String {
    fn from(behavior: FilterBehavior) -> Self {
        match behavior {
            FilterBehavior::Text => "text",
            FilterBehavior::Value => "value",
            FilterBehavior::Both => "both",
        }
        .to_string()
    }
}

/// Matching policy applied by [`VisibilityFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub behavior: FilterBehavior,
    pub case_insensitive: bool,
    pub full_value: bool,
    pub fuzzy: bool,
}

/// Stateless filter evaluating queries against the option model.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityFilter {
    options: FilterOptions,
}

impl VisibilityFilter {
    #[must_use]
    pub const fn new(options: FilterOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> FilterOptions {
        self.options
    }

    fn candidate(&self, label: &str, value: &str) -> String {
        let candidate = match self.options.behavior {
            FilterBehavior::Text => label.to_string(),
            FilterBehavior::Value => value.to_string(),
            FilterBehavior::Both => format!("{label}\n{value}"),
        };
        if self.options.case_insensitive {
            candidate.to_lowercase()
        } else {
            candidate
        }
    }

    /// Matches one candidate against an already-prepared query.
    fn matches(&self, query: &str, candidate: &str, matcher: Option<&SkimMatcherV2>) -> bool {
        use fuzzy_matcher::FuzzyMatcher;

        if let Some(m) = matcher {
            return m.fuzzy_match(candidate, query).is_some();
        }

        // Full-value matching is not defined for the combined candidate.
        if self.options.full_value && self.options.behavior != FilterBehavior::Both {
            let prefix: String = candidate.trim().chars().take(query.chars().count()).collect();
            query.contains(prefix.as_str())
        } else {
            candidate.contains(query)
        }
    }

    /// Tests a single label/value pair against `query`.
    ///
    /// # Example
    ///
    /// ```
    /// use picklist::filter::{FilterBehavior, FilterOptions, VisibilityFilter};
    ///
    /// let filter = VisibilityFilter::new(FilterOptions {
    ///     behavior: FilterBehavior::Value,
    ///     case_insensitive: true,
    ///     ..FilterOptions::default()
    /// });
    /// assert!(filter.is_match("TOM", "Tomatoes", "tomatoes"));
    /// assert!(!filter.is_match("cheese", "Tomatoes", "tomatoes"));
    /// ```
    #[must_use]
    pub fn is_match(&self, query: &str, label: &str, value: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = self.prepare_query(query);
        let matcher = self.options.fuzzy.then(SkimMatcherV2::default);
        self.matches(&query, &self.candidate(label, value), matcher.as_ref())
    }

    fn prepare_query(&self, query: &str) -> String {
        if self.options.case_insensitive {
            query.to_lowercase()
        } else {
            query.to_string()
        }
    }

    /// Computes the set of eligible item and group mirrors for `query`.
    ///
    /// The select-all entry is never part of the result. An empty query makes
    /// every item and group eligible.
    #[must_use]
    pub fn apply(&self, model: &OptionModel, mirrors: &MirrorSet, query: &str) -> HashSet<MirrorId> {
        let _span = tracing::debug_span!(
            "filter_apply",
            query_len = query.len(),
            behavior = ?self.options.behavior,
            case_insensitive = self.options.case_insensitive,
            full_value = self.options.full_value
        )
        .entered();

        let filterable = mirrors
            .entries()
            .iter()
            .filter(|entry| !matches!(entry.kind, EntryKind::SelectAll));

        if query.is_empty() {
            return filterable.map(|entry| entry.id).collect();
        }

        let query = self.prepare_query(query);
        let matcher = self.options.fuzzy.then(SkimMatcherV2::default);
        let previous = |kind: EntryKind| {
            mirrors
                .entries()
                .iter()
                .find(|entry| entry.kind == kind)
                .is_some_and(|entry| entry.eligible)
        };

        let group_matches: Vec<bool> = model
            .groups()
            .iter()
            .map(|group| {
                if group.label.is_empty() {
                    previous(EntryKind::Group(group.id))
                } else {
                    self.matches(&query, &self.candidate(&group.label, &group.value), matcher.as_ref())
                }
            })
            .collect();

        let item_matches: Vec<bool> = model
            .items()
            .iter()
            .map(|item| {
                if item.label.is_empty() {
                    mirrors.is_item_eligible(item.id)
                } else {
                    self.matches(&query, &self.candidate(&item.label, &item.value), matcher.as_ref())
                }
            })
            .collect();

        let mut eligible = HashSet::new();

        for item in model.items() {
            let own_group_matches = item.group_id.is_some_and(|g| group_matches[g.0]);
            if item_matches[item.id.0] || own_group_matches {
                if let Some(id) = mirrors.id_of_item(item.id) {
                    eligible.insert(id);
                }
            }
        }

        for group in model.groups() {
            let any_member = group.item_ids.iter().any(|item| item_matches[item.0]);
            if group_matches[group.id.0] || any_member {
                if let Some(id) = mirrors.id_of_group(group.id) {
                    eligible.insert(id);
                }
            }
        }

        tracing::debug!(eligible = eligible.len(), "filter applied");

        eligible
    }
}
