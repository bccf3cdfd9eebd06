//! Picklist: a headless selection-state engine for styleable pick lists.
//!
//! Picklist keeps a list of checkable entries synchronized with the selection
//! state of an option list, the way a styled replacement for a native
//! multi-value select control has to:
//! - Flat and grouped options with per-item and per-group enablement
//! - Single and multiple selection cardinality
//! - Item, shift-range, group and select-all/deselect-all toggles
//! - Group tri-state and global select-all aggregates under partial visibility
//! - Debounced text, value or fuzzy filtering with group propagation
//! - Exactly one semantic notification per user action

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Presentation layer (caller)                        │  ← Renders, reports events
//! └─────────────────────────────────────────────────────┘
//!                        │ Event            ▲ Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Instance context
//! │  - Event handling, click interpretation             │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Engine        │   │ Filter        │   │ Notify        │
//! │ (engine/)     │   │ (filter/)     │   │ (notify/)     │
//! │ - Toggles     │   │ - Matching    │   │ - Batching    │
//! │ - Aggregates  │   │ - Debounce    │   │ - Listeners   │
//! │ - Rebuild     │   │ - Propagation │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Mirror Registry (mirror/) & Domain (domain/)       │
//! │  - Checkable entries with generation-scoped ids     │
//! │  - Option model, data provider, error types         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing subscriber, rotating JSON trace file     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Instance context with event/action model
//! - [`domain`]: Option model and errors
//! - [`mirror`]: Checkable entries mirroring items, groups and select-all
//! - [`filter`]: Visibility filter and debouncer
//! - [`engine`]: Selection operations and aggregates
//! - [`notify`]: Change notifier and listener contract
//! - [`ui`]: Renderer contract, button label, view model
//! - [`observability`]: Tracing initialization
//!
//! # Configuration
//!
//! Options can be given as string pairs (the way a host hands over element
//! attributes) or as TOML:
//!
//! ```toml
//! multiple = true
//! enable_filtering = true
//! filter_behavior = "both"
//! include_select_all_option = true
//! enable_clickable_opt_groups = true
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use picklist::{handle_event, initialize, Config, Event};
//! use picklist::domain::{DataEntry, ItemId, OptionModel};
//!
//! let model = OptionModel::from_data(&[
//!     DataEntry::option("Cheese", "cheese"),
//!     DataEntry::option("Tomatoes", "tomatoes"),
//! ])?;
//! let config = Config {
//!     multiple: true,
//!     ..Default::default()
//! };
//!
//! let mut select = initialize(config, model)?;
//! let id = select.item_mirror(ItemId(1)).unwrap();
//! let actions = handle_event(&mut select, &Event::Click { id, shift: false })?;
//! // Execute actions with picklist::app::dispatch...
//! assert!(!actions.is_empty());
//! assert_eq!(select.selected_values(), vec!["tomatoes"]);
//! # Ok::<(), picklist::PicklistError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Explicit Group Membership
//!
//! Every item carries its group as a foreign key computed at build time; no
//! operation infers membership from entry order.
//!
//! ## Effects as Data
//!
//! Operations return actions instead of calling into the presentation layer,
//! so listeners run after the operation settled and can never re-enter it.
//!
//! ## Generation-Scoped Ids
//!
//! Each rebuild allocates a new id generation; ids from an older build resolve
//! to nothing and every operation on them is a no-op.

pub mod app;
pub mod domain;
pub mod engine;
pub mod filter;
pub mod mirror;
pub mod notify;
pub mod observability;
pub mod ui;

pub use app::{dispatch, handle_event, Action, Event, Multiselect, SelectionMode};
pub use domain::{PicklistError, Result};
pub use filter::FilterBehavior;

use filter::FilterOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Levels accepted by `trace_level`.
const TRACE_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Control configuration with every recognized option.
///
/// Unset options take their defaults, both when deserializing and when parsing
/// from a string map.
///
/// # Example
///
/// ```toml
/// multiple = true
/// enable_case_insensitive_filtering = true
/// number_displayed = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Multiple selection. Fixed for the lifetime of a control. Default: `false`
    pub multiple: bool,

    /// Marker class of checked rows; `None` disables row highlighting.
    /// Default: `"active"`
    pub selected_class: Option<String>,

    /// Enables the filter input. Default: `false`
    pub enable_filtering: bool,

    /// Enables the filter input with case-insensitive matching. Default: `false`
    pub enable_case_insensitive_filtering: bool,

    /// Prefix-equality matching instead of substring search. Default: `false`
    pub enable_full_value_filtering: bool,

    /// Fuzzy matching instead of substring search. Default: `false`
    pub enable_fuzzy_filtering: bool,

    /// What a query is matched against: `text`, `value` or `both`.
    /// Unknown names fall back to `text`. Default: `text`
    pub filter_behavior: FilterBehavior,

    /// Quiet period before a filter pass runs, in milliseconds. Default: `300`
    pub filter_debounce_ms: u64,

    /// Select-all affects only entries visible under the filter. Default: `true`
    pub select_all_just_visible: bool,

    /// Group headers carry a checkbox toggling their members. Default: `false`
    pub enable_clickable_opt_groups: bool,

    /// Group headers can be collapsed. Default: `false`
    pub enable_collapsible_opt_groups: bool,

    /// Groups start collapsed. Requires collapsible groups. Default: `false`
    pub collapse_opt_groups_by_default: bool,

    /// Adds the synthetic select-all entry (multiple mode only). Default: `false`
    pub include_select_all_option: bool,

    /// Minimum number of options, exclusive, for the select-all entry.
    /// Default: `0`
    pub include_select_all_if_more_than: usize,

    /// Label of the select-all entry. Default: `"Select all"`
    pub select_all_text: String,

    /// Adds a reset entry that clears the selection. Default: `false`
    pub include_reset_option: bool,

    /// Adds a reset button restoring the initial selection. Default: `false`
    pub enable_reset_button: bool,

    /// Disables the control while it has no options. Default: `false`
    pub disable_if_empty: bool,

    /// Button label without selection. Default: `"None selected"`
    pub non_selected_text: String,

    /// Suffix of the count label. Default: `"selected"`
    pub n_selected_text: String,

    /// Button label when everything is selected. Default: `"All selected"`
    pub all_selected_text: String,

    /// Appends the count to `all_selected_text`. Default: `true`
    pub select_all_number: bool,

    /// Above this many selections the label shows a count; `0` never does.
    /// Default: `3`
    pub number_displayed: usize,

    /// Separator of selected labels. Default: `", "`
    pub delimiter_text: String,

    /// Button label while disabled; empty keeps the selection label.
    /// Default: `""`
    pub disabled_text: String,

    /// Tracing level. Options: `trace`, `debug`, `info`, `warn`, `error`, `off`.
    /// Default: `"info"`
    pub trace_level: Option<String>,

    /// JSON-lines trace file; stderr when unset.
    pub trace_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            multiple: false,
            selected_class: Some("active".to_string()),
            enable_filtering: false,
            enable_case_insensitive_filtering: false,
            enable_full_value_filtering: false,
            enable_fuzzy_filtering: false,
            filter_behavior: FilterBehavior::Text,
            filter_debounce_ms: 300,
            select_all_just_visible: true,
            enable_clickable_opt_groups: false,
            enable_collapsible_opt_groups: false,
            collapse_opt_groups_by_default: false,
            include_select_all_option: false,
            include_select_all_if_more_than: 0,
            select_all_text: "Select all".to_string(),
            include_reset_option: false,
            enable_reset_button: false,
            disable_if_empty: false,
            non_selected_text: "None selected".to_string(),
            n_selected_text: "selected".to_string(),
            all_selected_text: "All selected".to_string(),
            select_all_number: true,
            number_displayed: 3,
            delimiter_text: ", ".to_string(),
            disabled_text: String::new(),
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from string key/value pairs.
    ///
    /// Keys are the field names. Values that fail to parse fall back to the
    /// default of their key; unknown keys are ignored.
    ///
    /// # Parameters
    ///
    /// * `map` - Option names to raw values
    ///
    /// # Parsing Rules
    ///
    /// - Flags: `true` / `false`
    /// - Counts and `filter_debounce_ms`: unsigned integers
    /// - `filter_behavior`: `text`, `value` or `both`
    /// - `selected_class`: empty string → `None`
    /// - Texts, `trace_level` and `trace_file`: taken as is
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use picklist::{Config, FilterBehavior};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("multiple".to_string(), "true".to_string());
    /// map.insert("number_displayed".to_string(), "five".to_string());
    /// map.insert("filter_behavior".to_string(), "value".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert!(config.multiple);
    /// assert_eq!(config.number_displayed, 3);
    /// assert_eq!(config.filter_behavior, FilterBehavior::Value);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let flag = |key: &str, default: bool| {
            map.get(key)
                .and_then(|s| s.trim().parse::<bool>().ok())
                .unwrap_or_else(|| {
                    if let Some(raw) = map.get(key) {
                        tracing::debug!(key, value = %raw, "invalid flag, using default");
                    }
                    default
                })
        };
        let count = |key: &str, default: usize| {
            map.get(key)
                .and_then(|s| s.trim().parse::<usize>().ok())
                .unwrap_or(default)
        };
        let text = |key: &str, default: String| map.get(key).cloned().unwrap_or(default);

        Self {
            multiple: flag("multiple", defaults.multiple),
            selected_class: map
                .get("selected_class")
                .map_or(defaults.selected_class, |s| Some(s.clone()).filter(|s| !s.is_empty())),
            enable_filtering: flag("enable_filtering", defaults.enable_filtering),
            enable_case_insensitive_filtering: flag(
                "enable_case_insensitive_filtering",
                defaults.enable_case_insensitive_filtering,
            ),
            enable_full_value_filtering: flag("enable_full_value_filtering", defaults.enable_full_value_filtering),
            enable_fuzzy_filtering: flag("enable_fuzzy_filtering", defaults.enable_fuzzy_filtering),
            filter_behavior: map
                .get("filter_behavior")
                .map_or(defaults.filter_behavior, |s| FilterBehavior::from(s.as_str())),
            filter_debounce_ms: map
                .get("filter_debounce_ms")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(defaults.filter_debounce_ms),
            select_all_just_visible: flag("select_all_just_visible", defaults.select_all_just_visible),
            enable_clickable_opt_groups: flag("enable_clickable_opt_groups", defaults.enable_clickable_opt_groups),
            enable_collapsible_opt_groups: flag(
                "enable_collapsible_opt_groups",
                defaults.enable_collapsible_opt_groups,
            ),
            collapse_opt_groups_by_default: flag(
                "collapse_opt_groups_by_default",
                defaults.collapse_opt_groups_by_default,
            ),
            include_select_all_option: flag("include_select_all_option", defaults.include_select_all_option),
            include_select_all_if_more_than: count(
                "include_select_all_if_more_than",
                defaults.include_select_all_if_more_than,
            ),
            select_all_text: text("select_all_text", defaults.select_all_text),
            include_reset_option: flag("include_reset_option", defaults.include_reset_option),
            enable_reset_button: flag("enable_reset_button", defaults.enable_reset_button),
            disable_if_empty: flag("disable_if_empty", defaults.disable_if_empty),
            non_selected_text: text("non_selected_text", defaults.non_selected_text),
            n_selected_text: text("n_selected_text", defaults.n_selected_text),
            all_selected_text: text("all_selected_text", defaults.all_selected_text),
            select_all_number: flag("select_all_number", defaults.select_all_number),
            number_displayed: count("number_displayed", defaults.number_displayed),
            delimiter_text: text("delimiter_text", defaults.delimiter_text),
            disabled_text: text("disabled_text", defaults.disabled_text),
            trace_level: map.get("trace_level").cloned(),
            trace_file: map.get("trace_file").map(PathBuf::from),
        }
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`PicklistError::Toml`] on malformed input or mistyped values.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PicklistError::Io`] when the file cannot be read, or any error
    /// of [`Config::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading configuration file");
        Self::from_toml_str(&content)
    }

    /// Checks option combinations that cannot work together.
    ///
    /// # Errors
    ///
    /// Returns [`PicklistError::Config`] when groups are collapsed by default
    /// without being collapsible, when `selected_class` is empty, or when
    /// `trace_level` is not a known level.
    pub fn validate(&self) -> Result<()> {
        if self.collapse_opt_groups_by_default && !self.enable_collapsible_opt_groups {
            return Err(PicklistError::Config(
                "collapse_opt_groups_by_default requires enable_collapsible_opt_groups".to_string(),
            ));
        }
        if self.selected_class.as_deref() == Some("") {
            return Err(PicklistError::Config(
                "selected_class must not be empty, leave it unset instead".to_string(),
            ));
        }
        if let Some(level) = &self.trace_level {
            if !TRACE_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(PicklistError::Config(format!("unknown trace_level `{level}`")));
            }
        }
        Ok(())
    }

    /// Whether the filter input is shown at all.
    #[must_use]
    pub const fn filtering_enabled(&self) -> bool {
        self.enable_filtering || self.enable_case_insensitive_filtering
    }

    /// Matching policy derived from the filter options.
    #[must_use]
    pub const fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            behavior: self.filter_behavior,
            case_insensitive: self.enable_case_insensitive_filtering,
            full_value: self.enable_full_value_filtering,
            fuzzy: self.enable_fuzzy_filtering,
        }
    }
}

/// Initializes tracing and creates a control.
///
/// # Parameters
///
/// * `config` - Control configuration
/// * `model` - The initial option model
///
/// # Returns
///
/// A synchronized [`Multiselect`]; its initial render actions are available
/// through [`Multiselect::take_actions`].
///
/// # Errors
///
/// Returns [`PicklistError::Config`] for an invalid configuration, or
/// [`PicklistError::StructuralMismatch`] if the first build fails.
///
/// # Side Effects
///
/// - Initializes the tracing subscriber (first call only)
pub fn initialize(config: Config, model: domain::OptionModel) -> Result<Multiselect> {
    observability::init_tracing(&config);
    tracing::debug!(multiple = config.multiple, "initializing picklist");
    Multiselect::new(config, model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_map_falls_back_per_key() {
        let map: BTreeMap<String, String> = [
            ("multiple", "yes"),
            ("enable_filtering", "true"),
            ("include_select_all_if_more_than", "4"),
            ("selected_class", ""),
            ("delimiter_text", " | "),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);

        assert!(!config.multiple);
        assert!(config.enable_filtering);
        assert_eq!(config.include_select_all_if_more_than, 4);
        assert_eq!(config.selected_class, None);
        assert_eq!(config.delimiter_text, " | ");
        assert_eq!(config.filter_debounce_ms, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_uses_defaults_for_missing_keys() {
        let config = Config::from_toml_str(
            r#"
            multiple = true
            filter_behavior = "unknown"
            number_displayed = 1
            "#,
        )
        .unwrap();

        assert!(config.multiple);
        assert_eq!(config.filter_behavior, FilterBehavior::Text);
        assert_eq!(config.number_displayed, 1);
        assert!(config.select_all_just_visible);
    }

    #[test]
    fn test_mistyped_toml_is_an_error() {
        assert!(matches!(
            Config::from_toml_str("multiple = \"often\""),
            Err(PicklistError::Toml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picklist.toml");
        std::fs::write(&path, "enable_case_insensitive_filtering = true\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.filtering_enabled());
        assert!(config.filter_options().case_insensitive);

        assert!(matches!(
            Config::from_file(dir.path().join("missing.toml")),
            Err(PicklistError::Io(_))
        ));
    }

    #[test]
    fn test_validate_rejects_conflicts() {
        let collapsed = Config {
            collapse_opt_groups_by_default: true,
            ..Config::default()
        };
        assert!(matches!(collapsed.validate(), Err(PicklistError::Config(_))));

        let level = Config {
            trace_level: Some("verbose".to_string()),
            ..Config::default()
        };
        assert!(matches!(level.validate(), Err(PicklistError::Config(_))));

        let ok = Config {
            trace_level: Some("DEBUG".to_string()),
            ..Config::default()
        };
        assert!(ok.validate().is_ok());
    }
}
