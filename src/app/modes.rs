//! Selection cardinality of one build.
//!
//! The mode is derived from the source control's multiplicity (`Config::multiple`)
//! and stays fixed until the next structural rebuild. It decides which
//! operations are available:
//!
//! - **Single**: at most one item is selected; range toggles, group toggles and
//!   bulk deselects are ignored.
//! - **Multiple**: every item is toggled independently.
//!
//! # Example
//!
//! ```rust
//! use picklist::app::SelectionMode;
//!
//! let mode = SelectionMode::from_multiple(true);
//! assert_eq!(mode, SelectionMode::Multiple);
//! assert!(mode.is_multiple());
//! ```

/// Selection cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Exclusive choice, like a native single-value select.
    #[default]
    Single,

    /// Independent choices, like a native `multiple` select.
    Multiple,
}

impl SelectionMode {
    #[must_use]
    pub const fn from_multiple(multiple: bool) -> Self {
        if multiple {
            Self::Multiple
        } else {
            Self::Single
        }
    }

    #[must_use]
    pub const fn is_multiple(self) -> bool {
        matches!(self, Self::Multiple)
    }

    /// Lowercase name used in logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }
}
