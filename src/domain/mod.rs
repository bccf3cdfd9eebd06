//! Domain layer for the picklist engine.
//!
//! This module contains the option model and the error taxonomy, independent of
//! any presentation concern.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`option`]: Items, groups, data provider entries and the option model
//!
//! # Examples
//!
//! ```
//! use picklist::domain::{DataEntry, OptionModel, Result};
//!
//! fn build() -> Result<OptionModel> {
//!     OptionModel::from_data(&[
//!         DataEntry::option("Red", "red"),
//!         DataEntry::option("Green", "green").selected(),
//!     ])
//! }
//! assert_eq!(build().unwrap().selected_items().count(), 1);
//! ```

pub mod error;
pub mod option;

pub use error::{PicklistError, Result};
pub use option::{DataEntry, Group, GroupId, Item, ItemId, OptionModel, SelectionSnapshot};
