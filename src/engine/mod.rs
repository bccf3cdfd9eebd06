//! Selection Engine: the operations that mutate selection and keep every
//! aggregate consistent.
//!
//! Operations are implemented on [`crate::app::Multiselect`], the instance
//! context, and split by concern:
//!
//! - [`aggregate`]: Group tri-state and global select-all aggregates
//! - `selection`: Item, range, group and bulk toggles
//! - `filtering`: Debounced filter passes
//! - `structure`: Rebuild, refresh, reset, collapse and enablement
//!
//! # Contract
//!
//! Every selection operation is total. Invalid input (a stale id, a disabled
//! item, an operation the current mode does not support) narrows to a no-op
//! that is logged at debug level, never to an error. Each call returns the
//! effects it produced, in order: render actions first, then at most one
//! [`crate::app::Action::Notify`].
//!
//! Aggregates are recomputed once at the end of each operation and never
//! produce a notification of their own.
//!
//! # Example
//!
//! ```rust
//! use picklist::app::{Action, Multiselect};
//! use picklist::domain::{DataEntry, ItemId, OptionModel};
//! use picklist::notify::Notification;
//! use picklist::Config;
//!
//! let model = OptionModel::from_data(&[
//!     DataEntry::option("A", "a"),
//!     DataEntry::option("B", "b"),
//! ]).unwrap();
//! let mut select = Multiselect::new(Config { multiple: true, ..Config::default() }, model)?;
//! select.take_actions();
//!
//! let actions = select.select_all(false, true);
//! assert!(matches!(
//!     actions.last(),
//!     Some(Action::Notify(Notification::SelectAll { items })) if items.len() == 2
//! ));
//! assert!(select.is_selected(ItemId(1)));
//! # Ok::<(), picklist::PicklistError>(())
//! ```

pub mod aggregate;
mod filtering;
mod selection;
mod structure;

pub use aggregate::{group_state, select_all_state, GroupState};
