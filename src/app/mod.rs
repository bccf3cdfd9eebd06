//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the presentation layer and the engine. It holds the
//! per-control instance context and the event-driven surface that drives it.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → Engine Operations → Actions → Renderer / Listener
//! ```
//!
//! Listeners only run when the caller dispatches the returned actions, after
//! the operation has settled, so a listener can never re-enter an operation in
//! flight.
//!
//! # Modules
//!
//! - [`actions`]: Effects emitted by engine operations
//! - [`handler`]: Click interpretation and event processing
//! - [`modes`]: Selection cardinality
//! - [`state`]: The instance context and view model computation
//!
//! # Example
//!
//! ```rust
//! use picklist::app::{dispatch, handle_event, Event, Multiselect};
//! use picklist::domain::{DataEntry, ItemId, OptionModel};
//! use picklist::notify::RecordingListener;
//! use picklist::ui::RecordingRenderer;
//! use picklist::Config;
//!
//! let model = OptionModel::from_data(&[DataEntry::option("A", "a")]).unwrap();
//! let mut select = Multiselect::new(Config { multiple: true, ..Config::default() }, model)?;
//! let id = select.item_mirror(ItemId(0)).unwrap();
//!
//! let mut renderer = RecordingRenderer::default();
//! let mut listener = RecordingListener::default();
//! dispatch(&select.take_actions(), &mut renderer, &mut listener);
//!
//! let actions = handle_event(&mut select, &Event::Click { id, shift: false })?;
//! dispatch(&actions, &mut renderer, &mut listener);
//! assert_eq!(renderer.last_checked(id), Some(true));
//! assert_eq!(listener.received.len(), 1);
//! # Ok::<(), picklist::PicklistError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::{dispatch, Action};
pub use handler::{handle_event, Event};
pub use modes::SelectionMode;
pub use state::Multiselect;
