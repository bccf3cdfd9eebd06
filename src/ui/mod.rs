//! Presentation contract: render callbacks, button label, view model.
//!
//! The engine is headless. This module defines what it hands to a presentation
//! layer:
//!
//! - [`renderer`]: The [`Renderer`] callback trait and a recording implementation
//! - [`button`]: Button label and title computation
//! - [`viewmodel`]: Snapshot view model of the whole dropdown

pub mod button;
pub mod renderer;
pub mod viewmodel;

pub use button::{button_text, button_title};
pub use renderer::{RecordingRenderer, Renderer};
pub use viewmodel::{ButtonInfo, DropdownViewModel, RowViewModel};
