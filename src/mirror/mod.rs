//! Mirror Registry: the bidirectional mapping between option model entities and
//! their checkable UI counterparts.
//!
//! A [`MirrorSet`] is built once per render pass and rebuilt on every structural
//! change. Each build bumps a generation counter, so ids handed out by an older
//! pass resolve to nothing instead of silently aliasing a new entry.
//!
//! # Example
//!
//! ```
//! use picklist::domain::{DataEntry, OptionModel};
//! use picklist::mirror::{EntryKind, MirrorSet};
//!
//! let model = OptionModel::from_data(&[DataEntry::option("A", "a")]).unwrap();
//! let mirrors = MirrorSet::build(&model, false);
//! let id = mirrors.entries()[0].id;
//! assert!(matches!(mirrors.resolve(id), Some(EntryKind::Item(_))));
//! ```

mod registry;

pub use registry::{EntryKind, MirrorEntry, MirrorId, MirrorSet};
