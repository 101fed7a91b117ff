//! Persistence of a parsed cluster layout.
//!
//! [`save`] turns a tree into a flat, versioned record. [`load`] turns a
//! record back into restored cluster type definitions bound to the recorded
//! member names, and [`restore`] runs the parser with them so an unchanged
//! stack comes back with the same grouping. [`StackSnapshot`] is the cheap
//! side record used to notice that the live stack changed at all.

mod codec;
mod error;
mod record;
mod restore;
mod snapshot;

pub use codec::{RejectedRecord, Restoration, load, save};
pub use error::{StateError, StateResult};
pub use record::{
    ClusterRecord, FORMAT_VERSION, PersistedState, PrimitiveRecord, RecordKind, StateEntry,
};
pub use restore::{RestoredLayer, cleanup, restore};
pub use snapshot::{SnapshotEntry, StackSnapshot};
