//! In-memory LSIF graph: an append-only arena of elements keyed by [`Id`].
//!
//! [`Id`]: lsif_type::Id

pub mod dom;
pub mod loader;

pub use dom::{Error, Graph, IdAllocator};
pub use loader::{load, Loader, Mode};
