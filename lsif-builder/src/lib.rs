//! Builds an LSIF graph from the declarations and usages reported by a
//! language's semantic analyzer.
//!
//! The [`Indexer`] walks a [`SemanticModel`] once. For every event it asks the
//! [`MonikerEngine`] for a stable identity, lets [`ResultSets`] decide which
//! hub the range shares its results with, collects result membership in the
//! [`ItemBatcher`], and hands every new element to the single [`Writer`].

pub mod batcher;
pub mod config;
pub mod emitter;
pub mod error;
pub mod fixture;
pub mod indexer;
pub mod moniker;
pub mod result_set;
pub mod semantic;
pub mod writer;

pub use batcher::ItemBatcher;
pub use config::{GroupConfig, IndexerConfig};
pub use emitter::{Emitter, JsonLinesEmitter, MemoryEmitter};
pub use error::{ConfigError, FixtureError, IndexError};
pub use fixture::FixtureModel;
pub use indexer::{index, Indexer, Outcome, Summary};
pub use moniker::{Identity, MonikerEngine, MonikerSet};
pub use result_set::{Hub, HubKey, ResultSets};
pub use semantic::{
    AliasMember, AnalyzedDocument, Declaration, ExportAlias, Exposure, ProjectInfo, ScopeSegment,
    SemanticModel, SymbolEvent, Usage, Visibility,
};
pub use writer::Writer;
