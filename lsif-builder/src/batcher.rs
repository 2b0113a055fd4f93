//! Coalescing of result membership into `item` edges.
//!
//! Members are collected per (result, property) while a shard is analyzed and
//! leave as one `item` edge per key when the shard completes. Nothing is held
//! open across shards.

use crate::emitter::Emitter;
use crate::error::IndexError;
use crate::writer::Writer;
use indexmap::IndexMap;
use lsif_type::{Edge, Id, ItemProperty};
use tracing::trace;

#[derive(Debug, Default)]
pub struct ItemBatcher {
    pending: IndexMap<(Id, Option<ItemProperty>), Vec<Id>>,
    flushed: usize,
}

impl ItemBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `member` as part of `property` of `result`.
    pub fn add(&mut self, result: &Id, property: Option<ItemProperty>, member: Id) {
        let members = self.pending.entry((result.clone(), property)).or_default();
        if !members.contains(&member) {
            members.push(member);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of `item` edges emitted so far.
    pub fn flushed(&self) -> usize {
        self.flushed
    }

    /// Turn everything collected into `item` edges scoped to `shard`, in
    /// first-contribution order.
    pub fn drain(&mut self, shard: &Id) -> Vec<Edge> {
        self.pending
            .drain(..)
            .map(|((result, property), members)| {
                Edge::item(result, members, shard.clone(), property)
            })
            .collect()
    }

    pub fn flush<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
        shard: &Id,
    ) -> Result<usize, IndexError> {
        let edges = self.drain(shard);
        let count = edges.len();
        for edge in edges {
            writer.edge(edge)?;
        }
        trace!(%shard, count, "flushed item edges");
        self.flushed += count;
        Ok(count)
    }
}
