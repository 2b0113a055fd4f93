//! Loading decoded elements into a [`Graph`].
//!
//! The loader enforces what the schema alone cannot: the dump starts with its
//! single `metaData` vertex, ids are unique, and every id an element points at
//! resolves. How an element that points forward is treated depends on the
//! [`Mode`].

use crate::dom::{Error, Graph};
use lsif_type::{ElementTrait, Entry, Id, Vertex};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Reject the first element that references an id not seen yet.
    #[default]
    Strict,
    /// Park such elements until their targets arrive. Whatever is still
    /// parked when the input ends is an error.
    Buffered,
}

#[derive(Debug, Default)]
pub struct Loader {
    mode: Mode,
    graph: Graph,
    /// Parked elements, keyed by the id they wait for.
    waiting: HashMap<Id, Vec<Entry>>,
    parked: HashSet<Id>,
}

/// Load a whole decoded dump.
pub fn load(entries: impl IntoIterator<Item = Entry>, mode: Mode) -> Result<Graph, Error> {
    let mut loader = Loader::new(mode);
    for entry in entries {
        loader.push(entry)?;
    }
    loader.finish()
}

impl Loader {
    pub fn new(mode: Mode) -> Self {
        Loader {
            mode,
            ..Default::default()
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Number of elements parked on unresolved ids.
    pub fn pending(&self) -> usize {
        self.parked.len()
    }

    pub fn push(&mut self, entry: Entry) -> Result<(), Error> {
        self.check_metadata(&entry)?;
        if self.graph.contains(&entry.id) || self.parked.contains(&entry.id) {
            return Err(Error::DuplicateId(entry.id));
        }

        let mut ready = vec![entry];
        while let Some(entry) = ready.pop() {
            if let Some(missing) = self.graph.first_unresolved(&entry).cloned() {
                match self.mode {
                    Mode::Strict => {
                        return Err(Error::UnresolvedReference {
                            id: entry.id,
                            missing,
                        })
                    }
                    Mode::Buffered => {
                        debug!(id = %entry.id, %missing, "parking element");
                        self.parked.insert(entry.id.clone());
                        self.waiting.entry(missing).or_default().push(entry);
                        continue;
                    }
                }
            }

            let id = entry.id.clone();
            self.parked.remove(&id);
            self.graph.append(entry)?;
            if let Some(unblocked) = self.waiting.remove(&id) {
                // reversed so that unblocked elements leave in parking order
                ready.extend(unblocked.into_iter().rev());
            }
        }
        Ok(())
    }

    pub fn finish(self) -> Result<Graph, Error> {
        if let Some((missing, entries)) = self.waiting.iter().min_by(|a, b| a.0.cmp(b.0)) {
            if let Some(entry) = entries.first() {
                return Err(Error::Pending {
                    count: self.parked.len(),
                    id: entry.id.clone(),
                    missing: missing.clone(),
                });
            }
        }
        info!(elements = self.graph.len(), "loaded dump");
        Ok(self.graph)
    }

    fn check_metadata(&self, entry: &Entry) -> Result<(), Error> {
        let is_metadata = matches!(entry.as_vertex(), Some(Vertex::MetaData(_)));
        match (self.graph.is_empty() && self.parked.is_empty(), is_metadata) {
            (true, false) => Err(Error::MissingMetaData {
                id: entry.id.clone(),
                found: entry.element.get_label(),
            }),
            (false, true) => Err(Error::DuplicateMetaData(entry.id.clone())),
            _ => Ok(()),
        }
    }
}
