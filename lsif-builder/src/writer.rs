//! The single serializing writer.
//!
//! Every element of a pass goes through [`Writer::vertex`] or
//! [`Writer::edge`]: it gets the next id, is validated against the schema
//! table, must only point at elements already written, and is then appended
//! to the graph and handed to the emitter. An aborted pass therefore leaves a
//! valid prefix behind.

use crate::emitter::Emitter;
use crate::error::IndexError;
use lsif_dom::{Graph, IdAllocator};
use lsif_type::{schema, Edge, Element, ElementTrait, Entry, Id, Vertex};
use tracing::trace;

#[derive(Debug)]
pub struct Writer<E: Emitter> {
    ids: IdAllocator,
    graph: Graph,
    emitter: E,
}

impl<E: Emitter> Writer<E> {
    pub fn new(ids: IdAllocator, emitter: E) -> Self {
        Writer {
            ids,
            graph: Graph::new(),
            emitter,
        }
    }

    pub fn vertex(&mut self, vertex: Vertex) -> Result<Id, IndexError> {
        self.write(Element::Vertex(vertex))
    }

    pub fn edge(&mut self, edge: Edge) -> Result<Id, IndexError> {
        self.write(Element::Edge(edge))
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Number of elements written so far.
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn flush(&mut self) -> Result<(), IndexError> {
        Ok(self.emitter.flush()?)
    }

    pub fn into_parts(self) -> (Graph, E) {
        (self.graph, self.emitter)
    }

    fn write(&mut self, element: Element) -> Result<Id, IndexError> {
        let entry = Entry {
            id: self.ids.allocate()?,
            element,
        };
        let label = entry.element.get_label();
        schema::check(&serde_json::to_value(&entry)?)
            .map_err(|violation| IndexError::Schema { label, violation })?;
        if let Some(missing) = self.graph.first_unresolved(&entry) {
            return Err(lsif_dom::Error::UnresolvedReference {
                id: entry.id.clone(),
                missing: missing.clone(),
            }
            .into());
        }

        trace!(id = %entry.id, label, "emit");
        self.emitter.emit(&entry)?;
        let id = entry.id.clone();
        self.graph.append(entry)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::MemoryEmitter;
    use lsif_type::{Document, ResultSet};
    use pretty_assertions::assert_eq;

    fn writer() -> Writer<MemoryEmitter> {
        Writer::new(IdAllocator::new(), MemoryEmitter::default())
    }

    #[test]
    fn ids_follow_emission_order() {
        let mut writer = writer();
        let a = writer.vertex(Vertex::ResultSet(ResultSet {})).unwrap();
        let b = writer.vertex(Vertex::ResultSet(ResultSet {})).unwrap();
        let edge = writer.edge(Edge::next(a.clone(), b.clone())).unwrap();
        assert_eq!((a, b, edge), (Id::Number(1), Id::Number(2), Id::Number(3)));

        let (graph, emitter) = writer.into_parts();
        assert_eq!(graph.len(), 3);
        assert_eq!(emitter.entries.len(), 3);
    }

    #[test]
    fn edges_must_not_point_forward() {
        let mut writer = writer();
        let a = writer.vertex(Vertex::ResultSet(ResultSet {})).unwrap();
        let error = writer.edge(Edge::next(a, Id::Number(7))).unwrap_err();
        assert!(matches!(
            error,
            IndexError::Graph(lsif_dom::Error::UnresolvedReference { .. })
        ));
        assert_eq!(writer.len(), 1);
    }

    #[test]
    fn prefixed_ids_are_strings() {
        let mut writer = Writer::new(IdAllocator::with_prefix("w"), MemoryEmitter::default());
        let id = writer
            .vertex(Vertex::Document(Document {
                uri: "file:///a.ts".parse().unwrap(),
                language_id: "typescript".into(),
                contents: None,
            }))
            .unwrap();
        assert_eq!(id, Id::from("w1"));
    }
}
