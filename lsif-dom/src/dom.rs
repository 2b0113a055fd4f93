use indexmap::{map::Entry as Slot, IndexMap};
use lsif_type::{Edge, ElementTrait, Entry, Id, MetaData, Vertex, MAX_NUMERIC_ID};

#[derive(Debug, Clone, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Error {
    #[error("duplicate id {0}")]
    DuplicateId(Id),
    #[error("element {id} references unknown id {missing}")]
    UnresolvedReference { id: Id, missing: Id },
    #[error("the first element must be metaData, found {found} with id {id}")]
    MissingMetaData { id: Id, found: &'static str },
    #[error("second metaData vertex with id {0}")]
    DuplicateMetaData(Id),
    #[error("{count} element(s) still reference unknown ids, first is {id} waiting for {missing}")]
    Pending { count: usize, id: Id, missing: Id },
    #[error("numeric id space exhausted")]
    Exhausted,
}

/// The graph.
///
/// Elements are kept in emission order. There is no API to remove or replace
/// an element once it is appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    entries: IndexMap<Id, Entry>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry`, failing if its id is already taken.
    pub fn append(&mut self, entry: Entry) -> Result<(), Error> {
        match self.entries.entry(entry.id.clone()) {
            Slot::Occupied(slot) => Err(Error::DuplicateId(slot.key().clone())),
            Slot::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: &Id) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn vertices(&self) -> impl Iterator<Item = (&Id, &Vertex)> {
        self.entries
            .iter()
            .filter_map(|(id, entry)| entry.as_vertex().map(|v| (id, v)))
    }

    pub fn edges(&self) -> impl Iterator<Item = (&Id, &Edge)> {
        self.entries
            .iter()
            .filter_map(|(id, entry)| entry.as_edge().map(|e| (id, e)))
    }

    /// The first id `entry` points at that is not in the graph yet.
    pub fn first_unresolved<'e>(&self, entry: &'e Entry) -> Option<&'e Id> {
        entry
            .referenced_ids()
            .into_iter()
            .find(|id| !self.contains(id))
    }

    pub fn references_resolved(&self, entry: &Entry) -> bool {
        self.first_unresolved(entry).is_none()
    }

    pub fn metadata(&self) -> Option<&MetaData> {
        match self.entries.first().map(|(_, entry)| entry.as_vertex()) {
            Some(Some(Vertex::MetaData(meta))) => Some(meta),
            _ => None,
        }
    }

    /// Number of elements per label, in first-seen order.
    pub fn label_counts(&self) -> IndexMap<&'static str, usize> {
        let mut counts = IndexMap::new();
        for entry in self.iter() {
            *counts.entry(entry.element.get_label()).or_insert(0) += 1;
        }
        counts
    }
}

impl<'g> IntoIterator for &'g Graph {
    type Item = &'g Entry;
    type IntoIter = indexmap::map::Values<'g, Id, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// Hands out element ids.
///
/// Numeric ids count up from 1. With a prefix, ids are the strings
/// `"<prefix><n>"`, which keeps dumps of several producers disjoint.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
    prefix: Option<String>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        IdAllocator {
            next: 1,
            prefix: None,
        }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        IdAllocator {
            next: 1,
            prefix: Some(prefix.into()),
        }
    }

    pub fn allocate(&mut self) -> Result<Id, Error> {
        let n = self.next;
        let id = match &self.prefix {
            Some(prefix) => Id::String(format!("{}{}", prefix, n)),
            None if n > MAX_NUMERIC_ID => return Err(Error::Exhausted),
            None => Id::Number(n),
        };
        self.next = n.checked_add(1).ok_or(Error::Exhausted)?;
        Ok(id)
    }

    /// How many ids were handed out so far.
    pub fn allocated(&self) -> u32 {
        self.next - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsif_type::{Moniker, MonikerKind, ResultSet, UniquenessLevel};
    use pretty_assertions::assert_eq;

    fn result_set(id: u32) -> Entry {
        Entry::new(Id::Number(id), Vertex::ResultSet(ResultSet {}))
    }

    #[test]
    fn append_rejects_reused_ids() {
        let mut graph = Graph::new();
        graph.append(result_set(1)).unwrap();
        graph.append(result_set(2)).unwrap();
        assert_eq!(graph.append(result_set(1)), Err(Error::DuplicateId(Id::Number(1))));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn string_and_number_ids_do_not_collide() {
        let mut graph = Graph::new();
        graph.append(result_set(1)).unwrap();
        graph
            .append(Entry::new(Id::from("1"), Vertex::ResultSet(ResultSet {})))
            .unwrap();
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn iteration_follows_emission_order() {
        let mut graph = Graph::new();
        for id in [3, 1, 2] {
            graph.append(result_set(id)).unwrap();
        }
        graph
            .append(Entry::new(Id::Number(4), Edge::next(3.into(), 1.into())))
            .unwrap();
        let ids: Vec<&Id> = graph.iter().map(|e| &e.id).collect();
        assert_eq!(ids, vec![&Id::Number(3), &Id::Number(1), &Id::Number(2), &Id::Number(4)]);
        assert_eq!(graph.vertices().count(), 3);
        assert_eq!(graph.edges().count(), 1);
    }

    #[test]
    fn unresolved_references_are_reported_in_order() {
        let mut graph = Graph::new();
        graph.append(result_set(1)).unwrap();
        let edge = Entry::new(Id::Number(9), Edge::attach(1.into(), 5.into()));
        assert_eq!(graph.first_unresolved(&edge), Some(&Id::Number(5)));
        graph
            .append(Entry::new(
                Id::Number(5),
                Vertex::Moniker(Moniker {
                    scheme: "lsif".into(),
                    identifier: "a:x".into(),
                    unique: UniquenessLevel::Group,
                    kind: Some(MonikerKind::Export),
                }),
            ))
            .unwrap();
        assert!(graph.references_resolved(&edge));
    }

    #[test]
    fn numeric_allocation_is_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(), Ok(Id::Number(1)));
        assert_eq!(ids.allocate(), Ok(Id::Number(2)));
        assert_eq!(ids.allocated(), 2);

        let mut ids = IdAllocator {
            next: MAX_NUMERIC_ID,
            prefix: None,
        };
        assert_eq!(ids.allocate(), Ok(Id::Number(MAX_NUMERIC_ID)));
        assert_eq!(ids.allocate(), Err(Error::Exhausted));
    }

    #[test]
    fn prefixed_allocation_yields_strings() {
        let mut ids = IdAllocator::with_prefix("p1-");
        assert_eq!(ids.allocate(), Ok(Id::from("p1-1")));
        assert_eq!(ids.allocate(), Ok(Id::from("p1-2")));
    }
}
