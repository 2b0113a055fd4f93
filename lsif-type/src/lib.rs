//! Typed model of the Language Server Index Format (LSIF) graph.
//!
//! Every element of a dump is an [`Entry`]: an [`Id`] plus either a
//! [`Vertex`] or an [`Edge`]. The serde representation of these types is the
//! wire format itself, one JSON object per element. Untrusted input should be
//! run through [`schema::check`] before it is narrowed into an [`Entry`].

extern crate lsp_types as lsp;

pub mod edge;
pub mod schema;
pub mod vertex;

use serde_derive::{Deserialize, Serialize};
use std::fmt;

pub use edge::{Edge, EdgeData, EdgeDataMultiIn, EdgeLabel, Item, ItemProperty};
pub use schema::{ElementLabel, Violation};
pub use vertex::*;

// Use LSP Types ===================================================================================
pub use lsp::{Position, Url};
pub type Uri = lsp::Url;
pub type LspRange = lsp::Range;
pub type SymbolKind = lsp::SymbolKind;
pub type DocumentSymbol = lsp::DocumentSymbol;
pub type Diagnostic = lsp::Diagnostic;
pub type FoldingRange = lsp::FoldingRange;
pub type DocumentLink = lsp::DocumentLink;
pub type Hover = lsp::Hover;

/// The only position encoding LSIF dumps may advertise.
pub const POSITION_ENCODING: &str = "utf-16";

/// Largest numeric id (`uinteger` in the protocol).
pub const MAX_NUMERIC_ID: u32 = i32::MAX as u32;

/// An `Id` to identify a vertex or an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(u32),
    String(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<u32> for Id {
    fn from(n: u32) -> Self {
        Id::Number(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_owned())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

/// One line of a dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Id,
    #[serde(flatten)]
    pub element: Element,
}

impl Entry {
    pub fn new(id: Id, element: impl Into<Element>) -> Self {
        Entry {
            id,
            element: element.into(),
        }
    }

    pub fn as_vertex(&self) -> Option<&Vertex> {
        match &self.element {
            Element::Vertex(v) => Some(v),
            Element::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match &self.element {
            Element::Edge(e) => Some(e),
            Element::Vertex(_) => None,
        }
    }

    /// Ids this entry points at: edge endpoints, item shards and the vertex
    /// an event brackets.
    pub fn referenced_ids(&self) -> Vec<&Id> {
        match &self.element {
            Element::Edge(edge) => edge.referenced_ids(),
            Element::Vertex(Vertex::Event(event)) => vec![&event.data],
            Element::Vertex(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    Vertex(Vertex),
    Edge(Edge),
}

impl From<Vertex> for Element {
    fn from(v: Vertex) -> Self {
        Element::Vertex(v)
    }
}

impl From<Edge> for Element {
    fn from(e: Edge) -> Self {
        Element::Edge(e)
    }
}

pub trait ElementTrait {
    fn get_type(&self) -> &'static str;
    fn get_label(&self) -> &'static str;
}

impl ElementTrait for Element {
    fn get_type(&self) -> &'static str {
        match self {
            Element::Vertex(v) => v.get_type(),
            Element::Edge(e) => e.get_type(),
        }
    }

    fn get_label(&self) -> &'static str {
        match self {
            Element::Vertex(v) => v.get_label(),
            Element::Edge(e) => e.get_label(),
        }
    }
}

/// Error returned when a label string names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label {0:?}")]
pub struct UnknownLabel(pub String);
