//! Result set hubs.
//!
//! Every range that refers to a symbol gets a `next` edge into the symbol's
//! hub, and the hub alone carries the moniker, hover and result edges. Result
//! vertices are created the first time a member is added to them.

use crate::emitter::Emitter;
use crate::error::IndexError;
use crate::moniker::MonikerSet;
use crate::semantic::SymbolKey;
use crate::writer::Writer;
use lsif_type::{
    DefinitionResult, Edge, EdgeLabel, Hover, HoverResult, Id, ImplementationResult,
    ReferenceResult, ResultSet, Vertex,
};
use lsp_types::{HoverContents, LanguageString, MarkedString};
use std::collections::hash_map::{Entry as Slot, HashMap};
use tracing::debug;

/// What a hub stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HubKey {
    Symbol(SymbolKey),
    /// A symbol seen under an exported name of its own.
    Alias { symbol: SymbolKey, name: String },
}

#[derive(Debug, Clone)]
pub struct Hub {
    pub id: Id,
    pub monikers: MonikerSet,
    hover: bool,
    definition_result: Option<Id>,
    reference_result: Option<Id>,
    implementation_result: Option<Id>,
}

impl Hub {
    fn new(id: Id) -> Self {
        Hub {
            id,
            monikers: MonikerSet::default(),
            hover: false,
            definition_result: None,
            reference_result: None,
            implementation_result: None,
        }
    }

    pub fn has_hover(&self) -> bool {
        self.hover
    }

    /// Attach a hover unless the hub already has one.
    pub fn hover<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
        language: &str,
        text: &str,
    ) -> Result<(), IndexError> {
        if self.hover {
            return Ok(());
        }
        let result = writer.vertex(Vertex::HoverResult(HoverResult {
            result: Hover {
                contents: HoverContents::Array(vec![MarkedString::LanguageString(
                    LanguageString {
                        language: language.to_owned(),
                        value: text.to_owned(),
                    },
                )]),
                range: None,
            },
        }))?;
        writer.edge(Edge::Hover(lsif_type::EdgeData::new(self.id.clone(), result)))?;
        self.hover = true;
        Ok(())
    }

    pub fn definition_result<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
    ) -> Result<Id, IndexError> {
        let hub = self.id.clone();
        lazy_result(
            writer,
            &mut self.definition_result,
            &hub,
            Vertex::DefinitionResult(DefinitionResult {}),
            EdgeLabel::Definition,
        )
    }

    pub fn reference_result<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
    ) -> Result<Id, IndexError> {
        let hub = self.id.clone();
        lazy_result(
            writer,
            &mut self.reference_result,
            &hub,
            Vertex::ReferenceResult(ReferenceResult {}),
            EdgeLabel::References,
        )
    }

    pub fn implementation_result<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
    ) -> Result<Id, IndexError> {
        let hub = self.id.clone();
        lazy_result(
            writer,
            &mut self.implementation_result,
            &hub,
            Vertex::ImplementationResult(ImplementationResult {}),
            EdgeLabel::Implementation,
        )
    }
}

fn lazy_result<E: Emitter>(
    writer: &mut Writer<E>,
    slot: &mut Option<Id>,
    hub: &Id,
    vertex: Vertex,
    label: EdgeLabel,
) -> Result<Id, IndexError> {
    if let Some(id) = slot {
        return Ok(id.clone());
    }
    let id = writer.vertex(vertex)?;
    if let Some(edge) = Edge::one_to_one(label, hub.clone(), id.clone()) {
        writer.edge(edge)?;
    }
    *slot = Some(id.clone());
    Ok(id)
}

/// Lookup from symbol to hub.
#[derive(Debug, Default)]
pub struct ResultSets {
    hubs: HashMap<HubKey, Hub>,
}

impl ResultSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of hubs created so far, aliases included.
    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<&Hub> {
        self.hubs.get(&HubKey::Symbol(symbol.to_owned()))
    }

    /// The symbol's hub, created on first use.
    pub fn hub<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
        symbol: &str,
    ) -> Result<&mut Hub, IndexError> {
        match self.hubs.entry(HubKey::Symbol(symbol.to_owned())) {
            Slot::Occupied(slot) => Ok(slot.into_mut()),
            Slot::Vacant(slot) => {
                let id = writer.vertex(Vertex::ResultSet(ResultSet {}))?;
                debug!(symbol, hub = %id, "new result set");
                Ok(slot.insert(Hub::new(id)))
            }
        }
    }

    /// Link `range` to the symbol's hub with a `next` edge.
    pub fn link<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
        range: &Id,
        symbol: &str,
    ) -> Result<&mut Hub, IndexError> {
        let hub = self.hub(writer, symbol)?;
        writer.edge(Edge::next(range.clone(), hub.id.clone()))?;
        Ok(hub)
    }

    /// The hub of `symbol` exported as `name`, chained to the symbol's own
    /// hub. The flag tells whether it was created by this call.
    pub fn alias<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
        symbol: &str,
        name: &str,
    ) -> Result<(&mut Hub, bool), IndexError> {
        let canonical = self.hub(writer, symbol)?.id.clone();
        let key = HubKey::Alias {
            symbol: symbol.to_owned(),
            name: name.to_owned(),
        };
        match self.hubs.entry(key) {
            Slot::Occupied(slot) => Ok((slot.into_mut(), false)),
            Slot::Vacant(slot) => {
                let id = writer.vertex(Vertex::ResultSet(ResultSet {}))?;
                writer.edge(Edge::next(id.clone(), canonical))?;
                debug!(symbol, name, hub = %id, "new alias result set");
                Ok((slot.insert(Hub::new(id)), true))
            }
        }
    }
}
