//! One indexing pass over a semantic model.
//!
//! The pass emits `metaData`, the optional `group`, the `project`, and then
//! every document in model order. A document is closed before the next one is
//! opened: its item edges are flushed, its ranges contained and its document
//! level results written, so no state other than the symbol hubs survives a
//! document boundary.

use crate::batcher::ItemBatcher;
use crate::config::{GroupConfig, IndexerConfig};
use crate::emitter::Emitter;
use crate::error::IndexError;
use crate::moniker::{Identity, MonikerEngine};
use crate::result_set::ResultSets;
use crate::semantic::{
    AnalyzedDocument, Declaration, ExportAlias, Exposure, ProjectInfo, ScopeSegment,
    SemanticModel, SymbolEvent, Usage,
};
use crate::writer::Writer;
use lsif_dom::Graph;
use lsif_type::{
    DiagnosticResult, Document, DocumentLinkResult, DocumentSymbolResult, DocumentSymbols, Edge,
    EdgeData, Event, EventKind, EventScope, FoldingRangeResult, Group, Id, ItemProperty, LspRange,
    MetaData, PositionEncoding, Project, Range, RangeBasedDocumentSymbol, RangeTag, SymbolTag,
    TextTag, ToolState, Vertex,
};
use tracing::{debug, info};

/// Counts reported at the end of a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub elements: usize,
    pub documents: usize,
    pub ranges: usize,
    pub hubs: usize,
    pub monikers: usize,
    pub attaches: usize,
    /// Exported declarations that fell back to a local moniker.
    pub fallbacks: usize,
    pub items: usize,
}

#[derive(Debug)]
pub struct Outcome<E> {
    pub summary: Summary,
    pub graph: Graph,
    pub emitter: E,
}

/// Index `model` and hand every element to `emitter`.
pub fn index<M, E>(model: &M, config: &IndexerConfig, emitter: E) -> Result<Outcome<E>, IndexError>
where
    M: SemanticModel + ?Sized,
    E: Emitter,
{
    Indexer::new(config, emitter).run(model)
}

/// Ranges of the document being indexed.
#[derive(Debug)]
struct Shard {
    id: Id,
    ranges: Vec<Id>,
    definitions: Vec<Id>,
}

#[derive(Debug)]
pub struct Indexer<'c, E: Emitter> {
    config: &'c IndexerConfig,
    writer: Writer<E>,
    monikers: MonikerEngine,
    results: ResultSets,
    items: ItemBatcher,
    documents: usize,
    ranges: usize,
}

impl<'c, E: Emitter> Indexer<'c, E> {
    pub fn new(config: &'c IndexerConfig, emitter: E) -> Self {
        Indexer {
            config,
            writer: Writer::new(config.id_allocator(), emitter),
            monikers: MonikerEngine::new(config.scheme.as_str()),
            results: ResultSets::new(),
            items: ItemBatcher::new(),
            documents: 0,
            ranges: 0,
        }
    }

    pub fn run<M: SemanticModel + ?Sized>(mut self, model: &M) -> Result<Outcome<E>, IndexError> {
        let config = self.config;
        self.metadata()?;
        let group = match &config.group {
            Some(group) => Some(self.group(group)?),
            None => None,
        };
        let project = self.project(model.project(), group.as_ref())?;

        let mut documents = Vec::new();
        for document in model.documents() {
            let uri = document.uri.clone();
            documents.push(self.document(document).map_err(|e| e.in_document(&uri))?);
        }
        if !documents.is_empty() {
            self.writer.edge(Edge::contains(project.clone(), documents))?;
        }
        self.event(EventScope::Project, EventKind::End, &project)?;
        if let Some(group) = &group {
            self.event(EventScope::Group, EventKind::End, group)?;
        }
        self.writer.flush()?;

        let summary = self.summary();
        info!(
            elements = summary.elements,
            documents = summary.documents,
            hubs = summary.hubs,
            monikers = summary.monikers,
            fallbacks = summary.fallbacks,
            "index complete"
        );
        let (graph, emitter) = self.writer.into_parts();
        Ok(Outcome {
            summary,
            graph,
            emitter,
        })
    }

    fn summary(&self) -> Summary {
        Summary {
            elements: self.writer.len(),
            documents: self.documents,
            ranges: self.ranges,
            hubs: self.results.len(),
            monikers: self.monikers.monikers(),
            attaches: self.monikers.attaches(),
            fallbacks: self.monikers.fallbacks(),
            items: self.items.flushed(),
        }
    }

    fn metadata(&mut self) -> Result<Id, IndexError> {
        self.writer.vertex(Vertex::MetaData(MetaData {
            version: self.config.version.clone(),
            position_encoding: PositionEncoding::Utf16,
            tool_info: Some(self.config.tool_info.clone()),
            tool_state: self
                .config
                .tool_state
                .clone()
                .map(|data| ToolState { data: Some(data) }),
        }))
    }

    fn group(&mut self, config: &GroupConfig) -> Result<Id, IndexError> {
        let id = self.writer.vertex(Vertex::Group(Group {
            uri: config.uri.clone(),
            conflict_resolution: config.conflict_resolution,
            name: config.name.clone(),
            root_uri: config.root_uri.clone(),
            description: config.description.clone(),
            repository: config.repository.clone(),
        }))?;
        self.event(EventScope::Group, EventKind::Begin, &id)?;
        Ok(id)
    }

    fn project(&mut self, info: ProjectInfo, group: Option<&Id>) -> Result<Id, IndexError> {
        let id = self.writer.vertex(Vertex::Project(Project {
            kind: info.kind,
            name: info.name,
            resource: info.resource,
            contents: info.contents,
        }))?;
        if let Some(group) = group {
            self.writer.edge(Edge::belongs_to(id.clone(), group.clone()))?;
        }
        self.event(EventScope::Project, EventKind::Begin, &id)?;
        Ok(id)
    }

    fn event(&mut self, scope: EventScope, kind: EventKind, data: &Id) -> Result<Id, IndexError> {
        self.writer.vertex(Vertex::Event(Event {
            scope,
            kind,
            data: data.clone(),
        }))
    }

    fn document(&mut self, document: AnalyzedDocument) -> Result<Id, IndexError> {
        let contents = if self.config.embed_contents {
            document.contents.clone()
        } else {
            None
        };
        let id = self.writer.vertex(Vertex::Document(Document {
            uri: document.uri.clone(),
            language_id: document.language_id.clone(),
            contents,
        }))?;
        self.event(EventScope::Document, EventKind::Begin, &id)?;

        let mut shard = Shard {
            id: id.clone(),
            ranges: Vec::new(),
            definitions: Vec::new(),
        };
        for event in &document.events {
            self.symbol_event(&document, &mut shard, event)
                .map_err(|e| e.in_symbol(&document.uri, event.symbol()))?;
        }
        let items = self.items.flush(&mut self.writer, &shard.id)?;
        let ranges = shard.ranges.len();
        if !shard.ranges.is_empty() {
            self.writer.edge(Edge::contains(id.clone(), shard.ranges))?;
        }
        self.document_results(&id, document, shard.definitions)?;
        self.event(EventScope::Document, EventKind::End, &id)?;

        self.documents += 1;
        info!(document = %id, ranges, items, "indexed document");
        Ok(id)
    }

    fn document_results(
        &mut self,
        id: &Id,
        document: AnalyzedDocument,
        definitions: Vec<Id>,
    ) -> Result<(), IndexError> {
        if !document.diagnostics.is_empty() {
            let result = self.writer.vertex(Vertex::DiagnosticResult(DiagnosticResult {
                result: document.diagnostics,
            }))?;
            self.writer
                .edge(Edge::Diagnostic(EdgeData::new(id.clone(), result)))?;
        }
        if !document.folding_ranges.is_empty() {
            let result = self.writer.vertex(Vertex::FoldingRangeResult(FoldingRangeResult {
                result: document.folding_ranges,
            }))?;
            self.writer
                .edge(Edge::FoldingRange(EdgeData::new(id.clone(), result)))?;
        }
        if !document.document_links.is_empty() {
            let result = self.writer.vertex(Vertex::DocumentLinkResult(DocumentLinkResult {
                result: document.document_links,
            }))?;
            self.writer
                .edge(Edge::DocumentLink(EdgeData::new(id.clone(), result)))?;
        }

        let symbols = match document.document_symbols {
            Some(symbols) if !symbols.is_empty() => DocumentSymbols::Symbols(symbols),
            Some(_) => return Ok(()),
            None if definitions.is_empty() => return Ok(()),
            None => DocumentSymbols::Ranges(
                definitions
                    .into_iter()
                    .map(|id| RangeBasedDocumentSymbol { id, children: None })
                    .collect(),
            ),
        };
        let result = self
            .writer
            .vertex(Vertex::DocumentSymbolResult(DocumentSymbolResult { result: symbols }))?;
        self.writer
            .edge(Edge::DocumentSymbol(EdgeData::new(id.clone(), result)))?;
        Ok(())
    }

    fn symbol_event(
        &mut self,
        document: &AnalyzedDocument,
        shard: &mut Shard,
        event: &SymbolEvent,
    ) -> Result<(), IndexError> {
        match event {
            SymbolEvent::Declaration(decl) => self.declaration(document, shard, decl),
            SymbolEvent::Usage(usage) => self.usage(shard, usage),
            SymbolEvent::ExportAlias(alias) => self.export_alias(document, shard, alias),
            SymbolEvent::Exposure(exposure) => self.exposure(document, exposure),
        }
    }

    fn range(
        &mut self,
        shard: &mut Shard,
        range: LspRange,
        tag: RangeTag,
    ) -> Result<Id, IndexError> {
        let id = self.writer.vertex(Vertex::Range(Range::new(range, Some(tag))))?;
        shard.ranges.push(id.clone());
        self.ranges += 1;
        Ok(id)
    }

    fn declaration(
        &mut self,
        document: &AnalyzedDocument,
        shard: &mut Shard,
        decl: &Declaration,
    ) -> Result<(), IndexError> {
        let tag = SymbolTag {
            text: decl.name.clone(),
            kind: decl.kind,
            deprecated: decl.deprecated.then_some(true),
            full_range: decl.full_range.unwrap_or(decl.range),
            detail: decl.detail.clone(),
        };
        let (tag, property) = if decl.is_definition {
            (RangeTag::Definition(tag), ItemProperty::Definitions)
        } else {
            (RangeTag::Declaration(tag), ItemProperty::Declarations)
        };
        let range = self.range(shard, decl.range, tag)?;
        if decl.is_definition {
            shard.definitions.push(range.clone());
        }

        let identity = self.monikers.classify(&document.module, decl);
        let hub = self.results.link(&mut self.writer, &range, &decl.symbol)?;
        self.monikers
            .place_site(&mut self.writer, &hub.id, &mut hub.monikers, identity)?;
        if let Some(text) = &decl.hover {
            hub.hover(&mut self.writer, &document.language_id, text)?;
        }
        let definitions = hub.definition_result(&mut self.writer)?;
        let references = hub.reference_result(&mut self.writer)?;
        self.items.add(&definitions, None, range.clone());
        self.items.add(&references, Some(property), range.clone());

        for implemented in &decl.implements {
            let target = self.results.hub(&mut self.writer, implemented)?;
            let implementations = target.implementation_result(&mut self.writer)?;
            self.items.add(&implementations, None, range.clone());
        }
        Ok(())
    }

    fn usage(&mut self, shard: &mut Shard, usage: &Usage) -> Result<(), IndexError> {
        let tag = RangeTag::Reference(TextTag {
            text: usage.text.clone().unwrap_or_default(),
        });
        let range = self.range(shard, usage.range, tag)?;
        let hub = self.results.link(&mut self.writer, &range, &usage.symbol)?;
        let references = hub.reference_result(&mut self.writer)?;
        self.items
            .add(&references, Some(ItemProperty::References), range);
        Ok(())
    }

    fn export_alias(
        &mut self,
        document: &AnalyzedDocument,
        shard: &mut Shard,
        alias: &ExportAlias,
    ) -> Result<(), IndexError> {
        let tag = RangeTag::Reference(TextTag {
            text: alias.name.clone(),
        });
        let range = self.range(shard, alias.range, tag)?;

        let (hub, created) = self
            .results
            .alias(&mut self.writer, &alias.symbol, &alias.name)?;
        if created {
            let identity = Identity::export(
                &document.module,
                &[ScopeSegment::Name(alias.name.clone())],
            );
            self.monikers
                .place_site(&mut self.writer, &hub.id, &mut hub.monikers, identity)?;
            if let Some(text) = &alias.hover {
                hub.hover(&mut self.writer, &document.language_id, text)?;
            }
        }
        let alias_hub = hub.id.clone();
        self.writer.edge(Edge::next(range.clone(), alias_hub))?;

        let canonical = self.results.hub(&mut self.writer, &alias.symbol)?;
        let references = canonical.reference_result(&mut self.writer)?;
        self.items
            .add(&references, Some(ItemProperty::References), range);

        for member in &alias.members {
            let mut path = vec![ScopeSegment::Name(alias.name.clone())];
            path.extend(member.path.iter().cloned());
            let hub = self.results.hub(&mut self.writer, &member.symbol)?;
            self.monikers.place_reachable(
                &mut self.writer,
                &hub.id,
                &mut hub.monikers,
                Identity::export(&document.module, &path),
            )?;
        }
        debug!(symbol = %alias.symbol, name = %alias.name, created, "export alias");
        Ok(())
    }

    fn exposure(
        &mut self,
        document: &AnalyzedDocument,
        exposure: &Exposure,
    ) -> Result<(), IndexError> {
        let hub = self.results.hub(&mut self.writer, &exposure.symbol)?;
        self.monikers.place_reachable(
            &mut self.writer,
            &hub.id,
            &mut hub.monikers,
            Identity::export(&document.module, &exposure.path),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::MemoryEmitter;
    use crate::fixture::FixtureModel;
    use lsif_type::ElementTrait;
    use pretty_assertions::assert_eq;

    fn model(events: &str) -> FixtureModel {
        FixtureModel::from_json(&format!(
            r#"{{
                "project": {{"name": "demo", "kind": "typescript"}},
                "documents": [{{
                    "uri": "file:///demo/a.ts", "languageId": "typescript", "module": "a",
                    "events": {}
                }}]
            }}"#,
            events
        ))
        .unwrap()
    }

    fn labels(graph: &Graph) -> Vec<&'static str> {
        graph.iter().map(|e| e.element.get_label()).collect()
    }

    #[test]
    fn empty_document_pass_structure() {
        let config = IndexerConfig::default();
        let outcome = index(&model("[]"), &config, MemoryEmitter::default()).unwrap();
        assert_eq!(
            labels(&outcome.graph),
            vec![
                "metaData", "project", "$event", "document", "$event", "$event", "contains",
                "$event"
            ]
        );
        assert_eq!(outcome.summary.documents, 1);
        assert_eq!(outcome.summary.elements, 8);
        assert_eq!(outcome.emitter.entries.len(), 8);
    }

    #[test]
    fn group_wraps_the_project() {
        let config: IndexerConfig = toml::from_str(
            r#"
[group]
uri = "file:///demo"
name = "demo"
root_uri = "file:///demo"
"#,
        )
        .unwrap();
        let outcome = index(&model("[]"), &config, MemoryEmitter::default()).unwrap();
        let labels = labels(&outcome.graph);
        assert_eq!(&labels[..5], &["metaData", "group", "$event", "project", "belongsTo"]);
        assert_eq!(labels.last(), Some(&"$event"));
    }

    #[test]
    fn declaration_and_usage_share_results() {
        let config = IndexerConfig::default();
        let events = r#"[
            {"event": "declaration", "symbol": "s1", "name": "x", "kind": 13, "scope": [],
             "visibility": "exported", "text": "x = 10", "hover": "const x: number",
             "range": {"start": {"line": 0, "character": 13}, "end": {"line": 0, "character": 14}}},
            {"event": "usage", "symbol": "s1", "text": "x",
             "range": {"start": {"line": 1, "character": 0}, "end": {"line": 1, "character": 1}}}
        ]"#;
        let outcome = index(&model(events), &config, MemoryEmitter::default()).unwrap();
        let summary = outcome.summary;
        assert_eq!(summary.ranges, 2);
        assert_eq!(summary.hubs, 1);
        assert_eq!(summary.monikers, 1);
        assert_eq!(summary.attaches, 0);
        // definition result, reference result with definitions and references
        assert_eq!(summary.items, 3);

        let counts = outcome.graph.label_counts();
        assert_eq!(counts.get("next"), Some(&2));
        assert_eq!(counts.get("hoverResult"), Some(&1));
        assert_eq!(counts.get("documentSymbolResult"), Some(&1));
    }

    #[test]
    fn failures_name_document_and_symbol() {
        let config = IndexerConfig::default();
        // line is out of uinteger range
        let events = r#"[
            {"event": "usage", "symbol": "s9",
             "range": {"start": {"line": 4294967295, "character": 0},
                       "end": {"line": 0, "character": 1}}}
        ]"#;
        let error = index(&model(events), &config, MemoryEmitter::default()).unwrap_err();
        assert!(matches!(error, IndexError::Symbol { ref symbol, .. } if symbol == "s9"));
        assert!(matches!(error.root_cause(), IndexError::Schema { label: "range", .. }));
    }
}
