//! What the indexer needs from a language's semantic analyzer.
//!
//! An analyzer reports, per document, an ordered stream of [`SymbolEvent`]s
//! keyed by symbol keys of its own choosing. Keys only have to be stable for
//! the duration of one indexing pass. The LSP payloads (diagnostics, folding
//! ranges, links, symbols) are stored verbatim.

use lsif_type::{
    Diagnostic, DocumentLink, DocumentSymbol, FoldingRange, LspRange, PackageInformation,
    SymbolKind, Uri,
};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// The analyzer's key of a symbol.
pub type SymbolKey = String;

pub trait SemanticModel {
    fn project(&self) -> ProjectInfo;

    /// Analyzed documents in indexing order.
    fn documents(&self) -> Box<dyn Iterator<Item = AnalyzedDocument> + '_>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub name: String,
    /// Language tag, e.g. `typescript`.
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Uri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedDocument {
    pub uri: Uri,
    pub language_id: String,
    /// Root of every export path declared in this document.
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(default)]
    pub events: Vec<SymbolEvent>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(default)]
    pub folding_ranges: Vec<FoldingRange>,
    #[serde(default)]
    pub document_links: Vec<DocumentLink>,
    /// Language symbols. When absent, the document symbol result is built
    /// from the definition ranges of the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_symbols: Option<Vec<DocumentSymbol>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SymbolEvent {
    Declaration(Declaration),
    Usage(Usage),
    ExportAlias(ExportAlias),
    Exposure(Exposure),
}

impl SymbolEvent {
    /// The symbol the event is about.
    pub fn symbol(&self) -> &str {
        match self {
            SymbolEvent::Declaration(d) => &d.symbol,
            SymbolEvent::Usage(u) => &u.symbol,
            SymbolEvent::ExportAlias(a) => &a.symbol,
            SymbolEvent::Exposure(e) => &e.symbol,
        }
    }
}

/// One element of an enclosing container chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeSegment {
    Name(String),
    /// The n-th alternative of an anonymous composite type.
    Alternative(usize),
}

impl fmt::Display for ScopeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeSegment::Name(name) => f.write_str(name),
            ScopeSegment::Alternative(n) => write!(f, "{}L", n),
        }
    }
}

impl From<&str> for ScopeSegment {
    fn from(name: &str) -> Self {
        ScopeSegment::Name(name.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    /// Reachable from the public surface of the compilation unit.
    Exported,
    Local,
    /// Brought in from `module`, where it is exported at `path`.
    Imported {
        module: String,
        #[serde(default)]
        path: Vec<ScopeSegment>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        package: Option<PackageInformation>,
    },
}

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub symbol: SymbolKey,
    pub name: String,
    pub kind: SymbolKind,
    /// Enclosing exported containers, outermost first. `None` when the
    /// analyzer cannot tell, e.g. for compiler generated constructs.
    #[serde(default)]
    pub scope: Option<Vec<ScopeSegment>>,
    pub visibility: Visibility,
    pub range: LspRange,
    /// Range including trivia. Defaults to `range`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_range: Option<LspRange>,
    /// Source text of the declaration, hashed into local monikers.
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default = "yes")]
    pub is_definition: bool,
    /// Symbols this declaration implements.
    #[serde(default)]
    pub implements: Vec<SymbolKey>,
}

impl Declaration {
    /// Export path below the module: scope chain plus own name.
    pub fn export_path(&self) -> Option<Vec<ScopeSegment>> {
        let mut path = self.scope.clone()?;
        if !self.name.is_empty() {
            path.push(ScopeSegment::Name(self.name.clone()));
        }
        Some(path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub symbol: SymbolKey,
    pub range: LspRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// `export default foo`, `export = foo`, `export { foo as bar }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportAlias {
    /// The aliased symbol.
    pub symbol: SymbolKey,
    /// Exported name.
    pub name: String,
    pub range: LspRange,
    /// Hover shown for the alias instead of the symbol's own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
    #[serde(default)]
    pub members: Vec<AliasMember>,
}

/// A member reachable through an alias, at `path` below the exported name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasMember {
    pub symbol: SymbolKey,
    pub path: Vec<ScopeSegment>,
}

/// A symbol that is not exported itself but reachable from the public
/// surface at `path`, e.g. a property of an exported class's property type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    pub symbol: SymbolKey,
    pub path: Vec<ScopeSegment>,
}
