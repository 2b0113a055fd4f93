use crate::{
    Diagnostic, DocumentLink, DocumentSymbol, ElementTrait, FoldingRange, Hover, Id, LspRange,
    Position, SymbolKind, UnknownLabel, Uri,
};
use serde_derive::{Deserialize, Serialize};

// macros ==========================================================================================
macro_rules! vertices {
    ($($(#[$meta:meta])* $variant:ident($payload:ty) => $label:literal),* $(,)?) => {
        /// All available vertex types.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "label")]
        pub enum Vertex {
            $(
                $(#[$meta])*
                #[serde(rename = $label)]
                $variant($payload),
            )*
        }

        /// Discriminant of [`Vertex`], spelled as on the wire.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum VertexLabel {
            $($variant,)*
        }

        impl VertexLabel {
            pub const ALL: &'static [VertexLabel] = &[$(VertexLabel::$variant,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(VertexLabel::$variant => $label,)*
                }
            }
        }

        impl std::str::FromStr for VertexLabel {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(VertexLabel::$variant),)*
                    _ => Err(UnknownLabel(s.to_owned())),
                }
            }
        }

        impl Vertex {
            pub fn label(&self) -> VertexLabel {
                match self {
                    $(Vertex::$variant(_) => VertexLabel::$variant,)*
                }
            }
        }
    };
}

vertices!(
    MetaData(MetaData) => "metaData",
    Event(Event) => "$event",
    Project(Project) => "project",
    Group(Group) => "group",
    Document(Document) => "document",
    Moniker(Moniker) => "moniker",
    PackageInformation(PackageInformation) => "packageInformation",
    /// https://github.com/Microsoft/language-server-protocol/blob/master/indexFormat/specification.md#result-set
    ResultSet(ResultSet) => "resultSet",
    /// https://github.com/Microsoft/language-server-protocol/blob/master/indexFormat/specification.md#ranges
    Range(Range) => "range",
    // Method results
    DocumentSymbolResult(DocumentSymbolResult) => "documentSymbolResult",
    FoldingRangeResult(FoldingRangeResult) => "foldingRangeResult",
    DocumentLinkResult(DocumentLinkResult) => "documentLinkResult",
    DiagnosticResult(DiagnosticResult) => "diagnosticResult",
    DeclarationResult(DeclarationResult) => "declarationResult",
    DefinitionResult(DefinitionResult) => "definitionResult",
    TypeDefinitionResult(TypeDefinitionResult) => "typeDefinitionResult",
    HoverResult(HoverResult) => "hoverResult",
    ReferenceResult(ReferenceResult) => "referenceResult",
    ImplementationResult(ImplementationResult) => "implementationResult",
);

impl ElementTrait for Vertex {
    fn get_type(&self) -> &'static str {
        "vertex"
    }

    fn get_label(&self) -> &'static str {
        self.label().as_str()
    }
}

// Data Structure types ============================================================================
// Common ------------------------------------------------------------------------------------------
/// Repository like git
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    // avoid to use 'type' for reservation by rust
    /// kind of repo like `git`
    #[serde(rename = "type")]
    pub repo_type: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_id: Option<String>,
}

/// common type for language id
pub type LanguageId = String;

// Each types --------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionEncoding {
    #[serde(rename = "utf-16")]
    Utf16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    /// The version of the LSIF format using semver notation.
    pub version: String,
    pub position_encoding: PositionEncoding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_info: Option<ToolInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_state: Option<ToolState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

/// Opaque tool state. `data` usually carries a key identifying the dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Begin,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventScope {
    Group,
    Project,
    Document,
    MonikerAttach,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub scope: EventScope,
    pub kind: EventKind,
    /// The id of the vertex the event is issued for.
    pub data: Id,
}

/// How a store reconciles a group that already exists when a new dump arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictResolution {
    #[serde(rename = "takeDump")]
    TakeDump,
    #[serde(rename = "takeDB")]
    TakeDB,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub uri: Uri,
    pub conflict_resolution: ConflictResolution,
    pub name: String,
    pub root_uri: Uri,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
}

/// https://github.com/Microsoft/language-server-protocol/blob/master/indexFormat/specification.md#the-project-vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub kind: LanguageId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Uri>,
    /// Project file content, `base64` encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub uri: Uri,
    pub language_id: LanguageId,
    /// Document content, `base64` encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MonikerKind {
    Import,
    Export,
    Local,
}

/// Scope in which a moniker's `scheme` + `identifier` pair is unique,
/// ordered from the narrowest to the widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UniquenessLevel {
    Document,
    Project,
    Group,
    Scheme,
    Global,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Moniker {
    pub scheme: String,
    pub identifier: String,
    pub unique: UniquenessLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MonikerKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageInformation {
    pub name: String,
    pub manager: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<Uri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {}

/// A range inside a document. Like locations, ranges carry no uri; they are
/// connected to their document with a `contains` edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<RangeTag>,
}

impl Range {
    pub fn new(range: LspRange, tag: Option<RangeTag>) -> Self {
        Range {
            start: range.start,
            end: range.end,
            tag,
        }
    }

    pub fn lsp_range(&self) -> LspRange {
        LspRange::new(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RangeTag {
    Declaration(SymbolTag),
    Definition(SymbolTag),
    Reference(TextTag),
    Unknown(TextTag),
}

/// Meta data of a declaration or definition range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolTag {
    pub text: String,
    pub kind: SymbolKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Must include the tagged range.
    pub full_range: LspRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextTag {
    pub text: String,
}

/// A range based document symbol. This allows to reuse already
/// emitted ranges with a `declaration` tag in a document symbol
/// result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBasedDocumentSymbol {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RangeBasedDocumentSymbol>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentSymbols {
    Ranges(Vec<RangeBasedDocumentSymbol>),
    Symbols(Vec<DocumentSymbol>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSymbolResult {
    pub result: DocumentSymbols,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    pub result: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldingRangeResult {
    pub result: Vec<FoldingRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLinkResult {
    pub result: Vec<DocumentLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverResult {
    pub result: Hover,
}

// Marker results. Their members are expressed with `item` edges only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationResult {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionResult {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinitionResult {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceResult {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationResult {}
