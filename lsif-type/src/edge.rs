use crate::{ElementTrait, Id, UnknownLabel};
use serde_derive::{Deserialize, Serialize};

macro_rules! edges {
    ($($(#[$meta:meta])* $variant:ident($payload:ty) => $label:literal),* $(,)?) => {
        /// All available edge types.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(tag = "label")]
        pub enum Edge {
            $(
                $(#[$meta])*
                #[serde(rename = $label)]
                $variant($payload),
            )*
        }

        /// Discriminant of [`Edge`], spelled as on the wire.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum EdgeLabel {
            $($variant,)*
        }

        impl EdgeLabel {
            pub const ALL: &'static [EdgeLabel] = &[$(EdgeLabel::$variant,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(EdgeLabel::$variant => $label,)*
                }
            }
        }

        impl std::str::FromStr for EdgeLabel {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(EdgeLabel::$variant),)*
                    _ => Err(UnknownLabel(s.to_owned())),
                }
            }
        }

        impl Edge {
            pub fn label(&self) -> EdgeLabel {
                match self {
                    $(Edge::$variant(_) => EdgeLabel::$variant,)*
                }
            }
        }
    };
}

edges!(
    /// `Project` -> `Document`, `Document` -> `Range`
    Contains(EdgeDataMultiIn) => "contains",
    Item(Item) => "item",
    /// `Range` -> `ResultSet`, `ResultSet` -> `ResultSet`
    Next(EdgeData) => "next",
    Moniker(EdgeData) => "moniker",
    /// `Moniker` -> `Moniker`
    Attach(EdgeData) => "attach",
    PackageInformation(EdgeData) => "packageInformation",
    /// `Project` -> `Group`
    BelongsTo(EdgeData) => "belongsTo",

    // Methods
    DocumentSymbol(EdgeData) => "textDocument/documentSymbol",
    FoldingRange(EdgeData) => "textDocument/foldingRange",
    DocumentLink(EdgeData) => "textDocument/documentLink",
    Diagnostic(EdgeData) => "textDocument/diagnostic",
    Definition(EdgeData) => "textDocument/definition",
    Declaration(EdgeData) => "textDocument/declaration",
    TypeDefinition(EdgeData) => "textDocument/typeDefinition",
    Hover(EdgeData) => "textDocument/hover",
    References(EdgeData) => "textDocument/references",
    Implementation(EdgeData) => "textDocument/implementation",
);

impl EdgeLabel {
    /// Whether edges with this label carry `inVs` instead of `inV`.
    pub fn is_one_to_many(self) -> bool {
        matches!(self, EdgeLabel::Contains | EdgeLabel::Item)
    }
}

impl ElementTrait for Edge {
    fn get_type(&self) -> &'static str {
        "edge"
    }

    fn get_label(&self) -> &'static str {
        self.label().as_str()
    }
}

/// A 1:1 edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    pub out_v: Id,
    pub in_v: Id,
}

impl EdgeData {
    pub fn new(out_v: Id, in_v: Id) -> Self {
        EdgeData { out_v, in_v }
    }
}

/// A 1:N edge. The order of `in_vs` is emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDataMultiIn {
    pub out_v: Id,
    pub in_vs: Vec<Id>,
}

/// Which logical subset of the target result an `item` batch contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemProperty {
    Declarations,
    Definitions,
    References,
    ReferenceResults,
    ReferenceLinks,
    ImplementationResults,
    ImplementationLinks,
}

impl ItemProperty {
    pub const ALL: &'static [ItemProperty] = &[
        ItemProperty::Declarations,
        ItemProperty::Definitions,
        ItemProperty::References,
        ItemProperty::ReferenceResults,
        ItemProperty::ReferenceLinks,
        ItemProperty::ImplementationResults,
        ItemProperty::ImplementationLinks,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemProperty::Declarations => "declarations",
            ItemProperty::Definitions => "definitions",
            ItemProperty::References => "references",
            ItemProperty::ReferenceResults => "referenceResults",
            ItemProperty::ReferenceLinks => "referenceLinks",
            ItemProperty::ImplementationResults => "implementationResults",
            ItemProperty::ImplementationLinks => "implementationLinks",
        }
    }
}

/// An `item` edge: a batch of members of one result, computed within `shard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub out_v: Id,
    pub in_vs: Vec<Id>,
    pub shard: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<ItemProperty>,
}

impl Edge {
    pub fn contains(out_v: Id, in_vs: Vec<Id>) -> Self {
        Edge::Contains(EdgeDataMultiIn { out_v, in_vs })
    }

    pub fn item(out_v: Id, in_vs: Vec<Id>, shard: Id, property: Option<ItemProperty>) -> Self {
        Edge::Item(Item {
            out_v,
            in_vs,
            shard,
            property,
        })
    }

    pub fn next(out_v: Id, in_v: Id) -> Self {
        Edge::Next(EdgeData::new(out_v, in_v))
    }

    pub fn moniker(out_v: Id, in_v: Id) -> Self {
        Edge::Moniker(EdgeData::new(out_v, in_v))
    }

    pub fn attach(out_v: Id, in_v: Id) -> Self {
        Edge::Attach(EdgeData::new(out_v, in_v))
    }

    pub fn package_information(out_v: Id, in_v: Id) -> Self {
        Edge::PackageInformation(EdgeData::new(out_v, in_v))
    }

    pub fn belongs_to(out_v: Id, in_v: Id) -> Self {
        Edge::BelongsTo(EdgeData::new(out_v, in_v))
    }

    /// The 1:1 edge for `label`, or `None` for the 1:N labels.
    pub fn one_to_one(label: EdgeLabel, out_v: Id, in_v: Id) -> Option<Self> {
        let data = EdgeData::new(out_v, in_v);
        let edge = match label {
            EdgeLabel::Contains | EdgeLabel::Item => return None,
            EdgeLabel::Next => Edge::Next(data),
            EdgeLabel::Moniker => Edge::Moniker(data),
            EdgeLabel::Attach => Edge::Attach(data),
            EdgeLabel::PackageInformation => Edge::PackageInformation(data),
            EdgeLabel::BelongsTo => Edge::BelongsTo(data),
            EdgeLabel::DocumentSymbol => Edge::DocumentSymbol(data),
            EdgeLabel::FoldingRange => Edge::FoldingRange(data),
            EdgeLabel::DocumentLink => Edge::DocumentLink(data),
            EdgeLabel::Diagnostic => Edge::Diagnostic(data),
            EdgeLabel::Definition => Edge::Definition(data),
            EdgeLabel::Declaration => Edge::Declaration(data),
            EdgeLabel::TypeDefinition => Edge::TypeDefinition(data),
            EdgeLabel::Hover => Edge::Hover(data),
            EdgeLabel::References => Edge::References(data),
            EdgeLabel::Implementation => Edge::Implementation(data),
        };
        Some(edge)
    }

    pub fn out_v(&self) -> &Id {
        match self {
            Edge::Contains(data) => &data.out_v,
            Edge::Item(item) => &item.out_v,
            Edge::Next(data)
            | Edge::Moniker(data)
            | Edge::Attach(data)
            | Edge::PackageInformation(data)
            | Edge::BelongsTo(data)
            | Edge::DocumentSymbol(data)
            | Edge::FoldingRange(data)
            | Edge::DocumentLink(data)
            | Edge::Diagnostic(data)
            | Edge::Definition(data)
            | Edge::Declaration(data)
            | Edge::TypeDefinition(data)
            | Edge::Hover(data)
            | Edge::References(data)
            | Edge::Implementation(data) => &data.out_v,
        }
    }

    /// Target ids, in order.
    pub fn in_vs(&self) -> Vec<&Id> {
        match self {
            Edge::Contains(data) => data.in_vs.iter().collect(),
            Edge::Item(item) => item.in_vs.iter().collect(),
            Edge::Next(data)
            | Edge::Moniker(data)
            | Edge::Attach(data)
            | Edge::PackageInformation(data)
            | Edge::BelongsTo(data)
            | Edge::DocumentSymbol(data)
            | Edge::FoldingRange(data)
            | Edge::DocumentLink(data)
            | Edge::Diagnostic(data)
            | Edge::Definition(data)
            | Edge::Declaration(data)
            | Edge::TypeDefinition(data)
            | Edge::Hover(data)
            | Edge::References(data)
            | Edge::Implementation(data) => vec![&data.in_v],
        }
    }

    /// `out_v`, every target and, for items, the shard.
    pub fn referenced_ids(&self) -> Vec<&Id> {
        let mut ids = vec![self.out_v()];
        ids.extend(self.in_vs());
        if let Edge::Item(item) = self {
            ids.push(&item.shard);
        }
        ids
    }
}
