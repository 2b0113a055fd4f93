//! Field-level validation of untyped LSIF elements.
//!
//! A dump is untrusted input. Each line is first parsed into a
//! [`serde_json::Value`], checked here against the descriptor of its variant,
//! and only then narrowed into the typed [`Entry`](crate::Entry). The
//! descriptor table is built once per process and maps every vertex and edge
//! label to the properties it requires.

use crate::{
    Diagnostic, DocumentLink, DocumentSymbol, EdgeLabel, FoldingRange, Hover, ItemProperty,
    VertexLabel, MAX_NUMERIC_ID, POSITION_ENCODING,
};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::BitOr;

/// Independent admissibility bits of a property.
///
/// `OPTIONAL` lets the key be absent, `UNDEFINED` tolerates absence even for a
/// property that is otherwise required, `NULL` accepts an explicit `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropertyFlags(u8);

impl PropertyFlags {
    pub const NONE: PropertyFlags = PropertyFlags(0);
    pub const OPTIONAL: PropertyFlags = PropertyFlags(1);
    pub const UNDEFINED: PropertyFlags = PropertyFlags(2);
    pub const NULL: PropertyFlags = PropertyFlags(4);

    pub fn is_optional(self) -> bool {
        self.0 & Self::OPTIONAL.0 != 0
    }

    pub fn is_undefined(self) -> bool {
        self.0 & Self::UNDEFINED.0 != 0
    }

    pub fn is_null(self) -> bool {
        self.0 & Self::NULL.0 != 0
    }
}

impl BitOr for PropertyFlags {
    type Output = PropertyFlags;

    fn bitor(self, rhs: PropertyFlags) -> PropertyFlags {
        PropertyFlags(self.0 | rhs.0)
    }
}

/// The first reason an element failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("element is not a JSON object")]
    NotAnObject,
    #[error("missing required property `{field}`")]
    Missing { field: String },
    #[error("property `{field}` must not be null")]
    Null { field: String },
    #[error("property `{field}` is not a valid {expected}")]
    Invalid { field: String, expected: &'static str },
    #[error("property `{field}` has value {value} which is not a valid {expected}")]
    NotInEnum {
        field: String,
        value: String,
        expected: &'static str,
    },
    #[error("property `{field}` has unknown discriminant {value}")]
    UnknownDiscriminant { field: String, value: String },
}

impl Violation {
    /// Prefix the offending field with the path of the enclosing property.
    fn nested(self, parent: &str) -> Violation {
        let join = |field: String| format!("{}.{}", parent, field);
        match self {
            Violation::NotAnObject => Violation::Invalid {
                field: parent.to_owned(),
                expected: "object",
            },
            Violation::Missing { field } => Violation::Missing { field: join(field) },
            Violation::Null { field } => Violation::Null { field: join(field) },
            Violation::Invalid { field, expected } => Violation::Invalid {
                field: join(field),
                expected,
            },
            Violation::NotInEnum {
                field,
                value,
                expected,
            } => Violation::NotInEnum {
                field: join(field),
                value,
                expected,
            },
            Violation::UnknownDiscriminant { field, value } => Violation::UnknownDiscriminant {
                field: join(field),
                value,
            },
        }
    }

    /// The dotted path of the offending property, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Violation::NotAnObject => None,
            Violation::Missing { field }
            | Violation::Null { field }
            | Violation::Invalid { field, .. }
            | Violation::NotInEnum { field, .. }
            | Violation::UnknownDiscriminant { field, .. } => Some(field),
        }
    }
}

/// Discriminant of a validated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementLabel {
    Vertex(VertexLabel),
    Edge(EdgeLabel),
}

#[derive(Clone)]
enum Check {
    Id,
    Uinteger,
    String,
    Boolean,
    StringArray,
    SymbolKind,
    IdArray,
    Literal(&'static str),
    OneOf {
        expected: &'static str,
        values: HashSet<&'static str>,
    },
    Object(Descriptor),
    /// Narrow on `discriminant`, then validate with the matching variant.
    Tagged {
        discriminant: &'static str,
        variants: HashMap<&'static str, Descriptor>,
    },
    /// Either range based symbols or LSP document symbols, decided by the
    /// first element.
    DocumentSymbols,
    Lsp {
        expected: &'static str,
        is: fn(&Value) -> bool,
    },
}

impl Check {
    fn one_of(expected: &'static str, values: &[&'static str]) -> Check {
        Check::OneOf {
            expected,
            values: values.iter().copied().collect(),
        }
    }

    fn lsp<T: DeserializeOwned>(expected: &'static str) -> Check {
        Check::Lsp {
            expected,
            is: lsp_is::<T>,
        }
    }

    fn validate(&self, field: &str, value: &Value) -> Result<(), Violation> {
        let invalid = |expected: &'static str| Violation::Invalid {
            field: field.to_owned(),
            expected,
        };
        match self {
            Check::Id => is_id(value).then_some(()).ok_or_else(|| invalid("id")),
            Check::Uinteger => is_uinteger(value)
                .then_some(())
                .ok_or_else(|| invalid("unsigned integer")),
            Check::String => value.is_string().then_some(()).ok_or_else(|| invalid("string")),
            Check::Boolean => value.is_boolean().then_some(()).ok_or_else(|| invalid("boolean")),
            Check::StringArray => match value.as_array() {
                Some(items) if items.iter().all(Value::is_string) => Ok(()),
                _ => Err(invalid("string array")),
            },
            Check::SymbolKind => match value.as_i64() {
                Some(n) if i32::try_from(n).is_ok() => Ok(()),
                _ => Err(invalid("symbol kind")),
            },
            Check::IdArray => match value.as_array() {
                Some(items) if items.iter().all(is_id) => Ok(()),
                _ => Err(invalid("id array")),
            },
            Check::Literal(expected) => match value.as_str() {
                Some(s) if s == *expected => Ok(()),
                _ => Err(Violation::NotInEnum {
                    field: field.to_owned(),
                    value: value.to_string(),
                    expected,
                }),
            },
            Check::OneOf { expected, values } => match value.as_str() {
                Some(s) if values.contains(s) => Ok(()),
                _ => Err(Violation::NotInEnum {
                    field: field.to_owned(),
                    value: value.to_string(),
                    expected,
                }),
            },
            Check::Object(descriptor) => descriptor.validate(value).map_err(|v| v.nested(field)),
            Check::Tagged {
                discriminant,
                variants,
            } => {
                let object = value.as_object().ok_or_else(|| invalid("object"))?;
                let tag = object.get(*discriminant);
                match tag.and_then(Value::as_str).and_then(|t| variants.get(t)) {
                    Some(descriptor) => descriptor.validate(value).map_err(|v| v.nested(field)),
                    None => Err(Violation::UnknownDiscriminant {
                        field: format!("{}.{}", field, discriminant),
                        value: tag.map_or_else(|| "undefined".to_owned(), Value::to_string),
                    }),
                }
            }
            Check::DocumentSymbols => {
                let items = value.as_array().ok_or_else(|| invalid("array"))?;
                let range_based = items.first().map_or(false, |first| first.get("id").is_some());
                for (index, item) in items.iter().enumerate() {
                    let valid = if range_based {
                        is_range_based_symbol(item)
                    } else {
                        lsp_is::<DocumentSymbol>(item)
                    };
                    if !valid {
                        return Err(Violation::Invalid {
                            field: format!("{}[{}]", field, index),
                            expected: if range_based {
                                "range based document symbol"
                            } else {
                                "document symbol"
                            },
                        });
                    }
                }
                Ok(())
            }
            Check::Lsp { expected, is } => is(value).then_some(()).ok_or_else(|| invalid(expected)),
        }
    }
}

#[derive(Clone)]
struct Property {
    name: &'static str,
    check: Check,
    flags: PropertyFlags,
}

/// A constraint spanning several properties of one object, checked once
/// every property is valid on its own.
#[derive(Clone, Copy)]
struct Rule {
    field: &'static str,
    expected: &'static str,
    holds: fn(&Map<String, Value>) -> bool,
}

impl Property {
    fn validate(&self, object: &Map<String, Value>) -> Result<(), Violation> {
        match object.get(self.name) {
            None if self.flags.is_optional() || self.flags.is_undefined() => Ok(()),
            None => Err(Violation::Missing {
                field: self.name.to_owned(),
            }),
            Some(Value::Null) if self.flags.is_null() => Ok(()),
            Some(Value::Null) => Err(Violation::Null {
                field: self.name.to_owned(),
            }),
            Some(value) => self.check.validate(self.name, value),
        }
    }
}

/// The property set of one object shape.
#[derive(Clone, Default)]
pub struct Descriptor {
    properties: Vec<Property>,
    rules: Vec<Rule>,
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.properties.iter().map(|p| (p.name, p.flags)))
            .finish()
    }
}

impl Descriptor {
    fn with(mut self, name: &'static str, check: Check, flags: PropertyFlags) -> Self {
        let property = Property { name, check, flags };
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
        self
    }

    fn required(self, name: &'static str, check: Check) -> Self {
        self.with(name, check, PropertyFlags::NONE)
    }

    fn optional(self, name: &'static str, check: Check) -> Self {
        self.with(name, check, PropertyFlags::OPTIONAL)
    }

    fn ensure(
        mut self,
        field: &'static str,
        expected: &'static str,
        holds: fn(&Map<String, Value>) -> bool,
    ) -> Self {
        self.rules.push(Rule {
            field,
            expected,
            holds,
        });
        self
    }

    /// Names of the properties that must be present.
    pub fn required_properties(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties
            .iter()
            .filter(|p| !p.flags.is_optional() && !p.flags.is_undefined())
            .map(|p| p.name)
    }

    pub fn validate(&self, value: &Value) -> Result<(), Violation> {
        let object = value.as_object().ok_or(Violation::NotAnObject)?;
        self.properties.iter().try_for_each(|p| p.validate(object))?;
        match self.rules.iter().find(|rule| !(rule.holds)(object)) {
            Some(rule) => Err(Violation::Invalid {
                field: rule.field.to_owned(),
                expected: rule.expected,
            }),
            None => Ok(()),
        }
    }
}

/// Descriptor table for every vertex and edge variant.
pub struct Schema {
    vertices: HashMap<VertexLabel, Descriptor>,
    edges: HashMap<EdgeLabel, Descriptor>,
}

static SCHEMA: Lazy<Schema> = Lazy::new(Schema::build);

/// The process wide descriptor table.
pub fn schema() -> &'static Schema {
    &SCHEMA
}

/// Validate `value` as any element, narrowing on `type` and then `label`.
pub fn check(value: &Value) -> Result<ElementLabel, Violation> {
    SCHEMA.check(value)
}

/// Discriminated is-a check from raw input.
pub fn is_element(value: &Value) -> bool {
    check(value).is_ok()
}

impl VertexLabel {
    pub fn check(self, value: &Value) -> Result<(), Violation> {
        SCHEMA.vertex(self)?.validate(value)
    }

    pub fn validate(self, value: &Value) -> bool {
        self.check(value).is_ok()
    }
}

impl EdgeLabel {
    pub fn check(self, value: &Value) -> Result<(), Violation> {
        SCHEMA.edge(self)?.validate(value)
    }

    pub fn validate(self, value: &Value) -> bool {
        self.check(value).is_ok()
    }
}

impl Schema {
    pub fn vertex(&self, label: VertexLabel) -> Result<&Descriptor, Violation> {
        self.vertices
            .get(&label)
            .ok_or_else(|| Violation::UnknownDiscriminant {
                field: "label".to_owned(),
                value: label.as_str().to_owned(),
            })
    }

    pub fn edge(&self, label: EdgeLabel) -> Result<&Descriptor, Violation> {
        self.edges
            .get(&label)
            .ok_or_else(|| Violation::UnknownDiscriminant {
                field: "label".to_owned(),
                value: label.as_str().to_owned(),
            })
    }

    pub fn check(&self, value: &Value) -> Result<ElementLabel, Violation> {
        let object = value.as_object().ok_or(Violation::NotAnObject)?;
        let ty = object.get("type").ok_or_else(|| Violation::Missing {
            field: "type".to_owned(),
        })?;
        let unknown = |value: &str| Violation::UnknownDiscriminant {
            field: "label".to_owned(),
            value: format!("{:?}", value),
        };
        match ty.as_str() {
            Some("vertex") => {
                let label = label_of(object)?;
                let label: VertexLabel = label.parse().map_err(|_| unknown(label))?;
                self.vertex(label)?.validate(value)?;
                Ok(ElementLabel::Vertex(label))
            }
            Some("edge") => {
                let label = label_of(object)?;
                let label: EdgeLabel = label.parse().map_err(|_| unknown(label))?;
                self.edge(label)?.validate(value)?;
                Ok(ElementLabel::Edge(label))
            }
            _ => Err(Violation::NotInEnum {
                field: "type".to_owned(),
                value: ty.to_string(),
                expected: "element type",
            }),
        }
    }

    fn build() -> Schema {
        let element = Descriptor::default()
            .required("id", Check::Id)
            .required("type", Check::one_of("element type", &["vertex", "edge"]));

        let vertex_labels: Vec<&'static str> =
            VertexLabel::ALL.iter().map(|l| l.as_str()).collect();
        let v = element
            .clone()
            .required("type", Check::Literal("vertex"))
            .required("label", Check::one_of("vertex label", &vertex_labels));
        let vertices = VertexLabel::ALL
            .iter()
            .map(|label| {
                let base = v.clone().required("label", Check::Literal(label.as_str()));
                (*label, vertex_descriptor(*label, base))
            })
            .collect();

        let edge_labels: Vec<&'static str> = EdgeLabel::ALL.iter().map(|l| l.as_str()).collect();
        let e = element
            .required("type", Check::Literal("edge"))
            .required("label", Check::one_of("edge label", &edge_labels))
            .required("outV", Check::Id);
        let edges = EdgeLabel::ALL
            .iter()
            .map(|label| {
                let base = e.clone().required("label", Check::Literal(label.as_str()));
                (*label, edge_descriptor(*label, base))
            })
            .collect();

        Schema { vertices, edges }
    }
}

fn label_of(object: &Map<String, Value>) -> Result<&str, Violation> {
    let label = object.get("label").ok_or_else(|| Violation::Missing {
        field: "label".to_owned(),
    })?;
    label.as_str().ok_or_else(|| Violation::Invalid {
        field: "label".to_owned(),
        expected: "string",
    })
}

fn vertex_descriptor(label: VertexLabel, v: Descriptor) -> Descriptor {
    match label {
        VertexLabel::MetaData => v
            .required("version", Check::String)
            .required("positionEncoding", Check::Literal(POSITION_ENCODING))
            .optional("toolInfo", Check::Object(tool_info()))
            .optional("toolState", Check::Object(tool_state())),
        VertexLabel::Event => v
            .required(
                "scope",
                Check::one_of(
                    "event scope",
                    &["group", "project", "document", "monikerAttach"],
                ),
            )
            .required("kind", Check::one_of("event kind", &["begin", "end"]))
            .required("data", Check::Id),
        VertexLabel::Project => v
            .required("kind", Check::String)
            .required("name", Check::String)
            .optional("resource", Check::String)
            .optional("contents", Check::String),
        VertexLabel::Group => v
            .required("uri", Check::String)
            .required(
                "conflictResolution",
                Check::one_of("conflict resolution", &["takeDump", "takeDB"]),
            )
            .required("name", Check::String)
            .required("rootUri", Check::String)
            .optional("description", Check::String)
            .optional("repository", Check::Object(repository())),
        VertexLabel::Document => v
            .required("uri", Check::String)
            .required("languageId", Check::String)
            .optional("contents", Check::String),
        VertexLabel::Moniker => v
            .required("scheme", Check::String)
            .required("identifier", Check::String)
            .required(
                "unique",
                Check::one_of(
                    "uniqueness level",
                    &["document", "project", "group", "scheme", "global"],
                ),
            )
            .optional(
                "kind",
                Check::one_of("moniker kind", &["import", "export", "local"]),
            ),
        VertexLabel::PackageInformation => v
            .required("name", Check::String)
            .required("manager", Check::String)
            .optional("uri", Check::String)
            .optional("contents", Check::String)
            .optional("version", Check::String)
            .optional("repository", Check::Object(repository())),
        VertexLabel::Range => v
            .required("start", Check::Object(position()))
            .required("end", Check::Object(position()))
            .optional("tag", range_tag())
            .ensure(
                "tag.fullRange",
                "range enclosing start and end",
                full_range_encloses,
            ),
        VertexLabel::DocumentSymbolResult => v.required("result", Check::DocumentSymbols),
        VertexLabel::FoldingRangeResult => {
            v.required("result", Check::lsp::<Vec<FoldingRange>>("folding range list"))
        }
        VertexLabel::DocumentLinkResult => {
            v.required("result", Check::lsp::<Vec<DocumentLink>>("document link list"))
        }
        VertexLabel::DiagnosticResult => {
            v.required("result", Check::lsp::<Vec<Diagnostic>>("diagnostic list"))
        }
        VertexLabel::HoverResult => v.required("result", Check::lsp::<Hover>("hover")),
        VertexLabel::ResultSet
        | VertexLabel::DeclarationResult
        | VertexLabel::DefinitionResult
        | VertexLabel::TypeDefinitionResult
        | VertexLabel::ReferenceResult
        | VertexLabel::ImplementationResult => v,
    }
}

fn edge_descriptor(label: EdgeLabel, e: Descriptor) -> Descriptor {
    match label {
        EdgeLabel::Contains => e.required("inVs", Check::IdArray),
        EdgeLabel::Item => {
            let properties: Vec<&'static str> =
                ItemProperty::ALL.iter().map(|p| p.as_str()).collect();
            e.required("inVs", Check::IdArray)
                .required("shard", Check::Id)
                .optional("property", Check::one_of("item property", &properties))
        }
        EdgeLabel::Next
        | EdgeLabel::Moniker
        | EdgeLabel::Attach
        | EdgeLabel::PackageInformation
        | EdgeLabel::BelongsTo
        | EdgeLabel::DocumentSymbol
        | EdgeLabel::FoldingRange
        | EdgeLabel::DocumentLink
        | EdgeLabel::Diagnostic
        | EdgeLabel::Definition
        | EdgeLabel::Declaration
        | EdgeLabel::TypeDefinition
        | EdgeLabel::Hover
        | EdgeLabel::References
        | EdgeLabel::Implementation => e.required("inV", Check::Id),
    }
}

fn position() -> Descriptor {
    Descriptor::default()
        .required("line", Check::Uinteger)
        .required("character", Check::Uinteger)
}

fn lsp_range() -> Descriptor {
    Descriptor::default()
        .required("start", Check::Object(position()))
        .required("end", Check::Object(position()))
}

fn tool_info() -> Descriptor {
    Descriptor::default()
        .required("name", Check::String)
        .optional("version", Check::String)
        .optional("args", Check::StringArray)
}

fn tool_state() -> Descriptor {
    Descriptor::default().optional("data", Check::String)
}

fn repository() -> Descriptor {
    Descriptor::default()
        .required("type", Check::String)
        .required("url", Check::String)
        .optional("commitId", Check::String)
}

fn range_tag() -> Check {
    let symbol_tag = |ty: &'static str| {
        Descriptor::default()
            .required("type", Check::Literal(ty))
            .required("text", Check::String)
            .required("kind", Check::SymbolKind)
            .optional("deprecated", Check::Boolean)
            .required("fullRange", Check::Object(lsp_range()))
            .optional("detail", Check::String)
    };
    let text_tag = |ty: &'static str| {
        Descriptor::default()
            .required("type", Check::Literal(ty))
            .required("text", Check::String)
    };
    let variants = [
        ("declaration", symbol_tag("declaration")),
        ("definition", symbol_tag("definition")),
        ("reference", text_tag("reference")),
        ("unknown", text_tag("unknown")),
    ];
    Check::Tagged {
        discriminant: "type",
        variants: variants.into_iter().collect(),
    }
}

fn position_of(value: Option<&Value>) -> Option<(u64, u64)> {
    let value = value?;
    Some((value.get("line")?.as_u64()?, value.get("character")?.as_u64()?))
}

/// A declaration or definition tag's `fullRange` must contain the range.
fn full_range_encloses(range: &Map<String, Value>) -> bool {
    let Some(full) = range.get("tag").and_then(|tag| tag.get("fullRange")) else {
        return true;
    };
    match (
        position_of(range.get("start")),
        position_of(range.get("end")),
        position_of(full.get("start")),
        position_of(full.get("end")),
    ) {
        (Some(start), Some(end), Some(full_start), Some(full_end)) => {
            full_start <= start && end <= full_end
        }
        _ => true,
    }
}

fn is_uinteger(value: &Value) -> bool {
    value.as_u64().map_or(false, |n| n <= u64::from(MAX_NUMERIC_ID))
}

fn is_id(value: &Value) -> bool {
    value.is_string() || is_uinteger(value)
}

fn is_range_based_symbol(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    if !object.get("id").map_or(false, is_id) {
        return false;
    }
    match object.get("children") {
        None => true,
        Some(Value::Array(children)) => children.iter().all(is_range_based_symbol),
        Some(_) => false,
    }
}

fn lsp_is<T: DeserializeOwned>(value: &Value) -> bool {
    serde_json::from_value::<T>(value.clone()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventKind, EventScope, MonikerKind, UniquenessLevel};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn minimal_vertex(label: VertexLabel) -> Value {
        let mut value = json!({"id": 1, "type": "vertex", "label": label.as_str()});
        let fields = match label {
            VertexLabel::MetaData => json!({"version": "0.6.0", "positionEncoding": "utf-16"}),
            VertexLabel::Event => json!({"scope": "document", "kind": "begin", "data": 2}),
            VertexLabel::Project => json!({"kind": "typescript", "name": "p"}),
            VertexLabel::Group => json!({
                "uri": "file:///g", "conflictResolution": "takeDB",
                "name": "g", "rootUri": "file:///g"
            }),
            VertexLabel::Document => json!({"uri": "file:///a.ts", "languageId": "typescript"}),
            VertexLabel::Moniker => json!({"scheme": "tsc", "identifier": "a:x", "unique": "group"}),
            VertexLabel::PackageInformation => json!({"name": "left-pad", "manager": "npm"}),
            VertexLabel::Range => json!({
                "start": {"line": 0, "character": 1}, "end": {"line": 0, "character": 4}
            }),
            VertexLabel::DocumentSymbolResult
            | VertexLabel::FoldingRangeResult
            | VertexLabel::DocumentLinkResult
            | VertexLabel::DiagnosticResult => json!({"result": []}),
            VertexLabel::HoverResult => json!({"result": {"contents": "const x: number"}}),
            VertexLabel::ResultSet
            | VertexLabel::DeclarationResult
            | VertexLabel::DefinitionResult
            | VertexLabel::TypeDefinitionResult
            | VertexLabel::ReferenceResult
            | VertexLabel::ImplementationResult => json!({}),
        };
        merge(&mut value, fields);
        value
    }

    fn minimal_edge(label: EdgeLabel) -> Value {
        let mut value = json!({"id": 9, "type": "edge", "label": label.as_str(), "outV": 1});
        let fields = match label {
            EdgeLabel::Contains => json!({"inVs": [2, 3]}),
            EdgeLabel::Item => json!({"inVs": [2], "shard": 4}),
            _ => json!({"inV": 2}),
        };
        merge(&mut value, fields);
        value
    }

    fn merge(value: &mut Value, fields: Value) {
        if let (Some(target), Value::Object(fields)) = (value.as_object_mut(), fields) {
            target.extend(fields);
        }
    }

    fn without(value: &Value, key: &str) -> Value {
        let mut value = value.clone();
        value.as_object_mut().unwrap().remove(key);
        value
    }

    #[test]
    fn every_minimal_vertex_validates() {
        for label in VertexLabel::ALL {
            let value = minimal_vertex(*label);
            assert_eq!(label.check(&value), Ok(()), "{}", label.as_str());
            assert_eq!(check(&value), Ok(ElementLabel::Vertex(*label)));
        }
    }

    #[test]
    fn every_minimal_edge_validates() {
        for label in EdgeLabel::ALL {
            let value = minimal_edge(*label);
            assert_eq!(label.check(&value), Ok(()), "{}", label.as_str());
            assert_eq!(check(&value), Ok(ElementLabel::Edge(*label)));
        }
    }

    #[test]
    fn removing_a_required_property_fails() {
        for label in VertexLabel::ALL {
            let value = minimal_vertex(*label);
            for key in value.as_object().unwrap().keys() {
                assert!(
                    !label.validate(&without(&value, key)),
                    "{} without {}",
                    label.as_str(),
                    key
                );
            }
        }
        for label in EdgeLabel::ALL {
            let value = minimal_edge(*label);
            for key in value.as_object().unwrap().keys() {
                assert!(!label.validate(&without(&value, key)), "{} without {}", label.as_str(), key);
            }
        }
    }

    #[test]
    fn required_properties_match_minimal_instances() {
        let moniker: Vec<_> = schema()
            .vertex(VertexLabel::Moniker)
            .unwrap()
            .required_properties()
            .collect();
        assert_eq!(
            moniker,
            vec!["id", "type", "label", "scheme", "identifier", "unique"]
        );
    }

    #[rstest]
    #[case(VertexLabel::Moniker, "unique", json!("planet"))]
    #[case(VertexLabel::Moniker, "kind", json!("foreign"))]
    #[case(VertexLabel::Event, "scope", json!("workspace"))]
    #[case(VertexLabel::Event, "kind", json!("middle"))]
    #[case(VertexLabel::Group, "conflictResolution", json!("takeBoth"))]
    #[case(VertexLabel::MetaData, "positionEncoding", json!("utf-8"))]
    #[case(VertexLabel::Range, "tag", json!({"type": "weird", "text": "x"}))]
    fn out_of_set_vertex_values_fail(
        #[case] label: VertexLabel,
        #[case] key: &str,
        #[case] bad: Value,
    ) {
        let mut value = minimal_vertex(label);
        value[key] = bad;
        assert!(!label.validate(&value));
    }

    #[test]
    fn out_of_set_item_property_fails() {
        let mut value = minimal_edge(EdgeLabel::Item);
        value["property"] = json!("everything");
        assert!(matches!(
            EdgeLabel::Item.check(&value),
            Err(Violation::NotInEnum { ref field, .. }) if field == "property"
        ));
        value["property"] = json!("referenceResults");
        assert!(EdgeLabel::Item.validate(&value));
    }

    #[test]
    fn enum_tables_match_serde_spelling() {
        for scope in ["group", "project", "document", "monikerAttach"] {
            assert!(serde_json::from_value::<EventScope>(json!(scope)).is_ok());
        }
        for kind in ["begin", "end"] {
            assert!(serde_json::from_value::<EventKind>(json!(kind)).is_ok());
        }
        for level in ["document", "project", "group", "scheme", "global"] {
            assert!(serde_json::from_value::<UniquenessLevel>(json!(level)).is_ok());
        }
        for kind in ["import", "export", "local"] {
            assert!(serde_json::from_value::<MonikerKind>(json!(kind)).is_ok());
        }
    }

    #[test]
    fn range_tag_narrows_on_type() {
        let mut value = minimal_vertex(VertexLabel::Range);
        value["tag"] = json!({"type": "reference", "text": "foo"});
        assert!(VertexLabel::Range.validate(&value));

        // a definition tag needs the symbol fields a reference tag does not
        value["tag"] = json!({"type": "definition", "text": "foo"});
        assert_eq!(
            VertexLabel::Range.check(&value),
            Err(Violation::Missing {
                field: "tag.kind".to_owned()
            })
        );

        value["tag"] = json!({
            "type": "definition", "text": "foo", "kind": 12,
            "fullRange": {"start": {"line": 0, "character": 0}, "end": {"line": 0}}
        });
        assert_eq!(
            VertexLabel::Range.check(&value),
            Err(Violation::Missing {
                field: "tag.fullRange.end.character".to_owned()
            })
        );

        value["tag"] = json!({"text": "foo"});
        assert!(matches!(
            VertexLabel::Range.check(&value),
            Err(Violation::UnknownDiscriminant { ref value, .. }) if value == "undefined"
        ));
    }

    #[test]
    fn full_range_must_enclose_the_range() {
        let mut value = minimal_vertex(VertexLabel::Range);
        let tag = |start: u32, end: u32| {
            json!({
                "type": "definition", "text": "foo", "kind": 12,
                "fullRange": {"start": {"line": 0, "character": start},
                              "end": {"line": 0, "character": end}}
            })
        };
        value["tag"] = tag(0, 4);
        assert!(VertexLabel::Range.validate(&value));
        value["tag"] = tag(1, 4);
        assert!(VertexLabel::Range.validate(&value));

        value["tag"] = tag(2, 4);
        assert_eq!(
            VertexLabel::Range.check(&value),
            Err(Violation::Invalid {
                field: "tag.fullRange".to_owned(),
                expected: "range enclosing start and end"
            })
        );
        value["tag"] = tag(0, 3);
        assert!(!VertexLabel::Range.validate(&value));
        value["end"] = json!({"line": 5, "character": 1});
        value["tag"] = tag(0, 3);
        assert!(!is_element(&value));
    }

    #[test]
    fn document_symbol_result_narrows_on_first_member() {
        let mut value = minimal_vertex(VertexLabel::DocumentSymbolResult);
        value["result"] = json!([{"id": 3, "children": [{"id": 4}]}]);
        assert!(VertexLabel::DocumentSymbolResult.validate(&value));

        value["result"] = json!([{"id": 3}, {"name": "x"}]);
        assert!(!VertexLabel::DocumentSymbolResult.validate(&value));

        value["result"] = json!([{
            "name": "foo", "kind": 12,
            "range": {"start": {"line": 0, "character": 0}, "end": {"line": 0, "character": 3}},
            "selectionRange": {"start": {"line": 0, "character": 0}, "end": {"line": 0, "character": 3}}
        }]);
        assert!(VertexLabel::DocumentSymbolResult.validate(&value));
    }

    #[test]
    fn ids_are_bounded_unsigned_integers_or_strings() {
        let mut value = minimal_vertex(VertexLabel::ResultSet);
        value["id"] = json!("a-17");
        assert!(is_element(&value));
        value["id"] = json!(-1);
        assert!(!is_element(&value));
        value["id"] = json!(2_147_483_648u64);
        assert!(!is_element(&value));
        value["id"] = json!(1.5);
        assert!(!is_element(&value));
    }

    #[test]
    fn null_is_rejected_unless_flagged() {
        let mut value = minimal_vertex(VertexLabel::Moniker);
        value["kind"] = Value::Null;
        assert_eq!(
            VertexLabel::Moniker.check(&value),
            Err(Violation::Null {
                field: "kind".to_owned()
            })
        );

        let nullable = Descriptor::default().with(
            "kind",
            Check::String,
            PropertyFlags::OPTIONAL | PropertyFlags::NULL,
        );
        assert_eq!(nullable.validate(&json!({"kind": null})), Ok(()));
        assert_eq!(nullable.validate(&json!({})), Ok(()));

        let tolerant = Descriptor::default().with("kind", Check::String, PropertyFlags::UNDEFINED);
        assert_eq!(tolerant.validate(&json!({})), Ok(()));
        assert!(tolerant.validate(&json!({"kind": null})).is_err());
    }

    #[test]
    fn unknown_labels_and_types_fail() {
        assert!(!is_element(&json!({"id": 1, "type": "vertex", "label": "location"})));
        assert!(!is_element(&json!({"id": 1, "type": "edge", "label": "refersTo", "outV": 1, "inV": 2})));
        assert!(!is_element(&json!({"id": 1, "type": "node", "label": "range"})));
        assert_eq!(check(&json!([])), Err(Violation::NotAnObject));
    }

    #[test]
    fn edge_shape_follows_label() {
        let contains = json!({"id": 5, "type": "edge", "label": "contains", "outV": 1, "inV": 4});
        assert!(!EdgeLabel::Contains.validate(&contains));
        let next = json!({"id": 5, "type": "edge", "label": "next", "outV": 1, "inVs": [4]});
        assert!(!EdgeLabel::Next.validate(&next));
    }
}
