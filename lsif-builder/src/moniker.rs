//! Stable moniker identities and how several of them hang off one hub.
//!
//! An identity is a pure function of a declaration: its export path, its
//! import origin, or a hash of its canonical text. Re-indexing unchanged
//! sources therefore yields the same identifiers, independent of ids.

use crate::emitter::Emitter;
use crate::error::IndexError;
use crate::semantic::{Declaration, ScopeSegment, Visibility};
use crate::writer::Writer;
use lsif_type::{
    Edge, Id, Moniker, MonikerKind, PackageInformation, SymbolKind, UniquenessLevel, Vertex,
};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub kind: MonikerKind,
    pub identifier: String,
    /// Package an imported symbol comes from.
    pub package: Option<PackageInformation>,
}

impl Identity {
    pub fn export(module: &str, path: &[ScopeSegment]) -> Self {
        Identity {
            kind: MonikerKind::Export,
            identifier: path_identifier(module, path),
            package: None,
        }
    }

    pub fn import(
        module: &str,
        path: &[ScopeSegment],
        package: Option<PackageInformation>,
    ) -> Self {
        Identity {
            kind: MonikerKind::Import,
            identifier: path_identifier(module, path),
            package,
        }
    }

    pub fn local(kind: SymbolKind, name: &str, text: &str) -> Self {
        Identity {
            kind: MonikerKind::Local,
            identifier: local_identifier(kind, name, text),
            package: None,
        }
    }

    /// Local identities are only meaningful inside their document.
    pub fn unique(&self) -> UniquenessLevel {
        match self.kind {
            MonikerKind::Local => UniquenessLevel::Document,
            MonikerKind::Export | MonikerKind::Import => UniquenessLevel::Group,
        }
    }

    /// Which identity wins as primary: export over import over local.
    fn rank(&self) -> u8 {
        match self.kind {
            MonikerKind::Export => 2,
            MonikerKind::Import => 1,
            MonikerKind::Local => 0,
        }
    }

    fn key(&self) -> (MonikerKind, String) {
        (self.kind, self.identifier.clone())
    }
}

/// `"<module>:<segment>.<segment>..."`; an empty path names the module.
pub fn path_identifier(module: &str, path: &[ScopeSegment]) -> String {
    let path: Vec<String> = path.iter().map(ToString::to_string).collect();
    format!("{}:{}", module, path.join("."))
}

/// First 16 bytes of the SHA-256 of the canonical signature, as hex.
pub fn local_identifier(kind: SymbolKind, name: &str, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(signature(kind, name, text).as_bytes());
    let hash = hasher.finalize();
    format!("{:x}", hash)[..32].to_string()
}

/// Symbol kind number, name and text with whitespace runs collapsed,
/// separated by NUL.
fn signature(kind: SymbolKind, name: &str, text: &str) -> String {
    let kind = serde_json::to_string(&kind).unwrap_or_default();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{}\0{}\0{}", kind, name, text)
}

/// The monikers of one hub.
///
/// The first moniker is linked from the hub with a `moniker` edge. Every
/// later one is joined to the cluster with an `attach` edge, so the hub keeps
/// exactly one outgoing `moniker` edge.
#[derive(Debug, Clone, Default)]
pub struct MonikerSet {
    primary: Option<(u8, Id)>,
    known: HashMap<(MonikerKind, String), Id>,
}

impl MonikerSet {
    pub fn primary(&self) -> Option<&Id> {
        self.primary.as_ref().map(|(_, id)| id)
    }

    pub fn get(&self, identity: &Identity) -> Option<&Id> {
        self.known.get(&identity.key())
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

#[derive(Debug)]
pub struct MonikerEngine {
    scheme: String,
    packages: HashMap<(String, String, Option<String>), Id>,
    monikers: usize,
    attaches: usize,
    fallbacks: usize,
}

impl MonikerEngine {
    pub fn new(scheme: impl Into<String>) -> Self {
        MonikerEngine {
            scheme: scheme.into(),
            packages: HashMap::new(),
            monikers: 0,
            attaches: 0,
            fallbacks: 0,
        }
    }

    pub fn monikers(&self) -> usize {
        self.monikers
    }

    pub fn attaches(&self) -> usize {
        self.attaches
    }

    /// Declarations that fell back to a local identity because their
    /// enclosing path was unknown.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks
    }

    pub fn classify(&mut self, module: &str, decl: &Declaration) -> Identity {
        match &decl.visibility {
            Visibility::Local => Identity::local(decl.kind, &decl.name, &decl.text),
            Visibility::Exported => match decl.export_path() {
                Some(path) => Identity::export(module, &path),
                None => {
                    self.fallbacks += 1;
                    debug!(
                        symbol = %decl.symbol,
                        name = %decl.name,
                        "enclosing path unknown, using a local moniker"
                    );
                    Identity::local(decl.kind, &decl.name, &decl.text)
                }
            },
            Visibility::Imported {
                module,
                path,
                package,
            } => Identity::import(module, path, package.clone()),
        }
    }

    /// Place the moniker of a declaration site.
    ///
    /// A site that outranks the current primary becomes the new primary and
    /// the old primary is attached to it. Otherwise the site is attached to
    /// the primary.
    pub fn place_site<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
        hub: &Id,
        set: &mut MonikerSet,
        identity: Identity,
    ) -> Result<Id, IndexError> {
        self.place(writer, hub, set, identity, true)
    }

    /// Place a moniker under which an already known symbol is also
    /// reachable, e.g. a member seen through an export alias. It is always
    /// attached to the current primary.
    pub fn place_reachable<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
        hub: &Id,
        set: &mut MonikerSet,
        identity: Identity,
    ) -> Result<Id, IndexError> {
        self.place(writer, hub, set, identity, false)
    }

    fn place<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
        hub: &Id,
        set: &mut MonikerSet,
        identity: Identity,
        promote: bool,
    ) -> Result<Id, IndexError> {
        if let Some(id) = set.get(&identity) {
            return Ok(id.clone());
        }

        let id = self.emit(writer, &identity)?;
        let rank = identity.rank();
        match set.primary.take() {
            None => {
                writer.edge(Edge::moniker(hub.clone(), id.clone()))?;
                set.primary = Some((rank, id.clone()));
            }
            Some((current, primary)) if promote && rank > current => {
                // The hub's moniker edge stays on the first moniker. Readers
                // reach the promoted one through the attach edge.
                self.attach(writer, primary, id.clone())?;
                set.primary = Some((rank, id.clone()));
            }
            Some((current, primary)) => {
                self.attach(writer, id.clone(), primary.clone())?;
                set.primary = Some((current, primary));
            }
        }
        set.known.insert(identity.key(), id.clone());
        Ok(id)
    }

    fn emit<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
        identity: &Identity,
    ) -> Result<Id, IndexError> {
        let id = writer.vertex(Vertex::Moniker(Moniker {
            scheme: self.scheme.clone(),
            identifier: identity.identifier.clone(),
            unique: identity.unique(),
            kind: Some(identity.kind),
        }))?;
        self.monikers += 1;
        if let Some(package) = &identity.package {
            let package = self.package(writer, package)?;
            writer.edge(Edge::package_information(id.clone(), package))?;
        }
        Ok(id)
    }

    fn package<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
        package: &PackageInformation,
    ) -> Result<Id, IndexError> {
        let key = (
            package.name.clone(),
            package.manager.clone(),
            package.version.clone(),
        );
        if let Some(id) = self.packages.get(&key) {
            return Ok(id.clone());
        }
        let id = writer.vertex(Vertex::PackageInformation(package.clone()))?;
        self.packages.insert(key, id.clone());
        Ok(id)
    }

    fn attach<E: Emitter>(
        &mut self,
        writer: &mut Writer<E>,
        from: Id,
        to: Id,
    ) -> Result<(), IndexError> {
        debug!(%from, %to, "attach moniker");
        writer.edge(Edge::attach(from, to))?;
        self.attaches += 1;
        Ok(())
    }
}
