//! A semantic model recorded as JSON.
//!
//! Lets the indexer run without a live analyzer: the CLI and the tests feed
//! it analyzer output captured in a file.

use crate::error::FixtureError;
use crate::semantic::{AnalyzedDocument, ProjectInfo, SemanticModel};
use serde_derive::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureModel {
    pub project: ProjectInfo,
    #[serde(default)]
    pub documents: Vec<AnalyzedDocument>,
}

impl FixtureModel {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| FixtureError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}

impl SemanticModel for FixtureModel {
    fn project(&self) -> ProjectInfo {
        self.project.clone()
    }

    fn documents(&self) -> Box<dyn Iterator<Item = AnalyzedDocument> + '_> {
        Box::new(self.documents.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::SymbolEvent;
    use pretty_assertions::assert_eq;

    #[test]
    fn documents_keep_their_order() {
        let model = FixtureModel::from_json(
            r#"{
                "project": {"name": "demo", "kind": "typescript"},
                "documents": [
                    {"uri": "file:///demo/b.ts", "languageId": "typescript", "module": "b"},
                    {"uri": "file:///demo/a.ts", "languageId": "typescript", "module": "a",
                     "events": [{"event": "usage", "symbol": "s1",
                                 "range": {"start": {"line": 0, "character": 0},
                                           "end": {"line": 0, "character": 1}}}]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(model.project().name, "demo");
        let modules: Vec<String> = model.documents().map(|d| d.module).collect();
        assert_eq!(modules, vec!["b", "a"]);
        let last = model.documents().last().unwrap();
        assert!(matches!(last.events[0], SymbolEvent::Usage(_)));
    }

    #[test]
    fn load_reports_the_path() {
        let error = FixtureModel::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/model.json"));
    }
}
