//! Context loading
//!
//! Reads the reference documents handed to the agents. A document that
//! cannot be read is kept as a tagged placeholder so the run can continue
//! with degraded context, and callers can still tell the difference.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The fixed set of context documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKey {
    /// Kanban board state (JSON)
    Board,
    /// Project list (JSON)
    Projects,
    /// Agent roster (JSON)
    Agents,
    /// Schema specification (markdown)
    SchemaSpec,
    /// Current UI markup (HTML)
    Markup,
}

impl ContextKey {
    /// All keys, in load order
    pub const ALL: [ContextKey; 5] = [
        ContextKey::Board,
        ContextKey::Projects,
        ContextKey::Agents,
        ContextKey::SchemaSpec,
        ContextKey::Markup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKey::Board => "board",
            ContextKey::Projects => "projects",
            ContextKey::Agents => "agents",
            ContextKey::SchemaSpec => "schema_spec",
            ContextKey::Markup => "markup",
        }
    }

    /// Path relative to the workspace root when none is configured
    pub fn default_path(&self) -> &'static str {
        match self {
            ContextKey::Board => "board.json",
            ContextKey::Projects => "projects.json",
            ContextKey::Agents => "agents.json",
            ContextKey::SchemaSpec => "docs/SCHEMA-V3.1-SPEC.md",
            ContextKey::Markup => "index.html",
        }
    }
}

impl std::fmt::Display for ContextKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of one context document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentContent {
    /// The file was read
    Loaded(String),
    /// The file could not be read; `text` is what prompts will embed
    Placeholder { error: String, text: String },
}

/// A context document and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDocument {
    pub key: ContextKey,
    pub path: PathBuf,
    pub content: DocumentContent,
}

impl ContextDocument {
    /// Read a document, degrading to a placeholder on any failure
    pub fn read(key: ContextKey, path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!(key = %key, path = %path.display(), chars = text.chars().count(), "Loaded context");
                DocumentContent::Loaded(text)
            }
            Err(e) => {
                tracing::warn!(key = %key, path = %path.display(), "Context unavailable: {}", e);
                DocumentContent::Placeholder {
                    error: e.to_string(),
                    text: format!("Error reading {}: {}", path.display(), e),
                }
            }
        };

        Self {
            key,
            path: path.to_path_buf(),
            content,
        }
    }

    /// Text to embed in prompts: real content or the placeholder message
    pub fn text(&self) -> &str {
        match &self.content {
            DocumentContent::Loaded(text) => text,
            DocumentContent::Placeholder { text, .. } => text,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.content, DocumentContent::Placeholder { .. })
    }
}

/// All loaded context documents, keyed by logical name
///
/// Built once before the first stage and never modified.
#[derive(Debug, Clone, Default)]
pub struct ContextBundle {
    documents: BTreeMap<ContextKey, ContextDocument>,
}

impl ContextBundle {
    /// Load every source; never fails
    pub fn load(sources: &[(ContextKey, PathBuf)]) -> Self {
        let documents = sources
            .iter()
            .map(|(key, path)| (*key, ContextDocument::read(*key, path)))
            .collect();
        Self { documents }
    }

    /// Build a bundle from in-memory text
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = (ContextKey, S)>,
        S: Into<String>,
    {
        let documents = texts
            .into_iter()
            .map(|(key, text)| {
                let doc = ContextDocument {
                    key,
                    path: PathBuf::from(key.default_path()),
                    content: DocumentContent::Loaded(text.into()),
                };
                (key, doc)
            })
            .collect();
        Self { documents }
    }

    pub fn get(&self, key: ContextKey) -> Option<&ContextDocument> {
        self.documents.get(&key)
    }

    /// Prompt text for a key; empty when the key was never requested
    pub fn text(&self, key: ContextKey) -> &str {
        self.get(key).map(ContextDocument::text).unwrap_or("")
    }

    /// Whether the key is missing real content
    pub fn is_degraded(&self, key: ContextKey) -> bool {
        self.get(key).map_or(true, ContextDocument::is_placeholder)
    }

    pub fn placeholder_count(&self) -> usize {
        self.documents.values().filter(|d| d.is_placeholder()).count()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContextDocument> {
        self.documents.values()
    }
}
