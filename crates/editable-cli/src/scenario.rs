use std::path::Path;

use anyhow::{Context, Result};
use editable_selection::editing::InputEvent;
use editable_selection::{DocumentModel, Edit, MemoryDocument, NodeKey, PointerPhase, Position};
use serde::Deserialize;

/// A replay file: the starting document plus the steps to run against it
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(rename = "paragraph", default)]
    pub paragraphs: Vec<Paragraph>,
    #[serde(rename = "step", default)]
    pub steps: Vec<Step>,
}

/// One root element holding one text node
#[derive(Debug, Deserialize)]
pub struct Paragraph {
    pub key: NodeKey,
    pub text_key: NodeKey,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "do", rename_all = "snake_case")]
pub enum Step {
    Pointer {
        phase: PointerPhase,
        key: NodeKey,
        offset: usize,
    },
    Input(InputEvent),
    Edit(Edit),
    /// Apply an edit through the unvalidated path
    SilentEdit(Edit),
    Select {
        anchor: Position,
        focus: Option<Position>,
    },
    /// Draw whatever is pending
    Frame,
}

impl Scenario {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn build_document(&self) -> Result<MemoryDocument> {
        let mut doc = MemoryDocument::new();
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            doc.create_element_with_key(paragraph.key.clone())?;
            doc.create_text_with_key(paragraph.text_key.clone(), &paragraph.text)?;
            doc.insert_node(Some(&paragraph.key), 0, &paragraph.text_key)?;
            doc.insert_node(None, index, &paragraph.key)?;
        }
        Ok(doc)
    }
}

/// Root node containing `key`, which is where pointer events get delivered
pub fn container_of(doc: &impl DocumentModel, key: &NodeKey) -> NodeKey {
    let mut current = key.clone();
    while let Some(parent) = doc.parent(&current) {
        current = parent;
    }
    current
}
