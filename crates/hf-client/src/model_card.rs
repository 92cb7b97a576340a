//! Model card (README.md) metadata editing
//!
//! A model card is a markdown file with an optional YAML front matter block:
//!
//! ```text
//! ---
//! library_name: transformers
//! pipeline_tag: text-generation
//! ---
//! # My model
//! ```

use anyhow::{bail, Context, Result};
use serde_yaml::{Mapping, Value};

pub const README_PATH: &str = "README.md";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCard {
    metadata: Mapping,
    content: String,
}

impl ModelCard {
    /// Split a README into front matter and markdown content
    ///
    /// A README without front matter yields empty metadata and the whole text
    /// as content.
    pub fn parse(text: &str) -> Result<Self> {
        let Some((yaml, content)) = split_front_matter(text) else {
            return Ok(Self {
                metadata: Mapping::new(),
                content: text.to_string(),
            });
        };

        let metadata = match serde_yaml::from_str::<Value>(yaml)
            .context("Model card front matter is not valid YAML")?
        {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            other => bail!(
                "Model card front matter must be a mapping, found {:?}",
                other
            ),
        };

        Ok(Self {
            metadata,
            content: content.to_string(),
        })
    }

    pub fn metadata(&self) -> &Mapping {
        &self.metadata
    }

    /// Markdown after the front matter
    pub fn content(&self) -> &str {
        &self.content
    }

    /// String value of a metadata key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.metadata.insert(Value::from(key), value.into());
    }

    /// Render back to README text
    pub fn render(&self) -> Result<String> {
        if self.metadata.is_empty() {
            return Ok(self.content.clone());
        }

        let yaml = serde_yaml::to_string(&self.metadata).context("Failed to serialize metadata")?;
        Ok(format!("---\n{}---\n{}", yaml, self.content))
    }
}

/// Returns `(yaml, content)` if the text starts with a `---` delimited block
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let rest = text.trim_start().strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Metadata fields to add to a card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataPatch {
    pub library_name: Option<String>,
    pub pipeline_tag: Option<String>,
}

impl MetadataPatch {
    pub fn new(library_name: impl Into<String>, pipeline_tag: impl Into<String>) -> Self {
        Self {
            library_name: Some(library_name.into()),
            pipeline_tag: Some(pipeline_tag.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.library_name.is_none() && self.pipeline_tag.is_none()
    }

    /// Write the fields into the card
    ///
    /// Returns `true` if any value changed.
    pub fn apply(&self, card: &mut ModelCard) -> bool {
        let mut changed = false;
        for (key, value) in [
            ("library_name", &self.library_name),
            ("pipeline_tag", &self.pipeline_tag),
        ] {
            if let Some(value) = value {
                if card.get_str(key) != Some(value.as_str()) {
                    card.set(key, value.as_str());
                    changed = true;
                }
            }
        }
        changed
    }
}
