//! Message content as it appears in agent logs.
//!
//! All three tools store message content either as a bare string or as a
//! list of typed blocks. Both shapes are flattened here into plain text plus
//! optional reasoning text before anything else sees them.

use serde::Deserialize;

/// Raw content of a log record's message
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

/// A single typed content block
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    #[serde(alias = "input_text", alias = "output_text")]
    Text {
        #[serde(default)]
        text: String,
    },
    Thinking {
        #[serde(default)]
        thinking: String,
    },
    #[serde(other)]
    Other,
}

/// Content flattened into the shape of a `SessionMessage`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedContent {
    pub text: String,
    pub thinking: Option<String>,
}

impl NormalizedContent {
    /// True when the content carries neither text nor reasoning
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.thinking.is_none()
    }
}

impl MessageContent {
    pub fn normalize(&self) -> NormalizedContent {
        match self {
            MessageContent::Text(text) => NormalizedContent {
                text: text.clone(),
                thinking: None,
            },
            MessageContent::Blocks(blocks) => {
                let mut texts = Vec::new();
                let mut thoughts = Vec::new();
                for block in blocks {
                    match block {
                        ContentBlock::Text { text } if !text.is_empty() => texts.push(text.as_str()),
                        ContentBlock::Thinking { thinking } if !thinking.trim().is_empty() => {
                            thoughts.push(thinking.as_str())
                        }
                        _ => {}
                    }
                }
                NormalizedContent {
                    text: texts.join("\n"),
                    thinking: (!thoughts.is_empty()).then(|| thoughts.join("\n")),
                }
            }
        }
    }
}
