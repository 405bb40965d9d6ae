mod builder;
mod content;
pub mod jsonl;
mod model;
mod path;

pub use builder::SessionBuilder;
pub use content::{ContentBlock, MessageContent, NormalizedContent};
pub use model::{
    MessageRole, ParseSourceError, SessionDetail, SessionMessage, SessionSummary, SourceTag,
};
pub use path::{expand_home, normalize_directory_path};
