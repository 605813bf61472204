//! Editor state modules
//!
//! Pure state types with no GPU or window dependencies, so they can be unit
//! tested directly.

mod document;
pub mod find;
mod prompt;

pub use document::{CaretMove, Document, DocumentError};
pub use find::{FindState, NOT_FOUND};
pub use prompt::{Prompt, PromptKind};
