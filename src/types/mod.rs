//! Gemini `generateContent` wire types.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Content`] | A conversation turn (role + parts) |
//! | [`Part`] | Text, inline bytes, function call or function response |
//! | [`FunctionDeclaration`] | Tool declaration sent to the model |
//! | [`FunctionCall`] | Function-call request produced by the model |
//! | [`FunctionResponse`] | Result of a call, sent back to the model |
//! | [`ModelResponse`] | Parsed `generateContent` response |
//!
//! ## Example
//!
//! ```rust
//! use genai_tools::types::{Content, Part, Role};
//!
//! let turn = Content::user("Summarize this document.");
//! assert_eq!(turn.role, Some(Role::User));
//! assert_eq!(turn.parts[0].text.as_deref(), Some("Summarize this document."));
//! ```

pub mod content;
pub mod response;
pub mod tool;

pub use content::{Blob, Content, GenerationConfig, Part, Role};
pub use response::{ModelResponse, UsageMetadata};
pub use tool::{FunctionCall, FunctionCallingMode, FunctionDeclaration, FunctionResponse};
