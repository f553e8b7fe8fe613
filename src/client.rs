//! Gemini client facade.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod tools;

pub use builder::GenAiClientBuilder;
pub use core::{ContentGenerator, GenAiClient};
pub use tools::{run_tool_loop, ToolRun};
