//! Integration tests with mock HTTP server

pub mod mock_server;

mod documents;
mod error_handling;
mod generate;
mod tool_loop;
