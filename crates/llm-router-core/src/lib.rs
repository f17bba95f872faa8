//! Core types for llm-router.
//!
//! Everything here is backend-agnostic: the message and response model,
//! the error taxonomy, the validation rules every adapter shares, and the
//! configuration schema used by the CLI.

pub mod config;
pub mod error;
pub mod types;
pub mod utils;
pub mod validation;

pub use error::RouterError;
pub use types::{ChatResponse, Message, Parameters, Role, Usage};
