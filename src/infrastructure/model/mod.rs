//! Model infrastructure module
//!
//! Language model providers with native tool calling.
//!
//! # Structure
//! - `types` - Request, Response, Error types
//! - `traits` - ModelProvider trait
//! - `adapter` - Message and tool format adapters
//! - `factory` - Provider factory for creating clients
//! - `clients` - Individual client implementations

pub mod adapter;
pub mod clients;
pub mod factory;
pub mod traits;
pub mod types;

pub use factory::ProviderFactory;
pub use traits::ModelProvider;
pub use types::{ModelError, ModelRequest, ModelResponse, ToolDeclaration};
