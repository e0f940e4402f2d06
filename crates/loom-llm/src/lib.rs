//! # loom-llm
//!
//! Generative-model access for Loom.
//!
//! - [`router::ProviderRouter`] picks the vendor endpoint for a model name.
//! - [`client::CompletionClient`] is the seam to the model; [`client::ChatClient`]
//!   implements it over OpenAI-compatible `/chat/completions`.
//! - [`pipeline::GenerationPipeline`] runs requirement analysis and file
//!   materialization on top of a client.
//!
//! Nothing here touches storage. Callers decide what to persist once a stage
//! has fully succeeded.

pub mod client;
pub mod pipeline;
pub mod router;

mod error;
mod http;

pub use client::{ChatClient, ChatMessage, ChatRole, CompletionClient, CompletionRequest};
pub use error::LlmError;
pub use pipeline::GenerationPipeline;
pub use router::{ProviderRoute, ProviderRouter, Vendor};
