//! Outbound HTTP: the OpenAI completion gateway and the client of our own
//! prompt endpoints.

pub mod openai_gateway;
pub mod remote_backend;

pub use openai_gateway::OpenAiGateway;
pub use remote_backend::RemoteBackend;
