//! Typed HTTP client for the skills service.
//!
//! [`SkillsClient`] exposes one async method per endpoint: skill CRUD,
//! search and filtering, and skill/project associations.  Each call sends a
//! single request with bearer-token and API-key headers and decodes the JSON
//! response.
//!
//! ## Modules
//!
//! - [`client`] -- the endpoint methods.
//! - [`transport`] -- the send capability and its reqwest implementation.
//! - [`config`] -- construction inputs from code, env, or TOML.
//! - [`types`] -- `Skill` and `SkillProject` wire types.
//! - [`error`] -- error taxonomy.

pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use client::SkillsClient;
pub use config::SkillsClientConfig;
pub use error::{Result, SkillsClientError};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
pub use types::{Skill, SkillProject};
