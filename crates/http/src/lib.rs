//! TechHub HTTP client
//!
//! Typed access to the storefront REST API (`<base>/api/v1/...`). Public and
//! bearer-authenticated endpoints live on separate client types so that a
//! user-scoped call cannot be issued without a session token.

pub mod client;
pub mod types;

pub use client::error::{ClientError, ErrorDetail};
pub use client::{API_PREFIX, ApiClientBuilder, AuthenticatedClient, PublicClient};
