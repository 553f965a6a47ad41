//! Identity provider adapters.
//!
//! This module provides an authorization-code OAuth client implementing the
//! `IdentityProvider` port.

mod dto;
mod oauth;

pub use oauth::{OAuthClientConfig, OAuthEndpoints, OAuthIdentityProvider};
