//! Networking modules for the identity provider boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gateway` defines the contract the auth flow consumes, `identity_toolkit`
//! implements it over the provider's REST API, and `config` carries the
//! build-time settings both need.

pub mod config;
pub mod gateway;
pub mod identity_toolkit;
