//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Caller-facing types (content, options, cursors, constants)
//! - `wire.rs`: Serde structs matching the platform's request and response bodies
//! - `client.rs`: Sub-client whose methods validate, build the payload and dispatch

pub mod account;
pub mod message;
pub mod profile;
pub mod session;
