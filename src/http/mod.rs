//! HTTP layer: operation table, URL signing and the `ImHttp` dispatcher.

pub mod client;
pub mod endpoint;

pub use client::{HttpConfig, ImHttp};
