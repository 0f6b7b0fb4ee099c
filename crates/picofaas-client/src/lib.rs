//! picofaas Client
//!
//! The Invoker side of picofaas: serialize function source text plus a JSON
//! argument list, POST it to a picofaas server, and unwrap the `result`
//! field of the response.
//!
//! Rust cannot recover the source text of a compiled function the way
//! `Function.prototype.toString()` can in JavaScript, so [`FaasClient`]
//! takes the source as a string. The CLI reads it from a module file.

pub mod client;

pub use client::FaasClient;
