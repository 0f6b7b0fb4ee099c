//! picofaas Common Types
//!
//! This crate provides the wire protocol, error taxonomy and base-URL
//! configuration shared by the picofaas client, server and CLI.
//!
//! # Overview
//!
//! picofaas is a tiny FaaS system: clients ship JavaScript function source
//! text plus a JSON argument list to a server, which evaluates the function
//! and returns the result. Everything on the wire is JSON over HTTP POST:
//!
//! - `POST /run` with `{"func": "<source>", "args": [..]}`
//! - `POST /functions/{name}/deploy` with `{"func": "<source>"}`
//! - `POST /functions/{name}/invoke` with `{"args": [..]}`
//!
//! Successful responses are `200` with `{"result": <any JSON value>}`;
//! failures are a non-200 status whose body is plain error text.
//!
//! # Example
//!
//! ```
//! use picofaas_common::{InvokeRequest, InvokeResponse};
//! use serde_json::json;
//!
//! let request = InvokeRequest::new("(a, b) => a + b", vec![json!(2), json!(3)]);
//! let response = InvokeResponse::new(json!(5));
//! ```

pub mod config;
pub mod protocol;

pub use protocol::*;
