//! picofaas Server
//!
//! The Executor side of picofaas: an HTTP server that receives JavaScript
//! function source text plus a JSON argument list, evaluates the function
//! with an embedded Boa engine, and returns the result.
//!
//! # Endpoints
//!
//! - `POST /run` - run the function in the request body
//! - `POST /functions/{name}/deploy` - store a function under a name
//! - `POST /functions/{name}/invoke` - run a stored function
//! - `GET /` - service banner
//! - `GET /_info` - service name, version, invocation and function counts
//!
//! Each invocation evaluates in a fresh Boa context, so no JavaScript
//! state leaks between requests and requests can execute concurrently.

pub mod convert;
pub mod engine;
pub mod http_server;
pub mod registry;
pub mod router;

pub use engine::Engine;
pub use http_server::HttpServer;
pub use registry::Registry;
pub use router::Router;
