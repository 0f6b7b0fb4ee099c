pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{FaasError, Result};
pub use types::{Args, DeployRequest, InvokeRequest, InvokeResponse, NamedInvokeRequest};
