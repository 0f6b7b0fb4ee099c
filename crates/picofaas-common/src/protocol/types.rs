use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arguments for a remote function, in call order.
pub type Args = Vec<Value>;

/// Request body for `POST /run`.
///
/// `func` carries the textual source of a single JavaScript function
/// expression; `args` is the ordered argument list. Both field names are
/// part of the wire contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvokeRequest {
    /// Source text of the function to run
    pub func: String,
    /// Arguments, applied in order
    pub args: Args,
}

impl InvokeRequest {
    pub fn new(func: impl Into<String>, args: Args) -> Self {
        InvokeRequest {
            func: func.into(),
            args,
        }
    }
}

/// Request body for `POST /functions/{name}/deploy`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeployRequest {
    /// Source text of the function to deploy
    pub func: String,
}

impl DeployRequest {
    pub fn new(func: impl Into<String>) -> Self {
        DeployRequest { func: func.into() }
    }
}

/// Request body for `POST /functions/{name}/invoke`.
///
/// `args` defaults to an empty list so a deployed function can be invoked
/// with an empty or argument-free body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NamedInvokeRequest {
    #[serde(default)]
    pub args: Args,
}

impl NamedInvokeRequest {
    pub fn new(args: Args) -> Self {
        NamedInvokeRequest { args }
    }
}

/// Successful response body: `{"result": <any JSON value>}`.
///
/// Failure responses do not use this shape; they are a non-200 status with
/// plain error text as the body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvokeResponse {
    pub result: Value,
}

impl InvokeResponse {
    pub fn new(result: Value) -> Self {
        InvokeResponse { result }
    }
}
