use http_body_util::BodyExt;
use hyper::body::Bytes;
use hyper::{Request, StatusCode};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use picofaas_common::config;
use picofaas_common::protocol::error::{FaasError, Result};
use picofaas_common::protocol::types::{DeployRequest, InvokeRequest, NamedInvokeRequest};
use serde_json::Value;

type Body = http_body_util::Full<Bytes>;

/// picofaas client for running and deploying functions.
///
/// Each call is one independent HTTP POST exchange. The client keeps no
/// state between calls, never retries, and imposes no timeout of its own;
/// slow or unreachable servers surface through the underlying HTTP
/// client's behavior as [`FaasError::Transport`].
pub struct FaasClient {
    base_url: String,
    http: Client<HttpConnector, Body>,
}

impl FaasClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// The URL must include the `http://` or `https://` prefix. A trailing
    /// slash is accepted and stripped.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut base_url = base_url.into();
        config::validate_base_url(&base_url)?;
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            base_url,
            http: Client::builder(TokioExecutor::new()).build_http(),
        })
    }

    /// The configured server address, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs a function on the server.
    ///
    /// POSTs `{"func": source, "args": [..]}` to `{base}/run` and returns
    /// the response's `result` field as-is.
    ///
    /// # Errors
    ///
    /// - [`FaasError::Transport`] if the request never completes
    /// - [`FaasError::Http`] for any non-200 status; the message embeds the
    ///   raw response body text
    /// - [`FaasError::MalformedResponse`] if a 200 body is not a JSON
    ///   object with a `result` field
    pub async fn run(&self, source: impl Into<String>, args: Vec<Value>) -> Result<Value> {
        let request = InvokeRequest::new(source, args);
        let url = format!("{}/run", self.base_url);
        self.post(&url, serde_json::to_vec(&request)?).await
    }

    /// Deploys a function under `name`.
    ///
    /// POSTs `{"func": source}` to `{base}/functions/{name}/deploy`.
    /// Whether repeated deploys overwrite is up to the server; the picofaas
    /// server overwrites.
    pub async fn deploy(&self, name: &str, source: impl Into<String>) -> Result<Value> {
        let request = DeployRequest::new(source);
        let url = format!("{}/functions/{}/deploy", self.base_url, name);
        self.post(&url, serde_json::to_vec(&request)?).await
    }

    /// Invokes a previously deployed function by name.
    ///
    /// POSTs `{"args": [..]}` to `{base}/functions/{name}/invoke`.
    pub async fn invoke(&self, name: &str, args: Vec<Value>) -> Result<Value> {
        let request = NamedInvokeRequest::new(args);
        let url = format!("{}/functions/{}/invoke", self.base_url, name);
        self.post(&url, serde_json::to_vec(&request)?).await
    }

    /// Issues one POST and unwraps the `result` field.
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<Value> {
        let request = Request::builder()
            .method("POST")
            .uri(url)
            .header("Content-Type", "application/json")
            .body(Body::new(Bytes::from(body)))
            .map_err(|e| FaasError::Transport(format!("failed to build request: {}", e)))?;

        let response = self
            .http
            .request(request)
            .await
            .map_err(|e| FaasError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| FaasError::Transport(format!("failed to read response body: {}", e)))?
            .to_bytes();

        if status != StatusCode::OK {
            return Err(FaasError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let payload: Value = serde_json::from_slice(&bytes)
            .map_err(|e| FaasError::MalformedResponse(format!("body is not JSON: {}", e)))?;

        match payload {
            Value::Object(mut fields) => fields
                .remove("result")
                .ok_or_else(|| FaasError::MalformedResponse("missing result field".to_string())),
            _ => Err(FaasError::MalformedResponse(
                "body is not a JSON object".to_string(),
            )),
        }
    }
}
