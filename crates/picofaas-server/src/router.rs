//! Request routing for the picofaas server.
//!
//! The router maps method + path to the run/deploy/invoke handlers and
//! turns handler errors into HTTP responses: a non-200 status whose body
//! is the error's Display text. Clients surface that body verbatim, so it
//! is the whole error contract.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};
use picofaas_common::protocol::error::{FaasError, Result};
use picofaas_common::protocol::types::{
    DeployRequest, InvokeRequest, InvokeResponse, NamedInvokeRequest,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::engine::Engine;
use crate::registry::Registry;

const BANNER: &str = "picofaas";

/// Dispatches parsed HTTP requests to handlers.
pub struct Router {
    registry: Arc<Registry>,
}

impl Router {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Handles one request, always producing a response.
    pub fn handle(&self, method: &Method, path: &str, body: &[u8]) -> Response<Full<Bytes>> {
        if method == Method::GET && path == "/" {
            return text_response(StatusCode::OK, BANNER);
        }
        if method == Method::GET && path == "/_info" {
            return json_response(StatusCode::OK, &self.info());
        }

        match self.route(method, path, body) {
            Ok(result) => json_response(StatusCode::OK, &InvokeResponse::new(result)),
            Err(e) => text_response(status_for(&e), &e.to_string()),
        }
    }

    fn route(&self, method: &Method, path: &str, body: &[u8]) -> Result<Value> {
        if method != Method::POST {
            return Err(FaasError::MethodNotAllowed(method.to_string()));
        }

        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            ["run"] => self.run(body),
            ["functions", name, "deploy"] => self.deploy(name, body),
            ["functions", name, "invoke"] => self.invoke(name, body),
            _ => Err(FaasError::RouteNotFound(path.to_string())),
        }
    }

    /// `POST /run` - execute the function in the request body.
    fn run(&self, body: &[u8]) -> Result<Value> {
        let request: InvokeRequest = parse_body(body)?;
        let count = self.registry.record_invocation();
        tracing::debug!("run invocation #{}", count);
        Engine::execute(&request.func, &request.args)
    }

    /// `POST /functions/{name}/deploy` - validate and store a function.
    fn deploy(&self, name: &str, body: &[u8]) -> Result<Value> {
        let request: DeployRequest = parse_body(body)?;
        Engine::check(&request.func)?;
        self.registry.deploy(name, request.func.as_str());
        tracing::info!("deployed function '{}'", name);
        Ok(json!({ "function": name }))
    }

    /// `POST /functions/{name}/invoke` - execute a stored function.
    ///
    /// An empty body is accepted and means no arguments.
    fn invoke(&self, name: &str, body: &[u8]) -> Result<Value> {
        let request: NamedInvokeRequest = if body.is_empty() {
            NamedInvokeRequest::default()
        } else {
            parse_body(body)?
        };

        let source = self
            .registry
            .get(name)
            .ok_or_else(|| FaasError::FunctionNotFound(name.to_string()))?;

        let count = self.registry.record_invocation();
        tracing::debug!("invoke '{}' invocation #{}", name, count);
        Engine::execute(&source, &request.args)
    }

    fn info(&self) -> Value {
        json!({
            "server": BANNER,
            "version": env!("CARGO_PKG_VERSION"),
            "invocations": self.registry.invocations(),
            "functions": self.registry.len(),
        })
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| FaasError::InvalidRequest(format!("invalid request body: {}", e)))
}

fn status_for(err: &FaasError) -> StatusCode {
    match err {
        FaasError::InvalidRequest(_) | FaasError::Json(_) => StatusCode::BAD_REQUEST,
        FaasError::FunctionNotFound(_) | FaasError::RouteNotFound(_) => StatusCode::NOT_FOUND,
        FaasError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, payload: &T) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(payload).unwrap_or_default();

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

fn text_response(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn test_router() -> Router {
        Router::new(Arc::new(Registry::new()))
    }

    async fn body_text(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response<Full<Bytes>>) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_run_route() {
        let router = test_router();
        let body = serde_json::to_vec(&InvokeRequest::new(
            "(a, b) => a + b",
            vec![json!(2), json!(3)],
        ))
        .unwrap();

        let response = router.handle(&Method::POST, "/run", &body);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "result": 5 }));
    }

    #[tokio::test]
    async fn test_run_with_bad_json_is_400() {
        let router = test_router();

        let response = router.handle(&Method::POST, "/run", b"{not json");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("invalid request body"));
    }

    #[tokio::test]
    async fn test_run_with_non_function_source_is_400() {
        let router = test_router();
        let body = serde_json::to_vec(&InvokeRequest::new("42", vec![])).unwrap();

        let response = router.handle(&Method::POST, "/run", &body);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("function"));
    }

    #[tokio::test]
    async fn test_run_execution_error_is_500_with_error_text() {
        let router = test_router();
        let body = serde_json::to_vec(&InvokeRequest::new(
            "() => { throw new Error('boom'); }",
            vec![],
        ))
        .unwrap();

        let response = router.handle(&Method::POST, "/run", &body);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("boom"));
    }

    #[tokio::test]
    async fn test_deploy_then_invoke() {
        let router = test_router();

        let deploy_body =
            serde_json::to_vec(&DeployRequest::new("(name) => `hi ${name}`")).unwrap();
        let response = router.handle(&Method::POST, "/functions/greet/deploy", &deploy_body);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "result": { "function": "greet" } })
        );

        let invoke_body =
            serde_json::to_vec(&NamedInvokeRequest::new(vec![json!("ada")])).unwrap();
        let response = router.handle(&Method::POST, "/functions/greet/invoke", &invoke_body);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "result": "hi ada" }));
    }

    #[tokio::test]
    async fn test_deploy_rejects_broken_source() {
        let router = test_router();
        let body = serde_json::to_vec(&DeployRequest::new("this is not js ===")).unwrap();

        let response = router.handle(&Method::POST, "/functions/bad/deploy", &body);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invoke_unknown_function_is_404() {
        let router = test_router();

        let response = router.handle(&Method::POST, "/functions/missing/invoke", b"{}");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("missing"));
    }

    #[tokio::test]
    async fn test_invoke_with_empty_body_means_no_args() {
        let router = test_router();
        let deploy_body = serde_json::to_vec(&DeployRequest::new("() => 7")).unwrap();
        router.handle(&Method::POST, "/functions/seven/deploy", &deploy_body);

        let response = router.handle(&Method::POST, "/functions/seven/invoke", b"");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "result": 7 }));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let router = test_router();

        let response = router.handle(&Method::POST, "/nope", b"{}");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("no such route"));
    }

    #[tokio::test]
    async fn test_unsupported_method_is_405() {
        let router = test_router();

        let response = router.handle(&Method::DELETE, "/run", b"");

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(body_text(response).await.contains("not allowed"));
    }

    #[tokio::test]
    async fn test_root_banner() {
        let router = test_router();

        let response = router.handle(&Method::GET, "/", b"");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "picofaas");
    }

    #[tokio::test]
    async fn test_info_counts_invocations_and_functions() {
        let router = test_router();
        let run_body =
            serde_json::to_vec(&InvokeRequest::new("() => 1", vec![])).unwrap();
        router.handle(&Method::POST, "/run", &run_body);
        router.handle(&Method::POST, "/run", &run_body);

        let deploy_body = serde_json::to_vec(&DeployRequest::new("() => 2")).unwrap();
        router.handle(&Method::POST, "/functions/two/deploy", &deploy_body);

        let response = router.handle(&Method::GET, "/_info", b"");
        let info = body_json(response).await;

        assert_eq!(info["server"], json!("picofaas"));
        assert_eq!(info["invocations"], json!(2));
        assert_eq!(info["functions"], json!(1));
    }

    #[tokio::test]
    async fn test_redeploy_overwrites_function() {
        let router = test_router();
        let first = serde_json::to_vec(&DeployRequest::new("() => 'old'")).unwrap();
        let second = serde_json::to_vec(&DeployRequest::new("() => 'new'")).unwrap();
        router.handle(&Method::POST, "/functions/f/deploy", &first);
        router.handle(&Method::POST, "/functions/f/deploy", &second);

        let response = router.handle(&Method::POST, "/functions/f/invoke", b"{}");

        assert_eq!(body_json(response).await, json!({ "result": "new" }));
    }
}
