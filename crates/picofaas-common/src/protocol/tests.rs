//! Tests for the wire protocol module
//!
//! These tests pin the exact JSON shapes the client and server exchange,
//! since field names and argument order are part of the contract.

#[cfg(test)]
mod tests {
    use super::super::*;
    use serde_json::json;

    #[test]
    fn test_invoke_request_creation() {
        let req = InvokeRequest::new("(x) => x", vec![json!(1), json!("two")]);
        assert_eq!(req.func, "(x) => x");
        assert_eq!(req.args, vec![json!(1), json!("two")]);
    }

    #[test]
    fn test_invoke_request_wire_shape() {
        let req = InvokeRequest::new("(w, e) => `Hello, ${w}${e}`", vec![json!("world"), json!(3)]);
        let serialized = serde_json::to_string(&req).unwrap();
        assert!(serialized.contains(r#""func":"(w, e) => `Hello, ${w}${e}`""#));
        assert!(serialized.contains(r#""args":["world",3]"#));
    }

    #[test]
    fn test_invoke_request_roundtrip_preserves_arg_order() {
        let args = vec![json!(null), json!(true), json!(1.5), json!([1, 2]), json!({"k": "v"})];
        let req = InvokeRequest::new("() => 0", args.clone());
        let serialized = serde_json::to_value(&req).unwrap();
        let deserialized: InvokeRequest = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized.args, args);
    }

    #[test]
    fn test_deploy_request_wire_shape() {
        let req = DeployRequest::new("() => 42");
        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(serialized, r#"{"func":"() => 42"}"#);
    }

    #[test]
    fn test_named_invoke_request_args_default_to_empty() {
        let req: NamedInvokeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.args.is_empty());
    }

    #[test]
    fn test_invoke_response_roundtrip() {
        let resp = InvokeResponse::new(json!({"pi": 3.14}));
        let serialized = serde_json::to_value(&resp).unwrap();
        let deserialized: InvokeResponse = serde_json::from_value(serialized).unwrap();
        assert_eq!(resp, deserialized);
    }

    #[test]
    fn test_invoke_response_wire_shape() {
        let resp = InvokeResponse::new(json!("Hello, world3"));
        let serialized = serde_json::to_string(&resp).unwrap();
        assert_eq!(serialized, r#"{"result":"Hello, world3"}"#);
    }

    #[test]
    fn test_http_error_display_embeds_body() {
        let err = FaasError::Http {
            status: 500,
            body: "boom".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_malformed_response_display() {
        let err = FaasError::MalformedResponse("missing result field".to_string());
        assert!(err.to_string().contains("missing result field"));
    }

    #[test]
    fn test_function_not_found_display() {
        let err = FaasError::FunctionNotFound("greet".to_string());
        assert!(err.to_string().contains("greet"));
    }

    #[test]
    fn test_route_not_found_display() {
        let err = FaasError::RouteNotFound("/nope".to_string());
        assert!(err.to_string().contains("/nope"));
    }

    #[test]
    fn test_method_not_allowed_display() {
        let err = FaasError::MethodNotAllowed("DELETE".to_string());
        assert!(err.to_string().contains("DELETE"));
        assert!(err.to_string().contains("not allowed"));
    }
}
