use boa_engine::object::JsObject;
use boa_engine::value::JsValue;
use boa_engine::{Context, Source};
use picofaas_common::protocol::error::{FaasError, Result};
use serde_json::Value;

use crate::convert::{js_to_json, json_to_js};

/// Evaluates transmitted function source against call arguments.
///
/// Every invocation gets a fresh Boa [`Context`]: contexts carry their own
/// string interner and are not thread-safe, so a shared context would
/// serialize all requests. A fresh context also guarantees that no
/// JavaScript state survives from one invocation to the next.
pub struct Engine;

impl Engine {
    /// Runs `source` (the text of a single function expression) with `args`.
    ///
    /// The source is evaluated to a function value, the arguments are
    /// converted JSON→JS, the function is called, and its return value is
    /// converted back JS→JSON. A function that returns `undefined` yields
    /// JSON `null`.
    ///
    /// # Errors
    ///
    /// - [`FaasError::InvalidRequest`] if the source does not parse or does
    ///   not evaluate to a callable value
    /// - [`FaasError::Execution`] if the function throws
    pub fn execute(source: &str, args: &[Value]) -> Result<Value> {
        let mut ctx = Context::default();
        let func = Self::eval_function(source, &mut ctx)?;

        let js_args = args
            .iter()
            .map(|arg| json_to_js(arg.clone(), &mut ctx))
            .collect::<Result<Vec<_>>>()?;

        let result = func
            .call(&JsValue::undefined(), &js_args, &mut ctx)
            .map_err(|e| FaasError::Execution(e.to_string()))?;

        js_to_json(result, &mut ctx)
    }

    /// Checks that `source` parses and evaluates to a callable value.
    ///
    /// Used at deploy time so a broken function is rejected when it is
    /// stored rather than at its first invocation.
    pub fn check(source: &str) -> Result<()> {
        let mut ctx = Context::default();
        Self::eval_function(source, &mut ctx).map(|_| ())
    }

    fn eval_function(source: &str, ctx: &mut Context) -> Result<JsObject> {
        // Parenthesized so `function f() {}` parses as an expression
        // rather than a declaration.
        let wrapped = format!("({})", source);
        let value = ctx
            .eval(Source::from_bytes(&wrapped))
            .map_err(|e| FaasError::InvalidRequest(format!("failed to evaluate function source: {}", e)))?;

        let object = value.as_object().cloned().ok_or_else(|| {
            FaasError::InvalidRequest("source does not evaluate to a function".to_string())
        })?;
        if !object.is_callable() {
            return Err(FaasError::InvalidRequest(
                "source does not evaluate to a function".to_string(),
            ));
        }
        Ok(object)
    }
}
