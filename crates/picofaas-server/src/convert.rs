//! JSON <-> JavaScript value conversion.
//!
//! Arguments arrive as JSON and must cross into Boa as `JsValue`s; function
//! results cross back the other way. Mapping is the obvious one (null,
//! bool, number, string, array, object). JavaScript-only values degrade:
//! `undefined` and symbols become JSON `null`, and symbol-keyed properties
//! are skipped when converting objects.

use boa_engine::object::builtins::JsArray;
use boa_engine::object::JsObject;
use boa_engine::property::PropertyKey;
use boa_engine::value::JsValue;
use boa_engine::{js_string, Context};
use picofaas_common::protocol::error::{FaasError, Result};
use serde_json::Value;

/// Converts a JSON value to a Boa `JsValue`.
pub fn json_to_js(json: Value, ctx: &mut Context) -> Result<JsValue> {
    match json {
        Value::Null => Ok(JsValue::null()),
        Value::Bool(b) => Ok(JsValue::new(b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64().and_then(|i| i32::try_from(i).ok()) {
                return Ok(JsValue::new(i));
            }
            n.as_f64()
                .map(JsValue::new)
                .ok_or_else(|| FaasError::InvalidRequest("number out of range".to_string()))
        }
        Value::String(s) => Ok(JsValue::new(js_string!(s))),
        Value::Array(items) => {
            let array = JsArray::new(ctx);
            for item in items {
                let element = json_to_js(item, ctx)?;
                array
                    .push(element, ctx)
                    .map_err(|e| FaasError::Execution(format!("failed to build argument array: {}", e)))?;
            }
            Ok(array.into())
        }
        Value::Object(fields) => {
            let object = JsObject::with_object_proto(ctx.intrinsics());
            for (key, value) in fields {
                let element = json_to_js(value, ctx)?;
                object
                    .create_data_property_or_throw(js_string!(key.clone()), element, ctx)
                    .map_err(|e| {
                        FaasError::Execution(format!("failed to set property '{}': {}", key, e))
                    })?;
            }
            Ok(object.into())
        }
    }
}

/// Converts a Boa `JsValue` to a JSON value.
pub fn js_to_json(value: JsValue, ctx: &mut Context) -> Result<Value> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }

    if let Some(b) = value.as_boolean() {
        return Ok(Value::Bool(b));
    }

    if let Some(i) = value.as_i32() {
        return Ok(Value::Number(i.into()));
    }

    if let Some(n) = value.as_number() {
        // Whole numbers serialize as JSON integers, mirroring JSON.stringify.
        const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
        if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
            return Ok(Value::Number((n as i64).into()));
        }
        return serde_json::Number::from_f64(n)
            .map(Value::Number)
            .ok_or_else(|| FaasError::Execution(format!("result number {} is not JSON-encodable", n)));
    }

    if let Some(s) = value.as_string() {
        let text = s
            .to_std_string()
            .map_err(|e| FaasError::Execution(format!("result string is not valid UTF-8: {:?}", e)))?;
        return Ok(Value::String(text));
    }

    if let Some(object) = value.as_object() {
        if object.is_array() {
            let array = JsArray::from_object(object.clone())
                .map_err(|e| FaasError::Execution(format!("failed to read result array: {}", e)))?;
            let length: usize = array
                .length(ctx)
                .map_err(|e| FaasError::Execution(format!("failed to read array length: {}", e)))?
                .try_into()
                .map_err(|_| FaasError::Execution("array length overflow".to_string()))?;

            let mut items = Vec::with_capacity(length);
            for i in 0..length {
                let element = array
                    .get(i, ctx)
                    .map_err(|e| FaasError::Execution(format!("failed to read array element {}: {}", i, e)))?;
                items.push(js_to_json(element, ctx)?);
            }
            return Ok(Value::Array(items));
        }

        let keys = object
            .own_property_keys(ctx)
            .map_err(|e| FaasError::Execution(format!("failed to read result keys: {}", e)))?;

        let mut fields = serde_json::Map::new();
        for key in keys {
            let name = match &key {
                PropertyKey::String(s) => s.to_std_string().map_err(|e| {
                    FaasError::Execution(format!("result key is not valid UTF-8: {:?}", e))
                })?,
                PropertyKey::Index(i) => i.get().to_string(),
                // Symbol keys have no JSON representation
                PropertyKey::Symbol(_) => continue,
            };

            let property = object
                .get(key.clone(), ctx)
                .map_err(|e| FaasError::Execution(format!("failed to read property '{}': {}", name, e)))?;
            fields.insert(name, js_to_json(property, ctx)?);
        }
        return Ok(Value::Object(fields));
    }

    // Symbols and anything else without a JSON mapping
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roundtrip(value: Value) -> Value {
        let mut ctx = Context::default();
        let js = json_to_js(value, &mut ctx).unwrap();
        js_to_json(js, &mut ctx).unwrap()
    }

    #[test]
    fn test_scalar_roundtrips() {
        assert_eq!(roundtrip(json!(null)), json!(null));
        assert_eq!(roundtrip(json!(true)), json!(true));
        assert_eq!(roundtrip(json!(42)), json!(42));
        assert_eq!(roundtrip(json!(-1.5)), json!(-1.5));
        assert_eq!(roundtrip(json!("hello")), json!("hello"));
    }

    #[test]
    fn test_array_roundtrip_preserves_order() {
        let value = json!([3, "one", null, [true]]);
        assert_eq!(roundtrip(value.clone()), value);
    }

    #[test]
    fn test_nested_object_roundtrip() {
        let value = json!({"a": {"b": [1, 2]}, "c": "d"});
        assert_eq!(roundtrip(value.clone()), value);
    }

    #[test]
    fn test_undefined_becomes_null() {
        let mut ctx = Context::default();
        let result = js_to_json(JsValue::undefined(), &mut ctx).unwrap();
        assert_eq!(result, json!(null));
    }
}
