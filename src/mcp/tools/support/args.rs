use crate::mcp::tools::{ToolError, ToolMeta};
use rmcp::model::JsonObject;
use rmcp::schemars::{self, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON schema of `A` as a plain object, ready to be advertised to clients.
pub fn schema_for<A: JsonSchema>() -> JsonObject {
    let schema = schemars::schema_for!(A);
    match serde_json::to_value(schema) {
        Ok(Value::Object(map)) => map,
        _ => JsonObject::new(),
    }
}

/// Checks `args` against the schema of `A`, then deserializes them.
///
/// The schema pass produces messages naming the offending field, which serde
/// alone does not do for type mismatches.
pub fn parse_args<A>(tool: ToolMeta, args: JsonObject) -> Result<A, ToolError>
where
    A: DeserializeOwned + JsonSchema,
{
    validate(&schema_for::<A>(), &args).map_err(|message| ToolError::invalid(tool, message))?;
    serde_json::from_value(Value::Object(args)).map_err(|e| ToolError::invalid(tool, e.to_string()))
}

/// Treats blank optional strings the same as absent ones.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn validate(schema: &JsonObject, args: &JsonObject) -> Result<(), String> {
    if let Some(Value::Array(required)) = schema.get("required") {
        for field in required.iter().filter_map(Value::as_str) {
            if args.get(field).is_none_or(Value::is_null) {
                return Err(format!("missing required field `{}`", field));
            }
        }
    }

    let Some(Value::Object(properties)) = schema.get("properties") else {
        return Ok(());
    };

    for (field, value) in args {
        if value.is_null() {
            continue;
        }
        if let Some(property) = properties.get(field) {
            check(schema, property, value).map_err(|e| format!("field `{}` {}", field, e))?;
        }
    }
    Ok(())
}

fn resolve<'a>(root: &'a JsonObject, schema: &'a Value) -> &'a Value {
    let Some(Value::String(reference)) = schema.get("$ref") else {
        return schema;
    };
    let name = reference.rsplit('/').next().unwrap_or_default();
    root.get("$defs")
        .or_else(|| root.get("definitions"))
        .and_then(|defs| defs.get(name))
        .unwrap_or(schema)
}

fn check(root: &JsonObject, schema: &Value, value: &Value) -> Result<(), String> {
    let schema = resolve(root, schema);

    for key in ["anyOf", "oneOf"] {
        if let Some(Value::Array(branches)) = schema.get(key) {
            let mut first_error = None;
            for branch in branches {
                match check(root, branch, value) {
                    Ok(()) => return Ok(()),
                    Err(e) => {
                        first_error.get_or_insert(e);
                    }
                }
            }
            return Err(first_error.unwrap_or_else(|| "has an unsupported value".to_string()));
        }
    }

    if let Some(Value::Array(allowed)) = schema.get("enum")
        && !allowed.contains(value)
    {
        let names: Vec<String> = allowed.iter().map(Value::to_string).collect();
        return Err(format!("must be one of {}", names.join(", ")));
    }

    if let Some(Value::String(allowed)) = schema.get("const")
        && value.as_str() != Some(allowed.as_str())
    {
        return Err(format!("must be \"{}\"", allowed));
    }

    let types: Vec<&str> = match schema.get("type") {
        Some(Value::String(t)) => vec![t.as_str()],
        Some(Value::Array(ts)) => ts.iter().filter_map(Value::as_str).collect(),
        _ => return Ok(()),
    };

    if !types.iter().any(|t| matches_type(t, value)) {
        return Err(format!("must be of type {}", types.join(" or ")));
    }

    if let (Some(minimum), Some(n)) = (schema.get("minimum").and_then(Value::as_f64), value.as_f64())
        && n < minimum
    {
        return Err(format!("must be at least {}", minimum));
    }

    if let (Some(maximum), Some(n)) = (schema.get("maximum").and_then(Value::as_f64), value.as_f64())
        && n > maximum
    {
        return Err(format!("must be at most {}", maximum));
    }

    if let (Some((low, high)), Some(n)) = (
        schema.get("format").and_then(Value::as_str).and_then(integer_bounds),
        value.as_f64(),
    ) && (n < low || n > high)
    {
        return Err(format!("must be between {} and {}", low, high));
    }

    if let (Some(items), Value::Array(values)) = (schema.get("items"), value) {
        for (index, item) in values.iter().enumerate() {
            check(root, items, item).map_err(|e| format!("item {} {}", index, e))?;
        }
    }

    Ok(())
}

/// Range of the integer formats schemars emits for fixed-width integers.
fn integer_bounds(format: &str) -> Option<(f64, f64)> {
    let bounds = match format {
        "uint8" => (0.0, u8::MAX as f64),
        "uint16" => (0.0, u16::MAX as f64),
        "uint32" => (0.0, u32::MAX as f64),
        "int8" => (i8::MIN as f64, i8::MAX as f64),
        "int16" => (i16::MIN as f64, i16::MAX as f64),
        "int32" => (i32::MIN as f64, i32::MAX as f64),
        _ => return None,
    };
    Some(bounds)
}

fn matches_type(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}
