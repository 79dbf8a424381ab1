//! Helpers for loosely-typed JSON payloads (cookies, form details)

use serde_json::{Map, Value};

use crate::error::FormatError;

/// Default key that `nest_keys` moves values under
pub const DEFAULT_NESTED_KEY: &str = "details";

/// Target type for `typecast`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    Int,
    Float,
    String,
    Bool,
    /// Leave the value untouched
    Raw,
}

impl TypeHint {
    /// Parse a type name; unknown names pass values through unchanged
    pub fn from_name(name: &str) -> Self {
        match name {
            "int" | "integer" => TypeHint::Int,
            "float" => TypeHint::Float,
            "string" => TypeHint::String,
            "bool" | "boolean" => TypeHint::Bool,
            _ => TypeHint::Raw,
        }
    }
}

/// Decode a JSON object. `None`, `"null"` and non-object documents decode to an empty map.
pub fn decode_object(json: Option<&str>) -> Result<Map<String, Value>, FormatError> {
    let json = match json {
        None | Some("null") => return Ok(Map::new()),
        Some(json) => json,
    };

    let value: Value =
        serde_json::from_str(json).map_err(|e| FormatError::JsonParse(e.to_string()))?;

    Ok(match value {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

/// Move `keys` of `map` into a nested object named `nested_name`, dropping nulls
pub fn nest_keys(
    mut map: Map<String, Value>,
    keys: &[&str],
    nested_name: &str,
) -> Result<Map<String, Value>, FormatError> {
    let mut nested = match map.remove(nested_name) {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(existing)) => existing,
        Some(_) => return Err(FormatError::NestedKeyConflict(nested_name.to_string())),
    };

    for key in keys {
        match map.remove(*key) {
            Some(Value::Null) | None => {}
            Some(value) => {
                nested.insert((*key).to_string(), value);
            }
        }
    }

    map.insert(nested_name.to_string(), Value::Object(nested));
    Ok(map)
}

/// Coerce a loosely-typed value into the hinted type
pub fn typecast(hint: TypeHint, value: &Value) -> Value {
    match hint {
        TypeHint::Int => Value::from(as_f64(value).trunc() as i64),
        TypeHint::Float => Value::from(as_f64(value)),
        TypeHint::String => match value {
            Value::String(s) => Value::String(s.clone()),
            Value::Null => Value::String(String::new()),
            Value::Bool(true) => Value::String("1".to_string()),
            Value::Bool(false) => Value::String(String::new()),
            other => Value::String(other.to_string()),
        },
        TypeHint::Bool => Value::Bool(match value {
            Value::String(s) if s == "true" => true,
            Value::String(s) if s == "false" => false,
            other => is_truthy(other),
        }),
        TypeHint::Raw => value.clone(),
    }
}

fn as_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => leading_number(s),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

/// Numeric prefix of a string (`"12abc"` -> 12), 0 when there is none
fn leading_number(s: &str) -> f64 {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .take_while(|(i, c)| {
            c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+'))
        })
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    (0..=end)
        .rev()
        .find_map(|len| s.get(..len).and_then(|p| p.parse::<f64>().ok()))
        .unwrap_or(0.0)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_object() {
        assert!(decode_object(None).unwrap().is_empty());
        assert!(decode_object(Some("null")).unwrap().is_empty());
        assert!(decode_object(Some("[1,2]")).unwrap().is_empty());

        let map = decode_object(Some(r#"{"settings":{"currency":"EUR"}}"#)).unwrap();
        assert_eq!(map["settings"]["currency"], "EUR");

        assert!(matches!(
            decode_object(Some("{not json")),
            Err(FormatError::JsonParse(_))
        ));
    }

    #[test]
    fn test_nest_keys() {
        let map = json!({"first_name": "Ada", "middle_name": null, "email": "ada@example.com"});
        let Value::Object(map) = map else { unreachable!() };

        let nested = nest_keys(map, &["first_name", "middle_name", "missing"], DEFAULT_NESTED_KEY)
            .unwrap();

        assert_eq!(
            Value::Object(nested),
            json!({"email": "ada@example.com", "details": {"first_name": "Ada"}})
        );
    }

    #[test]
    fn test_nest_keys_merges_existing() {
        let Value::Object(map) = json!({"details": {"a": 1}, "b": 2}) else { unreachable!() };
        let nested = nest_keys(map, &["b"], "details").unwrap();
        assert_eq!(Value::Object(nested), json!({"details": {"a": 1, "b": 2}}));
    }

    #[test]
    fn test_nest_keys_conflict() {
        let Value::Object(map) = json!({"details": "text"}) else { unreachable!() };
        assert_eq!(
            nest_keys(map, &["a"], "details"),
            Err(FormatError::NestedKeyConflict("details".to_string()))
        );
    }

    #[test]
    fn test_typecast() {
        assert_eq!(typecast(TypeHint::Int, &json!("42abc")), json!(42));
        assert_eq!(typecast(TypeHint::Int, &json!(3.9)), json!(3));
        assert_eq!(typecast(TypeHint::Float, &json!("2.5")), json!(2.5));
        assert_eq!(typecast(TypeHint::String, &json!([1, 2])), json!("[1,2]"));
        assert_eq!(typecast(TypeHint::String, &json!(7)), json!("7"));
        assert_eq!(typecast(TypeHint::Bool, &json!("false")), json!(false));
        assert_eq!(typecast(TypeHint::Bool, &json!("true")), json!(true));
        assert_eq!(typecast(TypeHint::Bool, &json!("0")), json!(false));
        assert_eq!(typecast(TypeHint::Bool, &json!(1)), json!(true));
        assert_eq!(typecast(TypeHint::Raw, &json!({"a": 1})), json!({"a": 1}));
    }

    #[test]
    fn test_type_hint_from_name() {
        assert_eq!(TypeHint::from_name("integer"), TypeHint::Int);
        assert_eq!(TypeHint::from_name("boolean"), TypeHint::Bool);
        assert_eq!(TypeHint::from_name("date"), TypeHint::Raw);
    }
}
