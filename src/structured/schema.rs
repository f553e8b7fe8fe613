//! Schema generation utilities.
//!
//! `responseSchema` accepts an OpenAPI subset, not full JSON Schema, so the
//! output of `schemars` is reduced before it is sent.

use serde_json::{json, Map, Value};

/// Keys the Gemini schema subset understands.
const GEMINI_SCHEMA_KEYS: &[&str] = &[
    "type",
    "format",
    "description",
    "nullable",
    "enum",
    "properties",
    "required",
    "items",
    "minItems",
    "maxItems",
    "minimum",
    "maximum",
    "anyOf",
    "propertyOrdering",
];

/// Formats accepted alongside `type`; others (e.g. `uint8`) are dropped.
const GEMINI_FORMATS: &[&str] = &["enum", "date-time", "int32", "int64", "float", "double"];

pub fn json_schema_from_type<T: schemars::JsonSchema>() -> Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(&schema).unwrap_or_else(|_| json!({}))
}

/// Convert a JSON Schema document into the Gemini `responseSchema` subset.
///
/// - `$ref` pointers into `definitions` / `$defs` are inlined
/// - `"type": ["string", "null"]` becomes `"type": "string", "nullable": true`
/// - unsupported keywords and formats are dropped
/// - `propertyOrdering` is added so fields come back in declaration order
pub fn to_gemini_schema(schema: &Value) -> Value {
    let definitions = schema
        .get("definitions")
        .or_else(|| schema.get("$defs"))
        .cloned()
        .unwrap_or(Value::Null);
    convert(schema, &definitions, 0)
}

fn convert(schema: &Value, definitions: &Value, depth: usize) -> Value {
    // Recursive types cannot be expressed inline.
    if depth > 32 {
        return json!({"type": "object"});
    }

    let obj = match schema.as_object() {
        Some(o) => o,
        None => return schema.clone(),
    };

    if let Some(target) = obj.get("$ref").and_then(|r| r.as_str()) {
        let name = target.rsplit('/').next().unwrap_or(target);
        return match definitions.get(name) {
            Some(def) => convert(def, definitions, depth + 1),
            None => json!({"type": "object"}),
        };
    }

    // schemars wraps a described $ref in allOf: [ { $ref } ]
    if let Some(all_of) = obj.get("allOf").and_then(|a| a.as_array()) {
        if all_of.len() == 1 {
            let mut inner = convert(&all_of[0], definitions, depth + 1);
            if let (Some(desc), Some(map)) = (obj.get("description"), inner.as_object_mut()) {
                map.insert("description".into(), desc.clone());
            }
            return inner;
        }
    }

    let mut out = Map::new();
    for (key, value) in obj {
        if !GEMINI_SCHEMA_KEYS.contains(&key.as_str()) {
            continue;
        }
        match key.as_str() {
            "type" => match value {
                Value::Array(types) => {
                    let non_null: Vec<&Value> =
                        types.iter().filter(|t| t.as_str() != Some("null")).collect();
                    if non_null.len() < types.len() {
                        out.insert("nullable".into(), json!(true));
                    }
                    if let Some(first) = non_null.first() {
                        out.insert("type".into(), (*first).clone());
                    }
                }
                other => {
                    out.insert("type".into(), other.clone());
                }
            },
            "properties" => {
                let mut props = Map::new();
                let mut ordering = Vec::new();
                if let Some(map) = value.as_object() {
                    for (name, prop) in map {
                        ordering.push(json!(name));
                        props.insert(name.clone(), convert(prop, definitions, depth + 1));
                    }
                }
                out.insert("properties".into(), Value::Object(props));
                if !obj.contains_key("propertyOrdering") {
                    out.insert("propertyOrdering".into(), Value::Array(ordering));
                }
            }
            "format" => {
                if value
                    .as_str()
                    .map(|f| GEMINI_FORMATS.contains(&f))
                    .unwrap_or(false)
                {
                    out.insert("format".into(), value.clone());
                }
            }
            "items" => {
                out.insert("items".into(), convert(value, definitions, depth + 1));
            }
            "anyOf" => {
                let variants: Vec<Value> = value
                    .as_array()
                    .map(|arr| {
                        arr.iter()
                            .map(|v| convert(v, definitions, depth + 1))
                            .collect()
                    })
                    .unwrap_or_default();
                out.insert("anyOf".into(), Value::Array(variants));
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct CalendarEvent {
        name: String,
        date: String,
        participants: Vec<String>,
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct Room {
        label: Option<String>,
        lights: Vec<Light>,
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct Light {
        brightness: u8,
    }

    #[test]
    fn test_schema_from_type() {
        let schema = json_schema_from_type::<CalendarEvent>();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["participants"]["type"], "array");
    }

    #[test]
    fn test_gemini_schema_strips_unsupported_keys() {
        let schema = to_gemini_schema(&json_schema_from_type::<CalendarEvent>());
        assert!(schema.get("$schema").is_none());
        assert!(schema.get("title").is_none());
        assert_eq!(
            schema["propertyOrdering"],
            json!(["name", "date", "participants"])
        );
        assert_eq!(schema["properties"]["participants"]["items"]["type"], "string");
    }

    #[test]
    fn test_gemini_schema_inlines_refs_and_nullable() {
        let schema = to_gemini_schema(&json_schema_from_type::<Room>());
        assert_eq!(schema["properties"]["label"]["type"], "string");
        assert_eq!(schema["properties"]["label"]["nullable"], true);
        assert_eq!(
            schema["properties"]["lights"]["items"]["properties"]["brightness"]["type"],
            "integer"
        );
        assert!(schema.get("definitions").is_none());
        assert!(schema["properties"]["lights"]["items"]["properties"]["brightness"]
            .get("format")
            .is_none());
    }
}
