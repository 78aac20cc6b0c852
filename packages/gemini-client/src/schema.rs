//! Type-safe schema generation for Gemini structured outputs.
//!
//! Uses the `schemars` crate to generate a JSON schema from a Rust type, then
//! rewrites it into the OpenAPI subset Gemini's `responseSchema` accepts.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use gemini_client::StructuredOutput;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Answer {
//!     /// One-line summary
//!     summary: String,
//!     links: Vec<String>,
//! }
//!
//! let schema = Answer::gemini_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Formats Gemini understands; anything else schemars emits (`uint32`, `uri`, ...) is dropped.
const SUPPORTED_FORMATS: &[&str] = &["int32", "int64", "float", "double", "enum", "date-time"];

/// Trait for types that can be used as Gemini structured output.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a Gemini-compatible response schema for this type.
    ///
    /// Gemini requires:
    /// 1. Upper-case OpenAPI type names (`OBJECT`, `STRING`, ...)
    /// 2. `nullable: true` instead of `["string", "null"]` unions
    /// 3. Fully inlined schemas (no `$ref`, no `definitions`)
    /// 4. No JSON-Schema-only keywords (`$schema`, `title`, `additionalProperties`)
    ///
    /// Every object lists all of its properties in `required` and carries a
    /// `propertyOrdering` matching field declaration order.
    fn gemini_schema() -> Value {
        let root = serde_json::to_value(schema_for!(Self)).unwrap_or_default();
        let definitions = root.get("definitions").cloned().unwrap_or(Value::Null);
        to_gemini(&root, &definitions)
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Convert one schema node (and everything below it).
fn to_gemini(schema: &Value, definitions: &Value) -> Value {
    let Value::Object(map) = schema else {
        return schema.clone();
    };

    // "#/definitions/Source" -> inlined definition, siblings layered on top
    if let Some(Value::String(path)) = map.get("$ref") {
        if let Some(def) = path
            .strip_prefix("#/definitions/")
            .and_then(|name| definitions.get(name))
        {
            let mut inlined = to_gemini(def, definitions);
            let mut siblings = map.clone();
            siblings.remove("$ref");
            overlay(&mut inlined, to_gemini(&Value::Object(siblings), definitions));
            return inlined;
        }
    }

    // schemars wraps a documented $ref field as {"allOf": [{"$ref": ...}], "description": ...}
    if let Some(Value::Array(all)) = map.get("allOf") {
        if all.len() == 1 {
            let mut inner = to_gemini(&all[0], definitions);
            let mut siblings = map.clone();
            siblings.remove("allOf");
            overlay(&mut inner, to_gemini(&Value::Object(siblings), definitions));
            return inner;
        }
    }

    // Option<Struct> comes out as {"anyOf": [{"$ref": ...}, {"type": "null"}]}
    if let Some(Value::Array(any)) = map.get("anyOf") {
        let non_null: Vec<&Value> = any.iter().filter(|s| !is_null_schema(s)).collect();
        if non_null.len() == 1 && any.len() == 2 {
            let mut inner = to_gemini(non_null[0], definitions);
            let mut siblings = map.clone();
            siblings.remove("anyOf");
            overlay(&mut inner, to_gemini(&Value::Object(siblings), definitions));
            if let Value::Object(obj) = &mut inner {
                obj.insert("nullable".into(), Value::Bool(true));
            }
            return inner;
        }
    }

    let mut out = Map::new();
    for (key, value) in map {
        match key.as_str() {
            "type" => {
                let (ty, nullable) = convert_type(value);
                if let Some(ty) = ty {
                    out.insert("type".into(), Value::String(ty));
                }
                if nullable {
                    out.insert("nullable".into(), Value::Bool(true));
                }
            }
            "properties" => {
                if let Value::Object(props) = value {
                    let converted = props
                        .iter()
                        .map(|(name, s)| (name.clone(), to_gemini(s, definitions)))
                        .collect();
                    out.insert("properties".into(), Value::Object(converted));
                }
            }
            "items" => {
                out.insert("items".into(), to_gemini(value, definitions));
            }
            "anyOf" | "oneOf" => {
                if let Value::Array(options) = value {
                    let converted = options
                        .iter()
                        .filter(|s| !is_null_schema(s))
                        .map(|s| to_gemini(s, definitions))
                        .collect();
                    out.insert("anyOf".into(), Value::Array(converted));
                }
            }
            "format" => {
                if value
                    .as_str()
                    .is_some_and(|f| SUPPORTED_FORMATS.contains(&f))
                {
                    out.insert(key.clone(), value.clone());
                }
            }
            "description" | "enum" | "nullable" | "minItems" | "maxItems" | "minimum"
            | "maximum" | "minLength" | "maxLength" | "pattern" => {
                out.insert(key.clone(), value.clone());
            }
            // $schema, title, definitions, additionalProperties, default, examples, ...
            _ => {}
        }
    }

    if let Some(Value::Object(props)) = out.get("properties") {
        let names: Vec<Value> = props.keys().map(|k| Value::String(k.clone())).collect();
        out.insert("required".into(), Value::Array(names.clone()));
        out.insert("propertyOrdering".into(), Value::Array(names));
    }

    Value::Object(out)
}

/// Map a JSON Schema `type` to Gemini's upper-case type plus nullability.
fn convert_type(value: &Value) -> (Option<String>, bool) {
    match value {
        Value::String(ty) if ty == "null" => (None, true),
        Value::String(ty) => (Some(ty.to_uppercase()), false),
        Value::Array(types) => {
            let nullable = types.iter().any(|t| t == "null");
            // Gemini has no unions; the first non-null type wins
            let ty = types
                .iter()
                .filter_map(Value::as_str)
                .find(|t| *t != "null")
                .map(str::to_uppercase);
            (ty, nullable)
        }
        _ => (None, false),
    }
}

fn is_null_schema(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
}

/// Copy every key of `extra` onto `target`, replacing existing keys.
fn overlay(target: &mut Value, extra: Value) {
    if let (Value::Object(target), Value::Object(extra)) = (target, extra) {
        for (k, v) in extra {
            target.insert(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    #[serde(rename_all = "UPPERCASE")]
    enum Grade {
        Pass,
        Fail,
    }

    #[derive(Deserialize, JsonSchema)]
    struct Link {
        title: String,
        url: String,
    }

    /// A graded answer.
    #[derive(Deserialize, JsonSchema)]
    struct Answer {
        /// The grade.
        grade: Grade,
        /// Why.
        reason: String,
        /// Supporting links.
        #[schemars(length(min = 2))]
        links: Vec<Link>,
        note: Option<String>,
    }

    fn contains_key(value: &Value, key: &str) -> bool {
        match value {
            Value::Object(map) => {
                map.contains_key(key) || map.values().any(|v| contains_key(v, key))
            }
            Value::Array(arr) => arr.iter().any(|v| contains_key(v, key)),
            _ => false,
        }
    }

    #[test]
    fn test_root_is_object_without_json_schema_keywords() {
        let schema = Answer::gemini_schema();
        let obj = schema.as_object().unwrap();

        assert_eq!(obj.get("type"), Some(&Value::String("OBJECT".into())));
        assert!(!obj.contains_key("$schema"));
        assert!(!obj.contains_key("definitions"));
        assert!(!obj.contains_key("title"));
        assert!(!contains_key(&schema, "$ref"));
        assert!(!contains_key(&schema, "allOf"));
        assert!(!contains_key(&schema, "additionalProperties"));
    }

    #[test]
    fn test_property_ordering_follows_declaration() {
        let schema = Answer::gemini_schema();
        let ordering: Vec<&str> = schema["propertyOrdering"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();

        assert_eq!(ordering, vec!["grade", "reason", "links", "note"]);
    }

    #[test]
    fn test_all_properties_required() {
        let schema = Answer::gemini_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();

        for name in ["grade", "reason", "links", "note"] {
            assert!(required.contains(&name), "{} should be required", name);
        }
    }

    #[test]
    fn test_enum_inlined_with_description() {
        let schema = Answer::gemini_schema();
        let grade = &schema["properties"]["grade"];

        assert_eq!(grade["type"], "STRING");
        assert_eq!(grade["enum"], serde_json::json!(["PASS", "FAIL"]));
        assert_eq!(grade["description"], "The grade.");
    }

    #[test]
    fn test_nested_items_inlined() {
        let schema = Answer::gemini_schema();
        let links = &schema["properties"]["links"];

        assert_eq!(links["type"], "ARRAY");
        assert_eq!(links["minItems"], 2);

        let item = &links["items"];
        assert_eq!(item["type"], "OBJECT");
        // a property literally named "title" survives keyword stripping
        assert_eq!(item["properties"]["title"]["type"], "STRING");
        assert_eq!(item["properties"]["url"]["type"], "STRING");
        assert_eq!(item["required"], serde_json::json!(["title", "url"]));
    }

    #[test]
    fn test_option_becomes_nullable() {
        let schema = Answer::gemini_schema();
        let note = &schema["properties"]["note"];

        assert_eq!(note["type"], "STRING");
        assert_eq!(note["nullable"], true);
    }

    #[test]
    fn test_optional_struct_collapses_any_of() {
        #[derive(Deserialize, JsonSchema)]
        struct Wrapper {
            link: Option<Link>,
        }

        let schema = Wrapper::gemini_schema();
        let link = &schema["properties"]["link"];

        assert!(link.get("anyOf").is_none());
        assert_eq!(link["type"], "OBJECT");
        assert_eq!(link["nullable"], true);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Answer::type_name(), "Answer");
    }
}
