use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "display": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "top_n": { "type": "integer", "minimum": 1 },
                    "code_scanning": { "$ref": "#/$defs/section" },
                    "dependabot": { "$ref": "#/$defs/section" },
                    "secret_scanning": { "$ref": "#/$defs/section" }
                }
            },
            "output": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "directory": { "type": "string" },
                    "format": { "type": "string", "enum": ["markdown", "html", "json"] }
                }
            }
        },
        "$defs": {
            "section": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "show_severity": { "type": "boolean" },
                    "show_by_repository": { "type": "boolean" },
                    "top_only": { "type": "boolean" }
                }
            }
        }
    })
});
