//! Argument contracts for MCP tools
//!
//! An [`ArgumentContract`] describes the fields a tool accepts: each field's
//! kind, whether it is required, and the default used when it is omitted.
//! Contracts are derived from a tool's argument struct through its
//! `schemars` schema, so the schema advertised in `tools/list` and the rules
//! applied in `tools/call` come from the same declaration.
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::ArgumentContract;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct LogArgs {
//!     /// Maximum number of commits
//!     #[serde(default = "default_max")]
//!     max: u32,
//! }
//!
//! let contract = ArgumentContract::of::<LogArgs>()?;
//! let resolved = contract.resolve(None)?; // {"max": 10}
//! ```

use std::sync::Arc;

use schemars::JsonSchema;
use serde_json::{Map, Value};
use thiserror::Error;

/// JSON object as carried by MCP requests and schemas
pub type JsonObject = Map<String, Value>;

/// Semantic type of a declared argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
}

impl FieldKind {
    /// Read the kind from a property schema's `type` keyword.
    ///
    /// Nullable properties (`["string", "null"]`) resolve to their non-null type.
    fn from_property(property: &Value) -> Option<Self> {
        let ty = property.get("type")?;
        let name = match ty {
            Value::String(name) => name.as_str(),
            Value::Array(names) => names
                .iter()
                .filter_map(Value::as_str)
                .find(|name| *name != "null")?,
            _ => return None,
        };

        match name {
            "string" => Some(Self::String),
            "integer" | "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// Whether a field must be supplied, and what fills it when it is not
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Required,
    Optional { default: Option<Value> },
}

/// One declared argument
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub presence: Presence,
    pub description: Option<String>,
}

impl FieldSpec {
    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }

    pub fn default_value(&self) -> Option<&Value> {
        match &self.presence {
            Presence::Optional { default } => default.as_ref(),
            Presence::Required => None,
        }
    }
}

/// Errors raised while building a contract or resolving arguments against it
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractError {
    #[error("Missing required argument: {0}")]
    MissingField(String),

    #[error("Argument '{field}' must be a {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("Argument '{0}' cannot be both required and defaulted")]
    RequiredWithDefault(String),

    #[error("Unsupported schema for '{field}': {reason}")]
    InvalidSchema { field: String, reason: String },
}

/// Declared arguments of one tool, plus the schema advertised for them
#[derive(Debug, Clone)]
pub struct ArgumentContract {
    fields: Vec<FieldSpec>,
    schema: Arc<JsonObject>,
}

impl ArgumentContract {
    /// Derive the contract from an argument type's JSON schema
    pub fn of<T: JsonSchema>() -> Result<Self, ContractError> {
        let schema = schemars::schema_for!(T);
        let value = serde_json::to_value(&schema).map_err(|e| ContractError::InvalidSchema {
            field: "<root>".to_string(),
            reason: e.to_string(),
        })?;

        match value {
            Value::Object(root) => Self::from_schema(root),
            _ => Err(ContractError::InvalidSchema {
                field: "<root>".to_string(),
                reason: "schema is not an object".to_string(),
            }),
        }
    }

    /// Build a contract from an object schema
    ///
    /// Properties listed in `required` are required; every other property is
    /// optional and takes its `default` keyword, if any, as its default.
    pub fn from_schema(mut root: JsonObject) -> Result<Self, ContractError> {
        let required: Vec<&str> = root
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut fields = Vec::new();
        if let Some(properties) = root.get("properties").and_then(Value::as_object) {
            for (name, property) in properties {
                let kind =
                    FieldKind::from_property(property).ok_or_else(|| ContractError::InvalidSchema {
                        field: name.clone(),
                        reason: "expected a string, number, or boolean type".to_string(),
                    })?;

                let default = property.get("default").filter(|d| !d.is_null()).cloned();
                let presence = if required.contains(&name.as_str()) {
                    if default.is_some() {
                        return Err(ContractError::RequiredWithDefault(name.clone()));
                    }
                    Presence::Required
                } else {
                    Presence::Optional { default }
                };

                fields.push(FieldSpec {
                    name: name.clone(),
                    kind,
                    presence,
                    description: property
                        .get("description")
                        .and_then(Value::as_str)
                        .map(String::from),
                });
            }
        }

        root.entry("type")
            .or_insert_with(|| Value::String("object".to_string()));
        root.entry("properties")
            .or_insert_with(|| Value::Object(JsonObject::new()));

        Ok(Self {
            fields,
            schema: Arc::new(root),
        })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Input schema advertised to clients
    pub fn input_schema(&self) -> Arc<JsonObject> {
        Arc::clone(&self.schema)
    }

    /// Validate raw arguments and fill defaults
    ///
    /// Declared fields are type-checked, missing optional fields receive their
    /// default, and undeclared fields are dropped. An explicit `null` counts as
    /// an omitted field.
    pub fn resolve(&self, args: Option<JsonObject>) -> Result<JsonObject, ContractError> {
        let mut args = args.unwrap_or_default();
        let mut resolved = JsonObject::new();

        for field in &self.fields {
            match args.remove(&field.name) {
                None | Some(Value::Null) => match &field.presence {
                    Presence::Required => {
                        return Err(ContractError::MissingField(field.name.clone()));
                    }
                    Presence::Optional { default: Some(default) } => {
                        resolved.insert(field.name.clone(), default.clone());
                    }
                    Presence::Optional { default: None } => {}
                },
                Some(value) => {
                    if !field.kind.accepts(&value) {
                        return Err(ContractError::WrongType {
                            field: field.name.clone(),
                            expected: field.kind.as_str(),
                        });
                    }
                    resolved.insert(field.name.clone(), value);
                }
            }
        }

        if !args.is_empty() {
            let ignored: Vec<&String> = args.keys().collect();
            tracing::debug!(?ignored, "dropping undeclared arguments");
        }

        Ok(resolved)
    }
}
