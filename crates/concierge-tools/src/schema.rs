//! Parameter declarations and JSON Schema generation

use serde_json::{Map, Value, json};

/// JSON type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Text
    String,
    /// Any finite number
    Number,
}

impl ParamKind {
    /// JSON Schema type name
    pub fn type_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
        }
    }

    /// Whether a JSON value has this type
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
        }
    }
}

/// One declared tool parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name
    pub name: String,
    /// Expected JSON type
    pub kind: ParamKind,
    /// Description shown to the model
    pub description: String,
    /// Whether the caller must supply it
    pub required: bool,
    /// Value used when the caller omits it
    pub default: Option<Value>,
}

impl Param {
    /// Declare a required parameter
    pub fn new(name: impl Into<String>, kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
            default: None,
        }
    }

    /// Required string parameter
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamKind::String, description)
    }

    /// Required number parameter
    pub fn number(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Number, description)
    }

    /// Make the parameter optional with a default value
    ///
    /// The default is applied locally and is not advertised in the schema,
    /// since some providers reject `default` in strict function schemas.
    pub fn with_default(mut self, default: Value) -> Self {
        self.required = false;
        self.default = Some(default);
        self
    }
}

/// Build a JSON Schema object for a parameter list
///
/// # Example
///
/// ```
/// use concierge_tools::{Param, schema::object_schema};
///
/// let schema = object_schema(&[Param::string("title", "The title of the book")]);
/// assert_eq!(schema["required"][0], "title");
/// ```
pub fn object_schema(params: &[Param]) -> Value {
    let mut properties = Map::new();
    for param in params {
        properties.insert(
            param.name.clone(),
            json!({
                "type": param.kind.type_name(),
                "description": param.description,
            }),
        );
    }

    let required: Vec<&str> = params
        .iter()
        .filter(|p| p.required)
        .map(|p| p.name.as_str())
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_schema_lists_required_only() {
        let schema = object_schema(&[
            Param::number("order_total", "The total amount before tax"),
            Param::number("tax_rate", "The tax rate as a decimal").with_default(json!(0.08)),
        ]);

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["order_total"]["type"], "number");
        assert_eq!(schema["properties"]["tax_rate"]["type"], "number");
        assert_eq!(schema["required"], json!(["order_total"]));
        assert!(schema["properties"]["tax_rate"].get("default").is_none());
    }

    #[test]
    fn test_empty_schema() {
        let schema = object_schema(&[]);
        assert_eq!(schema["properties"], json!({}));
        assert_eq!(schema["required"], json!([]));
    }

    #[test]
    fn test_kind_accepts() {
        assert!(ParamKind::Number.accepts(&json!(1.5)));
        assert!(ParamKind::Number.accepts(&json!(100)));
        assert!(!ParamKind::Number.accepts(&json!("100")));
        assert!(ParamKind::String.accepts(&json!("x")));
    }
}
