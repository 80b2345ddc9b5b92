//! Tools backed by plain functions

use crate::schema::{Param, object_schema};
use crate::tool::Tool;
use async_trait::async_trait;
use concierge_core::{Error, Result};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

type Handler = Arc<dyn Fn(&ToolArgs) -> Result<String> + Send + Sync>;

/// Arguments validated against a tool's parameter list
///
/// Required parameters are present and every present value has the declared
/// type; defaults have been filled in.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    values: Map<String, Value>,
}

impl ToolArgs {
    /// Validate raw arguments against `params`
    ///
    /// Accepts a JSON object, `null` (no arguments), or a string holding a
    /// JSON object.
    pub fn bind(params: &[Param], raw: Value) -> Result<Self> {
        let mut supplied = match raw {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            Value::String(text) => match serde_json::from_str(&text) {
                Ok(Value::Object(map)) => map,
                _ => {
                    return Err(Error::InvalidToolInput(
                        "arguments must be a JSON object".to_string(),
                    ));
                }
            },
            other => {
                return Err(Error::InvalidToolInput(format!(
                    "arguments must be a JSON object, got {other}"
                )));
            }
        };

        let mut values = Map::new();
        for param in params {
            match supplied.remove(&param.name).filter(|v| !v.is_null()) {
                Some(value) if param.kind.accepts(&value) => {
                    values.insert(param.name.clone(), value);
                }
                Some(value) => {
                    return Err(Error::InvalidToolInput(format!(
                        "'{}' must be a {}, got {value}",
                        param.name,
                        param.kind.type_name()
                    )));
                }
                None => {
                    if let Some(default) = &param.default {
                        values.insert(param.name.clone(), default.clone());
                    } else if param.required {
                        return Err(Error::InvalidToolInput(format!(
                            "missing required argument '{}'",
                            param.name
                        )));
                    }
                }
            }
        }

        if !supplied.is_empty() {
            let extra: Vec<&String> = supplied.keys().collect();
            debug!(?extra, "Ignoring undeclared tool arguments");
        }

        Ok(Self { values })
    }

    /// String argument
    pub fn str(&self, name: &str) -> Result<&str> {
        self.values
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| missing(name))
    }

    /// Number argument
    pub fn f64(&self, name: &str) -> Result<f64> {
        self.opt_f64(name).ok_or_else(|| missing(name))
    }

    /// Optional number argument
    pub fn opt_f64(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(Value::as_f64)
    }

    /// Whether an argument is present after defaults were applied
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

fn missing(name: &str) -> Error {
    Error::InvalidToolInput(format!("missing argument '{name}'"))
}

/// A tool that runs a synchronous, side-effect-free function
///
/// # Example
///
/// ```
/// use concierge_tools::{FunctionTool, Param};
///
/// let echo = FunctionTool::new("echo", "Repeat the input", |args| {
///     Ok(args.str("text")?.to_string())
/// })
/// .with_param(Param::string("text", "Text to repeat"));
/// ```
pub struct FunctionTool {
    name: String,
    description: String,
    params: Vec<Param>,
    handler: Handler,
}

impl FunctionTool {
    /// Create a tool with no parameters yet
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&ToolArgs) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    /// Declare a parameter
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Declared parameters, in order
    pub fn params(&self) -> &[Param] {
        &self.params
    }
}

impl std::fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Tool for FunctionTool {
    async fn execute(&self, params: Value) -> Result<String> {
        let args = ToolArgs::bind(&self.params, params)?;
        (self.handler)(&args)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        object_schema(&self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn tax_tool() -> FunctionTool {
        FunctionTool::new("tax", "Compute tax", |args| {
            let total = args.f64("order_total")?;
            let rate = args.f64("tax_rate")?;
            Ok(format!("{:.2}", total * rate))
        })
        .with_param(Param::number("order_total", "Total"))
        .with_param(Param::number("tax_rate", "Rate").with_default(json!(0.5)))
    }

    #[tokio::test]
    async fn test_execute_with_default() {
        let out = assert_ok!(tax_tool().execute(json!({"order_total": 10})).await);
        assert_eq!(out, "5.00");
    }

    #[tokio::test]
    async fn test_null_treated_as_absent() {
        let out = tax_tool()
            .execute(json!({"order_total": 10, "tax_rate": null}))
            .await
            .unwrap();
        assert_eq!(out, "5.00");
    }

    #[tokio::test]
    async fn test_missing_required_argument() {
        let err = assert_err!(tax_tool().execute(json!({})).await);
        assert!(err.to_string().contains("order_total"));
    }

    #[tokio::test]
    async fn test_wrong_type_rejected() {
        let err = assert_err!(tax_tool().execute(json!({"order_total": "ten"})).await);
        assert!(err.to_string().contains("must be a number"));
    }

    #[tokio::test]
    async fn test_string_encoded_arguments() {
        let out = tax_tool()
            .execute(json!("{\"order_total\": 4, \"tax_rate\": 0.25}"))
            .await
            .unwrap();
        assert_eq!(out, "1.00");

        assert_err!(tax_tool().execute(json!("{broken")).await);
    }

    #[tokio::test]
    async fn test_invoke_folds_errors_into_text() {
        let text = tax_tool().invoke(json!({"order_total": false})).await;
        assert!(text.starts_with("Error: "));
    }

    #[test]
    fn test_bind_ignores_extra_keys() {
        let params = [Param::string("title", "Title")];
        let args = ToolArgs::bind(&params, json!({"title": "1984", "extra": 1})).unwrap();
        assert_eq!(args.str("title").unwrap(), "1984");
        assert!(!args.contains("extra"));
    }

    #[test]
    fn test_schema_from_params() {
        let schema = tax_tool().input_schema();
        assert_eq!(schema["required"], json!(["order_total"]));
    }
}
