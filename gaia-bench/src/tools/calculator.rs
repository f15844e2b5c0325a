use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Tool, ToolError};

const MAX_EXPRESSION_LENGTH: usize = 1000;

/// Arithmetic expression evaluator
///
/// Supports `+ - * / % ^`, parentheses and the usual functions
/// (`sqrt`, `abs`, `ln`, `sin`, ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

/// Render integral results without a trailing `.0`
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[async_trait]
impl Tool for Calculator {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Calculate the result of an arithmetic expression. Supports +, -, *, /, % and ^, \
         parentheses for grouping, and functions such as sqrt, abs and ln."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The arithmetic expression to evaluate, e.g. '(3 + 4) * 2'"
                }
            },
            "required": ["expression"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String, ToolError> {
        let expression = input
            .get("expression")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidInput("Missing 'expression' field".into()))?;

        if expression.len() > MAX_EXPRESSION_LENGTH {
            return Err(ToolError::InvalidInput(format!(
                "Expression too long ({} chars, max {})",
                expression.len(),
                MAX_EXPRESSION_LENGTH
            )));
        }

        let result = meval::eval_str(expression)
            .map_err(|e| ToolError::ExecutionFailed(format!("Failed to evaluate expression: {}", e)))?;

        if result.is_nan() {
            return Err(ToolError::ExecutionFailed("Result is not a number (NaN)".into()));
        }
        if result.is_infinite() {
            return Err(ToolError::ExecutionFailed(
                "Result is infinite (division by zero or overflow)".into(),
            ));
        }

        Ok(format_number(result))
    }
}
