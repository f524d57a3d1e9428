//! Output formatters for the run summary.
//!
//! JSON is meant for scripts, text for logs and plain terminals, pretty for
//! humans.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use twc_core::cli::OutputFormat;

/// Formats `data` according to `format`.
///
/// # Errors
///
/// Returns an error if `data` cannot be serialized.
///
/// # Examples
///
/// ```
/// use twc_cli::formatters::format_output;
/// use twc_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     methods: usize,
/// }
///
/// let output = format_output(&Summary { methods: 2 }, OutputFormat::Json)?;
/// assert!(output.contains("\"methods\": 2"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Formats data as pretty-printed JSON.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain `key: value` lines.
pub mod text {
    use super::{Result, Serialize, Value};

    /// Formats data as one `key: value` line per top-level field.
    ///
    /// Lists are joined with commas; nested objects are flattened with
    /// dotted keys.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        flatten("", &value, &mut lines);
        Ok(lines.join("\n"))
    }

    fn flatten(prefix: &str, value: &Value, lines: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let key = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    flatten(&key, child, lines);
                }
            }
            other => lines.push(format!("{prefix}: {}", scalar(other))),
        }
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join(", "),
            other => other.to_string(),
        }
    }
}

/// Colorized, human-readable output.
pub mod pretty {
    use super::{Colorize, Result, Serialize, Value};

    /// Formats data as an indented, colorized listing.
    ///
    /// Empty lists print as `none`; non-empty lists print one item per line.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        write_value(&value, 0, &mut out);
        Ok(out.trim_end().to_string())
    }

    fn write_value(value: &Value, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let label = key.replace('_', " ");
                    match child {
                        Value::Object(_) => {
                            out.push_str(&format!("{pad}{}\n", label.blue().bold()));
                            write_value(child, indent + 1, out);
                        }
                        Value::Array(items) if !items.is_empty() => {
                            out.push_str(&format!(
                                "{pad}{} ({})\n",
                                label.blue().bold(),
                                items.len().to_string().cyan()
                            ));
                            for item in items {
                                out.push_str(&format!("{pad}  - {}\n", leaf(item)));
                            }
                        }
                        _ => out.push_str(&format!("{pad}{}: {}\n", label.blue().bold(), leaf(child))),
                    }
                }
            }
            other => out.push_str(&format!("{pad}{}\n", leaf(other))),
        }
    }

    fn leaf(value: &Value) -> String {
        match value {
            Value::Null => "null".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Array(items) if items.is_empty() => "none".dimmed().to_string(),
            other => other.to_string(),
        }
    }
}
