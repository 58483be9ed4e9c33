//! Rendering of command output as JSON, NDJSON, or an ASCII table.

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(data: &Value, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let text = if pretty {
                serde_json::to_string_pretty(data)?
            } else {
                serde_json::to_string(data)?
            };
            println!("{text}");
        }
        OutputFormat::Ndjson => match data {
            Value::Array(items) => {
                for item in items {
                    println!("{}", serde_json::to_string(item)?);
                }
            }
            other => println!("{}", serde_json::to_string(other)?),
        },
        OutputFormat::Table => render_table(data)?,
    }
    Ok(())
}

fn render_table(data: &Value) -> Result<(), CliError> {
    match data {
        Value::Array(items) if items.is_empty() => println!("(no rows)"),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let headers: Vec<String> = items
                .first()
                .and_then(Value::as_object)
                .map(|object| object.keys().cloned().collect())
                .unwrap_or_default();
            let rows: Vec<Vec<String>> = items
                .iter()
                .filter_map(Value::as_object)
                .map(|object| {
                    headers
                        .iter()
                        .map(|key| cell_text(object.get(key).unwrap_or(&Value::Null)))
                        .collect()
                })
                .collect();
            print_grid(&headers, &rows);
        }
        Value::Object(map) => {
            let headers = vec![String::from("field"), String::from("value")];
            let rows: Vec<Vec<String>> = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell_text(value)])
                .collect();
            print_grid(&headers, &rows);
        }
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_cells_plainly() {
        assert_eq!(cell_text(&Value::Null), "-");
        assert_eq!(cell_text(&json!("005930")), "005930");
        assert_eq!(cell_text(&json!(72.5)), "72.5");
        assert_eq!(cell_text(&json!(true)), "true");
    }
}

fn print_grid(headers: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(index) {
                *width = (*width).max(cell.len());
            }
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(text, &width)| format!("{text:<width$}"))
        .collect();
    println!("{}", header_line.join("  "));

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    println!("{}", rule.join("  "));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(text, &width)| format!("{text:<width$}"))
            .collect();
        println!("{}", line.join("  "));
    }
}
