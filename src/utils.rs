use axum::http::HeaderMap;
use serde_json::Value;

/// Escapes text for safe interpolation into HTML element content and
/// double-quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps an already-escaped HTML fragment in the shared page layout.
/// `title` is escaped here.
pub fn render_page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title} | zoomdial</title>
</head>
<body>
  <h2>{title}</h2>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    )
}

/// True when the request declares a JSON body, with or without parameters
/// such as `charset`.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// Renders a loosely typed JSON scalar as plain text. Zoom sends some
/// identifiers as strings and others as numbers.
pub fn json_scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Masks all but the last four characters, for logging identifiers.
pub fn mask(value: &str) -> String {
    let count = value.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let visible: String = value.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), visible)
}
