use axum::http::{HeaderMap, HeaderValue, header};
use serde_json::json;
use zoomdial::utils::*;

// Helper function to build headers with a single content type
fn headers_with_content_type(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(value).unwrap());
    headers
}

#[test]
fn test_escape_html() {
    assert_eq!(
        escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
    );

    // Plain text passes through untouched
    assert_eq!(escape_html("user-42"), "user-42");
    assert_eq!(escape_html(""), "");
}

#[test]
fn test_render_page() {
    let page = render_page("Calls <today>", "<p>body</p>");

    // Title is escaped in both places it appears
    assert!(page.contains("<title>Calls &lt;today&gt; | zoomdial</title>"));
    assert!(page.contains("<h2>Calls &lt;today&gt;</h2>"));

    // Body is inserted verbatim
    assert!(page.contains("<p>body</p>"));
    assert!(page.starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_render_page_does_not_expand_placeholders_in_title() {
    let page = render_page("{body}", "<p>inner</p>");
    assert_eq!(page.matches("<p>inner</p>").count(), 1);
    assert!(page.contains("<h2>{body}</h2>"));
}

#[test]
fn test_is_json_content_type() {
    assert!(is_json_content_type(&headers_with_content_type(
        "application/json"
    )));
    assert!(is_json_content_type(&headers_with_content_type(
        "application/json; charset=utf-8"
    )));
    assert!(is_json_content_type(&headers_with_content_type(
        "Application/JSON"
    )));

    assert!(!is_json_content_type(&headers_with_content_type(
        "text/plain"
    )));
    assert!(!is_json_content_type(&headers_with_content_type(
        "application/x-www-form-urlencoded"
    )));
    assert!(!is_json_content_type(&HeaderMap::new()));
}

#[test]
fn test_json_scalar_to_string() {
    assert_eq!(json_scalar_to_string(&json!("1001")), Some("1001".to_string()));
    assert_eq!(json_scalar_to_string(&json!(1001)), Some("1001".to_string()));
    assert_eq!(json_scalar_to_string(&json!(true)), Some("true".to_string()));
    assert_eq!(json_scalar_to_string(&json!(null)), None);
    assert_eq!(json_scalar_to_string(&json!({ "a": 1 })), None);
}

#[test]
fn test_mask() {
    assert_eq!(mask("EMBHBncrSteZ"), "********SteZ");
    assert_eq!(mask("abcd"), "****");
    assert_eq!(mask(""), "");

    // Counts characters, not bytes
    assert_eq!(mask("ääääää"), "**ääää");
}
