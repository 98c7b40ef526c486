//! Best-effort extraction of JSON from free-form model text.
//!
//! Models frequently wrap the requested JSON in commentary or code
//! fences. The strategy here is deliberately blunt: take the span from
//! the first `{` to the last `}` and try to parse it. Callers own the
//! fallback when nothing parseable comes back.

use regex::Regex;

/// Extract the first brace-delimited object span from free-form text.
///
/// Greedy across lines, so nested objects stay intact. Returns `None`
/// when the text holds no `{...}` span at all.
pub fn first_json_object(text: &str) -> Option<&str> {
    let pattern = Regex::new(r"(?s)\{.*\}").unwrap();
    pattern.find(text).map(|m| m.as_str())
}

/// Extract and parse the first JSON object in the text.
///
/// Returns `None` when no span exists or the span is not valid JSON.
pub fn parse_json_object(text: &str) -> Option<serde_json::Value> {
    first_json_object(text).and_then(|span| serde_json::from_str(span).ok())
}
