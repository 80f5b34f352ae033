//! MQTT-style path patterns.
//!
//! - `session/identity` matches only itself
//! - `auth/+` matches `auth/login`, `auth/register`
//! - `dashboard/#` matches `dashboard` and everything below it
//! - `#` matches every path

/// Check whether a concrete `path` is matched by `pattern`.
pub fn matches(pattern: &str, path: &str) -> bool {
    let mut pat = pattern.split('/');
    let mut topic = path.split('/');

    loop {
        match (pat.next(), topic.next()) {
            (Some("#"), _) => return true,
            (Some("+"), Some(_)) => {}
            (Some(p), Some(t)) if p == t => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// A pattern is valid when `#` only appears as the final segment.
pub fn is_valid(pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    let segments: Vec<&str> = pattern.split('/').collect();
    segments
        .iter()
        .enumerate()
        .all(|(i, s)| *s != "#" || i == segments.len() - 1)
}
