//! SQL text helpers.

/// Quote an identifier for SQLite, doubling any embedded `"`.
///
/// Every table and column name derived from caller input goes through this;
/// values always go through bound parameters instead.
pub fn quote_ident(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for c in name.chars() {
        if c == '"' {
            quoted.push('"');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Comma-separated `?1, ?2, ...` placeholder list.
pub fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}
