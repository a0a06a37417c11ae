// src/core/sanitize.rs

/// Collapse runs of whitespace to a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// First line of the trimmed text, itself trimmed.
pub fn first_line(s: &str) -> &str {
    s.trim().lines().next().unwrap_or("").trim()
}

/// First whitespace-delimited token of the first line.
pub fn first_token(s: &str) -> &str {
    first_line(s).split_whitespace().next().unwrap_or("")
}

/// `Some(trimmed)` unless the text is blank.
pub fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

/// File-system safe stem: alphanumerics kept, whitespace runs become `_`.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!(fallback) } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_skips_leading_blank_lines() {
        assert_eq!(first_line("\n\n  jane@example.com  \n  Confirm e-mail\n"), "jane@example.com");
        assert_eq!(first_line("   "), "");
    }

    #[test]
    fn first_token_stops_at_whitespace() {
        assert_eq!(first_token("  Married and my spouse is NOT a U.S. citizen\n..."), "Married");
        assert_eq!(first_token(""), "");
    }

    #[test]
    fn normalize_collapses_runs() {
        assert_eq!(normalize_ws("  a \t\n b  "), "a b");
    }

    #[test]
    fn sanitize_filename_variants() {
        assert_eq!(sanitize_filename("Septembre 2024", "x"), "Septembre_2024");
        assert_eq!(sanitize_filename("a/b:c", "x"), "abc");
        assert_eq!(sanitize_filename("  ", "export"), "export");
        assert_eq!(sanitize_filename("Lot-3__final", "x"), "Lot-3_final");
    }
}
