//! Workplace code + name merging

/// Merge a workplace code and name into `"CODE - NAME"`.
///
/// The name is title-cased. A missing side drops the separator; both
/// missing gives an empty string.
pub fn merge_workplace(code: Option<&str>, name: Option<&str>) -> String {
    let code = code.map(str::trim).unwrap_or("");
    let name = name.map(title_case).unwrap_or_default();

    match (code.is_empty(), name.is_empty()) {
        (false, false) => format!("{} - {}", code, name),
        (false, true) => code.to_string(),
        (true, false) => name,
        (true, true) => String::new(),
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
/// Whitespace is trimmed and collapsed.
pub fn title_case(s: &str) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(collapsed.len());
    let mut at_word_start = true;

    for c in collapsed.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}
