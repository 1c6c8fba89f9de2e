//! Small string helpers.

/// Concatenate `parts` with no separator.
pub fn concat<S: AsRef<str>>(parts: &[S]) -> String {
    let mut out = String::with_capacity(parts.iter().map(|p| p.as_ref().len()).sum());
    for p in parts {
        out.push_str(p.as_ref());
    }
    out
}

/// Remove every occurrence of each needle from `s`, applying the needles in order.
pub fn strip_chars<S: AsRef<str>>(s: &str, needles: &[S]) -> String {
    let mut out = s.to_owned();
    for needle in needles {
        let needle = needle.as_ref();
        if !needle.is_empty() {
            out = out.replace(needle, "");
        }
    }
    out
}
