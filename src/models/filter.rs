use mongodb::bson::{doc, Document};

const REGEX_META: &[char] = &[
    '\\', '.', '+', '*', '?', '(', ')', '|', '[', ']', '{', '}', '^', '$', '#', '-', '/',
];

fn escape_pattern(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if REGEX_META.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Builds a filter of case-insensitive substring matches.
///
/// Fields whose value is missing or empty impose no constraint.
pub fn contains_filter<'a, I>(fields: I) -> Document
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut filter = Document::new();
    for (field, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            filter.insert(
                field,
                doc! { "$regex": escape_pattern(value), "$options": "i" },
            );
        }
    }
    filter
}
