//! Display label helpers.

/// Turns an identifier such as `clinical_trial-designer` into `Clinical Trial Designer`.
///
/// Words are split on underscores, hyphens and whitespace; each word gets an
/// uppercase first character and keeps the rest unchanged.
pub fn humanize(raw: &str) -> String {
    raw.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
