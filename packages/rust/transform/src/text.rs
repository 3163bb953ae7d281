//! Slug and title derivation for legacy group keys.

/// Turn a legacy group key or index into a stable kebab-case slug.
pub fn slugify(key: &str) -> String {
    let cleaned: String = key
        .trim()
        .to_lowercase()
        .replace([' ', '_'], "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect();

    // Collapse runs of dashes left behind by punctuation.
    let mut slug = String::with_capacity(cleaned.len());
    let mut prev_dash = false;
    for c in cleaned.chars() {
        if c == '-' {
            if !prev_dash && !slug.is_empty() {
                slug.push(c);
            }
            prev_dash = true;
        } else {
            slug.push(c);
            prev_dash = false;
        }
    }

    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() { "group".to_string() } else { slug }
}

/// Derive a human-readable title from a legacy group key.
pub fn title_from_key(key: &str) -> String {
    let words: Vec<String> = key
        .split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    format!("{upper}{}", chars.collect::<String>())
                }
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        "Untitled".to_string()
    } else {
        words.join(" ")
    }
}
