use std::fmt;

use serde::Serialize;

use crate::config::ColorsConfig;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub program: String,
    /// Normalized interest tags: trimmed, lowercased, deduplicated, in the
    /// order the user first typed them.
    pub interests: Vec<String>,
}

impl Person {
    pub fn has_interest(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        self.interests.iter().any(|own| own == &tag)
    }

    /// Tags present in both interest lists, in this person's order.
    pub fn shared_interests(&self, other: &Person) -> Vec<String> {
        self.interests
            .iter()
            .filter(|tag| other.interests.iter().any(|t| t == *tag))
            .cloned()
            .collect()
    }
}

/// Normalize a comma-separated interest list into lowercase trimmed tokens,
/// dropping empties and duplicates but keeping first-seen order.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for part in raw.split(',') {
        let tag = part.trim().to_lowercase();
        if tag.is_empty() || tags.contains(&tag) {
            continue;
        }
        tags.push(tag);
    }
    tags
}

/// Display color for a program. Explicit config assignments win; otherwise a
/// deterministic palette pick so the same program always maps to the same
/// color within and across sessions.
pub fn program_color<'a>(program: &str, colors: &'a ColorsConfig) -> &'a str {
    let program = program.trim();
    if let Some(color) = colors.programs.get(program) {
        return color;
    }
    if colors.palette.is_empty() {
        return &colors.fallback;
    }
    let hash = program
        .bytes()
        .fold(0usize, |acc, byte| acc.wrapping_mul(31).wrapping_add(byte as usize));
    &colors.palette[hash % colors.palette.len()]
}
