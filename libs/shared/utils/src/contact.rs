use std::sync::LazyLock;

use regex::Regex;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9]{9,15}$").expect("phone pattern is a valid regex")
});

/// Strip the separators people type into phone numbers (spaces, dashes,
/// dots, parentheses) so that stored and submitted values compare exactly.
pub fn normalize_contact(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect()
}

pub fn is_valid_contact(contact: &str) -> bool {
    PHONE_PATTERN.is_match(contact)
}

/// Phone numbers in logs keep only their last three digits.
pub fn mask_contact(contact: &str) -> String {
    let chars: Vec<char> = contact.chars().collect();
    if chars.len() <= 3 {
        return "*".repeat(chars.len());
    }

    let visible = chars.len() - 3;
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < visible { '*' } else { *c })
        .collect()
}
