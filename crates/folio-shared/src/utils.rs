//! Utility functions

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let keep = local.chars().take(if local.chars().count() <= 2 { 1 } else { 2 });
        format!("{}***{}", keep.collect::<String>(), domain)
    } else {
        "***".to_string()
    }
}

/// Splits a BaaS sort key (`-date`, `display_order`) into field and direction.
pub fn parse_sort_key(sort: &str) -> (&str, bool) {
    match sort.strip_prefix('-') {
        Some(field) => (field, true),
        None => (sort, false),
    }
}
