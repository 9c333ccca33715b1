/// Normalise `page`/`limit` query values: page starts at 1, limit defaults
/// to 20 and is clamped to 1..=100.
pub fn validate_pagination(page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(20).clamp(1, 100);
    (page, limit)
}

/// Keep only the last four digits of a card number.
///
/// Returns `None` unless the input (spaces and dashes ignored) is 13–19 digits.
pub fn card_last4(card_number: &str) -> Option<String> {
    let digits: String = card_number
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();
    if !(13..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(digits[digits.len() - 4..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        assert_eq!(validate_pagination(None, None), (1, 20));
        assert_eq!(validate_pagination(Some(0), Some(500)), (1, 100));
        assert_eq!(validate_pagination(Some(3), Some(0)), (3, 1));
    }

    #[test]
    fn card_last4_strips_separators() {
        assert_eq!(card_last4("4111 1111 1111 1234").as_deref(), Some("1234"));
        assert_eq!(card_last4("5500-0000-0000-0004").as_deref(), Some("0004"));
    }

    #[test]
    fn card_last4_rejects_bad_numbers() {
        assert!(card_last4("1234").is_none());
        assert!(card_last4("4111 1111 1111 12ab").is_none());
    }
}
