/// Clamp a requested page number to something sane.
///
/// Pages are 1-based; anything below 1 becomes 1.
pub fn validate_page(page: Option<u32>) -> u32 {
    page.unwrap_or(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        assert_eq!(validate_page(None), 1);
        assert_eq!(validate_page(Some(0)), 1);
        assert_eq!(validate_page(Some(7)), 7);
    }
}
