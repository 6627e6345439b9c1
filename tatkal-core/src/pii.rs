/// Replacement prefix for masked national id numbers.
const MASK: &str = "XXXXXXXX";

/// Mask a national id for output, keeping only the last 4 characters.
/// Values shorter than 4 characters pass through unchanged.
pub fn mask_national_id(id: &str) -> String {
    let len = id.chars().count();
    if len < 4 {
        return id.to_string();
    }
    let tail: String = id.chars().skip(len - 4).collect();
    format!("{MASK}{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_keeps_last_four() {
        assert_eq!(mask_national_id("123456789012"), "XXXXXXXX9012");
    }

    #[test]
    fn test_mask_prefix_is_fixed_length() {
        let masked = mask_national_id("998877665544");
        assert_eq!(&masked[..8], "XXXXXXXX");
        assert_eq!(masked.len(), 12);
    }

    #[test]
    fn test_mask_applies_to_any_input_of_at_least_four() {
        assert_eq!(mask_national_id("1234"), "XXXXXXXX1234");
        assert_eq!(mask_national_id("56789"), "XXXXXXXX6789");
    }

    #[test]
    fn test_short_input_passes_through() {
        assert_eq!(mask_national_id("123"), "123");
        assert_eq!(mask_national_id(""), "");
    }
}
