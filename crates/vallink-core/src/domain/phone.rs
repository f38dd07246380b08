pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_PHONE_DIGITS: usize = 15;

pub fn phone_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Accepts any formatting as long as the digit count falls within
/// [`MIN_PHONE_DIGITS`, `MAX_PHONE_DIGITS`].
pub fn validate_phone_number(value: &str) -> bool {
    let count = value.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&count)
}
