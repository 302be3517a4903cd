use super::*;

#[test]
fn formats_full_number() {
    assert_eq!(format_phone("71234567890"), "+7 (123) 456-78-90");
}

#[test]
fn first_digit_is_always_rendered_as_country_code() {
    assert_eq!(format_phone("89161234567"), "+7 (916) 123-45-67");
}

#[test]
fn fills_only_available_groups() {
    assert_eq!(format_phone(""), "+7");
    assert_eq!(format_phone("7"), "+7");
    assert_eq!(format_phone("79"), "+7 (9");
    assert_eq!(format_phone("7916"), "+7 (916) ");
    assert_eq!(format_phone("7916123"), "+7 (916) 123-");
    assert_eq!(format_phone("791612345"), "+7 (916) 123-45-");
}

#[test]
fn ignores_formatting_characters_and_extra_digits() {
    assert_eq!(format_phone("+7 (916) 123-45-67"), "+7 (916) 123-45-67");
    assert_eq!(format_phone("7916123456799999"), "+7 (916) 123-45-67");
}

#[test]
fn output_never_exceeds_eleven_digits() {
    let mut digits = String::new();
    for i in 0..=PHONE_MAX_DIGITS {
        let formatted = PhoneNumber::from_input(&digits).formatted();
        assert!(formatted.starts_with("+7"), "{formatted}");
        let count = formatted.chars().filter(char::is_ascii_digit).count();
        assert!(count <= PHONE_MAX_DIGITS, "{formatted}");
        digits.push(char::from(b'0' + (i % 10) as u8));
    }
}

#[test]
fn short_input_resets_buffer_to_country_code() {
    for raw in ["", "+", "5", "+7", "abc", "(9)"] {
        let phone = PhoneNumber::from_input(raw);
        assert_eq!(phone.digits(), "7", "input {raw:?}");
        assert_eq!(phone.formatted(), "+7");
    }
}

#[test]
fn from_input_is_pure() {
    let a = PhoneNumber::from_input("8 (916) 123");
    let b = PhoneNumber::from_input("89161 23");
    assert_eq!(a, b);
    assert_eq!(a.digits(), "7916123");
    assert_eq!(a.formatted(), "+7 (916) 123-");
    assert!(!a.is_complete());
    assert!(PhoneNumber::from_input("79161234567").is_complete());
}

#[test]
fn serializes_as_formatted_string() {
    let value = serde_json::to_value(PhoneNumber::from_input("71234567890")).expect("json");
    assert_eq!(value, "+7 (123) 456-78-90");
}

#[test]
fn leading_digit_is_stored_as_country_code() {
    let phone = PhoneNumber::from_input("8 (916) 123-45-67");
    assert_eq!(phone.digits(), "79161234567");
    assert_eq!(phone.formatted(), "+7 (916) 123-45-67");
    assert_eq!(phone, PhoneNumber::from_input("79161234567"));
}
