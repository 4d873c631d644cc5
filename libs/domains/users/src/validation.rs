//! Signup validation as pure functions.
//!
//! [`validate_signup`] returns either the cleaned values needed to create a
//! user or a [`FieldErrors`] map with the first problem found per field.

use axum_helpers::FieldErrors;
use std::collections::HashMap;
use validator::Validate;

use crate::models::{Profile, SignupRequest};

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const INVALID_PHONE: &str = "Enter a valid phone number.";
pub const PASSWORD_TOO_SHORT: &str =
    "This password is too short. It must contain at least 8 characters.";
pub const PASSWORD_TOO_SIMILAR: &str = "The password is too similar to the email.";
pub const PASSWORD_TOO_COMMON: &str = "This password is too common.";
pub const PASSWORD_NUMERIC: &str = "This password is entirely numeric.";

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_SIMILARITY: f64 = 0.7;

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

const COMMON_PASSWORDS: &[&str] = &[
    "123456", "123456789", "12345678", "1234567890", "12345", "1234567", "123123", "111111",
    "000000", "654321", "666666", "121212", "112233", "987654321", "11111111", "88888888",
    "password", "password1", "password12", "password123", "passw0rd", "p@ssw0rd", "qwerty",
    "qwerty123", "qwertyuiop", "1q2w3e4r", "1qaz2wsx", "zaq12wsx", "abc123", "abcd1234",
    "iloveyou", "admin", "admin123", "administrator", "welcome", "welcome1", "welcome123",
    "letmein", "monkey", "dragon", "football", "baseball", "basketball", "soccer", "master",
    "shadow", "sunshine", "princess", "superman", "batman", "trustno1", "whatever", "freedom",
    "starwars", "hello123", "michael", "jennifer", "jordan23", "charlie", "computer",
    "internet", "changeme", "secret", "test1234", "testing123", "default", "login",
    "access", "mustang", "liverpool", "chelsea", "arsenal", "pokemon", "naruto", "lovely",
    "flower", "summer", "winter", "asdfghjkl", "asdfasdf", "zxcvbnm", "aaaaaaaa",
];

/// Values accepted by [`validate_signup`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSignup {
    pub email: String,
    pub password: String,
    pub profile: Profile,
}

pub fn validate_signup(request: &SignupRequest) -> Result<ValidSignup, FieldErrors> {
    let mut errors = FieldErrors::new();

    let email = request.email.as_deref().map(str::trim);
    if email == Some("") {
        errors.add("email", BLANK);
    }
    if request.password.as_deref() == Some("") {
        errors.add("password", BLANK);
    }
    let trimmed = SignupRequest {
        email: email.map(str::to_owned),
        ..request.clone()
    };
    if let Err(invalid) = trimmed.validate() {
        errors.merge(invalid.into());
    }

    let phone_number = match non_blank(&request.phone_number) {
        Some(raw) => match normalize_phone(&raw) {
            Some(phone) => Some(phone),
            None => {
                errors.add("phone_number", INVALID_PHONE);
                None
            }
        },
        None => None,
    };

    if let (Some(password), Some(email)) = (request.password.as_deref(), email) {
        if !errors.contains("password") {
            if let Err(message) = check_password_strength(password, email) {
                errors.add("password", message);
            }
        }
    }

    errors.into_result()?;

    // Both are present: `required` would have failed otherwise.
    let (Some(email), Some(password)) = (email, request.password.clone()) else {
        return Err(FieldErrors::single("email", REQUIRED));
    };

    Ok(ValidSignup {
        email: email.to_string(),
        password,
        profile: Profile {
            phone_number,
            street_address: non_blank(&request.street_address),
            city: non_blank(&request.city),
            state_province: non_blank(&request.state_province),
            postal_code: non_blank(&request.postal_code),
            country: non_blank(&request.country),
        },
    })
}

/// Checks the password rules in order and returns the first violation.
pub fn check_password_strength(password: &str, email: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PASSWORD_TOO_SHORT);
    }
    if too_similar(password, email) {
        return Err(PASSWORD_TOO_SIMILAR);
    }
    let folded = password.trim().to_lowercase();
    if COMMON_PASSWORDS.contains(&folded.as_str()) {
        return Err(PASSWORD_TOO_COMMON);
    }
    if password.chars().all(|c| c.is_numeric()) {
        return Err(PASSWORD_NUMERIC);
    }
    Ok(())
}

/// Strips common separators and accepts an optional leading `+` followed by
/// 7 to 15 digits. Returns the compact form.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();

    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    let valid = (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit());

    valid.then_some(compact)
}

/// Compares the password against the whole email and each of its word parts.
fn too_similar(password: &str, email: &str) -> bool {
    let password = password.to_lowercase();
    let email = email.to_lowercase();

    email
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|part| !part.is_empty())
        .chain(std::iter::once(email.as_str()))
        .filter(|part| !exceeds_length_ratio(&password, part))
        .any(|part| quick_ratio(&password, part) >= MAX_SIMILARITY)
}

/// A short attribute inside a much longer password is not a meaningful match.
fn exceeds_length_ratio(password: &str, value: &str) -> bool {
    let password_len = password.chars().count() as f64;
    let value_len = value.chars().count() as f64;
    password_len >= 10.0 * value_len && value_len < MAX_SIMILARITY / 2.0 * password_len
}

/// Order-insensitive similarity: `2 * shared characters / total characters`.
fn quick_ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }

    let mut available: HashMap<char, usize> = HashMap::new();
    for c in b.chars() {
        *available.entry(c).or_default() += 1;
    }
    let mut matches = 0usize;
    for c in a.chars() {
        if let Some(count) = available.get_mut(&c) {
            if *count > 0 {
                *count -= 1;
                matches += 1;
            }
        }
    }

    2.0 * matches as f64 / total as f64
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: Some(email.into()),
            password: Some(password.into()),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_valid_signup() {
        let valid = validate_signup(&SignupRequest {
            city: Some("  Abuja ".into()),
            phone_number: Some("+234 803-123-4567".into()),
            street_address: Some("".into()),
            ..request("newuser@example.com", "newpassword123")
        })
        .unwrap();

        assert_eq!(valid.email, "newuser@example.com");
        assert_eq!(valid.profile.city.as_deref(), Some("Abuja"));
        assert_eq!(valid.profile.phone_number.as_deref(), Some("+2348031234567"));
        assert_eq!(valid.profile.street_address, None);
    }

    #[test]
    fn email_is_validated_after_trimming() {
        let valid = validate_signup(&request("  newuser@example.com ", "newpassword123")).unwrap();
        assert_eq!(valid.email, "newuser@example.com");

        let errors = validate_signup(&request("   ", "newpassword123")).unwrap_err();
        assert_eq!(errors.get("email"), Some(BLANK));
    }

    #[test]
    fn missing_fields_are_required() {
        let errors = validate_signup(&SignupRequest::default()).unwrap_err();
        assert_eq!(errors.get("email"), Some(REQUIRED));
        assert_eq!(errors.get("password"), Some(REQUIRED));
    }

    #[test]
    fn invalid_email_and_short_password() {
        let errors = validate_signup(&request("invalid-email", "short")).unwrap_err();
        assert_eq!(errors.get("email"), Some("Enter a valid email address."));
        assert_eq!(errors.get("password"), Some(PASSWORD_TOO_SHORT));
    }

    #[test]
    fn blank_email_is_reported_as_blank() {
        let errors = validate_signup(&request("", "newpassword123")).unwrap_err();
        assert_eq!(errors.get("email"), Some(BLANK));
    }

    #[test]
    fn bad_phone_number() {
        let errors = validate_signup(&SignupRequest {
            phone_number: Some("call me".into()),
            ..request("newuser@example.com", "newpassword123")
        })
        .unwrap_err();
        assert_eq!(errors.get("phone_number"), Some(INVALID_PHONE));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn overlong_profile_field() {
        let errors = validate_signup(&SignupRequest {
            postal_code: Some("1".repeat(21)),
            ..request("newuser@example.com", "newpassword123")
        })
        .unwrap_err();
        assert_eq!(
            errors.get("postal_code"),
            Some("Ensure this field has no more than 20 characters.")
        );
    }

    #[test]
    fn password_rules_in_order() {
        let email = "newuser@example.com";
        assert_eq!(check_password_strength("short", email), Err(PASSWORD_TOO_SHORT));
        assert_eq!(check_password_strength("newuser1", email), Err(PASSWORD_TOO_SIMILAR));
        assert_eq!(check_password_strength("Password123", email), Err(PASSWORD_TOO_COMMON));
        assert_eq!(check_password_strength("90210345", email), Err(PASSWORD_NUMERIC));
        assert_eq!(check_password_strength("newpassword123", email), Ok(()));
    }

    #[test]
    fn similarity_ignores_order_of_characters() {
        assert!(quick_ratio("resuwen", "newuser") >= MAX_SIMILARITY);
        assert!(quick_ratio("xyzxyzxy", "newuser") < MAX_SIMILARITY);
    }

    #[test]
    fn short_attributes_do_not_trigger_similarity() {
        assert!(exceeds_length_ratio("averyveryverylongpassphrase", "co"));
        assert!(!exceeds_length_ratio("newpassword123", "newuser"));
    }

    #[test]
    fn phone_normalization() {
        assert_eq!(normalize_phone("(555) 123-4567").as_deref(), Some("5551234567"));
        assert_eq!(normalize_phone("+1 555 123 4567").as_deref(), Some("+15551234567"));
        assert_eq!(normalize_phone("12345"), None);
        assert_eq!(normalize_phone("+12a4567890"), None);
    }
}
