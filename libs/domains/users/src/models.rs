use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Optional contact details stored alongside the login identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub phone_number: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// User entity
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    /// Login handle, unique across users and compared case-sensitively
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub profile: Profile,
    /// Set once on signup
    pub date_joined: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, password_hash: String, profile: Profile) -> Self {
        Self {
            id: Uuid::now_v7(),
            email,
            password_hash,
            profile,
            date_joined: Utc::now(),
        }
    }
}

/// Public user representation; the password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    #[serde(flatten)]
    pub profile: Profile,
    pub date_joined: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            profile: user.profile,
            date_joined: user.date_joined,
        }
    }
}

/// Opaque bearer credential. A user holds at most one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub key: String,
    pub user_id: Uuid,
    pub created: DateTime<Utc>,
}

impl Token {
    pub fn new(user_id: Uuid, key: String) -> Self {
        Self {
            key,
            user_id,
            created: Utc::now(),
        }
    }
}

/// 20 random bytes rendered as 40 lowercase hex characters.
pub fn generate_token_key() -> String {
    let bytes: [u8; 20] = rand::random();
    const_hex::encode(bytes)
}

/// Signup payload. Every field is optional at the type level so that missing
/// values surface as field errors instead of deserialization failures.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(
        required(message = "This field is required."),
        email(message = "Enter a valid email address.")
    )]
    pub email: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub password: Option<String>,
    pub phone_number: Option<String>,
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub street_address: Option<String>,
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub city: Option<String>,
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub state_province: Option<String>,
    #[validate(length(max = 20, message = "Ensure this field has no more than 20 characters."))]
    pub postal_code: Option<String>,
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyOtpRequest {
    pub otp: Option<String>,
}

/// Body of successful login and signup responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Body of `GET /home`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl HomeResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            token: None,
            user: None,
        }
    }

    pub fn authenticated(token: String, user: User) -> Self {
        Self {
            authenticated: true,
            token: Some(token),
            user: Some(user.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_keys_are_forty_hex_chars() {
        let key = generate_token_key();
        assert_eq!(key.len(), 40);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(key, generate_token_key());
    }

    #[test]
    fn user_response_flattens_profile_and_hides_hash() {
        let user = User::new(
            "ada@example.com".into(),
            "$argon2id$secret".into(),
            Profile {
                city: Some("Lagos".into()),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["city"], "Lagos");
        assert!(json["phone_number"].is_null());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert!(json.get("date_joined").is_some());
    }

    #[test]
    fn anonymous_home_omits_token_and_user() {
        let json = serde_json::to_value(HomeResponse::anonymous()).unwrap();
        assert_eq!(json, serde_json::json!({"authenticated": false}));
    }
}
