use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use axum_helpers::{AppError, CurrentUser, TokenResolver, parse_token_header};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{DUPLICATE_EMAIL_MESSAGE, UserError, UserResult};
use crate::models::{LoginRequest, SignupRequest, Token, User, generate_token_key};
use crate::providers::{
    AcceptAllOtpVerifier, LoggingPasswordResetMailer, OtpVerifier, PasswordResetMailer,
};
use crate::repository::{TokenRepository, UserRepository};
use crate::validation::{ValidSignup, validate_signup};

/// Account, credential and token operations.
pub struct AuthService<U: UserRepository, T: TokenRepository> {
    users: Arc<U>,
    tokens: Arc<T>,
    mailer: Arc<dyn PasswordResetMailer>,
    otp_verifier: Arc<dyn OtpVerifier>,
}

impl<U: UserRepository, T: TokenRepository> Clone for AuthService<U, T> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            tokens: self.tokens.clone(),
            mailer: self.mailer.clone(),
            otp_verifier: self.otp_verifier.clone(),
        }
    }
}

impl<U: UserRepository, T: TokenRepository> AuthService<U, T> {
    pub fn new(users: U, tokens: T) -> Self {
        Self {
            users: Arc::new(users),
            tokens: Arc::new(tokens),
            mailer: Arc::new(LoggingPasswordResetMailer),
            otp_verifier: Arc::new(AcceptAllOtpVerifier),
        }
    }

    pub fn with_mailer(mut self, mailer: impl PasswordResetMailer + 'static) -> Self {
        self.mailer = Arc::new(mailer);
        self
    }

    pub fn with_otp_verifier(mut self, verifier: impl OtpVerifier + 'static) -> Self {
        self.otp_verifier = Arc::new(verifier);
        self
    }

    /// Checks credentials. Unknown and wrong-password failures stay distinct.
    pub async fn authenticate(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> UserResult<User> {
        let Some(email) = email else {
            return Err(UserError::UserNotFound);
        };
        let user = self
            .users
            .get_by_email(email)
            .await?
            .ok_or(UserError::UserNotFound)?;

        let password = password.unwrap_or_default();
        if !self.verify_password(password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Login rejected: incorrect password");
            return Err(UserError::IncorrectPassword);
        }
        Ok(user)
    }

    /// Validates and stores a new account.
    pub async fn register(&self, request: &SignupRequest) -> UserResult<User> {
        let valid = self.check_signup(request).await?;
        let password_hash = self.hash_password(&valid.password)?;

        let user = User::new(valid.email, password_hash, valid.profile);
        self.users.create(user).await
    }

    /// [`Self::authenticate`] followed by [`Self::issue_token`].
    pub async fn login(&self, request: &LoginRequest) -> UserResult<(Token, User)> {
        let user = self
            .authenticate(request.email.as_deref(), request.password.as_deref())
            .await?;
        let token = self.issue_token(&user).await?;
        Ok((token, user))
    }

    /// [`Self::register`] followed by [`Self::issue_token`].
    pub async fn signup(&self, request: &SignupRequest) -> UserResult<(Token, User)> {
        let user = self.register(request).await?;
        let token = self.issue_token(&user).await?;
        Ok((token, user))
    }

    /// Returns the user's token, minting one on first use.
    pub async fn issue_token(&self, user: &User) -> UserResult<Token> {
        self.tokens.get_or_create(user.id, generate_token_key()).await
    }

    pub async fn revoke_token(&self, user_id: Uuid) -> UserResult<()> {
        if self.tokens.delete_for_user(user_id).await? {
            Ok(())
        } else {
            Err(UserError::NoTokenFound)
        }
    }

    /// Looks up a bare key. `None` covers unknown keys and orphaned tokens.
    pub async fn resolve_key(&self, key: &str) -> UserResult<Option<(Token, User)>> {
        let Some(token) = self.tokens.get_by_key(key).await? else {
            return Ok(None);
        };
        let user = self.users.get_by_id(token.user_id).await?;
        Ok(user.map(|user| (token, user)))
    }

    /// Resolves a raw `Authorization` header value. Malformed headers are
    /// unauthenticated, not errors.
    pub async fn resolve_header(
        &self,
        header: Option<&str>,
    ) -> UserResult<Option<(Token, User)>> {
        match header.and_then(parse_token_header) {
            Some(key) => self.resolve_key(key).await,
            None => Ok(None),
        }
    }

    pub async fn request_password_reset(&self, email: Option<&str>) -> UserResult<()> {
        let Some(email) = email else {
            return Err(UserError::UnknownEmail);
        };
        let user = self
            .users
            .get_by_email(email)
            .await?
            .ok_or(UserError::UnknownEmail)?;

        self.mailer.send_reset(&user).await
    }

    pub async fn verify_otp(&self, otp: Option<&str>) -> UserResult<()> {
        if self.otp_verifier.verify(otp.unwrap_or_default()).await? {
            Ok(())
        } else {
            Err(UserError::InvalidOtp)
        }
    }

    /// Field validation plus the email-uniqueness check, reported together.
    /// `UserRepository::create` still rejects a duplicate that races past this.
    async fn check_signup(&self, request: &SignupRequest) -> UserResult<ValidSignup> {
        let validated = validate_signup(request);
        let mut errors = validated.as_ref().err().cloned().unwrap_or_default();

        if !errors.contains("email") {
            if let Some(email) = request.email.as_deref().map(str::trim) {
                if self.users.get_by_email(email).await?.is_some() {
                    errors.add("email", DUPLICATE_EMAIL_MESSAGE);
                }
            }
        }

        errors.into_result()?;
        validated.map_err(UserError::from)
    }

    /// Revokes the token named by a raw `Authorization` header.
    ///
    /// A missing or malformed header is unauthenticated. A well-formed key
    /// that no longer resolves has nothing left to revoke.
    pub async fn logout(&self, header: Option<&str>) -> UserResult<()> {
        let key = header
            .and_then(parse_token_header)
            .ok_or(UserError::MissingCredentials)?;
        let Some((token, _)) = self.resolve_key(key).await? else {
            return Err(UserError::NoTokenFound);
        };

        self.revoke_token(token.user_id).await?;
        tracing::info!(user_id = %token.user_id, "Logged out");
        Ok(())
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[async_trait]
impl<U, T> TokenResolver for AuthService<U, T>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    async fn resolve(&self, key: &str) -> Result<Option<CurrentUser>, AppError> {
        let resolved = self.resolve_key(key).await?;
        Ok(resolved.map(|(token, user)| CurrentUser {
            id: user.id,
            email: user.email,
            token: token.key,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;
    use crate::repository::{MockTokenRepository, MockUserRepository};

    fn stored_user(service: &MockService) -> User {
        let hash = service.hash_password("newpassword123").unwrap();
        User::new("ada@example.com".into(), hash, Profile::default())
    }

    type MockService = AuthService<MockUserRepository, MockTokenRepository>;

    fn service(users: MockUserRepository, tokens: MockTokenRepository) -> MockService {
        AuthService::new(users, tokens)
    }

    #[tokio::test]
    async fn authenticate_unknown_email() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_email().returning(|_| Ok(None));

        let result = service(users, MockTokenRepository::new())
            .authenticate(Some("ghost@example.com"), Some("whatever"))
            .await;

        assert!(matches!(result, Err(UserError::UserNotFound)));
    }

    #[tokio::test]
    async fn authenticate_missing_email_skips_lookup() {
        let result = service(MockUserRepository::new(), MockTokenRepository::new())
            .authenticate(None, Some("whatever"))
            .await;

        assert!(matches!(result, Err(UserError::UserNotFound)));
    }

    #[tokio::test]
    async fn authenticate_checks_password() {
        let user = stored_user(&service(MockUserRepository::new(), MockTokenRepository::new()));

        let mut users = MockUserRepository::new();
        let found = user.clone();
        users
            .expect_get_by_email()
            .withf(|email| email == "ada@example.com")
            .returning(move |_| Ok(Some(found.clone())));
        let svc = service(users, MockTokenRepository::new());

        let wrong = svc.authenticate(Some("ada@example.com"), Some("nope")).await;
        assert!(matches!(wrong, Err(UserError::IncorrectPassword)));

        let missing = svc.authenticate(Some("ada@example.com"), None).await;
        assert!(matches!(missing, Err(UserError::IncorrectPassword)));

        let ok = svc
            .authenticate(Some("ada@example.com"), Some("newpassword123"))
            .await
            .unwrap();
        assert_eq!(ok.id, user.id);
    }

    #[tokio::test]
    async fn register_rejects_invalid_input_before_storage() {
        let mut users = MockUserRepository::new();
        users.expect_create().never();

        let request = SignupRequest {
            email: Some("invalid-email".into()),
            password: Some("short".into()),
            ..Default::default()
        };
        let result = service(users, MockTokenRepository::new()).register(&request).await;

        match result {
            Err(UserError::Validation(errors)) => {
                assert!(errors.contains("email"));
                assert!(errors.contains("password"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_hashes_password() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|user| Ok(user));

        let request = SignupRequest {
            email: Some("newuser@example.com".into()),
            password: Some("newpassword123".into()),
            ..Default::default()
        };
        let user = service(users, MockTokenRepository::new())
            .register(&request)
            .await
            .unwrap();

        assert!(user.password_hash.starts_with("$argon2"));
        assert_ne!(user.password_hash, "newpassword123");
    }

    #[tokio::test]
    async fn register_reports_taken_email_with_other_field_errors() {
        let existing = User::new("ada@example.com".into(), "hash".into(), Profile::default());
        let mut users = MockUserRepository::new();
        users
            .expect_get_by_email()
            .withf(|email| email == "ada@example.com")
            .returning(move |_| Ok(Some(existing.clone())));
        users.expect_create().never();

        let request = SignupRequest {
            email: Some(" ada@example.com".into()),
            password: Some("short".into()),
            ..Default::default()
        };
        let result = service(users, MockTokenRepository::new()).register(&request).await;

        match result {
            Err(UserError::Validation(errors)) => {
                assert_eq!(errors.get("email"), Some(DUPLICATE_EMAIL_MESSAGE));
                assert!(errors.contains("password"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn logout_distinguishes_missing_header_from_spent_key() {
        let mut tokens = MockTokenRepository::new();
        tokens.expect_get_by_key().returning(|_| Ok(None));
        tokens.expect_delete_for_user().never();
        let svc = service(MockUserRepository::new(), tokens);

        assert!(matches!(
            svc.logout(None).await,
            Err(UserError::MissingCredentials)
        ));
        assert!(matches!(
            svc.logout(Some("Bearer abc")).await,
            Err(UserError::MissingCredentials)
        ));
        assert!(matches!(
            svc.logout(Some("Token abc")).await,
            Err(UserError::NoTokenFound)
        ));
    }

    #[tokio::test]
    async fn revoke_without_token_is_no_token_found() {
        let mut tokens = MockTokenRepository::new();
        tokens.expect_delete_for_user().returning(|_| Ok(false));

        let result = service(MockUserRepository::new(), tokens)
            .revoke_token(Uuid::now_v7())
            .await;

        assert!(matches!(result, Err(UserError::NoTokenFound)));
    }

    #[tokio::test]
    async fn issue_token_delegates_to_get_or_create() {
        let user = User::new("ada@example.com".into(), "hash".into(), Profile::default());
        let user_id = user.id;

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_get_or_create()
            .withf(move |id, key| *id == user_id && key.len() == 40)
            .returning(|id, _| Ok(Token::new(id, "existing".into())));

        let token = service(MockUserRepository::new(), tokens)
            .issue_token(&user)
            .await
            .unwrap();
        assert_eq!(token.key, "existing");
    }

    #[tokio::test]
    async fn resolve_header_ignores_malformed_values() {
        let svc = service(MockUserRepository::new(), MockTokenRepository::new());

        assert!(svc.resolve_header(None).await.unwrap().is_none());
        assert!(svc.resolve_header(Some("Bearer abc")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn resolve_returns_current_user() {
        let user = User::new("ada@example.com".into(), "hash".into(), Profile::default());
        let user_id = user.id;

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_get_by_key()
            .returning(move |key| Ok(Some(Token::new(user_id, key.to_string()))));
        let mut users = MockUserRepository::new();
        users
            .expect_get_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let current = service(users, tokens).resolve("abc").await.unwrap().unwrap();
        assert_eq!(current.id, user_id);
        assert_eq!(current.token, "abc");
    }

    #[tokio::test]
    async fn password_reset_for_unknown_email() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_email().returning(|_| Ok(None));

        let result = service(users, MockTokenRepository::new())
            .request_password_reset(Some("ghost@example.com"))
            .await;
        assert!(matches!(result, Err(UserError::UnknownEmail)));
    }

    struct RejectingVerifier;

    #[async_trait]
    impl OtpVerifier for RejectingVerifier {
        async fn verify(&self, _otp: &str) -> UserResult<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn otp_verification_uses_verifier() {
        let svc = service(MockUserRepository::new(), MockTokenRepository::new());
        assert!(svc.verify_otp(Some("123456")).await.is_ok());

        let strict = svc.with_otp_verifier(RejectingVerifier);
        assert!(matches!(
            strict.verify_otp(Some("123456")).await,
            Err(UserError::InvalidOtp)
        ));
    }
}
