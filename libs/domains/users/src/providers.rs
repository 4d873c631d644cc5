//! Outbound collaborators for the password-reset flow.
//!
//! Neither email delivery nor OTP checking is wired to a real provider yet.
//! The default implementations log and accept respectively.

use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::User;

/// Delivers password-reset instructions to a known user.
#[async_trait]
pub trait PasswordResetMailer: Send + Sync {
    async fn send_reset(&self, user: &User) -> UserResult<()>;
}

/// Decides whether a one-time code is acceptable.
#[async_trait]
pub trait OtpVerifier: Send + Sync {
    async fn verify(&self, otp: &str) -> UserResult<bool>;
}

#[derive(Debug, Clone, Default)]
pub struct LoggingPasswordResetMailer;

#[async_trait]
impl PasswordResetMailer for LoggingPasswordResetMailer {
    async fn send_reset(&self, user: &User) -> UserResult<()> {
        tracing::info!(user_id = %user.id, "Password reset requested");
        Ok(())
    }
}

/// Accepts every code, including an empty one.
#[derive(Debug, Clone, Default)]
pub struct AcceptAllOtpVerifier;

#[async_trait]
impl OtpVerifier for AcceptAllOtpVerifier {
    async fn verify(&self, _otp: &str) -> UserResult<bool> {
        Ok(true)
    }
}
