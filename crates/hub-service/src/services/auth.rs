//! Authentication service
//!
//! Handles registration, login, email verification and session lookup.

use hub_common::auth::{hash_password, validate_password_strength, verify_password};
use hub_common::AppError;
use hub_core::entities::{User, VerificationToken};
use hub_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, MessageResponse, RegisterRequest,
    RegisterResponse, ResendVerificationRequest, SessionResponse, VerifyEmailRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const RESEND_ACCEPTED: &str =
    "If an account exists with this email, a verification link has been sent.";

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new, unverified user and send the verification link
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        validate_password_strength(&request.password)?;

        let username = request.username.trim().to_lowercase();
        let email = request.email.trim().to_lowercase();

        if self.ctx.user_repo().find_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self
            .ctx
            .user_repo()
            .find_by_username(&username)
            .await?
            .is_some()
        {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(self.ctx.generate_id(), username, email);
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");

        self.issue_verification(&user).await?;

        Ok(RegisterResponse {
            message: "Registration successful! Please check your email to verify your account."
                .to_string(),
            user: CurrentUserResponse::from(&user),
        })
    }

    /// Exchange email and password for a bearer token
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let email = request.email.trim().to_lowercase();
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if user.is_banned {
            warn!(user_id = %user.id, "Login attempt by banned user");
            return Err(DomainError::AccountBanned.into());
        }

        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;
        if !verify_password(&request.password, &hash)? {
            warn!(user_id = %user.id, "Failed login attempt");
            return Err(AppError::InvalidCredentials.into());
        }

        if !user.email_verified {
            return Err(ServiceError::permission_denied(
                "Please verify your email before logging in",
            ));
        }

        info!(user_id = %user.id, "User logged in");
        self.sign_in(&user)
    }

    /// Consume a verification token and sign the user in
    #[instrument(skip(self, request))]
    pub async fn verify_email(&self, request: VerifyEmailRequest) -> ServiceResult<AuthResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let token = self
            .ctx
            .token_repo()
            .find_by_token(request.token.trim())
            .await?
            .ok_or(DomainError::VerificationTokenNotFound)?;

        if token.is_expired() {
            return Err(DomainError::VerificationTokenExpired.into());
        }

        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(token.user_id)
            .await?
            .ok_or(DomainError::UserNotFound(token.user_id))?;

        self.ctx.user_repo().set_email_verified(user.id).await?;
        self.ctx.token_repo().delete(&token.token).await?;
        user.email_verified = true;

        info!(user_id = %user.id, "Email verified");
        self.sign_in(&user)
    }

    /// Replace any outstanding verification token with a fresh one
    ///
    /// Unknown addresses get the same answer as known ones.
    #[instrument(skip(self, request))]
    pub async fn resend_verification(
        &self,
        request: ResendVerificationRequest,
    ) -> ServiceResult<MessageResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let email = request.email.trim().to_lowercase();
        let Some(user) = self.ctx.user_repo().find_by_email(&email).await? else {
            return Ok(MessageResponse::new(RESEND_ACCEPTED));
        };

        if user.email_verified {
            return Err(ServiceError::validation("Email is already verified"));
        }

        let superseded = self.ctx.token_repo().delete_by_user(user.id).await?;
        self.issue_verification(&user).await?;

        info!(user_id = %user.id, superseded, "Verification token reissued");
        Ok(MessageResponse::new(
            "Verification email sent! Please check your inbox.",
        ))
    }

    /// The signed-in user, or anonymous when the id no longer resolves to an active account
    #[instrument(skip(self))]
    pub async fn session(&self, user_id: Option<Snowflake>) -> ServiceResult<SessionResponse> {
        let Some(user_id) = user_id else {
            return Ok(SessionResponse::anonymous());
        };

        match self.ctx.user_repo().find_by_id(user_id).await? {
            Some(user) if !user.is_banned => {
                Ok(SessionResponse::signed_in(CurrentUserResponse::from(&user)))
            }
            _ => Ok(SessionResponse::anonymous()),
        }
    }

    /// Decode a bearer token into the user id it was issued for
    pub fn authenticate(&self, token: &str) -> ServiceResult<Snowflake> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        Ok(claims.user_id()?)
    }

    fn sign_in(&self, user: &User) -> ServiceResult<AuthResponse> {
        let token = self.ctx.jwt_service().issue_access_token(user.id)?;
        Ok(AuthResponse {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user: CurrentUserResponse::from(user),
        })
    }

    /// Store a new token and mail the link; delivery failures are only logged
    async fn issue_verification(&self, user: &User) -> ServiceResult<()> {
        let token = VerificationToken::issue(user.id, self.ctx.settings().verification_ttl);
        self.ctx.token_repo().create(&token).await?;

        let url = verification_url(&self.ctx.settings().site_url, &token.token);
        if let Err(e) = self.ctx.mailer().send_verification(&user.email, &url).await {
            warn!(user_id = %user.id, error = %e, "Failed to send verification email");
        }
        Ok(())
    }
}

fn verification_url(site_url: &str, token: &str) -> String {
    format!("{site_url}/verify-email?token={token}")
}
