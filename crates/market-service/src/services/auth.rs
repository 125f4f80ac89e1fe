//! Authentication service
//!
//! Handles phone verification, registration, login and logout.

use chrono::Duration;
use tracing::{info, instrument, warn};
use validator::Validate;

use market_core::entities::{Chat, PendingChallenge, Session, User};
use market_core::events::{SessionEvent, UserRegisteredEvent};
use market_core::{DomainError, DomainEvent, PhoneNumber};

use crate::dto::{CodeRequestResponse, ConfirmCodeRequest, RequestCodeRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const USERNAME_MIN: usize = 2;
const USERNAME_MAX: usize = 32;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue a verification code for a phone number
    ///
    /// Replaces any challenge that is still outstanding.
    #[instrument(skip(self, request), fields(country_code = %request.country_code))]
    pub async fn request_code(
        &self,
        request: RequestCodeRequest,
    ) -> ServiceResult<CodeRequestResponse> {
        request.validate()?;
        let phone = PhoneNumber::parse(&request.country_code, &request.phone_number)
            .map_err(DomainError::from)?;

        if let Some(previous) = self.ctx.session_repo().pending_challenge().await? {
            self.cancel_handle(&previous.handle).await;
        }

        let issued = self.ctx.verifier().send_code(&phone).await.map_err(|e| {
            warn!(error = %e, "Verification code could not be sent");
            ServiceError::CodeDelivery(e.to_string())
        })?;

        let ttl = Duration::from_std(self.ctx.settings().otp_ttl)
            .map_err(|e| ServiceError::internal(format!("invalid code lifetime: {e}")))?;
        let Some(mut challenge) = PendingChallenge::new(issued.handle.clone(), phone.clone(), ttl)
        else {
            self.cancel_handle(&issued.handle).await;
            return Err(ServiceError::internal("code lifetime out of range"));
        };
        if let Some(code) = issued.dev_code {
            challenge = challenge.with_dev_code(code);
        }
        self.ctx.session_repo().set_pending_challenge(&challenge).await?;

        let registered = self.ctx.user_repo().find_by_phone(&phone).await?.is_some();

        info!(registered, expires_at = %challenge.expires_at, "Verification code issued");

        Ok(CodeRequestResponse {
            phone_number: phone.full(),
            expires_at: challenge.expires_at,
            registered,
            dev_code: challenge.dev_code,
        })
    }

    /// Confirm a verification code and sign in
    ///
    /// An unknown phone number is registered with the supplied username.
    /// The challenge is consumed once the session is stored. A missing or
    /// unusable username, or a failed registration, leaves it in place so the
    /// form can be resubmitted with the same code.
    #[instrument(skip(self, request), fields(country_code = %request.country_code))]
    pub async fn confirm_code(&self, request: ConfirmCodeRequest) -> ServiceResult<User> {
        request.validate()?;
        let phone = PhoneNumber::parse(&request.country_code, &request.phone_number)
            .map_err(DomainError::from)?;

        let code = request.code.trim();
        if code.len() != self.ctx.settings().otp_length
            || !code.chars().all(|c| c.is_ascii_digit())
        {
            warn!("Malformed verification code");
            return Err(DomainError::InvalidCode.into());
        }

        let mut challenge = self
            .ctx
            .session_repo()
            .pending_challenge()
            .await?
            .ok_or(DomainError::NoPendingChallenge)?;

        if !challenge.is_for(&phone) {
            warn!("Verification code confirmed for a different phone number");
            return Err(DomainError::PhoneMismatch.into());
        }

        if challenge.is_expired() {
            warn!(expires_at = %challenge.expires_at, "Verification code expired");
            self.discard_challenge(&challenge).await?;
            return Err(DomainError::ChallengeExpired.into());
        }

        let existing = self.ctx.user_repo().find_by_phone(&phone).await?;

        // Checked before the code is consumed so a retry can reuse it
        let username = match &existing {
            Some(_) => None,
            None => Some(self.available_username(request.username.as_deref()).await?),
        };

        if challenge.confirmed_code.is_some() {
            if !challenge.was_confirmed_with(code) {
                warn!("Verification code does not match the accepted one");
                return Err(DomainError::InvalidCode.into());
            }
        } else {
            let verified = match self.ctx.verifier().confirm(&challenge.handle, code).await {
                Ok(verified) => verified,
                Err(e) => {
                    warn!(error = %e, "Verification code rejected");
                    return Err(e.into());
                }
            };
            if verified.phone != phone {
                warn!("Provider verified a different phone number");
                self.ctx.session_repo().clear_pending_challenge().await?;
                return Err(DomainError::PhoneMismatch.into());
            }
            challenge.confirm(code);
            self.ctx.session_repo().set_pending_challenge(&challenge).await?;
        }

        let user = match (existing, username) {
            (Some(user), _) => user,
            (None, Some(username)) => self.register(&phone, username).await?,
            (None, None) => return Err(DomainError::UsernameRequired.into()),
        };

        self.ctx.session_repo().set_current(&Session::new(user.clone())).await?;
        self.ctx.session_repo().clear_pending_challenge().await?;
        self.ctx
            .events()
            .publish(DomainEvent::SessionStarted(SessionEvent::new(Some(user.id))));

        info!(user_id = %user.id, role = user.role.as_str(), "User signed in");

        Ok(user)
    }

    /// Sign out and drop any outstanding challenge
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ServiceResult<()> {
        if let Some(challenge) = self.ctx.session_repo().pending_challenge().await? {
            self.discard_challenge(&challenge).await?;
        }

        let user_id = self.ctx.session_repo().current().await?.map(|s| s.user.id);
        self.ctx.session_repo().clear_current().await?;
        self.ctx
            .events()
            .publish(DomainEvent::SessionEnded(SessionEvent::new(user_id)));

        info!(user_id = ?user_id, "User signed out");

        Ok(())
    }

    /// The signed-in user, as currently stored
    ///
    /// A session whose user record has disappeared reads as signed out.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> ServiceResult<Option<User>> {
        let Some(session) = self.ctx.session_repo().current().await? else {
            return Ok(None);
        };
        Ok(self.ctx.user_repo().find_by_id(session.user.id).await?)
    }

    /// Whether a phone number already belongs to an account
    #[instrument(skip(self, phone_number))]
    pub async fn is_registered(
        &self,
        country_code: &str,
        phone_number: &str,
    ) -> ServiceResult<bool> {
        let phone = PhoneNumber::parse(country_code, phone_number).map_err(DomainError::from)?;
        Ok(self.ctx.user_repo().find_by_phone(&phone).await?.is_some())
    }

    /// The signed-in user, or `NotSignedIn`
    pub async fn require_user(&self) -> ServiceResult<User> {
        self.current_user()
            .await?
            .ok_or_else(|| DomainError::NotSignedIn.into())
    }

    /// The signed-in admin, or the reason there is none
    pub async fn require_admin(&self) -> ServiceResult<User> {
        let user = self.require_user().await?;
        if !user.is_admin() {
            warn!(user_id = %user.id, "Admin role required");
            return Err(DomainError::AdminRequired.into());
        }
        Ok(user)
    }

    // === Helpers ===

    async fn available_username(&self, requested: Option<&str>) -> ServiceResult<String> {
        let username = requested
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(DomainError::UsernameRequired)?;

        let len = username.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
            return Err(DomainError::InvalidUsername(format!(
                "must be {USERNAME_MIN}-{USERNAME_MAX} characters"
            ))
            .into());
        }
        if username.chars().any(char::is_control) {
            return Err(
                DomainError::InvalidUsername("contains control characters".to_string()).into(),
            );
        }

        if self.ctx.user_repo().find_by_username(username).await?.is_some() {
            warn!(username, "Username already taken");
            return Err(DomainError::UsernameTaken.into());
        }

        Ok(username.to_string())
    }

    /// Create the user together with their personal broadcast
    async fn register(&self, phone: &PhoneNumber, username: String) -> ServiceResult<User> {
        let role = self.ctx.settings().role_policy.role_for(phone);
        let chat_id = self.ctx.generate_id();
        let user = User::new(self.ctx.generate_id(), phone, username, role)
            .with_personal_broadcast(chat_id);

        self.ctx.user_repo().create(&user).await?;

        let chat = Chat::new_personal(chat_id, user.id);
        if let Err(e) = self.ctx.chat_repo().create(&chat).await {
            warn!(user_id = %user.id, error = %e, "Personal broadcast not created, removing user");
            if let Err(cleanup) = self.ctx.user_repo().delete(user.id).await {
                warn!(user_id = %user.id, error = %cleanup, "Failed to remove user");
            }
            return Err(e.into());
        }

        self.ctx
            .events()
            .publish(DomainEvent::UserRegistered(UserRegisteredEvent::new(
                user.id, chat_id,
            )));

        info!(user_id = %user.id, role = role.as_str(), "User registered");

        Ok(user)
    }

    async fn discard_challenge(&self, challenge: &PendingChallenge) -> ServiceResult<()> {
        self.cancel_handle(&challenge.handle).await;
        self.ctx.session_repo().clear_pending_challenge().await?;
        Ok(())
    }

    async fn cancel_handle(&self, handle: &str) {
        if let Err(e) = self.ctx.verifier().cancel(handle).await {
            warn!(error = %e, "Failed to cancel verification code");
        }
    }
}
