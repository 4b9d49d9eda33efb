use std::sync::Arc;

use company_registry_sdk::{OptionalField, Session, User};
use registry_auth::TokenAuthority;
use uuid::Uuid;

use crate::domain::error::{DomainError, require};
use crate::domain::events::{EventDispatcher, MutationEvent, MutationKind};
use crate::domain::fields::UserFields;
use crate::domain::password;
use crate::domain::repos::UsersRepository;

/// Account registration and authentication.
pub struct UsersService {
    repo: Arc<dyn UsersRepository>,
    authority: Arc<TokenAuthority>,
    events: EventDispatcher,
}

impl UsersService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn UsersRepository>,
        authority: Arc<TokenAuthority>,
        events: EventDispatcher,
    ) -> Self {
        Self {
            repo,
            authority,
            events,
        }
    }

    /// Create an account and issue its first token.
    ///
    /// # Errors
    /// `Validation` for an empty username or password, `Conflict` when the
    /// username is taken, `Infrastructure` for storage or signing failures.
    pub async fn register(&self, username: &str, password: &str) -> Result<Session, DomainError> {
        if username.trim().is_empty() {
            return Err(DomainError::validation(UserFields::USERNAME, "must not be empty"));
        }
        if password.is_empty() {
            return Err(DomainError::validation(UserFields::PASSWORD, "must not be empty"));
        }

        let password_hash = password::hash(password.to_owned()).await?;
        let user = self.repo.create(User::new(username, password_hash)).await?;
        let user_id = require(user.id, UserFields::ID)?;

        let token = self.issue(user_id)?;
        tracing::info!(%user_id, "user registered");
        self.events.dispatch(MutationEvent::new(MutationKind::Signup, user_id));

        Ok(Session { user_id, token })
    }

    /// Exchange credentials for a token.
    ///
    /// # Errors
    /// `BadCredentials` for every failure: unknown user, wrong password,
    /// corrupt stored hash or storage failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, DomainError> {
        let user = match self.repo.get_by_username(username).await {
            Ok(user) => user,
            Err(e) => {
                if !e.is_not_found() {
                    tracing::warn!(error = %e, kind = e.kind(), "user lookup failed during login");
                }
                // Keep the timing of unknown users close to that of a wrong password.
                if password::hash(password.to_owned()).await.is_err() {
                    tracing::debug!("decoy password hash failed");
                }
                return Err(DomainError::BadCredentials);
            }
        };

        let (OptionalField::Value(user_id), OptionalField::Value(stored)) =
            (user.id, user.password_hash)
        else {
            tracing::warn!("stored user record is incomplete");
            return Err(DomainError::BadCredentials);
        };

        match password::verify(password.to_owned(), stored).await {
            Ok(true) => {}
            Ok(false) => return Err(DomainError::BadCredentials),
            Err(e) => {
                tracing::warn!(error = %e, "password verification failed");
                return Err(DomainError::BadCredentials);
            }
        }

        let token = self.issue(user_id).map_err(|e| {
            tracing::warn!(error = %e, %user_id, "token issue failed during login");
            DomainError::BadCredentials
        })?;
        tracing::debug!(%user_id, "login succeeded");
        Ok(Session { user_id, token })
    }

    /// Resolve a bearer token to the user id it was issued for.
    ///
    /// # Errors
    /// `BadCredentials` for any token failure.
    pub fn authenticate(&self, token: &str) -> Result<Uuid, DomainError> {
        self.authority.validate_token(token).map_err(|e| {
            tracing::warn!(kind = e.kind(), "token rejected");
            DomainError::BadCredentials
        })
    }

    /// # Errors
    /// `NotFound` when no user has this id.
    pub async fn get_by_id(&self, id: Uuid) -> Result<User, DomainError> {
        self.repo.get_by_id(id).await
    }

    fn issue(&self, user_id: Uuid) -> Result<String, DomainError> {
        self.authority
            .issue_token(user_id)
            .map_err(DomainError::infrastructure)
    }
}
