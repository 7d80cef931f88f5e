use std::sync::Arc;

use feedline_crypto::CredentialHasher;
use feedline_types::{User, UserId, UserSummary};

use crate::error::{IdentityError, IdentityResult};
use crate::traits::{NewUser, UserStore};
use crate::validation::{
    normalize_email, require, require_secret, validate_email, validate_username, IdentityLimits,
};

/// Registration, credential checks, and account lookup.
pub struct IdentityService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn CredentialHasher>,
    limits: IdentityLimits,
}

impl IdentityService {
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn CredentialHasher>,
        limits: IdentityLimits,
    ) -> Self {
        Self {
            store,
            hasher,
            limits,
        }
    }

    /// Register a new account and return its id.
    ///
    /// Empty fields are reported in the order username, email, password.
    /// Duplicate email is reported before duplicate username.
    pub fn register(&self, username: &str, email: &str, password: &str) -> IdentityResult<UserId> {
        require("username", username)?;
        require("email", email)?;
        require_secret("password", password)?;

        let username = username.trim();
        let email = normalize_email(email);
        validate_username(username, &self.limits)?;
        validate_email(&email, &self.limits)?;

        // Skips hashing for a known duplicate. The store re-checks on insert.
        if self.store.find_by_email(&email)?.is_some() {
            return Err(IdentityError::DuplicateEmail(email));
        }

        let password_digest = self.hasher.hash(password)?;
        let user = self.store.insert(NewUser {
            username: username.to_string(),
            email,
            password_digest,
        })?;

        tracing::info!(user = %user.id, username = %user.username, "registered user");
        Ok(user.id)
    }

    /// Check an email/password pair and return the matching account id.
    pub fn authenticate(&self, email: &str, password: &str) -> IdentityResult<UserId> {
        let email = normalize_email(email);
        let Some(user) = self.store.find_by_email(&email)? else {
            tracing::warn!("login rejected: unknown email");
            return Err(IdentityError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_digest) {
            tracing::warn!(user = %user.id, "login rejected: password mismatch");
            return Err(IdentityError::InvalidCredentials);
        }

        tracing::debug!(user = %user.id, "authenticated");
        Ok(user.id)
    }

    /// Replace a user's password after verifying the current one.
    pub fn change_password(&self, user: UserId, current: &str, new: &str) -> IdentityResult<()> {
        require_secret("new_password", new)?;

        let account = self.require_user(user)?;
        if !self.hasher.verify(current, &account.password_digest) {
            tracing::warn!(user = %user, "password change rejected");
            return Err(IdentityError::InvalidCredentials);
        }

        let digest = self.hasher.hash(new)?;
        self.store.update_digest(user, digest)?;
        tracing::info!(user = %user, "password changed");
        Ok(())
    }

    pub fn user(&self, id: UserId) -> IdentityResult<Option<User>> {
        self.store.get(id)
    }

    /// Fetch an account that must exist.
    pub fn require_user(&self, id: UserId) -> IdentityResult<User> {
        self.store
            .get(id)?
            .ok_or_else(|| IdentityError::UserNotFound(id.to_string()))
    }

    pub fn user_by_username(&self, username: &str) -> IdentityResult<Option<User>> {
        self.store.find_by_username(username.trim())
    }

    /// Public projections of the given accounts, in the order given.
    pub fn summaries<I>(&self, ids: I) -> IdentityResult<Vec<UserSummary>>
    where
        I: IntoIterator<Item = UserId>,
    {
        let ids: Vec<UserId> = ids.into_iter().collect();
        Ok(self
            .store
            .get_many(&ids)?
            .iter()
            .map(User::summary)
            .collect())
    }

    pub fn exists(&self, id: UserId) -> IdentityResult<bool> {
        self.store.exists(id)
    }
}
