//! The [`UserStore`] trait defining the account storage interface.

use feedline_types::{PasswordDigest, User, UserId};

use crate::error::IdentityResult;

/// An account ready to be stored: fields already validated and normalized,
/// password already digested.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_digest: PasswordDigest,
}

/// Storage backend for user accounts.
///
/// Implementations must be thread-safe (`Send + Sync`). `insert` must check
/// email and username uniqueness and write the record as one atomic step,
/// so two concurrent registrations for the same email cannot both succeed.
/// Emails are stored and looked up in the normalized form produced by
/// [`crate::validation::normalize_email`].
pub trait UserStore: Send + Sync {
    /// Insert a new account and allocate its id.
    ///
    /// Fails with `DuplicateEmail` if the email is taken, then with
    /// `DuplicateUsername` if the username is taken.
    fn insert(&self, new_user: NewUser) -> IdentityResult<User>;

    /// Fetch an account by id. Returns `Ok(None)` if it does not exist.
    fn get(&self, id: UserId) -> IdentityResult<Option<User>>;

    /// Fetch an account by normalized email.
    fn find_by_email(&self, email: &str) -> IdentityResult<Option<User>>;

    /// Fetch an account by exact username.
    fn find_by_username(&self, username: &str) -> IdentityResult<Option<User>>;

    /// Replace the stored password digest.
    fn update_digest(&self, id: UserId, digest: PasswordDigest) -> IdentityResult<()>;

    /// Number of registered accounts.
    fn count(&self) -> IdentityResult<usize>;

    /// Fetch several accounts, skipping ids that do not exist.
    ///
    /// Results follow the order of `ids`.
    fn get_many(&self, ids: &[UserId]) -> IdentityResult<Vec<User>> {
        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(user) = self.get(*id)? {
                users.push(user);
            }
        }
        Ok(users)
    }

    /// Whether an account with this id exists.
    fn exists(&self, id: UserId) -> IdentityResult<bool> {
        Ok(self.get(id)?.is_some())
    }
}
