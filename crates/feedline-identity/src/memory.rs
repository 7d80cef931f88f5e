//! In-memory account store.
//!
//! [`InMemoryUserStore`] keeps accounts in a `BTreeMap` with email and
//! username indexes, all behind one `RwLock` so uniqueness checks and
//! inserts are atomic with respect to each other.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use feedline_types::{PasswordDigest, User, UserId};

use crate::error::{IdentityError, IdentityResult};
use crate::traits::{NewUser, UserStore};

/// An in-memory implementation of [`UserStore`]. Data is lost on drop.
#[derive(Debug)]
pub struct InMemoryUserStore {
    inner: RwLock<UserState>,
}

#[derive(Debug)]
struct UserState {
    users: BTreeMap<UserId, User>,
    by_email: HashMap<String, UserId>,
    by_username: HashMap<String, UserId>,
    next_id: UserId,
}

impl InMemoryUserStore {
    /// Create a new empty store. The first account gets id 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(UserState {
                users: BTreeMap::new(),
                by_email: HashMap::new(),
                by_username: HashMap::new(),
                next_id: UserId::new(1),
            }),
        }
    }

    fn read(&self) -> IdentityResult<RwLockReadGuard<'_, UserState>> {
        self.inner
            .read()
            .map_err(|e| IdentityError::Storage(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> IdentityResult<RwLockWriteGuard<'_, UserState>> {
        self.inner
            .write()
            .map_err(|e| IdentityError::Storage(format!("lock poisoned: {e}")))
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    fn insert(&self, new_user: NewUser) -> IdentityResult<User> {
        let mut state = self.write()?;

        if state.by_email.contains_key(&new_user.email) {
            return Err(IdentityError::DuplicateEmail(new_user.email));
        }
        if state.by_username.contains_key(&new_user.username) {
            return Err(IdentityError::DuplicateUsername(new_user.username));
        }

        let id = state.next_id;
        state.next_id = id.next();

        let user = User {
            id,
            username: new_user.username,
            email: new_user.email,
            password_digest: new_user.password_digest,
        };
        state.by_email.insert(user.email.clone(), id);
        state.by_username.insert(user.username.clone(), id);
        state.users.insert(id, user.clone());
        Ok(user)
    }

    fn get(&self, id: UserId) -> IdentityResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> IdentityResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    fn find_by_username(&self, username: &str) -> IdentityResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .by_username
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    fn update_digest(&self, id: UserId, digest: PasswordDigest) -> IdentityResult<()> {
        let mut state = self.write()?;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| IdentityError::UserNotFound(id.to_string()))?;
        user.password_digest = digest;
        Ok(())
    }

    fn count(&self) -> IdentityResult<usize> {
        Ok(self.read()?.users.len())
    }

    fn get_many(&self, ids: &[UserId]) -> IdentityResult<Vec<User>> {
        let state = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }
}
