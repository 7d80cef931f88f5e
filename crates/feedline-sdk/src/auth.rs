use feedline_types::UserId;

use crate::error::{ApiError, ApiResult};

/// Who is making a call.
///
/// Built by the outer layer from whatever session or token mechanism it
/// uses, or returned by [`crate::Feedline::authenticate`]. The core never
/// inspects tokens; a verified context is trusted as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AuthContext {
    user: Option<UserId>,
}

impl AuthContext {
    /// A caller with no verified identity.
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// A caller whose identity has already been verified.
    pub fn verified(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<UserId> {
        self.user
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The verified user, or `Unauthenticated`.
    pub fn require(&self) -> ApiResult<UserId> {
        self.user.ok_or(ApiError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_is_rejected() {
        let ctx = AuthContext::anonymous();
        assert!(!ctx.is_authenticated());
        assert!(matches!(ctx.require(), Err(ApiError::Unauthenticated)));
        assert_eq!(ctx, AuthContext::default());
    }

    #[test]
    fn verified_yields_user() {
        let ctx = AuthContext::verified(UserId::new(3));
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.require().unwrap(), UserId::new(3));
        assert_eq!(ctx.user(), Some(UserId::new(3)));
    }
}
