use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

macro_rules! sequential_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw numeric identifier.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// The raw numeric value.
            pub const fn get(self) -> u64 {
                self.0
            }

            /// The identifier allocated after this one.
            pub const fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}:{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            /// Accepts both `user:7` and bare `7`.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s
                    .strip_prefix(concat!($prefix, ":"))
                    .unwrap_or(s);
                digits.parse::<u64>().map(Self).map_err(|_| TypeError::InvalidId {
                    kind: $prefix,
                    input: s.to_string(),
                })
            }
        }
    };
}

sequential_id!(
    /// Identifier of a registered user.
    ///
    /// Allocated by the identity store in registration order, starting at 1.
    UserId,
    "user"
);

sequential_id!(
    /// Identifier of a post.
    ///
    /// Allocated by the post store in insertion order, starting at 1. The feed
    /// order relies on this: among posts with equal timestamps, the larger id
    /// was appended later.
    PostId,
    "post"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_prefix() {
        assert_eq!(UserId::new(7).to_string(), "user:7");
        assert_eq!(PostId::new(12).to_string(), "post:12");
    }

    #[test]
    fn parse_prefixed_and_bare() {
        assert_eq!("user:7".parse::<UserId>().unwrap(), UserId::new(7));
        assert_eq!("7".parse::<UserId>().unwrap(), UserId::new(7));
        assert_eq!("post:3".parse::<PostId>().unwrap(), PostId::new(3));
    }

    #[test]
    fn parse_rejects_wrong_prefix() {
        let err = "post:3".parse::<UserId>().unwrap_err();
        assert!(matches!(err, TypeError::InvalidId { kind: "user", .. }));
        assert!("".parse::<PostId>().is_err());
        assert!("user:-1".parse::<UserId>().is_err());
    }

    #[test]
    fn next_is_sequential() {
        assert_eq!(UserId::new(1).next(), UserId::new(2));
        assert!(PostId::new(1) < PostId::new(1).next());
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&UserId::new(42)).unwrap();
        assert_eq!(json, "42");
        let parsed: PostId = serde_json::from_str("9").unwrap();
        assert_eq!(parsed, PostId::new(9));
    }
}
