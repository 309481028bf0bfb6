//! Token newtypes.
//!
//! Wrapping the three token strings in distinct types keeps them from
//! being swapped at call sites and keeps their values out of `Debug`
//! output.

macro_rules! token_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw token string.
            pub fn new(token: impl Into<String>) -> Self {
                Self(token.into())
            }

            /// Returns the raw token string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the token, returning the raw string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($name), "([REDACTED])"))
            }
        }
    };
}

token_type! {
    /// Short-lived bearer credential authorizing API calls.
    AccessToken
}

token_type! {
    /// Longer-lived credential used to mint a new access token without
    /// re-authentication.
    RefreshToken
}

token_type! {
    /// Anti-forgery token some endpoints require on mutating calls.
    CsrfToken
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_value() {
        let token = AccessToken::new("very-secret");
        assert_eq!(format!("{:?}", token), "AccessToken([REDACTED])");
    }

    #[test]
    fn round_trip() {
        let token = RefreshToken::new("abc");
        assert_eq!(token.as_str(), "abc");
        assert_eq!(token.into_inner(), "abc");
    }
}
