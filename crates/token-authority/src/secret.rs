//! Secret wrappers for key material and passwords.
//!
//! Re-exports the [`secrecy`] types so that crates holding signing secrets or
//! user passwords can keep them out of `Debug` output and logs. Values are
//! zeroized on drop and only reachable through `expose_secret()`.
//!
//! ```rust
//! use token_authority::secret::{ExposeSecret, SigningSecret};
//!
//! let secret = SigningSecret::from_str_bytes("0123456789abcdef0123456789abcdef");
//! assert!(format!("{secret:?}").contains("REDACTED"));
//! assert_eq!(secret.expose_secret().len(), 32);
//! ```

pub use secrecy::{ExposeSecret, SecretBox, SecretString};

use std::fmt;

/// HMAC signing secret held for the lifetime of the process.
pub struct SigningSecret(SecretBox<Vec<u8>>);

impl SigningSecret {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(SecretBox::new(Box::new(bytes)))
    }

    /// Use the UTF-8 bytes of `value` as the secret.
    #[must_use]
    pub fn from_str_bytes(value: &str) -> Self {
        Self::new(value.as_bytes().to_vec())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.expose_secret().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl ExposeSecret<[u8]> for SigningSecret {
    fn expose_secret(&self) -> &[u8] {
        self.0.expose_secret().as_slice()
    }
}

impl Clone for SigningSecret {
    fn clone(&self) -> Self {
        Self::new(self.0.expose_secret().clone())
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret([REDACTED])")
    }
}
