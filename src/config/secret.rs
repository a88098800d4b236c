//! # Keystore Passwords
//!
//! Passwords for the experimental PKCS#12 and JKS keystores. The value is
//! never printed or serialised and is wiped from memory on drop.

use serde::{Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

const REDACTED: &str = "<redacted>";

#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeystorePassword(String);

impl KeystorePassword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The plaintext password, for the keystore encoder only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KeystorePassword {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for KeystorePassword {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for KeystorePassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("KeystorePassword(\"\")")
        } else {
            write!(f, "KeystorePassword({REDACTED})")
        }
    }
}

impl Serialize for KeystorePassword {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}
