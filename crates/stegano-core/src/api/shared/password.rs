use std::fmt::{self, Debug, Formatter};

use zeroize::Zeroizing;

/// An optional password, wiped from memory on drop. No password and an empty one are
/// the same thing: the payload stays unencrypted.
#[derive(Default, Clone)]
pub struct Password(Option<Zeroizing<String>>);

impl Password {
    pub fn as_str(&self) -> &str {
        self.0.as_deref().map_or("", String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(password) = &self.0 {
            write!(f, "Password({})", "*".repeat(password.len()))
        } else {
            write!(f, "Password(None)")
        }
    }
}

impl From<Option<String>> for Password {
    fn from(password: Option<String>) -> Self {
        Self(password.map(Zeroizing::new))
    }
}

impl From<String> for Password {
    fn from(password: String) -> Self {
        Self(Some(Zeroizing::new(password)))
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        password.to_string().into()
    }
}
