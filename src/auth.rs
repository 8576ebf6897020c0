/// Gate on the shared secret carried in the Authorization header.
pub struct Auth {
    password: Option<String>,
}

impl Auth {
    pub fn new(password: Option<String>) -> Self {
        Self { password }
    }

    /// Byte-exact, case-sensitive comparison against the configured secret.
    /// Deliberately unhashed and not constant-time, matching the wire
    /// contract: the header carries the password verbatim.
    pub fn authorize(&self, provided: Option<&[u8]>) -> bool {
        match &self.password {
            None => true,
            Some(password) => provided == Some(password.as_bytes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_password_admits_everyone() {
        let auth = Auth::new(None);
        assert!(auth.authorize(None));
        assert!(auth.authorize(Some(b"anything")));
    }

    #[test]
    fn exact_match_required() {
        let auth = Auth::new(Some("secret".to_string()));
        assert!(auth.authorize(Some(b"secret")));
        assert!(!auth.authorize(Some(b"Secret")));
        assert!(!auth.authorize(Some(b"secret ")));
        assert!(!auth.authorize(Some(b"wrong")));
        assert!(!auth.authorize(None));
    }

    #[test]
    fn empty_password_still_requires_header() {
        let auth = Auth::new(Some(String::new()));
        assert!(auth.authorize(Some(b"")));
        assert!(!auth.authorize(None));
    }
}
