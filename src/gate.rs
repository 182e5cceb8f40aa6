use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::SecretsError;

// ---------------------------------------------------------------------------
// Credentials – the read-only secrets store
// ---------------------------------------------------------------------------

/// Username → password mapping, read from a JSON secrets file:
///
/// ```json
/// { "passwords": { "alice": "secret1" } }
/// ```
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    passwords: HashMap<String, String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut users: Vec<&str> = self.passwords.keys().map(String::as_str).collect();
        users.sort_unstable();
        f.debug_struct("Credentials").field("users", &users).finish()
    }
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Self, SecretsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SecretsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| SecretsError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn from_pairs<I, U, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        Credentials {
            passwords: pairs
                .into_iter()
                .map(|(u, p)| (u.into(), p.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }

    /// True when `username` is known and `password` matches its secret.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.passwords
            .get(username)
            .is_some_and(|expected| secrets_match(password, expected))
    }
}

/// Compare SHA-256 digests in constant time, so timing reveals neither the
/// content nor the length of the stored secret.
fn secrets_match(given: &str, expected: &str) -> bool {
    let given = Sha256::digest(given.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    given.as_slice().ct_eq(expected.as_slice()).into()
}

// ---------------------------------------------------------------------------
// Login form
// ---------------------------------------------------------------------------

/// What the user typed. Lives only inside `GateState::AwaitingSubmission`.
#[derive(Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Gate state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum GateState {
    /// No form shown yet, or the last attempt failed.
    Unauthenticated { failed: bool },
    /// Form on screen. `failed` carries the previous attempt's result so the
    /// error stays visible next to the form.
    AwaitingSubmission { form: LoginForm, failed: bool },
    /// Terminal for the session.
    Authenticated { username: String },
}

impl Default for GateState {
    fn default() -> Self {
        GateState::Unauthenticated { failed: false }
    }
}

/// Username/password check in front of the dashboard.
#[derive(Debug)]
pub struct AccessGate {
    credentials: Credentials,
    state: GateState,
}

impl AccessGate {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            state: GateState::default(),
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, GateState::Authenticated { .. })
    }

    /// Whether the last submission was rejected.
    pub fn failed(&self) -> bool {
        match self.state {
            GateState::Unauthenticated { failed } | GateState::AwaitingSubmission { failed, .. } => {
                failed
            }
            GateState::Authenticated { .. } => false,
        }
    }

    /// Unauthenticated → AwaitingSubmission. No-op in other states.
    pub fn open_form(&mut self) {
        if let GateState::Unauthenticated { failed } = self.state {
            self.state = GateState::AwaitingSubmission {
                form: LoginForm::default(),
                failed,
            };
        }
    }

    /// The form being edited, if one is on screen.
    pub fn form_mut(&mut self) -> Option<&mut LoginForm> {
        match &mut self.state {
            GateState::AwaitingSubmission { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Check the form on screen. The submitted form is dropped either way.
    /// Returns whether the gate is now open.
    pub fn submit(&mut self) -> bool {
        let state = std::mem::take(&mut self.state);
        self.state = match state {
            GateState::AwaitingSubmission { form, .. } => {
                if self.credentials.verify(&form.username, &form.password) {
                    log::info!("User '{}' logged in", form.username);
                    GateState::Authenticated {
                        username: form.username,
                    }
                } else {
                    log::warn!("Rejected login for '{}'", form.username);
                    GateState::Unauthenticated { failed: true }
                }
            }
            other => other,
        };
        self.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AccessGate {
        AccessGate::new(Credentials::from_pairs([("alice", "secret1")]))
    }

    fn attempt(gate: &mut AccessGate, username: &str, password: &str) -> bool {
        gate.open_form();
        let form = gate.form_mut().expect("form should be open");
        form.username = username.to_string();
        form.password = password.to_string();
        gate.submit()
    }

    #[test]
    fn correct_password_authenticates() {
        let mut gate = gate();
        assert!(attempt(&mut gate, "alice", "secret1"));
        assert!(matches!(gate.state(), GateState::Authenticated { username } if username == "alice"));
        assert!(!gate.failed());
        assert!(gate.form_mut().is_none());
    }

    #[test]
    fn wrong_password_or_unknown_user_fails() {
        for (user, pass) in [("alice", "wrong"), ("bob", "secret1"), ("alice", ""), ("", "")] {
            let mut gate = gate();
            assert!(!attempt(&mut gate, user, pass));
            assert!(matches!(gate.state(), GateState::Unauthenticated { failed: true }));
            assert!(gate.failed());
        }
    }

    #[test]
    fn retry_after_failure_keeps_error_until_success() {
        let mut gate = gate();
        assert!(!attempt(&mut gate, "alice", "nope"));

        gate.open_form();
        assert!(matches!(gate.state(), GateState::AwaitingSubmission { failed: true, .. }));

        let form = gate.form_mut().unwrap();
        form.username = "alice".into();
        form.password = "secret1".into();
        assert!(gate.submit());
        assert!(!gate.failed());
    }

    #[test]
    fn authenticated_is_terminal() {
        let mut gate = gate();
        assert!(attempt(&mut gate, "alice", "secret1"));
        gate.open_form();
        assert!(gate.form_mut().is_none());
        assert!(gate.submit());
    }

    #[test]
    fn submit_without_form_is_rejected_silently() {
        let mut gate = gate();
        assert!(!gate.submit());
        assert!(matches!(gate.state(), GateState::Unauthenticated { failed: false }));
    }

    #[test]
    fn secrets_file_shape() {
        let creds = Credentials::from_json(r#"{"passwords": {"alice": "secret1", "bob": "pw"}}"#).unwrap();
        assert_eq!(creds.len(), 2);
        assert!(creds.verify("bob", "pw"));
        assert!(!creds.verify("bob", "pw "));
        assert!(Credentials::from_json("{}").unwrap().is_empty());
        assert!(Credentials::from_json(r#"{"passwords": ["alice"]}"#).is_err());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let creds = Credentials::from_pairs([("alice", "secret1")]);
        assert!(!format!("{creds:?}").contains("secret1"));
        let form = LoginForm {
            username: "alice".into(),
            password: "secret1".into(),
        };
        assert!(!format!("{form:?}").contains("secret1"));
    }
}
