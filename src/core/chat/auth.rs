//! Authentication collaborator seam.
//!
//! Credential storage and transport-level protection are external
//! concerns; the dialogue machine only needs a check, an existence probe
//! for signup, and registration.

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::{BinwatchError, Result};

pub trait Authenticator: Send + Sync {
    fn check(&self, username: &str, password: &str) -> bool;

    fn exists(&self, username: &str) -> bool;

    fn register(&self, username: &str, password: &str) -> Result<()>;
}

/// Process-local credential table. Nothing survives a restart; deployments
/// wanting durable accounts plug in their own `Authenticator`.
#[derive(Debug, Default)]
pub struct InMemoryAuthenticator {
    users: RwLock<HashMap<String, String>>,
}

impl InMemoryAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed accounts, mainly for local operation and tests.
    pub fn with_users<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let map = users
            .into_iter()
            .map(|(u, p)| (u.into(), p.into()))
            .collect();
        Self {
            users: RwLock::new(map),
        }
    }
}

impl Authenticator for InMemoryAuthenticator {
    fn check(&self, username: &str, password: &str) -> bool {
        self.users
            .read()
            .get(username)
            .is_some_and(|stored| stored == password)
    }

    fn exists(&self, username: &str) -> bool {
        self.users.read().contains_key(username)
    }

    fn register(&self, username: &str, password: &str) -> Result<()> {
        let mut users = self.users.write();
        if users.contains_key(username) {
            return Err(BinwatchError::auth(format!(
                "username {} already taken",
                username
            )));
        }
        users.insert(username.to_string(), password.to_string());
        Ok(())
    }
}
