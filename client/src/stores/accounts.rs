//! Account and session store
//!
//! A device-local stand-in for a real account backend: registered
//! credentials live in one blob, the signed-in session in another.
//! Credentials are compared verbatim; this gates screens, it does not
//! authenticate anything.

use crate::config::ChatConfig;
use crate::error::{ClientError, ClientResult};
use crate::persist::{PersistHandle, SaveTicket};
use chrono::Utc;
use fittrack_shared::models::{Credentials, Role, Session};
use fittrack_shared::validation::{validate_email, validate_password};
use tracing::{debug, error, info};

/// Storage key for the registered-users blob
pub const USERS_KEY: &str = "users";
/// Storage key for the signed-in session blob
pub const SESSION_KEY: &str = "current_user";

/// The account store
#[derive(Debug)]
pub struct AccountStore {
    admin: ChatConfig,
    users: Vec<Credentials>,
    session: Option<Session>,
    persist: PersistHandle,
}

impl AccountStore {
    pub(crate) fn new(admin: ChatConfig, persist: PersistHandle) -> Self {
        Self::with_state(admin, Vec::new(), None, persist)
    }

    pub(crate) fn with_state(
        admin: ChatConfig,
        users: Vec<Credentials>,
        session: Option<Session>,
        persist: PersistHandle,
    ) -> Self {
        Self {
            admin,
            users,
            session,
            persist,
        }
    }

    /// Register a new account. Does not sign the user in.
    pub fn register(&mut self, email: &str, password: &str) -> ClientResult<SaveTicket> {
        let email = email.trim();
        validate_email(email).map_err(ClientError::Validation)?;
        validate_password(password).map_err(ClientError::Validation)?;

        if self.users.iter().any(|u| u.email == email) {
            return Err(ClientError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        self.users.push(Credentials {
            email: email.to_string(),
            password: password.to_string(),
        });
        info!(email = %email, "account registered");
        Ok(self.persist_users())
    }

    /// Sign in with a registered email and password
    pub fn login(&mut self, email: &str, password: &str) -> ClientResult<(Session, SaveTicket)> {
        let email = email.trim();
        let matched = self
            .users
            .iter()
            .any(|u| u.email == email && u.password == password);
        if !matched {
            return Err(ClientError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let session = Session {
            user_id: email.to_string(),
            role: Role::User,
            started_at: Utc::now(),
        };
        self.session = Some(session.clone());
        debug!(user = %email, "user signed in");
        Ok((session, self.persist_session()))
    }

    /// Sign in as the support admin with the configured credentials.
    ///
    /// The session identity is the admin chat id, so the messaging
    /// screens address conversations correctly.
    pub fn login_admin(
        &mut self,
        username: &str,
        password: &str,
    ) -> ClientResult<(Session, SaveTicket)> {
        if username != self.admin.admin_username || password != self.admin.admin_password {
            return Err(ClientError::Unauthorized("Invalid credentials".to_string()));
        }

        let session = Session {
            user_id: self.admin.admin_id.clone(),
            role: Role::Admin,
            started_at: Utc::now(),
        };
        self.session = Some(session.clone());
        info!("admin signed in");
        Ok((session, self.persist_session()))
    }

    /// The signed-in session, if any
    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Sign out. A no-op when nobody is signed in.
    pub fn logout(&mut self) -> Option<SaveTicket> {
        let session = self.session.take()?;
        debug!(user = %session.user_id, "signed out");
        Some(self.persist.delete(SESSION_KEY))
    }

    /// Whether an account exists for this email
    pub fn has_account(&self, email: &str) -> bool {
        let email = email.trim();
        self.users.iter().any(|u| u.email == email)
    }

    fn persist_users(&self) -> SaveTicket {
        match serde_json::to_string(&self.users) {
            Ok(payload) => self.persist.put(USERS_KEY, payload),
            Err(err) => {
                error!(error = %err, "failed to serialize user list");
                SaveTicket::failed(err.into())
            }
        }
    }

    fn persist_session(&self) -> SaveTicket {
        match serde_json::to_string(&self.session) {
            Ok(payload) => self.persist.put(SESSION_KEY, payload),
            Err(err) => {
                error!(error = %err, "failed to serialize session");
                SaveTicket::failed(err.into())
            }
        }
    }
}
