//! Application state wiring
//!
//! [`AppState`] hydrates every store from the storage backend at launch,
//! hands each one a queue into the shared background writer, and drains
//! that queue again on shutdown. A blob that is missing or fails to
//! parse costs only its own store, which starts fresh; the others load
//! normally.

use crate::config::AppConfig;
use crate::export::{DataExport, ExportService};
use crate::persist::{KeyValueStore, Persister, SaveTicket};
use crate::stores::accounts::{SESSION_KEY, USERS_KEY};
use crate::stores::fitness::STORAGE_KEY as FITNESS_KEY;
use crate::stores::messages::STORAGE_KEY as MESSAGES_KEY;
use crate::stores::profile::STORAGE_KEY as PROFILE_KEY;
use crate::stores::{AccountStore, FitnessLedger, MessageStore, ProfileStore};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{info, warn};

/// Every store plus the writer that persists them
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub messages: MessageStore,
    pub fitness: FitnessLedger,
    pub profile: ProfileStore,
    pub accounts: AccountStore,
    persister: Persister,
}

impl AppState {
    /// Load every blob from the backend and wire the stores up.
    ///
    /// Never fails: unreadable state is logged and replaced with fresh
    /// defaults so the app always launches.
    pub async fn init(store: Arc<dyn KeyValueStore>, config: AppConfig) -> Self {
        let persister = Persister::spawn(Arc::clone(&store));
        let persist = persister.handle();

        let messages = match load_blob(store.as_ref(), MESSAGES_KEY).await {
            Some(log) => MessageStore::with_log(config.chat.admin_id.clone(), log, persist.clone()),
            None => MessageStore::new(config.chat.admin_id.clone(), persist.clone()),
        };
        let fitness = match load_blob(store.as_ref(), FITNESS_KEY).await {
            Some(profile) => FitnessLedger::with_profile(profile, persist.clone()),
            None => FitnessLedger::new(&config.goals, persist.clone()),
        };
        let profile = match load_blob(store.as_ref(), PROFILE_KEY).await {
            Some(card) => ProfileStore::with_profile(card, persist.clone()),
            None => ProfileStore::new(persist.clone()),
        };
        let users = load_blob(store.as_ref(), USERS_KEY).await.unwrap_or_default();
        let session = load_blob(store.as_ref(), SESSION_KEY).await;
        let accounts = AccountStore::with_state(config.chat.clone(), users, session, persist);

        info!(
            messages = messages.len(),
            signed_in = accounts.current().is_some(),
            "app state loaded"
        );

        Self {
            config,
            messages,
            fitness,
            profile,
            accounts,
            persister,
        }
    }

    /// Snapshot the data stores into one export document
    pub fn export(&self) -> DataExport {
        ExportService::export(&self.messages, &self.fitness, &self.profile)
    }

    /// Replace the data stores with an imported snapshot.
    ///
    /// Accounts and the signed-in session are deliberately left alone;
    /// an import restores content, not identity.
    pub fn import(&mut self, export: DataExport) -> Vec<SaveTicket> {
        vec![
            self.messages.restore(export.messages),
            self.fitness.restore(export.fitness),
            self.profile.restore(export.profile),
        ]
    }

    /// Flush pending writes and stop the background writer.
    ///
    /// The stores drop first so their queue handles close, then the
    /// writer drains whatever is still enqueued.
    pub async fn shutdown(self) {
        let Self {
            config: _,
            messages,
            fitness,
            profile,
            accounts,
            persister,
        } = self;
        drop(messages);
        drop(fitness);
        drop(profile);
        drop(accounts);
        persister.shutdown().await;
    }
}

/// Read and parse one blob, treating every failure as a fresh start
async fn load_blob<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key).await {
        Ok(raw) => raw?,
        Err(err) => {
            warn!(key = %key, error = %err, "could not read stored data, starting fresh");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key = %key, error = %err, "stored data is corrupt, starting fresh");
            None
        }
    }
}
