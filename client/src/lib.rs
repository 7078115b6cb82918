//! FitTrack Client Core
//!
//! The data layer behind the FitTrack app screens: support chat,
//! daily calorie, step, and water tracking, profile and account state.
//! Everything lives in memory and is snapshotted to a key-value
//! storage backend as whole JSON blobs by a background writer.

pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod persist;
pub mod state;
pub mod stores;

// Re-export the types an embedding app touches directly
pub use config::AppConfig;
pub use error::{ClientError, ClientResult};
pub use export::{DataExport, ExportService};
pub use persist::{FileStore, KeyValueStore, MemoryStore, SaveTicket, StorageError};
pub use state::AppState;
pub use stores::{AccountStore, ConversationSummary, FitnessLedger, MessageStore, ProfileStore};
