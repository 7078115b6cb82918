//! In-memory stores behind the app screens
//!
//! Each store owns one slice of app state, validates and applies
//! mutations, and enqueues the updated blob with the background writer.

pub mod accounts;
pub mod fitness;
pub mod messages;
pub mod profile;

pub use accounts::AccountStore;
pub use fitness::FitnessLedger;
pub use messages::{ConversationSummary, MessageStore};
pub use profile::ProfileStore;
