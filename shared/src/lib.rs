//! FitTrack Shared Library
//!
//! Domain types and input validation shared across the FitTrack client
//! crates. Pure data and rules only; persistence and store logic live
//! in the client crate.

pub mod models;
pub mod units;
pub mod validation;

// Export units module items (canonical source for unit types)
pub use units::{VolumeUnit, ML_PER_OZ};

// Re-export commonly used models
pub use models::{
    Credentials, Diary, DiaryEntry, DiarySection, FitnessProfile, Message, Profile, Role, Session,
    WaterEntry,
};
