//! User profile store
//!
//! The editable contact card: name and email are required, everything
//! else is optional free-form text the way the user typed it.

use crate::error::{ClientError, ClientResult};
use crate::persist::{PersistHandle, SaveTicket};
use fittrack_shared::models::Profile;
use fittrack_shared::validation::{validate_age, validate_email, validate_profile_name};
use tracing::{debug, error};

/// Storage key for the serialized profile
pub const STORAGE_KEY: &str = "user_profile";

/// The profile store
#[derive(Debug)]
pub struct ProfileStore {
    profile: Profile,
    persist: PersistHandle,
}

impl ProfileStore {
    pub(crate) fn new(persist: PersistHandle) -> Self {
        Self::with_profile(Profile::default(), persist)
    }

    pub(crate) fn with_profile(profile: Profile, persist: PersistHandle) -> Self {
        Self { profile, persist }
    }

    /// The current profile
    pub fn get(&self) -> &Profile {
        &self.profile
    }

    /// Validate and replace the profile
    pub fn update(&mut self, mut profile: Profile) -> ClientResult<SaveTicket> {
        profile.name = profile.name.trim().to_string();
        profile.email = profile.email.trim().to_string();

        validate_profile_name(&profile.name).map_err(ClientError::Validation)?;
        validate_email(&profile.email).map_err(ClientError::Validation)?;
        if let Some(age) = profile.age {
            validate_age(age).map_err(ClientError::Validation)?;
        }

        debug!(name = %profile.name, "profile updated");
        self.profile = profile;
        Ok(self.persist_profile())
    }

    /// Reset to the empty profile
    pub fn clear(&mut self) -> SaveTicket {
        self.profile = Profile::default();
        self.persist_profile()
    }

    /// Replace without validation, e.g. from an imported snapshot
    pub fn restore(&mut self, profile: Profile) -> SaveTicket {
        self.profile = profile;
        self.persist_profile()
    }

    fn persist_profile(&self) -> SaveTicket {
        match serde_json::to_string(&self.profile) {
            Ok(payload) => self.persist.put(STORAGE_KEY, payload),
            Err(err) => {
                error!(error = %err, "failed to serialize profile");
                SaveTicket::failed(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            name: "Jordan Lee".to_string(),
            email: "jordan@example.com".to_string(),
            age: Some(29),
            phone: Some("555-0100".to_string()),
            height: Some("175 cm".to_string()),
            weight: Some("70 kg".to_string()),
        }
    }

    #[test]
    fn test_update_stores_valid_profile() {
        let (persist, _rx) = PersistHandle::detached();
        let mut store = ProfileStore::new(persist);

        store.update(sample_profile()).unwrap();
        assert_eq!(store.get().name, "Jordan Lee");
        assert_eq!(store.get().age, Some(29));
    }

    #[test]
    fn test_update_trims_name_and_email() {
        let (persist, _rx) = PersistHandle::detached();
        let mut store = ProfileStore::new(persist);

        let mut profile = sample_profile();
        profile.name = "  Jordan Lee  ".to_string();
        profile.email = " jordan@example.com ".to_string();
        store.update(profile).unwrap();

        assert_eq!(store.get().name, "Jordan Lee");
        assert_eq!(store.get().email, "jordan@example.com");
    }

    #[test]
    fn test_update_requires_name() {
        let (persist, _rx) = PersistHandle::detached();
        let mut store = ProfileStore::new(persist);

        let mut profile = sample_profile();
        profile.name = "   ".to_string();
        assert!(store.update(profile).is_err());
        assert_eq!(store.get().name, "");
    }

    #[test]
    fn test_update_requires_valid_email() {
        let (persist, _rx) = PersistHandle::detached();
        let mut store = ProfileStore::new(persist);

        let mut profile = sample_profile();
        profile.email = "not-an-email".to_string();
        assert!(store.update(profile).is_err());
    }

    #[test]
    fn test_update_rejects_zero_age_but_allows_none() {
        let (persist, _rx) = PersistHandle::detached();
        let mut store = ProfileStore::new(persist);

        let mut profile = sample_profile();
        profile.age = Some(0);
        assert!(store.update(profile).is_err());

        let mut profile = sample_profile();
        profile.age = None;
        assert!(store.update(profile).is_ok());
    }

    #[test]
    fn test_clear_resets_profile() {
        let (persist, _rx) = PersistHandle::detached();
        let mut store = ProfileStore::new(persist);

        store.update(sample_profile()).unwrap();
        store.clear();
        assert_eq!(store.get(), &Profile::default());
    }
}
