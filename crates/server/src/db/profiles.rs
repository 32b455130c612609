//! Profile repository.

use mongodb::bson::doc;
use parts_core::{DocumentId, Email, Role};

use super::{
    Collection, DocumentStore, StoreError, UpdateOutcome, decode, decode_all, encode, id_filter,
};
use crate::models::{Profile, ProfileUpdate};

/// Repository for the `profiles` collection.
///
/// Profiles are keyed by email. Every call goes to the store; roles are never
/// cached.
pub struct ProfileRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// The first profile stored under `email`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or the document is malformed.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Profile>, StoreError> {
        self.store
            .find_one(Collection::Profiles, doc! { "email": email.as_str() })
            .await?
            .map(decode)
            .transpose()
    }

    /// All profiles, unpaginated.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or a document is malformed.
    pub async fn list(&self) -> Result<Vec<Profile>, StoreError> {
        let docs = self.store.find(Collection::Profiles, doc! {}).await?;
        decode_all(docs)
    }

    /// Write the fields present in `update`, creating the profile if needed.
    ///
    /// Fields absent from `update` keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the update fails.
    pub async fn upsert_by_email(
        &self,
        email: &Email,
        update: &ProfileUpdate,
    ) -> Result<UpdateOutcome, StoreError> {
        self.store
            .update_one(
                Collection::Profiles,
                doc! { "email": email.as_str() },
                encode(update)?,
                true,
            )
            .await
    }

    /// Grant the admin role to the profile with the given id.
    ///
    /// Upserts, so an unknown id creates a bare profile holding only the role.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the update fails.
    pub async fn make_admin(&self, id: &DocumentId) -> Result<UpdateOutcome, StoreError> {
        self.store
            .update_one(
                Collection::Profiles,
                id_filter(id)?,
                doc! { "role": Role::Admin.as_str() },
                true,
            )
            .await
    }

    /// Whether the profile stored under `email` has the admin role.
    ///
    /// Only the stored `role` is read, so other fields never fail the check.
    /// A missing profile or a non-string role is not an admin.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn is_admin(&self, email: &Email) -> Result<bool, StoreError> {
        Ok(self
            .store
            .find_one(Collection::Profiles, doc! { "email": email.as_str() })
            .await?
            .is_some_and(|profile| {
                profile
                    .get_str("role")
                    .is_ok_and(|role| Role::from(role.to_owned()).is_admin())
            }))
    }
}
