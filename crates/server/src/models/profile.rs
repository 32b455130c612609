//! User profiles.

use parts_core::{Email, Role};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// A profile as stored in the `profiles` collection.
///
/// `email` is the lookup key. The store does not enforce uniqueness, so
/// lookups return the first match. Other writers may store numbers or
/// booleans in text fields; those are read back as text, and a `role` that
/// is not a string is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "loose_role", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// A stored value read where text is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Other(IgnoredAny),
}

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(text)) => Some(text),
        Some(Loose::Int(n)) => Some(n.to_string()),
        Some(Loose::Float(n)) => Some(n.to_string()),
        Some(Loose::Bool(b)) => Some(b.to_string()),
        Some(Loose::Other(IgnoredAny)) | None => None,
    })
}

fn loose_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(role)) => Some(Role::from(role)),
        _ => None,
    })
}

/// Body of `PUT /updateprofile/{email}`.
///
/// Only the fields present are written; `email` comes from the path and
/// `role` can only be changed through `PUT /makeadmin/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl ProfileUpdate {
    /// Returns `true` if the update carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Identity presented to `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    pub email: Email,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_reads_loose_fields() {
        let profile: Profile = serde_json::from_str(
            r#"{"_id":"x","email":"a@b.com","phone":5550100,"linkedin":null,"role":"admin"}"#,
        )
        .unwrap();
        assert_eq!(profile.phone.as_deref(), Some("5550100"));
        assert_eq!(profile.linkedin, None);
        assert_eq!(profile.role, Some(Role::Admin));

        let profile: Profile =
            serde_json::from_str(r#"{"_id":"x","name":true,"location":1.5,"role":true}"#).unwrap();
        assert_eq!(profile.name.as_deref(), Some("true"));
        assert_eq!(profile.location.as_deref(), Some("1.5"));
        assert_eq!(profile.role, None);
    }

    #[test]
    fn test_profile_drops_nested_values() {
        let profile: Profile =
            serde_json::from_str(r#"{"_id":"x","photo":{"url":"p.png"},"role":["admin"]}"#)
                .unwrap();
        assert_eq!(profile.photo, None);
        assert_eq!(profile.role, None);
        assert!(serde_json::to_value(&profile).unwrap().get("role").is_none());
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update: ProfileUpdate = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Ada" }));
    }

    #[test]
    fn test_update_ignores_role_and_email() {
        let update: ProfileUpdate =
            serde_json::from_str(r#"{"role":"admin","email":"x@y.z"}"#).unwrap();
        assert!(update.is_empty());
    }
}
