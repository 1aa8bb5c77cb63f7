//! Voter records stored inside a registrant's partition.
//!
//! Field names on the wire follow the registry's established JSON contract
//! (`Name`, `Ward_No`, `Votting_Boothe_Name`, ...), so existing front-ends
//! keep working. Every field is optional.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Raised when a record key is not a well-formed UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid voter ID format")]
pub struct VoterKeyError;

/// Opaque key of a voter record, unique within its partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoterId(Uuid);

impl VoterId {
    /// Generate a fresh key for an insert.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a key read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for VoterId {
    type Err = VoterKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|_| VoterKeyError)
    }
}

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoterValidationError {
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
}

/// Descriptive voter fields.
///
/// Used both for inserts and for partial updates: in an update only the
/// fields that are present (non-null) overwrite stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VoterFields {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "X")]
    pub name: Option<String>,
    #[serde(rename = "Constituency", default, skip_serializing_if = "Option::is_none")]
    pub constituency: Option<String>,
    #[serde(rename = "Ward_No", default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 7)]
    pub ward_no: Option<i32>,
    #[serde(rename = "Votting_Boothe_Name", default, skip_serializing_if = "Option::is_none")]
    pub polling_booth_name: Option<String>,
    #[serde(rename = "Epic_No", default, skip_serializing_if = "Option::is_none")]
    pub epic_no: Option<String>,
    #[serde(rename = "Middle_Name", default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(rename = "Gender", default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "age", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(rename = "English_Name", default, skip_serializing_if = "Option::is_none")]
    pub english_name: Option<String>,
    #[serde(rename = "Marathi_Name", default, skip_serializing_if = "Option::is_none")]
    pub marathi_name: Option<String>,
}

impl VoterFields {
    /// Reject values no voter can have.
    pub fn validate(&self) -> Result<(), VoterValidationError> {
        if self.ward_no.is_some_and(|n| n < 0) {
            return Err(VoterValidationError::Negative { field: "Ward_No" });
        }
        if self.age.is_some_and(|n| n < 0) {
            return Err(VoterValidationError::Negative { field: "age" });
        }
        Ok(())
    }

    /// True when no field is set; applying such a patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    ///
    /// # Examples
    /// ```
    /// use voter_registry::domain::VoterFields;
    ///
    /// let mut stored = VoterFields { name: Some("X".into()), ..Default::default() };
    /// stored.merge(VoterFields { ward_no: Some(7), ..Default::default() });
    /// assert_eq!(stored.name.as_deref(), Some("X"));
    /// assert_eq!(stored.ward_no, Some(7));
    /// ```
    pub fn merge(&mut self, patch: VoterFields) {
        let VoterFields {
            name,
            constituency,
            ward_no,
            polling_booth_name,
            epic_no,
            middle_name,
            gender,
            age,
            english_name,
            marathi_name,
        } = patch;
        overwrite(&mut self.name, name);
        overwrite(&mut self.constituency, constituency);
        overwrite(&mut self.ward_no, ward_no);
        overwrite(&mut self.polling_booth_name, polling_booth_name);
        overwrite(&mut self.epic_no, epic_no);
        overwrite(&mut self.middle_name, middle_name);
        overwrite(&mut self.gender, gender);
        overwrite(&mut self.age, age);
        overwrite(&mut self.english_name, english_name);
        overwrite(&mut self.marathi_name, marathi_name);
    }
}

fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// A stored voter record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VoterRecord {
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "6f1c2a7e-3b0d-4c59-9d8e-0c4b1a2f3e4d")]
    id: VoterId,
    #[serde(flatten)]
    fields: VoterFields,
}

impl VoterRecord {
    pub fn new(id: VoterId, fields: VoterFields) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> VoterId {
        self.id
    }

    pub fn fields(&self) -> &VoterFields {
        &self.fields
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: VoterFields) {
        self.fields.merge(patch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("not-an-id")]
    #[case("")]
    #[case("507f1f77bcf86cd799439011")]
    fn malformed_keys_are_rejected(#[case] raw: &str) {
        assert_eq!(raw.parse::<VoterId>(), Err(VoterKeyError));
    }

    #[rstest]
    fn record_uses_registry_field_names() {
        let id: VoterId = "6f1c2a7e-3b0d-4c59-9d8e-0c4b1a2f3e4d".parse().expect("key");
        let record = VoterRecord::new(
            id,
            VoterFields {
                name: Some("X".into()),
                ward_no: Some(7),
                polling_booth_name: Some("School No. 4".into()),
                age: Some(41),
                ..VoterFields::default()
            },
        );
        let value = serde_json::to_value(&record).expect("serialise");
        assert_eq!(
            value,
            json!({
                "_id": "6f1c2a7e-3b0d-4c59-9d8e-0c4b1a2f3e4d",
                "Name": "X",
                "Ward_No": 7,
                "Votting_Boothe_Name": "School No. 4",
                "age": 41,
            })
        );
    }

    #[rstest]
    fn null_fields_in_a_patch_leave_values_untouched() {
        let patch: VoterFields =
            serde_json::from_value(json!({ "Name": null, "Gender": "F" })).expect("patch");
        let mut stored = VoterFields {
            name: Some("X".into()),
            ..VoterFields::default()
        };
        stored.merge(patch);
        assert_eq!(stored.name.as_deref(), Some("X"));
        assert_eq!(stored.gender.as_deref(), Some("F"));
    }

    #[rstest]
    #[case(json!({ "Ward_No": -1 }), "Ward_No")]
    #[case(json!({ "age": -5 }), "age")]
    fn negative_numbers_are_rejected(#[case] payload: serde_json::Value, #[case] field: &str) {
        let fields: VoterFields = serde_json::from_value(payload).expect("fields");
        let err = fields.validate().expect_err("negative value");
        assert_eq!(err.to_string(), format!("{field} must not be negative"));
    }

    #[rstest]
    fn empty_patch_is_detected() {
        assert!(VoterFields::default().is_empty());
        assert!(!VoterFields {
            age: Some(1),
            ..VoterFields::default()
        }
        .is_empty());
    }
}
