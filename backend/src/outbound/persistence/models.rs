//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; repositories convert them
//! to and from domain values.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Constituency, Identity, Registrant, RegistrantValidationError, SecretHash, VoterFields,
    VoterId, VoterRecord,
};

use super::schema::{registrants, voter_partitions, voters};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = registrants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RegistrantRow {
    pub identity: String,
    pub secret_hash: String,
    pub role: String,
    pub constituency: String,
    pub status: String,
}

impl RegistrantRow {
    /// Rebuild the domain registrant, re-validating every column.
    pub fn into_domain(self) -> Result<Registrant, RegistrantValidationError> {
        Ok(Registrant::from_parts(
            Identity::new(self.identity)?,
            SecretHash::from_phc(self.secret_hash),
            self.role.parse()?,
            Constituency::new(self.constituency)?,
            self.status.parse()?,
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = registrants)]
pub(crate) struct NewRegistrantRow<'a> {
    pub identity: &'a str,
    pub secret_hash: &'a str,
    pub role: &'a str,
    pub constituency: &'a str,
    pub status: &'a str,
}

impl<'a> From<&'a Registrant> for NewRegistrantRow<'a> {
    fn from(value: &'a Registrant) -> Self {
        Self {
            identity: value.identity().as_ref(),
            secret_hash: value.secret().as_phc(),
            role: value.role().as_str(),
            constituency: value.constituency().as_ref(),
            status: value.status().as_str(),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = voter_partitions)]
pub(crate) struct NewPartitionRow<'a> {
    pub name: &'a str,
    pub owner: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = voters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VoterRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub constituency: Option<String>,
    pub ward_no: Option<i32>,
    pub polling_booth_name: Option<String>,
    pub epic_no: Option<String>,
    pub middle_name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub english_name: Option<String>,
    pub marathi_name: Option<String>,
}

impl From<VoterRow> for VoterRecord {
    fn from(row: VoterRow) -> Self {
        VoterRecord::new(
            VoterId::from_uuid(row.id),
            VoterFields {
                name: row.name,
                constituency: row.constituency,
                ward_no: row.ward_no,
                polling_booth_name: row.polling_booth_name,
                epic_no: row.epic_no,
                middle_name: row.middle_name,
                gender: row.gender,
                age: row.age,
                english_name: row.english_name,
                marathi_name: row.marathi_name,
            },
        )
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = voters)]
pub(crate) struct NewVoterRow<'a> {
    pub id: Uuid,
    pub partition_name: &'a str,
    #[diesel(embed)]
    pub fields: VoterChangeset<'a>,
}

/// Column values taken from [`VoterFields`].
///
/// As a changeset, `None` columns are left untouched, which gives partial
/// updates their overwrite-present-fields semantics.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = voters)]
pub(crate) struct VoterChangeset<'a> {
    pub name: Option<&'a str>,
    pub constituency: Option<&'a str>,
    pub ward_no: Option<i32>,
    pub polling_booth_name: Option<&'a str>,
    pub epic_no: Option<&'a str>,
    pub middle_name: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub age: Option<i32>,
    pub english_name: Option<&'a str>,
    pub marathi_name: Option<&'a str>,
}

impl<'a> From<&'a VoterFields> for VoterChangeset<'a> {
    fn from(value: &'a VoterFields) -> Self {
        Self {
            name: value.name.as_deref(),
            constituency: value.constituency.as_deref(),
            ward_no: value.ward_no,
            polling_booth_name: value.polling_booth_name.as_deref(),
            epic_no: value.epic_no.as_deref(),
            middle_name: value.middle_name.as_deref(),
            gender: value.gender.as_deref(),
            age: value.age,
            english_name: value.english_name.as_deref(),
            marathi_name: value.marathi_name.as_deref(),
        }
    }
}
