//! Diesel table definitions for the registry schema.
//!
//! These must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Signed-up registrants. `identity` is the login username.
    registrants (identity) {
        identity -> Varchar,
        /// Argon2id PHC string.
        secret_hash -> Text,
        role -> Varchar,
        constituency -> Text,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Provisioned voter partitions, one per owning registrant.
    voter_partitions (name) {
        name -> Text,
        owner -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Voter records. Every row belongs to exactly one partition.
    voters (id) {
        id -> Uuid,
        partition_name -> Text,
        /// Insertion order within the table; listings sort on it.
        seq -> Int8,
        name -> Nullable<Text>,
        constituency -> Nullable<Text>,
        ward_no -> Nullable<Int4>,
        polling_booth_name -> Nullable<Text>,
        epic_no -> Nullable<Text>,
        middle_name -> Nullable<Text>,
        gender -> Nullable<Text>,
        age -> Nullable<Int4>,
        english_name -> Nullable<Text>,
        marathi_name -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(voter_partitions -> registrants (owner));
diesel::joinable!(voters -> voter_partitions (partition_name));

diesel::allow_tables_to_appear_in_same_query!(registrants, voter_partitions, voters);
