//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly.

diesel::table! {
    /// Registrant directory: one row per API key holder.
    registrant (id) {
        /// Serial primary key.
        id -> Int4,
        /// Display name shown in resolved records.
        #[sql_name = "registrant"]
        name -> Text,
        /// Opaque credential, unique across registrants.
        api_key -> Uuid,
    }
}

diesel::table! {
    /// Identifier store: one row per issued ASKE-ID.
    object (id) {
        /// The ASKE-ID itself.
        id -> Uuid,
        /// Owning registrant.
        registrant_id -> Int4,
        /// Bound location; NULL while only reserved.
        location -> Nullable<Text>,
        /// Optional description.
        description -> Nullable<Text>,
    }
}

diesel::joinable!(object -> registrant (registrant_id));
diesel::allow_tables_to_appear_in_same_query!(object, registrant);
