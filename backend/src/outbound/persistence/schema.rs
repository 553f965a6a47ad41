//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly.

diesel::table! {
    /// Users keyed by email; `role` is `user` or `admin`.
    users (id) {
        id -> Uuid,
        external_id -> Varchar,
        display_name -> Varchar,
        email -> Varchar,
        picture -> Nullable<Text>,
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Payment-intent orders. `amount` is in major currency units.
    orders (id) {
        id -> Uuid,
        order_id -> Varchar,
        user_email -> Varchar,
        project_name -> Varchar,
        amount -> Float8,
        status -> Varchar,
        payment_id -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    contacts (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        phone -> Nullable<Varchar>,
        service -> Nullable<Varchar>,
        message -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    maintenance_requests (id) {
        id -> Uuid,
        user_email -> Varchar,
        issue_type -> Varchar,
        description -> Text,
        addons -> Text,
        estimated_cost -> Float8,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, orders, contacts, maintenance_requests);
