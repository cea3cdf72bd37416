//! sea-orm entities for the gatekey durable tables.

pub mod auth_tokens;
pub mod users;
