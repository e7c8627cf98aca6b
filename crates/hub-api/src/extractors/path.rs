//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use hub_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

/// `/resources/:id` style paths
#[derive(Debug, Deserialize)]
pub struct ResourceIdPath {
    pub id: String,
}

impl ResourceIdPath {
    /// Parse id as Snowflake
    pub fn id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.id)
    }
}

/// `/admin/users/:id` style paths
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub id: String,
}

impl UserIdPath {
    /// Parse id as Snowflake
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.id)
    }
}

fn parse_id(raw: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid id format"))
}
