//! Cache keys for movie queries

use crate::{ListParams, error::Result};

const PREFIX: &str = "movie:movies";

/// Matches every key produced in this module
pub const INVALIDATION_PATTERN: &str = "movie:movies:*";

pub fn detail(id: i64) -> String {
    format!("{PREFIX}:getdetail:{id}")
}

pub fn list(params: &ListParams) -> Result<String> {
    Ok(format!("{PREFIX}:getlist:{}", canonical(params)?))
}

pub fn count(params: &ListParams) -> Result<String> {
    Ok(format!("{PREFIX}:getcount:{}", canonical(params)?))
}

fn canonical(params: &ListParams) -> Result<String> {
    Ok(serde_json::to_string(params)?)
}
