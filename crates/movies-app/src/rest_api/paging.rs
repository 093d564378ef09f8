use garde::Validate;
use movies_dal::{ListParams, MAX_LIMIT};
use serde::Deserialize;

use crate::{
    contract::Normalize,
    error::{ApiError, ApiResult},
};

/// Query string of list requests, numbers are parsed after extraction so
/// that empty values fall back to defaults
#[derive(Debug, Clone, Default, Validate, Deserialize)]
#[garde(allow_unvalidated)]
pub struct ListQuery {
    page: Option<String>,
    limit: Option<String>,
    #[garde(length(max = 255))]
    keyword: Option<String>,
}

impl Normalize for ListQuery {}

fn parse_number(name: &str, value: Option<&str>, default: i64) -> ApiResult<i64> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("{name} must be a number"))),
    }
}

impl ListQuery {
    pub fn into_list_params(self, default_limit: i64) -> ApiResult<ListParams> {
        let page = parse_number("page", self.page.as_deref(), 1)?;
        let limit = parse_number("limit", self.limit.as_deref(), default_limit)?;
        if page < 1 {
            return Err(ApiError::BadRequest("page must be at least 1".to_string()));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ApiError::BadRequest(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        Ok(ListParams::new(page, limit, self.keyword.unwrap_or_default()))
    }
}
