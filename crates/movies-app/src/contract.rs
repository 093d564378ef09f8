use garde::Validate;
use movies_dal::movie::{CreateMovie, Movie};
use serde::{Deserialize, Serialize};
use time::{format_description::BorrowedFormatItem, macros::format_description};

pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Values modified before validation
pub trait Normalize {
    fn normalize(&mut self) {}
}

/// Body of create and update requests, missing fields are empty/zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MovieRequest {
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(length(max = 5000))]
    pub description: String,
    #[garde(custom(non_zero_rating))]
    pub rating: f32,
    #[garde(length(max = 1023))]
    pub image: String,
}

fn non_zero_rating(value: &f32, _ctx: &()) -> garde::Result {
    if !value.is_finite() {
        Err(garde::Error::new("must be a number"))
    } else if *value == 0.0 {
        Err(garde::Error::new("is required"))
    } else {
        Ok(())
    }
}

impl Normalize for MovieRequest {
    fn normalize(&mut self) {
        self.title = self.title.to_lowercase();
    }
}

impl From<MovieRequest> for CreateMovie {
    fn from(value: MovieRequest) -> Self {
        CreateMovie {
            title: value.title,
            description: value.description,
            rating: value.rating,
            image: value.image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub rating: f32,
    pub image: String,
    pub created_at: String,
    pub updated_at: String,
}

pub fn format_timestamp(ts: time::PrimitiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).unwrap_or_default()
}

impl From<Movie> for MovieResponse {
    fn from(value: Movie) -> Self {
        MovieResponse {
            id: value.id,
            title: value.title,
            description: value.description,
            rating: value.rating,
            image: value.image,
            created_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub total_page: i64,
    pub total_data: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total_data: i64) -> Self {
        let total_page = if limit > 0 {
            (total_data + limit - 1) / limit
        } else {
            0
        };
        Pagination {
            page,
            total_page,
            total_data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetListResponse {
    pub data: Vec<MovieResponse>,
    pub pagination: Pagination,
}
