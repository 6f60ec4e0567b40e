use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::BookWithCovers;
use crate::covers::dto::CoverDto;

// BookWithCoversDto is the response shape of a single book lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookWithCoversDto {
    pub book: BookDto,
    pub page_count: Option<i64>,
    pub covers: Vec<CoverDto>,
}

impl From<&BookWithCovers> for BookWithCoversDto {
    fn from(other: &BookWithCovers) -> Self {
        Self {
            book: other.book.clone(),
            page_count: other.page_count,
            covers: other.covers.iter().map(CoverDto::from).collect(),
        }
    }
}
