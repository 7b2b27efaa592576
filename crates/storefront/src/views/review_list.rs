//! Read-only list of a product's reviews

use crate::format;
use techhub_http::types::Review;

pub const EMPTY_MESSAGE: &str = "Пока нет отзывов. Будьте первым!";

/// One rendered review
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    pub id: i64,
    pub initial: String,
    pub username: String,
    pub date: String,
    pub rating: u8,
    pub comment: String,
}

impl From<&Review> for ReviewRow {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            initial: format::initial(&review.user.username).unwrap_or_default(),
            username: review.user.username.clone(),
            date: format::review_date(&review.created_at),
            rating: review.rating,
            comment: review.comment.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReviewList<'a> {
    reviews: &'a [Review],
}

impl<'a> ReviewList<'a> {
    pub fn new(reviews: &'a [Review]) -> Self {
        Self { reviews }
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// `Отзывы (n)`, or the invitation to write the first review
    pub fn heading(&self) -> String {
        if self.is_empty() {
            EMPTY_MESSAGE.to_string()
        } else {
            format!("Отзывы ({})", self.reviews.len())
        }
    }

    pub fn rows(&self) -> Vec<ReviewRow> {
        self.reviews.iter().map(ReviewRow::from).collect()
    }
}
