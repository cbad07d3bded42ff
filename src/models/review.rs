// src/models/review.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Star rating, always within `Rating::MIN..=Rating::MAX`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Rating)
            .ok_or(ValidationError::RatingOutOfRange(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// One flag per star position, `true` where the star is filled.
    pub fn stars(self) -> [bool; 5] {
        std::array::from_fn(|i| i < usize::from(self.0))
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating(Self::MAX)
    }
}

impl TryFrom<i64> for Rating {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn visible_by_default() -> bool {
    true
}

/// A review as the admin listing sees it. The public representation has no
/// `is_visible`, so a missing flag deserializes as visible.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: String,
    pub nickname: String,
    pub rating: Rating,
    pub text: String,
    pub date: NaiveDate,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
}

impl Review {
    /// Avatar letter: the first character of the nickname, uppercased.
    pub fn initial(&self) -> String {
        self.nickname
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// Public-facing form of a review, without the moderation flag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicReview {
    pub id: String,
    pub nickname: String,
    pub rating: Rating,
    pub text: String,
    pub date: NaiveDate,
}

impl From<Review> for PublicReview {
    fn from(review: Review) -> Self {
        PublicReview {
            id: review.id,
            nickname: review.nickname,
            rating: review.rating,
            text: review.text,
            date: review.date,
        }
    }
}

impl From<PublicReview> for Review {
    fn from(review: PublicReview) -> Self {
        Review {
            id: review.id,
            nickname: review.nickname,
            rating: review.rating,
            text: review.text,
            date: review.date,
            is_visible: true,
        }
    }
}

/// Contents of the submission form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewDraft {
    pub nickname: String,
    pub rating: Rating,
    pub text: String,
}

impl ReviewDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.nickname.trim().is_empty() {
            return Err(ValidationError::EmptyNickname);
        }
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(())
    }

    /// Validated copy with surrounding whitespace removed.
    pub fn normalized(&self) -> Result<ReviewDraft, ValidationError> {
        self.validate()?;
        Ok(ReviewDraft {
            nickname: self.nickname.trim().to_string(),
            rating: self.rating,
            text: self.text.trim().to_string(),
        })
    }

    pub fn into_review(self, id: String, date: NaiveDate) -> Review {
        Review {
            id,
            nickname: self.nickname,
            rating: self.rating,
            text: self.text,
            date,
            is_visible: true,
        }
    }
}

/// Moderation counters derived from a loaded listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewStats {
    pub total: usize,
    pub visible: usize,
    pub hidden: usize,
}

impl ReviewStats {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let visible = reviews.iter().filter(|r| r.is_visible).count();
        ReviewStats {
            total: reviews.len(),
            visible,
            hidden: reviews.len() - visible,
        }
    }
}
