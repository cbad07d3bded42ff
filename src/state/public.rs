//! Public review page: the listing plus the submission dialog.
use chrono::{DateTime, NaiveDate, Utc};
use leptos::logging::{error, log, warn};

use super::Store;
use crate::client::ReviewService;
use crate::error::{ApiError, ValidationError};
use crate::models::review::{Rating, Review, ReviewDraft};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    Invalid(ValidationError),
    Failed(ApiError),
    /// A submission is already in flight.
    Busy,
}

/// Reviews shown before the service answers.
pub fn seed_reviews() -> Vec<Review> {
    let seed = |id: &str, nickname: &str, rating: u8, text: &str, (y, m, d): (i32, u32, u32)| Review {
        id: id.to_string(),
        nickname: nickname.to_string(),
        rating: Rating::new(i64::from(rating)).unwrap_or_default(),
        text: text.to_string(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        is_visible: true,
    };
    vec![
        seed(
            "1",
            "Александра",
            5,
            "Невероятный инструмент! MegaSchoolChat помог мне организовать обучение для целого класса. Рекомендую всем учителям!",
            (2024, 12, 20),
        ),
        seed(
            "2",
            "Дмитрий",
            4,
            "Отличная нейросеть для образования. Иногда бывают задержки, но в целом работает стабильно.",
            (2024, 12, 18),
        ),
        seed(
            "3",
            "Мария",
            5,
            "Просто WOW! Ученики в восторге, материал усваивается намного лучше. Спасибо разработчикам!",
            (2024, 12, 15),
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicBoard {
    reviews: Vec<Review>,
    draft: ReviewDraft,
    dialog_open: bool,
    submitting: bool,
    error: Option<SubmitError>,
    /// Ids of reviews submitted from this page, newest first.
    accepted: Vec<String>,
}

impl Default for PublicBoard {
    fn default() -> Self {
        Self::new(seed_reviews())
    }
}

impl PublicBoard {
    pub fn new(reviews: Vec<Review>) -> Self {
        PublicBoard {
            reviews,
            draft: ReviewDraft::default(),
            dialog_open: false,
            submitting: false,
            error: None,
            accepted: Vec::new(),
        }
    }

    /// Most recent first.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&SubmitError> {
        self.error.as_ref()
    }

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    /// Closing keeps whatever was typed.
    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.error = None;
    }

    pub fn set_nickname(&mut self, nickname: String) {
        self.draft.nickname = nickname;
    }

    pub fn set_text(&mut self, text: String) {
        self.draft.text = text;
    }

    pub fn set_rating(&mut self, rating: Rating) {
        self.draft.rating = rating;
    }

    /// Replaces the listing with what the service returned. Reviews submitted
    /// here that the response does not contain yet stay in front.
    pub fn replace_listing(&mut self, reviews: Vec<Review>) {
        let mut listing: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| self.accepted.contains(&r.id) && !reviews.iter().any(|fresh| fresh.id == r.id))
            .cloned()
            .collect();
        listing.extend(reviews);
        self.reviews = listing;
    }

    /// Millisecond timestamp, bumped until no listed review uses it.
    fn local_id(&self, now_millis: i64) -> String {
        let mut candidate = now_millis;
        while self.reviews.iter().any(|r| r.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn accept(&mut self, review: Review) {
        self.accepted.insert(0, review.id.clone());
        self.reviews.insert(0, review);
        self.draft = ReviewDraft::default();
        self.dialog_open = false;
        self.error = None;
    }

    /// Adds the draft to the local listing only, stamped with `now`.
    pub fn submit_local(&mut self, now: DateTime<Utc>) -> Result<&Review, ValidationError> {
        let draft = match self.draft.normalized() {
            Ok(draft) => draft,
            Err(err) => {
                self.error = Some(SubmitError::Invalid(err.clone()));
                return Err(err);
            }
        };
        let id = self.local_id(now.timestamp_millis());
        self.accept(draft.into_review(id, now.date_naive()));
        Ok(&self.reviews[0])
    }

    /// Validates the draft and marks the board as submitting. The returned
    /// draft is what gets sent.
    pub fn begin_submit(&mut self) -> Result<ReviewDraft, SubmitError> {
        if self.submitting {
            return Err(SubmitError::Busy);
        }
        match self.draft.normalized() {
            Ok(draft) => {
                self.submitting = true;
                self.error = None;
                Ok(draft)
            }
            Err(err) => {
                self.error = Some(SubmitError::Invalid(err.clone()));
                Err(SubmitError::Invalid(err))
            }
        }
    }

    /// On failure the dialog stays open with the form data intact.
    pub fn finish_submit(&mut self, result: Result<Review, ApiError>) {
        self.submitting = false;
        match result {
            Ok(review) => self.accept(review),
            Err(err) => self.error = Some(SubmitError::Failed(err)),
        }
    }
}

/// Swaps the seeded listing for the service's visible reviews.
pub async fn load_listing<S, C>(service: &S, store: &C)
where
    S: ReviewService,
    C: Store<PublicBoard>,
{
    match service.list_visible().await {
        Ok(reviews) => {
            log!("[PUBLIC] Loaded {} reviews", reviews.len());
            store.update_with(|board| board.replace_listing(reviews));
        }
        Err(err) => warn!("[PUBLIC] Keeping seeded reviews: {}", err),
    }
}

/// Sends the draft to the service and records the outcome.
pub async fn submit<S, C>(service: &S, store: &C)
where
    S: ReviewService,
    C: Store<PublicBoard>,
{
    let Some(Ok(draft)) = store.update_with(PublicBoard::begin_submit) else {
        return;
    };
    let result = service.submit(&draft).await;
    if let Err(err) = &result {
        error!("[PUBLIC] Error submitting review: {}", err);
    }
    store.update_with(|board| board.finish_submit(result));
}
