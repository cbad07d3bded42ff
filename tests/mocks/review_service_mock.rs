use std::cell::{Cell, RefCell};

use chrono::NaiveDate;
use reviewboard::client::ReviewService;
use reviewboard::error::ApiError;
use reviewboard::models::review::{Review, ReviewDraft};

/// Requests the mock has received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListVisible,
    ListAll,
    Toggle(String),
    Delete(String),
    Submit(String),
}

/// In-memory stand-in for the review service.
#[derive(Debug, Default)]
pub struct MockReviewService {
    reviews: RefCell<Vec<Review>>,
    calls: RefCell<Vec<Call>>,
    fail_next: RefCell<Option<ApiError>>,
    admin_codes: RefCell<Vec<String>>,
    accepted_code: RefCell<Option<String>>,
    next_id: Cell<u64>,
}

impl MockReviewService {
    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        MockReviewService {
            next_id: Cell::new(100),
            reviews: RefCell::new(reviews),
            ..Default::default()
        }
    }

    /// Admin calls carrying any other code answer `Unauthorized`.
    pub fn accept_code(&self, code: &str) {
        *self.accepted_code.borrow_mut() = Some(code.to_string());
    }

    /// Codes sent with admin calls, in order.
    pub fn admin_codes(&self) -> Vec<String> {
        self.admin_codes.borrow().clone()
    }

    /// Makes the next request fail with `err`.
    pub fn fail_next(&self, err: ApiError) {
        *self.fail_next.borrow_mut() = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn stored(&self) -> Vec<Review> {
        self.reviews.borrow().clone()
    }

    fn record_admin(&self, admin_code: &str, call: Call) -> Result<(), ApiError> {
        self.admin_codes.borrow_mut().push(admin_code.to_string());
        self.record(call)?;
        match self.accepted_code.borrow().as_deref() {
            Some(accepted) if accepted != admin_code => Err(ApiError::Unauthorized),
            _ => Ok(()),
        }
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.fail_next.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl ReviewService for MockReviewService {
    async fn list_visible(&self) -> Result<Vec<Review>, ApiError> {
        self.record(Call::ListVisible)?;
        Ok(self.reviews.borrow().iter().filter(|r| r.is_visible).cloned().collect())
    }

    async fn list_all(&self, admin_code: &str) -> Result<Vec<Review>, ApiError> {
        self.record_admin(admin_code, Call::ListAll)?;
        Ok(self.stored())
    }

    async fn toggle_visibility(&self, admin_code: &str, review_id: &str) -> Result<(), ApiError> {
        self.record_admin(admin_code, Call::Toggle(review_id.to_string()))?;
        if let Some(review) = self.reviews.borrow_mut().iter_mut().find(|r| r.id == review_id) {
            review.is_visible = !review.is_visible;
        }
        Ok(())
    }

    async fn delete(&self, admin_code: &str, review_id: &str) -> Result<(), ApiError> {
        self.record_admin(admin_code, Call::Delete(review_id.to_string()))?;
        self.reviews.borrow_mut().retain(|r| r.id != review_id);
        Ok(())
    }

    async fn submit(&self, draft: &ReviewDraft) -> Result<Review, ApiError> {
        self.record(Call::Submit(draft.nickname.clone()))?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let review = draft.clone().into_review(id.to_string(), date);
        self.reviews.borrow_mut().insert(0, review.clone());
        Ok(review)
    }
}
