//! Front-end access to the review service.
use gloo_net::http::{Request, Response};
use leptos::logging::log;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::review::{PublicReview, Review, ReviewDraft};
use crate::models::wire::{AdminAction, CreateReviewRequest, ADMIN_CODE_HEADER};

/// Operations the pages need from the review service.
///
/// Futures are driven on the single UI thread, so nothing here is `Send`.
#[allow(async_fn_in_trait)]
pub trait ReviewService {
    /// Visible reviews, as shown on the public page.
    async fn list_visible(&self) -> Result<Vec<Review>, ApiError>;

    /// Every review, hidden ones included. Admin calls carry the code the
    /// admin signed in with.
    async fn list_all(&self, admin_code: &str) -> Result<Vec<Review>, ApiError>;

    async fn toggle_visibility(&self, admin_code: &str, review_id: &str) -> Result<(), ApiError>;

    async fn delete(&self, admin_code: &str, review_id: &str) -> Result<(), ApiError>;

    /// Persists a visitor's review and returns it as stored.
    async fn submit(&self, draft: &ReviewDraft) -> Result<Review, ApiError>;
}

/// `ReviewService` over HTTP, using the browser's fetch.
#[derive(Debug, Clone)]
pub struct HttpReviewService {
    endpoint: String,
}

impl HttpReviewService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        HttpReviewService {
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    fn delete_url(&self, review_id: &str) -> String {
        format!("{}?id={}", self.endpoint, urlencoding::encode(review_id))
    }

    async fn admin_action(&self, admin_code: &str, action: &AdminAction) -> Result<Response, ApiError> {
        let response = Request::post(&self.endpoint)
            .header(ADMIN_CODE_HEADER, admin_code)
            .json(action)?
            .send()
            .await?;
        ensure_ok(response).await
    }
}

async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    log!("[CLIENT] Request failed with {}: {}", status, message);
    Err(ApiError::from_status(status, message))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    Ok(response.json::<T>().await?)
}

impl ReviewService for HttpReviewService {
    async fn list_visible(&self) -> Result<Vec<Review>, ApiError> {
        let response = ensure_ok(Request::get(&self.endpoint).send().await?).await?;
        let reviews: Vec<PublicReview> = decode(response).await?;
        Ok(reviews.into_iter().map(Review::from).collect())
    }

    async fn list_all(&self, admin_code: &str) -> Result<Vec<Review>, ApiError> {
        decode(self.admin_action(admin_code, &AdminAction::GetAll).await?).await
    }

    async fn toggle_visibility(&self, admin_code: &str, review_id: &str) -> Result<(), ApiError> {
        let action = AdminAction::ToggleVisibility {
            review_id: review_id.to_string(),
        };
        self.admin_action(admin_code, &action).await?;
        Ok(())
    }

    async fn delete(&self, admin_code: &str, review_id: &str) -> Result<(), ApiError> {
        let response = Request::delete(&self.delete_url(review_id))
            .header(ADMIN_CODE_HEADER, admin_code)
            .send()
            .await?;
        ensure_ok(response).await?;
        Ok(())
    }

    async fn submit(&self, draft: &ReviewDraft) -> Result<Review, ApiError> {
        let body = CreateReviewRequest {
            nickname: draft.nickname.clone(),
            rating: i64::from(draft.rating.get()),
            text: draft.text.clone(),
        };
        let response = ensure_ok(Request::post(&self.endpoint).json(&body)?.send().await?).await?;
        let review: PublicReview = decode(response).await?;
        Ok(review.into())
    }
}
