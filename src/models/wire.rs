//! Request and response bodies of the review service endpoint.
use serde::{Deserialize, Serialize};

/// Header carrying the shared admin code on every moderation request.
pub const ADMIN_CODE_HEADER: &str = "X-Admin-Code";

/// Action-tagged admin request, e.g. `{"action":"get_all"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AdminAction {
    GetAll,
    ToggleVisibility { review_id: String },
}

/// Body of a public submission. Fields are loose here so the server can
/// answer bad input with a 400 rather than a parse failure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateReviewRequest {
    #[serde(default)]
    pub nickname: String,
    #[serde(default = "default_rating")]
    pub rating: i64,
    #[serde(default)]
    pub text: String,
}

fn default_rating() -> i64 {
    5
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ToggleResponse {
    pub success: bool,
    pub is_visible: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AckResponse {
    pub success: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
