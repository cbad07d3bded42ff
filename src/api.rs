#[cfg(feature = "ssr")]
mod api_impl {
    use actix_web::http::{Method, StatusCode};
    use actix_web::{web, HttpRequest, HttpResponse};
    use leptos::logging::{error, log};
    use serde::{Deserialize, Serialize};

    use crate::config::{ServerConfig, DEFAULT_ENDPOINT};
    use crate::db::Database;
    use crate::models::review::{PublicReview, Rating, ReviewDraft};
    use crate::models::wire::{
        AckResponse, AdminAction, CreateReviewRequest, ErrorBody, ToggleResponse, ADMIN_CODE_HEADER,
    };

    #[derive(Deserialize)]
    pub struct DeleteQuery {
        pub id: Option<String>,
    }

    /// Mounts the review endpoint at `DEFAULT_ENDPOINT`.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::resource(DEFAULT_ENDPOINT)
                .route(web::get().to(list_public_reviews))
                .route(web::post().to(post_reviews))
                .route(web::delete().to(delete_review))
                .route(web::method(Method::OPTIONS).to(preflight))
                .default_service(web::to(method_not_allowed)),
        );
    }

    fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
        HttpResponse::build(status)
            .insert_header(("Access-Control-Allow-Origin", "*"))
            .json(body)
    }

    fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
        json_response(status, &ErrorBody { error: message.into() })
    }

    /// Without a configured code every admin request is refused.
    fn is_admin(req: &HttpRequest, config: &ServerConfig) -> bool {
        let Some(expected) = config.admin_code.as_deref() else {
            return false;
        };
        req.headers()
            .get(ADMIN_CODE_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|code| code == expected)
    }

    pub async fn preflight() -> HttpResponse {
        HttpResponse::Ok()
            .insert_header(("Access-Control-Allow-Origin", "*"))
            .insert_header(("Access-Control-Allow-Methods", "GET, POST, DELETE, OPTIONS"))
            .insert_header(("Access-Control-Allow-Headers", "Content-Type, X-Admin-Code"))
            .insert_header(("Access-Control-Max-Age", "86400"))
            .finish()
    }

    pub async fn method_not_allowed() -> HttpResponse {
        error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    // GET: visible reviews for the public page
    pub async fn list_public_reviews(db: web::Data<Database>) -> HttpResponse {
        match db.get_visible_reviews().await {
            Ok(reviews) => {
                log!("[API] Returning {} public reviews", reviews.len());
                let reviews: Vec<PublicReview> = reviews.into_iter().map(PublicReview::from).collect();
                json_response(StatusCode::OK, &reviews)
            }
            Err(err) => {
                error!("[API] Failed to fetch public reviews: {:?}", err);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch reviews")
            }
        }
    }

    // POST: action-tagged admin requests, or a new review when no action is given.
    // The body is parsed whatever its Content-Type says.
    pub async fn post_reviews(
        req: HttpRequest,
        db: web::Data<Database>,
        config: web::Data<ServerConfig>,
        body: web::Bytes,
    ) -> HttpResponse {
        let body: serde_json::Value = match serde_json::from_slice(&body) {
            Ok(body) => body,
            Err(err) => {
                log!("[API] Malformed request body: {}", err);
                return error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON: {}", err));
            }
        };
        if body.get("action").is_none() {
            return create_review(&db, body).await;
        }

        if !is_admin(&req, &config) {
            log!("[API] Rejected admin action without a valid code");
            return error_response(StatusCode::FORBIDDEN, "Forbidden");
        }

        match serde_json::from_value::<AdminAction>(body) {
            Ok(AdminAction::GetAll) => match db.get_all_reviews().await {
                Ok(reviews) => {
                    log!("[API] Returning {} reviews to admin", reviews.len());
                    json_response(StatusCode::OK, &reviews)
                }
                Err(err) => {
                    error!("[API] Failed to fetch reviews: {:?}", err);
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch reviews")
                }
            },
            Ok(AdminAction::ToggleVisibility { review_id }) => {
                match db.toggle_visibility(&review_id).await {
                    Ok(visible) => json_response(
                        StatusCode::OK,
                        &ToggleResponse {
                            success: true,
                            is_visible: visible.unwrap_or(false),
                        },
                    ),
                    Err(err) => {
                        error!("[API] Failed to toggle review {}: {:?}", review_id, err);
                        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to toggle visibility")
                    }
                }
            }
            Err(err) => {
                log!("[API] Unknown admin action: {}", err);
                error_response(StatusCode::BAD_REQUEST, "Unknown action")
            }
        }
    }

    async fn create_review(db: &Database, body: serde_json::Value) -> HttpResponse {
        let request: CreateReviewRequest = match serde_json::from_value(body) {
            Ok(request) => request,
            Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
        };

        let draft = Rating::new(request.rating).and_then(|rating| {
            ReviewDraft {
                nickname: request.nickname,
                rating,
                text: request.text,
            }
            .normalized()
        });
        let draft = match draft {
            Ok(draft) => draft,
            Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
        };

        match db.insert_review(&draft).await {
            Ok(review) => {
                log!("[API] Created review {}", review.id);
                json_response(StatusCode::CREATED, &PublicReview::from(review))
            }
            Err(err) => {
                error!("[API] Database error: {:?}", err);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save review")
            }
        }
    }

    // DELETE ?id=: permanent removal; unknown ids succeed too
    pub async fn delete_review(
        req: HttpRequest,
        db: web::Data<Database>,
        config: web::Data<ServerConfig>,
    ) -> HttpResponse {
        if !is_admin(&req, &config) {
            return error_response(StatusCode::FORBIDDEN, "Forbidden");
        }
        let query = match web::Query::<DeleteQuery>::from_query(req.query_string()) {
            Ok(query) => query.into_inner(),
            Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
        };
        let Some(review_id) = query.id.filter(|id| !id.is_empty()) else {
            return error_response(StatusCode::BAD_REQUEST, "Review ID is required");
        };

        match db.delete_review(&review_id).await {
            Ok(_) => json_response(StatusCode::OK, &AckResponse { success: true }),
            Err(err) => {
                error!("[API] Failed to delete review {}: {:?}", review_id, err);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete review")
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::models::review::Review;
        use actix_web::{test, App};
        use serde_json::json;

        const CODE: &str = "test-code";

        async fn test_db() -> web::Data<Database> {
            let db = Database::new(":memory:").unwrap();
            db.create_schema().await.unwrap();
            web::Data::new(db)
        }

        fn test_config() -> web::Data<ServerConfig> {
            config_with_code(Some(CODE))
        }

        fn config_with_code(code: Option<&str>) -> web::Data<ServerConfig> {
            web::Data::new(ServerConfig {
                database_path: ":memory:".into(),
                admin_code: code.map(str::to_string),
            })
        }

        macro_rules! test_app {
            ($db:expr) => {
                test_app!($db, test_config())
            };
            ($db:expr, $config:expr) => {
                test::init_service(
                    App::new()
                        .app_data($db.clone())
                        .app_data($config)
                        .configure(configure),
                )
                .await
            };
        }

        fn assert_json_error(resp: &actix_web::dev::ServiceResponse, status: StatusCode) {
            assert_eq!(resp.status(), status);
            assert_eq!(resp.headers().get("Access-Control-Allow-Origin").unwrap(), "*");
        }

        fn create(nickname: &str, rating: i64, text: &str) -> test::TestRequest {
            test::TestRequest::post()
                .uri("/api/reviews")
                .set_json(json!({"nickname": nickname, "rating": rating, "text": text}))
        }

        fn admin(action: serde_json::Value) -> test::TestRequest {
            test::TestRequest::post()
                .uri("/api/reviews")
                .insert_header((ADMIN_CODE_HEADER, CODE))
                .set_json(action)
        }

        #[actix_web::test]
        async fn create_then_list_publicly() {
            let db = test_db().await;
            let app = test_app!(db);

            let resp = test::call_service(&app, create(" Ivan ", 4, "Good").to_request()).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let created: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(created["nickname"], "Ivan");
            assert!(created.get("is_visible").is_none());

            let req = test::TestRequest::get().uri("/api/reviews").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(resp.headers().get("Access-Control-Allow-Origin").unwrap(), "*");
            let listed: Vec<Review> = test::read_body_json(resp).await;
            assert_eq!(listed.len(), 1);
            assert_eq!(listed[0].rating.get(), 4);
        }

        #[actix_web::test]
        async fn create_rejects_bad_input() {
            let db = test_db().await;
            let app = test_app!(db);

            for req in [create("", 5, "text"), create("name", 5, "  "), create("name", 6, "text")] {
                let resp = test::call_service(&app, req.to_request()).await;
                assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            }
            assert!(db.get_all_reviews().await.unwrap().is_empty());
        }

        #[actix_web::test]
        async fn admin_actions_require_the_code() {
            let db = test_db().await;
            let app = test_app!(db);

            let req = test::TestRequest::post()
                .uri("/api/reviews")
                .set_json(json!({"action": "get_all"}))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

            let req = test::TestRequest::post()
                .uri("/api/reviews")
                .insert_header((ADMIN_CODE_HEADER, "wrong"))
                .set_json(json!({"action": "toggle_visibility", "review_id": "1"}))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

            let req = test::TestRequest::delete().uri("/api/reviews?id=1").to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
        }

        #[actix_web::test]
        async fn toggle_hides_from_public_but_not_admin() {
            let db = test_db().await;
            let app = test_app!(db);
            let review = db
                .insert_review(&ReviewDraft {
                    nickname: "a".into(),
                    rating: Rating::default(),
                    text: "b".into(),
                })
                .await
                .unwrap();

            let req = admin(json!({"action": "toggle_visibility", "review_id": review.id})).to_request();
            let toggled: ToggleResponse = test::call_and_read_body_json(&app, req).await;
            assert_eq!(toggled, ToggleResponse { success: true, is_visible: false });

            let req = test::TestRequest::get().uri("/api/reviews").to_request();
            let public: Vec<Review> = test::call_and_read_body_json(&app, req).await;
            assert!(public.is_empty());

            let all: Vec<Review> = test::call_and_read_body_json(&app, admin(json!({"action": "get_all"})).to_request()).await;
            assert_eq!(all.len(), 1);
            assert!(!all[0].is_visible);
        }

        #[actix_web::test]
        async fn delete_is_repeatable() {
            let db = test_db().await;
            let app = test_app!(db);
            let review = db
                .insert_review(&ReviewDraft {
                    nickname: "a".into(),
                    rating: Rating::default(),
                    text: "b".into(),
                })
                .await
                .unwrap();

            for _ in 0..2 {
                let req = test::TestRequest::delete()
                    .uri(&format!("/api/reviews?id={}", review.id))
                    .insert_header((ADMIN_CODE_HEADER, CODE))
                    .to_request();
                let ack: AckResponse = test::call_and_read_body_json(&app, req).await;
                assert!(ack.success);
            }
            assert!(db.get_all_reviews().await.unwrap().is_empty());

            let req = test::TestRequest::delete()
                .uri("/api/reviews")
                .insert_header((ADMIN_CODE_HEADER, CODE))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
        }

        #[actix_web::test]
        async fn unknown_action_is_a_bad_request() {
            let db = test_db().await;
            let app = test_app!(db);
            let resp = test::call_service(&app, admin(json!({"action": "publish_all"})).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }

        #[actix_web::test]
        async fn preflight_advertises_admin_header() {
            let db = test_db().await;
            let app = test_app!(db);
            let req = test::TestRequest::default()
                .method(actix_web::http::Method::OPTIONS)
                .uri("/api/reviews")
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let allowed = resp.headers().get("Access-Control-Allow-Headers").unwrap();
            assert!(allowed.to_str().unwrap().contains("X-Admin-Code"));
        }

        #[actix_web::test]
        async fn malformed_json_gets_a_json_error_with_cors() {
            let db = test_db().await;
            let app = test_app!(db);
            let req = test::TestRequest::post()
                .uri("/api/reviews")
                .insert_header(("Content-Type", "application/json"))
                .set_payload("{not json")
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_json_error(&resp, StatusCode::BAD_REQUEST);
            let body: ErrorBody = test::read_body_json(resp).await;
            assert!(body.error.starts_with("Invalid JSON"));
        }

        #[actix_web::test]
        async fn create_accepts_a_plain_text_content_type() {
            let db = test_db().await;
            let app = test_app!(db);
            let req = test::TestRequest::post()
                .uri("/api/reviews")
                .insert_header(("Content-Type", "text/plain"))
                .set_payload(r#"{"nickname": "Ivan", "rating": 4, "text": "Good"}"#)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            assert_eq!(resp.headers().get("Access-Control-Allow-Origin").unwrap(), "*");
            assert_eq!(db.get_all_reviews().await.unwrap().len(), 1);
        }

        #[actix_web::test]
        async fn unsupported_method_gets_a_json_405() {
            let db = test_db().await;
            let app = test_app!(db);
            let req = test::TestRequest::put().uri("/api/reviews").to_request();
            let resp = test::call_service(&app, req).await;
            assert_json_error(&resp, StatusCode::METHOD_NOT_ALLOWED);
            let body: ErrorBody = test::read_body_json(resp).await;
            assert_eq!(body.error, "Method not allowed");
        }

        #[actix_web::test]
        async fn malformed_delete_query_gets_a_json_error() {
            let db = test_db().await;
            let app = test_app!(db);
            let req = test::TestRequest::delete()
                .uri("/api/reviews?id=1&id=2")
                .insert_header((ADMIN_CODE_HEADER, CODE))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_json_error(&resp, StatusCode::BAD_REQUEST);
        }

        #[actix_web::test]
        async fn admin_actions_are_disabled_without_a_configured_code() {
            let db = test_db().await;
            let app = test_app!(db, config_with_code(None));

            for code in ["", "dev-admin-code", CODE] {
                let req = test::TestRequest::post()
                    .uri("/api/reviews")
                    .insert_header((ADMIN_CODE_HEADER, code))
                    .set_json(json!({"action": "get_all"}))
                    .to_request();
                let resp = test::call_service(&app, req).await;
                assert_json_error(&resp, StatusCode::FORBIDDEN);
            }

            let resp = test::call_service(&app, create("Ivan", 4, "Good").to_request()).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }
    }
}

#[cfg(feature = "ssr")]
pub use api_impl::{
    configure, delete_review, list_public_reviews, method_not_allowed, post_reviews, preflight, DeleteQuery,
};
