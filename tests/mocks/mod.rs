pub mod review_service_mock;
