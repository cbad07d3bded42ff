pub mod admin_login;
pub mod admin_page;
pub mod admin_panel;
pub mod messages;
pub mod public_page;
pub mod review_form;
pub mod reviews_list;
pub mod star_rating;
