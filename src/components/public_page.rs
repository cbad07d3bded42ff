use chrono::Utc;
use leptos::logging::warn;
use leptos::*;
use crate::client::HttpReviewService;
use crate::components::messages;
use crate::components::review_form::ReviewForm;
use crate::components::reviews_list::ReviewsList;
use crate::config::ClientConfig;
use crate::state::public::{self, PublicBoard};

/// Landing page: hero, submission dialog and the review grid.
#[component]
pub fn PublicPage() -> impl IntoView {
    let config = ClientConfig::from_build_env();
    let remote = config.remote_submissions;
    let service = store_value(HttpReviewService::from_config(&config));
    let board = create_rw_signal(PublicBoard::default());

    // Runs once in the browser; the seeded list stays if the service is down.
    create_effect(move |_| {
        spawn_local(async move {
            let service = service.get_value();
            public::load_listing(&service, &board).await;
        });
    });

    let on_submit = Callback::new(move |()| {
        if remote {
            spawn_local(async move {
                let service = service.get_value();
                public::submit(&service, &board).await;
            });
        } else {
            board.update(|board| {
                if let Err(err) = board.submit_local(Utc::now()) {
                    warn!("[PUBLIC] Review rejected: {}", err);
                }
            });
        }
    });

    let reviews = Signal::derive(move || board.with(|b| b.reviews().to_vec()));

    view! {
        <nav class="site-nav">
            <h1>{messages::SITE_NAME}</h1>
            <a href="#reviews">{messages::REVIEWS}</a>
        </nav>
        <section class="hero">
            <h2>{messages::PUBLIC_TITLE}</h2>
            <p>{messages::PUBLIC_SUBTITLE}</p>
            <button class="primary" on:click=move |_| board.update(PublicBoard::open_dialog)>
                {messages::WRITE_REVIEW}
            </button>
            <ReviewForm board=board on_submit=on_submit/>
        </section>
        <section id="reviews">
            <ReviewsList reviews=reviews/>
        </section>
    }
}
