use leptos::*;
use crate::components::messages;
use crate::components::star_rating::StarRating;
use crate::models::review::Review;

/// One review: avatar letter, nickname, date, stars and text. Extra content
/// such as moderation buttons goes in `children`.
#[component]
pub fn ReviewCard(review: Review, #[prop(optional)] children: Option<Children>) -> impl IntoView {
    view! {
        <article class="review-card" class:hidden-review=!review.is_visible>
            <header class="review-header">
                <div class="avatar">{review.initial()}</div>
                <div>
                    <h3>{review.nickname.clone()}</h3>
                    <p class="date">{review.date.format("%Y-%m-%d").to_string()}</p>
                </div>
            </header>
            <StarRating rating=review.rating/>
            <p class="review-text">{review.text.clone()}</p>
            {children.map(|children| children())}
        </article>
    }
}

#[component]
pub fn ReviewsList(#[prop(into)] reviews: Signal<Vec<Review>>) -> impl IntoView {
    view! {
        <div class="reviews-grid">
            <Show
                when=move || reviews.with(|reviews| !reviews.is_empty())
                fallback=|| view! { <p class="empty">{messages::EMPTY_LIST}</p> }
            >
                <For
                    each=move || reviews.get()
                    key=|review| review.id.clone()
                    children=move |review| view! { <ReviewCard review=review/> }
                />
            </Show>
        </div>
    }
}
