use leptos::*;
use crate::models::review::Rating;

/// Five stars, filled up to `rating`. Clickable only when `on_rate` is given.
#[component]
pub fn StarRating(
    #[prop(into)] rating: MaybeSignal<Rating>,
    #[prop(optional)] on_rate: Option<Callback<Rating>>,
) -> impl IntoView {
    let rating = Signal::derive(move || rating.get());
    let interactive = on_rate.is_some();

    let stars = (Rating::MIN..=Rating::MAX)
        .map(move |star| {
            let filled = move || rating.get().get() >= star;
            let rate = move |_: ev::MouseEvent| {
                if let (Some(on_rate), Ok(value)) = (on_rate, Rating::new(i64::from(star))) {
                    on_rate.call(value);
                }
            };
            view! {
                <button
                    type="button"
                    class="star"
                    class:filled=filled
                    class:interactive=interactive
                    disabled=!interactive
                    on:click=rate
                >
                    "★"
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="stars" aria-label=move || format!("{} / {}", rating.get(), Rating::MAX)>
            {stars}
        </div>
    }
}
