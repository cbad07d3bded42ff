use leptos::ev::SubmitEvent;
use leptos::*;
use crate::components::messages;
use crate::components::star_rating::StarRating;
use crate::models::review::Rating;
use crate::state::public::PublicBoard;

/// Submission dialog. Field edits go straight into the board's draft; the
/// submit itself is left to `on_submit`.
#[component]
pub fn ReviewForm(board: RwSignal<PublicBoard>, on_submit: Callback<()>) -> impl IntoView {
    let rating = Signal::derive(move || board.with(|b| b.draft().rating));
    let on_rate = Callback::new(move |rating: Rating| board.update(|b| b.set_rating(rating)));

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.call(());
    };

    view! {
        <Show when=move || board.with(PublicBoard::is_dialog_open)>
            <div class="dialog-backdrop" on:click=move |_| board.update(PublicBoard::close_dialog)></div>
            <div class="dialog" role="dialog">
                <h2>{messages::NEW_REVIEW}</h2>
                <form on:submit=handle_submit>
                    <label>{messages::NICKNAME}</label>
                    <input
                        type="text"
                        required=true
                        placeholder=messages::NICKNAME_PLACEHOLDER
                        prop:value=move || board.with(|b| b.draft().nickname.clone())
                        on:input=move |e| board.update(|b| b.set_nickname(event_target_value(&e)))
                    />
                    <label>{messages::RATING}</label>
                    <StarRating rating=rating on_rate=on_rate/>
                    <label>{messages::REVIEW_TEXT}</label>
                    <textarea
                        required=true
                        placeholder=messages::REVIEW_PLACEHOLDER
                        prop:value=move || board.with(|b| b.draft().text.clone())
                        on:input=move |e| board.update(|b| b.set_text(event_target_value(&e)))
                    ></textarea>
                    {move || {
                        board
                            .with(|b| b.error().map(messages::submit_error))
                            .map(|message| view! { <p class="error">{message}</p> })
                    }}
                    <button type="submit" disabled=move || board.with(PublicBoard::is_submitting)>
                        {messages::SEND_REVIEW}
                    </button>
                    <button type="button" on:click=move |_| board.update(PublicBoard::close_dialog)>
                        {messages::CLOSE}
                    </button>
                </form>
            </div>
        </Show>
    }
}
