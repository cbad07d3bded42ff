use leptos::*;
use leptos_router::A;
use crate::components::messages;
use crate::components::reviews_list::ReviewCard;
use crate::state::admin::{AdminPhase, AdminSession};

/// Signed-in moderation view: statistics, notices and the full list.
#[component]
pub fn AdminPanel(
    session: RwSignal<AdminSession>,
    on_refresh: Callback<()>,
    on_toggle: Callback<String>,
    on_confirm_delete: Callback<()>,
    on_sign_out: Callback<()>,
) -> impl IntoView {
    let stats = Signal::derive(move || session.with(AdminSession::stats));
    let loading = move || session.with(AdminSession::phase) == AdminPhase::Loading;

    view! {
        <nav class="admin-nav">
            <h1>{messages::ADMIN_TITLE} " " {messages::SITE_NAME}</h1>
            <button on:click=move |_| on_refresh.call(())>{messages::REFRESH}</button>
            <A href="/">{messages::HOME}</A>
            <button class="destructive" on:click=move |_| on_sign_out.call(())>
                {messages::SIGN_OUT}
            </button>
        </nav>

        <section class="stats">
            <h2>{messages::STATISTICS}</h2>
            <div class="stat">
                <p class="value">{move || stats.get().total}</p>
                <p>{messages::TOTAL}</p>
            </div>
            <div class="stat">
                <p class="value">{move || stats.get().visible}</p>
                <p>{messages::PUBLISHED}</p>
            </div>
            <div class="stat">
                <p class="value">{move || stats.get().hidden}</p>
                <p>{messages::HIDDEN}</p>
            </div>
        </section>

        {move || {
            session
                .with(|s| s.notice().map(messages::notice))
                .map(|message| {
                    view! {
                        <div class="notice" role="status">
                            <span>{message}</span>
                            <button on:click=move |_| session.update(AdminSession::dismiss_notice)>
                                "×"
                            </button>
                        </div>
                    }
                })
        }}

        <Show when=move || session.with(|s| s.pending_delete().is_some())>
            <div class="confirm" role="alertdialog">
                <span>{messages::CONFIRM_DELETE}</span>
                <button class="destructive" on:click=move |_| on_confirm_delete.call(())>
                    {messages::DELETE}
                </button>
                <button on:click=move |_| session.update(AdminSession::cancel_delete)>
                    {messages::CANCEL}
                </button>
            </div>
        </Show>

        <Show
            when=move || !loading()
            fallback=|| view! { <div class="spinner" aria-busy="true"></div> }
        >
            <div class="admin-list">
                <For
                    each=move || session.with(|s| s.reviews().to_vec())
                    key=|review| (review.id.clone(), review.is_visible)
                    children=move |review| {
                        let toggle_id = review.id.clone();
                        let delete_id = review.id.clone();
                        let label = if review.is_visible { messages::HIDE } else { messages::SHOW };
                        view! {
                            <ReviewCard review=review>
                                <div class="actions">
                                    <button on:click=move |_| on_toggle.call(toggle_id.clone())>
                                        {label}
                                    </button>
                                    <button
                                        class="destructive"
                                        on:click=move |_| {
                                            session.update(|s| s.request_delete(delete_id.clone()))
                                        }
                                    >
                                        {messages::DELETE}
                                    </button>
                                </div>
                            </ReviewCard>
                        }
                    }
                />
            </div>
        </Show>
    }
}
