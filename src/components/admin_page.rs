use leptos::logging::log;
use leptos::*;
use crate::client::HttpReviewService;
use crate::components::admin_login::AdminLogin;
use crate::components::admin_panel::AdminPanel;
use crate::components::messages;
use crate::config::ClientConfig;
use crate::state::admin::{self, AdminGate, AdminSession};

/// Code gate in front of the moderation panel.
#[component]
pub fn AdminPage() -> impl IntoView {
    let config = ClientConfig::from_build_env();
    let service = store_value(HttpReviewService::from_config(&config));
    let gate = AdminGate::from_digest(config.admin_code_sha256.as_deref());
    let session = create_rw_signal(AdminSession::new(gate));

    let on_login = Callback::new(move |code: String| {
        spawn_local(async move {
            let service = service.get_value();
            if let Err(err) = admin::login(&service, &session, &code).await {
                log!("[ADMIN] Login refused: {}", err);
            }
        });
    });

    let on_refresh = Callback::new(move |()| {
        spawn_local(async move {
            let service = service.get_value();
            admin::refresh(&service, &session).await;
        });
    });

    let on_toggle = Callback::new(move |review_id: String| {
        spawn_local(async move {
            let service = service.get_value();
            admin::toggle_visibility(&service, &session, &review_id).await;
        });
    });

    let on_confirm_delete = Callback::new(move |()| {
        spawn_local(async move {
            let service = service.get_value();
            admin::confirm_delete(&service, &session).await;
        });
    });

    let on_sign_out = Callback::new(move |()| session.update(AdminSession::sign_out));

    // A rejected session lands back here, so its notice shows on the login card.
    let login_error = Signal::derive(move || {
        session.with(|s| {
            s.login_error()
                .map(messages::auth_error)
                .or_else(|| s.notice().map(messages::notice))
        })
    });

    view! {
        <Show
            when=move || session.with(AdminSession::is_authenticated)
            fallback=move || view! { <AdminLogin on_login=on_login error=login_error/> }
        >
            <AdminPanel
                session=session
                on_refresh=on_refresh
                on_toggle=on_toggle
                on_confirm_delete=on_confirm_delete
                on_sign_out=on_sign_out
            />
        </Show>
    }
}
