use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::A;
use crate::components::messages;

#[component]
pub fn AdminLogin(
    on_login: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    let (code, set_code) = create_signal(String::new());

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_login.call(code.get_untracked());
    };

    view! {
        <div class="login-card">
            <h1>{messages::ADMIN_TITLE}</h1>
            <form on:submit=handle_submit>
                <label>{messages::ACCESS_CODE}</label>
                <input
                    type="password"
                    required=true
                    placeholder=messages::ENTER_CODE
                    prop:value=code
                    on:input=move |e| set_code.set(event_target_value(&e))
                />
                {move || error.get().map(|message| view! { <p class="error">{message}</p> })}
                <button type="submit">{messages::SIGN_IN}</button>
                <A href="/">{messages::BACK_HOME}</A>
            </form>
        </div>
    }
}
