/// Main application entry point for the review site.
/// Routes the public review page and the admin moderation page.
use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{Route, Router, Routes};
use crate::components::{admin_page::AdminPage, messages, public_page::PublicPage};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=messages::PUBLIC_TITLE/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=PublicPage/>
                    <Route path="/admin" view=AdminPage/>
                </Routes>
            </main>
        </Router>
    }
}
