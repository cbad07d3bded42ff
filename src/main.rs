#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::{web, App, HttpServer};
    use leptos::logging::log;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use reviewboard::api;
    use reviewboard::app::App as ReviewSite;
    use reviewboard::config::ServerConfig;
    use reviewboard::db::Database;
    use std::io;

    // Initialize the database
    let config = ServerConfig::from_env();
    let db = Database::new(&config.database_path).map_err(io::Error::other)?;
    db.create_schema().await.map_err(io::Error::other)?;
    let db = web::Data::new(db);
    let server_config = web::Data::new(config);
    log!("Schema created successfully!");

    // Load configuration
    let conf = leptos::get_configuration(None).await.map_err(io::Error::other)?;
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(ReviewSite);
    log!("listening on http://{}", &addr);

    // Start the Actix Web server
    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;

        App::new()
            .app_data(db.clone())
            .app_data(server_config.clone())
            // Register the review endpoint BEFORE Leptos routes
            .configure(api::configure)
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            // Register Leptos routes
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), ReviewSite)
            // Pass Leptos options to the app
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // to run: `trunk serve --open --features csr`
    use reviewboard::app::*;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
