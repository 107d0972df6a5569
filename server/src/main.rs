use cookbook_server::config::Settings;
use cookbook_server::{api, app, db, telemetry, AppState};
use std::env;
use std::process;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump the API description and exit
    if env::args().any(|arg| arg == "--openapi") {
        match api::openapi().to_pretty_json() {
            Ok(spec) => println!("{}", spec),
            Err(e) => {
                eprintln!("Failed to serialize OpenAPI spec: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let _telemetry = telemetry::init_telemetry(&settings);

    let pool = match db::create_pool(&settings.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    };

    let bind_addr = settings.bind_addr;
    let router = app(AppState::new(pool, settings));

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", bind_addr, e);
            process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", bind_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_addr);
    tracing::info!(
        "OpenAPI spec available at http://{}/api-docs/openapi.json",
        bind_addr
    );

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
        process::exit(1);
    }
}
