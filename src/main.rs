mod config;
mod dto;
mod handlers;
mod mailer;
mod models;
mod service;
mod templates;

use std::sync::Arc;

use handlers::AppState;
use mailer::SmtpMailer;
use service::ContactService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });
    tracing::info!("Successfully loaded contact server config");

    // Mail transport setup
    let mailer = SmtpMailer::new(&cfg).unwrap_or_else(|e| {
        tracing::error!("Failed to configure SMTP transport: {e}");
        panic!("failed to configure SMTP transport: {e}");
    });

    match mailer.verify().await {
        Ok(true) => tracing::info!("SMTP relay '{}' is ready to send messages", cfg.smtp_relay),
        Ok(false) => tracing::error!("SMTP relay '{}' refused the connection", cfg.smtp_relay),
        Err(e) => tracing::error!("Email configuration error: {e}"),
    }

    // Service creation
    let service = Arc::new(ContactService::new(Arc::new(mailer), &cfg));

    // Router config
    let cors = handlers::cors_layer(&cfg.frontend_url).unwrap_or_else(|e| {
        tracing::error!("Invalid FRONTEND_URL '{}': {e}", cfg.frontend_url);
        panic!("invalid frontend url: {e}");
    });
    let router = handlers::router(AppState::new(service)).layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .expect("Failed to bind to address");
    let addr = listener
        .local_addr()
        .expect("Failed to read bound address");

    tracing::info!("Contact server starting, listening on {}", addr);
    tracing::info!("Owner mailbox: {}", cfg.email_user);
    tracing::info!("Environment: {}", cfg.node_env);
    tracing::info!("Allowed origin: {}", cfg.frontend_url);
    tracing::info!("Routes: GET / | GET /health | POST /api/contact | GET /api-doc/openapi.json");

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
