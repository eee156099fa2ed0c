mod api;
mod auth;
mod config;
mod images;
mod lifecycle;
mod listing;
mod models;
mod search;
mod store;

use axum::extract::MatchedPath;
use axum::http::Request;
use axum::Router;
use std::env;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa_swagger_ui::SwaggerUi;

use config::ImageServiceConfig;
use images::{HttpImageStore, ImageStore};
use lifecycle::RecipeLifecycle;
use store::{MemoryStore, RecipeStore};

/// Application state shared across all handlers
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
    pub lifecycle: RecipeLifecycle,
}

pub type SharedState = Arc<AppState>;

fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json().unwrap();
        println!("{}", spec);
        return;
    }

    init_telemetry();

    let image_config = ImageServiceConfig::from_env()
        .expect("IMAGE_SERVICE_URL and IMAGE_SERVICE_API_KEY must be set");
    let images: Arc<dyn ImageStore> =
        Arc::new(HttpImageStore::new(image_config).expect("Failed to build image service client"));

    let store: Arc<dyn RecipeStore> = Arc::new(MemoryStore::new());

    let state: SharedState = Arc::new(AppState {
        store: store.clone(),
        lifecycle: RecipeLifecycle::new(store, images),
    });

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = Router::new()
        .nest("/api/recipes", api::recipes::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                ),
        );

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());
    tracing::info!("Swagger UI available at http://localhost:3000/swagger-ui/");

    axum::serve(listener, app).await.unwrap();
}
