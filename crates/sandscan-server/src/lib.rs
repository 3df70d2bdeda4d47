/*!
 * Sandscan Server
 *
 * Serviço HTTP que expõe a análise de sandwich attacks para o front-end
 */

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod state;

use axum::{middleware::from_fn, routing::get_service, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

pub use config::{AppConfig, FileConfig, FrontendConfig};
pub use state::AppState;

/// Monta o router completo. `frontend` ausente desliga as rotas estáticas.
pub fn app(state: Arc<AppState>, frontend: Option<&FrontendConfig>) -> Router {
    let mut router = Router::new()
        .merge(api::analysis_router(state))
        .merge(api::admin_router());

    if let Some(frontend) = frontend {
        let index = frontend.template_folder.join("index.html");
        router = router
            .route("/", get_service(ServeFile::new(index)))
            .nest_service("/static", ServeDir::new(&frontend.static_folder));
    }

    router.layer(
        ServiceBuilder::new()
            .layer(CorsLayer::permissive())
            .layer(from_fn(middleware::logging_middleware)),
    )
}
