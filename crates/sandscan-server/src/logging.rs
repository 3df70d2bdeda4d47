use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa o subscriber global.
///
/// Filtro via `RUST_LOG` (padrão `info`); `LOG_FORMAT=json` troca a saída
/// para JSON por linha.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(fmt::layer().with_writer(std::io::stdout).json()).init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stdout)).init();
    }

    tracing::info!(json, "logging inicializado");
}
