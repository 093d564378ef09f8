use crate::config::ServerConfig;
use crate::error::Result;
use axum::http::{HeaderName, StatusCode};
use axum::{Router, response::IntoResponse, routing::get};
use futures::FutureExt;
use movies_app::rest_api::{api_router, context::REQUEST_ID_HEADER};
use movies_app::service::{MovieService, MovieServiceImpl};
use movies_app::state::{AppConfig, AppState};
use movies_cache::CacheBackend;
use movies_dal::movie::MovieRepositoryImpl;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{debug, info};

pub async fn run(args: ServerConfig) -> Result<()> {
    let state = build_state(&args).await?;
    run_with_state(args, state).await
}

pub async fn run_with_state(args: ServerConfig, state: AppState) -> Result<()> {
    let shutdown = tokio::signal::ctrl_c().map(|_| ());
    run_graceful_with_state(args, state, shutdown).await
}

pub async fn run_graceful_with_state<F>(
    args: ServerConfig,
    state: AppState,
    shutdown_signal: F,
) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = main_router(state, &args);

    let ip: std::net::IpAddr = args.listen_address.parse()?;
    let addr = std::net::SocketAddr::from((ip, args.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}

/// Full application with middleware stack
pub fn main_router<S: MovieService>(state: AppState<S>, args: &ServerConfig) -> Router<()> {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let mut router = Router::new()
        .route("/health", get(health))
        .merge(api_router(state))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            args.request_timeout,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid));

    if !args.no_cors {
        router = router.layer(CorsLayer::very_permissive());
    }
    router
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let backend = &config.backend;
    if backend.uses_data_dir() {
        let data_dir = backend.data_dir();
        if !data_dir.is_dir() {
            tokio::fs::create_dir_all(&data_dir).await?;
            info!("Created data directory {}", data_dir.display());
        }
    }

    let pool = movies_dal::new_pool(&backend.database_url()).await?;
    movies_dal::migrate(&pool).await?;
    debug!("Database migrated");

    let cache = CacheBackend::connect(
        backend.redis_url.as_deref(),
        backend.cache_ttl,
        backend.cache_capacity,
    )
    .await?;
    info!("Using {} cache", cache.name());

    let repository = MovieRepositoryImpl::new(pool, cache);
    let service = MovieServiceImpl::new(repository);
    let app_config = AppConfig {
        default_page_size: config.default_page_size,
        default_language: config.default_language,
    };
    Ok(AppState::new(service, app_config))
}
