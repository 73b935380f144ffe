use axum::{
    routing::{get, post},
    Router,
};
use chrono::Utc;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod state;

use slatenet_backend::config;
use slatenet_backend::directory::HttpDirectoryProvider;
use slatenet_backend::search::SearchSession;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slatenet_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config()?;
    tracing::info!(
        "Server will listen on {}:{}",
        app_config.server.host,
        app_config.server.port
    );

    let provider = Arc::new(HttpDirectoryProvider::new(
        &app_config.directory.upstream_url,
        app_config.directory.timeout_secs,
    )?);

    let state = Arc::new(AppState {
        session: SearchSession::new((&app_config.search).into()),
        provider,
        started_at: Utc::now(),
    });

    // Build the network index in the background; queries answer empty (with
    // ready=false) until the first build lands / 后台构建索引，构建完成前查询返回空
    {
        let state = state.clone();
        tokio::spawn(async move {
            let stats = state.session.rebuild_network(state.provider.as_ref()).await;
            tracing::info!(documents = stats.document_count, "initial index build finished");
        });
    }

    let app = Router::new()
        .route("/api/search/query", post(api::search::query::search))
        .route("/api/search/select", post(api::search::query::select))
        .route("/api/search/rebuild", post(api::search::admin::rebuild))
        .route("/api/search/personal", post(api::search::admin::load_personal))
        .route("/api/search/status", get(api::search::admin::status))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
