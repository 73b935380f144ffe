use axum::{extract::State, Json};
use std::sync::Arc;

use slatenet_backend::models::Viewer;
use slatenet_backend::search::SearchScope;

use crate::state::AppState;

use super::types::*;

/// Refetch the directory snapshot and rebuild the network index
/// 重新拉取目录快照并重建全网索引
///
/// The previous index keeps answering queries until the swap; a failed fetch
/// degrades to an empty (still queryable) index and is reported in the stats.
pub async fn rebuild(State(state): State<Arc<AppState>>) -> Json<ApiResponse<RebuildResponse>> {
    let stats = state.session.rebuild_network(state.provider.as_ref()).await;
    Json(ApiResponse::success(RebuildResponse { stats }))
}

/// Load the viewer's own data into the personal scope / 将用户数据载入个人索引
pub async fn load_personal(
    State(state): State<Arc<AppState>>,
    Json(viewer): Json<Viewer>,
) -> Json<ApiResponse<RebuildResponse>> {
    let stats = state.session.load_viewer(&viewer);
    Json(ApiResponse::success(RebuildResponse { stats }))
}

/// Service and index status / 服务与索引状态
pub async fn status(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatusResponse>> {
    let scopes = [SearchScope::Network, SearchScope::Personal]
        .into_iter()
        .map(|scope| ScopeStatus {
            scope,
            ready: state.session.is_ready(scope),
            stats: state.session.stats(scope),
        })
        .collect();

    Json(ApiResponse::success(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        build_time: env!("BUILD_TIME"),
        started_at: state.started_at.to_rfc3339(),
        scopes,
    }))
}
