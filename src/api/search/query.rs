use axum::{extract::State, Json};
use std::sync::Arc;

use slatenet_backend::config;
use slatenet_backend::search::{classify, selection_events};

use crate::state::AppState;

use super::types::*;

/// Search the directory / 搜索目录
///
/// Never an error from the caller's point of view: an empty query, an unbuilt
/// index, or a query matching nothing all answer with an empty result list.
/// The `ready` flag lets the client tell "no results" from "still loading".
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Json<ApiResponse<SearchResponse>> {
    let ready = state.session.is_ready(req.scope);
    let query = req.query.trim();
    if query.is_empty() {
        return Json(ApiResponse::success(SearchResponse {
            ready,
            results: Vec::new(),
            total: 0,
            total_matched: 0,
        }));
    }

    let limit = req
        .limit
        .unwrap_or_else(|| config::get_config().search.default_limit);

    let hits = state.session.search(req.scope, query);
    tracing::debug!(scope = ?req.scope, query, hits = hits.len(), "search executed");

    // Unknown kinds are dropped here, keeping the merge order of the rest
    let mut results: Vec<SearchResultItem> = hits
        .into_iter()
        .filter_map(|hit| {
            classify(&hit.document).map(|typed| SearchResultItem {
                kind: typed.kind,
                score: hit.score,
                document: typed.document,
            })
        })
        .collect();

    let total_matched = results.len();
    results.truncate(limit);
    let total = results.len();

    Json(ApiResponse::success(SearchResponse {
        ready,
        results,
        total,
        total_matched,
    }))
}

/// Resolve a selected result into its event sequence / 将选中结果解析为事件序列
///
/// The client replays the events in order: navigation first, the viewer signal
/// for files second, `close-search` always last. Documents of unknown kind
/// never appear in the presented list, so selecting one is a client error.
pub async fn select(Json(req): Json<SelectRequest>) -> Json<ApiResponse<SelectResponse>> {
    match classify(&req.document) {
        Some(typed) => Json(ApiResponse::success(SelectResponse {
            events: selection_events(&typed),
        })),
        None => Json(ApiResponse::error("unrecognized result type")),
    }
}
