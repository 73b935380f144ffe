use serde::{Deserialize, Serialize};

use slatenet_backend::search::{
    Document, IndexStats, ResultKind, SearchScope, SelectionEvent,
};

/// API响应结构 / API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

/// 搜索请求 / Search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_scope")]
    pub scope: SearchScope,
    #[serde(default)]
    pub limit: Option<usize>,
}

fn default_scope() -> SearchScope {
    SearchScope::Network
}

/// 搜索结果项 / Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub kind: ResultKind,
    pub score: f32,
    pub document: Document,
}

/// 搜索响应 / Search response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Whether the queried scope's index has been built / 所查范围的索引是否已构建
    pub ready: bool,
    pub results: Vec<SearchResultItem>,
    pub total: usize,
    /// 匹配的总数（截断前） / Matches before the limit was applied
    pub total_matched: usize,
}

/// 选中请求 / Select request
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub document: Document,
}

/// 选中响应：按回放顺序排列的事件 / Select response, events in replay order
#[derive(Debug, Serialize)]
pub struct SelectResponse {
    pub events: Vec<SelectionEvent>,
}

/// 重建响应 / Rebuild response
#[derive(Debug, Serialize)]
pub struct RebuildResponse {
    pub stats: IndexStats,
}

/// 单个范围的索引状态 / Per-scope index status
#[derive(Debug, Serialize)]
pub struct ScopeStatus {
    pub scope: SearchScope,
    pub ready: bool,
    pub stats: IndexStats,
}

/// 服务状态 / Service status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    pub build_time: &'static str,
    pub started_at: String,
    pub scopes: Vec<ScopeStatus>,
}
