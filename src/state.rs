use std::sync::Arc;

use chrono::{DateTime, Utc};
use slatenet_backend::directory::DirectoryProvider;
use slatenet_backend::search::SearchSession;

/// Shared application state / 共享应用状态
pub struct AppState {
    /// The search session owning both index scopes / 持有两个索引范围的搜索会话
    pub session: SearchSession,
    /// Directory snapshot source / 目录快照来源
    pub provider: Arc<dyn DirectoryProvider>,
    pub started_at: DateTime<Utc>,
}
