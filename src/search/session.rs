//! Search session - index lifecycle management / 搜索会话与索引生命周期管理
//!
//! One session owns one index per scope with an explicit create / replace /
//! discard lifecycle. Queries read through an `Arc` clone, so a rebuild swaps
//! the whole index atomically while in-flight searches keep the old one alive.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::directory::DirectoryProvider;
use crate::models::Viewer;

use super::engine::SearchIndex;
use super::schema::{IndexStats, QueryResult, SearchTuning};

/// Which index a query runs against / 查询作用的索引范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Full network directory / 全网目录
    Network,
    /// The viewer's own data / 当前用户自己的数据
    Personal,
}

struct ScopeState {
    index: RwLock<Arc<SearchIndex>>,
    ready: AtomicBool,
}

impl ScopeState {
    fn new(tuning: SearchTuning) -> Self {
        Self {
            index: RwLock::new(Arc::new(SearchIndex::empty(tuning))),
            ready: AtomicBool::new(false),
        }
    }

    fn replace(&self, index: SearchIndex) {
        *self.index.write() = Arc::new(index);
        self.ready.store(true, Ordering::SeqCst);
    }

    fn current(&self) -> Arc<SearchIndex> {
        self.index.read().clone()
    }
}

/// Per-session search state / 每个会话的搜索状态
pub struct SearchSession {
    network: ScopeState,
    personal: ScopeState,
    tuning: SearchTuning,
}

impl SearchSession {
    pub fn new(tuning: SearchTuning) -> Self {
        Self {
            network: ScopeState::new(tuning),
            personal: ScopeState::new(tuning),
            tuning,
        }
    }

    fn scope(&self, scope: SearchScope) -> &ScopeState {
        match scope {
            SearchScope::Network => &self.network,
            SearchScope::Personal => &self.personal,
        }
    }

    /// Whether the scope's index build has completed / 该范围的索引是否已构建完成
    pub fn is_ready(&self, scope: SearchScope) -> bool {
        self.scope(scope).ready.load(Ordering::SeqCst)
    }

    /// Fetch the directory snapshot and rebuild the network index
    /// 拉取目录快照并重建全网索引
    ///
    /// A reported upstream error or a missing payload degrades to an empty
    /// index: the scope stays queryable and simply answers with no results.
    /// The previous index keeps serving until the swap.
    pub async fn rebuild_network(&self, provider: &dyn DirectoryProvider) -> IndexStats {
        let directory = match provider.get_network_directory().await {
            Ok(envelope) => {
                if let Some(error) = envelope.error {
                    tracing::warn!(%error, "directory upstream reported an error, indexing empty snapshot");
                }
                envelope.data.unwrap_or_default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "directory fetch failed, indexing empty snapshot");
                Default::default()
            }
        };

        let index = SearchIndex::from_directory(&directory, self.tuning);
        let stats = index.stats();
        tracing::info!(
            documents = stats.document_count,
            tokens = stats.token_count,
            "network search index rebuilt"
        );
        self.network.replace(index);
        stats
    }

    /// Rebuild the personal index from the viewer's data / 从用户数据重建个人索引
    pub fn load_viewer(&self, viewer: &Viewer) -> IndexStats {
        let index = SearchIndex::from_viewer(viewer, self.tuning);
        let stats = index.stats();
        tracing::info!(
            viewer = %viewer.id,
            documents = stats.document_count,
            "personal search index rebuilt"
        );
        self.personal.replace(index);
        stats
    }

    /// Query a scope / 查询某一范围
    ///
    /// Before the first build completes this is a no-op returning an empty
    /// list, never an error.
    pub fn search(&self, scope: SearchScope, query: &str) -> Vec<QueryResult> {
        let state = self.scope(scope);
        if !state.ready.load(Ordering::SeqCst) {
            return Vec::new();
        }
        state.current().search(query)
    }

    pub fn stats(&self, scope: SearchScope) -> IndexStats {
        self.scope(scope).current().stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{DirectoryError, DirectoryResponse};
    use crate::models::{NetworkDirectory, User, UserData};
    use async_trait::async_trait;

    struct FixedProvider(DirectoryResponse);

    #[async_trait]
    impl DirectoryProvider for FixedProvider {
        async fn get_network_directory(&self) -> Result<DirectoryResponse, DirectoryError> {
            Ok(self.0.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl DirectoryProvider for FailingProvider {
        async fn get_network_directory(&self) -> Result<DirectoryResponse, DirectoryError> {
            Err(DirectoryError::Status(500))
        }
    }

    fn directory_with_ann() -> DirectoryResponse {
        DirectoryResponse {
            data: Some(NetworkDirectory {
                users: vec![User {
                    id: "1".to_string(),
                    username: Some("ann".to_string()),
                    data: UserData::default(),
                }],
                slates: vec![],
            }),
            error: None,
        }
    }

    #[test]
    fn test_query_before_ready_is_empty() {
        let session = SearchSession::new(SearchTuning::default());
        assert!(!session.is_ready(SearchScope::Network));
        assert!(session.search(SearchScope::Network, "ann").is_empty());
    }

    #[tokio::test]
    async fn test_rebuild_makes_scope_queryable() {
        let session = SearchSession::new(SearchTuning::default());
        let stats = session.rebuild_network(&FixedProvider(directory_with_ann())).await;
        assert_eq!(stats.document_count, 1);
        assert!(session.is_ready(SearchScope::Network));
        assert_eq!(session.search(SearchScope::Network, "ann").len(), 1);
        // The personal scope is untouched.
        assert!(!session.is_ready(SearchScope::Personal));
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades_to_empty_index() {
        let session = SearchSession::new(SearchTuning::default());
        let stats = session.rebuild_network(&FailingProvider).await;
        assert_eq!(stats.document_count, 0);
        assert!(session.is_ready(SearchScope::Network));
        assert!(session.search(SearchScope::Network, "anything").is_empty());
    }

    #[tokio::test]
    async fn test_upstream_error_envelope_degrades_to_empty_index() {
        let session = SearchSession::new(SearchTuning::default());
        let envelope = DirectoryResponse {
            data: None,
            error: Some("SERVER_ERROR".to_string()),
        };
        session.rebuild_network(&FixedProvider(envelope)).await;
        assert!(session.is_ready(SearchScope::Network));
        assert!(session.search(SearchScope::Network, "ann").is_empty());
    }

    #[tokio::test]
    async fn test_old_index_survives_until_swap() {
        let session = SearchSession::new(SearchTuning::default());
        session.rebuild_network(&FixedProvider(directory_with_ann())).await;

        // A reader holding the old index keeps its view across a rebuild.
        let before = session.scope(SearchScope::Network).current();
        session.rebuild_network(&FixedProvider(DirectoryResponse::default())).await;
        assert_eq!(before.search("ann").len(), 1);
        assert!(session.search(SearchScope::Network, "ann").is_empty());
    }
}
