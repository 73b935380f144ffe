//! Search module - directory indexing and fuzzy querying / 搜索模块
//!
//! Architecture principles / 架构原则：
//! - The engine only exposes primitive operations: build, search, auto_suggest
//! - The session owns the index lifecycle (build once, swap wholesale)
//! - Handlers stay thin; call direction is API → session → engine
//!
//! Index features / 索引特性：
//! - In-memory inverted index rebuilt per snapshot fetch, never persisted
//! - Typo-tolerant matching (edit distance as a fraction of token length)
//! - Autosuggestion-based query expansion with duplicate suppression

pub mod classify;
pub mod engine;
pub mod schema;
pub mod session;
pub mod tokenizer;

pub use classify::{classify, selection_events, NavigateValue, ResultKind, SelectionEvent, TypedResult};
pub use engine::{SearchIndex, Suggestion};
pub use schema::{
    Document, DocumentData, DocumentKind, FileOrigin, FileRef, IndexStats, QueryResult,
    SearchTuning,
};
pub use session::{SearchScope, SearchSession};
