//! Search engine - in-memory full-text search implementation / 搜索引擎
//!
//! Build-once read-many inverted index over directory documents / 一次构建多次读取的倒排索引
//! - build: flatten a snapshot into documents and index them / 将快照展平为文档并建立索引
//! - search: fuzzy primary match + autosuggestion expansion / 模糊主匹配加补全扩展
//! - auto_suggest: prefix completions over indexed tokens / 基于已索引词元的前缀补全
//!
//! The index is immutable after construction; replacement happens wholesale at
//! the session layer by swapping the whole structure.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{NetworkDirectory, Viewer};

use super::schema::{Document, FileOrigin, IndexStats, QueryResult, SearchTuning};
use super::tokenizer::{tokenize, tokenize_query};

/// Secondary-query weight relative to an exact token match / 次级匹配相对精确匹配的权重
const FUZZY_WEIGHT: f32 = 0.45;

/// A ranked query completion / 带序的查询补全
#[derive(Debug, Clone)]
pub struct Suggestion {
    pub suggestion: String,
    pub score: f32,
}

/// In-memory inverted index / 内存倒排索引
///
/// Documents are stored in insertion order; ordinals double as the
/// deterministic tie-breaker when scores are equal.
pub struct SearchIndex {
    /// Document storage, insertion order / 文档存储，按插入顺序
    documents: Vec<Document>,
    /// id -> ordinal, enforces global id uniqueness / id到序号映射，保证全局唯一
    ids: HashMap<String, usize>,
    /// token -> sorted document ordinals / 词元到文档序号
    ///
    /// BTreeMap keeps terms ordered, which gives both deterministic iteration
    /// and cheap prefix scans for autosuggestion.
    postings: BTreeMap<String, Vec<usize>>,
    tuning: SearchTuning,
    stats: IndexStats,
}

impl SearchIndex {
    /// Empty index; still answers queries (with no results) / 空索引，查询返回空
    pub fn empty(tuning: SearchTuning) -> Self {
        Self {
            documents: Vec::new(),
            ids: HashMap::new(),
            postings: BTreeMap::new(),
            tuning,
            stats: IndexStats::default(),
        }
    }

    /// Bulk-build from pre-flattened documents / 从已展平的文档批量构建
    ///
    /// Duplicate ids are dropped (first insertion wins) so the index never
    /// holds two documents with the same id.
    pub fn from_documents(docs: Vec<Document>, tuning: SearchTuning) -> Self {
        let mut index = Self::empty(tuning);
        for doc in docs {
            index.insert(doc);
        }
        index.stats.document_count = index.documents.len();
        index.stats.token_count = index.postings.len();
        index.stats.last_built = Some(chrono::Utc::now().timestamp());
        index
    }

    /// Build from a network directory snapshot / 从全网目录快照构建
    ///
    /// Insertion order is users, slates, then flattened slate files. The order
    /// carries no ranking meaning but keeps rebuilds reproducible.
    pub fn from_directory(directory: &NetworkDirectory, tuning: SearchTuning) -> Self {
        let mut docs: Vec<Document> = Vec::new();
        for user in &directory.users {
            docs.push(Document::user(user.clone()));
        }
        for slate in &directory.slates {
            docs.push(Document::slate(slate.clone()));
        }
        for slate in &directory.slates {
            for (i, file) in slate.data.objects.iter().enumerate() {
                docs.push(Document::file(
                    file.clone(),
                    i,
                    FileOrigin::Slate,
                    Some(slate.clone()),
                ));
            }
        }
        Self::from_documents(docs, tuning)
    }

    /// Build the personal scope from the viewer's own data / 从当前用户数据构建个人索引
    ///
    /// Users are merged from pending-trusted, trusted, and subscriptions in
    /// that order; later lists only contribute users not already present.
    pub fn from_viewer(viewer: &Viewer, tuning: SearchTuning) -> Self {
        let mut docs: Vec<Document> = Vec::new();

        for slate in &viewer.slates {
            let mut slate = slate.clone();
            slate.owner = Some(viewer.as_user());
            docs.push(Document::slate(slate));
        }

        let mut user_ids: HashSet<String> = HashSet::new();
        for trust in &viewer.pending_trusted {
            if let Some(owner) = &trust.owner {
                if user_ids.insert(owner.id.clone()) {
                    docs.push(Document::user(owner.clone()));
                }
            }
        }
        for trust in &viewer.trusted {
            if let Some(user) = &trust.user {
                if user_ids.insert(user.id.clone()) {
                    docs.push(Document::user(user.clone()));
                }
            }
        }
        for sub in &viewer.subscriptions {
            if sub.target_user_id.is_none() {
                continue;
            }
            if let Some(user) = &sub.user {
                if user_ids.insert(user.id.clone()) {
                    docs.push(Document::user(user.clone()));
                }
            }
        }

        for (i, file) in viewer.library.iter().enumerate() {
            docs.push(Document::file(file.clone(), i, FileOrigin::Library, None));
        }

        Self::from_documents(docs, tuning)
    }

    /// Get index statistics / 获取索引统计信息
    pub fn stats(&self) -> IndexStats {
        self.stats.clone()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn insert(&mut self, doc: Document) {
        if self.ids.contains_key(&doc.id) {
            tracing::debug!(id = %doc.id, "skipping duplicate document id");
            return;
        }
        let ordinal = self.documents.len();
        self.ids.insert(doc.id.clone(), ordinal);

        for field in doc.indexable_fields() {
            for token in tokenize(field) {
                let docs = self.postings.entry(token).or_default();
                // One posting per (token, document) even if the token repeats
                if docs.last() != Some(&ordinal) {
                    docs.push(ordinal);
                }
            }
        }
        self.documents.push(doc);
    }

    /// Search with fuzzy matching and autosuggestion expansion / 模糊搜索加补全扩展
    ///
    /// Primary matches come first in relevance order. Each autosuggestion
    /// candidate is then re-searched and its single top hit appended when its
    /// id has not been produced yet. Expansion never reorders primary results.
    pub fn search(&self, query: &str) -> Vec<QueryResult> {
        let tokens = tokenize_query(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut results = self.match_tokens(&tokens);
        let mut seen: HashSet<String> = results.iter().map(|r| r.document.id.clone()).collect();

        for candidate in self.auto_suggest(query) {
            let candidate_tokens = tokenize_query(&candidate.suggestion);
            if let Some(top) = self.match_tokens(&candidate_tokens).into_iter().next() {
                if seen.insert(top.document.id.clone()) {
                    results.push(top);
                }
            }
        }

        results
    }

    /// One full scoring pass over the index / 对索引的一次完整打分
    fn match_tokens(&self, tokens: &[String]) -> Vec<QueryResult> {
        let mut scores: HashMap<usize, f32> = HashMap::new();

        for token in tokens {
            if let Some(docs) = self.postings.get(token) {
                for &ordinal in docs {
                    *scores.entry(ordinal).or_default() += 1.0;
                }
            }

            let max_distance = self.max_edit_distance(token);
            if max_distance == 0 {
                continue;
            }
            let token_len = token.chars().count();
            for (term, docs) in &self.postings {
                if term == token {
                    continue;
                }
                if term.chars().count().abs_diff(token_len) > max_distance {
                    continue;
                }
                let distance = levenshtein_distance(token, term);
                if distance <= max_distance {
                    let weight = FUZZY_WEIGHT / distance as f32;
                    for &ordinal in docs {
                        *scores.entry(ordinal).or_default() += weight;
                    }
                }
            }
        }

        let mut hits: Vec<(usize, f32)> = scores.into_iter().collect();
        // Score descending, insertion ordinal as the deterministic tie-breaker
        hits.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        hits.into_iter()
            .map(|(ordinal, score)| QueryResult {
                document: self.documents[ordinal].clone(),
                score,
            })
            .collect()
    }

    /// Ranked completions for the query's last token / 针对末位词元的带序补全
    ///
    /// Candidates are indexed terms that either extend the last token as a
    /// prefix or sit within the fuzzy tolerance of it, scored by how many
    /// documents carry the term. Earlier query tokens are preserved verbatim
    /// in the returned suggestion text.
    pub fn auto_suggest(&self, query: &str) -> Vec<Suggestion> {
        let tokens = tokenize_query(query);
        let Some(last) = tokens.last() else {
            return Vec::new();
        };
        let prefix_tokens = &tokens[..tokens.len() - 1];

        let mut candidates: HashMap<&str, f32> = HashMap::new();

        for (term, docs) in self.postings.range::<str, _>((
            std::ops::Bound::Included(last.as_str()),
            std::ops::Bound::Unbounded,
        )) {
            if !term.starts_with(last.as_str()) {
                break;
            }
            candidates.insert(term.as_str(), docs.len() as f32);
        }

        let max_distance = self.max_edit_distance(last);
        if max_distance > 0 {
            let last_len = last.chars().count();
            for (term, docs) in &self.postings {
                if candidates.contains_key(term.as_str()) {
                    continue;
                }
                if term.chars().count().abs_diff(last_len) > max_distance {
                    continue;
                }
                let distance = levenshtein_distance(last, term);
                if distance > 0 && distance <= max_distance {
                    candidates.insert(term.as_str(), docs.len() as f32 * FUZZY_WEIGHT);
                }
            }
        }

        let mut suggestions: Vec<Suggestion> = candidates
            .into_iter()
            .map(|(term, score)| {
                let suggestion = if prefix_tokens.is_empty() {
                    term.to_string()
                } else {
                    format!("{} {}", prefix_tokens.join(" "), term)
                };
                Suggestion { suggestion, score }
            })
            .collect();

        // Score descending, then lexicographic for reproducible order
        suggestions.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.suggestion.cmp(&b.suggestion))
        });
        suggestions.truncate(self.tuning.max_suggestions);
        suggestions
    }

    /// Maximum tolerated edit distance for a token / 单个词元允许的最大编辑距离
    fn max_edit_distance(&self, token: &str) -> usize {
        (self.tuning.fuzziness * token.chars().count() as f32).round() as usize
    }
}

/// Levenshtein edit distance / 编辑距离
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0usize; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[len1][len2]
}
