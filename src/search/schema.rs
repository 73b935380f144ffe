//! Search index schema definition / 搜索索引的 Schema 定义

use serde::{Deserialize, Serialize};

use crate::models::{Slate, SlateFile, User};

/// Document kind / 文档类别
///
/// `Unknown` absorbs kinds introduced by newer upstreams; the builder never
/// produces it, the classifier silently drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    User,
    Slate,
    File,
    #[serde(other)]
    Unknown,
}

/// Where a file document came from / 文件文档的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOrigin {
    /// Nested in a slate / 来自收藏集
    Slate,
    /// Personal library / 来自个人资料库
    Library,
}

/// A file flattened out of its container / 从容器中展开的文件
///
/// `index` is the file's position inside its container, required to open the
/// item viewer at the right slot after navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRef {
    pub file: SlateFile,
    pub index: usize,
    pub origin: FileOrigin,
    /// Originating slate; `None` for library files / 所属收藏集，资料库文件为 None
    #[serde(default)]
    pub slate: Option<Slate>,
}

/// Original entity payload carried through the index unmodified
/// 原始实体载荷，原样携带不参与分词
///
/// Externally tagged: `User` and `Slate` would be indistinguishable untagged,
/// both require only `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentData {
    File(FileRef),
    User(User),
    Slate(Slate),
}

/// The unit indexed and retrieved / 索引与检索的最小单元
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Globally unique across all kinds / 跨类别全局唯一
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub data: DocumentData,
}

impl Document {
    pub fn user(user: User) -> Self {
        Self {
            id: user.id.clone(),
            kind: DocumentKind::User,
            data: DocumentData::User(user),
        }
    }

    pub fn slate(slate: Slate) -> Self {
        Self {
            id: slate.id.clone(),
            kind: DocumentKind::Slate,
            data: DocumentData::Slate(slate),
        }
    }

    pub fn file(file: SlateFile, index: usize, origin: FileOrigin, slate: Option<Slate>) -> Self {
        Self {
            id: file.id.clone(),
            kind: DocumentKind::File,
            data: DocumentData::File(FileRef {
                file,
                index,
                origin,
                slate,
            }),
        }
    }

    /// Text fields to tokenize, fixed per kind / 每种类别固定的分词字段
    ///
    /// Missing nested fields are simply absent from the returned list; an
    /// entity with no usable text still becomes a (unsearchable) document.
    pub fn indexable_fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        match &self.data {
            DocumentData::User(user) => {
                if let Some(username) = user.username.as_deref() {
                    fields.push(username);
                }
                if let Some(name) = user.data.name.as_deref() {
                    fields.push(name);
                }
            }
            DocumentData::Slate(slate) => {
                if let Some(slatename) = slate.slatename.as_deref() {
                    fields.push(slatename);
                }
                if let Some(name) = slate.data.name.as_deref() {
                    fields.push(name);
                }
            }
            DocumentData::File(file_ref) => {
                if let Some(name) = file_ref.file.display_name() {
                    fields.push(name);
                }
            }
        }
        fields
    }
}

/// One ranked query match / 单条带序查询结果
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub document: Document,
    /// Relevance score / 相关性分数
    pub score: f32,
}

/// Index statistics / 索引统计
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    pub document_count: usize,
    pub token_count: usize,
    pub last_built: Option<i64>,
}

/// Engine tuning knobs, sourced from configuration / 引擎调优参数，来自配置
#[derive(Debug, Clone, Copy)]
pub struct SearchTuning {
    /// Fuzzy tolerance as a fraction of token length / 模糊容差（相对词元长度）
    pub fuzziness: f32,
    /// Cap on autosuggestion candidates / 补全候选数上限
    pub max_suggestions: usize,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            fuzziness: 0.15,
            max_suggestions: 10,
        }
    }
}
