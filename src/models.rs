use serde::{Deserialize, Serialize};

/// User entity as delivered by the directory upstream / 目录上游返回的用户实体
///
/// Every nested field is optional: upstream records are user supplied and
/// frequently incomplete, and an incomplete record must still be indexable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub data: UserData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserData {
    /// Display name / 显示名称
    #[serde(default)]
    pub name: Option<String>,
    /// Profile photo URL / 头像地址
    #[serde(default)]
    pub photo: Option<String>,
}

/// Slate entity (a named collection of files) / 收藏集实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slate {
    pub id: String,
    #[serde(default)]
    pub slatename: Option<String>,
    #[serde(default)]
    pub data: SlateData,
    #[serde(default)]
    pub owner: Option<User>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlateData {
    #[serde(default)]
    pub name: Option<String>,
    /// Files contained in this slate, in display order / 收藏集内的文件，按展示顺序
    #[serde(default)]
    pub objects: Vec<SlateFile>,
}

/// A file object, either nested in a slate or in a personal library / 文件对象
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlateFile {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl SlateFile {
    /// Best displayable / indexable name for the file / 文件的最佳可索引名称
    pub fn display_name(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }
}

/// Full network directory payload / 全网目录快照载荷
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkDirectory {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub slates: Vec<Slate>,
}

/// Trust relation between two users / 用户间的信任关系
///
/// Pending relations carry the counterpart in `owner`, accepted ones in `user`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trust {
    #[serde(default)]
    pub owner: Option<User>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Subscription to another user's activity / 对其他用户的订阅
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub target_user_id: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// The signed-in viewer's own data, used for the personal search scope
/// 当前登录用户自己的数据，用于个人搜索范围
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewer {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub data: UserData,
    /// Personal library files, in display order / 个人资料库文件，按展示顺序
    #[serde(default)]
    pub library: Vec<SlateFile>,
    #[serde(default)]
    pub slates: Vec<Slate>,
    #[serde(default)]
    pub pending_trusted: Vec<Trust>,
    #[serde(default)]
    pub trusted: Vec<Trust>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl Viewer {
    /// The viewer as a plain user record (used as slate owner) / 以普通用户记录表示
    pub fn as_user(&self) -> User {
        User {
            id: self.id.clone(),
            username: self.username.clone(),
            data: self.data.clone(),
        }
    }
}
