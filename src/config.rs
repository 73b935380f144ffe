//! Application configuration module / 应用配置模块
//!
//! Manages application configuration loaded from config.json
//! Creates default config file on first run / 首次运行时创建默认配置文件

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Global configuration instance / 全局配置实例
static CONFIG: OnceCell<Arc<RwLock<AppConfig>>> = OnceCell::new();

/// Application configuration / 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration / 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// Directory upstream configuration / 目录上游配置
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// Search configuration / 搜索配置
    #[serde(default)]
    pub search: SearchConfig,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address / 服务器监听地址
    pub host: String,
    /// Server port / 服务器端口
    pub port: u16,
}

/// Directory upstream configuration / 目录上游配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Upstream URL returning the network directory snapshot / 返回全网目录快照的上游地址
    pub upstream_url: String,
    /// Request timeout in seconds / 请求超时（秒）
    pub timeout_secs: u64,
}

/// Search configuration / 搜索配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Fuzzy tolerance as a fraction of token length / 模糊容差（相对词元长度）
    pub fuzziness: f32,
    /// Maximum autosuggestion candidates per query / 每次查询的最大补全候选数
    pub max_suggestions: usize,
    /// Default result limit for the query endpoint / 查询接口的默认结果上限
    pub default_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            directory: DirectoryConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8280,
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            upstream_url: "http://127.0.0.1:1337/api/v1/get-network-directory".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fuzziness: 0.15,
            max_suggestions: 10,
            default_limit: 50,
        }
    }
}

impl From<&SearchConfig> for crate::search::SearchTuning {
    fn from(cfg: &SearchConfig) -> Self {
        Self {
            fuzziness: cfg.fuzziness,
            max_suggestions: cfg.max_suggestions,
        }
    }
}

/// Load configuration from file, creating defaults on first run
/// 从文件加载配置，首次运行时写入默认配置
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = std::env::var("SLATENET_CONFIG").unwrap_or_else(|_| "config.json".to_string());
    let config = load_from_path(Path::new(&path))?;

    CONFIG
        .set(Arc::new(RwLock::new(config.clone())))
        .map_err(|_| anyhow::anyhow!("configuration already initialized"))?;

    Ok(config)
}

fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    } else {
        let config = AppConfig::default();
        let content = serde_json::to_string_pretty(&config)?;
        std::fs::write(path, content)?;
        tracing::info!("Created default configuration at {:?}", path);
        Ok(config)
    }
}

/// Get the global configuration / 获取全局配置
pub fn get_config() -> AppConfig {
    CONFIG
        .get()
        .map(|c| c.read().clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.server.port, 8280);
        assert!((parsed.search.fuzziness - 0.15).abs() < f32::EPSILON);
        assert_eq!(parsed.search.max_suggestions, 10);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = serde_json::from_str(r#"{"server":{"host":"127.0.0.1","port":9000}}"#).unwrap();
        assert_eq!(parsed.server.host, "127.0.0.1");
        assert_eq!(parsed.directory.timeout_secs, 30);
        assert_eq!(parsed.search.default_limit, 50);
    }
}
