//! 配置文件的定义
//!
//! 所有字段都是可选的，缺省时使用各模块中的默认值。配置以 YAML 格式保存，例如：
//!
//! ```yaml
//! version: "0.1"
//! whale:
//!   population: 30
//!   iterations: 100
//!   seed: 42
//! server:
//!   port: 5000
//! ```

use crate::optimizers::whale::WhaleOptimization;
use crate::Error;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fs::read_to_string;
use std::path::Path;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_CITIES: usize = 100;

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
    /// 单次请求允许的最多城市数
    pub max_cities: Option<usize>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub version: Option<String>,
    pub whale: Option<WhaleOptimization>,
    pub server: Option<ServerConfig>,
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self, Error> {
        serde_yaml::from_str(content).map_err(|e| format!("配置解析错误: {e}").into())
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = read_to_string(path)
            .map_err(|e| format!("无法读取配置文件 {}: {e}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn whale(&self) -> WhaleOptimization {
        self.whale.clone().unwrap_or_default()
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|server| server.port)
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn max_cities(&self) -> usize {
        self.server
            .as_ref()
            .and_then(|server| server.max_cities)
            .unwrap_or(DEFAULT_MAX_CITIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.port(), DEFAULT_PORT);
        assert_eq!(config.max_cities(), DEFAULT_MAX_CITIES);
        assert!(config.whale().seed.is_none());
    }

    #[test]
    fn reads_nested_sections() {
        let config = Config::from_yaml(
            "whale:\n  population: 8\n  iterations: 20\n  seed: 1\nserver:\n  port: 8080\n",
        )
        .unwrap();
        let whale = config.whale();
        assert_eq!(whale.population, Some(8));
        assert_eq!(whale.iterations, Some(20));
        assert_eq!(whale.seed, Some(1));
        assert_eq!(config.port(), 8080);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(Config::from_yaml("whale: [").is_err());
    }
}
