//! 扫描与定义配置

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// 扫描配置
///
/// `dependencies` 是标识符到实现类型名称的映射，`ignore_annotations` 中的注解种类在收集时被丢弃。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// 显式依赖定义
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    /// 忽略的注解种类
    #[serde(default)]
    pub ignore_annotations: Vec<String>,
}

impl ScanConfig {
    /// 创建空配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加依赖定义
    pub fn with_dependency(
        mut self,
        identifier: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        self.dependencies.insert(identifier.into(), class.into());
        self
    }

    /// 添加忽略的注解种类
    pub fn with_ignored_annotation(mut self, kind: impl Into<String>) -> Self {
        self.ignore_annotations.push(kind.into());
        self
    }

    /// 是否忽略指定注解种类
    pub fn is_ignored(&self, kind: &str) -> bool {
        self.ignore_annotations.iter().any(|ignored| ignored == kind)
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(ConfigError::parse_error)
    }

    /// 从 JSON 文本解析
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(ConfigError::parse_error)
    }

    /// 从文件加载，按扩展名选择格式
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!("加载扫描配置文件: {}", path.display());
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}
