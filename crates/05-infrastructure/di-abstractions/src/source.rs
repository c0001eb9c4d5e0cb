//! 定义源接口与原始定义

use crate::definition::Definition;
use crate::factory::{Factory, FactoryCallable};
use infrastructure_common::{DependencyError, MetadataValue};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 用户提供的原始定义
///
/// 字符串被视为类型名称，回调被视为工厂，其余形状无法归一化。
#[derive(Clone)]
pub enum RawDefinition {
    /// 类型名称
    ClassName(String),
    /// 工厂回调
    Callable(FactoryCallable),
    /// 其它任意值（数组、数字等）
    Other(MetadataValue),
}

impl RawDefinition {
    /// 以回调函数作为原始定义
    pub fn factory<F>(factory_fn: F) -> Self
    where
        F: Fn(
                Vec<Arc<dyn Any + Send + Sync>>,
            ) -> Result<Arc<dyn Any + Send + Sync>, DependencyError>
            + Send
            + Sync
            + 'static,
    {
        Self::Callable(Arc::new(factory_fn))
    }
}

impl From<&str> for RawDefinition {
    fn from(class_name: &str) -> Self {
        Self::ClassName(class_name.to_string())
    }
}

impl From<String> for RawDefinition {
    fn from(class_name: String) -> Self {
        Self::ClassName(class_name)
    }
}

impl From<MetadataValue> for RawDefinition {
    fn from(value: MetadataValue) -> Self {
        match value {
            MetadataValue::String(class_name) => Self::ClassName(class_name),
            other => Self::Other(other),
        }
    }
}

impl From<Factory> for RawDefinition {
    fn from(factory: Factory) -> Self {
        match factory {
            Factory::Class(class_name) => Self::ClassName(class_name),
            Factory::Callable(callable) => Self::Callable(callable),
        }
    }
}

impl fmt::Debug for RawDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClassName(name) => f.debug_tuple("ClassName").field(name).finish(),
            Self::Callable(_) => f.debug_tuple("Callable").field(&"<function>").finish(),
            Self::Other(value) => f.debug_tuple("Other").field(value).finish(),
        }
    }
}

/// 定义源 trait
///
/// 标识符到定义的唯一映射，使用方只通过它查询定义。
pub trait DefinitionSourceInterface: Send + Sync {
    /// 获取标识符的定义，缓存未命中时尝试自动装配
    fn get_definition(&self, name: &str) -> Option<Arc<Definition>>;

    /// 当前全部定义，按插入顺序
    fn get_definitions(&self) -> Vec<(String, Arc<Definition>)>;

    /// 归一化并写入原始定义，覆盖已有条目
    fn add_definition(&self, name: String, definition: RawDefinition) -> &Self
    where
        Self: Sized;

    /// 清空全部定义
    fn clear_definitions(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_values_classify() {
        assert!(matches!(
            RawDefinition::from(json!("app::Logger")),
            RawDefinition::ClassName(name) if name == "app::Logger"
        ));
        assert!(matches!(RawDefinition::from(json!(["a", "b"])), RawDefinition::Other(_)));
        assert!(matches!(RawDefinition::from(json!(42)), RawDefinition::Other(_)));
    }

    #[test]
    fn test_factory_converts_back() {
        let raw: RawDefinition = Factory::Class("Clock".to_string()).into();
        assert!(matches!(raw, RawDefinition::ClassName(name) if name == "Clock"));
        assert_eq!(format!("{:?}", RawDefinition::factory(|_| {
            Ok(Arc::new(()) as Arc<dyn Any + Send + Sync>)
        })), "Callable(\"<function>\")");
    }
}
