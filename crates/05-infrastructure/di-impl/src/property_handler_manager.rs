//! 属性处理器管理器
//!
//! 显式构造并传给自动装配器的处理器注册表，不使用进程级全局表。

use di_abstractions::{ObjectDefinition, PropertyHandler, PropertyHandlerRegistry};
use infrastructure_common::MetadataValue;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 属性处理器管理器
#[derive(Default)]
pub struct PropertyHandlerManager {
    container: RwLock<HashMap<String, Vec<PropertyHandler>>>,
}

impl PropertyHandlerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册处理器，同一种类的处理器按注册顺序调用
    pub fn register<F>(&self, kind: impl Into<String>, handler: F) -> &Self
    where
        F: Fn(&mut ObjectDefinition, &str, &MetadataValue) + Send + Sync + 'static,
    {
        self.register_handler(kind, Arc::new(handler))
    }

    /// 注册已包装的处理器
    pub fn register_handler(&self, kind: impl Into<String>, handler: PropertyHandler) -> &Self {
        let kind = kind.into();
        debug!("注册属性处理器: {}", kind);
        self.container.write().entry(kind).or_default().push(handler);
        self
    }

    /// 是否存在指定种类的处理器
    pub fn has(&self, kind: &str) -> bool {
        self.container
            .read()
            .get(kind)
            .is_some_and(|handlers| !handlers.is_empty())
    }

    /// 清空全部处理器
    pub fn clear(&self) {
        self.container.write().clear();
    }
}

impl PropertyHandlerRegistry for PropertyHandlerManager {
    fn all(&self) -> HashMap<String, Vec<PropertyHandler>> {
        self.container.read().clone()
    }

    fn get(&self, kind: &str) -> Vec<PropertyHandler> {
        self.container.read().get(kind).cloned().unwrap_or_default()
    }
}

impl fmt::Debug for PropertyHandlerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let container = self.container.read();
        let mut kinds: Vec<_> = container
            .iter()
            .map(|(kind, handlers)| (kind.clone(), handlers.len()))
            .collect();
        kinds.sort();
        f.debug_struct("PropertyHandlerManager")
            .field("handlers", &kinds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use di_abstractions::{PropertyInjection, Reference};

    #[test]
    fn test_register_and_get() {
        let manager = PropertyHandlerManager::new();
        assert!(!manager.has("Value"));

        manager
            .register("Value", |_, _, _| {})
            .register("Value", |_, _, _| {})
            .register("Lazy", |_, _, _| {});

        assert!(manager.has("Value"));
        assert_eq!(manager.get("Value").len(), 2);
        assert_eq!(manager.all().len(), 2);
        assert!(manager.get("Missing").is_empty());

        manager.clear();
        assert!(!manager.has("Value"));
    }

    #[test]
    fn test_handler_mutates_definition() {
        let manager = PropertyHandlerManager::new();
        manager.register("Lazy", |definition, property, value| {
            let target = value.as_str().unwrap_or_default();
            definition.add_property_injection(PropertyInjection::new(
                property,
                Reference::new(format!("LazyProxy<{target}>")),
            ));
        });

        let mut definition = ObjectDefinition::new("Service");
        for handler in manager.get("Lazy") {
            handler(&mut definition, "repository", &MetadataValue::from("Repository"));
        }

        assert_eq!(
            definition
                .property_injection("repository")
                .unwrap()
                .value
                .target_entry_name(),
            "LazyProxy<Repository>"
        );
    }
}
