//! 反射管理器
//!
//! 基于注册表的 [`TypeIntrospector`] 实现：类型信息由派生宏或手工注册提供。

use di_abstractions::TypeIntrospector;
use infrastructure_common::{registered_classes, ClassInfo, ClassKind, Reflectable};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// 反射管理器
#[derive(Debug, Default)]
pub struct ReflectionManager {
    classes: RwLock<HashMap<String, Arc<ClassInfo>>>,
}

impl ReflectionManager {
    /// 创建空的反射管理器
    pub fn new() -> Self {
        Self::default()
    }

    /// 从全局类型注册表创建
    pub fn from_global() -> Self {
        let manager = Self::new();
        let descriptors = registered_classes();
        debug!("从全局注册表加载 {} 个类型", descriptors.len());
        for descriptor in descriptors {
            manager.register(descriptor.info);
        }
        manager
    }

    /// 注册类型信息，同名类型被覆盖
    pub fn register(&self, info: ClassInfo) -> &Self {
        trace!("注册类型反射信息: {} ({:?})", info.name, info.kind);
        self.classes.write().insert(info.name.clone(), Arc::new(info));
        self
    }

    /// 注册可反射类型
    pub fn register_type<T: Reflectable>(&self) -> &Self {
        self.register(T::class_info())
    }

    /// 全部已注册的类型
    pub fn get_all(&self) -> Vec<Arc<ClassInfo>> {
        self.classes.read().values().cloned().collect()
    }

    /// 已注册类型数量
    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }

    /// 清空全部类型
    pub fn clear(&self) {
        self.classes.write().clear();
    }

    fn kind_of(&self, name: &str) -> Option<ClassKind> {
        self.classes.read().get(name).map(|class| class.kind)
    }
}

impl TypeIntrospector for ReflectionManager {
    fn class_exists(&self, name: &str) -> bool {
        self.kind_of(name) == Some(ClassKind::Class)
    }

    fn interface_exists(&self, name: &str) -> bool {
        self.kind_of(name) == Some(ClassKind::Interface)
    }

    fn reflect_class(&self, name: &str) -> Option<Arc<ClassInfo>> {
        self.classes.read().get(name).cloned()
    }
}
