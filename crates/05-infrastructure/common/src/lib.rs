//! # Infrastructure Common
//!
//! 这个 crate 提供了依赖注入定义解析所共享的数据模型。
//!
//! ## 核心类型
//!
//! - [`ClassInfo`] - 类型反射信息（构造函数、参数、可调用性）
//! - [`ClassAnnotations`] - 按类型收集的声明式元数据
//! - [`Reflectable`] - 由 `#[derive(Injectable)]` 实现的编译期反射接口
//! - [`ScanConfig`] - 扫描与显式依赖配置
//!
//! ## 全局类型注册表
//!
//! 派生宏在程序启动时把类型描述写入进程级注册表，
//! 反射管理器和注解收集器可以从中读取快照。

pub mod annotations;
pub mod configuration;
pub mod errors;
pub mod metadata;
pub mod reflect;

pub use annotations::*;
pub use configuration::*;
pub use errors::*;
pub use metadata::*;
pub use reflect::*;

use std::collections::BTreeMap;

/// 全局类型注册表
static GLOBAL_CLASS_REGISTRY: once_cell::sync::Lazy<
    parking_lot::RwLock<BTreeMap<String, ClassDescriptor>>,
> = once_cell::sync::Lazy::new(|| parking_lot::RwLock::new(BTreeMap::new()));

/// 注册可反射类型到全局注册表
pub fn register_class<T: Reflectable>() {
    register_class_descriptor(ClassDescriptor::of::<T>());
}

/// 注册类型描述到全局注册表，同名类型被覆盖
///
/// 返回被覆盖的旧描述。不同模块中的同名类型注册到同一个名称下，内容不同时记录警告。
pub fn register_class_descriptor(descriptor: ClassDescriptor) -> Option<ClassDescriptor> {
    tracing::trace!("注册类型描述: {}", descriptor.name());
    let replaced = GLOBAL_CLASS_REGISTRY
        .write()
        .insert(descriptor.name().to_string(), descriptor.clone());
    if let Some(previous) = &replaced {
        if previous != &descriptor {
            tracing::warn!("类型名称冲突，已有的类型描述被覆盖: {}", descriptor.name());
        }
    }
    replaced
}

/// 获取全局注册表中的类型描述
pub fn get_registered_class(name: &str) -> Option<ClassDescriptor> {
    GLOBAL_CLASS_REGISTRY.read().get(name).cloned()
}

/// 获取全局注册表中的全部类型描述（按名称排序）
pub fn registered_classes() -> Vec<ClassDescriptor> {
    GLOBAL_CLASS_REGISTRY.read().values().cloned().collect()
}
