//! 编译期反射接口
//!
//! Rust 没有运行时反射，类型信息由 `#[derive(Injectable)]` 在编译期生成。

use crate::{ClassAnnotations, ClassInfo};

/// 可反射类型 trait
pub trait Reflectable: 'static {
    /// 类型反射信息
    fn class_info() -> ClassInfo;

    /// 类型上收集到的注解
    fn annotations() -> ClassAnnotations {
        ClassAnnotations::default()
    }
}

/// 注册表中的类型描述
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDescriptor {
    /// 反射信息
    pub info: ClassInfo,
    /// 注解
    pub annotations: ClassAnnotations,
}

impl ClassDescriptor {
    /// 从可反射类型创建描述
    pub fn of<T: Reflectable>() -> Self {
        Self {
            info: T::class_info(),
            annotations: T::annotations(),
        }
    }

    /// 类型名称
    pub fn name(&self) -> &str {
        &self.info.name
    }
}
