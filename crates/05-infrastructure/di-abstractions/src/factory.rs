//! 工厂引用
//!
//! 工厂定义只记录"用什么构建"，真正的调用由下游实例化阶段完成。

use infrastructure_common::DependencyError;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 工厂回调函数类型
///
/// 参数是已经解析好的依赖实例，返回构建出的实例。
pub type FactoryCallable = Arc<
    dyn Fn(Vec<Arc<dyn Any + Send + Sync>>) -> Result<Arc<dyn Any + Send + Sync>, DependencyError>
        + Send
        + Sync,
>;

/// 工厂来源
#[derive(Clone)]
pub enum Factory {
    /// 可调用类型（存在调用运算符的类型）
    Class(String),
    /// 回调函数
    Callable(FactoryCallable),
}

impl Factory {
    /// 包装回调函数
    pub fn callable<F>(factory_fn: F) -> Self
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

    /// 可调用类型的名称
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Class(name) => Some(name),
            Self::Callable(_) => None,
        }
    }

    /// 是否为回调函数
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => f.debug_tuple("Class").field(name).finish(),
            Self::Callable(_) => f.debug_tuple("Callable").field(&"<function>").finish(),
        }
    }
}

impl PartialEq for Factory {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Class(a), Self::Class(b)) => a == b,
            (Self::Callable(a), Self::Callable(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
