//! 属性处理器注册表接口
//!
//! 自动装配遇到属性上的注解时，按注解种类调用已注册的处理器，
//! 外部扩展借此修改正在构建的定义。

use crate::definition::ObjectDefinition;
use infrastructure_common::MetadataValue;
use std::collections::HashMap;
use std::sync::Arc;

/// 属性处理器
///
/// 参数依次为正在构建的定义、属性名称、注解值。
pub type PropertyHandler = Arc<dyn Fn(&mut ObjectDefinition, &str, &MetadataValue) + Send + Sync>;

/// 属性处理器注册表 trait
pub trait PropertyHandlerRegistry: Send + Sync {
    /// 全部处理器，按注解种类分组
    fn all(&self) -> HashMap<String, Vec<PropertyHandler>>;

    /// 指定注解种类的处理器
    fn get(&self, kind: &str) -> Vec<PropertyHandler> {
        self.all().remove(kind).unwrap_or_default()
    }
}

impl<T: PropertyHandlerRegistry + ?Sized> PropertyHandlerRegistry for Arc<T> {
    fn all(&self) -> HashMap<String, Vec<PropertyHandler>> {
        (**self).all()
    }

    fn get(&self, kind: &str) -> Vec<PropertyHandler> {
        (**self).get(kind)
    }
}
