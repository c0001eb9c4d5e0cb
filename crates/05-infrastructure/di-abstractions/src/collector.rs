//! 注解元数据收集器接口

use infrastructure_common::ClassAnnotations;
use std::sync::Arc;

/// 元数据收集器 trait
///
/// 由外部扫描器提前填充，按类型名称返回收集到的注解。
pub trait MetadataCollector: Send + Sync {
    /// 获取类型的注解，未收集过的类型返回 `None`
    fn get(&self, class: &str) -> Option<ClassAnnotations>;
}

impl<T: MetadataCollector + ?Sized> MetadataCollector for Arc<T> {
    fn get(&self, class: &str) -> Option<ClassAnnotations> {
        (**self).get(class)
    }
}
