//! 注解收集器
//!
//! 内存中的 [`MetadataCollector`] 实现，按类型保存类、方法、属性三类注解。

use di_abstractions::MetadataCollector;
use infrastructure_common::{registered_classes, ClassAnnotations, MetadataValue, Reflectable};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// 注解收集器
#[derive(Debug, Default)]
pub struct AnnotationCollector {
    container: RwLock<HashMap<String, ClassAnnotations>>,
    ignored: HashSet<String>,
}

impl AnnotationCollector {
    /// 创建空的收集器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置收集时忽略的注解种类
    pub fn with_ignored<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(kinds.into_iter().map(Into::into));
        self
    }

    /// 从全局类型注册表收集
    pub fn from_global() -> Self {
        let collector = Self::new();
        collector.collect_global();
        collector
    }

    /// 收集全局类型注册表中的全部注解
    pub fn collect_global(&self) {
        let descriptors = registered_classes();
        debug!("从全局注册表收集 {} 个类型的注解", descriptors.len());
        for descriptor in descriptors {
            self.collect_annotations(&descriptor.info.name, descriptor.annotations);
        }
    }

    /// 收集可反射类型的注解
    pub fn collect<T: Reflectable>(&self) {
        self.collect_annotations(&T::class_info().name, T::annotations());
    }

    /// 合并一个类型的全部注解
    pub fn collect_annotations(&self, class: &str, annotations: ClassAnnotations) {
        let mut filtered = ClassAnnotations::new();
        for annotation in annotations.class {
            if !self.is_ignored(&annotation.kind) {
                filtered.add_class_annotation(annotation.kind, annotation.value);
            }
        }
        for method in annotations.methods {
            for annotation in method.annotations {
                if !self.is_ignored(&annotation.kind) {
                    filtered.add_method_annotation(&method.name, annotation.kind, annotation.value);
                }
            }
        }
        for property in annotations.properties {
            for annotation in property.annotations {
                if !self.is_ignored(&annotation.kind) {
                    filtered.add_property_annotation(
                        &property.name,
                        annotation.kind,
                        annotation.value,
                    );
                }
            }
        }

        if filtered.is_empty() {
            return;
        }
        self.container
            .write()
            .entry(class.to_string())
            .or_default()
            .merge(filtered);
    }

    /// 收集类注解
    pub fn collect_class(&self, class: &str, kind: &str, value: impl Into<MetadataValue>) {
        if self.is_ignored(kind) {
            trace!("忽略类注解: {}::{}", class, kind);
            return;
        }
        self.container
            .write()
            .entry(class.to_string())
            .or_default()
            .add_class_annotation(kind, value);
    }

    /// 收集方法注解
    pub fn collect_method(
        &self,
        class: &str,
        method: &str,
        kind: &str,
        value: impl Into<MetadataValue>,
    ) {
        if self.is_ignored(kind) {
            trace!("忽略方法注解: {}::{}() {}", class, method, kind);
            return;
        }
        self.container
            .write()
            .entry(class.to_string())
            .or_default()
            .add_method_annotation(method, kind, value);
    }

    /// 收集属性注解
    pub fn collect_property(
        &self,
        class: &str,
        property: &str,
        kind: &str,
        value: impl Into<MetadataValue>,
    ) {
        if self.is_ignored(kind) {
            trace!("忽略属性注解: {}.{} {}", class, property, kind);
            return;
        }
        self.container
            .write()
            .entry(class.to_string())
            .or_default()
            .add_property_annotation(property, kind, value);
    }

    /// 获取类注解
    pub fn get_class_annotation(&self, class: &str, kind: &str) -> Option<MetadataValue> {
        self.container
            .read()
            .get(class)
            .and_then(|annotations| annotations.class_annotation(kind).cloned())
    }

    /// 获取属性注解
    pub fn get_property_annotation(
        &self,
        class: &str,
        property: &str,
        kind: &str,
    ) -> Option<MetadataValue> {
        self.container
            .read()
            .get(class)
            .and_then(|annotations| annotations.property(property))
            .and_then(|property| property.get(kind).cloned())
    }

    /// 带有指定类注解的全部类型
    pub fn get_classes_by_annotation(&self, kind: &str) -> Vec<(String, MetadataValue)> {
        let mut classes: Vec<_> = self
            .container
            .read()
            .iter()
            .filter_map(|(class, annotations)| {
                annotations
                    .class_annotation(kind)
                    .map(|value| (class.clone(), value.clone()))
            })
            .collect();
        classes.sort_by(|a, b| a.0.cmp(&b.0));
        classes
    }

    /// 带有指定属性注解的全部 (类型, 属性, 值)
    pub fn get_properties_by_annotation(&self, kind: &str) -> Vec<(String, String, MetadataValue)> {
        let container = self.container.read();
        let mut properties = Vec::new();
        for (class, annotations) in container.iter() {
            for property in &annotations.properties {
                if let Some(value) = property.get(kind) {
                    properties.push((class.clone(), property.name.clone(), value.clone()));
                }
            }
        }
        properties.sort_by(|a, b| a.0.cmp(&b.0));
        properties
    }

    /// 清除注解；指定类型时只清除该类型
    pub fn clear(&self, class: Option<&str>) {
        let mut container = self.container.write();
        match class {
            Some(class) => {
                container.remove(class);
            }
            None => container.clear(),
        }
    }

    fn is_ignored(&self, kind: &str) -> bool {
        self.ignored.contains(kind)
    }
}

impl MetadataCollector for AnnotationCollector {
    fn get(&self, class: &str) -> Option<ClassAnnotations> {
        self.container.read().get(class).cloned()
    }
}
