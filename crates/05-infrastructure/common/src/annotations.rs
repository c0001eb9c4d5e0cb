//! 声明式元数据
//!
//! 按类型收集的注解数据，分为类 (`_c`)、方法 (`_m`)、属性 (`_p`) 三个桶。

use serde::{Deserialize, Serialize};

/// 元数据值
pub type MetadataValue = serde_json::Value;

/// 类注解桶名称
pub const CLASS_BUCKET: &str = "_c";
/// 方法注解桶名称
pub const METHOD_BUCKET: &str = "_m";
/// 属性注解桶名称
pub const PROPERTY_BUCKET: &str = "_p";

/// 保留的注入注解种类
pub const INJECT_ANNOTATION: &str = "Inject";

/// 单条注解
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// 注解种类
    pub kind: String,
    /// 注解值
    pub value: MetadataValue,
}

impl Annotation {
    pub fn new(kind: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// 挂在某个成员（方法或属性）上的注解
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberMetadata {
    /// 成员名称
    pub name: String,
    /// 按收集顺序排列的注解
    pub annotations: Vec<Annotation>,
}

impl MemberMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    /// 获取指定种类的注解值
    pub fn get(&self, kind: &str) -> Option<&MetadataValue> {
        self.annotations
            .iter()
            .find(|annotation| annotation.kind == kind)
            .map(|annotation| &annotation.value)
    }

    /// 写入注解，同种类覆盖原值
    pub fn insert(&mut self, kind: impl Into<String>, value: impl Into<MetadataValue>) {
        let kind = kind.into();
        let value = value.into();
        match self.annotations.iter_mut().find(|a| a.kind == kind) {
            Some(existing) => existing.value = value,
            None => self.annotations.push(Annotation { kind, value }),
        }
    }
}

/// 属性注解
pub type PropertyMetadata = MemberMetadata;

/// 一个类型的全部注解
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassAnnotations {
    /// 类注解 (`_c`)
    #[serde(rename = "_c", default)]
    pub class: Vec<Annotation>,
    /// 方法注解 (`_m`)
    #[serde(rename = "_m", default)]
    pub methods: Vec<MemberMetadata>,
    /// 属性注解 (`_p`)
    #[serde(rename = "_p", default)]
    pub properties: Vec<PropertyMetadata>,
}

impl ClassAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否没有任何注解
    pub fn is_empty(&self) -> bool {
        self.class.is_empty() && self.methods.is_empty() && self.properties.is_empty()
    }

    /// 添加类注解
    pub fn add_class_annotation(
        &mut self,
        kind: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) {
        let kind = kind.into();
        let value = value.into();
        match self.class.iter_mut().find(|a| a.kind == kind) {
            Some(existing) => existing.value = value,
            None => self.class.push(Annotation { kind, value }),
        }
    }

    /// 添加方法注解
    pub fn add_method_annotation(
        &mut self,
        method: &str,
        kind: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) {
        member_entry(&mut self.methods, method).insert(kind, value);
    }

    /// 添加属性注解
    pub fn add_property_annotation(
        &mut self,
        property: &str,
        kind: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) {
        member_entry(&mut self.properties, property).insert(kind, value);
    }

    /// 获取类注解
    pub fn class_annotation(&self, kind: &str) -> Option<&MetadataValue> {
        self.class
            .iter()
            .find(|annotation| annotation.kind == kind)
            .map(|annotation| &annotation.value)
    }

    /// 获取属性注解
    pub fn property(&self, name: &str) -> Option<&PropertyMetadata> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// 合并另一份注解，后者覆盖同名同种类的值
    pub fn merge(&mut self, other: Self) {
        for annotation in other.class {
            self.add_class_annotation(annotation.kind, annotation.value);
        }
        for method in other.methods {
            for annotation in method.annotations {
                self.add_method_annotation(&method.name, annotation.kind, annotation.value);
            }
        }
        for property in other.properties {
            for annotation in property.annotations {
                self.add_property_annotation(&property.name, annotation.kind, annotation.value);
            }
        }
    }
}

fn member_entry<'a>(members: &'a mut Vec<MemberMetadata>, name: &str) -> &'a mut MemberMetadata {
    match members.iter().position(|member| member.name == name) {
        Some(index) => &mut members[index],
        None => {
            members.push(MemberMetadata::new(name));
            let last = members.len() - 1;
            &mut members[last]
        }
    }
}

/// 注入注解
///
/// 值可以是目标标识符字符串，也可以是带 `value` 字段的对象。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inject {
    /// 注入目标标识符
    pub value: String,
}

impl Inject {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// 从元数据值解析
    pub fn from_metadata(value: &MetadataValue) -> Option<Self> {
        match value {
            MetadataValue::String(target) if !target.is_empty() => Some(Self::new(target.clone())),
            MetadataValue::Object(fields) => match fields.get("value") {
                Some(MetadataValue::String(target)) if !target.is_empty() => {
                    Some(Self::new(target.clone()))
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// 转换为元数据值
    pub fn to_metadata(&self) -> MetadataValue {
        serde_json::json!({ "value": self.value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_annotations_keep_insertion_order() {
        let mut annotations = ClassAnnotations::new();
        annotations.add_property_annotation("logger", INJECT_ANNOTATION, "Logger");
        annotations.add_property_annotation("timeout", "Value", "http.timeout");
        annotations.add_property_annotation("logger", "Lazy", true);

        let names: Vec<_> = annotations.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["logger", "timeout"]);

        let logger = annotations.property("logger").unwrap();
        let kinds: Vec<_> = logger.annotations.iter().map(|a| a.kind.as_str()).collect();
        assert_eq!(kinds, vec![INJECT_ANNOTATION, "Lazy"]);
    }

    #[test]
    fn test_same_kind_overwrites_value() {
        let mut property = PropertyMetadata::new("cache");
        property.insert("Value", "a");
        property.insert("Value", "b");
        assert_eq!(property.annotations.len(), 1);
        assert_eq!(property.get("Value"), Some(&json!("b")));
    }

    #[test]
    fn test_inject_from_metadata() {
        assert_eq!(Inject::from_metadata(&json!("Logger")), Some(Inject::new("Logger")));
        assert_eq!(
            Inject::from_metadata(&json!({ "value": "Cache" })),
            Some(Inject::new("Cache"))
        );
        assert_eq!(Inject::from_metadata(&json!({ "other": "Cache" })), None);
        assert_eq!(Inject::from_metadata(&json!("")), None);
        assert_eq!(Inject::from_metadata(&json!(null)), None);
    }

    #[test]
    fn test_buckets_serialize_with_reserved_keys() {
        let mut annotations = ClassAnnotations::new();
        annotations.add_property_annotation("logger", INJECT_ANNOTATION, "Logger");
        let value = serde_json::to_value(&annotations).unwrap();
        assert!(value.get(PROPERTY_BUCKET).is_some());
        assert!(value.get(CLASS_BUCKET).is_some());
        assert!(value.get(METHOD_BUCKET).is_some());
    }
}
