//! 定义模型
//!
//! 定义只描述如何产生某个标识符对应的实例，本身从不持有实例。

use crate::factory::Factory;
use crate::reflection::TypeIntrospector;
use infrastructure_common::MetadataValue;
use std::collections::BTreeMap;

/// 构造函数的约定方法名
pub const CONSTRUCTOR: &str = "new";

/// 定义
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// 直接构造，附带构造函数与属性注入
    Object(ObjectDefinition),
    /// 调用工厂
    Factory(FactoryDefinition),
    /// 指向另一个标识符
    Reference(Reference),
}

impl Definition {
    /// 定义对应的标识符
    pub fn name(&self) -> &str {
        match self {
            Self::Object(definition) => &definition.name,
            Self::Factory(definition) => &definition.name,
            Self::Reference(reference) => &reference.name,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectDefinition> {
        match self {
            Self::Object(definition) => Some(definition),
            _ => None,
        }
    }

    pub fn as_factory(&self) -> Option<&FactoryDefinition> {
        match self {
            Self::Factory(definition) => Some(definition),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }
}

impl From<ObjectDefinition> for Definition {
    fn from(definition: ObjectDefinition) -> Self {
        Self::Object(definition)
    }
}

impl From<FactoryDefinition> for Definition {
    fn from(definition: FactoryDefinition) -> Self {
        Self::Factory(definition)
    }
}

impl From<Reference> for Definition {
    fn from(reference: Reference) -> Self {
        Self::Reference(reference)
    }
}

/// 引用定义
///
/// 由使用方递归解析，这里不做展开。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// 当前定义的标识符，作为注入值时为空
    pub name: String,
    /// 目标标识符
    pub target_entry_name: String,
}

impl Reference {
    /// 创建指向目标标识符的引用
    pub fn new(target_entry_name: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            target_entry_name: target_entry_name.into(),
        }
    }

    /// 创建带名称的别名定义
    pub fn alias(name: impl Into<String>, target_entry_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_entry_name: target_entry_name.into(),
        }
    }

    pub fn target_entry_name(&self) -> &str {
        &self.target_entry_name
    }
}

/// 方法注入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInjection {
    /// 方法名称
    pub method_name: String,
    /// 参数位置到引用的映射
    pub parameters: BTreeMap<usize, Reference>,
}

impl MethodInjection {
    pub fn new(method_name: impl Into<String>, parameters: BTreeMap<usize, Reference>) -> Self {
        Self {
            method_name: method_name.into(),
            parameters,
        }
    }

    /// 构造函数注入
    pub fn constructor(parameters: BTreeMap<usize, Reference>) -> Self {
        Self::new(CONSTRUCTOR, parameters)
    }

    /// 获取指定位置的参数引用
    pub fn parameter(&self, position: usize) -> Option<&Reference> {
        self.parameters.get(&position)
    }

    /// 用另一份注入补齐缺失的参数位置，已有位置保持不变
    pub fn merge(&mut self, other: Self) {
        for (position, reference) in other.parameters {
            self.parameters.entry(position).or_insert(reference);
        }
    }
}

/// 属性注入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInjection {
    /// 属性名称
    pub property_name: String,
    /// 注入值
    pub value: Reference,
}

impl PropertyInjection {
    pub fn new(property_name: impl Into<String>, value: Reference) -> Self {
        Self {
            property_name: property_name.into(),
            value,
        }
    }
}

/// 对象定义
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDefinition {
    /// 标识符
    pub name: String,
    /// 具体类型名称，未指定时使用标识符
    pub class_name: Option<String>,
    /// 构造函数注入
    pub constructor_injection: Option<MethodInjection>,
    /// 属性注入，按属性名唯一
    pub property_injections: Vec<PropertyInjection>,
}

impl ObjectDefinition {
    /// 以标识符本身作为类型名称创建定义
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_name: None,
            constructor_injection: None,
            property_injections: Vec::new(),
        }
    }

    /// 创建指定具体类型的定义
    pub fn with_class(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            ..Self::new(name)
        }
    }

    /// 具体类型名称
    pub fn class_name(&self) -> &str {
        self.class_name.as_deref().unwrap_or(&self.name)
    }

    pub fn set_class_name(&mut self, class_name: impl Into<String>) {
        self.class_name = Some(class_name.into());
    }

    pub fn constructor_injection(&self) -> Option<&MethodInjection> {
        self.constructor_injection.as_ref()
    }

    /// 补全构造函数注入
    ///
    /// 已经存在的参数位置优先保留。
    pub fn complete_constructor_injection(&mut self, injection: MethodInjection) {
        match &mut self.constructor_injection {
            Some(existing) => existing.merge(injection),
            None => self.constructor_injection = Some(injection),
        }
    }

    /// 添加属性注入，同名属性覆盖
    pub fn add_property_injection(&mut self, injection: PropertyInjection) {
        match self
            .property_injections
            .iter_mut()
            .find(|existing| existing.property_name == injection.property_name)
        {
            Some(existing) => *existing = injection,
            None => self.property_injections.push(injection),
        }
    }

    /// 获取属性注入
    pub fn property_injection(&self, property_name: &str) -> Option<&PropertyInjection> {
        self.property_injections
            .iter()
            .find(|injection| injection.property_name == property_name)
    }

    /// 类型是否存在且不是抽象类型
    pub fn is_instantiable(&self, introspector: &dyn TypeIntrospector) -> bool {
        introspector
            .reflect_class(self.class_name())
            .is_some_and(|class| !class.is_abstract && !class.is_interface())
    }
}

/// 工厂定义
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryDefinition {
    /// 标识符
    pub name: String,
    /// 工厂
    pub factory: Factory,
    /// 工厂参数，初始为空
    pub parameters: Vec<MetadataValue>,
}

impl FactoryDefinition {
    pub fn new(name: impl Into<String>, factory: Factory, parameters: Vec<MetadataValue>) -> Self {
        Self {
            name: name.into(),
            factory,
            parameters,
        }
    }
}
