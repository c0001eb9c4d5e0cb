//! 自动装配
//!
//! 根据类型反射信息和收集到的属性注解推导 [`ObjectDefinition`]。
//! 自动装配从不失败：未知类型原样返回，无法注入的参数直接跳过，
//! 实例化阶段再决定缺失的部分是否致命。

use di_abstractions::{
    MetadataCollector, MethodInjection, ObjectDefinition, PropertyHandlerRegistry,
    PropertyInjection, Reference, TypeIntrospector,
};
use infrastructure_common::{ConstructorInfo, Inject, INJECT_ANNOTATION};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// 自动装配器
#[derive(Clone)]
pub struct Autowirer {
    introspector: Arc<dyn TypeIntrospector>,
    collector: Arc<dyn MetadataCollector>,
    handlers: Arc<dyn PropertyHandlerRegistry>,
}

impl Autowirer {
    /// 创建自动装配器
    pub fn new(
        introspector: Arc<dyn TypeIntrospector>,
        collector: Arc<dyn MetadataCollector>,
        handlers: Arc<dyn PropertyHandlerRegistry>,
    ) -> Self {
        Self {
            introspector,
            collector,
            handlers,
        }
    }

    /// 类型反射服务
    pub fn introspector(&self) -> &dyn TypeIntrospector {
        self.introspector.as_ref()
    }

    /// 为标识符推导对象定义
    ///
    /// 提供了部分定义时以其类型名称为准，否则以标识符本身作为类型名称。
    /// 类型和接口都不存在时返回传入的部分定义（未传入则为 `None`）。
    pub fn autowire(
        &self,
        name: &str,
        definition: Option<ObjectDefinition>,
    ) -> Option<ObjectDefinition> {
        let class_name = definition
            .as_ref()
            .map_or(name, ObjectDefinition::class_name)
            .to_string();

        if !self.introspector.class_exists(&class_name)
            && !self.introspector.interface_exists(&class_name)
        {
            trace!("类型不存在，跳过自动装配: {}", class_name);
            return definition;
        }

        let mut definition = definition.unwrap_or_else(|| ObjectDefinition::new(name));

        // 构造函数
        match self.introspector.reflect_class(&class_name) {
            Some(class) => match class.constructor() {
                Some(constructor) if constructor.is_public() => {
                    let parameters = self.parameters_definition(constructor);
                    definition
                        .complete_constructor_injection(MethodInjection::constructor(parameters));
                }
                Some(constructor) => {
                    trace!(
                        "构造函数不可访问 ({:?})，不做构造注入: {}",
                        constructor.visibility,
                        class_name
                    );
                }
                None => trace!("类型没有构造函数: {}", class_name),
            },
            None => trace!("类型缺少反射信息: {}", class_name),
        }

        // 属性
        self.complete_property_injections(&class_name, &mut definition);

        debug!(
            "自动装配完成: {} -> {} (构造参数 {}, 属性注入 {})",
            name,
            class_name,
            definition
                .constructor_injection()
                .map_or(0, |injection| injection.parameters.len()),
            definition.property_injections.len()
        );
        Some(definition)
    }

    /// 读取构造函数参数的类型声明
    ///
    /// 可选参数从不注入；只有声明类型为已知类型或接口的必需参数才生成引用。
    fn parameters_definition(&self, constructor: &ConstructorInfo) -> BTreeMap<usize, Reference> {
        let mut parameters = BTreeMap::new();

        for parameter in &constructor.parameters {
            if parameter.optional {
                trace!("跳过可选参数: {}", parameter.name);
                continue;
            }

            match parameter.class_type.as_deref() {
                Some(class_type) if self.introspector.type_exists(class_type) => {
                    parameters.insert(parameter.position, Reference::new(class_type));
                }
                Some(class_type) => {
                    trace!("参数类型未知，跳过: {} ({})", parameter.name, class_type);
                }
                None => trace!("标量参数不注入: {}", parameter.name),
            }
        }

        parameters
    }

    fn complete_property_injections(&self, class_name: &str, definition: &mut ObjectDefinition) {
        let Some(annotations) = self.collector.get(class_name) else {
            return;
        };
        if annotations.properties.is_empty() {
            return;
        }

        let property_handlers = self.handlers.all();
        for property in &annotations.properties {
            if let Some(inject) = property.get(INJECT_ANNOTATION).and_then(Inject::from_metadata) {
                trace!("属性注入: {}.{} -> {}", class_name, property.name, inject.value);
                definition.add_property_injection(PropertyInjection::new(
                    property.name.clone(),
                    Reference::new(inject.value),
                ));
            }

            for annotation in &property.annotations {
                if annotation.kind == INJECT_ANNOTATION {
                    continue;
                }
                let Some(handlers) = property_handlers.get(&annotation.kind) else {
                    continue;
                };
                for handler in handlers {
                    trace!(
                        "调用属性处理器: {} on {}.{}",
                        annotation.kind,
                        class_name,
                        property.name
                    );
                    handler(&mut *definition, &property.name, &annotation.value);
                }
            }
        }
    }
}

impl fmt::Debug for Autowirer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autowirer").finish_non_exhaustive()
    }
}
