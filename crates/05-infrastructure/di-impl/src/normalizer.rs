//! 定义归一化
//!
//! 把用户提供的原始定义分类为定义变体：
//!
//! | 原始定义 | 结果 |
//! |---|---|
//! | 可调用类型的名称 | 工厂定义 |
//! | 其它已知类型或接口的名称 | 以该类型为种子的自动装配结果 |
//! | 回调函数 | 工厂定义 |
//! | 其它 | `None` |

use crate::autowire::Autowirer;
use di_abstractions::{Definition, Factory, FactoryDefinition, ObjectDefinition, RawDefinition};
use tracing::{debug, trace};

/// 归一化单个原始定义
pub fn normalize_definition(
    autowirer: &Autowirer,
    identifier: &str,
    definition: RawDefinition,
) -> Option<Definition> {
    match definition {
        RawDefinition::ClassName(class_name) => {
            let introspector = autowirer.introspector();
            if !introspector.type_exists(&class_name) {
                debug!("原始定义指向未知类型，忽略: {} -> {}", identifier, class_name);
                return None;
            }
            // 同时可构造和可调用的类型按工厂处理
            if introspector.is_invocable(&class_name) {
                trace!("可调用类型作为工厂: {} -> {}", identifier, class_name);
                return Some(Definition::Factory(FactoryDefinition::new(
                    identifier,
                    Factory::Class(class_name),
                    Vec::new(),
                )));
            }
            autowirer
                .autowire(identifier, Some(ObjectDefinition::with_class(identifier, class_name)))
                .map(Definition::Object)
        }
        RawDefinition::Callable(callable) => Some(Definition::Factory(FactoryDefinition::new(
            identifier,
            Factory::Callable(callable),
            Vec::new(),
        ))),
        RawDefinition::Other(value) => {
            debug!("无法识别的原始定义，忽略: {} ({})", identifier, value);
            None
        }
    }
}

/// 归一化批量原始定义，无法归一化的条目被丢弃
pub fn normalize_source<I, K>(autowirer: &Autowirer, source: I) -> Vec<(String, Definition)>
where
    I: IntoIterator<Item = (K, RawDefinition)>,
    K: Into<String>,
{
    source
        .into_iter()
        .filter_map(|(identifier, definition)| {
            let identifier = identifier.into();
            normalize_definition(autowirer, &identifier, definition)
                .map(|normalized| (identifier, normalized))
        })
        .collect()
}
