//! # 依赖注入定义解析实现
//!
//! 提供定义源、定义归一化、自动装配，以及内存中的反射管理器、注解收集器和属性处理器管理器。
//!
//! ## 解析流程
//!
//! 使用方向 [`DefinitionSource`] 查询标识符；缓存命中直接返回，
//! 否则交给 [`Autowirer`] 根据 [`ReflectionManager`] 提供的构造函数信息
//! 和 [`AnnotationCollector`] 收集的属性注解推导定义，成功后缓存。
//!
//! ```rust
//! use di_impl::{DefinitionSourceBuilder, ReflectionManager};
//! use infrastructure_common::{ClassInfo, ConstructorInfo};
//! use std::sync::Arc;
//!
//! let reflection = Arc::new(ReflectionManager::new());
//! reflection
//!     .register(ClassInfo::class("Logger"))
//!     .register(ClassInfo::class("UserService").with_constructor(
//!         ConstructorInfo::public().with_parameter("logger", Some("Logger")),
//!     ));
//!
//! let source = DefinitionSourceBuilder::new().with_introspector(reflection).build();
//! let definition = source.get_definition("UserService").unwrap();
//! let injection = definition.as_object().unwrap().constructor_injection().unwrap();
//! assert_eq!(injection.parameter(0).unwrap().target_entry_name(), "Logger");
//! ```

pub mod annotation_collector;
pub mod autowire;
pub mod builder;
pub mod definition_source;
pub mod normalizer;
pub mod property_handler_manager;
pub mod reflection_manager;

pub use annotation_collector::AnnotationCollector;
pub use autowire::Autowirer;
pub use builder::DefinitionSourceBuilder;
pub use definition_source::DefinitionSource;
pub use normalizer::{normalize_definition, normalize_source};
pub use property_handler_manager::PropertyHandlerManager;
pub use reflection_manager::ReflectionManager;
