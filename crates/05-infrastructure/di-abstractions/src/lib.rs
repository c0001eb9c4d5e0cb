//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义"如何构建实例"的描述模型以及解析所需的协作者接口。
//!
//! ## 核心类型
//!
//! - [`Definition`] - 定义的三种变体：对象、工厂、引用
//! - [`RawDefinition`] - 用户提供的原始定义
//!
//! ## 核心接口
//!
//! - [`DefinitionSourceInterface`] - 定义源（标识符到定义的映射）
//! - [`TypeIntrospector`] - 类型反射服务
//! - [`MetadataCollector`] - 注解元数据收集器
//! - [`PropertyHandlerRegistry`] - 属性处理器注册表

pub mod collector;
pub mod definition;
pub mod factory;
pub mod handler;
pub mod reflection;
pub mod source;

pub use collector::*;
pub use definition::*;
pub use factory::*;
pub use handler::*;
pub use reflection::*;
pub use source::*;
