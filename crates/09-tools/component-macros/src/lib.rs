//! # Component Macros
//!
//! 提供 `#[derive(Injectable)]`，在编译期为结构体生成类型反射信息和属性注解，
//! 并在程序启动时注册到全局类型注册表。
//!
//! ## 字段规则
//!
//! - 普通字段按声明顺序成为构造函数参数，参数类型取字段类型去掉 `Arc`、`Box`、`Option`、`dyn` 后的名称
//! - `Option<_>` 字段或 `#[di(optional)]` 是可选参数，自动装配从不注入可选参数
//! - `#[inject]` / `#[inject(value = "...")]` 字段是属性注入，不是构造参数
//! - `#[meta(kind = "...", value = "...")]` 为属性附加任意种类的注解
//! - `#[di(skip)]` 字段被忽略
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::Injectable;
//! use std::sync::Arc;
//!
//! #[derive(Injectable)]
//! pub struct UserService {
//!     repository: Arc<UserRepository>,
//!     logger: Option<Arc<dyn LoggerInterface>>,
//!     #[inject(value = "cache.redis")]
//!     cache: Arc<dyn CacheInterface>,
//!     #[meta(kind = "Value", value = "user.page_size")]
//!     page_size: usize,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod utils;

/// 可注入类型派生宏
///
/// 为结构体实现 `infrastructure_common::Reflectable`。
///
/// # 结构体参数
///
/// - `name = "..."` - 自定义类型名称（默认为结构体名）
/// - `invocable` - 类型本身可调用，注册为工厂定义
/// - `abstract_class` - 抽象类型
/// - `constructor = "public|protected|private|none"` - 构造函数可见性（默认 `public`）
/// - `no_register` - 不在程序启动时注册到全局注册表
///
/// 自动注册依赖 `ctor`，使用方需要依赖 `ctor` crate。
#[proc_macro_derive(Injectable, attributes(injectable, inject, meta, di))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input).into()
}
