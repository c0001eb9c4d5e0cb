//! 类型反射服务接口

use infrastructure_common::ClassInfo;
use std::sync::Arc;

/// 类型反射服务 trait
///
/// 回答"类型是否存在、构造函数有哪些参数、参数声明了什么类型"。
pub trait TypeIntrospector: Send + Sync {
    /// 是否存在指定名称的具体类型
    fn class_exists(&self, name: &str) -> bool;

    /// 是否存在指定名称的接口
    fn interface_exists(&self, name: &str) -> bool;

    /// 获取类型反射信息
    fn reflect_class(&self, name: &str) -> Option<Arc<ClassInfo>>;

    /// 类型或接口是否存在
    fn type_exists(&self, name: &str) -> bool {
        self.class_exists(name) || self.interface_exists(name)
    }

    /// 类型是否存在调用运算符
    fn is_invocable(&self, name: &str) -> bool {
        self.reflect_class(name).is_some_and(|class| class.invocable)
    }
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for Arc<T> {
    fn class_exists(&self, name: &str) -> bool {
        (**self).class_exists(name)
    }

    fn interface_exists(&self, name: &str) -> bool {
        (**self).interface_exists(name)
    }

    fn reflect_class(&self, name: &str) -> Option<Arc<ClassInfo>> {
        (**self).reflect_class(name)
    }
}
