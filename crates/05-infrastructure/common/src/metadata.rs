//! 类型反射元数据
//!
//! 描述一个类型对自动装配可见的部分：是否存在、是否为接口、构造函数的可见性与参数。

use serde::{Deserialize, Serialize};

/// 类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    /// 具体类型
    Class,
    /// 接口（trait）
    Interface,
}

/// 可见性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// 构造函数参数信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// 参数名称
    pub name: String,
    /// 参数位置（从 0 开始）
    pub position: usize,
    /// 是否可选（带默认值）
    pub optional: bool,
    /// 声明的类型名称，标量类型为 `None`
    pub class_type: Option<String>,
}

impl ParameterInfo {
    /// 创建新的参数信息
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
            optional: false,
            class_type: None,
        }
    }

    /// 设置声明类型
    pub fn with_class_type(mut self, class_type: impl Into<String>) -> Self {
        self.class_type = Some(class_type.into());
        self
    }

    /// 设置为可选参数
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// 构造函数信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorInfo {
    /// 可见性
    pub visibility: Visibility,
    /// 按声明顺序排列的参数
    pub parameters: Vec<ParameterInfo>,
}

impl ConstructorInfo {
    /// 创建指定可见性的构造函数
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            parameters: Vec::new(),
        }
    }

    /// 创建公开构造函数
    pub fn public() -> Self {
        Self::new(Visibility::Public)
    }

    /// 添加参数，位置按添加顺序分配
    pub fn with_parameter(mut self, name: impl Into<String>, class_type: Option<&str>) -> Self {
        let mut parameter = ParameterInfo::new(name, self.parameters.len());
        parameter.class_type = class_type.map(str::to_string);
        self.parameters.push(parameter);
        self
    }

    /// 添加可选参数
    pub fn with_optional_parameter(
        mut self,
        name: impl Into<String>,
        class_type: Option<&str>,
    ) -> Self {
        let mut parameter = ParameterInfo::new(name, self.parameters.len()).optional();
        parameter.class_type = class_type.map(str::to_string);
        self.parameters.push(parameter);
        self
    }

    /// 是否可从外部调用
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// 类型反射信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    /// 类型名称，即标识符
    pub name: String,
    /// 类型种类
    pub kind: ClassKind,
    /// 是否为抽象类型
    pub is_abstract: bool,
    /// 是否可调用（存在调用运算符）
    pub invocable: bool,
    /// 构造函数，没有声明时为 `None`
    pub constructor: Option<ConstructorInfo>,
}

impl ClassInfo {
    /// 创建具体类型信息
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            is_abstract: false,
            invocable: false,
            constructor: None,
        }
    }

    /// 创建接口信息
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Interface,
            is_abstract: true,
            invocable: false,
            constructor: None,
        }
    }

    /// 设置构造函数
    pub fn with_constructor(mut self, constructor: ConstructorInfo) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// 标记为可调用
    pub fn invocable(mut self) -> Self {
        self.invocable = true;
        self
    }

    /// 标记为抽象类型
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// 是否为接口
    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// 获取构造函数
    pub fn constructor(&self) -> Option<&ConstructorInfo> {
        self.constructor.as_ref()
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }
}
