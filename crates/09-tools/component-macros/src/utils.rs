//! 宏工具函数

use syn::{GenericArgument, PathArguments, PathSegment, Type, TypeParamBound};

/// 透明包装类型，声明类型取其第一个泛型参数
const WRAPPER_TYPES: &[&str] = &[
    "Arc", "Box", "Rc", "Option", "Mutex", "RwLock", "RefCell", "Cell",
];

/// 没有类型声明意义的标量和标准库容器类型
const SCALAR_TYPES: &[&str] = &[
    "bool", "char", "str", "String", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16",
    "u32", "u64", "u128", "usize", "f32", "f64", "Vec", "VecDeque", "HashMap", "HashSet",
    "BTreeMap", "BTreeSet", "Duration", "Path", "PathBuf", "Cow",
];

/// trait object 中忽略的标记 trait
const MARKER_TRAITS: &[&str] = &["Send", "Sync", "Unpin"];

/// 提取字段的声明类型名称
///
/// 去掉 `Arc`、`Box`、`Option` 等包装和 `dyn`，取最后一个路径段；标量类型返回 `None`。
pub fn declared_class_type(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) => {
            let segment = type_path.path.segments.last()?;
            let ident = segment.ident.to_string();
            if WRAPPER_TYPES.contains(&ident.as_str()) {
                return first_type_argument(segment).and_then(declared_class_type);
            }
            if SCALAR_TYPES.contains(&ident.as_str()) {
                return None;
            }
            Some(ident)
        }
        Type::TraitObject(trait_object) => trait_object.bounds.iter().find_map(|bound| match bound {
            TypeParamBound::Trait(trait_bound) => trait_bound
                .path
                .segments
                .last()
                .map(|segment| segment.ident.to_string())
                .filter(|ident| !MARKER_TRAITS.contains(&ident.as_str())),
            _ => None,
        }),
        Type::Reference(reference) => declared_class_type(&reference.elem),
        Type::Paren(paren) => declared_class_type(&paren.elem),
        Type::Group(group) => declared_class_type(&group.elem),
        _ => None,
    }
}

/// 检查类型是否为 Option<T>
pub fn is_option_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}

fn first_type_argument(segment: &PathSegment) -> Option<&Type> {
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(inner_type) => Some(inner_type),
            _ => None,
        }),
        _ => None,
    }
}

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            // 检查前一个字符是否为小写，或者下一个字符是否为小写
            let prev_is_lower = chars.get(i - 1).is_some_and(|c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());

            if prev_is_lower || next_is_lower {
                result.push('_');
            }
        }
        result.push(ch.to_lowercase().next().unwrap_or(ch));
    }

    result
}
