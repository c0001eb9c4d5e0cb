//! `#[derive(Injectable)]` 实现

use crate::utils::{declared_class_type, is_option_type, to_snake_case};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Ident, LitStr, Result};

/// 构造函数可见性
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstructorVisibility {
    Public,
    Protected,
    Private,
    /// 没有构造函数
    None,
}

impl ConstructorVisibility {
    fn parse(lit: &LitStr) -> Result<Self> {
        match lit.value().as_str() {
            "public" => Ok(Self::Public),
            "protected" => Ok(Self::Protected),
            "private" => Ok(Self::Private),
            "none" => Ok(Self::None),
            other => Err(Error::new(
                lit.span(),
                format!("未知的构造函数可见性 `{other}`，可选值: public, protected, private, none"),
            )),
        }
    }
}

/// 结构体级参数 `#[injectable(...)]`
#[derive(Debug, Clone)]
pub struct InjectableArgs {
    /// 自定义类型名称
    pub name: Option<String>,
    pub invocable: bool,
    pub abstract_class: bool,
    pub constructor: ConstructorVisibility,
    /// 不在启动时注册到全局注册表
    pub no_register: bool,
}

impl Default for InjectableArgs {
    fn default() -> Self {
        Self {
            name: None,
            invocable: false,
            abstract_class: false,
            constructor: ConstructorVisibility::Public,
            no_register: false,
        }
    }
}

impl InjectableArgs {
    fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut args = Self::default();

        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("injectable")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    args.name = Some(lit.value());
                } else if meta.path.is_ident("invocable") {
                    args.invocable = true;
                } else if meta.path.is_ident("abstract_class") {
                    args.abstract_class = true;
                } else if meta.path.is_ident("constructor") {
                    let lit: LitStr = meta.value()?.parse()?;
                    args.constructor = ConstructorVisibility::parse(&lit)?;
                } else if meta.path.is_ident("no_register") {
                    args.no_register = true;
                } else {
                    return Err(meta.error("不支持的 injectable 参数"));
                }
                Ok(())
            })?;
        }

        Ok(args)
    }
}

/// 字段在反射信息中的角色
#[derive(Debug, Clone, PartialEq)]
enum FieldRole {
    /// 构造函数参数
    Parameter {
        name: String,
        class_type: Option<String>,
        optional: bool,
    },
    /// 带注解的属性
    Property {
        name: String,
        annotations: Vec<(String, String)>,
    },
    Skipped,
}

fn field_role(field: &Field, position: usize) -> Result<FieldRole> {
    let name = match &field.ident {
        Some(ident) => ident.to_string(),
        None => position.to_string(),
    };

    let mut annotations = Vec::new();
    let mut skip = false;
    let mut optional = false;

    for attr in &field.attrs {
        if attr.path().is_ident("inject") {
            let mut target = None;
            if !matches!(attr.meta, syn::Meta::Path(_)) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("value") {
                        let lit: LitStr = meta.value()?.parse()?;
                        target = Some(lit.value());
                        Ok(())
                    } else {
                        Err(meta.error("不支持的 inject 参数"))
                    }
                })?;
            }
            let target = match target.or_else(|| declared_class_type(&field.ty)) {
                Some(target) => target,
                None => {
                    return Err(Error::new_spanned(
                        &field.ty,
                        "无法从字段类型推断注入目标，请使用 #[inject(value = \"...\")]",
                    ))
                }
            };
            annotations.push(("Inject".to_string(), target));
        } else if attr.path().is_ident("meta") {
            let mut kind = None;
            let mut value = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("kind") {
                    kind = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("value") {
                    value = Some(meta.value()?.parse::<LitStr>()?.value());
                } else {
                    return Err(meta.error("不支持的 meta 参数"));
                }
                Ok(())
            })?;
            match (kind, value) {
                (Some(kind), Some(value)) => annotations.push((kind, value)),
                _ => return Err(Error::new_spanned(attr, "#[meta] 需要同时提供 kind 和 value")),
            }
        } else if attr.path().is_ident("di") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                } else if meta.path.is_ident("optional") {
                    optional = true;
                } else {
                    return Err(meta.error("不支持的 di 参数"));
                }
                Ok(())
            })?;
        }
    }

    if skip {
        return Ok(FieldRole::Skipped);
    }
    if !annotations.is_empty() {
        return Ok(FieldRole::Property { name, annotations });
    }
    Ok(FieldRole::Parameter {
        name,
        class_type: declared_class_type(&field.ty),
        optional: optional || is_option_type(&field.ty),
    })
}

/// 实现 #[derive(Injectable)] 宏
pub fn derive_injectable_impl(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(expanded) => expanded,
        Err(e) => e.to_compile_error(),
    }
}

fn expand(input: &DeriveInput) -> Result<TokenStream> {
    let args = InjectableArgs::from_input(input)?;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "#[derive(Injectable)] 只能用于结构体",
            ))
        }
    };

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "#[derive(Injectable)] 不支持泛型结构体",
        ));
    }

    let struct_name = &input.ident;
    let class_name = args.name.clone().unwrap_or_else(|| struct_name.to_string());

    let roles = fields
        .iter()
        .enumerate()
        .map(|(i, field)| field_role(field, i))
        .collect::<Result<Vec<_>>>()?;

    let class_info = class_info_tokens(&class_name, &args, &roles);
    let annotations = annotations_tokens(&roles);

    let reflectable_impl = quote! {
        impl ::infrastructure_common::Reflectable for #struct_name {
            fn class_info() -> ::infrastructure_common::ClassInfo {
                #class_info
            }

            fn annotations() -> ::infrastructure_common::ClassAnnotations {
                #annotations
            }
        }
    };

    let registration_code = if args.no_register {
        TokenStream::new()
    } else {
        generate_registration_code(struct_name)
    };

    Ok(quote! {
        #reflectable_impl

        #registration_code
    })
}

fn class_info_tokens(class_name: &str, args: &InjectableArgs, roles: &[FieldRole]) -> TokenStream {
    let mut tokens = quote! { ::infrastructure_common::ClassInfo::class(#class_name) };

    if args.invocable {
        tokens = quote! { #tokens.invocable() };
    }
    if args.abstract_class {
        tokens = quote! { #tokens.abstract_class() };
    }

    let visibility = match args.constructor {
        ConstructorVisibility::Public => quote! { ::infrastructure_common::Visibility::Public },
        ConstructorVisibility::Protected => {
            quote! { ::infrastructure_common::Visibility::Protected }
        }
        ConstructorVisibility::Private => quote! { ::infrastructure_common::Visibility::Private },
        ConstructorVisibility::None => return tokens,
    };

    let parameters = roles.iter().filter_map(|role| match role {
        FieldRole::Parameter {
            name,
            class_type,
            optional,
        } => {
            let class_type = match class_type {
                Some(class_type) => quote! { ::std::option::Option::Some(#class_type) },
                None => quote! { ::std::option::Option::None },
            };
            Some(if *optional {
                quote! { .with_optional_parameter(#name, #class_type) }
            } else {
                quote! { .with_parameter(#name, #class_type) }
            })
        }
        _ => None,
    });

    quote! {
        #tokens.with_constructor(
            ::infrastructure_common::ConstructorInfo::new(#visibility)
                #(#parameters)*
        )
    }
}

fn annotations_tokens(roles: &[FieldRole]) -> TokenStream {
    let statements = roles.iter().flat_map(|role| match role {
        FieldRole::Property { name, annotations } => annotations
            .iter()
            .map(|(kind, value)| {
                quote! {
                    annotations.add_property_annotation(
                        #name,
                        #kind,
                        ::infrastructure_common::MetadataValue::from(#value),
                    );
                }
            })
            .collect::<Vec<_>>(),
        _ => Vec::new(),
    });

    quote! {
        #[allow(unused_mut)]
        let mut annotations = ::infrastructure_common::ClassAnnotations::new();
        #(#statements)*
        annotations
    }
}

/// 生成启动时注册代码
fn generate_registration_code(struct_name: &Ident) -> TokenStream {
    let registration_fn_name = Ident::new(
        &format!("__register_injectable_{}", to_snake_case(&struct_name.to_string())),
        Span::call_site(),
    );

    quote! {
        // 使用 ctor 在程序启动时注册类型
        #[ctor::ctor]
        fn #registration_fn_name() {
            ::infrastructure_common::register_class::<#struct_name>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn roles(input: &DeriveInput) -> Vec<FieldRole> {
        match &input.data {
            Data::Struct(data) => data
                .fields
                .iter()
                .enumerate()
                .map(|(i, field)| field_role(field, i).unwrap())
                .collect(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_injectable_args_defaults() {
        let args = InjectableArgs::default();

        assert_eq!(args.name, None);
        assert!(!args.invocable);
        assert_eq!(args.constructor, ConstructorVisibility::Public);
        assert!(!args.no_register);
    }

    #[test]
    fn test_parse_struct_arguments() {
        let input: DeriveInput = parse_quote! {
            #[injectable(name = "App\\Clock", invocable, constructor = "private", no_register)]
            struct Clock;
        };

        let args = InjectableArgs::from_input(&input).unwrap();
        assert_eq!(args.name.as_deref(), Some("App\\Clock"));
        assert!(args.invocable);
        assert_eq!(args.constructor, ConstructorVisibility::Private);
        assert!(args.no_register);
    }

    #[test]
    fn test_unknown_struct_argument_is_rejected() {
        let input: DeriveInput = parse_quote! {
            #[injectable(singleton)]
            struct Clock;
        };

        assert!(InjectableArgs::from_input(&input).is_err());
    }

    #[test]
    fn test_field_roles() {
        let input: DeriveInput = parse_quote! {
            struct UserService {
                repository: Arc<UserRepository>,
                logger: Option<Arc<dyn LoggerInterface>>,
                #[di(optional)]
                clock: Clock,
                table: String,
                #[inject]
                cache: Arc<dyn CacheInterface + Send + Sync>,
                #[inject(value = "mailer.smtp")]
                mailer: Arc<Mailer>,
                #[meta(kind = "Value", value = "http.timeout")]
                timeout: u64,
                #[di(skip)]
                state: Mutex<Vec<u8>>,
            }
        };

        assert_eq!(
            roles(&input),
            vec![
                FieldRole::Parameter {
                    name: "repository".to_string(),
                    class_type: Some("UserRepository".to_string()),
                    optional: false,
                },
                FieldRole::Parameter {
                    name: "logger".to_string(),
                    class_type: Some("LoggerInterface".to_string()),
                    optional: true,
                },
                FieldRole::Parameter {
                    name: "clock".to_string(),
                    class_type: Some("Clock".to_string()),
                    optional: true,
                },
                FieldRole::Parameter {
                    name: "table".to_string(),
                    class_type: None,
                    optional: false,
                },
                FieldRole::Property {
                    name: "cache".to_string(),
                    annotations: vec![("Inject".to_string(), "CacheInterface".to_string())],
                },
                FieldRole::Property {
                    name: "mailer".to_string(),
                    annotations: vec![("Inject".to_string(), "mailer.smtp".to_string())],
                },
                FieldRole::Property {
                    name: "timeout".to_string(),
                    annotations: vec![("Value".to_string(), "http.timeout".to_string())],
                },
                FieldRole::Skipped,
            ]
        );
    }

    #[test]
    fn test_inject_on_scalar_needs_explicit_target() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[inject]
                dsn: String,
            }
        };

        assert!(expand(&input).is_err());
    }

    #[test]
    fn test_generic_struct_is_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Repository<T> { inner: T }
        };

        assert!(expand(&input).is_err());
    }

    #[test]
    fn test_enum_is_rejected() {
        let input: DeriveInput = parse_quote! {
            enum Mode { A, B }
        };

        assert!(expand(&input).is_err());
    }

    #[test]
    fn test_registration_is_generated_unless_disabled() {
        let registered: DeriveInput = parse_quote! {
            struct UserService;
        };
        let unregistered: DeriveInput = parse_quote! {
            #[injectable(no_register)]
            struct UserService;
        };

        let registered = expand(&registered).unwrap().to_string();
        let unregistered = expand(&unregistered).unwrap().to_string();
        assert!(registered.contains("__register_injectable_user_service"));
        assert!(registered.contains("ctor :: ctor"));
        assert!(!unregistered.contains("__register_injectable"));
        assert!(!unregistered.contains("ctor :: ctor"));
        assert!(unregistered.contains("ConstructorInfo"));
    }
}
