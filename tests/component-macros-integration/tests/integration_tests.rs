//! Centralized integration tests for component-macros crate

use component_macros::Injectable;
use infrastructure_common::{
    get_registered_class, register_class, registered_classes, ClassAnnotations, ClassDescriptor,
    Reflectable, INJECT_ANNOTATION,
};
use serde_json::json;
use std::sync::Arc;

mod storage {
    use component_macros::Injectable;

    pub trait CacheInterface: Send + Sync {}

    #[derive(Injectable)]
    #[injectable(name = "Storage\\RedisCache")]
    pub struct RedisCache;
}

#[derive(Injectable)]
#[allow(dead_code)]
pub struct OrderService {
    cache: Arc<dyn storage::CacheInterface>,
    #[inject(value = "Storage\\RedisCache")]
    redis: Arc<storage::RedisCache>,
    #[meta(kind = "Value", value = "orders.limit")]
    #[meta(kind = "Deprecated", value = "use quota")]
    limit: usize,
}

#[derive(Injectable)]
#[injectable(no_register)]
pub struct Manual;

#[test]
fn test_registry_contains_derived_types() {
    let names: Vec<_> = registered_classes()
        .into_iter()
        .map(|descriptor| descriptor.info.name)
        .collect();

    assert!(names.contains(&"OrderService".to_string()));
    assert!(names.contains(&"Storage\\RedisCache".to_string()));
    assert!(!names.contains(&"RedisCache".to_string()));

    // 注册表按名称排序
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_manual_registration() {
    assert!(get_registered_class("Manual").is_none());
    register_class::<Manual>();

    let descriptor = get_registered_class("Manual").unwrap();
    assert_eq!(descriptor, ClassDescriptor::of::<Manual>());
}

#[test]
fn test_trait_object_parameter_type() {
    let info = OrderService::class_info();
    let parameters = &info.constructor().unwrap().parameters;

    assert_eq!(parameters.len(), 1);
    assert_eq!(parameters[0].name, "cache");
    assert_eq!(parameters[0].class_type.as_deref(), Some("CacheInterface"));
}

#[test]
fn test_annotation_layout() {
    let annotations = OrderService::annotations();

    assert_eq!(
        serde_json::to_value(&annotations).unwrap(),
        json!({
            "_c": [],
            "_m": [],
            "_p": [
                {
                    "name": "redis",
                    "annotations": [{ "kind": INJECT_ANNOTATION, "value": "Storage\\RedisCache" }]
                },
                {
                    "name": "limit",
                    "annotations": [
                        { "kind": "Value", "value": "orders.limit" },
                        { "kind": "Deprecated", "value": "use quota" }
                    ]
                }
            ]
        })
    );

    let restored: ClassAnnotations =
        serde_json::from_value(serde_json::to_value(&annotations).unwrap()).unwrap();
    assert_eq!(restored, annotations);
}
