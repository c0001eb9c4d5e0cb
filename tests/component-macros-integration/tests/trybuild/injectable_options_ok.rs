use component_macros::Injectable;
use infrastructure_common::Reflectable;
use std::sync::Arc;

trait Cache: Send + Sync {}

#[derive(Injectable)]
#[injectable(name = "cache.factory", invocable, constructor = "protected", no_register)]
#[allow(dead_code)]
struct CacheFactory(#[inject(value = "cache.redis")] Arc<dyn Cache>, #[di(skip)] u8);

fn main() {
    let info = CacheFactory::class_info();
    assert_eq!(info.name, "cache.factory");
    assert!(info.invocable);
    assert!(!info.constructor().unwrap().is_public());
    assert!(CacheFactory::annotations().property("0").is_some());
}
