use component_macros::Injectable;
use infrastructure_common::{get_registered_class, Reflectable};
use std::sync::Arc;

#[derive(Injectable)]
struct Logger;

#[derive(Injectable)]
#[allow(dead_code)]
struct OkService {
    logger: Arc<Logger>,
}

fn main() {
    let info = OkService::class_info();
    assert_eq!(info.name, "OkService");
    assert_eq!(info.constructor().unwrap().parameters[0].class_type.as_deref(), Some("Logger"));
    assert!(get_registered_class("OkService").is_some());
}
