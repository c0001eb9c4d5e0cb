//! Centralized integration tests for di-impl crate
//!
//! 通过 `#[derive(Injectable)]` 注册的类型走完整的默认解析流程。

use component_macros::Injectable;
use di_abstractions::{Definition, DefinitionSourceInterface, Factory, PropertyInjection, Reference};
use di_impl::{DefinitionSourceBuilder, PropertyHandlerManager};
use infrastructure_common::{
    register_class_descriptor, ClassAnnotations, ClassDescriptor, ClassInfo, ScanConfig,
};
use std::sync::Arc;

pub trait MailerInterface: Send + Sync {}

#[derive(Injectable)]
pub struct SmtpMailer;

#[derive(Injectable)]
pub struct AuditLog;

#[derive(Injectable)]
#[allow(dead_code)]
pub struct AccountService {
    mailer: Arc<dyn MailerInterface>,
    audit: Option<Arc<AuditLog>>,
    name: String,
    #[inject]
    log: Arc<AuditLog>,
    #[meta(kind = "Value", value = "account.quota")]
    quota: u32,
}

#[derive(Injectable)]
#[injectable(invocable)]
pub struct TokenFactory;

#[derive(Injectable)]
#[injectable(constructor = "private")]
#[allow(dead_code)]
pub struct Registry {
    audit: Arc<AuditLog>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("di_impl=debug")
        .with_test_writer()
        .try_init();
}

fn register_interfaces() {
    register_class_descriptor(ClassDescriptor {
        info: ClassInfo::interface("MailerInterface"),
        annotations: ClassAnnotations::new(),
    });
}

#[test]
fn test_derived_types_autowire_from_global_registry() {
    init_tracing();
    register_interfaces();
    let source = DefinitionSourceBuilder::new().build();

    let definition = source.get_definition("AccountService").unwrap();
    let object = definition.as_object().unwrap();
    assert_eq!(object.class_name(), "AccountService");

    // 可选参数与标量参数不注入
    let injection = object.constructor_injection().unwrap();
    assert_eq!(injection.parameters.len(), 1);
    assert_eq!(injection.parameter(0), Some(&Reference::new("MailerInterface")));

    assert_eq!(
        object.property_injection("log"),
        Some(&PropertyInjection::new("log", Reference::new("AuditLog")))
    );
    assert!(object.property_injection("quota").is_none());
}

#[test]
fn test_scan_config_maps_interface_to_implementation() -> anyhow::Result<()> {
    register_interfaces();
    let config = ScanConfig::from_toml_str(
        r#"
        ignore_annotations = ["Value"]

        [dependencies]
        MailerInterface = "SmtpMailer"
        tokens = "TokenFactory"
        "#,
    )?;

    let handlers = Arc::new(PropertyHandlerManager::new());
    let source = DefinitionSourceBuilder::new()
        .with_scan_config(config)
        .with_handlers(handlers)
        .build();

    let mailer = source.get_definition("MailerInterface").unwrap();
    assert_eq!(mailer.as_object().unwrap().class_name(), "SmtpMailer");

    match source.get_definition("tokens").unwrap().as_ref() {
        Definition::Factory(factory) => {
            assert_eq!(factory.factory, Factory::Class("TokenFactory".to_string()));
        }
        other => panic!("expected factory definition, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_handlers_see_derived_metadata() {
    let handlers = Arc::new(PropertyHandlerManager::new());
    handlers.register("Value", |definition, property, value| {
        let key = value.as_str().unwrap_or_default();
        definition.add_property_injection(PropertyInjection::new(
            property,
            Reference::new(format!("config.{key}")),
        ));
    });

    let source = DefinitionSourceBuilder::new().with_handlers(handlers).build();
    let definition = source.get_definition("AccountService").unwrap();

    assert_eq!(
        definition
            .as_object()
            .unwrap()
            .property_injection("quota")
            .map(|injection| injection.value.target_entry_name()),
        Some("config.account.quota")
    );
}

#[test]
fn test_private_constructor_gets_no_injection() {
    let source = DefinitionSourceBuilder::new().build();

    let definition = source.get_definition("Registry").unwrap();
    assert!(definition.as_object().unwrap().constructor_injection().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_source_across_tasks() {
    let source: Arc<dyn DefinitionSourceInterface> =
        Arc::new(DefinitionSourceBuilder::new().build());

    let tasks: Vec<_> = ["AuditLog", "SmtpMailer", "AuditLog", "SmtpMailer"]
        .into_iter()
        .map(|name| {
            let source = source.clone();
            tokio::task::spawn_blocking(move || source.get_definition(name))
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap().is_some());
    }

    let names: Vec<_> = source.get_definitions().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"AuditLog".to_string()));
    assert!(names.contains(&"SmtpMailer".to_string()));
}
