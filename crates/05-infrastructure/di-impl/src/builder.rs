//! 定义源构建器

use crate::annotation_collector::AnnotationCollector;
use crate::autowire::Autowirer;
use crate::definition_source::DefinitionSource;
use crate::property_handler_manager::PropertyHandlerManager;
use crate::reflection_manager::ReflectionManager;
use di_abstractions::{MetadataCollector, PropertyHandlerRegistry, RawDefinition, TypeIntrospector};
use infrastructure_common::ScanConfig;
use std::sync::Arc;
use tracing::info;

/// 定义源构建器
///
/// 未指定的协作者分别使用从全局注册表加载的 [`ReflectionManager`]、
/// [`AnnotationCollector`] 和空的 [`PropertyHandlerManager`]。
#[derive(Default)]
pub struct DefinitionSourceBuilder {
    introspector: Option<Arc<dyn TypeIntrospector>>,
    collector: Option<Arc<dyn MetadataCollector>>,
    handlers: Option<Arc<dyn PropertyHandlerRegistry>>,
    definitions: Vec<(String, RawDefinition)>,
    scan_config: ScanConfig,
}

impl DefinitionSourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 配置类型反射服务
    pub fn with_introspector(mut self, introspector: Arc<dyn TypeIntrospector>) -> Self {
        self.introspector = Some(introspector);
        self
    }

    /// 配置元数据收集器
    pub fn with_collector(mut self, collector: Arc<dyn MetadataCollector>) -> Self {
        self.collector = Some(collector);
        self
    }

    /// 配置属性处理器注册表
    pub fn with_handlers(mut self, handlers: Arc<dyn PropertyHandlerRegistry>) -> Self {
        self.handlers = Some(handlers);
        self
    }

    /// 添加原始定义
    pub fn with_definition(
        mut self,
        name: impl Into<String>,
        definition: impl Into<RawDefinition>,
    ) -> Self {
        self.definitions.push((name.into(), definition.into()));
        self
    }

    /// 应用扫描配置
    ///
    /// `dependencies` 作为原始定义加入，排在显式添加的定义之前；
    /// `ignore_annotations` 只作用于默认创建的注解收集器。
    pub fn with_scan_config(mut self, config: ScanConfig) -> Self {
        self.scan_config = config;
        self
    }

    /// 构建定义源
    pub fn build(self) -> DefinitionSource {
        let Self {
            introspector,
            collector,
            handlers,
            definitions,
            scan_config,
        } = self;

        let introspector = introspector.unwrap_or_else(|| {
            Arc::new(ReflectionManager::from_global()) as Arc<dyn TypeIntrospector>
        });
        let collector = collector.unwrap_or_else(|| {
            let collector = AnnotationCollector::new()
                .with_ignored(scan_config.ignore_annotations.iter().cloned());
            collector.collect_global();
            Arc::new(collector) as Arc<dyn MetadataCollector>
        });
        let handlers = handlers.unwrap_or_else(|| {
            Arc::new(PropertyHandlerManager::new()) as Arc<dyn PropertyHandlerRegistry>
        });

        let source: Vec<(String, RawDefinition)> = scan_config
            .dependencies
            .into_iter()
            .map(|(name, class)| (name, RawDefinition::ClassName(class)))
            .chain(definitions)
            .collect();
        let raw_count = source.len();

        let definition_source =
            DefinitionSource::new(source, Autowirer::new(introspector, collector, handlers));
        info!(
            "构建定义源完成，原始定义 {} 个，有效定义 {} 个",
            raw_count,
            definition_source.len()
        );
        definition_source
    }
}
