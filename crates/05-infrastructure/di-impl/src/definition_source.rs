//! 定义源
//!
//! 标识符到定义的映射：未命中时自动装配并缓存，显式定义经归一化后写入。
//! 同一标识符的首次解析在并发下只执行一次。

use crate::autowire::Autowirer;
use crate::normalizer::{normalize_definition, normalize_source};
use dashmap::DashMap;
use di_abstractions::{Definition, DefinitionSourceInterface, RawDefinition};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// 保持插入顺序的定义表
///
/// `generation` 在显式写入或清空时递增，自动装配结果只写入未被改动过的表。
#[derive(Debug, Default)]
struct DefinitionTable {
    entries: HashMap<String, Arc<Definition>>,
    order: Vec<String>,
    generation: u64,
}

impl DefinitionTable {
    fn get(&self, name: &str) -> Option<Arc<Definition>> {
        self.entries.get(name).cloned()
    }

    /// 写入定义，已存在的标识符保留原位置
    fn insert(&mut self, name: String, definition: Arc<Definition>) {
        if self.entries.insert(name.clone(), definition).is_none() {
            self.order.push(name);
        }
    }

    fn remove(&mut self, name: &str) -> Option<Arc<Definition>> {
        let removed = self.entries.remove(name);
        if removed.is_some() {
            self.order.retain(|existing| existing != name);
        }
        removed
    }

    fn snapshot(&self) -> Vec<(String, Arc<Definition>)> {
        self.order
            .iter()
            .filter_map(|name| {
                self.entries
                    .get(name)
                    .map(|definition| (name.clone(), definition.clone()))
            })
            .collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// 定义源
pub struct DefinitionSource {
    source: RwLock<DefinitionTable>,
    resolving: DashMap<String, Arc<Mutex<()>>>,
    autowirer: Autowirer,
}

impl DefinitionSource {
    /// 以批量原始定义创建定义源，无法归一化的条目被丢弃
    pub fn new<I, K>(source: I, autowirer: Autowirer) -> Self
    where
        I: IntoIterator<Item = (K, RawDefinition)>,
        K: Into<String>,
    {
        let mut table = DefinitionTable::default();
        for (name, definition) in normalize_source(&autowirer, source) {
            table.insert(name, Arc::new(definition));
        }
        debug!("定义源初始化完成，初始定义 {} 个", table.len());

        Self {
            source: RwLock::new(table),
            resolving: DashMap::new(),
            autowirer,
        }
    }

    /// 创建没有初始定义的定义源
    pub fn empty(autowirer: Autowirer) -> Self {
        Self::new(Vec::<(String, RawDefinition)>::new(), autowirer)
    }

    /// 自动装配器
    pub fn autowirer(&self) -> &Autowirer {
        &self.autowirer
    }

    /// 获取标识符的定义
    ///
    /// 已缓存时直接返回同一份定义；否则以标识符作为类型名称自动装配，
    /// 成功的结果被缓存，失败不缓存，之后注册该标识符仍然有效。
    /// 自动装配期间该标识符被显式写入时返回写入的定义；定义源被清空或改动时结果不缓存。
    pub fn get_definition(&self, name: &str) -> Option<Arc<Definition>> {
        if let Some(definition) = self.source.read().get(name) {
            trace!("定义缓存命中: {}", name);
            return Some(definition);
        }

        let lock = self
            .resolving
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let resolved = {
            let _guard = lock.lock();

            // 等待期间其它调用方可能已经完成解析
            let (cached, generation) = {
                let source = self.source.read();
                (source.get(name), source.generation)
            };
            match cached {
                Some(definition) => Some(definition),
                None => self.autowire_and_cache(name, generation),
            }
        };
        self.resolving.remove(name);
        resolved
    }

    fn autowire_and_cache(&self, name: &str, generation: u64) -> Option<Arc<Definition>> {
        debug!("定义缓存未命中，尝试自动装配: {}", name);
        let Some(definition) = self.autowirer.autowire(name, None) else {
            debug!("无法为标识符生成定义: {}", name);
            return None;
        };
        let definition = Arc::new(Definition::Object(definition));

        let mut source = self.source.write();
        if let Some(existing) = source.get(name) {
            debug!("自动装配期间定义已被写入，使用已有定义: {}", name);
            return Some(existing);
        }
        if source.generation == generation {
            source.insert(name.to_string(), definition.clone());
        } else {
            debug!("自动装配期间定义源已改动，结果不缓存: {}", name);
        }
        Some(definition)
    }

    /// 当前全部定义，按插入顺序
    pub fn get_definitions(&self) -> Vec<(String, Arc<Definition>)> {
        self.source.read().snapshot()
    }

    /// 归一化并写入原始定义
    ///
    /// 覆盖已有条目；归一化失败时移除已有条目。
    pub fn add_definition(&self, name: impl Into<String>, definition: RawDefinition) -> &Self {
        let name = name.into();
        let normalized = normalize_definition(&self.autowirer, &name, definition);

        let mut source = self.source.write();
        source.bump();
        match normalized {
            Some(definition) => {
                debug!("写入定义: {}", name);
                source.insert(name, Arc::new(definition));
            }
            None => {
                if source.remove(&name).is_some() {
                    debug!("原始定义无法归一化，移除已有定义: {}", name);
                }
            }
        }
        drop(source);
        self
    }

    /// 清空全部定义
    pub fn clear_definitions(&self) {
        let mut source = self.source.write();
        info!("清空定义源，共 {} 个定义", source.len());
        source.clear();
        source.bump();
    }

    /// 是否已缓存指定标识符
    pub fn has_definition(&self, name: &str) -> bool {
        self.source.read().entries.contains_key(name)
    }

    /// 已缓存定义数量
    pub fn len(&self) -> usize {
        self.source.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DefinitionSourceInterface for DefinitionSource {
    fn get_definition(&self, name: &str) -> Option<Arc<Definition>> {
        Self::get_definition(self, name)
    }

    fn get_definitions(&self) -> Vec<(String, Arc<Definition>)> {
        Self::get_definitions(self)
    }

    fn add_definition(&self, name: String, definition: RawDefinition) -> &Self {
        Self::add_definition(self, name, definition)
    }

    fn clear_definitions(&self) {
        Self::clear_definitions(self);
    }
}

impl fmt::Debug for DefinitionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionSource")
            .field("definitions", &self.source.read().order)
            .finish_non_exhaustive()
    }
}
