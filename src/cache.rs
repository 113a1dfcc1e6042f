//! 按标签失效的进程内缓存
//!
//! 用于缓存帮派详情等聚合视图。写操作通过 `gang:{id}` 之类的标签
//! 使所有相关条目失效；管理后台修改参考数据时直接清空。
//!
//! 每个标签有一个只增不减的代数，失效时递增。读取数据库前记下代数，
//! 写入时代数已变化说明期间发生过失效，读到的数据可能过期，不写入。

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;

/// 帮派详情缓存使用的标签
pub fn gang_tag(gang_id: i32) -> String {
    format!("gang:{}", gang_id)
}

/// 帮派详情缓存使用的键
pub fn gang_details_key(gang_id: i32) -> String {
    format!("gang-details:{}", gang_id)
}

struct Entry<V> {
    value: V,
    tags: Vec<String>,
}

struct Inner<V> {
    entries: HashMap<String, Entry<V>>,
    // tag -> keys
    tags: HashMap<String, HashSet<String>>,
    // tag -> 失效次数
    generations: HashMap<String, u64>,
    // clear 的次数
    epoch: u64,
}

impl<V> Inner<V> {
    fn generation(&self, tags: &[String]) -> u64 {
        tags.iter()
            .filter_map(|t| self.generations.get(t))
            .fold(self.epoch, |acc, g| acc.wrapping_add(*g))
    }
}

pub struct TagCache<V> {
    enabled: bool,
    inner: RwLock<Inner<V>>,
}

impl<V: Clone> TagCache<V> {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                tags: HashMap::new(),
                generations: HashMap::new(),
                epoch: 0,
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        if !self.enabled {
            return None;
        }
        self.inner.read().entries.get(key).map(|e| e.value.clone())
    }

    /// 当前代数，在读取数据库之前调用
    pub fn generation(&self, tags: &[String]) -> u64 {
        self.inner.read().generation(tags)
    }

    /// 仅当这些标签在 `generation` 之后没有失效过时写入，返回是否写入
    pub fn insert_if_current(
        &self,
        key: impl Into<String>,
        value: V,
        tags: &[String],
        generation: u64,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        let mut inner = self.inner.write();
        if inner.generation(tags) != generation {
            log::debug!("缓存写入被跳过，标签已失效: {:?}", tags);
            return false;
        }
        Self::store(&mut inner, key.into(), value, tags);
        true
    }

    pub fn insert(&self, key: impl Into<String>, value: V, tags: &[String]) {
        if !self.enabled {
            return;
        }
        let mut inner = self.inner.write();
        Self::store(&mut inner, key.into(), value, tags);
    }

    fn store(inner: &mut Inner<V>, key: String, value: V, tags: &[String]) {
        // 旧条目的标签索引先移除
        if let Some(old) = inner.entries.remove(&key) {
            for tag in old.tags {
                if let Some(keys) = inner.tags.get_mut(&tag) {
                    keys.remove(&key);
                }
            }
        }
        for tag in tags {
            inner
                .tags
                .entry(tag.clone())
                .or_default()
                .insert(key.clone());
        }
        inner.entries.insert(
            key,
            Entry {
                value,
                tags: tags.to_vec(),
            },
        );
    }

    /// 使带有该标签的所有条目失效，返回移除的条目数
    pub fn invalidate_tag(&self, tag: &str) -> usize {
        let mut inner = self.inner.write();
        *inner.generations.entry(tag.to_string()).or_default() += 1;
        let Some(keys) = inner.tags.remove(tag) else {
            return 0;
        };
        let mut removed = 0;
        for key in keys {
            if let Some(entry) = inner.entries.remove(&key) {
                removed += 1;
                for other in entry.tags.iter().filter(|t| t.as_str() != tag) {
                    if let Some(set) = inner.tags.get_mut(other) {
                        set.remove(&key);
                    }
                }
            }
        }
        if removed > 0 {
            log::debug!("缓存标签 {} 失效，移除 {} 个条目", tag, removed);
        }
        removed
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.entries.clear();
        inner.tags.clear();
        inner.epoch += 1;
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidating_a_tag_drops_every_tagged_entry() {
        let cache = TagCache::new(true);
        cache.insert("a", 1, &[gang_tag(1)]);
        cache.insert("b", 2, &[gang_tag(1), gang_tag(2)]);
        cache.insert("c", 3, &[gang_tag(2)]);

        assert_eq!(cache.invalidate_tag(&gang_tag(1)), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("c"), Some(3));

        // b 已经移除，gang:2 只剩 c
        assert_eq!(cache.invalidate_tag(&gang_tag(2)), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn reinserting_replaces_old_tags() {
        let cache = TagCache::new(true);
        cache.insert("a", 1, &[gang_tag(1)]);
        cache.insert("a", 2, &[gang_tag(2)]);
        assert_eq!(cache.invalidate_tag(&gang_tag(1)), 0);
        assert_eq!(cache.get("a"), Some(2));
    }

    #[test]
    fn invalidation_during_a_load_discards_the_stale_value() {
        let cache = TagCache::new(true);
        let tags = [gang_tag(1)];

        let generation = cache.generation(&tags);
        // 读取数据库期间另一个请求修改了帮派
        cache.invalidate_tag(&gang_tag(1));
        assert!(!cache.insert_if_current("a", 1, &tags, generation));
        assert_eq!(cache.get("a"), None);

        let generation = cache.generation(&tags);
        cache.invalidate_tag(&gang_tag(2));
        assert!(cache.insert_if_current("a", 2, &tags, generation));
        assert_eq!(cache.get("a"), Some(2));

        let generation = cache.generation(&tags);
        cache.clear();
        assert!(!cache.insert_if_current("a", 3, &tags, generation));
        assert!(cache.is_empty());
    }

    #[test]
    fn disabled_cache_stores_nothing() {
        let cache = TagCache::new(false);
        cache.insert("a", 1, &[gang_tag(1)]);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.len(), 0);
    }
}
