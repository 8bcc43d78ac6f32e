//! 频率直方图模块
//!
//! 通用的键到出现次数的多重集合，是所有工作负载统计的基础容器。
//! 所有操作都是全量操作，没有错误分支；本类型不做内部同步，
//! 并发约束见代价模型的单写者契约。

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// 频率直方图
///
/// 记录每个键被观察到的次数。缺失键的计数定义为 0；
/// `sample_count` 恒等于净增量（增量次数减去减量次数）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Histogram<K>
where
    K: Eq + Hash + Clone,
{
    counts: HashMap<K, u64>,
    sample_count: u64,
}

impl<K> Histogram<K>
where
    K: Eq + Hash + Clone,
{
    /// 创建空直方图
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            sample_count: 0,
        }
    }

    /// 将指定键的计数加一
    pub fn increment(&mut self, key: K) {
        self.increment_by(key, 1);
    }

    /// 将指定键的计数增加 delta
    pub fn increment_by(&mut self, key: K, delta: u64) {
        if delta == 0 {
            return;
        }
        *self.counts.entry(key).or_insert(0) += delta;
        self.sample_count += delta;
    }

    /// 将指定键的计数减一
    ///
    /// 计数降为 0 时移除该键；对缺失键减量不产生任何效果
    pub fn decrement(&mut self, key: &K) {
        if let Some(count) = self.counts.get_mut(key) {
            *count -= 1;
            self.sample_count -= 1;
            if *count == 0 {
                self.counts.remove(key);
            }
        }
    }

    /// 获取指定键的计数，缺失键返回 0
    pub fn get(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// 判断指定键是否出现过（计数大于 0）
    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    /// 合并另一个直方图的全部计数
    pub fn merge(&mut self, other: &Histogram<K>) {
        for (key, count) in other.iter() {
            self.increment_by(key.clone(), count);
        }
    }

    /// 清空所有条目
    pub fn clear(&mut self) {
        self.counts.clear();
        self.sample_count = 0;
    }

    /// 遍历 (键, 计数) 对
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    /// 出现过的不同键数量
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// 是否没有任何条目
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 全部键的计数总和
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }
}

impl<K> Default for Histogram<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
