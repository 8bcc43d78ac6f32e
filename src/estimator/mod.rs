//! 分区估算器模块
//!
//! 给定目录对象和参数值，回答一次查询/事务会触达哪些分区。
//! 框架把估算器当作不透明的同步预言机使用：`prepare` 阶段
//! 通过 `init_catalog` 重新绑定目录快照，具体代价模型在
//! 估算单条事务时调用其余方法。
//!
//! ## 模块结构
//!
//! - `PartitionEstimator` - 估算器契约
//! - `HashPartitionEstimator` - 基于参数哈希取模的参考实现

use std::collections::BTreeSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use parking_lot::RwLock;

use crate::catalog::Catalog;
use crate::core::{CostModelError, DesignerResult, PartitionId};
use crate::workload::{QueryTrace, TransactionTrace};

/// 分区估算器契约
///
/// 实现必须是同步、非阻塞的；目录绑定使用内部可变性，
/// 以便框架在持有共享引用时重新绑定
pub trait PartitionEstimator: Send + Sync {
    /// 绑定到新的目录快照
    ///
    /// 每轮独立的方案评估前必须重新绑定，跨目录复用旧绑定属于调用方错误
    fn init_catalog(&self, catalog: &Catalog) -> DesignerResult<()>;

    /// 估算事务的主执行分区（执行过程控制逻辑的分区）
    ///
    /// 无法确定单一主执行分区时返回 `None`
    fn transaction_base_partition(
        &self,
        catalog: &Catalog,
        txn: &TransactionTrace,
    ) -> DesignerResult<Option<PartitionId>>;

    /// 估算单条查询触达的分区集合
    fn query_partitions(
        &self,
        catalog: &Catalog,
        query: &QueryTrace,
        txn: &TransactionTrace,
    ) -> DesignerResult<BTreeSet<PartitionId>>;
}

/// 哈希取模分区估算器
///
/// 参考实现：按存储过程声明的路由参数取哈希后对分区数取模。
/// 没有路由参数的过程视为多分区执行；没有参数的查询视为广播
#[derive(Debug, Default)]
pub struct HashPartitionEstimator {
    binding: RwLock<Option<usize>>,
}

impl HashPartitionEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前绑定的分区数
    fn partition_count(&self) -> DesignerResult<usize> {
        (*self.binding.read()).ok_or_else(|| {
            CostModelError::PartitionEstimation("估算器尚未绑定目录".to_string())
        })
    }

    /// 参数值到分区的确定性映射
    fn hash_value(value: &serde_json::Value, partition_count: usize) -> PartitionId {
        let mut hasher = DefaultHasher::new();
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.hash(&mut hasher);
                } else {
                    n.to_string().hash(&mut hasher);
                }
            }
            other => other.to_string().hash(&mut hasher),
        }
        (hasher.finish() % partition_count as u64) as PartitionId
    }
}

impl PartitionEstimator for HashPartitionEstimator {
    fn init_catalog(&self, catalog: &Catalog) -> DesignerResult<()> {
        *self.binding.write() = Some(catalog.partition_count());
        log::debug!(
            "分区估算器已绑定目录 {} ({} 个分区)",
            catalog.name,
            catalog.partition_count()
        );
        Ok(())
    }

    fn transaction_base_partition(
        &self,
        catalog: &Catalog,
        txn: &TransactionTrace,
    ) -> DesignerResult<Option<PartitionId>> {
        let partition_count = self.partition_count()?;
        let procedure = catalog.procedure(txn.catalog_item_name()).ok_or_else(|| {
            CostModelError::InvalidTrace(format!(
                "目录中不存在存储过程 {}",
                txn.catalog_item_name()
            ))
        })?;

        let Some(index) = procedure.partition_parameter else {
            return Ok(None);
        };
        let Some(value) = txn.params.get(index) else {
            return Err(CostModelError::InvalidTrace(format!(
                "事务 {} 缺少路由参数 {}",
                txn.id, index
            )));
        };
        Ok(Some(Self::hash_value(value, partition_count)))
    }

    fn query_partitions(
        &self,
        _catalog: &Catalog,
        query: &QueryTrace,
        _txn: &TransactionTrace,
    ) -> DesignerResult<BTreeSet<PartitionId>> {
        let partition_count = self.partition_count()?;
        let mut partitions = BTreeSet::new();
        match query.params.first() {
            Some(value) => {
                partitions.insert(Self::hash_value(value, partition_count));
            }
            None => {
                // 无参数查询按广播处理，触达全部分区
                for p in 0..partition_count {
                    partitions.insert(p as PartitionId);
                }
            }
        }
        Ok(partitions)
    }
}
