//! 代价模型契约与评估流水线模块
//!
//! `CostModel` 是所有具体评分策略必须实现的契约：策略通过
//! 所有权内嵌一份 `CostModelState`（统计、配置、调试缓冲），
//! 自己实现单事务代价公式和按目录键的缓存失效；框架在契约
//! 的默认方法里提供完整的评估流水线（准备、过滤、累加、
//! 上界剪枝、失败诊断）。
//!
//! 并发契约：单写者。同一实例同一时刻只允许一轮
//! `estimate_workload_cost`；两个扫描计数器可以被其他线程
//! 中途采样，直方图的一致性读取只能在两轮评估之间进行。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::{Catalog, CatalogEntity, CatalogKey};
use crate::config::Config;
use crate::core::DesignerResult;
use crate::costmodel::config::CostModelConfig;
use crate::costmodel::collector::StatisticsCollector;
use crate::costmodel::debug::DebugBuffer;
use crate::estimator::PartitionEstimator;
use crate::workload::{Filter, FilterDecision, TransactionTrace, Workload};

/// 失败诊断快照的默认落盘位置
const DEFAULT_SNAPSHOT_PATH: &str = "catalog_dump.json";

/// 具体策略内嵌的共享状态
///
/// 包含分区估算器句柄、`prepare` 阶段记录的目录规模、
/// 配置、统计收集器和调试缓冲
pub struct CostModelState {
    estimator: Arc<dyn PartitionEstimator>,
    num_partitions: usize,
    num_tables: usize,
    num_procedures: usize,
    config: CostModelConfig,
    stats: StatisticsCollector,
    debug: DebugBuffer,
    snapshot_path: PathBuf,
}

impl CostModelState {
    pub fn new(estimator: Arc<dyn PartitionEstimator>) -> Self {
        Self {
            estimator,
            num_partitions: 0,
            num_tables: 0,
            num_procedures: 0,
            config: CostModelConfig::default(),
            stats: StatisticsCollector::new(),
            debug: DebugBuffer::new(),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
        }
    }

    /// 按运行配置构造，诊断快照落在配置的快照目录下
    pub fn from_config(estimator: Arc<dyn PartitionEstimator>, config: &Config) -> Self {
        let snapshot_path = Path::new(&config.snapshot_dir).join(DEFAULT_SNAPSHOT_PATH);
        Self::new(estimator).with_snapshot_path(snapshot_path)
    }

    /// 指定失败诊断快照的落盘位置
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = path.into();
        self
    }

    pub fn estimator(&self) -> &dyn PartitionEstimator {
        self.estimator.as_ref()
    }

    /// `prepare` 阶段记录当前目录的规模
    pub(crate) fn bind_catalog_counts(&mut self, catalog: &Catalog) {
        self.num_partitions = catalog.partition_count();
        self.num_tables = catalog.table_count();
        self.num_procedures = catalog.procedure_count();
    }

    pub fn partition_count(&self) -> usize {
        self.num_partitions
    }

    pub fn table_count(&self) -> usize {
        self.num_tables
    }

    pub fn procedure_count(&self) -> usize {
        self.num_procedures
    }

    pub fn config(&self) -> &CostModelConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CostModelConfig {
        &mut self.config
    }

    pub fn stats(&self) -> &StatisticsCollector {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut StatisticsCollector {
        &mut self.stats
    }

    pub fn debug(&self) -> &DebugBuffer {
        &self.debug
    }

    pub fn debug_mut(&mut self) -> &mut DebugBuffer {
        &mut self.debug
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// 清空统计和调试缓冲，评估轮次计数归零
    pub fn clear(&mut self) {
        self.stats.clear();
        self.debug.clear();
    }
}

/// 代价模型契约
///
/// 对象安全：搜索驱动可以持有 `Box<dyn CostModel>` 在多个
/// 评分策略之间切换。批量失效等泛型便捷方法带有
/// `where Self: Sized` 约束，不影响对象安全
pub trait CostModel {
    /// 内嵌共享状态的只读访问
    fn state(&self) -> &CostModelState;

    /// 内嵌共享状态的可变访问
    fn state_mut(&mut self) -> &mut CostModelState;

    /// 新一轮估算前的策略自定义初始化
    ///
    /// 在估算器重新绑定、目录规模记录完成之后调用，
    /// 策略在这里根据新目录重建或校验自己的子代价缓存
    fn prepare_impl(&mut self, catalog: &Catalog) -> DesignerResult<()>;

    /// 估算单条事务的代价
    ///
    /// 除对统计收集器的写入外不得改动框架状态；
    /// `workload`/`filter` 是可选的上下文
    fn estimate_transaction_cost(
        &mut self,
        catalog: &Catalog,
        workload: Option<&Workload>,
        filter: Option<&dyn Filter>,
        txn: &TransactionTrace,
    ) -> DesignerResult<f64>;

    /// 丢弃以该目录键缓存的子代价
    ///
    /// 幂等：键没有缓存条目时是空操作，永远不是错误
    fn invalidate_cache(&mut self, key: &CatalogKey);

    /// 清空内部统计
    ///
    /// 策略可以覆盖以一并清空自己的缓存（`force` 供覆盖实现使用）
    fn clear(&mut self, force: bool) {
        let _ = force;
        self.state_mut().clear();
    }

    // ------------------------------------------------------------------
    // 评估流水线（框架提供）
    // ------------------------------------------------------------------

    /// 针对新目录开始一轮估算前必须调用
    ///
    /// 无条件重新绑定分区估算器，记录分区/表/过程数量，
    /// 然后调用 `prepare_impl`
    fn prepare(&mut self, catalog: &Catalog) -> DesignerResult<()> {
        self.state().estimator().init_catalog(catalog)?;
        self.state_mut().bind_catalog_counts(catalog);
        self.prepare_impl(catalog)
    }

    /// 无工作负载/过滤器上下文的单事务估算
    fn estimate_transaction_cost_standalone(
        &mut self,
        catalog: &Catalog,
        txn: &TransactionTrace,
    ) -> DesignerResult<f64> {
        self.estimate_transaction_cost(catalog, None, None, txn)
    }

    /// 估算整个工作负载的代价
    ///
    /// 调用前必须已经 `prepare`（这里不会重复绑定估算器）。
    /// 先重置过滤器，然后按记录顺序迭代事务：被过滤器跳过的
    /// 事务不参与估算，`Halt` 停止迭代；单条事务估算失败会
    /// 记录失败事务、落盘目录诊断快照并把错误原样上抛；
    /// 运行总代价超过 `upper_bound` 时立即停止并返回部分总值，
    /// 这是剪枝短路，不是错误
    fn estimate_workload_cost(
        &mut self,
        catalog: &Catalog,
        workload: &Workload,
        mut filter: Option<&mut dyn Filter>,
        upper_bound: Option<f64>,
    ) -> DesignerResult<f64> {
        if let Some(f) = filter.as_deref_mut() {
            f.reset();
        }

        let mut total = 0.0f64;
        for txn in workload.transactions() {
            match filter.as_deref_mut() {
                Some(f) => match f.check(txn) {
                    FilterDecision::Allow => {}
                    FilterDecision::Skip => continue,
                    FilterDecision::Halt => break,
                },
                None => {}
            }

            let cost = match self.estimate_transaction_cost(
                catalog,
                Some(workload),
                filter.as_deref(),
                txn,
            ) {
                Ok(cost) => cost,
                Err(e) => {
                    log::error!(
                        "事务 {} 代价估算失败: {}",
                        txn.catalog_item_name(),
                        e
                    );
                    let snapshot_path = self.state().snapshot_path().to_path_buf();
                    if let Err(save_err) = catalog.save_snapshot(&snapshot_path) {
                        log::warn!("诊断快照落盘失败: {}", save_err);
                    }
                    return Err(e);
                }
            };
            total += cost;

            if let Some(bound) = upper_bound {
                if total > bound {
                    log::debug!("总代价 {} 超过上界 {}，提前终止估算", total, bound);
                    break;
                }
            }
        }
        Ok(total)
    }

    /// 无过滤器、无上界的整负载估算
    fn estimate_full_workload_cost(
        &mut self,
        catalog: &Catalog,
        workload: &Workload,
    ) -> DesignerResult<f64> {
        self.estimate_workload_cost(catalog, workload, None, None)
    }

    // ------------------------------------------------------------------
    // 批量缓存失效（框架提供，逐项归约到单键原语）
    // ------------------------------------------------------------------

    /// 失效单个目录对象的缓存
    fn invalidate_cache_entity<E>(&mut self, entity: &E)
    where
        Self: Sized,
        E: CatalogEntity + ?Sized,
    {
        self.invalidate_cache(&entity.catalog_key());
    }

    /// 按迭代顺序失效一组目录键
    fn invalidate_cache_keys<I>(&mut self, keys: I)
    where
        Self: Sized,
        I: IntoIterator<Item = CatalogKey>,
    {
        for key in keys {
            self.invalidate_cache(&key);
        }
    }

    /// 按迭代顺序失效一组目录对象
    fn invalidate_cache_entities<'a, I, E>(&mut self, entities: I)
    where
        Self: Sized,
        I: IntoIterator<Item = &'a E>,
        E: CatalogEntity + 'a,
    {
        for entity in entities {
            self.invalidate_cache(&entity.catalog_key());
        }
    }
}
