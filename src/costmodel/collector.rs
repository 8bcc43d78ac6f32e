//! 统计收集器模块
//!
//! 一轮评估内维护的六个频率直方图，以及已检查事务/查询的
//! 单调计数器。六个直方图的增量语义是下游分类正确性的
//! 基础，必须严格保持：
//!
//! - 过程调用直方图：每条事务记一次，键为过程键
//! - 单分区/多分区直方图：每条事务恰好记入其中之一
//! - 主执行分区直方图：每条事务对每个承载过程控制逻辑的分区记一次
//! - 事务-分区触达直方图：每个 (事务, 分区) 对至多记一次
//! - 查询-分区触达直方图：每个 (查询, 分区) 对各记一次

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::catalog::CatalogKey;
use crate::core::PartitionId;
use crate::statistics::Histogram;

/// 过程的单分区/多分区分类结果
///
/// 三值结果：没有任何记录时必须显式表示为 `Unknown`，
/// 不得折叠成布尔值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureClassification {
    /// 只以单分区方式执行过
    SinglePartition,
    /// 至少有一次多分区执行
    MultiPartition,
    /// 没有任何执行记录
    Unknown,
}

/// 评估过程统计收集器
///
/// 单写者：同一实例同一时刻只允许一轮评估写入。
/// 两个标量计数器是宽松原子量，允许其他线程在评估中途采样；
/// 六个直方图不做内部同步，一致性读取只能在两轮评估之间进行
#[derive(Debug, Default)]
pub struct StatisticsCollector {
    /// 每个过程被调用的次数
    proc_histogram: Histogram<CatalogKey>,
    /// 以单分区方式执行的过程调用
    single_partition_procs: Histogram<CatalogKey>,
    /// 以多分区方式执行的过程调用
    multi_partition_procs: Histogram<CatalogKey>,
    /// 承载事务过程控制逻辑的分区
    exec_partitions: Histogram<PartitionId>,
    /// 事务至少触达一次的分区（每事务每分区至多一条）
    txn_partitions: Histogram<PartitionId>,
    /// 查询触达的分区（同一事务内多条查询各计一条）
    query_partitions: Histogram<PartitionId>,
    txn_counter: AtomicU64,
    query_counter: AtomicU64,
}

impl StatisticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次过程调用及其单分区/多分区分类
    pub fn record_invocation(&mut self, procedure: CatalogKey, single_partition: bool) {
        self.proc_histogram.increment(procedure.clone());
        if single_partition {
            self.single_partition_procs.increment(procedure);
        } else {
            self.multi_partition_procs.increment(procedure);
        }
    }

    /// 记录事务过程控制逻辑所在的分区
    pub fn record_execution_partition(&mut self, partition: PartitionId) {
        self.exec_partitions.increment(partition);
    }

    /// 记录事务触达的分区集合
    ///
    /// 调用方负责传入去重后的集合，保证每个 (事务, 分区) 对至多一条
    pub fn record_transaction_partitions(&mut self, partitions: &BTreeSet<PartitionId>) {
        for &partition in partitions {
            self.txn_partitions.increment(partition);
        }
    }

    /// 记录单条查询触达的分区集合
    pub fn record_query_partitions(&mut self, partitions: &BTreeSet<PartitionId>) {
        for &partition in partitions {
            self.query_partitions.increment(partition);
        }
    }

    /// 已检查事务数加一
    pub fn next_transaction(&self) -> u64 {
        self.txn_counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// 已检查查询数增加 n
    pub fn add_examined_queries(&self, n: u64) -> u64 {
        self.query_counter.fetch_add(n, Ordering::Relaxed) + n
    }

    /// 本轮已检查的事务数
    pub fn transactions_examined(&self) -> u64 {
        self.txn_counter.load(Ordering::Relaxed)
    }

    /// 本轮已检查的查询数
    pub fn queries_examined(&self) -> u64 {
        self.query_counter.load(Ordering::Relaxed)
    }

    // ------------------------------------------------------------------
    // 派生查询
    // ------------------------------------------------------------------

    /// 过程的单分区/多分区分类
    ///
    /// 多分区直方图包含该过程即为 `MultiPartition`；否则若单分区
    /// 直方图包含则为 `SinglePartition`；两者都没有记录为 `Unknown`
    pub fn classify_procedure(&self, procedure: &CatalogKey) -> ProcedureClassification {
        if self.multi_partition_procs.contains(procedure) {
            ProcedureClassification::MultiPartition
        } else if self.single_partition_procs.contains(procedure) {
            ProcedureClassification::SinglePartition
        } else {
            ProcedureClassification::Unknown
        }
    }

    /// 上一轮估算中完全未被触达的分区
    ///
    /// 只考察主执行分区直方图：多分区事务总会触达所有分区，
    /// 把查询触达算进来会掩盖真正闲置的分区
    pub fn untouched_partitions(&self, partition_count: usize) -> BTreeSet<PartitionId> {
        let mut untouched = BTreeSet::new();
        for i in 0..partition_count {
            let partition = i as PartitionId;
            if !self.exec_partitions.contains(&partition) {
                untouched.insert(partition);
            }
        }
        untouched
    }

    // ------------------------------------------------------------------
    // 直方图访问
    // ------------------------------------------------------------------

    pub fn proc_histogram(&self) -> &Histogram<CatalogKey> {
        &self.proc_histogram
    }

    pub fn single_partition_proc_histogram(&self) -> &Histogram<CatalogKey> {
        &self.single_partition_procs
    }

    pub fn multi_partition_proc_histogram(&self) -> &Histogram<CatalogKey> {
        &self.multi_partition_procs
    }

    /// 主执行分区直方图：每个分区执行事务过程控制逻辑的次数
    pub fn execution_partition_histogram(&self) -> &Histogram<PartitionId> {
        &self.exec_partitions
    }

    /// 事务触达直方图：事务至少触达一次各分区的次数
    pub fn transaction_partition_histogram(&self) -> &Histogram<PartitionId> {
        &self.txn_partitions
    }

    /// 查询触达直方图：查询触达各分区的次数
    pub fn query_partition_histogram(&self) -> &Histogram<PartitionId> {
        &self.query_partitions
    }

    /// 清空全部直方图并将计数器归零
    pub fn clear(&mut self) {
        self.proc_histogram.clear();
        self.single_partition_procs.clear();
        self.multi_partition_procs.clear();
        self.exec_partitions.clear();
        self.txn_partitions.clear();
        self.query_partitions.clear();
        self.txn_counter.store(0, Ordering::Relaxed);
        self.query_counter.store(0, Ordering::Relaxed);
    }

    /// 六个直方图的格式化报告（人读诊断用）
    pub fn debug_histograms(&self) -> String {
        fn section<K>(out: &mut String, title: &str, histogram: &Histogram<K>)
        where
            K: Eq + std::hash::Hash + Clone + std::fmt::Display,
        {
            let _ = writeln!(out, "{} [{} 项 / {} 样本]", title, histogram.len(), histogram.sample_count());
            let mut entries: Vec<(String, u64)> = histogram
                .iter()
                .map(|(k, c)| (k.to_string(), c))
                .collect();
            entries.sort();
            for (key, count) in entries {
                let _ = writeln!(out, "  {} => {}", key, count);
            }
        }

        let mut out = String::new();
        section(&mut out, "过程调用", &self.proc_histogram);
        section(&mut out, "单分区事务", &self.single_partition_procs);
        section(&mut out, "多分区事务", &self.multi_partition_procs);
        section(&mut out, "主执行分区", &self.exec_partitions);
        section(&mut out, "事务触达分区", &self.txn_partitions);
        section(&mut out, "查询触达分区", &self.query_partitions);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> CatalogKey {
        CatalogKey::from_parts("procedure", name)
    }

    #[test]
    fn test_invocation_updates_exactly_one_classification() {
        let mut stats = StatisticsCollector::new();
        stats.record_invocation(key("NewOrder"), true);
        stats.record_invocation(key("NewOrder"), false);

        assert_eq!(stats.proc_histogram().get(&key("NewOrder")), 2);
        assert_eq!(stats.single_partition_proc_histogram().get(&key("NewOrder")), 1);
        assert_eq!(stats.multi_partition_proc_histogram().get(&key("NewOrder")), 1);
    }

    #[test]
    fn test_classification_unknown_without_history() {
        let stats = StatisticsCollector::new();
        assert_eq!(
            stats.classify_procedure(&key("Payment")),
            ProcedureClassification::Unknown
        );
    }

    #[test]
    fn test_classification_multi_partition_wins() {
        let mut stats = StatisticsCollector::new();
        stats.record_invocation(key("Payment"), true);
        assert_eq!(
            stats.classify_procedure(&key("Payment")),
            ProcedureClassification::SinglePartition
        );

        // 一次多分区执行后分类永久翻转，与单分区历史无关
        stats.record_invocation(key("Payment"), false);
        assert_eq!(
            stats.classify_procedure(&key("Payment")),
            ProcedureClassification::MultiPartition
        );
    }

    #[test]
    fn test_untouched_partitions() {
        let mut stats = StatisticsCollector::new();
        let all: BTreeSet<PartitionId> = stats.untouched_partitions(4);
        assert_eq!(all, (0..4).collect());

        stats.record_execution_partition(2);
        let untouched = stats.untouched_partitions(4);
        assert!(!untouched.contains(&2));
        assert_eq!(untouched.len(), 3);
    }

    #[test]
    fn test_untouched_ignores_query_touches() {
        let mut stats = StatisticsCollector::new();
        stats.record_query_partitions(&BTreeSet::from([1]));
        stats.record_transaction_partitions(&BTreeSet::from([1]));
        // 只有主执行分区直方图会把分区从闲置集合里移除
        assert!(stats.untouched_partitions(2).contains(&1));
    }

    #[test]
    fn test_txn_vs_query_touch_granularity() {
        let mut stats = StatisticsCollector::new();
        // 一条事务有三条查询触达分区 0，其中两条还触达分区 1
        stats.record_transaction_partitions(&BTreeSet::from([0, 1]));
        stats.record_query_partitions(&BTreeSet::from([0]));
        stats.record_query_partitions(&BTreeSet::from([0, 1]));
        stats.record_query_partitions(&BTreeSet::from([0, 1]));

        assert_eq!(stats.transaction_partition_histogram().get(&0), 1);
        assert_eq!(stats.transaction_partition_histogram().get(&1), 1);
        assert_eq!(stats.query_partition_histogram().get(&0), 3);
        assert_eq!(stats.query_partition_histogram().get(&1), 2);
    }

    #[test]
    fn test_counters_and_clear() {
        let mut stats = StatisticsCollector::new();
        stats.next_transaction();
        stats.next_transaction();
        stats.add_examined_queries(5);
        stats.record_invocation(key("A"), true);
        stats.record_execution_partition(0);

        assert_eq!(stats.transactions_examined(), 2);
        assert_eq!(stats.queries_examined(), 5);

        stats.clear();
        assert_eq!(stats.transactions_examined(), 0);
        assert_eq!(stats.queries_examined(), 0);
        assert!(stats.proc_histogram().is_empty());
        assert!(stats.execution_partition_histogram().is_empty());
    }

    #[test]
    fn test_debug_histograms_report() {
        let mut stats = StatisticsCollector::new();
        stats.record_invocation(key("NewOrder"), true);
        let report = stats.debug_histograms();
        assert!(report.contains("过程调用"));
        assert!(report.contains("procedure:NewOrder"));
    }
}
