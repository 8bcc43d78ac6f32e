//! 事务过滤器模块
//!
//! 评估流水线迭代工作负载时逐条咨询过滤器，
//! 过滤器可以放行、跳过单条事务，或要求整体停止迭代。
//! 过滤器是有状态的，每轮评估开始前必须 `reset`。

use std::collections::HashSet;

use crate::workload::TransactionTrace;

/// 过滤器对单条事务的裁决
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// 放行该事务，参与代价估算
    Allow,
    /// 跳过该事务，继续迭代
    Skip,
    /// 停止整个迭代
    Halt,
}

/// 事务过滤器契约
pub trait Filter {
    /// 恢复到初始状态，供下一轮评估使用
    fn reset(&mut self);

    /// 裁决单条事务
    fn check(&mut self, txn: &TransactionTrace) -> FilterDecision;
}

/// 按存储过程名称白名单过滤
///
/// 名称不在白名单内的事务被跳过
#[derive(Debug, Clone)]
pub struct ProcedureNameFilter {
    allowed: HashSet<String>,
}

impl ProcedureNameFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Filter for ProcedureNameFilter {
    fn reset(&mut self) {
        // 无状态过滤器，无需恢复
    }

    fn check(&mut self, txn: &TransactionTrace) -> FilterDecision {
        if self.allowed.contains(txn.catalog_item_name()) {
            FilterDecision::Allow
        } else {
            FilterDecision::Skip
        }
    }
}

/// 限制放行事务总数的过滤器
///
/// 放行满 `limit` 条后要求停止迭代
#[derive(Debug, Clone)]
pub struct TransactionLimitFilter {
    limit: usize,
    seen: usize,
}

impl TransactionLimitFilter {
    pub fn new(limit: usize) -> Self {
        Self { limit, seen: 0 }
    }
}

impl Filter for TransactionLimitFilter {
    fn reset(&mut self) {
        self.seen = 0;
    }

    fn check(&mut self, _txn: &TransactionTrace) -> FilterDecision {
        if self.seen >= self.limit {
            return FilterDecision::Halt;
        }
        self.seen += 1;
        FilterDecision::Allow
    }
}
