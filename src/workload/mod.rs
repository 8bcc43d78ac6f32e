//! 工作负载轨迹模块
//!
//! 记录的事务/查询执行序列，作为代价评估的回放输入。
//! 框架只通过迭代和过滤消费这些结构。
//!
//! ## 模块结构
//!
//! - `filter` - 事务过滤器契约及常用过滤器

pub mod filter;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::DesignerResult;

pub use filter::{Filter, FilterDecision, ProcedureNameFilter, TransactionLimitFilter};

/// 单条查询轨迹
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryTrace {
    /// 语句名称（目录中的 SQL 语句标识）
    pub name: String,
    /// 记录的参数值
    pub params: Vec<serde_json::Value>,
}

impl QueryTrace {
    pub fn new(name: impl Into<String>, params: Vec<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// 单条事务轨迹
///
/// 一次存储过程执行的完整记录，包含其全部查询（按执行顺序）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionTrace {
    pub id: u64,
    /// 所执行存储过程的名称
    pub procedure_name: String,
    /// 过程调用参数
    pub params: Vec<serde_json::Value>,
    queries: Vec<QueryTrace>,
}

impl TransactionTrace {
    pub fn new(
        id: u64,
        procedure_name: impl Into<String>,
        params: Vec<serde_json::Value>,
    ) -> Self {
        Self {
            id,
            procedure_name: procedure_name.into(),
            params,
            queries: Vec::new(),
        }
    }

    /// 追加一条查询轨迹
    pub fn add_query(&mut self, query: QueryTrace) {
        self.queries.push(query);
    }

    /// 该事务对应的目录对象名称（用于诊断日志）
    pub fn catalog_item_name(&self) -> &str {
        &self.procedure_name
    }

    /// 按执行顺序遍历查询
    pub fn queries(&self) -> &[QueryTrace] {
        &self.queries
    }

    /// 查询条数
    pub fn query_count(&self) -> usize {
        self.queries.len()
    }
}

/// 工作负载轨迹
///
/// 有序的事务轨迹序列，可跨多轮评估重复迭代
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workload {
    transactions: Vec<TransactionTrace>,
}

impl Workload {
    /// 创建空工作负载
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条事务轨迹
    pub fn add_transaction(&mut self, txn: TransactionTrace) {
        self.transactions.push(txn);
    }

    /// 按记录顺序遍历事务
    pub fn transactions(&self) -> &[TransactionTrace] {
        &self.transactions
    }

    /// 事务条数
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// 从 JSON 轨迹文件加载工作负载
    pub fn load<P: AsRef<Path>>(path: P) -> DesignerResult<Self> {
        let file = File::open(path)?;
        let workload = serde_json::from_reader(BufReader::new(file))?;
        Ok(workload)
    }

    /// 将工作负载保存为 JSON 轨迹文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> DesignerResult<()> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }
}
