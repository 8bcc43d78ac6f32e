//! 目录模型模块
//!
//! 描述候选设计方案的数据库模式（表、存储过程、分区数）。
//! 框架本身只把目录对象当作不透明标识符使用；这里保留了
//! 分区估算器所需的最小结构信息。

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::core::{CostModelError, DesignerResult};

/// 目录对象的全局唯一键
///
/// 形如 `kind:name` 的不透明字符串键，全序可比较，
/// 仅用作缓存和直方图的键，框架不解析其内部结构
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CatalogKey(String);

impl CatalogKey {
    /// 由对象种类和名称构造键
    pub fn from_parts(kind: &str, name: &str) -> Self {
        CatalogKey(format!("{}:{}", kind, name))
    }

    /// 键的字符串形式
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 可以产生目录键的目录对象
pub trait CatalogEntity {
    /// 对象名称
    fn name(&self) -> &str;

    /// 对象的全局唯一键
    fn catalog_key(&self) -> CatalogKey;
}

/// 表定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// 水平分区列；`None` 表示该表全副本复制到所有分区
    pub partition_column: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partition_column: None,
        }
    }

    /// 指定分区列
    pub fn with_partition_column(mut self, column: impl Into<String>) -> Self {
        self.partition_column = Some(column.into());
        self
    }

    /// 该表是否为全副本复制表
    pub fn is_replicated(&self) -> bool {
        self.partition_column.is_none()
    }
}

impl CatalogEntity for Table {
    fn name(&self) -> &str {
        &self.name
    }

    fn catalog_key(&self) -> CatalogKey {
        CatalogKey::from_parts("table", &self.name)
    }
}

/// 存储过程定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Procedure {
    pub name: String,
    /// 用于路由的参数下标；`None` 表示没有分区参数
    pub partition_parameter: Option<usize>,
}

impl Procedure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partition_parameter: None,
        }
    }

    /// 指定路由参数下标
    pub fn with_partition_parameter(mut self, index: usize) -> Self {
        self.partition_parameter = Some(index);
        self
    }
}

impl CatalogEntity for Procedure {
    fn name(&self) -> &str {
        &self.name
    }

    fn catalog_key(&self) -> CatalogKey {
        CatalogKey::from_parts("procedure", &self.name)
    }
}

/// 一个候选设计方案的目录快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub name: String,
    partition_count: usize,
    tables: Vec<Table>,
    procedures: Vec<Procedure>,
}

/// 写入诊断快照文件的外层包装，附带保存时间
#[derive(Debug, Serialize)]
struct CatalogSnapshot<'a> {
    saved_at: DateTime<Local>,
    catalog: &'a Catalog,
}

impl Catalog {
    /// 创建指定分区数的空目录
    pub fn new(name: impl Into<String>, partition_count: usize) -> Self {
        Self {
            name: name.into(),
            partition_count,
            tables: Vec::new(),
            procedures: Vec::new(),
        }
    }

    /// 添加表定义
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// 添加存储过程定义
    pub fn add_procedure(&mut self, procedure: Procedure) {
        self.procedures.push(procedure);
    }

    /// 分区数量
    pub fn partition_count(&self) -> usize {
        self.partition_count
    }

    /// 表数量
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// 存储过程数量
    pub fn procedure_count(&self) -> usize {
        self.procedures.len()
    }

    /// 全部表定义
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// 全部存储过程定义
    pub fn procedures(&self) -> &[Procedure] {
        &self.procedures
    }

    /// 按名称查找表
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// 按名称查找存储过程
    pub fn procedure(&self, name: &str) -> Option<&Procedure> {
        self.procedures.iter().find(|p| p.name == name)
    }

    /// 将目录持久化为诊断快照文件
    ///
    /// 评估流水线在事务估算失败时调用，用于事后排查
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> DesignerResult<()> {
        let file = File::create(path.as_ref())
            .map_err(|e| CostModelError::Snapshot(e.to_string()))?;
        let snapshot = CatalogSnapshot {
            saved_at: Local::now(),
            catalog: self,
        };
        serde_json::to_writer_pretty(BufWriter::new(file), &snapshot)
            .map_err(|e| CostModelError::Snapshot(e.to_string()))?;
        log::info!("目录快照已保存: {}", path.as_ref().display());
        Ok(())
    }
}
