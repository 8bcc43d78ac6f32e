//! 核心类型模块
//!
//! 提供贯穿整个框架的基础类型
//!
//! ## 模块结构
//!
//! - `error` - 统一错误类型

pub mod error;

pub use error::{CostModelError, DesignerResult};

/// 分区编号
///
/// 分布式引擎中一个数据/执行分片的索引，从 0 开始连续编号
pub type PartitionId = u32;
