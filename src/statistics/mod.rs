//! 统计信息模块
//!
//! 提供代价模型所需的频率统计功能
//!
//! ## 模块结构
//!
//! - `histogram` - 通用频率直方图（多重集合）

pub mod histogram;

pub use histogram::Histogram;
