//! 代价模型模块
//!
//! 可插拔的工作负载代价模型框架：给定工作负载轨迹和候选
//! 分区方案，产出用于方案搜索排序的标量代价。
//!
//! ## 模块结构
//!
//! - `config` - 各代价因子的开关与权重
//! - `hints` - 设计器提示（外部配置对象）
//! - `collector` - 评估过程中的频率统计收集器
//! - `debug` - 可开关的调试信息缓冲
//! - `model` - 代价模型契约与评估流水线

pub mod collector;
pub mod config;
pub mod debug;
pub mod hints;
pub mod model;

pub use collector::{ProcedureClassification, StatisticsCollector};
pub use config::CostModelConfig;
pub use debug::DebugBuffer;
pub use hints::DesignerHints;
pub use model::{CostModel, CostModelState};
