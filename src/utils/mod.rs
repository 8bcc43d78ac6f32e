//! 工具模块
//!
//! ## 模块结构
//!
//! - `logging` - 日志系统初始化与关闭

pub mod logging;
