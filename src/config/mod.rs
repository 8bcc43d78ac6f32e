//! 设计器运行配置模块
//!
//! 日志和诊断快照等环境配置，显式传入而不是进程级全局状态。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::{CostModelError, DesignerResult};

/// 设计器运行配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub max_log_file_size: u64,
    pub max_log_files: usize,
    /// 评估失败时目录诊断快照的落盘目录
    pub snapshot_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "logs".to_string(),
            log_file: "designer".to_string(),
            max_log_file_size: 100 * 1024 * 1024, // 100MB
            max_log_files: 5,
            snapshot_dir: "snapshots".to_string(),
        }
    }
}

impl Config {
    /// 从 TOML 文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> DesignerResult<Self> {
        let content = fs::read_to_string(path)?;
        let config =
            toml::from_str(&content).map_err(|e| CostModelError::Config(e.to_string()))?;
        Ok(config)
    }

    /// 将配置保存为 TOML 文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> DesignerResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CostModelError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}
