//! 设计器提示模块
//!
//! 设计器层面的扁平配置对象，携带代价模型各因子的开关和权重，
//! 通过 `CostModelConfig::apply_hints` 整体套用。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{CostModelError, DesignerResult};

/// 设计器提示
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignerHints {
    /// 启用子代价缓存
    pub enable_costmodel_caching: bool,
    /// 启用倾斜（熵）代价
    pub enable_costmodel_skew: bool,
    pub weight_costmodel_skew: f64,
    /// 启用基础执行代价
    pub enable_costmodel_execution: bool,
    pub weight_costmodel_execution: f64,
    /// 启用多分区事务惩罚
    pub enable_costmodel_multipartition_penalty: bool,
    pub weight_costmodel_multipartition_penalty: f64,
    /// 启用过程执行倾斜因子
    pub enable_costmodel_java_execution: bool,
    pub weight_costmodel_java_execution: f64,
}

impl Default for DesignerHints {
    fn default() -> Self {
        Self {
            enable_costmodel_caching: true,
            enable_costmodel_skew: true,
            weight_costmodel_skew: 1.0,
            enable_costmodel_execution: true,
            weight_costmodel_execution: 1.0,
            enable_costmodel_multipartition_penalty: true,
            weight_costmodel_multipartition_penalty: 1.0,
            enable_costmodel_java_execution: false,
            weight_costmodel_java_execution: 1.0,
        }
    }
}

impl DesignerHints {
    /// 从 TOML 文件加载提示
    pub fn load<P: AsRef<Path>>(path: P) -> DesignerResult<Self> {
        let content = fs::read_to_string(path)?;
        let hints =
            toml::from_str(&content).map_err(|e| CostModelError::Config(e.to_string()))?;
        Ok(hints)
    }

    /// 将提示保存为 TOML 文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> DesignerResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CostModelError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hints() {
        let hints = DesignerHints::default();
        assert!(hints.enable_costmodel_caching);
        assert!(hints.enable_costmodel_execution);
        assert!(!hints.enable_costmodel_java_execution);
        assert_eq!(hints.weight_costmodel_skew, 1.0);
    }

    #[test]
    fn test_hints_toml_roundtrip() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = dir.path().join("hints.toml");

        let hints = DesignerHints {
            weight_costmodel_multipartition_penalty: 10.0,
            enable_costmodel_skew: false,
            ..Default::default()
        };
        hints.save(&path).expect("保存提示失败");

        let loaded = DesignerHints::load(&path).expect("加载提示失败");
        assert_eq!(loaded.weight_costmodel_multipartition_penalty, 10.0);
        assert!(!loaded.enable_costmodel_skew);
        assert!(loaded.enable_costmodel_execution);
    }
}
