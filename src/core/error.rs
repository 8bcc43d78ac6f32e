//! 统一错误处理系统 for Partition Designer
//!
//! ## 设计理念
//!
//! 1. **按需设计**：评估流水线中的错误统一收敛到 `CostModelError`，
//!    保留失败事务等上下文信息
//! 2. **分层转换**：外部错误（IO、序列化）使用 `#[from]` 注解自动转换
//! 3. **统一接口**：`DesignerResult<T>` 提供统一的返回类型，简化错误传播

use thiserror::Error;

/// 代价模型框架的统一错误类型
#[derive(Error, Debug)]
pub enum CostModelError {
    #[error("无效的事务轨迹: {0}")]
    InvalidTrace(String),

    #[error("事务 {transaction} 代价估算失败: {message}")]
    Estimation {
        transaction: String,
        message: String,
    },

    #[error("分区估算错误: {0}")]
    PartitionEstimation(String),

    #[error("目录快照保存失败: {0}")]
    Snapshot(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for CostModelError {
    fn from(e: serde_json::Error) -> Self {
        CostModelError::Serialization(e.to_string())
    }
}

/// 统一的结果类型
pub type DesignerResult<T> = Result<T, CostModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CostModelError::Estimation {
            transaction: "NewOrder-42".to_string(),
            message: "参数缺失".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("NewOrder-42"));
        assert!(msg.contains("参数缺失"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CostModelError = io_err.into();
        assert!(matches!(err, CostModelError::Io(_)));
    }
}
