//! 代价模型配置模块
//!
//! 每个评分因子一对独立的（开关, 权重）。被禁用的因子无论
//! 权重是多少都不得影响聚合代价；权重不做取值校验，任何
//! 有限实数都被接受，修改在下一轮评估生效。

use crate::costmodel::hints::DesignerHints;

/// 代价模型开关与权重
#[derive(Debug, Clone)]
pub struct CostModelConfig {
    use_caching: bool,
    use_execution: bool,
    execution_weight: f64,
    use_entropy: bool,
    entropy_weight: f64,
    use_multipartition_penalty: bool,
    multipartition_penalty: f64,
    use_java_execution: bool,
    java_execution_weight: f64,
    /// 按分区执行权重，当前没有因子消费，保留作前向兼容
    entropy_txn_weight: f64,
}

impl Default for CostModelConfig {
    fn default() -> Self {
        Self {
            use_caching: true,
            use_execution: true,
            execution_weight: 1.0,
            use_entropy: true,
            entropy_weight: 1.0,
            use_multipartition_penalty: true,
            multipartition_penalty: 1.0,
            use_java_execution: false,
            java_execution_weight: 1.0,
            entropy_txn_weight: 1.0,
        }
    }
}

impl CostModelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 整体套用设计器提示中的代价模型字段
    pub fn apply_hints(&mut self, hints: &DesignerHints) {
        self.set_caching_enabled(hints.enable_costmodel_caching);

        self.set_entropy_enabled(hints.enable_costmodel_skew);
        self.set_entropy_weight(hints.weight_costmodel_skew);

        self.set_execution_cost_enabled(hints.enable_costmodel_execution);
        self.set_execution_weight(hints.weight_costmodel_execution);

        self.set_multipartition_penalty_enabled(hints.enable_costmodel_multipartition_penalty);
        self.set_multipartition_penalty(hints.weight_costmodel_multipartition_penalty);

        self.set_java_execution_enabled(hints.enable_costmodel_java_execution);
        self.set_java_execution_weight(hints.weight_costmodel_java_execution);
    }

    // ------------------------------------------------------------------
    // 缓存
    // ------------------------------------------------------------------

    pub fn is_caching_enabled(&self) -> bool {
        self.use_caching
    }

    pub fn set_caching_enabled(&mut self, enabled: bool) {
        log::debug!("代价模型缓存: {}", if enabled { "启用" } else { "禁用" });
        self.use_caching = enabled;
    }

    // ------------------------------------------------------------------
    // 基础执行代价
    // ------------------------------------------------------------------

    pub fn is_execution_cost_enabled(&self) -> bool {
        self.use_execution
    }

    pub fn set_execution_cost_enabled(&mut self, enabled: bool) {
        log::debug!("执行代价因子: {}", if enabled { "启用" } else { "禁用" });
        self.use_execution = enabled;
    }

    pub fn execution_weight(&self) -> f64 {
        self.execution_weight
    }

    pub fn set_execution_weight(&mut self, weight: f64) {
        log::debug!("执行代价权重: {}", weight);
        self.execution_weight = weight;
    }

    // ------------------------------------------------------------------
    // 倾斜（熵）代价
    // ------------------------------------------------------------------

    pub fn is_entropy_enabled(&self) -> bool {
        self.use_entropy
    }

    pub fn set_entropy_enabled(&mut self, enabled: bool) {
        log::debug!("倾斜代价因子: {}", if enabled { "启用" } else { "禁用" });
        self.use_entropy = enabled;
    }

    pub fn entropy_weight(&self) -> f64 {
        self.entropy_weight
    }

    pub fn set_entropy_weight(&mut self, weight: f64) {
        log::debug!("倾斜代价权重: {}", weight);
        self.entropy_weight = weight;
    }

    // ------------------------------------------------------------------
    // 多分区事务惩罚
    // ------------------------------------------------------------------

    pub fn is_multipartition_penalty_enabled(&self) -> bool {
        self.use_multipartition_penalty
    }

    pub fn set_multipartition_penalty_enabled(&mut self, enabled: bool) {
        log::debug!("多分区惩罚因子: {}", if enabled { "启用" } else { "禁用" });
        self.use_multipartition_penalty = enabled;
    }

    pub fn multipartition_penalty(&self) -> f64 {
        self.multipartition_penalty
    }

    pub fn set_multipartition_penalty(&mut self, penalty: f64) {
        log::debug!("多分区惩罚权重: {}", penalty);
        self.multipartition_penalty = penalty;
    }

    // ------------------------------------------------------------------
    // 过程执行倾斜因子
    // ------------------------------------------------------------------

    pub fn is_java_execution_enabled(&self) -> bool {
        self.use_java_execution
    }

    pub fn set_java_execution_enabled(&mut self, enabled: bool) {
        log::debug!("过程执行因子: {}", if enabled { "启用" } else { "禁用" });
        self.use_java_execution = enabled;
    }

    pub fn java_execution_weight(&self) -> f64 {
        self.java_execution_weight
    }

    pub fn set_java_execution_weight(&mut self, weight: f64) {
        log::debug!("过程执行权重: {}", weight);
        self.java_execution_weight = weight;
    }

    // ------------------------------------------------------------------
    // 按分区执行权重（保留字段）
    // ------------------------------------------------------------------

    pub fn entropy_txn_weight(&self) -> f64 {
        self.entropy_txn_weight
    }

    pub fn set_entropy_txn_weight(&mut self, weight: f64) {
        self.entropy_txn_weight = weight;
    }
}
