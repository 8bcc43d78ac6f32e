//! 调试信息缓冲模块
//!
//! 可开关的调试片段环：启用后具体模型可以在评估过程中任意
//! 追加文本片段，最终拼成一份报告。只用于人工诊断，对代价
//! 数值没有任何影响。

/// 拼接片段时使用的固定分隔线
const SINGLE_LINE: &str = "----------------------------------------";

/// 调试信息缓冲
#[derive(Debug, Default)]
pub struct DebugBuffer {
    enabled: bool,
    fragments: Vec<String>,
}

impl DebugBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开启或关闭调试捕获
    pub fn set_enabled(&mut self, enabled: bool) {
        log::debug!("调试捕获: {}", if enabled { "启用" } else { "禁用" });
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 追加一个调试片段
    ///
    /// 未启用捕获时是空操作
    pub fn append(&mut self, message: impl Into<String>) {
        if self.enabled {
            self.fragments.push(message.into());
        }
    }

    /// 是否捕获到了任何片段
    pub fn has_messages(&self) -> bool {
        !self.fragments.is_empty()
    }

    /// 将全部非空片段按追加顺序拼成一份报告
    pub fn last_message(&self) -> String {
        let mut out = String::new();
        for fragment in &self.fragments {
            if fragment.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
                out.push_str(SINGLE_LINE);
                out.push('\n');
            }
            out.push_str(fragment);
        }
        out
    }

    /// 丢弃全部已捕获片段
    pub fn clear(&mut self) {
        self.fragments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_buffer_ignores_appends() {
        let mut buffer = DebugBuffer::new();
        buffer.append("忽略我");
        assert!(!buffer.has_messages());
        assert_eq!(buffer.last_message(), "");
    }

    #[test]
    fn test_fragments_joined_in_order() {
        let mut buffer = DebugBuffer::new();
        buffer.set_enabled(true);
        buffer.append("第一段");
        buffer.append(""); // 空片段被跳过
        buffer.append("第二段");

        assert!(buffer.has_messages());
        let report = buffer.last_message();
        assert!(report.starts_with("第一段"));
        assert!(report.ends_with("第二段"));
        assert!(report.contains(SINGLE_LINE));
    }

    #[test]
    fn test_clear_discards_messages() {
        let mut buffer = DebugBuffer::new();
        buffer.set_enabled(true);
        buffer.append("片段");
        buffer.clear();
        assert!(!buffer.has_messages());
        // 开关状态不随 clear 改变
        assert!(buffer.is_enabled());
    }
}
