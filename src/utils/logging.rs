// 日志工具模块
//
// 封装 flexi_logger 的初始化和关闭操作，确保异步日志正确 flush

use crate::config::Config;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use std::sync::Mutex;

/// 全局日志句柄，用于程序退出时 flush
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = Mutex::new(None);

/// 初始化日志系统
///
/// # Arguments
/// * `config` - 设计器配置，包含日志相关参数
pub fn init(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let handle = Logger::try_with_str(&config.log_level)?
        .log_to_file(
            FileSpec::default()
                .basename(&config.log_file)
                .directory(&config.log_dir),
        )
        .rotate(
            Criterion::Size(config.max_log_file_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.max_log_files),
        )
        .write_mode(WriteMode::Async)
        .append()
        .start()?;

    // 保存句柄供后续 flush 使用
    if let Ok(mut guard) = LOGGER_HANDLE.lock() {
        *guard = Some(handle);
    }

    log::info!("日志系统初始化完成: {}/{}", config.log_dir, config.log_file);
    Ok(())
}

/// 刷新并关闭日志系统
///
/// 在程序退出前调用，确保所有异步日志都已写入文件
pub fn shutdown() {
    if let Ok(mut guard) = LOGGER_HANDLE.lock() {
        if let Some(handle) = guard.take() {
            handle.flush();
            // handle 在这里被 drop，会等待异步线程完成
        }
    }
}

/// 检查日志系统是否已初始化
pub fn is_initialized() -> bool {
    LOGGER_HANDLE
        .lock()
        .map(|guard| guard.is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_logging_init_and_shutdown() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let config = Config {
            log_dir: dir.path().to_string_lossy().into_owned(),
            ..Default::default()
        };

        let result = init(&config);
        assert!(result.is_ok(), "日志初始化失败: {:?}", result.err());
        assert!(is_initialized());

        log::info!("测试日志消息");

        shutdown();
        assert!(!is_initialized());
    }
}
