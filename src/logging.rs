use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

const LOG_FILE_PREFIX: &str = "danci-vocab.log";

/// 文件日志写入线程的句柄，需持有到进程退出
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// 初始化日志
///
/// 终端输出写到 stderr，不和命令的 stdout 输出混在一起。
/// `config.file_logs` 打开时另外按天滚动写入 `config.log_dir`，
/// 目录无法创建时退回只写终端。
pub fn init_tracing(config: &Config) -> Option<FileLogGuard> {
    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

    let file_layer = if config.file_logs {
        match std::fs::create_dir_all(&config.log_dir) {
            Ok(()) => {
                let appender =
                    RollingFileAppender::new(Rotation::DAILY, &config.log_dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true);
                Some((layer, guard))
            }
            Err(err) => {
                eprintln!(
                    "failed to create log directory {}: {err}",
                    config.log_dir.display()
                );
                None
            }
        }
    } else {
        None
    };

    let (file_layer, guard) = match file_layer {
        Some((layer, guard)) => (Some(layer), Some(FileLogGuard { _guard: guard })),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if guard.is_some() {
        tracing::debug!(log_dir = %config.log_dir.display(), "file logging enabled");
    }

    guard
}
