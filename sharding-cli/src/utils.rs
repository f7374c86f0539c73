/// # Shardgen 日志系统使用说明
///
/// 1. **库代码只使用 `tracing` 宏**：`info!()`, `warn!()`, `error!()`, `debug!()`
/// 2. **应用入口控制日志配置**：在 `main.rs` 中调用 `setup_logging()`
/// 3. **生成结果与日志分离**：结果打印到 stdout，日志输出到 stderr 或文件
///
/// ## 日志配置选项
///
/// - `-v, --verbose`：启用详细日志模式（DEBUG 级别）
/// - `RUST_LOG`：标准的 Rust 日志级别控制
/// - `SHARDGEN_LOG_FILE`：日志文件路径，设置后日志输出到文件而非终端
///
/// ```bash
/// SHARDGEN_LOG_FILE=shardgen.log shardgen generate
/// RUST_LOG=sharding_core::normalizer=debug shardgen generate
/// ```
pub const LOG_FILE_ENV: &str = "SHARDGEN_LOG_FILE";

/// 设置日志记录系统
///
/// 终端输出简洁格式，文件输出包含模块路径和行号
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // 根据verbose参数和环境变量确定日志级别
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let log_file = std::env::var(LOG_FILE_ENV).ok().map(|path| {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path);
        (path, file)
    });

    match log_file {
        Some((_, Ok(file))) => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .init();
        }
        other => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false) // 不显示模块路径
                .with_line_number(false)
                .without_time()
                .compact()
                .init();

            if let Some((path, Err(e))) = other {
                tracing::warn!("无法打开日志文件 {}: {}，改为输出到终端", path, e);
            }
        }
    }
}
