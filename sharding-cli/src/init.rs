use anyhow::{Context, Result};
use sharding_core::config::GeneratorConfig;
use sharding_core::constants::paths::DEFAULT_CONFIG_FILE;
use sharding_core::constants::templates::{BASE_TEMPLATE, SAMPLE_USER_INPUT};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::project_info::metadata::display::CLI_FULL_NAME;

/// 在当前目录初始化
pub fn run_init(force: bool) -> Result<()> {
    run_init_in(Path::new("."), force)
}

/// 在指定目录写出配置文件、基础模板和用户输入示例
pub fn run_init_in(dir: &Path, force: bool) -> Result<()> {
    info!("🧩 {} 初始化", CLI_FULL_NAME);
    info!("======================");

    let config = GeneratorConfig::default();
    let config_path = dir.join(DEFAULT_CONFIG_FILE);
    let template_path = dir.join(&config.paths.template);
    let input_path = dir.join(&config.paths.user_input);

    // 检查是否已经初始化过
    if !force && [&config_path, &template_path, &input_path].iter().any(|p| p.exists()) {
        warn!("⚠️  检测到已存在的配置文件或模板文件");
        info!("如果您要重新初始化，请使用 --force 参数");
        info!("示例: shardgen init --force");
        return Ok(());
    }

    fs::create_dir_all(dir).with_context(|| format!("创建目录 {} 失败", dir.display()))?;

    config
        .save_to_file(&config_path)
        .with_context(|| format!("写入 {} 失败", config_path.display()))?;
    info!("   ✅ 创建配置文件: {}", config_path.display());

    fs::write(&template_path, BASE_TEMPLATE)
        .with_context(|| format!("写入 {} 失败", template_path.display()))?;
    info!("   ✅ 创建基础模板: {}", template_path.display());

    fs::write(&input_path, SAMPLE_USER_INPUT)
        .with_context(|| format!("写入 {} 失败", input_path.display()))?;
    info!("   ✅ 创建用户输入示例: {}", input_path.display());

    info!("🎉 初始化完成！");
    info!("");
    info!("📝 接下来的步骤:");
    info!("   1️⃣  编辑 {} 填写数据源和分片表", input_path.display());
    info!("   2️⃣  运行 'shardgen generate' 生成 {}", config.paths.output.display());

    Ok(())
}
