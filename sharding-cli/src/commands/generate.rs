use crate::app::CliApp;
use anyhow::{Context, Result};
use sharding_core::ShardingGenerator;
use std::path::PathBuf;
use tracing::info;

/// generate 命令的参数，未指定的路径使用配置文件中的值
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub template: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub json: bool,
    pub print: bool,
}

/// 运行一次完整的配置生成
pub fn run_generate(app: &CliApp, options: GenerateOptions) -> Result<()> {
    let paths = &app.config.paths;
    let template = options.template.unwrap_or_else(|| paths.template.clone());
    let input = options.input.unwrap_or_else(|| paths.user_input.clone());
    let output = options.output.unwrap_or_else(|| paths.output.clone());

    info!("🔧 生成分片配置...");
    let outcome = ShardingGenerator::new(&template, &input, &output)
        .run()
        .with_context(|| format!("根据 {} 生成分片配置失败", input.display()))?;

    if options.print {
        if options.json {
            let json = outcome
                .config
                .to_json_pretty()
                .context("转换为 JSON 失败")?;
            println!("{json}");
        } else {
            print!("{}", outcome.config.rendered);
        }
    }

    info!("📄 结果已写入: {}", outcome.output_path.display());
    Ok(())
}
