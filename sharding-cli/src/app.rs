use anyhow::{Context, Result};
use sharding_core::config::GeneratorConfig;
use std::path::Path;

use crate::cli::Commands;
use crate::commands::{self, GenerateOptions};

#[derive(Debug, Clone)]
pub struct CliApp {
    pub config: GeneratorConfig,
}

impl CliApp {
    /// 使用指定的配置文件初始化；未指定时按默认顺序查找
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => GeneratorConfig::load_from_file(path)
                .with_context(|| format!("加载配置文件 {} 失败", path.display()))?,
            None => GeneratorConfig::find_and_load_config().context("加载配置文件失败")?,
        };

        Ok(Self { config })
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// 运行应用命令
    pub fn run_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Generate {
                template,
                input,
                output,
                json,
                no_print,
            } => {
                let options = GenerateOptions {
                    template,
                    input,
                    output,
                    json,
                    print: self.config.output.print_result && !no_print,
                };
                commands::run_generate(self, options)
            }
            Commands::Init { .. } => unreachable!(), // 已经在 main.rs 中处理
        }
    }
}
