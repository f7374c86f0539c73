use crate::project_info::{metadata, version_info};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shardgen - 分片中间件配置生成工具
#[derive(Parser, Debug)]
#[command(name = "shardgen")]
#[command(about = metadata::PROJECT_DESCRIPTION)]
#[command(version = version_info::CLI_VERSION)]
#[command(long_about = metadata::display::DESCRIPTION_LONG)]
#[command(author = metadata::PROJECT_AUTHORS)]
pub struct Cli {
    /// 配置文件路径（默认依次查找 sharding.toml、.sharding.toml）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// 根据用户输入和基础模板生成分片配置
    Generate {
        /// 基础模板文件（覆盖配置文件中的设置）
        #[arg(long)]
        template: Option<PathBuf>,
        /// 用户输入文件（覆盖配置文件中的设置）
        #[arg(long)]
        input: Option<PathBuf>,
        /// 输出文件（覆盖配置文件中的设置）
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// 以 JSON 格式打印合并后的结构
        #[arg(long)]
        json: bool,
        /// 生成后不在终端打印结果
        #[arg(long)]
        no_print: bool,
    },
    /// 创建配置文件、基础模板和用户输入示例
    Init {
        /// 如果文件已存在，强制覆盖
        #[arg(long)]
        force: bool,
    },
}
