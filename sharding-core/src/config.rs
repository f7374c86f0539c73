use crate::constants::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 生成器配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub paths: PathsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// 输入输出文件路径
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    pub template: PathBuf,
    pub user_input: PathBuf,
    pub output: PathBuf,
}

/// 输出相关配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub print_result: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { print_result: true }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                template: paths::get_template_path(),
                user_input: paths::get_user_input_path(),
                output: paths::get_output_path(),
            },
            output: OutputConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// 按优先级查找配置文件：sharding.toml -> .sharding.toml
    ///
    /// 都不存在时使用默认配置，不会自动写出文件
    pub fn find_and_load_config() -> Result<Self> {
        for config_file in paths::CONFIG_FILE_NAMES {
            if Path::new(config_file).exists() {
                tracing::info!("找到配置文件: {}", config_file);
                return Self::load_from_file(config_file);
            }
        }

        tracing::warn!("未找到配置文件，使用默认配置");
        Ok(Self::default())
    }

    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: GeneratorConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_with_comments();
        fs::write(&path, content)?;
        Ok(())
    }

    /// 生成带注释的TOML配置
    fn to_toml_with_comments(&self) -> String {
        const TEMPLATE: &str = include_str!("../templates/sharding.toml.template");

        TEMPLATE
            .replace("{template}", &self.paths.template.to_string_lossy())
            .replace("{user_input}", &self.paths.user_input.to_string_lossy())
            .replace("{output}", &self.paths.output.to_string_lossy())
            .replace("{print_result}", &self.output.print_result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("sharding.toml");

        let mut config = GeneratorConfig::default();
        config.paths.output = PathBuf::from("out/result.yaml");
        config.output.print_result = false;
        config.save_to_file(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("# 生成结果文件"));

        let loaded = GeneratorConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_output_section_is_optional() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("sharding.toml");
        fs::write(
            &config_path,
            "[paths]\ntemplate = 'a.yaml'\nuser_input = 'b.yaml'\noutput = 'c.yaml'\n",
        )
        .unwrap();

        let loaded = GeneratorConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.paths.template, PathBuf::from("a.yaml"));
        assert!(loaded.output.print_result);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("sharding.toml");
        fs::write(&config_path, "[paths]\ntemplate = 1\n").unwrap();

        let err = GeneratorConfig::load_from_file(&config_path).unwrap_err();
        assert!(matches!(err, crate::ShardingError::Config(_)));
    }
}
