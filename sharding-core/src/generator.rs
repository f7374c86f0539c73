use crate::assembler::{CandidateDocument, assemble};
use crate::error::{Result, ShardingError};
use crate::input::UserInput;
use crate::normalizer::OutputNormalizer;
use serde_yaml::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// 生成并规整后的文档
#[derive(Debug, Clone)]
pub struct RenderedConfig {
    pub candidate: CandidateDocument,
    /// 写入输出文件的最终文本
    pub rendered: String,
}

impl RenderedConfig {
    /// 以 JSON 形式输出合并后的结构
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.candidate.document)?)
    }
}

/// 一次生成的结果
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub output_path: PathBuf,
    pub config: RenderedConfig,
}

/// 不涉及文件读写的完整生成流程：解析输入、合并模板、序列化、规整
pub fn generate_from_str(template_yaml: &str, input_yaml: &str) -> Result<RenderedConfig> {
    let input = UserInput::from_yaml_str(input_yaml)?;
    let template: Value = serde_yaml::from_str(template_yaml)?;

    let candidate = assemble(template, &input)?;
    let serialized = serde_yaml::to_string(&candidate.document)?;
    debug!("序列化完成，共 {} 行", serialized.lines().count());

    let rendered = OutputNormalizer::new()?.normalize(&serialized)?;
    Ok(RenderedConfig {
        candidate,
        rendered,
    })
}

/// 单次生成的入口
///
/// 每次 `run` 都从模板和用户输入完整重建，在全部步骤成功前不会触碰输出文件
#[derive(Debug, Clone)]
pub struct ShardingGenerator {
    template_path: PathBuf,
    user_input_path: PathBuf,
    output_path: PathBuf,
}

impl ShardingGenerator {
    pub fn new(
        template_path: impl Into<PathBuf>,
        user_input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            template_path: template_path.into(),
            user_input_path: user_input_path.into(),
            output_path: output_path.into(),
        }
    }

    pub fn run(&self) -> Result<GenerationOutcome> {
        info!("读取基础模板: {}", self.template_path.display());
        let template = read_file(&self.template_path)?;

        info!("读取用户输入: {}", self.user_input_path.display());
        let input = read_file(&self.user_input_path)?;

        let config = generate_from_str(&template, &input)?;

        persist(&self.output_path, &config.rendered)?;
        info!(
            "✅ 已生成 {}: {} 张表, {} 个算法, {} 个数据源",
            self.output_path.display(),
            config.candidate.table_count,
            config.candidate.algorithm_count,
            config.candidate.datasource_count
        );

        Ok(GenerationOutcome {
            output_path: self.output_path.clone(),
            config,
        })
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ShardingError::read_file(path, e))
}

/// 先写入同目录下的临时文件，再整体替换目标文件
fn persist(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::templates::{BASE_TEMPLATE, SAMPLE_USER_INPUT};
    use crate::error::InputFormatError;
    use tempfile::tempdir;

    const EXAMPLE_INPUT: &str = r#"
dataSources:
  "127.0.0.1 5432 mydb admin pw":
tables:
  - orders id 2 uid 1
"#;

    #[test]
    fn test_end_to_end_example() {
        let config = generate_from_str(BASE_TEMPLATE, EXAMPLE_INPUT).unwrap();
        let document = &config.candidate.document;

        assert_eq!(
            document["dataSources"]["ds_0"]["url"].as_str(),
            Some("jdbc:opengauss://127.0.0.1:5432/mydb?serverTimezone=UTC&useSSL=false")
        );

        let orders = &document["rules"]["tables"]["orders"];
        assert_eq!(
            orders["actualDataNodes"].as_str(),
            Some("ds_${0..1}.orders")
        );
        assert!(orders.get("tableStrategy").is_none());

        assert_eq!(
            document["rules"]["shardingAlgorithms"]["ds_orders_inline"]["props"]
                ["algorithm-expression"]
                .as_str(),
            Some("ds_${id % 2}")
        );
    }

    #[test]
    fn test_rendered_output_is_normalized() {
        let config = generate_from_str(BASE_TEMPLATE, EXAMPLE_INPUT).unwrap();
        let rendered = &config.rendered;

        assert!(rendered.contains("rules:\n- !SHARDING\n"));
        assert!(!rendered.contains("test_order"));
        assert!(!rendered.contains("database_inline:"));
        assert!(rendered.contains("ds_orders_inline:"));
        assert!(rendered.contains("sql-show: false"));

        // 规整后的文本仍是合法 YAML，rules 变为带标签的单元素列表
        let reparsed: Value = serde_yaml::from_str(rendered).unwrap();
        match &reparsed["rules"] {
            Value::Sequence(items) => {
                assert_eq!(items.len(), 1);
                assert!(matches!(items[0], Value::Tagged(_)));
            }
            other => panic!("rules 应为列表: {other:?}"),
        }
    }

    #[test]
    fn test_sample_input_with_base_template() {
        let config = generate_from_str(BASE_TEMPLATE, SAMPLE_USER_INPUT).unwrap();
        assert_eq!(config.candidate.table_count, 2);
        // t_order 有 4 个表副本，多一个表算法
        assert_eq!(config.candidate.algorithm_count, 3);
        assert_eq!(config.candidate.datasource_count, 2);
        assert!(config.rendered.contains("tb_t_order_inline:"));
        assert!(config.to_json_pretty().unwrap().contains("\"t_user\""));
    }

    #[test]
    fn test_run_writes_output() {
        let temp_dir = tempdir().unwrap();
        let template = temp_dir.path().join("template.yaml");
        let input = temp_dir.path().join("input.yaml");
        let output = temp_dir.path().join("out").join("config-sharding.yaml");
        fs::write(&template, BASE_TEMPLATE).unwrap();
        fs::write(&input, EXAMPLE_INPUT).unwrap();

        let outcome = ShardingGenerator::new(&template, &input, &output)
            .run()
            .unwrap();

        assert_eq!(outcome.output_path, output);
        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, outcome.config.rendered);
    }

    #[test]
    fn test_missing_tables_leaves_output_untouched() {
        let temp_dir = tempdir().unwrap();
        let template = temp_dir.path().join("template.yaml");
        let input = temp_dir.path().join("input.yaml");
        let output = temp_dir.path().join("config-sharding.yaml");
        fs::write(&template, BASE_TEMPLATE).unwrap();
        fs::write(&input, "dataSources:\n  \"h 1 db u p\":\n").unwrap();

        let generator = ShardingGenerator::new(&template, &input, &output);

        let err = generator.run().unwrap_err();
        assert!(matches!(
            err,
            ShardingError::InputFormat(InputFormatError::MissingTables)
        ));
        assert!(!output.exists());

        // 已有的输出文件也保持不变
        fs::write(&output, "previous").unwrap();
        assert!(generator.run().is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn test_missing_template_reports_path() {
        let temp_dir = tempdir().unwrap();
        let template = temp_dir.path().join("absent.yaml");
        let err = ShardingGenerator::new(&template, "input.yaml", "out.yaml")
            .run()
            .unwrap_err();
        match err {
            ShardingError::ReadFile { path, .. } => assert_eq!(path, template),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_template_with_drifted_placeholder_fails() {
        let drifted = BASE_TEMPLATE.replace(
            "      actualDataNodes: ds_${0..1}.test_order\n",
            "      actualDataNodes: ds_${0..1}.test_order\n      keyGenerateStrategy:\n        column: id\n",
        );
        let err = generate_from_str(&drifted, EXAMPLE_INPUT).unwrap_err();
        assert!(matches!(err, ShardingError::OutputTemplateMismatch(_)));
    }

    #[test]
    fn test_template_with_inline_placeholder_fails() {
        let drifted = BASE_TEMPLATE.replace(
            "    test_order:\n      actualDataNodes: ds_${0..1}.test_order\n",
            "    test_order: ds_${0..1}.test_order\n",
        );
        assert_ne!(drifted, BASE_TEMPLATE);
        let err = generate_from_str(&drifted, EXAMPLE_INPUT).unwrap_err();
        assert!(matches!(err, ShardingError::OutputTemplateMismatch(_)));
    }

    #[test]
    fn test_table_named_like_algorithm_placeholder() {
        let input = "dataSources:\n  \"h 1 db u p\":\ntables:\n  - database_inline id 2 uid 1\n";
        let config = generate_from_str(BASE_TEMPLATE, input).unwrap();

        assert!(config.rendered.contains("  tables:\n    database_inline:\n"));
        assert!(config.rendered.contains("ds_database_inline_inline:"));

        let reparsed: Value = serde_yaml::from_str(&config.rendered).unwrap();
        let Value::Sequence(items) = &reparsed["rules"] else {
            panic!("rules 应为列表");
        };
        let Value::Tagged(tagged) = &items[0] else {
            panic!("rules 应带类型标签");
        };
        let algorithms = tagged.value["shardingAlgorithms"].as_mapping().unwrap();
        assert!(!algorithms.contains_key("database_inline"));
        assert!(tagged.value["tables"]["database_inline"].is_mapping());
    }
}
