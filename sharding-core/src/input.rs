use crate::constants::keys::{DATA_SOURCES, TABLES};
use crate::datasource::DatasourceToken;
use crate::error::{InputFormatError, Result};
use crate::rules::{TableSpec, parse_table_spec};
use serde_yaml::Value;
use tracing::info;

/// 解析后的用户输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub datasources: Vec<DatasourceToken>,
    pub tables: Vec<TableSpec>,
}

impl UserInput {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        Ok(Self::from_value(&value)?)
    }

    /// 从 YAML 文档中提取数据源和表定义
    ///
    /// `dataSources` 的键本身就是数据源 token，值被忽略
    pub fn from_value(value: &Value) -> std::result::Result<Self, InputFormatError> {
        let raw_datasources = value
            .get(DATA_SOURCES)
            .filter(|v| !v.is_null())
            .ok_or_else(|| InputFormatError::MissingKey {
                key: DATA_SOURCES.to_string(),
            })?;

        let datasources = datasource_tokens(raw_datasources)?
            .into_iter()
            .map(DatasourceToken::parse)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let raw_tables = match value.get(TABLES) {
            Some(Value::Sequence(items)) if !items.is_empty() => items,
            Some(Value::Sequence(_)) | Some(Value::Null) | None => {
                return Err(InputFormatError::MissingTables);
            }
            Some(_) => {
                return Err(InputFormatError::NotASequence {
                    key: TABLES.to_string(),
                });
            }
        };

        let tables = raw_tables
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or(InputFormatError::NotAString { kind: "表定义" })
                    .and_then(parse_table_spec)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        info!(
            "解析用户输入: {} 个数据源, {} 张表",
            datasources.len(),
            tables.len()
        );
        Ok(Self {
            datasources,
            tables,
        })
    }
}

fn datasource_tokens(raw: &Value) -> std::result::Result<Vec<&str>, InputFormatError> {
    let not_a_string = InputFormatError::NotAString { kind: "数据源" };
    match raw {
        Value::Mapping(mapping) => mapping
            .keys()
            .map(|key| key.as_str().ok_or(not_a_string.clone()))
            .collect(),
        Value::Sequence(items) => items
            .iter()
            .map(|item| item.as_str().ok_or(not_a_string.clone()))
            .collect(),
        _ => Err(not_a_string),
    }
}
