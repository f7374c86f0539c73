use crate::constants::rules::{DATASOURCE_PREFIX, TABLE_ALGORITHM_PREFIX};
use serde::Serialize;

/// 单张逻辑表的分片参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub table_name: String,
    pub sharding_datasource_column: String,
    pub datasource_count: u32,
    pub sharding_table_column: String,
    pub table_replica_count: u32,
}

/// 分片层级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardingTier {
    /// 选择物理数据源
    Datasource,
    /// 选择数据源内的物理表
    Table,
}

impl ShardingTier {
    /// 算法名前缀
    pub fn prefix(self) -> &'static str {
        match self {
            ShardingTier::Datasource => DATASOURCE_PREFIX,
            ShardingTier::Table => TABLE_ALGORITHM_PREFIX,
        }
    }
}

/// standard 分片策略
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardStrategy {
    pub sharding_column: String,
    pub sharding_algorithm_name: String,
}

/// 分片策略外层包装，序列化为 `standard: {...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShardingStrategy {
    pub standard: StandardStrategy,
}

impl ShardingStrategy {
    pub fn standard(column: &str, algorithm_name: String) -> Self {
        Self {
            standard: StandardStrategy {
                sharding_column: column.to_string(),
                sharding_algorithm_name: algorithm_name,
            },
        }
    }
}

/// 表分布规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionRule {
    pub actual_data_nodes: String,
    pub database_strategy: ShardingStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_strategy: Option<ShardingStrategy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmProps {
    #[serde(rename = "algorithm-expression")]
    pub algorithm_expression: String,
}

/// 行表达式分片算法定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmDefinition {
    pub props: AlgorithmProps,
    #[serde(rename = "type")]
    pub algorithm_type: String,
}

/// 单张表生成的全部片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTable {
    pub table_name: String,
    pub rule: DistributionRule,
    /// 仅当表副本数 > 1 时存在
    pub table_algorithm: Option<AlgorithmDefinition>,
    pub datasource_algorithm: AlgorithmDefinition,
}
