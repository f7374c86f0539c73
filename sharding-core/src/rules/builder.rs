use super::expression::{algorithm_name, distribution_expression, routing_expression};
use super::types::{
    AlgorithmDefinition, AlgorithmProps, DistributionRule, GeneratedTable, ShardingStrategy,
    ShardingTier, TableSpec,
};
use crate::constants::rules::{DATASOURCE_PREFIX, INLINE_ALGORITHM_TYPE};
use crate::error::{Result, ShardingError};
use std::collections::HashSet;
use tracing::{debug, info};

/// 生成单张表的分布规则
pub fn build_distribution_rule(spec: &TableSpec) -> DistributionRule {
    let ds_expr = distribution_expression(DATASOURCE_PREFIX, spec.datasource_count);
    let tb_expr = distribution_expression(&spec.table_name, spec.table_replica_count);

    let table_strategy = (spec.table_replica_count > 1).then(|| {
        ShardingStrategy::standard(
            &spec.sharding_table_column,
            algorithm_name(&spec.table_name, ShardingTier::Table),
        )
    });

    DistributionRule {
        actual_data_nodes: [ds_expr, tb_expr].join("."),
        database_strategy: ShardingStrategy::standard(
            &spec.sharding_datasource_column,
            algorithm_name(&spec.table_name, ShardingTier::Datasource),
        ),
        table_strategy,
    }
}

/// 生成行表达式算法，例如 `ds_${id % 2}`
pub fn build_algorithm(name: &str, column: &str, count: u32) -> AlgorithmDefinition {
    AlgorithmDefinition {
        props: AlgorithmProps {
            algorithm_expression: format!("{name}_${{{}}}", routing_expression(column, count)),
        },
        algorithm_type: INLINE_ALGORITHM_TYPE.to_string(),
    }
}

/// 单次生成过程内累积的表定义
///
/// 每次生成都新建一个实例，不在多次生成之间共享
#[derive(Debug, Default)]
pub struct RuleRegistry {
    tables: Vec<TableSpec>,
    names: HashSet<String>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一张表，表名重复会导致算法名冲突
    pub fn register(&mut self, spec: TableSpec) -> Result<()> {
        if !self.names.insert(spec.table_name.clone()) {
            return Err(ShardingError::collision(
                algorithm_name(&spec.table_name, ShardingTier::Datasource),
                spec.table_name,
            ));
        }
        debug!("注册表: {}", spec.table_name);
        self.tables.push(spec);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// 按注册顺序为每张表生成规则和算法，消耗注册表
    pub fn generate_all(self) -> impl Iterator<Item = GeneratedTable> {
        info!("开始生成 {} 张表的分片规则", self.tables.len());
        self.tables.into_iter().map(|spec| {
            let rule = build_distribution_rule(&spec);
            let table_algorithm = (spec.table_replica_count > 1).then(|| {
                build_algorithm(
                    &spec.table_name,
                    &spec.sharding_table_column,
                    spec.table_replica_count,
                )
            });
            let datasource_algorithm = build_algorithm(
                DATASOURCE_PREFIX,
                &spec.sharding_datasource_column,
                spec.datasource_count,
            );
            GeneratedTable {
                table_name: spec.table_name,
                rule,
                table_algorithm,
                datasource_algorithm,
            }
        })
    }
}
