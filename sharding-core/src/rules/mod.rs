mod builder;
mod expression;
mod parser;
mod types;


// 重新导出公共接口
pub use builder::{RuleRegistry, build_algorithm, build_distribution_rule};
pub use expression::{algorithm_name, distribution_expression, routing_expression};
pub use parser::parse_table_spec;
pub use types::{
    AlgorithmDefinition, AlgorithmProps, DistributionRule, GeneratedTable, ShardingStrategy,
    ShardingTier, StandardStrategy, TableSpec,
};
