use super::types::ShardingTier;
use crate::constants::rules::{ALGORITHM_SUFFIX, DATASOURCE_PREFIX};

/// 生成分布范围表达式，例如 `ds_${0..1}`
///
/// 数量为 1 时直接返回名称本身，但以 `ds` 开头的名称始终生成范围表达式。
/// 这里按名称前缀而非层级判断，与既有生成结果保持一致。
pub fn distribution_expression(name: &str, count: u32) -> String {
    if count == 1 && !name.starts_with(DATASOURCE_PREFIX) {
        return name.to_string();
    }
    format!("{name}_${{0..{}}}", count.saturating_sub(1))
}

/// 生成取模路由公式，例如 `id % 2`
pub fn routing_expression(column: &str, count: u32) -> String {
    format!("{column} % {count}")
}

/// 生成算法名，例如 `ds_orders_inline`
pub fn algorithm_name(name: &str, tier: ShardingTier) -> String {
    [tier.prefix(), name, ALGORITHM_SUFFIX].join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_table_keeps_bare_name() {
        assert_eq!(distribution_expression("orders", 1), "orders");
    }

    #[test]
    fn test_datasource_prefix_always_expands() {
        assert_eq!(distribution_expression("ds", 1), "ds_${0..0}");
        assert_eq!(distribution_expression("ds", 4), "ds_${0..3}");
        // 以 ds 开头的表名也会展开
        assert_eq!(distribution_expression("dst_log", 1), "dst_log_${0..0}");
    }

    #[test]
    fn test_multi_table_expands() {
        assert_eq!(distribution_expression("orders", 3), "orders_${0..2}");
    }

    #[test]
    fn test_routing_expression() {
        assert_eq!(routing_expression("user_id", 8), "user_id % 8");
    }

    #[test]
    fn test_algorithm_name_is_deterministic() {
        let first = algorithm_name("orders", ShardingTier::Table);
        let second = algorithm_name("orders", ShardingTier::Table);
        assert_eq!(first, "tb_orders_inline");
        assert_eq!(first, second);
        assert_eq!(
            algorithm_name("orders", ShardingTier::Datasource),
            "ds_orders_inline"
        );
    }
}
