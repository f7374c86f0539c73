use crate::constants::keys::{DATA_SOURCES, RULES, SHARDING_ALGORITHMS, TABLES};
use crate::datasource::DatasourceRegistry;
use crate::error::{InputFormatError, Result, ShardingError};
use crate::input::UserInput;
use crate::rules::{RuleRegistry, ShardingTier, algorithm_name};
use serde_yaml::{Mapping, Value};
use tracing::{debug, info, warn};

/// 合并后的候选文档
#[derive(Debug, Clone)]
pub struct CandidateDocument {
    pub document: Value,
    pub table_count: usize,
    pub algorithm_count: usize,
    pub datasource_count: usize,
}

/// 把生成的规则、算法和数据源合并进基础模板
///
/// 模板被消耗并原地修改；任何已存在的表或算法名都视为冲突，不会被覆盖
pub fn assemble(mut template: Value, input: &UserInput) -> Result<CandidateDocument> {
    let mut rule_registry = RuleRegistry::new();
    for spec in &input.tables {
        if spec.datasource_count as usize > input.datasources.len() {
            warn!(
                "表 {} 声明了 {} 个数据源，但只配置了 {} 个",
                spec.table_name,
                spec.datasource_count,
                input.datasources.len()
            );
        }
        rule_registry.register(spec.clone())?;
    }
    if rule_registry.is_empty() {
        return Err(InputFormatError::MissingTables.into());
    }

    let mut datasource_registry = DatasourceRegistry::new();
    for token in &input.datasources {
        datasource_registry.push(token.clone());
    }
    if datasource_registry.is_empty() {
        warn!("未配置任何数据源，生成的规则将引用不存在的 ds_i");
    }

    let root = template
        .as_mapping_mut()
        .ok_or_else(|| ShardingError::template_structure("模板根节点必须是映射"))?;

    let table_count = rule_registry.len();
    let mut algorithm_count = 0;
    {
        let rules = child_mapping(root, RULES, false)?;
        // 提前校验两个子节点，避免写入一半后才发现模板缺键
        child_mapping(rules, TABLES, false)?;
        child_mapping(rules, SHARDING_ALGORITHMS, false)?;

        for generated in rule_registry.generate_all() {
            let table = generated.table_name;

            insert_unique(
                child_mapping(rules, TABLES, false)?,
                table.clone(),
                serde_yaml::to_value(&generated.rule)?,
                &table,
            )?;

            let algorithms = child_mapping(rules, SHARDING_ALGORITHMS, false)?;
            insert_unique(
                algorithms,
                algorithm_name(&table, ShardingTier::Datasource),
                serde_yaml::to_value(&generated.datasource_algorithm)?,
                &table,
            )?;
            algorithm_count += 1;

            if let Some(table_algorithm) = generated.table_algorithm {
                insert_unique(
                    algorithms,
                    algorithm_name(&table, ShardingTier::Table),
                    serde_yaml::to_value(&table_algorithm)?,
                    &table,
                )?;
                algorithm_count += 1;
            }
            debug!("合并表规则: {}", table);
        }
    }

    let datasources = child_mapping(root, DATA_SOURCES, true)?;
    for (name, pool) in datasource_registry.pools() {
        let key = Value::String(name);
        if datasources.contains_key(&key) {
            warn!("模板中已存在数据源 {:?}，将被覆盖", key);
        }
        datasources.insert(key, serde_yaml::to_value(&pool)?);
    }

    info!(
        "合并完成: {} 张表, {} 个算法, {} 个数据源",
        table_count,
        algorithm_count,
        datasource_registry.len()
    );

    Ok(CandidateDocument {
        document: template,
        table_count,
        algorithm_count,
        datasource_count: datasource_registry.len(),
    })
}

/// 获取子映射；`create` 为 true 时缺失的键会被创建，null 值统一视为空映射
fn child_mapping<'a>(parent: &'a mut Mapping, key: &str, create: bool) -> Result<&'a mut Mapping> {
    if !parent.contains_key(key) {
        if !create {
            return Err(ShardingError::template_structure(format!("缺少 {key} 节点")));
        }
        parent.insert(Value::String(key.to_string()), Value::Mapping(Mapping::new()));
    }

    let value = parent
        .get_mut(key)
        .ok_or_else(|| ShardingError::template_structure(format!("缺少 {key} 节点")))?;
    if value.is_null() {
        *value = Value::Mapping(Mapping::new());
    }
    value
        .as_mapping_mut()
        .ok_or_else(|| ShardingError::template_structure(format!("{key} 节点必须是映射")))
}

fn insert_unique(mapping: &mut Mapping, name: String, value: Value, table: &str) -> Result<()> {
    if mapping.contains_key(name.as_str()) {
        return Err(ShardingError::collision(name, table));
    }
    mapping.insert(Value::String(name), value);
    Ok(())
}
