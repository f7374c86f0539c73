use super::types::TableSpec;
use crate::constants::rules::TABLE_TOKEN_FIELDS;
use crate::error::InputFormatError;
use tracing::debug;

/// 解析表定义 token
///
/// 格式: `tableName shardingDatasourceColumn datasourceCount shardingTableColumn tableReplicaCount`
pub fn parse_table_spec(token: &str) -> Result<TableSpec, InputFormatError> {
    let fields: Vec<&str> = token.split_whitespace().collect();
    if fields.len() != TABLE_TOKEN_FIELDS {
        return Err(InputFormatError::MalformedToken {
            kind: "表定义",
            token: token.to_string(),
            expected: TABLE_TOKEN_FIELDS,
            found: fields.len(),
        });
    }

    let spec = TableSpec {
        table_name: fields[0].to_string(),
        sharding_datasource_column: fields[1].to_string(),
        datasource_count: parse_count(token, "datasourceCount", fields[2])?,
        sharding_table_column: fields[3].to_string(),
        table_replica_count: parse_count(token, "tableReplicaCount", fields[4])?,
    };
    debug!("解析表定义: {:?}", spec);
    Ok(spec)
}

fn parse_count(token: &str, field: &'static str, value: &str) -> Result<u32, InputFormatError> {
    match value.parse::<u32>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(InputFormatError::InvalidCount {
            token: token.to_string(),
            field,
            value: value.to_string(),
        }),
    }
}
