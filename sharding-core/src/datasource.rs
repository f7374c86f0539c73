use crate::constants::datasource::{
    CONNECTION_TIMEOUT_MS, IDLE_TIMEOUT_MS, MAINTENANCE_INTERVAL_MS, MAX_LIFETIME_MS,
    MAX_POOL_SIZE, MIN_POOL_SIZE, TOKEN_FIELDS, URL_PREFIX, URL_SUFFIX,
};
use crate::constants::rules::DATASOURCE_PREFIX;
use crate::error::InputFormatError;
use serde::Serialize;
use tracing::{debug, warn};

/// 数据源 token: `host port database username password`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasourceToken {
    pub host: String,
    pub port: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl DatasourceToken {
    /// 解析空白分隔的数据源 token，字段不足时报错
    pub fn parse(raw: &str) -> Result<Self, InputFormatError> {
        let fields: Vec<&str> = raw.split_whitespace().collect();
        if fields.len() < TOKEN_FIELDS {
            return Err(InputFormatError::MalformedToken {
                kind: "数据源",
                token: raw.to_string(),
                expected: TOKEN_FIELDS,
                found: fields.len(),
            });
        }
        if fields.len() > TOKEN_FIELDS {
            warn!(
                "数据源 '{}' 包含多余字段，忽略第 {} 个之后的内容",
                fields[0], TOKEN_FIELDS
            );
        }

        Ok(Self {
            host: fields[0].to_string(),
            port: fields[1].to_string(),
            database: fields[2].to_string(),
            username: fields[3].to_string(),
            password: fields[4].to_string(),
        })
    }

    pub fn url(&self) -> String {
        format!(
            "{URL_PREFIX}://{}:{}/{}{URL_SUFFIX}",
            self.host, self.port, self.database
        )
    }
}

/// 连接池定义，字段顺序即输出顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourcePoolDefinition {
    pub url: String,
    pub username: String,
    pub password: String,
    pub connection_timeout_milliseconds: u64,
    pub idle_timeout_milliseconds: u64,
    pub maintenance_interval_milliseconds: u64,
    pub max_lifetime_milliseconds: u64,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
}

/// 根据数据源 token 生成连接池定义
pub fn build_pool(token: &DatasourceToken) -> DatasourcePoolDefinition {
    DatasourcePoolDefinition {
        url: token.url(),
        username: token.username.clone(),
        password: token.password.clone(),
        connection_timeout_milliseconds: CONNECTION_TIMEOUT_MS,
        idle_timeout_milliseconds: IDLE_TIMEOUT_MS,
        maintenance_interval_milliseconds: MAINTENANCE_INTERVAL_MS,
        max_lifetime_milliseconds: MAX_LIFETIME_MS,
        max_pool_size: MAX_POOL_SIZE,
        min_pool_size: MIN_POOL_SIZE,
    }
}

/// 单次生成过程内的数据源列表，按加入顺序命名为 ds_0, ds_1, ...
#[derive(Debug, Default)]
pub struct DatasourceRegistry {
    tokens: Vec<DatasourceToken>,
}

impl DatasourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: DatasourceToken) {
        debug!("注册数据源: {}:{}/{}", token.host, token.port, token.database);
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// 按顺序生成 (名称, 连接池定义)
    pub fn pools(&self) -> impl Iterator<Item = (String, DatasourcePoolDefinition)> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, token)| (format!("{DATASOURCE_PREFIX}_{i}"), build_pool(token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_build_pool() {
        let token = DatasourceToken::parse("127.0.0.1 5432 mydb admin pw").unwrap();
        let pool = build_pool(&token);

        assert_eq!(
            pool.url,
            "jdbc:opengauss://127.0.0.1:5432/mydb?serverTimezone=UTC&useSSL=false"
        );
        assert_eq!(pool.username, "admin");
        assert_eq!(pool.password, "pw");
        assert_eq!(pool.connection_timeout_milliseconds, 30000);
        assert_eq!(pool.idle_timeout_milliseconds, 60000);
        assert_eq!(pool.maintenance_interval_milliseconds, 30000);
        assert_eq!(pool.max_lifetime_milliseconds, 1800000);
        assert_eq!(pool.max_pool_size, 4096);
        assert_eq!(pool.min_pool_size, 1);
    }

    #[test]
    fn test_short_token_is_rejected() {
        let err = DatasourceToken::parse("127.0.0.1 5432 mydb").unwrap_err();
        assert_eq!(
            err,
            InputFormatError::MalformedToken {
                kind: "数据源",
                token: "127.0.0.1 5432 mydb".to_string(),
                expected: 5,
                found: 3,
            }
        );
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let token = DatasourceToken::parse("db1 5432 mydb admin pw trailing").unwrap();
        assert_eq!(token.password, "pw");
    }

    #[test]
    fn test_pool_serializes_camel_case() {
        let token = DatasourceToken::parse("db1 5432 mydb admin pw").unwrap();
        let value = serde_yaml::to_value(build_pool(&token)).unwrap();
        assert_eq!(value["maxLifetimeMilliseconds"].as_u64(), Some(1800000));
        assert_eq!(value["minPoolSize"].as_u64(), Some(1));
    }

    #[test]
    fn test_registry_names_are_sequential() {
        let mut registry = DatasourceRegistry::new();
        assert!(registry.is_empty());
        for host in ["a", "b", "c"] {
            registry.push(DatasourceToken::parse(&format!("{host} 1 db u p")).unwrap());
        }

        let named: Vec<(String, String)> = registry
            .pools()
            .map(|(name, pool)| (name, pool.url))
            .collect();
        assert_eq!(named.len(), 3);
        assert_eq!(named[0].0, "ds_0");
        assert!(named[0].1.contains("//a:1/"));
        assert_eq!(named[1].0, "ds_1");
        assert!(named[1].1.contains("//b:1/"));
        assert_eq!(named[2].0, "ds_2");
        assert!(named[2].1.contains("//c:1/"));
    }
}
