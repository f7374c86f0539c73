/// 默认文件路径常量
pub mod paths {
    use std::path::PathBuf;

    /// 基础模板文件名
    pub const TEMPLATE_FILE_NAME: &str = "config-sharding_src.yaml";

    /// 用户输入文件名
    pub const USER_INPUT_FILE_NAME: &str = "user_input.yaml";

    /// 生成结果文件名
    pub const OUTPUT_FILE_NAME: &str = "config-sharding.yaml";

    /// 配置文件查找顺序
    pub const CONFIG_FILE_NAMES: &[&str] = &["sharding.toml", ".sharding.toml"];

    /// 默认配置文件名
    pub const DEFAULT_CONFIG_FILE: &str = "sharding.toml";

    pub fn get_template_path() -> PathBuf {
        PathBuf::from(TEMPLATE_FILE_NAME)
    }

    pub fn get_user_input_path() -> PathBuf {
        PathBuf::from(USER_INPUT_FILE_NAME)
    }

    pub fn get_output_path() -> PathBuf {
        PathBuf::from(OUTPUT_FILE_NAME)
    }
}

/// 文档中的键名
pub mod keys {
    pub const DATA_SOURCES: &str = "dataSources";
    pub const RULES: &str = "rules";
    pub const TABLES: &str = "tables";
    pub const SHARDING_ALGORITHMS: &str = "shardingAlgorithms";
}

/// 分片规则表达式常量
pub mod rules {
    /// 数据源层名称前缀，数据源依次命名为 ds_0, ds_1, ...
    pub const DATASOURCE_PREFIX: &str = "ds";

    /// 表层算法名前缀
    pub const TABLE_ALGORITHM_PREFIX: &str = "tb";

    /// 算法名后缀
    pub const ALGORITHM_SUFFIX: &str = "inline";

    /// 行表达式算法类型
    pub const INLINE_ALGORITHM_TYPE: &str = "INLINE";

    /// 表定义 token 的字段数
    pub const TABLE_TOKEN_FIELDS: usize = 5;
}

/// 数据源连接池常量
pub mod datasource {
    /// JDBC 协议前缀
    pub const URL_PREFIX: &str = "jdbc:opengauss";

    /// 连接串参数
    pub const URL_SUFFIX: &str = "?serverTimezone=UTC&useSSL=false";

    /// 数据源 token 的字段数
    pub const TOKEN_FIELDS: usize = 5;

    pub const CONNECTION_TIMEOUT_MS: u64 = 30_000;
    pub const IDLE_TIMEOUT_MS: u64 = 60_000;
    pub const MAINTENANCE_INTERVAL_MS: u64 = 30_000;
    pub const MAX_LIFETIME_MS: u64 = 1_800_000;
    pub const MAX_POOL_SIZE: u32 = 4096;
    pub const MIN_POOL_SIZE: u32 = 1;
}

/// 输出规整常量
pub mod output {
    /// 插入到 rules 键之后的类型标签行
    pub const SHARDING_DISCRIMINATOR: &str = "- !SHARDING";

    /// 基础模板中的示例表
    pub const PLACEHOLDER_TABLE: &str = "test_order";

    /// 示例表块的行数（键行 + 1 行值）
    pub const PLACEHOLDER_TABLE_SPAN: usize = 2;

    /// 基础模板中的示例算法
    pub const PLACEHOLDER_ALGORITHM: &str = "database_inline";

    /// 示例算法块的行数（键行 + 3 行值）
    pub const PLACEHOLDER_ALGORITHM_SPAN: usize = 4;
}

/// 内置模板，供 init 命令写出初始文件
pub mod templates {
    /// 基础模板，包含会被规整器移除的示例块
    pub const BASE_TEMPLATE: &str = include_str!("../templates/config-sharding_src.yaml");

    /// 用户输入示例
    pub const SAMPLE_USER_INPUT: &str = include_str!("../templates/user_input.yaml");
}
