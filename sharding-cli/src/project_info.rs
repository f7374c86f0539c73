/// Shardgen 项目信息模块
///
/// 项目元数据统一在这里定义，sharding-core 作为内部库只提供技术性常量

/// 项目元数据（自动从 Cargo.toml 同步）
pub mod metadata {
    /// 项目描述
    pub const PROJECT_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

    /// 项目作者
    pub const PROJECT_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

    pub mod display {
        /// CLI 工具的完整名称
        pub const CLI_FULL_NAME: &str = "Shardgen CLI";

        /// 项目详细描述
        pub const DESCRIPTION_LONG: &str = "根据简写的表和数据源定义，生成分布式数据库代理所需的完整分片配置：数据源连接池、表分布表达式以及数据源和表两级的行表达式分片算法";
    }
}

/// 版本信息
pub mod version_info {
    /// CLI 版本（自动从 Cargo.toml 同步）
    pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
}
