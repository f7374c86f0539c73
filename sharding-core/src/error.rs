use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShardingError>;

/// 用户输入文档格式错误
///
/// 任何一种都会在写出结果文件之前中止本次生成
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputFormatError {
    #[error("输入文档缺少必需的键: {key}")]
    MissingKey { key: String },

    #[error("输入格式错误: 请至少提供一张需要分片的表 (缺少 tables)")]
    MissingTables,

    #[error("{kind} 格式错误: '{token}' 需要 {expected} 个字段，实际 {found} 个")]
    MalformedToken {
        kind: &'static str,
        token: String,
        expected: usize,
        found: usize,
    },

    #[error("表定义 '{token}' 中的 {field} 不是正整数: '{value}'")]
    InvalidCount {
        token: String,
        field: &'static str,
        value: String,
    },

    #[error("{kind} 必须是字符串")]
    NotAString { kind: &'static str },

    #[error("{key} 必须是列表")]
    NotASequence { key: String },
}

#[derive(Error, Debug)]
pub enum ShardingError {
    #[error(transparent)]
    InputFormat(#[from] InputFormatError),

    #[error("算法名冲突: '{name}' (表 '{table}') 已存在，拒绝覆盖")]
    AlgorithmNameCollision { name: String, table: String },

    #[error("输出模板不匹配: {0}")]
    OutputTemplateMismatch(String),

    #[error("基础模板结构错误: {0}")]
    TemplateStructure(String),

    #[error("配置错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("YAML 错误: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("正则表达式编译失败: {0}")]
    Regex(#[from] regex::Error),

    #[error("读取文件 {} 失败: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("输出文件写入失败: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl ShardingError {
    pub fn template_mismatch(msg: impl Into<String>) -> Self {
        Self::OutputTemplateMismatch(msg.into())
    }

    pub fn template_structure(msg: impl Into<String>) -> Self {
        Self::TemplateStructure(msg.into())
    }

    pub fn collision(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self::AlgorithmNameCollision {
            name: name.into(),
            table: table.into(),
        }
    }

    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// 是否属于用户输入格式错误
    pub fn is_input_format(&self) -> bool {
        matches!(self, Self::InputFormat(_))
    }
}
