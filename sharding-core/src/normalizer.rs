use crate::constants::keys::{RULES, SHARDING_ALGORITHMS, TABLES};
use crate::constants::output::{
    PLACEHOLDER_ALGORITHM, PLACEHOLDER_ALGORITHM_SPAN, PLACEHOLDER_TABLE, PLACEHOLDER_TABLE_SPAN,
    SHARDING_DISCRIMINATOR,
};
use crate::error::{Result, ShardingError};
use regex::Regex;
use tracing::debug;

/// 基础模板遗留的示例块：所在的 `rules` 子节点、键名及其在序列化文本中占用的行数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderBlock {
    pub section: &'static str,
    pub key: &'static str,
    pub span: usize,
}

/// 默认模板中的示例块
pub const DEFAULT_PLACEHOLDERS: [PlaceholderBlock; 2] = [
    PlaceholderBlock {
        section: TABLES,
        key: PLACEHOLDER_TABLE,
        span: PLACEHOLDER_TABLE_SPAN,
    },
    PlaceholderBlock {
        section: SHARDING_ALGORITHMS,
        key: PLACEHOLDER_ALGORITHM,
        span: PLACEHOLDER_ALGORITHM_SPAN,
    },
];

/// 序列化结果的逐行规整器
///
/// 通用的 YAML 对象模型无法表达 `!SHARDING` 类型标签，只能在序列化之后按行插入。
/// 示例块只在 `rules.<section>` 的直接子键中识别，按固定行数跳过；
/// 形状与模板不一致时报错而不是输出错误的文档。
#[derive(Debug)]
pub struct OutputNormalizer {
    key_line: Regex,
    placeholders: Vec<PlaceholderBlock>,
}

impl OutputNormalizer {
    pub fn new() -> Result<Self> {
        Self::with_placeholders(&DEFAULT_PLACEHOLDERS)
    }

    pub fn with_placeholders(blocks: &[PlaceholderBlock]) -> Result<Self> {
        // 映射键行：缩进、键名、冒号后的剩余部分（含换行符）
        let key_line = Regex::new(r"(?s)^(?P<indent> *)(?P<key>[^\s#\-][^:]*?):(?P<rest>\s.*)?$")?;
        Ok(Self {
            key_line,
            placeholders: blocks.to_vec(),
        })
    }

    /// 规整整段文本
    pub fn normalize(&self, text: &str) -> Result<String> {
        let lines: Vec<String> = text.split_inclusive('\n').map(String::from).collect();
        Ok(self.normalize_lines(&lines)?.concat())
    }

    /// 规整按行切分的文本，每行保留自身的换行符
    pub fn normalize_lines(&self, lines: &[String]) -> Result<Vec<String>> {
        let mut output = Vec::with_capacity(lines.len() + 1);
        // 当前行的祖先键：(缩进, 键名)
        let mut path: Vec<(usize, String)> = Vec::new();
        let mut anchors = 0;
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];
            let Some(caps) = self.key_line.captures(line) else {
                output.push(line.clone());
                i += 1;
                continue;
            };

            let indent = caps["indent"].len();
            let key = &caps["key"];
            let bare = caps.name("rest").is_none_or(|m| m.as_str().trim().is_empty());
            while path.last().is_some_and(|(depth, _)| *depth >= indent) {
                path.pop();
            }

            if indent == 0 && key == RULES && bare {
                anchors += 1;
                output.push(line.clone());
                output.push(format!("{SHARDING_DISCRIMINATOR}\n"));
            } else if let Some(block) = self.match_placeholder(&path, key) {
                if !bare {
                    return Err(ShardingError::template_mismatch(format!(
                        "示例块 {} (第 {} 行) 应为 {} 行的映射，实际为单行值",
                        block.key,
                        i + 1,
                        block.span
                    )));
                }
                verify_block(lines, i, block)?;
                debug!("移除示例块 {} (第 {} 行起共 {} 行)", block.key, i + 1, block.span);
                i += block.span;
                continue;
            } else {
                output.push(line.clone());
            }

            path.push((indent, key.to_string()));
            i += 1;
        }

        if anchors != 1 {
            return Err(ShardingError::template_mismatch(format!(
                "{RULES} 键应出现 1 次，实际出现 {anchors} 次"
            )));
        }

        Ok(output)
    }

    /// 仅匹配 `rules.<section>` 下的直接子键
    fn match_placeholder(&self, path: &[(usize, String)], key: &str) -> Option<PlaceholderBlock> {
        let [(root_indent, root), (_, section)] = path else {
            return None;
        };
        if *root_indent != 0 || root != RULES {
            return None;
        }
        self.placeholders
            .iter()
            .find(|block| block.section == section && block.key == key)
            .copied()
    }
}

/// 校验示例块确实占用 `span` 行：块内各行缩进深于键行，块后一行不再属于该块
fn verify_block(lines: &[String], start: usize, block: PlaceholderBlock) -> Result<()> {
    let end = start + block.span;
    if end > lines.len() {
        return Err(ShardingError::template_mismatch(format!(
            "示例块 {} 在第 {} 行处被截断，预期 {} 行",
            block.key,
            start + 1,
            block.span
        )));
    }

    let base = indent_of(&lines[start]);
    let inner_ok = lines[start + 1..end]
        .iter()
        .all(|line| !line.trim().is_empty() && indent_of(line) > base);
    let trailing_ok = lines
        .get(end)
        .is_none_or(|next| next.trim().is_empty() || indent_of(next) <= base);

    if !inner_ok || !trailing_ok {
        return Err(ShardingError::template_mismatch(format!(
            "示例块 {} (第 {} 行) 与预期的 {} 行不一致",
            block.key,
            start + 1,
            block.span
        )));
    }
    Ok(())
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// 使用默认示例块规整文本
pub fn normalize(text: &str) -> Result<String> {
    OutputNormalizer::new()?.normalize(text)
}
