// ==========================================
// blob2d 参数模板 - 分节与键路径
// ==========================================
// 职责: 分节名 (支持 `parent:child` 层级)、完整键路径、类型化条目
// 约束: 同一分节内键唯一; 分节名唯一
// ==========================================

use crate::domain::types::Value;
use crate::template::error::{TemplateError, TemplateResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 默认值分节名称
pub const DEFAULT_SECTION: &str = "all";

/// 判断名称片段是否合法（ASCII 字母数字、下划线、连字符）
pub fn is_valid_name(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

// ==========================================
// SectionName - 分节名
// ==========================================
// 根分节 (首个 [header] 之前的条目) 没有片段
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct SectionName {
    segments: Vec<String>,
}

impl SectionName {
    pub fn root() -> Self {
        Self::default()
    }

    /// 解析 `mesh:ddx` 形式的分节名
    ///
    /// # 返回
    /// - Ok(SectionName): 所有片段合法
    /// - Err(String): 非法片段的描述（由调用方包装为带行号的错误）
    pub fn parse(text: &str) -> Result<Self, String> {
        let text = text.trim();
        if text.is_empty() {
            return Err("分节名为空".to_string());
        }

        let mut segments = Vec::new();
        for segment in text.split(':') {
            let segment = segment.trim();
            if !is_valid_name(segment) {
                return Err(format!("分节名片段非法: '{}' (位于 '{}')", segment, text));
            }
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// 是否为默认值分节 `all`
    pub fn is_default(&self) -> bool {
        self.segments.len() == 1 && self.segments[0] == DEFAULT_SECTION
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// 默认继承的回退分节
    ///
    /// 除 `all` 自身与根分节外，所有具名分节回退到 `all`
    pub fn fallback(&self) -> Option<SectionName> {
        if self.is_root() || self.is_default() {
            None
        } else {
            Some(Self {
                segments: vec![DEFAULT_SECTION.to_string()],
            })
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(":"))
    }
}

impl FromStr for SectionName {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::root());
        }
        Self::parse(s).map_err(TemplateError::InvalidKeyPath)
    }
}

// ==========================================
// KeyPath - 完整键路径
// ==========================================
// 文本形式: `section:subsection.key`，根分节为 `key`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    pub section: SectionName,
    pub key: String,
}

impl KeyPath {
    pub fn new(section: SectionName, key: impl Into<String>) -> Self {
        Self {
            section,
            key: key.into(),
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.section.is_root() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}.{}", self.section, self.key)
        }
    }
}

impl FromStr for KeyPath {
    type Err = TemplateError;

    fn from_str(s: &str) -> TemplateResult<Self> {
        let s = s.trim();
        let (section, key) = match s.rfind('.') {
            Some(idx) => (&s[..idx], &s[idx + 1..]),
            None => ("", s),
        };

        if !is_valid_name(key) {
            return Err(TemplateError::InvalidKeyPath(s.to_string()));
        }
        if s.contains('.') && section.trim().is_empty() {
            return Err(TemplateError::InvalidKeyPath(s.to_string()));
        }

        let section = SectionName::from_str(section)
            .map_err(|_| TemplateError::InvalidKeyPath(s.to_string()))?;

        Ok(Self::new(section, key))
    }
}

// ==========================================
// Entry - 已解析条目
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: Value,
    pub comment: Option<String>,
    /// 来源行号（1 起始），运行期写入的条目为 None
    pub line: Option<usize>,
}

// ==========================================
// Section - 已解析分节
// ==========================================
// 条目保持原始顺序，索引用于按键查找
#[derive(Debug, Clone, Default)]
pub struct Section {
    name: SectionName,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl Section {
    pub fn new(name: SectionName) -> Self {
        Self {
            name,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &SectionName {
        &self.name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.index.get(key).map(|&idx| &self.entries[idx])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 写入条目，已存在的键原位覆盖并保留注释
    ///
    /// # 返回
    /// - Some(Value): 被覆盖的旧值
    /// - None: 新增条目
    pub fn upsert(&mut self, entry: Entry) -> Option<Value> {
        match self.index.get(&entry.key) {
            Some(&idx) => {
                let existing = &mut self.entries[idx];
                let old = std::mem::replace(&mut existing.value, entry.value);
                if entry.comment.is_some() {
                    existing.comment = entry.comment;
                }
                Some(old)
            }
            None => {
                self.index.insert(entry.key.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_name_parse_nested() {
        let name = SectionName::parse("phiSolver:precon").unwrap();
        assert_eq!(name.segments(), &["phiSolver".to_string(), "precon".to_string()]);
        assert_eq!(name.to_string(), "phiSolver:precon");
    }

    #[test]
    fn test_section_name_rejects_empty_segment() {
        assert!(SectionName::parse("mesh::ddx").is_err());
        assert!(SectionName::parse("").is_err());
        assert!(SectionName::parse("mesh ddx").is_err());
    }

    #[test]
    fn test_fallback_only_for_named_sections() {
        assert!(SectionName::root().fallback().is_none());
        assert!(SectionName::parse("all").unwrap().fallback().is_none());
        assert_eq!(
            SectionName::parse("n").unwrap().fallback().unwrap().to_string(),
            "all"
        );
    }

    #[test]
    fn test_key_path_round_trip() {
        let path: KeyPath = "mesh:ddx.first".parse().unwrap();
        assert_eq!(path.section.to_string(), "mesh:ddx");
        assert_eq!(path.key, "first");
        assert_eq!(path.to_string(), "mesh:ddx.first");

        let root: KeyPath = "nout".parse().unwrap();
        assert!(root.section.is_root());
        assert_eq!(root.to_string(), "nout");
    }

    #[test]
    fn test_key_path_invalid() {
        assert!("".parse::<KeyPath>().is_err());
        assert!(".nout".parse::<KeyPath>().is_err());
        assert!("mesh.".parse::<KeyPath>().is_err());
        assert!("mesh::x.nx".parse::<KeyPath>().is_err());
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let mut section = Section::new(SectionName::parse("n").unwrap());
        section.upsert(Entry {
            key: "scale".to_string(),
            value: Value::Float(1.0),
            comment: Some("size of perturbation".to_string()),
            line: Some(3),
        });
        let old = section.upsert(Entry {
            key: "scale".to_string(),
            value: Value::Float(2.0),
            comment: None,
            line: None,
        });

        assert_eq!(old, Some(Value::Float(1.0)));
        assert_eq!(section.len(), 1);
        let entry = section.get("scale").unwrap();
        assert_eq!(entry.value, Value::Float(2.0));
        assert_eq!(entry.comment.as_deref(), Some("size of perturbation"));
    }
}
