// ==========================================
// blob2d 参数模板 - 原始文档结构
// ==========================================
// 职责: 保存解析后、变量替换前的模板内容
// 说明: 值为去注释、去首尾空白后的原文
// ==========================================

use crate::domain::section::SectionName;
use crate::template::substitution::referenced_names;

/// 原始条目（替换前）
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub key: String,
    pub raw_value: String,
    pub comment: Option<String>,
    pub line: usize,
}

/// 原始分节（替换前）
#[derive(Debug, Clone, PartialEq)]
pub struct RawSection {
    pub name: SectionName,
    /// 分节头所在行号，根分节为 0
    pub line: usize,
    pub entries: Vec<RawEntry>,
}

/// 模板文档：按出现顺序排列的分节
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateDocument {
    pub sections: Vec<RawSection>,
}

impl TemplateDocument {
    pub fn section(&self, name: &SectionName) -> Option<&RawSection> {
        self.sections.iter().find(|s| &s.name == name)
    }

    /// 条目总数
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    /// 模板引用的替换变量（按首次出现顺序，去重）
    ///
    /// 非法占位符在此处被忽略，由替换阶段报告
    pub fn referenced_variables(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for entry in self.sections.iter().flat_map(|s| s.entries.iter()) {
            for name in referenced_names(&entry.raw_value) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}
