// ==========================================
// blob2d 参数模板 - 文本解析器实现
// ==========================================
// 支持: `[section]` / `[section:sub]` 分节头, `key = value  # comment` 条目
// 约束: 同一分节内键唯一; 分节名唯一 (重复即报错)
// ==========================================

use crate::domain::section::is_valid_name;
use crate::domain::{RawEntry, RawSection, SectionName, TemplateDocument};
use crate::template::error::{TemplateError, TemplateResult};
use crate::template::template_trait::TemplateParser;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// 拆分行内注释
///
/// # 返回
/// - (代码部分, 注释文本): 注释不含 `#`，已去首尾空白
pub fn split_comment(line: &str) -> (&str, Option<&str>) {
    match line.find('#') {
        Some(idx) => (&line[..idx], Some(line[idx + 1..].trim())),
        None => (line, None),
    }
}

/// 取值能否原样写入单行条目（不含 `#` 与换行）
pub fn is_inline_value(text: &str) -> bool {
    !text.contains(|c: char| c == '#' || c == '\n' || c == '\r')
}

/// 读取模板文件全文
pub fn read_template_file(path: &Path) -> TemplateResult<String> {
    fs::read_to_string(path).map_err(|e| TemplateError::FileRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

// ==========================================
// IniTemplateParser 实现
// ==========================================
pub struct IniTemplateParser;

impl IniTemplateParser {
    /// 从文件解析
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> TemplateResult<TemplateDocument> {
        let text = read_template_file(path.as_ref())?;
        self.parse(&text)
    }

    fn parse_header(&self, code: &str, line_no: usize) -> TemplateResult<SectionName> {
        let inner = code
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| TemplateError::parse(line_no, format!("分节头格式错误: {}", code)))?;

        SectionName::parse(inner).map_err(|msg| TemplateError::parse(line_no, msg))
    }

    fn parse_entry(
        &self,
        code: &str,
        comment: Option<&str>,
        line_no: usize,
    ) -> TemplateResult<RawEntry> {
        let (key, value) = code.split_once('=').ok_or_else(|| {
            TemplateError::parse(line_no, format!("缺少 '=': {}", code.trim()))
        })?;

        let key = key.trim();
        if !is_valid_name(key) {
            return Err(TemplateError::parse(line_no, format!("键名非法: '{}'", key)));
        }

        Ok(RawEntry {
            key: key.to_string(),
            raw_value: value.trim().to_string(),
            comment: comment.filter(|c| !c.is_empty()).map(str::to_string),
            line: line_no,
        })
    }
}

impl TemplateParser for IniTemplateParser {
    fn parse(&self, text: &str) -> TemplateResult<TemplateDocument> {
        let mut sections: Vec<RawSection> = vec![RawSection {
            name: SectionName::root(),
            line: 0,
            entries: Vec::new(),
        }];
        // 分节名 → 分节头行号
        let mut seen_sections: HashMap<SectionName, usize> = HashMap::new();
        // 当前分节内 键 → 行号
        let mut seen_keys: HashMap<String, usize> = HashMap::new();

        // UTF-8 BOM 不属于首行内容
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let (code, comment) = split_comment(line);
            let code = code.trim();

            // 跳过空行与纯注释行
            if code.is_empty() {
                continue;
            }

            if code.starts_with('[') {
                let name = self.parse_header(code, line_no)?;
                if let Some(&first_line) = seen_sections.get(&name) {
                    return Err(TemplateError::DuplicateSection {
                        section: name.to_string(),
                        line: line_no,
                        first_line,
                    });
                }

                tracing::debug!(section = %name, line = line_no, "解析分节");
                seen_sections.insert(name.clone(), line_no);
                seen_keys.clear();
                sections.push(RawSection {
                    name,
                    line: line_no,
                    entries: Vec::new(),
                });
                continue;
            }

            let entry = self.parse_entry(code, comment, line_no)?;
            // sections 至少包含根分节
            let current = sections.last_mut().ok_or_else(|| {
                TemplateError::parse(line_no, "内部状态错误: 无当前分节")
            })?;

            if let Some(&first_line) = seen_keys.get(&entry.key) {
                return Err(TemplateError::DuplicateKey {
                    section: current.name.to_string(),
                    key: entry.key,
                    line: line_no,
                    first_line,
                });
            }

            seen_keys.insert(entry.key.clone(), line_no);
            current.entries.push(entry);
        }

        // 根分节为空时不保留
        if sections[0].entries.is_empty() {
            sections.remove(0);
        }

        Ok(TemplateDocument { sections })
    }
}
