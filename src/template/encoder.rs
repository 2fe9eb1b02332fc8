// ==========================================
// blob2d 参数模板 - 模板编码器
// ==========================================
// 职责: 以 `$` 为定界符渲染模板，写入运行目录下的输入文件
// 说明: 只替换每行的代码部分，注释与版式保持原样
// ==========================================

use crate::config::SubstitutionVars;
use crate::template::error::{TemplateError, TemplateResult};
use crate::template::file_parser::{read_template_file, split_comment, IniTemplateParser};
use crate::template::substitution::DollarSubstitutor;
use crate::template::template_trait::{TemplateParser, VariableResolver};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// 求解器读取的默认输入文件名
pub const DEFAULT_TARGET_FILENAME: &str = "BOUT.inp";

// ==========================================
// TemplateEncoder - 模板编码器
// ==========================================
pub struct TemplateEncoder {
    target_filename: String,
}

impl Default for TemplateEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_FILENAME)
    }
}

impl TemplateEncoder {
    pub fn new(target_filename: impl Into<String>) -> Self {
        Self {
            target_filename: target_filename.into(),
        }
    }

    pub fn target_filename(&self) -> &str {
        &self.target_filename
    }

    /// 渲染模板文本
    ///
    /// # 参数
    /// - text: 模板全文
    /// - vars: 替换变量映射
    ///
    /// # 返回
    /// - Ok(String): 渲染结果（行数与注释不变）
    /// - Err: MissingVariable / Parse（非法占位符）
    pub fn render(&self, text: &str, vars: &SubstitutionVars) -> TemplateResult<String> {
        let resolver = DollarSubstitutor;
        let mut out = String::with_capacity(text.len());

        for (idx, line) in text.lines().enumerate() {
            let (code, comment) = split_comment(line);
            out.push_str(&resolver.resolve(code, vars, idx + 1)?);

            if comment.is_some() {
                // 保留原注释（含 `#` 与原始间距）
                out.push_str(&line[code.len()..]);
            }
            out.push('\n');
        }

        if !text.ends_with('\n') && out.ends_with('\n') {
            out.pop();
        }

        Ok(out)
    }

    /// 渲染模板文件并写入运行目录
    ///
    /// # 流程
    /// 1. 读取模板并渲染
    /// 2. 解析渲染结果，确保其为合法输入文件
    /// 3. 创建运行目录（如不存在）并写入 target_filename
    ///
    /// # 返回
    /// - Ok(PathBuf): 写入的文件路径
    #[instrument(
        skip(self, template_path, run_dir, vars),
        fields(template = %template_path.display(), out = %run_dir.display())
    )]
    pub fn encode_to_dir(
        &self,
        template_path: &Path,
        run_dir: &Path,
        vars: &SubstitutionVars,
    ) -> TemplateResult<PathBuf> {
        let text = read_template_file(template_path)?;
        let rendered = self.render(&text, vars)?;
        let document = IniTemplateParser.parse(&rendered)?;

        fs::create_dir_all(run_dir).map_err(|e| TemplateError::FileWrite {
            path: run_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let target = run_dir.join(&self.target_filename);
        fs::write(&target, rendered).map_err(|e| TemplateError::FileWrite {
            path: target.display().to_string(),
            message: e.to_string(),
        })?;

        info!(
            target = %target.display(),
            sections = document.sections.len(),
            entries = document.entry_count(),
            "输入文件已写入"
        );
        Ok(target)
    }
}
