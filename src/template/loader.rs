// ==========================================
// blob2d 参数模板 - 模板加载器
// ==========================================
// 职责: 整合加载流程，从模板文本到已解析配置
// 流程: 解析 → 变量替换 → 类型转换 → 组装
// ==========================================

use crate::config::SubstitutionVars;
use crate::domain::{Entry, ResolvedConfig, Section, TemplateDocument};
use crate::template::coercion::ScalarCoercer;
use crate::template::error::TemplateResult;
use crate::template::file_parser::{read_template_file, IniTemplateParser};
use crate::template::substitution::DollarSubstitutor;
use crate::template::template_trait::{TemplateParser, ValueCoercer, VariableResolver};
use std::path::Path;
use tracing::{debug, info, instrument};

// ==========================================
// TemplateLoader - 模板加载器
// ==========================================
pub struct TemplateLoader {
    parser: Box<dyn TemplateParser>,
    resolver: Box<dyn VariableResolver>,
    coercer: Box<dyn ValueCoercer>,
}

impl Default for TemplateLoader {
    fn default() -> Self {
        Self::new(
            Box::new(IniTemplateParser),
            Box::new(DollarSubstitutor),
            Box::new(ScalarCoercer),
        )
    }
}

impl TemplateLoader {
    /// 创建新的 TemplateLoader 实例
    ///
    /// # 参数
    /// - parser: 文本解析器
    /// - resolver: 变量替换器
    /// - coercer: 类型转换器
    pub fn new(
        parser: Box<dyn TemplateParser>,
        resolver: Box<dyn VariableResolver>,
        coercer: Box<dyn ValueCoercer>,
    ) -> Self {
        Self {
            parser,
            resolver,
            coercer,
        }
    }

    /// 仅解析（不替换），用于预检引用的变量
    pub fn parse(&self, text: &str) -> TemplateResult<TemplateDocument> {
        self.parser.parse(text)
    }

    /// 加载模板文本
    ///
    /// # 参数
    /// - text: 模板全文
    /// - vars: 替换变量映射
    ///
    /// # 返回
    /// - Ok(ResolvedConfig): 已解析配置
    /// - Err: Parse / DuplicateKey / DuplicateSection / MissingVariable
    #[instrument(skip(self, text, vars), fields(var_count = vars.len()))]
    pub fn load(&self, text: &str, vars: &SubstitutionVars) -> TemplateResult<ResolvedConfig> {
        let document = self.parser.parse(text)?;
        let config = self.resolve_document(&document, vars)?;

        info!(
            sections = config.sections().len(),
            entries = config.len(),
            "模板加载完成"
        );
        Ok(config)
    }

    /// 加载模板文件
    #[instrument(skip(self, path, vars), fields(template = %path.as_ref().display()))]
    pub fn load_file<P: AsRef<Path>>(
        &self,
        path: P,
        vars: &SubstitutionVars,
    ) -> TemplateResult<ResolvedConfig> {
        let text = read_template_file(path.as_ref())?;
        self.load(&text, vars)
    }

    /// 对已解析文档执行变量替换与类型转换
    pub fn resolve_document(
        &self,
        document: &TemplateDocument,
        vars: &SubstitutionVars,
    ) -> TemplateResult<ResolvedConfig> {
        let mut sections = Vec::with_capacity(document.sections.len());

        for raw_section in &document.sections {
            let mut section = Section::new(raw_section.name.clone());

            for raw in &raw_section.entries {
                let text = self.resolver.resolve(&raw.raw_value, vars, raw.line)?;
                let value = self.coercer.coerce(&text);

                section.upsert(Entry {
                    key: raw.key.clone(),
                    value,
                    comment: raw.comment.clone(),
                    line: Some(raw.line),
                });
            }

            debug!(
                section = %raw_section.name,
                entries = section.len(),
                "分节解析完成"
            );
            sections.push(section);
        }

        Ok(ResolvedConfig::from_sections(sections))
    }
}
