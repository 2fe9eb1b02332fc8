// ==========================================
// blob2d 参数模板 - 加载管道 Trait
// ==========================================
// 职责: 定义加载管道各阶段接口（不包含实现）
// 流程: 解析 → 变量替换 → 类型转换
// ==========================================

use crate::config::SubstitutionVars;
use crate::domain::{TemplateDocument, Value};
use crate::template::error::TemplateResult;

// ==========================================
// TemplateParser Trait
// ==========================================
// 用途: 文本解析接口（阶段 1）
// 实现者: IniTemplateParser
pub trait TemplateParser: Send + Sync {
    /// 将模板文本解析为原始文档
    ///
    /// # 参数
    /// - text: 模板全文（UTF-8）
    ///
    /// # 返回
    /// - Ok(TemplateDocument): 有序分节与原始条目
    /// - Err: Parse / DuplicateKey / DuplicateSection
    fn parse(&self, text: &str) -> TemplateResult<TemplateDocument>;
}

// ==========================================
// VariableResolver Trait
// ==========================================
// 用途: 变量替换接口（阶段 2）
// 实现者: DollarSubstitutor
pub trait VariableResolver: Send + Sync {
    /// 替换值中的全部占位符
    ///
    /// # 参数
    /// - raw: 原始值文本
    /// - vars: 外部注入的变量映射
    /// - line: 所在行号（用于错误报告）
    ///
    /// # 返回
    /// - Ok(String): 替换后的文本
    /// - Err: MissingVariable / Parse（非法占位符）
    fn resolve(&self, raw: &str, vars: &SubstitutionVars, line: usize) -> TemplateResult<String>;
}

// ==========================================
// ValueCoercer Trait
// ==========================================
// 用途: 类型转换接口（阶段 3）
// 实现者: ScalarCoercer
pub trait ValueCoercer: Send + Sync {
    /// 将文本转换为类型化取值
    ///
    /// # 优先级
    /// 整数 → 浮点 → 布尔 → 字符串
    fn coerce(&self, text: &str) -> Value;
}
