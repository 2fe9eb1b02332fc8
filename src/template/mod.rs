// ==========================================
// blob2d 参数模板 - 模板层
// ==========================================
// 职责: 模板解析、变量替换、类型转换、序列化与渲染
// 流程: 解析 → 替换 → 转换 → 已解析配置
// ==========================================

// 模块声明
pub mod coercion;
pub mod encoder;
pub mod error;
pub mod file_parser;
pub mod loader;
pub mod overrides;
pub mod serializer;
pub mod substitution;
pub mod template_trait;

// 重导出核心类型
pub use coercion::ScalarCoercer;
pub use encoder::{TemplateEncoder, DEFAULT_TARGET_FILENAME};
pub use error::{TemplateError, TemplateResult};
pub use file_parser::IniTemplateParser;
pub use loader::TemplateLoader;
pub use overrides::parse_override;
pub use serializer::to_template_string;
pub use substitution::DollarSubstitutor;

// 重导出 Trait 接口
pub use template_trait::{TemplateParser, ValueCoercer, VariableResolver};
