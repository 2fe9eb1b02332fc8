// ==========================================
// blob2d 参数模板 - 领域层
// ==========================================
// 职责: 值类型、分节、键路径、原始文档、已解析配置
// ==========================================

pub mod document;
pub mod resolved;
pub mod section;
pub mod types;

pub use document::{RawEntry, RawSection, TemplateDocument};
pub use resolved::ResolvedConfig;
pub use section::{Entry, KeyPath, Section, SectionName, DEFAULT_SECTION};
pub use types::Value;
