// ==========================================
// blob2d 参数模板 - API 层
// ==========================================
// 职责: 面向命令行的用例封装（解析、渲染、变量清单）
// ==========================================

pub mod template_api;

pub use template_api::TemplateApi;
