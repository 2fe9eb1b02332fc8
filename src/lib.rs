// ==========================================
// blob2d 参数模板 - 核心库
// ==========================================
// 职责: 解析 BOUT++ 风格参数模板，替换 `$name` 变量，
//       类型化取值并提供 `all` 分节默认继承
// 范围: 不包含求解器、数值积分与网格划分
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值、分节、已解析配置
pub mod domain;

// 模板层 - 解析、替换、转换、渲染
pub mod template;

// 配置层 - 替换变量与参数空间
pub mod config;

// API 层 - 命令行用例
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use api::TemplateApi;
pub use config::{ParamSpec, ParamType, ParameterSpace, SubstitutionVars};
pub use domain::{KeyPath, ResolvedConfig, Section, SectionName, TemplateDocument, Value};
pub use template::{
    parse_override, to_template_string, TemplateEncoder, TemplateError, TemplateLoader,
    TemplateResult,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "blob2d 参数模板加载器";

/// 便捷入口：以默认组件加载模板文本
pub fn load_str(text: &str, vars: &SubstitutionVars) -> TemplateResult<ResolvedConfig> {
    TemplateLoader::default().load(text, vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_load_str() {
        let config = load_str("[all]\nscale = 0.0\n[n]\n", &SubstitutionVars::new()).unwrap();
        assert_eq!(config.get_f64("n.scale").unwrap(), Some(0.0));
    }
}
