// ==========================================
// blob2d 参数模板 - 配置层
// ==========================================
// 职责: 替换变量映射 + 参数空间（默认值、范围校验）
// 存储: JSON 参数文件，内置 blob2d 默认参数
// ==========================================

pub mod parameter_space;
pub mod variables;

// 重导出核心配置类型
pub use parameter_space::{ParamSpec, ParamType, ParameterSpace};
pub use variables::SubstitutionVars;
