// ==========================================
// blob2d 参数模板 - 模板层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 所有错误均上抛调用方，不做静默恢复
// ==========================================

use thiserror::Error;

/// 模板层错误类型
#[derive(Error, Debug)]
pub enum TemplateError {
    // ===== 解析错误 =====
    #[error("解析失败 (行 {line}): {message}")]
    Parse { line: usize, message: String },

    #[error("重复键 (分节 '{section}', 键 '{key}'): 行 {line} 与行 {first_line} 冲突")]
    DuplicateKey {
        section: String,
        key: String,
        line: usize,
        first_line: usize,
    },

    #[error("重复分节 '{section}': 行 {line} 与行 {first_line} 冲突")]
    DuplicateSection {
        section: String,
        line: usize,
        first_line: usize,
    },

    #[error("键路径非法: {0}")]
    InvalidKeyPath(String),

    #[error("键路径未定义: {0}")]
    UndefinedKey(String),

    // ===== 变量替换错误 =====
    #[error("缺少替换变量: {0}")]
    MissingVariable(String),

    // ===== 参数空间错误 =====
    #[error("未知参数: {0}")]
    UnknownParameter(String),

    #[error("参数值非法 (参数 {name}): {message}")]
    InvalidParameter { name: String, message: String },

    #[error("参数越界 (参数 {name}): 值 {value} 超出范围 [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    // ===== 文件错误 =====
    #[error("文件读取失败 ({path}): {message}")]
    FileRead { path: String, message: String },

    #[error("文件写入失败 ({path}): {message}")]
    FileWrite { path: String, message: String },

    #[error("参数文件格式错误 ({path}): {message}")]
    ParamFile { path: String, message: String },

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

impl TemplateError {
    /// 构造带行号的解析错误
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        TemplateError::Parse {
            line,
            message: message.into(),
        }
    }

    /// 出错行号（仅解析类错误携带）
    pub fn line(&self) -> Option<usize> {
        match self {
            TemplateError::Parse { line, .. }
            | TemplateError::DuplicateKey { line, .. }
            | TemplateError::DuplicateSection { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result 类型别名
pub type TemplateResult<T> = Result<T, TemplateError>;
