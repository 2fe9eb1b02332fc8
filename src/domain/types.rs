// ==========================================
// blob2d 参数模板 - 标量值类型
// ==========================================
// 职责: 模板条目的类型化取值 (整数/浮点/布尔/字符串)
// 约束: Display 输出可被重新解析为相同类型与取值
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Value - 条目取值
// ==========================================
// 字符串涵盖枚举 (C2 / FFT / petsc) 与公式表达式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// 读取浮点值，整数会被提升为浮点
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", format_float(*v)),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

/// 浮点数文本化
///
/// # 规则
/// - 极大 (>= 1e16) 或极小 (< 1e-4) 的值使用科学计数法，如 1e18 / 1e-10
/// - 其他值使用普通小数，整值补 ".0"，避免被重新解析为整数
pub fn format_float(v: f64) -> String {
    if !v.is_finite() {
        // 非有限值无法作为数字字面量回写
        return format!("{}", v);
    }

    let abs = v.abs();
    if abs != 0.0 && (abs >= 1e16 || abs < 1e-4) {
        return format!("{:e}", v);
    }

    let text = format!("{}", v);
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}
