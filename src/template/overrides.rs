// ==========================================
// blob2d 参数模板 - 命令行覆盖项
// ==========================================
// 格式: `section:sub.key=value`，根分节为 `key=value`
// ==========================================

use crate::domain::{KeyPath, Value};
use crate::template::coercion::ScalarCoercer;
use crate::template::error::{TemplateError, TemplateResult};
use crate::template::file_parser::is_inline_value;
use crate::template::template_trait::ValueCoercer;

/// 解析单个覆盖项，值按加载器相同规则做类型转换
pub fn parse_override(text: &str) -> TemplateResult<(KeyPath, Value)> {
    let (path, value) = text
        .split_once('=')
        .ok_or_else(|| TemplateError::InvalidKeyPath(format!("覆盖项缺少 '=': {}", text)))?;

    let path: KeyPath = path.parse()?;
    if !is_inline_value(value) {
        let message = format!("覆盖值含有 '#' 或换行: {}", text);
        return Err(TemplateError::InvalidKeyPath(message));
    }
    Ok((path, ScalarCoercer.coerce(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root_override() {
        let (path, value) = parse_override("nout=3").unwrap();
        assert_eq!(path.to_string(), "nout");
        assert_eq!(value, Value::Integer(3));
    }

    #[test]
    fn test_parse_nested_override() {
        let (path, value) = parse_override("mesh:ddz.first = C4").unwrap();
        assert_eq!(path.to_string(), "mesh:ddz.first");
        assert_eq!(value, Value::from("C4"));
    }

    #[test]
    fn test_override_value_with_comment_char() {
        assert!(matches!(
            parse_override("model.label=a#b"),
            Err(TemplateError::InvalidKeyPath(_))
        ));
    }

    #[test]
    fn test_override_without_equals() {
        assert!(matches!(
            parse_override("nout"),
            Err(TemplateError::InvalidKeyPath(_))
        ));
    }
}
