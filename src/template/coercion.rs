// ==========================================
// blob2d 参数模板 - 类型转换器实现
// ==========================================
// 优先级: 整数 → 浮点 → 布尔 → 字符串
// 说明: inf / nan 等单词不视为浮点数字面量
// ==========================================

use crate::domain::Value;
use crate::template::template_trait::ValueCoercer;

fn is_sign(c: char) -> bool {
    c == '+' || c == '-'
}

/// 是否为十进制数字字面量（可带符号、小数点与指数）
fn is_numeric_literal(text: &str) -> bool {
    let body = text.strip_prefix(is_sign).unwrap_or(text);
    let (mantissa, exponent) = match body.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (body, None),
    };

    let mut digits = 0;
    let mut dots = 0;
    for c in mantissa.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    if digits == 0 || dots > 1 {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(is_sign).unwrap_or(exp);
            !exp.is_empty() && exp.chars().all(|c| c.is_ascii_digit())
        }
    }
}

// ==========================================
// ScalarCoercer 实现
// ==========================================
pub struct ScalarCoercer;

impl ValueCoercer for ScalarCoercer {
    fn coerce(&self, text: &str) -> Value {
        let text = text.trim();

        if is_numeric_literal(text) {
            if let Ok(v) = text.parse::<i64>() {
                return Value::Integer(v);
            }
            // 超出 f64 范围的字面量 (如 1e400) 保留为字符串
            if let Some(v) = text.parse::<f64>().ok().filter(|v| v.is_finite()) {
                return Value::Float(v);
            }
        }

        if text.eq_ignore_ascii_case("true") {
            return Value::Boolean(true);
        }
        if text.eq_ignore_ascii_case("false") {
            return Value::Boolean(false);
        }

        Value::String(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coerce(text: &str) -> Value {
        ScalarCoercer.coerce(text)
    }

    #[test]
    fn test_integer() {
        assert_eq!(coerce("100"), Value::Integer(100));
        assert_eq!(coerce("-3"), Value::Integer(-3));
        assert_eq!(coerce("+7"), Value::Integer(7));
    }

    #[test]
    fn test_float() {
        assert_eq!(coerce("1e-10"), Value::Float(1e-10));
        assert_eq!(coerce("1e-05"), Value::Float(1e-5));
        assert_eq!(coerce("0.3"), Value::Float(0.3));
        assert_eq!(coerce("1e18"), Value::Float(1e18));
        assert_eq!(coerce(".5"), Value::Float(0.5));
        assert_eq!(coerce("2."), Value::Float(2.0));
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        assert_eq!(
            coerce("99999999999999999999"),
            Value::Float(99999999999999999999.0)
        );
    }

    #[test]
    fn test_boolean() {
        assert_eq!(coerce("false"), Value::Boolean(false));
        assert_eq!(coerce("true"), Value::Boolean(true));
        assert_eq!(coerce("True"), Value::Boolean(true));
    }

    #[test]
    fn test_string_and_enum() {
        assert_eq!(coerce("C2"), Value::from("C2"));
        assert_eq!(coerce("FFT"), Value::from("FFT"));
        assert_eq!(coerce("petsc"), Value::from("petsc"));
        assert_eq!(coerce("inf"), Value::from("inf"));
        assert_eq!(coerce("nan"), Value::from("nan"));
        assert_eq!(coerce("1e"), Value::from("1e"));
        assert_eq!(coerce("."), Value::from("."));
        assert_eq!(coerce("1e400"), Value::from("1e400"));
        assert_eq!(coerce("-1e400"), Value::from("-1e400"));
        assert_eq!(
            coerce("1 + height * exp(-x^2)"),
            Value::from("1 + height * exp(-x^2)")
        );
    }
}
