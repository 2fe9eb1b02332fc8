// ==========================================
// blob2d 参数模板 - 变量替换
// ==========================================
// 占位符: `$name` / `${name}`，`$$` 表示字面量 `$`
// 变量名: [A-Za-z_][A-Za-z0-9_]*
// ==========================================

use crate::config::SubstitutionVars;
use crate::template::error::{TemplateError, TemplateResult};
use crate::template::file_parser::is_inline_value;
use crate::template::template_trait::VariableResolver;

/// 占位符扫描结果
#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    Literal(&'a str),
    Dollar,
    Variable(&'a str),
    Invalid(usize),
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// 将文本切分为字面量与占位符
fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }

        if literal_start < i {
            tokens.push(Token::Literal(&text[literal_start..i]));
        }

        let rest = &text[i + 1..];
        if rest.starts_with('$') {
            tokens.push(Token::Dollar);
            i += 2;
        } else if let Some(braced) = rest.strip_prefix('{') {
            match braced.find('}') {
                Some(end)
                    if end > 0
                        && braced[..end].starts_with(is_ident_start)
                        && braced[..end].chars().all(is_ident_char) =>
                {
                    tokens.push(Token::Variable(&braced[..end]));
                    i += end + 3;
                }
                _ => {
                    tokens.push(Token::Invalid(i));
                    i += 1;
                }
            }
        } else if rest.starts_with(is_ident_start) {
            let len = rest
                .find(|c: char| !is_ident_char(c))
                .unwrap_or(rest.len());
            tokens.push(Token::Variable(&rest[..len]));
            i += len + 1;
        } else {
            tokens.push(Token::Invalid(i));
            i += 1;
        }

        literal_start = i;
    }

    if literal_start < text.len() {
        tokens.push(Token::Literal(&text[literal_start..]));
    }

    tokens
}

/// 文本中引用的变量名（按出现顺序，含重复；忽略非法占位符）
pub fn referenced_names(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter_map(|t| match t {
            Token::Variable(name) => Some(name.to_string()),
            _ => None,
        })
        .collect()
}

// ==========================================
// DollarSubstitutor 实现
// ==========================================
pub struct DollarSubstitutor;

impl VariableResolver for DollarSubstitutor {
    fn resolve(&self, raw: &str, vars: &SubstitutionVars, line: usize) -> TemplateResult<String> {
        // 快速路径: 无占位符
        if !raw.contains('$') {
            return Ok(raw.to_string());
        }

        let mut out = String::with_capacity(raw.len());
        for token in tokenize(raw) {
            match token {
                Token::Literal(s) => out.push_str(s),
                Token::Dollar => out.push('$'),
                Token::Variable(name) => {
                    let value = vars
                        .get(name)
                        .ok_or_else(|| TemplateError::MissingVariable(name.to_string()))?;
                    // 替换后仍需是单行且不含注释符
                    if !is_inline_value(value) {
                        return Err(TemplateError::parse(
                            line,
                            format!("变量 {} 的取值含有 '#' 或换行: {:?}", name, value),
                        ));
                    }
                    out.push_str(value);
                }
                Token::Invalid(pos) => {
                    return Err(TemplateError::parse(
                        line,
                        format!("非法占位符 (列 {}): {}", pos + 1, raw),
                    ));
                }
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> SubstitutionVars {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_resolve_plain_placeholder() {
        let out = DollarSubstitutor
            .resolve("$n0", &vars(&[("n0", "1e18")]), 1)
            .unwrap();
        assert_eq!(out, "1e18");
    }

    #[test]
    fn test_resolve_inside_formula() {
        let out = DollarSubstitutor
            .resolve(
                "1 + $height * exp(-(x/${width})^2)",
                &vars(&[("height", "0.5"), ("width", "0.09")]),
                1,
            )
            .unwrap();
        assert_eq!(out, "1 + 0.5 * exp(-(x/0.09)^2)");
    }

    #[test]
    fn test_escaped_dollar() {
        let out = DollarSubstitutor.resolve("cost $$5", &vars(&[]), 1).unwrap();
        assert_eq!(out, "cost $5");
    }

    #[test]
    fn test_missing_variable_named() {
        let err = DollarSubstitutor
            .resolve("$D_vort", &vars(&[("D_n", "1e-6")]), 3)
            .unwrap_err();
        assert!(matches!(err, TemplateError::MissingVariable(name) if name == "D_vort"));
    }

    #[test]
    fn test_invalid_placeholder() {
        let err = DollarSubstitutor.resolve("5 $ 3", &vars(&[]), 7).unwrap_err();
        assert!(matches!(err, TemplateError::Parse { line: 7, .. }));

        let err = DollarSubstitutor.resolve("${1abc}", &vars(&[]), 2).unwrap_err();
        assert!(matches!(err, TemplateError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_value_with_comment_or_newline_rejected() {
        for bad in ["a#b", "1\n[n]", "x\r"] {
            let err = DollarSubstitutor
                .resolve("$lbl", &vars(&[("lbl", bad)]), 4)
                .unwrap_err();
            assert!(matches!(err, TemplateError::Parse { line: 4, .. }), "{:?}", bad);
        }
    }

    #[test]
    fn test_referenced_names() {
        assert_eq!(
            referenced_names("$a + ${b_2} - $$c + $a"),
            vec!["a".to_string(), "b_2".to_string(), "a".to_string()]
        );
        assert!(referenced_names("no vars here").is_empty());
    }
}
