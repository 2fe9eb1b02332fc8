// ==========================================
// blob2d 参数模板 - 序列化器
// ==========================================
// 职责: 已解析配置 → 模板文本 (BOUT.inp 格式)
// 约束: 序列化结果重新解析后，每个键的取值与类型不变
// ==========================================

use crate::domain::{ResolvedConfig, Section, Value};
use std::fmt::Write;

/// 值的模板文本形式，字符串中的 `$` 转义为 `$$`
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.replace('$', "$$"),
        other => other.to_string(),
    }
}

fn write_section(out: &mut String, section: &Section) {
    if !section.name().is_root() {
        let _ = writeln!(out, "[{}]", section.name());
    }

    for entry in section.entries() {
        let value = render_value(&entry.value);
        match &entry.comment {
            Some(comment) => {
                let _ = writeln!(out, "{} = {}  # {}", entry.key, value, comment);
            }
            None => {
                let _ = writeln!(out, "{} = {}", entry.key, value);
            }
        }
    }
}

/// 将已解析配置序列化为模板文本
///
/// 根分节（若有）始终写在最前，分节之间以空行分隔
pub fn to_template_string(config: &ResolvedConfig) -> String {
    let mut out = String::new();

    let (root, named): (Vec<&Section>, Vec<&Section>) =
        config.sections().iter().partition(|s| s.name().is_root());

    for section in root.into_iter().chain(named) {
        if !out.is_empty() {
            out.push('\n');
        }
        write_section(&mut out, section);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SubstitutionVars;
    use crate::template::loader::TemplateLoader;

    #[test]
    fn test_serialize_layout() {
        let config = TemplateLoader::default()
            .load(
                "nout = 50  # number of time-steps\n[solver]\natol = 1e-10\n",
                &SubstitutionVars::new(),
            )
            .unwrap();

        assert_eq!(
            to_template_string(&config),
            "nout = 50  # number of time-steps\n\n[solver]\natol = 1e-10\n"
        );
    }

    #[test]
    fn test_dollar_in_string_is_escaped() {
        let vars: SubstitutionVars = [("unit", "$/eV")].into_iter().collect();
        let config = TemplateLoader::default()
            .load("[model]\nlabel = $unit\n", &vars)
            .unwrap();

        let text = to_template_string(&config);
        assert_eq!(text, "[model]\nlabel = $$/eV\n");

        let reparsed = TemplateLoader::default()
            .load(&text, &SubstitutionVars::new())
            .unwrap();
        assert_eq!(
            reparsed.get_string("model.label").unwrap().as_deref(),
            Some("$/eV")
        );
    }

    #[test]
    fn test_root_written_first_after_set() {
        let mut config = TemplateLoader::default()
            .load("[mesh]\nnx = 260\n", &SubstitutionVars::new())
            .unwrap();
        config.set(&"nout".parse().unwrap(), 3i64.into());

        let text = to_template_string(&config);
        assert!(text.starts_with("nout = 3\n"));
    }
}
