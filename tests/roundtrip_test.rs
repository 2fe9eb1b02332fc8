// ==========================================
// 序列化往返集成测试
// ==========================================
// 测试目标: 解析 → 序列化 → 再解析后，每个键的取值与类型不变
// ==========================================

mod test_helpers;

use blob2d_template::template::{to_template_string, TemplateError, TemplateLoader};
use blob2d_template::{SubstitutionVars, Value};
use test_helpers::{load_b2d, vars_of};

#[test]
fn test_b2d_round_trip_preserves_values() {
    let config = load_b2d().expect("Failed to load b2d template");

    let text = to_template_string(&config);
    let reparsed = TemplateLoader::default()
        .load(&text, &SubstitutionVars::new())
        .expect("Serialized template should reload without variables");

    assert_eq!(config.to_flat_map(), reparsed.to_flat_map());
}

#[test]
fn test_round_trip_is_idempotent() {
    let config = load_b2d().expect("Failed to load b2d template");

    let first = to_template_string(&config);
    let reparsed = TemplateLoader::default()
        .load(&first, &SubstitutionVars::new())
        .unwrap();
    let second = to_template_string(&reparsed);

    assert_eq!(first, second);
}

#[test]
fn test_round_trip_keeps_float_type_for_integral_values() {
    let config = TemplateLoader::default()
        .load(
            "[model]\nn0 = $n0\nTe0 = 5.0\nR_c = 1.5\n",
            &vars_of(&[("n0", "2e18")]),
        )
        .unwrap();

    let text = to_template_string(&config);
    let reparsed = TemplateLoader::default()
        .load(&text, &SubstitutionVars::new())
        .unwrap();

    assert_eq!(config.to_flat_map(), reparsed.to_flat_map());
    assert!(text.contains("n0 = 2e18"));
    assert!(text.contains("Te0 = 5.0"));
}

#[test]
fn test_round_trip_keeps_comments() {
    let config = load_b2d().expect("Failed to load b2d template");
    let text = to_template_string(&config);

    assert!(text.contains("atol = 1e-10  # absolute tolerance"));
    assert!(text.contains("[phiSolver:precon]"));
}

#[test]
fn test_round_trip_keeps_out_of_range_float_literal() {
    let config = TemplateLoader::default()
        .load("[solver]\nx = 1e400\n", &SubstitutionVars::new())
        .unwrap();
    assert_eq!(config.get_str("solver.x").unwrap(), Some(&Value::from("1e400")));

    let text = to_template_string(&config);
    let reparsed = TemplateLoader::default()
        .load(&text, &SubstitutionVars::new())
        .unwrap();

    assert_eq!(config.to_flat_map(), reparsed.to_flat_map());
    assert_eq!(
        serde_json::to_string(&reparsed.to_flat_map()).unwrap(),
        r#"{"solver.x":"1e400"}"#
    );
}

#[test]
fn test_value_with_comment_char_is_rejected_at_load() {
    let err = TemplateLoader::default()
        .load("[model]\n\nlabel = $lbl\n", &vars_of(&[("lbl", "a#b")]))
        .unwrap_err();

    assert!(matches!(err, TemplateError::Parse { line: 3, .. }));
}
