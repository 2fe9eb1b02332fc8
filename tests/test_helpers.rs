// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的模板夹具、变量映射、临时目录等功能
// ==========================================

#![allow(dead_code)]

use blob2d_template::config::{ParameterSpace, SubstitutionVars};
use blob2d_template::domain::ResolvedConfig;
use blob2d_template::template::TemplateLoader;
use std::error::Error;
use std::path::PathBuf;
use tempfile::TempDir;

/// blob2d 模板夹具路径
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// 读取 blob2d 模板夹具全文
pub fn b2d_template_text() -> String {
    std::fs::read_to_string(fixture_path("b2d.template")).expect("Failed to read b2d.template")
}

/// 模板引用的全部变量（内置默认值）
pub fn default_vars() -> SubstitutionVars {
    ParameterSpace::blob2d()
        .resolve(&SubstitutionVars::new())
        .expect("Failed to resolve default parameter space")
}

/// 由键值对构造变量映射
pub fn vars_of(pairs: &[(&str, &str)]) -> SubstitutionVars {
    pairs.iter().copied().collect()
}

/// 以默认变量加载 blob2d 模板
pub fn load_b2d() -> Result<ResolvedConfig, Box<dyn Error>> {
    let config = TemplateLoader::default().load(&b2d_template_text(), &default_vars())?;
    Ok(config)
}

/// 创建临时运行目录
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
pub fn create_run_root() -> Result<TempDir, Box<dyn Error>> {
    Ok(tempfile::tempdir()?)
}
