// ==========================================
// blob2d 参数模板 - 模板 API
// ==========================================
// 职责: 组合参数空间、加载器与编码器，提供命令行各子命令的用例
// ==========================================

use crate::config::{ParameterSpace, SubstitutionVars};
use crate::domain::{ResolvedConfig, Value};
use crate::template::error::{TemplateError, TemplateResult};
use crate::template::{parse_override, IniTemplateParser, TemplateEncoder, TemplateLoader};
use std::path::{Path, PathBuf};
use tracing::instrument;

// ==========================================
// TemplateApi - 模板 API
// ==========================================

/// 模板 API
///
/// 职责：
/// 1. 参数空间 + 命令行赋值 → 替换变量映射
/// 2. 加载模板并应用覆盖项
/// 3. 渲染模板写入运行目录
/// 4. 列出模板引用的变量
pub struct TemplateApi {
    space: ParameterSpace,
    loader: TemplateLoader,
}

impl Default for TemplateApi {
    fn default() -> Self {
        Self::new(ParameterSpace::blob2d())
    }
}

impl TemplateApi {
    pub fn new(space: ParameterSpace) -> Self {
        Self {
            space,
            loader: TemplateLoader::default(),
        }
    }

    /// 以 JSON 参数文件创建
    pub fn with_param_file<P: AsRef<Path>>(path: P) -> TemplateResult<Self> {
        Ok(Self::new(ParameterSpace::from_json_file(path)?))
    }

    pub fn space(&self) -> &ParameterSpace {
        &self.space
    }

    /// 构造替换变量映射
    ///
    /// # 参数
    /// - assignments: `NAME=VALUE` 形式的赋值列表
    ///
    /// # 返回
    /// - Ok(SubstitutionVars): 默认值与赋值合并、规范化后的映射
    /// - Err: InvalidParameter（赋值格式错误）/ UnknownParameter / OutOfRange
    pub fn build_vars(&self, assignments: &[String]) -> TemplateResult<SubstitutionVars> {
        let mut overrides = SubstitutionVars::new();
        for assignment in assignments {
            let (name, value) = SubstitutionVars::parse_assignment(assignment).ok_or_else(|| {
                TemplateError::InvalidParameter {
                    name: assignment.clone(),
                    message: "期望 NAME=VALUE".to_string(),
                }
            })?;
            overrides.insert(name, value);
        }

        self.space.resolve(&overrides)
    }

    /// 加载模板文件并依次应用覆盖项（`section:sub.key=value`）
    #[instrument(skip(self, template, vars, overrides), fields(override_count = overrides.len()))]
    pub fn resolve(
        &self,
        template: &Path,
        vars: &SubstitutionVars,
        overrides: &[String],
    ) -> TemplateResult<ResolvedConfig> {
        let mut config = self.loader.load_file(template, vars)?;

        let overrides = overrides
            .iter()
            .map(|o| parse_override(o))
            .collect::<TemplateResult<Vec<_>>>()?;
        config.apply_overrides(overrides);

        Ok(config)
    }

    /// 按键路径取值（含 `all` 回退）
    pub fn lookup(config: &ResolvedConfig, path: &str) -> TemplateResult<Value> {
        config
            .get_str(path)?
            .cloned()
            .ok_or_else(|| TemplateError::UndefinedKey(path.to_string()))
    }

    /// 已解析配置的 JSON 文本（完整键路径 → 取值，仅显式条目）
    pub fn to_json(config: &ResolvedConfig) -> TemplateResult<String> {
        Ok(serde_json::to_string_pretty(&config.to_flat_map())?)
    }

    /// 渲染模板并写入运行目录
    ///
    /// # 返回
    /// - Ok(PathBuf): 写入的输入文件路径
    pub fn render(
        &self,
        template: &Path,
        vars: &SubstitutionVars,
        run_dir: &Path,
        target_filename: &str,
    ) -> TemplateResult<PathBuf> {
        TemplateEncoder::new(target_filename).encode_to_dir(template, run_dir, vars)
    }

    /// 模板引用的替换变量（按首次出现顺序）
    pub fn list_variables(&self, template: &Path) -> TemplateResult<Vec<String>> {
        Ok(IniTemplateParser.parse_file(template)?.referenced_variables())
    }
}
