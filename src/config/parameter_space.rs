// ==========================================
// blob2d 参数模板 - 参数空间
// ==========================================
// 职责: 替换变量的类型、取值范围与默认值
// 存储: JSON 参数文件 (名称 → {type, min, max, default})
// ==========================================

use crate::config::variables::SubstitutionVars;
use crate::domain::types::format_float;
use crate::domain::Value;
use crate::template::error::{TemplateError, TemplateResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

// ==========================================
// ParamType - 参数类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Float,
    Integer,
    String,
}

// ==========================================
// ParamSpec - 单个参数定义
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    #[serde(rename = "type")]
    pub kind: ParamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParamSpec {
    /// 浮点参数（含范围与默认值）
    pub fn float(min: f64, max: f64, default: f64) -> Self {
        Self {
            kind: ParamType::Float,
            min: Some(min),
            max: Some(max),
            default: Some(Value::Float(default)),
        }
    }

    /// 校验文本取值并返回规范文本
    ///
    /// # 规则
    /// - Float: 可解析为有限 f64，输出保持浮点形态 (`5` → `5.0`)
    /// - Integer: 可解析为 i64，输出十进制整数
    /// - String: 不校验，原样输出
    /// - 数值类型需落在 [min, max] 内（闭区间）
    pub fn validate(&self, name: &str, text: &str) -> TemplateResult<String> {
        let trimmed = text.trim();
        let parsed = match self.kind {
            ParamType::String => return Ok(text.to_string()),
            ParamType::Float => trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| (v, format_float(v))),
            ParamType::Integer => trimmed
                .parse::<i64>()
                .ok()
                .map(|v| (v as f64, v.to_string())),
        };

        let (value, canonical) = parsed.ok_or_else(|| TemplateError::InvalidParameter {
            name: name.to_string(),
            message: format!("无法解析为 {:?}: {}", self.kind, text),
        })?;

        let min = self.min.unwrap_or(f64::NEG_INFINITY);
        let max = self.max.unwrap_or(f64::INFINITY);
        if value < min || value > max {
            return Err(TemplateError::OutOfRange {
                name: name.to_string(),
                value,
                min,
                max,
            });
        }

        Ok(canonical)
    }
}

// ==========================================
// ParameterSpace - 参数空间
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSpace {
    params: BTreeMap<String, ParamSpec>,
}

impl ParameterSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// blob2d 模板的内置参数空间
    ///
    /// | 参数 | 含义 | 默认值 | 范围 |
    /// |------|------|--------|------|
    /// | Te0 | 背景温度 (eV) | 5.0 | [2.5, 7.5] |
    /// | n0 | 背景密度 (m^-3) | 2e18 | [1e18, 4e18] |
    /// | D_vort | 粘性 | 1e-6 | [9e-8, 1.1e-5] |
    /// | D_n | 扩散 | 1e-6 | [9e-8, 1.1e-5] |
    /// | height | blob 幅值 | 0.5 | [0.25, 0.75] |
    /// | width | blob 宽度 | 0.09 | [0.03, 0.15] |
    pub fn blob2d() -> Self {
        let mut space = Self::new();
        space.insert("Te0", ParamSpec::float(2.5, 7.5, 5.0));
        space.insert("n0", ParamSpec::float(1.0e18, 4.0e18, 2.0e18));
        space.insert("D_vort", ParamSpec::float(0.9e-7, 1.1e-5, 1.0e-6));
        space.insert("D_n", ParamSpec::float(0.9e-7, 1.1e-5, 1.0e-6));
        space.insert("height", ParamSpec::float(0.25, 0.75, 0.5));
        space.insert("width", ParamSpec::float(0.03, 0.15, 0.09));
        space
    }

    /// 从 JSON 参数文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> TemplateResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| TemplateError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let space: ParameterSpace =
            serde_json::from_str(&raw).map_err(|e| TemplateError::ParamFile {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), params = space.len(), "参数文件已加载");
        Ok(space)
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: ParamSpec) -> Option<ParamSpec> {
        self.params.insert(name.into(), spec)
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// 生成替换变量映射（默认值 + 覆盖值）
    ///
    /// # 逻辑
    /// 1. 覆盖值中出现未定义参数 → UnknownParameter
    /// 2. 每个参数取覆盖值，否则取默认值；两者皆无则不写入（由替换阶段报告缺失）
    /// 3. 校验类型与范围 → InvalidParameter / OutOfRange
    /// 4. 数值按参数类型规范化，浮点参数不会被加载为整数
    pub fn resolve(&self, overrides: &SubstitutionVars) -> TemplateResult<SubstitutionVars> {
        let unknown = overrides.iter().find(|(name, _)| !self.params.contains_key(*name));
        if let Some((name, _)) = unknown {
            return Err(TemplateError::UnknownParameter(name.to_string()));
        }

        let mut vars = SubstitutionVars::new();
        for (name, spec) in &self.params {
            let text = match overrides.get(name) {
                Some(v) => v.to_string(),
                None => match &spec.default {
                    Some(default) => default.to_string(),
                    None => continue,
                },
            };

            vars.insert(name.clone(), spec.validate(name, &text)?);
        }

        Ok(vars)
    }
}
