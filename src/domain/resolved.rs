// ==========================================
// blob2d 参数模板 - 已解析配置
// ==========================================
// 职责: 类型化键值映射 + `all` 分节默认继承
// 红线: 默认值在查询时惰性回退，不做预拷贝
// ==========================================

use crate::domain::section::{Entry, KeyPath, Section, SectionName};
use crate::domain::types::Value;
use crate::template::error::TemplateResult;
use std::collections::BTreeMap;

// ==========================================
// ResolvedConfig - 已解析配置
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    sections: Vec<Section>,
}

impl ResolvedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按顺序构造（由加载器调用）
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &SectionName) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == name)
    }

    fn section_mut(&mut self, name: &SectionName) -> &mut Section {
        match self.sections.iter().position(|s| s.name() == name) {
            Some(idx) => &mut self.sections[idx],
            None => {
                self.sections.push(Section::new(name.clone()));
                let last = self.sections.len() - 1;
                &mut self.sections[last]
            }
        }
    }

    /// 仅查询分节自身定义的值（不回退）
    pub fn get_explicit(&self, path: &KeyPath) -> Option<&Value> {
        self.section(&path.section)
            .and_then(|s| s.get(&path.key))
            .map(|e| &e.value)
    }

    /// 查询值，分节未定义时回退到 `all`
    ///
    /// # 逻辑
    /// 1. 查询分节自身
    /// 2. 若未定义且分节非根/非 `all`：查询 `all` 分节同名键
    pub fn get(&self, path: &KeyPath) -> Option<&Value> {
        if let Some(value) = self.get_explicit(path) {
            return Some(value);
        }

        let fallback = path.section.fallback()?;
        self.section(&fallback)
            .and_then(|s| s.get(&path.key))
            .map(|e| &e.value)
    }

    /// 按文本路径查询（`section:subsection.key`）
    pub fn get_str(&self, path: &str) -> TemplateResult<Option<&Value>> {
        let path: KeyPath = path.parse()?;
        Ok(self.get(&path))
    }

    pub fn get_i64(&self, path: &str) -> TemplateResult<Option<i64>> {
        Ok(self.get_str(path)?.and_then(Value::as_i64))
    }

    pub fn get_f64(&self, path: &str) -> TemplateResult<Option<f64>> {
        Ok(self.get_str(path)?.and_then(Value::as_f64))
    }

    pub fn get_bool(&self, path: &str) -> TemplateResult<Option<bool>> {
        Ok(self.get_str(path)?.and_then(Value::as_bool))
    }

    pub fn get_string(&self, path: &str) -> TemplateResult<Option<String>> {
        Ok(self.get_str(path)?.map(|v| v.to_string()))
    }

    /// 写入或覆盖一个值
    ///
    /// 覆盖 `all` 中的键后，其他分节的回退查询立即看到新值
    pub fn set(&mut self, path: &KeyPath, value: Value) -> Option<Value> {
        self.section_mut(&path.section).upsert(Entry {
            key: path.key.clone(),
            value,
            comment: None,
            line: None,
        })
    }

    /// 批量应用命令行覆盖项
    pub fn apply_overrides<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (KeyPath, Value)>,
    {
        for (path, value) in overrides {
            tracing::debug!(path = %path, value = %value, "应用覆盖项");
            self.set(&path, value);
        }
    }

    /// 分节的合并视图（自身条目 + `all` 中未被覆盖的条目）
    ///
    /// 每次调用即时计算，不回写
    pub fn effective_section(&self, name: &SectionName) -> BTreeMap<String, Value> {
        let mut merged = BTreeMap::new();

        if let Some(fallback) = name.fallback().and_then(|f| self.section(&f)) {
            for entry in fallback.entries() {
                merged.insert(entry.key.clone(), entry.value.clone());
            }
        }

        if let Some(section) = self.section(name) {
            for entry in section.entries() {
                merged.insert(entry.key.clone(), entry.value.clone());
            }
        }

        merged
    }

    /// 显式条目的扁平映射（完整键路径 → 值），不含继承值
    pub fn to_flat_map(&self) -> BTreeMap<String, Value> {
        self.sections
            .iter()
            .flat_map(|s| {
                s.entries().iter().map(move |e| {
                    (
                        KeyPath::new(s.name().clone(), e.key.clone()).to_string(),
                        e.value.clone(),
                    )
                })
            })
            .collect()
    }

    /// 显式条目总数
    pub fn len(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> KeyPath {
        s.parse().unwrap()
    }

    fn sample() -> ResolvedConfig {
        let mut config = ResolvedConfig::new();
        config.set(&path("all.scale"), Value::Float(0.0));
        config.set(&path("all.bndry_all"), Value::from("neumann"));
        config.set(&path("n.scale"), Value::Float(1.0));
        config
    }

    #[test]
    fn test_section_value_takes_precedence() {
        let config = sample();
        assert_eq!(config.get(&path("n.scale")), Some(&Value::Float(1.0)));
    }

    #[test]
    fn test_unset_key_falls_back_to_all() {
        let config = sample();
        assert_eq!(
            config.get(&path("n.bndry_all")),
            Some(&Value::from("neumann"))
        );
        assert_eq!(config.get_explicit(&path("n.bndry_all")), None);
    }

    #[test]
    fn test_root_does_not_fall_back() {
        let config = sample();
        assert_eq!(config.get(&path("scale")), None);
    }

    #[test]
    fn test_later_all_override_is_seen_lazily() {
        let mut config = sample();
        config.set(&path("all.bndry_all"), Value::from("dirichlet"));

        assert_eq!(
            config.get(&path("n.bndry_all")),
            Some(&Value::from("dirichlet"))
        );
        // 分节自身未被写入
        let own = config.section(&SectionName::parse("n").unwrap()).unwrap();
        assert!(!own.contains_key("bndry_all"));
    }

    #[test]
    fn test_effective_section_merges() {
        let config = sample();
        let merged = config.effective_section(&SectionName::parse("n").unwrap());
        assert_eq!(merged.get("scale"), Some(&Value::Float(1.0)));
        assert_eq!(merged.get("bndry_all"), Some(&Value::from("neumann")));
    }

    #[test]
    fn test_flat_map_excludes_inherited() {
        let config = sample();
        let flat = config.to_flat_map();
        assert_eq!(flat.len(), 3);
        assert!(flat.contains_key("n.scale"));
        assert!(!flat.contains_key("n.bndry_all"));
    }
}
