use crate::domain::model::{RunResult, RunStatus};
use crate::utils::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Expected output per example id, stored as TOML:
///
/// ```toml
/// [fixtures]
/// "strategy/structural" = [
///     "Called ConcreteStrategyA.AlgorithmInterface()",
/// ]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureSet {
    #[serde(default)]
    fixtures: BTreeMap<String, Vec<String>>,
}

impl FixtureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 載入 fixture 檔案
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let origin = path.as_ref().display().to_string();
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        let set = Self::from_toml_str(&content, &origin)?;
        tracing::debug!("Loaded {} fixture(s) from {}", set.len(), origin);
        Ok(set)
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CatalogError::FixtureParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Captured output of every non-errored result. Errored runs have no
    /// trustworthy transcript to freeze.
    pub fn from_results(results: &[RunResult]) -> Self {
        let mut set = Self::new();
        for result in results.iter().filter(|r| r.status != RunStatus::Errored) {
            set.insert(result.example_id.clone(), result.captured_output.clone());
        }
        set
    }

    pub fn insert(&mut self, id: impl Into<String>, lines: Vec<String>) {
        self.fixtures.insert(id.into(), lines);
    }

    pub fn expected(&self, id: &str) -> Option<&[String]> {
        self.fixtures.get(id).map(Vec::as_slice)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.fixtures.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CatalogError::ConfigError {
            message: format!("Could not serialize fixtures: {}", e),
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_string()?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&path, content)?;
        tracing::info!("Wrote {} fixture(s) to {}", self.len(), path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Category;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_parse_fixture_toml() {
        let content = r#"
[fixtures]
"adapter/structural" = ["Called SpecificRequest()"]
"composite/drawing" = [
    "-+ Picture",
    "--- Red Line",
    "",
]
"#;
        let set = FixtureSet::from_toml_str(content, "inline").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.expected("adapter/structural").unwrap(),
            &["Called SpecificRequest()".to_string()]
        );
        assert_eq!(set.expected("composite/drawing").unwrap().len(), 3);
        assert!(set.expected("bridge/customers").is_none());
    }

    #[test]
    fn test_invalid_toml_reports_origin() {
        let err = FixtureSet::from_toml_str("[fixtures\n", "broken.toml").unwrap_err();
        match err {
            CatalogError::FixtureParseError { path, .. } => assert_eq!(path, "broken.toml"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("expected.toml");

        let mut set = FixtureSet::new();
        set.insert("strategy/structural", vec!["line \"quoted\"".to_string(), String::new()]);
        set.save(&path).unwrap();

        let reloaded = FixtureSet::from_file(&path).unwrap();
        assert_eq!(reloaded, set);
    }

    #[test]
    fn test_from_results_skips_errored() {
        let ok = RunResult::completed(
            "a/ok".to_string(),
            Category::Behavioral,
            1,
            vec!["A".to_string()],
            None,
            Duration::ZERO,
        );
        let broken = RunResult::errored(
            "a/broken".to_string(),
            Category::Behavioral,
            1,
            vec!["partial".to_string()],
            "boom".to_string(),
            Duration::ZERO,
        );

        let set = FixtureSet::from_results(&[ok, broken]);
        assert_eq!(set.ids().collect::<Vec<_>>(), vec!["a/ok"]);
    }
}
