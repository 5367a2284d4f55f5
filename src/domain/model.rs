use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Classical GoF pattern family. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Behavioral,
    Creational,
    Structural,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Behavioral, Category::Creational, Category::Structural];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Behavioral => "behavioral",
            Category::Creational => "creational",
            Category::Structural => "structural",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "behavioral" | "behavioural" => Ok(Category::Behavioral),
            "creational" => Ok(Category::Creational),
            "structural" => Ok(Category::Structural),
            other => Err(format!(
                "unknown category '{}', expected one of: behavioral, creational, structural",
                other
            )),
        }
    }
}

/// Exit code when the requested id is not registered.
pub const EXIT_NOT_FOUND: i32 = 3;
/// Exit code for registry or configuration failures before anything runs.
pub const EXIT_STARTUP: i32 = 4;
pub const EXIT_CANCELLED: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Passed,
    Failed,
    Errored,
}

impl RunStatus {
    /// Process exit code for a single-example run.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunStatus::Passed => 0,
            RunStatus::Failed => 1,
            RunStatus::Errored => 2,
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunStatus::Passed => "PASSED",
            RunStatus::Failed => "FAILED",
            RunStatus::Errored => "ERRORED",
        };
        f.pad(label)
    }
}

/// First position at which captured output diverges from the fixture.
/// `None` on either side means that side ran out of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub line: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl Mismatch {
    pub fn between(expected: &[String], actual: &[String]) -> Option<Mismatch> {
        let longest = expected.len().max(actual.len());
        (0..longest).find_map(|i| {
            let e = expected.get(i);
            let a = actual.get(i);
            if e == a {
                None
            } else {
                Some(Mismatch {
                    line: i + 1,
                    expected: e.cloned(),
                    actual: a.cloned(),
                })
            }
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub example_id: String,
    pub category: Category,
    pub seed: u64,
    pub status: RunStatus,
    pub captured_output: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<Mismatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

impl RunResult {
    /// Builds the result for an example that finished on its own, grading
    /// the transcript against `expected` when a fixture exists.
    pub fn completed(
        example_id: String,
        category: Category,
        seed: u64,
        captured_output: Vec<String>,
        expected_output: Option<Vec<String>>,
        duration: Duration,
    ) -> Self {
        let mismatch = expected_output
            .as_deref()
            .and_then(|expected| Mismatch::between(expected, &captured_output));
        let status = if mismatch.is_some() {
            RunStatus::Failed
        } else {
            RunStatus::Passed
        };

        Self {
            example_id,
            category,
            seed,
            status,
            captured_output,
            expected_output,
            mismatch,
            error_detail: None,
            duration,
        }
    }

    pub fn errored(
        example_id: String,
        category: Category,
        seed: u64,
        captured_output: Vec<String>,
        error_detail: String,
        duration: Duration,
    ) -> Self {
        Self {
            example_id,
            category,
            seed,
            status: RunStatus::Errored,
            captured_output,
            expected_output: None,
            mismatch: None,
            error_detail: Some(error_detail),
            duration,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == RunStatus::Passed
    }

    /// Passed without a fixture to compare against.
    pub fn is_unverified(&self) -> bool {
        self.is_passed() && self.expected_output.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub unverified: usize,
    #[serde(with = "duration_ms")]
    pub total_duration: Duration,
    pub executed: Vec<String>,
}

impl RunSummary {
    pub fn from_results(results: &[RunResult]) -> Self {
        let mut summary = RunSummary::default();
        for result in results {
            summary.total += 1;
            match result.status {
                RunStatus::Passed => summary.passed += 1,
                RunStatus::Failed => summary.failed += 1,
                RunStatus::Errored => summary.errored += 1,
            }
            if result.is_unverified() {
                summary.unverified += 1;
            }
            summary.total_duration += result.duration;
            summary.executed.push(result.example_id.clone());
        }
        summary
    }

    /// Errored outranks Failed: 2 if anything errored, 1 if anything
    /// failed, 0 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.errored > 0 {
            RunStatus::Errored.exit_code()
        } else if self.failed > 0 {
            RunStatus::Failed.exit_code()
        } else {
            RunStatus::Passed.exit_code()
        }
    }

    /// Exit code for a whole batch; an interrupted batch always reports
    /// [`EXIT_CANCELLED`].
    pub fn batch_exit_code(&self, cancelled: bool) -> i32 {
        if cancelled {
            EXIT_CANCELLED
        } else {
            self.exit_code()
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Behavioral".parse::<Category>().unwrap(), Category::Behavioral);
        assert_eq!("structural".parse::<Category>().unwrap(), Category::Structural);
        assert!("gui".parse::<Category>().is_err());
    }

    #[test]
    fn test_mismatch_detects_changed_line() {
        let expected = lines(&["A", "B", "C"]);
        let actual = lines(&["A", "b", "C"]);
        let mismatch = Mismatch::between(&expected, &actual).unwrap();
        assert_eq!(mismatch.line, 2);
        assert_eq!(mismatch.expected.as_deref(), Some("B"));
        assert_eq!(mismatch.actual.as_deref(), Some("b"));
    }

    #[test]
    fn test_mismatch_detects_length_difference() {
        let expected = lines(&["A"]);
        let actual = lines(&["A", "extra"]);
        let mismatch = Mismatch::between(&expected, &actual).unwrap();
        assert_eq!(mismatch.line, 2);
        assert_eq!(mismatch.expected, None);
        assert_eq!(mismatch.actual.as_deref(), Some("extra"));

        assert!(Mismatch::between(&expected, &expected).is_none());
    }

    #[test]
    fn test_completed_without_fixture_is_unverified_pass() {
        let result = RunResult::completed(
            "a/b".to_string(),
            Category::Creational,
            7,
            lines(&["x"]),
            None,
            Duration::from_millis(3),
        );
        assert_eq!(result.status, RunStatus::Passed);
        assert!(result.is_unverified());
        assert!(result.error_detail.is_none());
    }

    #[test]
    fn test_summary_exit_code_prefers_errored() {
        let ok = RunResult::completed(
            "a/ok".to_string(),
            Category::Behavioral,
            0,
            lines(&["1"]),
            Some(lines(&["1"])),
            Duration::from_millis(10),
        );
        let failed = RunResult::completed(
            "a/failed".to_string(),
            Category::Behavioral,
            0,
            lines(&["1"]),
            Some(lines(&["2"])),
            Duration::from_millis(20),
        );
        let errored = RunResult::errored(
            "a/errored".to_string(),
            Category::Behavioral,
            0,
            vec![],
            "boom".to_string(),
            Duration::from_millis(30),
        );

        let summary = RunSummary::from_results(&[ok.clone(), failed.clone()]);
        assert_eq!(summary.exit_code(), 1);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.unverified, 0);

        let summary = RunSummary::from_results(&[ok, failed, errored]);
        assert_eq!(summary.exit_code(), 2);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.total_duration, Duration::from_millis(60));
        assert_eq!(summary.executed, vec!["a/ok", "a/failed", "a/errored"]);
        assert_eq!(summary.batch_exit_code(false), 2);
        assert_eq!(summary.batch_exit_code(true), EXIT_CANCELLED);
    }

    #[test]
    fn test_batch_exit_code_all_passed() {
        let summary = RunSummary::from_results(&[]);
        assert_eq!(summary.batch_exit_code(false), 0);
        assert_eq!(summary.batch_exit_code(true), 130);
    }
}
