use crate::domain::model::{RunResult, RunStatus, RunSummary};
use crate::domain::ports::Reporter;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Human-readable pass/fail list followed by a summary line.
pub struct TextReporter<W: Write> {
    writer: W,
    show_output: bool,
}

impl<W: Write> TextReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            show_output: false,
        }
    }

    /// Also print the captured transcript of every result.
    pub fn with_output(mut self, show_output: bool) -> Self {
        self.show_output = show_output;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_result(&mut self, result: &RunResult) -> Result<()> {
        if self.show_output {
            for line in &result.captured_output {
                writeln!(self.writer, "{}", line)?;
            }
        }

        let marker = match result.status {
            RunStatus::Passed if result.is_unverified() => "ok (no fixture)",
            RunStatus::Passed => "ok",
            RunStatus::Failed => "FAILED",
            RunStatus::Errored => "ERRORED",
        };
        writeln!(
            self.writer,
            "{:<48} {:<11} {} ({} ms)",
            result.example_id,
            result.category,
            marker,
            result.duration.as_millis()
        )?;

        match result.status {
            RunStatus::Failed => {
                if let Some(mismatch) = &result.mismatch {
                    writeln!(self.writer, "    first difference at line {}", mismatch.line)?;
                    writeln!(
                        self.writer,
                        "    expected: {}",
                        mismatch.expected.as_deref().unwrap_or("<end of output>")
                    )?;
                    writeln!(
                        self.writer,
                        "    actual:   {}",
                        mismatch.actual.as_deref().unwrap_or("<end of output>")
                    )?;
                }
            }
            RunStatus::Errored => {
                if let Some(detail) = &result.error_detail {
                    writeln!(self.writer, "    error: {}", detail)?;
                }
            }
            RunStatus::Passed => {}
        }
        Ok(())
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, results: &[RunResult]) -> Result<()> {
        for result in results {
            self.write_result(result)?;
        }

        let summary = RunSummary::from_results(results);
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} example(s): {} passed ({} without fixture), {} failed, {} errored in {} ms",
            summary.total,
            summary.passed,
            summary.unverified,
            summary.failed,
            summary.errored,
            summary.total_duration.as_millis()
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    summary: RunSummary,
    results: &'a [RunResult],
}

/// Machine-readable report: one JSON document with a summary and every result.
pub struct JsonReporter<W: Write> {
    writer: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, results: &[RunResult]) -> Result<()> {
        let report = JsonReport {
            generated_at: Utc::now(),
            summary: RunSummary::from_results(results),
            results,
        };
        serde_json::to_writer_pretty(&mut self.writer, &report)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Category;
    use std::time::Duration;

    fn sample_results() -> Vec<RunResult> {
        vec![
            RunResult::completed(
                "adapter/structural".to_string(),
                Category::Structural,
                42,
                vec!["Called SpecificRequest()".to_string()],
                None,
                Duration::from_millis(1),
            ),
            RunResult::completed(
                "strategy/structural".to_string(),
                Category::Behavioral,
                42,
                vec!["Called ConcreteStrategyA.AlgorithmInterface()".to_string()],
                Some(vec!["Called ConcreteStrategyB.AlgorithmInterface()".to_string()]),
                Duration::from_millis(2),
            ),
            RunResult::errored(
                "chain-of-responsibility/daycare-staff".to_string(),
                Category::Behavioral,
                42,
                vec![],
                "No boss assigned.".to_string(),
                Duration::from_millis(3),
            ),
        ]
    }

    #[test]
    fn test_text_report_lists_every_result() {
        let mut reporter = TextReporter::new(Vec::new());
        reporter.report(&sample_results()).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(text.contains("adapter/structural"));
        assert!(text.contains("ok (no fixture)"));
        assert!(text.contains("FAILED"));
        assert!(text.contains("first difference at line 1"));
        assert!(text.contains("expected: Called ConcreteStrategyB.AlgorithmInterface()"));
        assert!(text.contains("error: No boss assigned."));
        assert!(text.contains("3 example(s): 1 passed (1 without fixture), 1 failed, 1 errored"));
    }

    #[test]
    fn test_text_report_can_include_transcripts() {
        let mut reporter = TextReporter::new(Vec::new()).with_output(true);
        reporter.report(&sample_results()[..1]).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.starts_with("Called SpecificRequest()\n"));
    }

    #[test]
    fn test_json_report_structure() {
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.report(&sample_results()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&reporter.into_inner()).unwrap();

        assert_eq!(value["summary"]["total"], 3);
        assert_eq!(value["summary"]["errored"], 1);
        assert_eq!(value["results"][1]["status"], "failed");
        assert_eq!(value["results"][1]["mismatch"]["line"], 1);
        assert_eq!(value["results"][2]["error_detail"], "No boss assigned.");
        assert!(value["results"][0].get("error_detail").is_none());
        assert!(value["generated_at"].is_string());
    }
}
