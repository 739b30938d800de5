//! JSON run report

use anyhow::{Context, Result};
use reg_log_decoder::{ModelStats, RegisterDefinition, RewriteStats};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Everything known about one run, written with `--report`
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// RFC 3339 timestamp of report creation
    pub generated_at: String,
    pub tool_version: &'static str,
    pub logfile: &'a Path,
    pub header: &'a Path,
    pub outfile: &'a Path,
    pub model_stats: ModelStats,
    pub rewrite_stats: RewriteStats,
    pub registers: &'a [RegisterDefinition],
}

impl<'a> RunReport<'a> {
    pub fn new(
        logfile: &'a Path,
        header: &'a Path,
        outfile: &'a Path,
        registers: &'a [RegisterDefinition],
        model_stats: ModelStats,
        rewrite_stats: RewriteStats,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION"),
            logfile,
            header,
            outfile,
            model_stats,
            rewrite_stats,
            registers,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize run report")?;
        fs::write(path, json).with_context(|| format!("Failed to write report: {:?}", path))?;
        log::info!("Run report written to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reg_log_decoder::{BitDefinition, LineOutcome};

    #[test]
    fn test_report_contents() {
        let mut register = RegisterDefinition::new("STATUS", 0x100d);
        register.bits.push(BitDefinition::new("DCP_BIT", 3));
        let registers = vec![register];

        let mut rewrite_stats = RewriteStats::default();
        rewrite_stats.record(&LineOutcome::UnknownAddress(0x10));

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let report = RunReport::new(
            Path::new("dmesg.txt"),
            Path::new("regs.h"),
            Path::new("out.txt"),
            &registers,
            ModelStats {
                num_registers: 1,
                num_bits: 1,
                num_masks: 0,
            },
            rewrite_stats,
        );
        report.write(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["header"], "regs.h");
        assert_eq!(json["model_stats"]["num_registers"], 1);
        assert_eq!(json["rewrite_stats"]["unknown_addresses"], 1);
        assert_eq!(json["registers"][0]["name"], "STATUS");
        assert_eq!(json["registers"][0]["value"], 0x100d);
        assert_eq!(json["registers"][0]["bits"][0]["bit"], 3);
        assert!(json["generated_at"].as_str().is_some());
    }
}
