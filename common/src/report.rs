//! Final delta report assembly and emission.

use serde::Serialize;

use crate::cmp::CompareOutcome;
use crate::diff::FileSetDiff;

/// The three-way classification of compared paths, plus the paths that
/// could not be compared at all.
///
/// Field names and their order are the stable output format: `additions`
/// exist only on the first host, `omissions` only on the second,
/// `differences` on both with unequal content, `errors` could not be
/// hashed on at least one host.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeltaReport {
    pub additions: Vec<String>,
    pub omissions: Vec<String>,
    pub differences: Vec<String>,
    pub errors: Vec<String>,
}

impl DeltaReport {
    /// Compose the final report from the differencing and comparison phases.
    pub fn new(diff: FileSetDiff, outcome: CompareOutcome) -> Self {
        Self {
            additions: diff.additions,
            omissions: diff.omissions,
            differences: outcome.differences,
            errors: outcome.errors,
        }
    }

    /// True when the two hosts are indistinguishable under the configured
    /// roots and every common path was compared successfully.
    pub fn is_clean(&self) -> bool {
        self.additions.is_empty()
            && self.omissions.is_empty()
            && self.differences.is_empty()
            && self.errors.is_empty()
    }

    /// Write the report as pretty-printed JSON followed by a newline.
    pub fn write_pretty<W: std::io::Write>(&self, mut writer: W) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}

impl std::fmt::Display for DeltaReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "additions: {}", self.additions.len())?;
        writeln!(f, "omissions: {}", self.omissions.len())?;
        writeln!(f, "differences: {}", self.differences.len())?;
        write!(f, "errors: {}", self.errors.len())
    }
}
