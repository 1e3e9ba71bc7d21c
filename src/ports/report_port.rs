//! Report generation port trait.

use crate::domain::error::DipscanError;
use crate::domain::scan::{ScanConfig, ScanOutcome};

/// Port for rendering a scan outcome into a human-readable report.
pub trait ReportPort {
    fn write(
        &self,
        symbol: &str,
        outcome: &ScanOutcome,
        config: &ScanConfig,
        output_path: &str,
    ) -> Result<(), DipscanError>;
}
