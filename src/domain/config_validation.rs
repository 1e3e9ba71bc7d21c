//! Configuration validation and assembly.
//!
//! All thresholds are range-checked before a scan runs; a bad value is a
//! fatal configuration error, never silently defaulted. Missing keys fall
//! back to the documented defaults.

use crate::domain::error::DipscanError;
use crate::domain::scan::ScanConfig;
use crate::ports::config_port::ConfigPort;

/// Build a [`ScanConfig`] from a config source, applying defaults for
/// missing keys.
pub fn build_scan_config(config: &dyn ConfigPort) -> ScanConfig {
    let defaults = ScanConfig::default();
    ScanConfig {
        spy_core_value: config.get_double("capital", "spy_core_value", defaults.spy_core_value),
        add_capital: config.get_double("capital", "add_capital", defaults.add_capital),
        tier1_alloc: config.get_double("tiers", "tier1_alloc", defaults.tier1_alloc),
        tier2_alloc: config.get_double("tiers", "tier2_alloc", defaults.tier2_alloc),
        tier3_alloc: config.get_double("tiers", "tier3_alloc", defaults.tier3_alloc),
        pullback_within_pct: config.get_double(
            "thresholds",
            "pullback_within_pct",
            defaults.pullback_within_pct,
        ),
        stabilize_days: config.get_int("thresholds", "stabilize_days", defaults.stabilize_days as i64)
            as usize,
        stabilize_range_pct: config.get_double(
            "thresholds",
            "stabilize_range_pct",
            defaults.stabilize_range_pct,
        ),
        sma200_slope_lookback: config.get_int(
            "thresholds",
            "sma200_slope_lookback",
            defaults.sma200_slope_lookback as i64,
        ) as usize,
    }
}

pub fn validate_scan_config(config: &dyn ConfigPort) -> Result<(), DipscanError> {
    validate_numeric_keys(config)?;
    validate_add_capital(config)?;
    validate_alloc(config, "tier1_alloc")?;
    validate_alloc(config, "tier2_alloc")?;
    validate_alloc(config, "tier3_alloc")?;
    validate_pullback(config)?;
    validate_stabilize_days(config)?;
    validate_stabilize_range(config)?;
    validate_slope_lookback(config)?;
    Ok(())
}

/// A key that is present but does not parse is a fatal error; the accessors
/// would otherwise hand back the default and hide the typo.
fn check_parses(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    integer: bool,
) -> Result<(), DipscanError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(());
    };
    let parses = if integer {
        raw.trim().parse::<i64>().is_ok()
    } else {
        raw.trim().parse::<f64>().is_ok()
    };
    if !parses {
        let expected = if integer { "an integer" } else { "a number" };
        return Err(invalid(
            key,
            section,
            &format!("expected {}, got {:?}", expected, raw),
        ));
    }
    Ok(())
}

fn validate_numeric_keys(config: &dyn ConfigPort) -> Result<(), DipscanError> {
    check_parses(config, "capital", "spy_core_value", false)?;
    check_parses(config, "capital", "add_capital", false)?;
    check_parses(config, "tiers", "tier1_alloc", false)?;
    check_parses(config, "tiers", "tier2_alloc", false)?;
    check_parses(config, "tiers", "tier3_alloc", false)?;
    check_parses(config, "thresholds", "pullback_within_pct", false)?;
    check_parses(config, "thresholds", "stabilize_days", true)?;
    check_parses(config, "thresholds", "stabilize_range_pct", false)?;
    check_parses(config, "thresholds", "sma200_slope_lookback", true)?;
    Ok(())
}

fn invalid(key: &str, section: &str, reason: &str) -> DipscanError {
    DipscanError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_add_capital(config: &dyn ConfigPort) -> Result<(), DipscanError> {
    let value = config.get_double("capital", "add_capital", ScanConfig::default().add_capital);
    if value <= 0.0 {
        return Err(invalid("add_capital", "capital", "add_capital must be positive"));
    }
    Ok(())
}

fn validate_alloc(config: &dyn ConfigPort, key: &str) -> Result<(), DipscanError> {
    let defaults = ScanConfig::default();
    let default = match key {
        "tier1_alloc" => defaults.tier1_alloc,
        "tier2_alloc" => defaults.tier2_alloc,
        _ => defaults.tier3_alloc,
    };
    let value = config.get_double("tiers", key, default);
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(key, "tiers", "allocation fraction must be between 0 and 1"));
    }
    Ok(())
}

fn validate_pullback(config: &dyn ConfigPort) -> Result<(), DipscanError> {
    let value = config.get_double(
        "thresholds",
        "pullback_within_pct",
        ScanConfig::default().pullback_within_pct,
    );
    if value < 0.0 {
        return Err(invalid(
            "pullback_within_pct",
            "thresholds",
            "pullback_within_pct must be non-negative",
        ));
    }
    Ok(())
}

fn validate_stabilize_days(config: &dyn ConfigPort) -> Result<(), DipscanError> {
    let value = config.get_int(
        "thresholds",
        "stabilize_days",
        ScanConfig::default().stabilize_days as i64,
    );
    if value < 1 {
        return Err(invalid(
            "stabilize_days",
            "thresholds",
            "stabilize_days must be at least 1",
        ));
    }
    Ok(())
}

fn validate_stabilize_range(config: &dyn ConfigPort) -> Result<(), DipscanError> {
    let value = config.get_double(
        "thresholds",
        "stabilize_range_pct",
        ScanConfig::default().stabilize_range_pct,
    );
    if value < 0.0 {
        return Err(invalid(
            "stabilize_range_pct",
            "thresholds",
            "stabilize_range_pct must be non-negative",
        ));
    }
    Ok(())
}

fn validate_slope_lookback(config: &dyn ConfigPort) -> Result<(), DipscanError> {
    let value = config.get_int(
        "thresholds",
        "sma200_slope_lookback",
        ScanConfig::default().sma200_slope_lookback as i64,
    );
    if value < 1 {
        return Err(invalid(
            "sma200_slope_lookback",
            "thresholds",
            "sma200_slope_lookback must be at least 1",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn empty_config_uses_defaults_and_passes() {
        let config = make_config("");
        assert!(validate_scan_config(&config).is_ok());
        assert_eq!(build_scan_config(&config), ScanConfig::default());
    }

    #[test]
    fn full_config_overrides_defaults() {
        let config = make_config(
            r#"
[capital]
spy_core_value = 200000
add_capital = 50000

[tiers]
tier1_alloc = 0.15
tier2_alloc = 0.30
tier3_alloc = 0.55

[thresholds]
pullback_within_pct = 0.01
stabilize_days = 5
stabilize_range_pct = 0.03
sma200_slope_lookback = 10
"#,
        );
        assert!(validate_scan_config(&config).is_ok());
        let scan = build_scan_config(&config);
        assert_eq!(scan.add_capital, 50_000.0);
        assert_eq!(scan.tier1_alloc, 0.15);
        assert_eq!(scan.tier2_alloc, 0.30);
        assert_eq!(scan.tier3_alloc, 0.55);
        assert_eq!(scan.pullback_within_pct, 0.01);
        assert_eq!(scan.stabilize_days, 5);
        assert_eq!(scan.stabilize_range_pct, 0.03);
        assert_eq!(scan.sma200_slope_lookback, 10);
    }

    #[test]
    fn non_numeric_value_is_fatal() {
        // The file adapter alone would fall back to the default here; the
        // validation layer must reject the key instead of scanning on a
        // silently substituted value.
        let config = make_config("[capital]\nadd_capital = abc\n");
        let err = validate_scan_config(&config).unwrap_err();
        assert!(matches!(
            err,
            DipscanError::ConfigInvalid { section, key, .. }
                if section == "capital" && key == "add_capital"
        ));
    }

    #[test]
    fn fractional_integer_key_is_fatal() {
        let config = make_config("[thresholds]\nstabilize_days = 2.5\n");
        let err = validate_scan_config(&config).unwrap_err();
        assert!(matches!(err, DipscanError::ConfigInvalid { key, .. } if key == "stabilize_days"));
    }

    #[test]
    fn non_numeric_threshold_is_fatal() {
        let config = make_config("[thresholds]\npullback_within_pct = lots\n");
        assert!(validate_scan_config(&config).is_err());
    }

    #[test]
    fn add_capital_must_be_positive() {
        let config = make_config("[capital]\nadd_capital = -100\n");
        let err = validate_scan_config(&config).unwrap_err();
        assert!(matches!(err, DipscanError::ConfigInvalid { key, .. } if key == "add_capital"));
    }

    #[test]
    fn add_capital_zero_fails() {
        let config = make_config("[capital]\nadd_capital = 0\n");
        assert!(validate_scan_config(&config).is_err());
    }

    #[test]
    fn alloc_above_one_fails() {
        let config = make_config("[tiers]\ntier2_alloc = 1.5\n");
        let err = validate_scan_config(&config).unwrap_err();
        assert!(matches!(err, DipscanError::ConfigInvalid { key, .. } if key == "tier2_alloc"));
    }

    #[test]
    fn alloc_negative_fails() {
        let config = make_config("[tiers]\ntier3_alloc = -0.1\n");
        let err = validate_scan_config(&config).unwrap_err();
        assert!(matches!(err, DipscanError::ConfigInvalid { key, .. } if key == "tier3_alloc"));
    }

    #[test]
    fn alloc_boundaries_accepted() {
        let config = make_config("[tiers]\ntier1_alloc = 0.0\ntier2_alloc = 1.0\n");
        assert!(validate_scan_config(&config).is_ok());
    }

    #[test]
    fn negative_pullback_fails() {
        let config = make_config("[thresholds]\npullback_within_pct = -0.002\n");
        let err = validate_scan_config(&config).unwrap_err();
        assert!(
            matches!(err, DipscanError::ConfigInvalid { key, .. } if key == "pullback_within_pct")
        );
    }

    #[test]
    fn stabilize_days_zero_fails() {
        let config = make_config("[thresholds]\nstabilize_days = 0\n");
        let err = validate_scan_config(&config).unwrap_err();
        assert!(matches!(err, DipscanError::ConfigInvalid { key, .. } if key == "stabilize_days"));
    }

    #[test]
    fn negative_stabilize_range_fails() {
        let config = make_config("[thresholds]\nstabilize_range_pct = -1\n");
        assert!(validate_scan_config(&config).is_err());
    }

    #[test]
    fn slope_lookback_zero_fails() {
        let config = make_config("[thresholds]\nsma200_slope_lookback = 0\n");
        let err = validate_scan_config(&config).unwrap_err();
        assert!(
            matches!(err, DipscanError::ConfigInvalid { key, .. } if key == "sma200_slope_lookback")
        );
    }
}
