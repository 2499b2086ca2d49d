//! Configuration validation.

use crate::config::{AlertConfig, AnalysisConfig, Config, SchedulerConfig};
use crate::constants::confidence;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_analysis(&config.analysis)?;
    validate_scheduler(&config.scheduler)?;
    validate_alerts(&config.alerts)?;
    Ok(())
}

/// Validate analysis settings.
pub fn validate_analysis(analysis: &AnalysisConfig) -> Result<()> {
    if analysis.sample_stride == 0 {
        return Err(Error::ConfigValidation {
            message: "sample_stride must be at least 1".to_string(),
        });
    }

    if analysis.history_capacity == 0 {
        return Err(Error::ConfigValidation {
            message: "history_capacity must be at least 1".to_string(),
        });
    }

    check_confidence("acceptance_threshold", analysis.acceptance_threshold)
}

/// Validate scheduler settings.
pub fn validate_scheduler(scheduler: &SchedulerConfig) -> Result<()> {
    if scheduler.tick_period_ms == 0 {
        return Err(Error::ConfigValidation {
            message: "tick_period_ms must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_alerts(alerts: &AlertConfig) -> Result<()> {
    check_confidence("alerts.threshold", alerts.threshold)
}

fn check_confidence(name: &str, value: f32) -> Result<()> {
    // NaN fails the range check as well
    if !(confidence::MIN..=confidence::MAX).contains(&value) {
        return Err(Error::ConfigValidation {
            message: format!(
                "{name} must be between {} and {}, got {value}",
                confidence::MIN,
                confidence::MAX
            ),
        });
    }
    Ok(())
}
