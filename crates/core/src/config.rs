//! Tunables for the constrained color generator.
//!
//! Settings arrive as a loose JSON object (from `--params` on the command line
//! or from the browser bindings). Missing or mistyped keys fall back to their
//! defaults; [`GeneratorConfig::validate`] then rejects inconsistent ranges.

use crate::error::TrainerError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default number of rejection-sampling attempts per color.
pub const DEFAULT_ATTEMPT_BUDGET: usize = 2000;
/// Default lower bound of the saturation prior. Keeps most samples away from gray.
pub const DEFAULT_MIN_SATURATION: f64 = 0.25;
/// Default upper bound of the saturation prior.
pub const DEFAULT_MAX_SATURATION: f64 = 1.0;

/// Settings for [`crate::generator::Generator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Maximum HSL draws before falling back to a neutral gray. Zero is
    /// allowed and always takes the fallback.
    pub attempt_budget: usize,
    /// Saturation is drawn uniformly from `[min_saturation, max_saturation)`.
    pub min_saturation: f64,
    pub max_saturation: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            min_saturation: DEFAULT_MIN_SATURATION,
            max_saturation: DEFAULT_MAX_SATURATION,
        }
    }
}

impl GeneratorConfig {
    /// Reads settings from a JSON object, key by key, falling back to defaults.
    ///
    /// Never fails; call [`validate`](Self::validate) on the result.
    pub fn from_json(params: &Value) -> Self {
        Self {
            attempt_budget: param_usize(params, "attempt_budget", DEFAULT_ATTEMPT_BUDGET),
            min_saturation: param_f64(params, "min_saturation", DEFAULT_MIN_SATURATION),
            max_saturation: param_f64(params, "max_saturation", DEFAULT_MAX_SATURATION),
        }
    }

    /// Current settings as a JSON object with the same keys `from_json` reads.
    pub fn to_json(&self) -> Value {
        json!({
            "attempt_budget": self.attempt_budget,
            "min_saturation": self.min_saturation,
            "max_saturation": self.max_saturation,
        })
    }

    /// Checks that both saturation bounds lie in [0, 1] and are ordered.
    pub fn validate(&self) -> Result<(), TrainerError> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.min_saturation) || !in_unit(self.max_saturation) {
            return Err(TrainerError::InvalidConfig(format!(
                "saturation bounds must lie in [0, 1], got [{}, {}]",
                self.min_saturation, self.max_saturation
            )));
        }
        if self.min_saturation > self.max_saturation {
            return Err(TrainerError::InvalidConfig(format!(
                "min_saturation {} exceeds max_saturation {}",
                self.min_saturation, self.max_saturation
            )));
        }
        Ok(())
    }
}

/// `params[name]` as f64, or `default` if missing or not a number.
fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// `params[name]` as usize, or `default` if missing or not a non-negative integer.
fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let c = GeneratorConfig::default();
        assert_eq!(c.attempt_budget, 2000);
        assert_eq!(c.min_saturation, 0.25);
        assert_eq!(c.max_saturation, 1.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn from_json_empty_object_gives_defaults() {
        assert_eq!(GeneratorConfig::from_json(&json!({})), GeneratorConfig::default());
    }

    #[test]
    fn from_json_reads_every_key() {
        let c = GeneratorConfig::from_json(&json!({
            "attempt_budget": 2500,
            "min_saturation": 0.5,
            "max_saturation": 0.9,
        }));
        assert_eq!(c.attempt_budget, 2500);
        assert_eq!(c.min_saturation, 0.5);
        assert_eq!(c.max_saturation, 0.9);
    }

    #[test]
    fn from_json_accepts_integer_saturation() {
        let c = GeneratorConfig::from_json(&json!({"max_saturation": 1}));
        assert_eq!(c.max_saturation, 1.0);
    }

    #[test]
    fn from_json_ignores_mistyped_values() {
        let c = GeneratorConfig::from_json(&json!({
            "attempt_budget": -5,
            "min_saturation": "high",
            "max_saturation": null,
        }));
        assert_eq!(c, GeneratorConfig::default());
    }

    #[test]
    fn from_json_non_object_gives_defaults() {
        assert_eq!(GeneratorConfig::from_json(&json!([1, 2])), GeneratorConfig::default());
    }

    #[test]
    fn to_json_round_trips_through_from_json() {
        let c = GeneratorConfig {
            attempt_budget: 17,
            min_saturation: 0.1,
            max_saturation: 0.6,
        };
        assert_eq!(GeneratorConfig::from_json(&c.to_json()), c);
    }

    #[test]
    fn serde_fills_missing_fields_with_defaults() {
        let c: GeneratorConfig = serde_json::from_str(r#"{"attempt_budget": 10}"#).unwrap();
        assert_eq!(c.attempt_budget, 10);
        assert_eq!(c.min_saturation, DEFAULT_MIN_SATURATION);
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let c = GeneratorConfig {
            min_saturation: 0.8,
            max_saturation: 0.2,
            ..GeneratorConfig::default()
        };
        let err = c.validate().unwrap_err();
        assert!(matches!(err, TrainerError::InvalidConfig(_)));
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn validate_rejects_out_of_unit_range_and_nan() {
        for (lo, hi) in [(-0.1, 0.5), (0.2, 1.5), (f64::NAN, 1.0)] {
            let c = GeneratorConfig {
                min_saturation: lo,
                max_saturation: hi,
                ..GeneratorConfig::default()
            };
            assert!(c.validate().is_err(), "accepted [{lo}, {hi}]");
        }
    }

    #[test]
    fn validate_allows_degenerate_range_and_zero_budget() {
        let c = GeneratorConfig {
            attempt_budget: 0,
            min_saturation: 1.0,
            max_saturation: 1.0,
        };
        assert!(c.validate().is_ok());
    }
}
