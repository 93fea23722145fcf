//! Circulation configuration loaded from environment variables.
//!
//! The loan period and the late fee are library policy, so they have no defaults: a
//! deployment that forgets them fails at startup instead of lending under made-up terms.

use thiserror::Error;

/// Default capacity of each actor's request channel.
pub const DEFAULT_ACTOR_BUFFER_SIZE: usize = 32;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Terms applied to every new borrowing and every return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanPolicy {
    loan_period_days: i64,
    fee_per_late_day: u32,
}

impl LoanPolicy {
    /// Fails unless the loan period is at least one day.
    pub fn new(loan_period_days: i64, fee_per_late_day: u32) -> Result<Self, ConfigError> {
        if loan_period_days <= 0 {
            return Err(ConfigError::Invalid {
                var: "LOAN_PERIOD_DAYS",
                value: loan_period_days.to_string(),
                reason: "loan period must be positive".to_string(),
            });
        }
        Ok(Self {
            loan_period_days,
            fee_per_late_day,
        })
    }

    pub fn loan_period_days(&self) -> i64 {
        self.loan_period_days
    }

    pub fn fee_per_late_day(&self) -> u32 {
        self.fee_per_late_day
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CirculationConfig {
    pub policy: LoanPolicy,
    /// Request channel capacity per actor.
    pub actor_buffer_size: usize,
}

impl CirculationConfig {
    pub fn new(policy: LoanPolicy) -> Self {
        Self {
            policy,
            actor_buffer_size: DEFAULT_ACTOR_BUFFER_SIZE,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var             | Default  |
    /// |---------------------|----------|
    /// | `LOAN_PERIOD_DAYS`  | required |
    /// | `FEE_PER_LATE_DAY`  | required |
    /// | `ACTOR_BUFFER_SIZE` | `32`     |
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let loan_period_days: i64 = parse(&lookup, "LOAN_PERIOD_DAYS")?
            .ok_or(ConfigError::Missing("LOAN_PERIOD_DAYS"))?;
        let fee_per_late_day: u32 = parse(&lookup, "FEE_PER_LATE_DAY")?
            .ok_or(ConfigError::Missing("FEE_PER_LATE_DAY"))?;
        let actor_buffer_size: usize =
            parse(&lookup, "ACTOR_BUFFER_SIZE")?.unwrap_or(DEFAULT_ACTOR_BUFFER_SIZE);

        if actor_buffer_size == 0 {
            return Err(ConfigError::Invalid {
                var: "ACTOR_BUFFER_SIZE",
                value: "0".to_string(),
                reason: "channel capacity must be at least 1".to_string(),
            });
        }

        Ok(Self {
            policy: LoanPolicy::new(loan_period_days, fee_per_late_day)?,
            actor_buffer_size,
        })
    }
}

fn parse<T>(
    lookup: &impl Fn(&'static str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn load(vars: &[(&'static str, &str)]) -> Result<CirculationConfig, ConfigError> {
        let vars: HashMap<&str, String> = vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        CirculationConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_loads_policy_and_default_buffer() {
        let config = load(&[("LOAN_PERIOD_DAYS", "14"), ("FEE_PER_LATE_DAY", "5")]).unwrap();

        assert_eq!(config.policy.loan_period_days(), 14);
        assert_eq!(config.policy.fee_per_late_day(), 5);
        assert_eq!(config.actor_buffer_size, DEFAULT_ACTOR_BUFFER_SIZE);
    }

    #[test]
    fn test_policy_values_are_required() {
        assert_matches!(
            load(&[("FEE_PER_LATE_DAY", "5")]),
            Err(ConfigError::Missing("LOAN_PERIOD_DAYS"))
        );
        assert_matches!(
            load(&[("LOAN_PERIOD_DAYS", "14")]),
            Err(ConfigError::Missing("FEE_PER_LATE_DAY"))
        );
    }

    #[test]
    fn test_rejects_unparsable_and_out_of_range_values() {
        assert_matches!(
            load(&[("LOAN_PERIOD_DAYS", "two weeks"), ("FEE_PER_LATE_DAY", "5")]),
            Err(ConfigError::Invalid { var: "LOAN_PERIOD_DAYS", .. })
        );
        assert_matches!(
            load(&[("LOAN_PERIOD_DAYS", "0"), ("FEE_PER_LATE_DAY", "5")]),
            Err(ConfigError::Invalid { var: "LOAN_PERIOD_DAYS", .. })
        );
        assert_matches!(
            load(&[("LOAN_PERIOD_DAYS", "14"), ("FEE_PER_LATE_DAY", "-1")]),
            Err(ConfigError::Invalid { var: "FEE_PER_LATE_DAY", .. })
        );
        assert_matches!(
            load(&[
                ("LOAN_PERIOD_DAYS", "14"),
                ("FEE_PER_LATE_DAY", "5"),
                ("ACTOR_BUFFER_SIZE", "0")
            ]),
            Err(ConfigError::Invalid { var: "ACTOR_BUFFER_SIZE", .. })
        );
    }
}
