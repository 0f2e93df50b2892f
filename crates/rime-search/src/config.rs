//! Search configuration.

use rime_core::ConfigError;
use rime_space::Connectivity;

/// Parameters for [`TemporalSearch`](crate::TemporalSearch).
///
/// Plain data; call [`validate`](Self::validate) (or construct the search
/// through [`TemporalSearch::new`](crate::TemporalSearch::new), which does)
/// before use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Which moves the agent may make each tick.
    pub connectivity: Connectivity,
    /// Whether staying in place for a tick is a legal move.
    pub allow_wait: bool,
    /// Maximum BFS levels to explore. `None` uses
    /// `period × cell_count`, which is enough to visit every
    /// `(cell, t mod period)` node.
    pub step_bound: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Orthogonal4,
            allow_wait: true,
            step_bound: None,
        }
    }
}

impl SearchConfig {
    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_bound == Some(0) {
            return Err(ConfigError::InvalidSearch {
                reason: "step_bound must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Check the connectivity against a grid of dimensionality `ndim`.
    pub fn validate_for(&self, ndim: usize) -> Result<(), ConfigError> {
        self.validate()?;
        if self.connectivity.ndim() != ndim {
            return Err(ConfigError::InvalidSearch {
                reason: format!(
                    "{} connectivity cannot search a {ndim}D grid",
                    self.connectivity.name()
                ),
            });
        }
        Ok(())
    }

    /// The effective level bound for a provider with the given shape.
    pub fn bound(&self, period: u64, cell_count: usize) -> u64 {
        self.step_bound
            .unwrap_or_else(|| period.saturating_mul(cell_count as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(SearchConfig::default().validate().is_ok());
        assert!(SearchConfig::default().validate_for(2).is_ok());
    }

    #[test]
    fn zero_bound_rejected() {
        let cfg = SearchConfig {
            step_bound: Some(0),
            ..SearchConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidSearch { .. }) => {}
            other => panic!("expected InvalidSearch, got {other:?}"),
        }
    }

    #[test]
    fn connectivity_dimension_checked() {
        let cfg = SearchConfig {
            connectivity: Connectivity::Orthogonal6,
            ..SearchConfig::default()
        };
        assert!(cfg.validate_for(3).is_ok());
        assert!(cfg.validate_for(2).is_err());
    }

    #[test]
    fn automatic_bound() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.bound(12, 48), 576);
        let fixed = SearchConfig {
            step_bound: Some(7),
            ..cfg
        };
        assert_eq!(fixed.bound(12, 48), 7);
        assert_eq!(cfg.bound(u64::MAX, 2), u64::MAX);
    }
}
