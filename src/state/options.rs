use crate::foundation::core::DeepState;
use crate::foundation::error::{DeeptileError, DeeptileResult};

/// Configuration surface for a state transform request.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StateOptions {
    /// Requested output state.
    pub target: DeepState,
    /// Discard samples that contribute nothing: zero alpha and all
    /// auxiliary channels zero.
    pub prune_transparent: bool,
    /// Discard samples behind the occlusion threshold.
    pub prune_occluded: bool,
    /// Cumulative alpha beyond which more-distant samples are discarded;
    /// domain `(0, 1]`. Only consulted when `prune_occluded` is set.
    pub occluded_threshold: f32,
}

impl Default for StateOptions {
    fn default() -> Self {
        Self {
            target: DeepState::Tidy,
            prune_transparent: false,
            prune_occluded: false,
            occluded_threshold: 1.0,
        }
    }
}

impl StateOptions {
    /// Options requesting the given target with no pruning.
    pub fn for_target(target: DeepState) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Check the option domains.
    ///
    /// A threshold at or below zero would treat even an untouched pixel as
    /// occluded, so the domain is `(0, 1]` rather than silently clamping.
    pub fn validate(&self) -> DeeptileResult<()> {
        if self.prune_occluded
            && !(self.occluded_threshold > 0.0 && self.occluded_threshold <= 1.0)
        {
            return Err(DeeptileError::validation(format!(
                "occluded threshold {} outside (0, 1]",
                self.occluded_threshold
            )));
        }
        Ok(())
    }

    /// `true` when any pruning pass is requested.
    pub(crate) fn prunes(&self) -> bool {
        self.prune_transparent || self.prune_occluded
    }
}
