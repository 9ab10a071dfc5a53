/// Heuristic multiplier used unless configured otherwise.
///
/// Values above `1.0` turn the search into weighted A*: it converges faster
/// but the path found is only guaranteed to cost at most this factor times
/// the optimum.
pub const DEFAULT_HEURISTIC_WEIGHT: f32 = 1.2;

/// Tunables for [`NavGraph`](crate::NavGraph) searches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AstarConfig {
    /// Multiplier applied to the heuristic when scoring discovered vertices.
    pub heuristic_weight: f32,
    /// Abort a search after this many vertices have been expanded.
    pub max_expansions: Option<usize>,
}

impl Default for AstarConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: DEFAULT_HEURISTIC_WEIGHT,
            max_expansions: None,
        }
    }
}

impl AstarConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heuristic_weight(mut self, weight: f32) -> Self {
        debug_assert!(weight >= 0.0, "heuristic weight must be non-negative");
        self.heuristic_weight = weight;
        self
    }

    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_weighted_and_unbounded() {
        let cfg = AstarConfig::default();
        assert_eq!(cfg.heuristic_weight, 1.2);
        assert_eq!(cfg.max_expansions, None);
        assert_eq!(AstarConfig::new(), cfg);
    }

    #[test]
    fn builder_overrides() {
        let cfg = AstarConfig::new()
            .with_heuristic_weight(1.0)
            .with_max_expansions(64);
        assert_eq!(cfg.heuristic_weight, 1.0);
        assert_eq!(cfg.max_expansions, Some(64));
    }
}
