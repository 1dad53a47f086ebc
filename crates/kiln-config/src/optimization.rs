//! Post-bundling optimizer selection.

use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::stage::{StageRef, names};

/// Ordered optimizer stages run after bundling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptimizationSet(Vec<StageRef>);

impl OptimizationSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StageRef> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a OptimizationSet {
    type Item = &'a StageRef;
    type IntoIter = std::slice::Iter<'a, StageRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub struct OptimizationPlanner;

impl OptimizationPlanner {
    /// Development gets no optimizers. Production gets the script minimizer
    /// followed by the stylesheet optimizer.
    pub fn plan(mode: Mode) -> OptimizationSet {
        match mode {
            Mode::Development => OptimizationSet::default(),
            Mode::Production => OptimizationSet(vec![
                StageRef::new(names::MINIMIZER),
                StageRef::new(names::STYLE_OPTIMIZER),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_has_no_optimizers() {
        assert!(OptimizationPlanner::plan(Mode::Development).is_empty());
    }

    #[test]
    fn production_runs_minimizer_then_style_optimizer() {
        let set = OptimizationPlanner::plan(Mode::Production);
        let order: Vec<_> = set.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, [names::MINIMIZER, names::STYLE_OPTIMIZER]);
    }

    #[test]
    fn serializes_as_plain_list() {
        let value = serde_json::to_value(OptimizationPlanner::plan(Mode::Development)).unwrap();
        assert_eq!(value, serde_json::json!([]));
    }
}
