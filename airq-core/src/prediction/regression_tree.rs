use crate::model::N_FEATURES;
use serde::{Deserialize, Serialize};

/// marks a missing child in `children_left`/`children_right`
pub const TREE_LEAF: i64 = -1;

/// a fitted regression tree in flat array layout: node `i` splits on
/// `feature[i]` at `threshold[i]`, sending rows with `x[feature] <= threshold`
/// to `children_left[i]` and the rest to `children_right[i]`. leaves have
/// both children set to [`TREE_LEAF`] and predict `value[i]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    /// checks the arrays describe a well-formed tree over [`N_FEATURES`]
    /// inputs. children must come after their parent, so prediction always
    /// terminates.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.children_left.len();
        if n == 0 {
            return Err(String::from("tree has no nodes"));
        }
        let lengths = [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ];
        if lengths.iter().any(|l| *l != n) {
            return Err(format!(
                "tree arrays have mismatched lengths: {n} left children, {lengths:?} for right children, features, thresholds, values"
            ));
        }
        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == TREE_LEAF && right == TREE_LEAF {
                if !self.value[i].is_finite() {
                    return Err(format!("leaf node {i} has a non-finite value"));
                }
                continue;
            }
            for child in [left, right] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(format!("node {i} has invalid child index {child}"));
                }
            }
            let feature = self.feature[i];
            if feature < 0 || feature >= N_FEATURES as i64 {
                return Err(format!("node {i} splits on unknown feature {feature}"));
            }
        }
        Ok(())
    }

    /// walks the tree for one row. assumes [`RegressionTree::validate`] passed.
    pub fn predict(&self, row: &[f64; N_FEATURES]) -> f64 {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left == TREE_LEAF {
                return self.value[node];
            }
            let feature = self.feature[node] as usize;
            node = if row[feature] <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}
