use super::{NormalizedVector, RegressionTree};
use crate::model::{AirqError, N_FEATURES};
use serde::{Deserialize, Serialize};

/// a fitted PM2.5 regression model exported from the training pipeline.
/// all variants consume one normalized row in the fixed feature order.
///
/// # Example
///
/// ```toml
/// type = "linear"
/// coefficients = [14.2, 3.1, -0.8, 1.9, 0.02, -0.05]
/// intercept = 28.4
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ModelArtifact {
    /// `intercept + Σ coefficients[j] * x[j]`
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    /// mean of the predictions of every tree
    RandomForest { trees: Vec<RegressionTree> },
    /// `init + learning_rate * Σ tree(x)`
    GradientBoosting {
        init: f64,
        learning_rate: f64,
        trees: Vec<RegressionTree>,
    },
}

impl ModelArtifact {
    pub fn validate(&self) -> Result<(), AirqError> {
        match self {
            ModelArtifact::Linear {
                coefficients,
                intercept,
            } => {
                if coefficients.len() != N_FEATURES {
                    return Err(AirqError::ModelUnavailableError(format!(
                        "linear model has {} coefficients, expected {N_FEATURES}",
                        coefficients.len()
                    )));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(AirqError::ModelUnavailableError(String::from(
                        "linear model has non-finite parameters",
                    )));
                }
                Ok(())
            }
            ModelArtifact::RandomForest { trees } => validate_trees(trees),
            ModelArtifact::GradientBoosting {
                init,
                learning_rate,
                trees,
            } => {
                if !init.is_finite() || !learning_rate.is_finite() {
                    return Err(AirqError::ModelUnavailableError(String::from(
                        "gradient boosting model has non-finite parameters",
                    )));
                }
                validate_trees(trees)
            }
        }
    }

    pub fn predict(&self, normalized: &NormalizedVector) -> f64 {
        let NormalizedVector(row) = normalized;
        match self {
            ModelArtifact::Linear {
                coefficients,
                intercept,
            } => {
                intercept
                    + coefficients
                        .iter()
                        .zip(row.iter())
                        .map(|(c, x)| c * x)
                        .sum::<f64>()
            }
            ModelArtifact::RandomForest { trees } => {
                let total: f64 = trees.iter().map(|t| t.predict(row)).sum();
                total / trees.len() as f64
            }
            ModelArtifact::GradientBoosting {
                init,
                learning_rate,
                trees,
            } => init + learning_rate * trees.iter().map(|t| t.predict(row)).sum::<f64>(),
        }
    }
}

fn validate_trees(trees: &[RegressionTree]) -> Result<(), AirqError> {
    if trees.is_empty() {
        return Err(AirqError::ModelUnavailableError(String::from(
            "tree ensemble has no trees",
        )));
    }
    for (idx, tree) in trees.iter().enumerate() {
        tree.validate().map_err(|e| {
            AirqError::ModelUnavailableError(format!("invalid tree {idx} in ensemble: {e}"))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::regression_tree::tests::two_level_tree;

    #[test]
    fn test_linear_prediction() {
        let model = ModelArtifact::Linear {
            coefficients: vec![1.0, 2.0, 0.0, 0.0, 0.0, -1.0],
            intercept: 5.0,
        };
        model.validate().unwrap();
        let x = NormalizedVector([1.0, 2.0, 9.0, 9.0, 9.0, 3.0]);
        assert_eq!(model.predict(&x), 7.0);
    }

    #[test]
    fn test_random_forest_averages_trees() {
        let mut other = two_level_tree();
        other.value = vec![0.0, 0.0, 20.0, 0.0, 0.0];
        let model = ModelArtifact::RandomForest {
            trees: vec![two_level_tree(), other],
        };
        model.validate().unwrap();
        let x = NormalizedVector([1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(model.predict(&x), 15.0);
    }

    #[test]
    fn test_gradient_boosting_sums_scaled_trees() {
        let model = ModelArtifact::GradientBoosting {
            init: 20.0,
            learning_rate: 0.5,
            trees: vec![two_level_tree(), two_level_tree()],
        };
        model.validate().unwrap();
        let x = NormalizedVector([100.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(model.predict(&x), 90.0);
    }

    #[test]
    fn test_invalid_models_are_unavailable() {
        let short = ModelArtifact::Linear {
            coefficients: vec![1.0; 5],
            intercept: 0.0,
        };
        let empty = ModelArtifact::RandomForest { trees: vec![] };
        for model in [short, empty] {
            assert_eq!(model.validate().unwrap_err().code(), "model_unavailable");
        }
    }

    #[test]
    fn test_decode_tagged_toml() {
        let src = r#"
            type = "linear"
            coefficients = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]
            intercept = 2.5
        "#;
        let model: ModelArtifact = toml::from_str(src).unwrap();
        assert!(model.validate().is_ok());
        assert_eq!(model.predict(&NormalizedVector([1.0; 6])), 3.5);
    }
}
