//! On-disk JSON model format and its compiled, validated forms.
//!
//! Two families are understood:
//!
//! * `random_forest`: an ensemble of binary regression trees stored as flat
//!   node arrays. A row goes to `left` when `row[feature] <= threshold`; the
//!   forest output is the mean of the tree outputs.
//! * `linear`: `intercept + sum(coefficient * column)` keyed by column name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::error::{HouseError, HouseResult};
use crate::data::domain::FeatureRecord;

use super::domain::{ModelKind, Regressor};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    RandomForest(ForestArtifact),
    Linear(LinearArtifact),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForestArtifact {
    /// Column names that split nodes index into.
    pub feature_names: Vec<String>,
    pub trees: Vec<TreeArtifact>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub nodes: Vec<NodeArtifact>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeArtifact {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub intercept: f64,
    pub coefficients: BTreeMap<String, f64>,
}

impl ModelArtifact {
    pub fn kind(&self) -> ModelKind {
        match self {
            ModelArtifact::RandomForest(_) => ModelKind::RandomForest,
            ModelArtifact::Linear(_) => ModelKind::Linear,
        }
    }

    /// Validate against the feature schema and build an evaluable regressor.
    pub fn compile(self) -> HouseResult<Box<dyn Regressor>> {
        Ok(match self {
            ModelArtifact::RandomForest(forest) => Box::new(RandomForest::compile(forest)?),
            ModelArtifact::Linear(linear) => Box::new(LinearModel::compile(linear)?),
        })
    }
}

fn resolve_column(name: &str) -> HouseResult<usize> {
    FeatureRecord::column_index(name)
        .ok_or_else(|| HouseError::model_invalid(format!("unknown feature `{name}`")))
}

#[derive(Clone, Copy, Debug)]
enum Node {
    Split {
        column: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

/// Tree ensemble whose split features are already resolved to record columns.
#[derive(Debug)]
pub struct RandomForest {
    trees: Vec<Vec<Node>>,
}

impl RandomForest {
    fn compile(artifact: ForestArtifact) -> HouseResult<Self> {
        if artifact.trees.is_empty() {
            return Err(HouseError::model_invalid("forest has no trees"));
        }
        let columns = artifact
            .feature_names
            .iter()
            .map(|name| resolve_column(name))
            .collect::<HouseResult<Vec<_>>>()?;

        let trees = artifact
            .trees
            .into_iter()
            .enumerate()
            .map(|(tree_idx, tree)| compile_tree(tree_idx, tree, &columns))
            .collect::<HouseResult<Vec<_>>>()?;
        Ok(Self { trees })
    }

    fn predict_row(&self, values: &[f64; 12]) -> f64 {
        let total: f64 = self.trees.iter().map(|tree| eval_tree(tree, values)).sum();
        total / self.trees.len() as f64
    }
}

fn compile_tree(tree_idx: usize, tree: TreeArtifact, columns: &[usize]) -> HouseResult<Vec<Node>> {
    let len = tree.nodes.len();
    if len == 0 {
        return Err(HouseError::model_invalid(format!("tree {tree_idx} has no nodes")));
    }

    let mut nodes = Vec::with_capacity(len);
    for (idx, node) in tree.nodes.into_iter().enumerate() {
        let compiled = match node {
            NodeArtifact::Leaf { value } => Node::Leaf(value),
            NodeArtifact::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                let column = *columns.get(feature).ok_or_else(|| {
                    HouseError::model_invalid(format!(
                        "tree {tree_idx} node {idx}: feature index {feature} out of range"
                    ))
                })?;
                // Children after their parent guarantees evaluation terminates.
                for child in [left, right] {
                    if child <= idx || child >= len {
                        return Err(HouseError::model_invalid(format!(
                            "tree {tree_idx} node {idx}: child {child} must lie in {}..{len}",
                            idx + 1
                        )));
                    }
                }
                Node::Split {
                    column,
                    threshold,
                    left,
                    right,
                }
            }
        };
        nodes.push(compiled);
    }
    Ok(nodes)
}

fn eval_tree(nodes: &[Node], values: &[f64; 12]) -> f64 {
    let mut idx = 0;
    loop {
        match nodes[idx] {
            Node::Leaf(value) => return value,
            Node::Split {
                column,
                threshold,
                left,
                right,
            } => {
                idx = if values[column] <= threshold { left } else { right };
            }
        }
    }
}

impl Regressor for RandomForest {
    fn predict(&self, rows: &[FeatureRecord]) -> HouseResult<Vec<f64>> {
        Ok(rows
            .iter()
            .map(|row| self.predict_row(&row.values()))
            .collect())
    }
}

/// Linear model over record columns.
#[derive(Debug)]
pub struct LinearModel {
    intercept: f64,
    weights: Vec<(usize, f64)>,
}

impl LinearModel {
    fn compile(artifact: LinearArtifact) -> HouseResult<Self> {
        let weights = artifact
            .coefficients
            .iter()
            .map(|(name, weight)| -> HouseResult<(usize, f64)> {
                Ok((resolve_column(name)?, *weight))
            })
            .collect::<HouseResult<Vec<_>>>()?;
        Ok(Self {
            intercept: artifact.intercept,
            weights,
        })
    }
}

impl Regressor for LinearModel {
    fn predict(&self, rows: &[FeatureRecord]) -> HouseResult<Vec<f64>> {
        Ok(rows
            .iter()
            .map(|row| {
                let values = row.values();
                self.weights
                    .iter()
                    .fold(self.intercept, |acc, (column, weight)| acc + weight * values[*column])
            })
            .collect())
    }
}
