#![allow(dead_code)]
//! Test helper functions for result-based assertions and shared fixtures.
//!
//! These helpers provide better error messages and more explicit error handling
//! compared to using .unwrap() directly in tests.

use ndarray::{ArrayD, IxDyn};
use std::fmt::Debug;
use valhook::{Batch, FnGraph, InMemoryDataset};

/// Assert that a Result is Ok and return the unwrapped value.
pub fn assert_ok<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok result for {}, but got error: {:?}", context, err),
    }
}

/// Assert that a Result is Err and return the error.
pub fn assert_err<T: Debug, E>(result: Result<T, E>, context: &str) -> E {
    match result {
        Err(err) => err,
        Ok(val) => panic!("Expected Err result for {}, but got Ok: {:?}", context, val),
    }
}

pub fn assert_close(actual: f64, expected: f64, context: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{}: expected {}, got {}",
        context,
        expected,
        actual
    );
}

pub fn vector(values: &[f32]) -> ArrayD<f32> {
    ArrayD::from_shape_vec(IxDyn(&[values.len()]), values.to_vec()).expect("1-d shape matches data")
}

pub fn scalar(value: f32) -> ArrayD<f32> {
    ArrayD::from_elem(IxDyn(&[]), value)
}

/// Graph over inputs `predictions`, `labels` and `costs` (all `[n]`):
/// `wrong:0` counts mismatched predictions, `cost:0` is the mean of `costs`.
pub fn classifier_graph() -> FnGraph {
    FnGraph::new(vec!["predictions", "labels", "costs"])
        .with_output("wrong:0", |feed| {
            let predictions = feed.require("predictions")?;
            let labels = feed.require("labels")?;
            let wrong = predictions
                .iter()
                .zip(labels.iter())
                .filter(|(p, l)| p != l)
                .count();
            Ok(scalar(wrong as f32))
        })
        .with_output("cost:0", |feed| {
            let costs = feed.require("costs")?;
            Ok(scalar(costs.sum() / costs.len() as f32))
        })
}

/// A batch of `size` samples with `wrong` mismatches and the given mean cost.
pub fn batch(size: usize, wrong: usize, mean_cost: f32) -> Batch {
    let labels = vec![1.0; size];
    let predictions: Vec<f32> = (0..size).map(|i| if i < wrong { 0.0 } else { 1.0 }).collect();
    let costs = vec![mean_cost; size];
    Batch::new(vec![vector(&predictions), vector(&labels), vector(&costs)])
}

pub fn dataset(batches: &[(usize, usize, f32)]) -> InMemoryDataset {
    InMemoryDataset::new(
        batches
            .iter()
            .map(|&(size, wrong, cost)| batch(size, wrong, cost))
            .collect(),
    )
}
