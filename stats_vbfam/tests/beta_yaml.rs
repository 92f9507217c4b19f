/*
* Licensed to Elasticsearch B.V. under one or more contributor
* license agreements. See the NOTICE file distributed with
* this work for additional information regarding copyright
* ownership. Elasticsearch B.V. licenses this file to you under
* the Apache License, Version 2.0 (the "License"); you may
* not use this file except in compliance with the License.
* You may obtain a copy of the License at
*
*  http://www.apache.org/licenses/LICENSE-2.0
*
* Unless required by applicable law or agreed to in writing,
* software distributed under the License is distributed on an
* "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
* KIND, either express or implied.  See the License for the
* specific language governing permissions and limitations
* under the License.
*/

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use assert_approx_eq::assert_approx_eq;
use ndarray::{Axis, IxDyn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use stats_vbfam::*;
use tempdir::TempDir;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn builds_matrix_node_from_yaml() {
    let dir = TempDir::new("beta_yaml").unwrap();
    let path = write_config(
        &dir,
        "prior.yml",
        "---\ndim: [2, 3]\na: 1\nb: [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]\n",
    );

    let beta = BetaDistribution::from_yaml(&path).unwrap();
    assert_eq!(beta.dim(), &IxDyn(&[2, 3]));
    assert!(beta.check_dimensionalities().is_ok());
    let e = &beta.expectations().e;
    assert_approx_eq!(e[[0, 0]], 0.5);
    assert_approx_eq!(e[[0, 2]], 0.25);
    assert_approx_eq!(e[[1, 2]], 1.0 / 7.0);
}

#[test]
fn vector_dim_and_broadcast_row() {
    let dir = TempDir::new("beta_yaml").unwrap();
    let path = write_config(&dir, "prior.yml", "---\ndim: 4\na: [2.0]\nb: 2.0\n");

    let config = BetaConfig::from_yaml(&path).unwrap();
    assert_eq!(config.dim, vec![4]);
    assert_eq!(config.a, ParameterValue::Values(vec![2.0]));
    assert_eq!(config.b, ParameterValue::Scalar(2.0));

    let beta = config.build().unwrap();
    let ln_e = &beta.expectations().ln_e;
    for v in ln_e.iter() {
        assert_approx_eq!(*v, ln_e[[0]]);
        assert!(v.is_finite());
    }
}

#[test]
fn missing_field_is_reported() {
    let dir = TempDir::new("beta_yaml").unwrap();
    let path = write_config(&dir, "prior.yml", "---\ndim: 4\na: 2.0\n");

    match BetaConfig::from_yaml(&path) {
        Err(StatsError::ParsingError(ParsingError::MissingYamlError { field, .. })) => {
            assert_eq!(field, "b")
        }
        other => panic!("expected a missing field, got {:?}", other),
    }
}

#[test]
fn malformed_field_is_reported() {
    let dir = TempDir::new("beta_yaml").unwrap();
    let path = write_config(&dir, "prior.yml", "---\ndim: [2, two]\na: 2.0\nb: 1.0\n");

    match BetaConfig::from_yaml(&path) {
        Err(StatsError::ParsingError(ParsingError::MalformedYamlError { field, .. })) => {
            assert_eq!(field, "dim")
        }
        other => panic!("expected a malformed field, got {:?}", other),
    }
}

#[test]
fn mismatched_values_fail_to_build() {
    let dir = TempDir::new("beta_yaml").unwrap();
    let path = write_config(&dir, "prior.yml", "---\ndim: [2, 3]\na: [1.0, 2.0]\nb: 1.0\n");

    match BetaDistribution::from_yaml(&path) {
        Err(StatsError::DistributionError(DistributionError::DimensionMismatch {
            name, ..
        })) => assert_eq!(name, "a"),
        other => panic!("expected a dimension mismatch, got {:?}", other),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new("beta_yaml").unwrap();
    match BetaConfig::from_yaml(dir.path().join("nope.yml")) {
        Err(StatsError::IoError(_)) => {}
        other => panic!("expected an io error, got {:?}", other),
    }
}

#[test]
fn coordinate_ascent_round() {
    // A loaded prior, updated with counts the way a factor model would, then sampled.
    let dir = TempDir::new("beta_yaml").unwrap();
    let path = write_config(&dir, "prior.yml", "---\ndim: 3\na: 1.0\nb: 1.0\n");
    let mut beta = BetaDistribution::from_yaml(&path).unwrap();

    let successes = [8.0, 0.0, 3.0];
    let failures = [2.0, 10.0, 3.0];
    beta.update_parameters(|p| {
        p.a.iter_mut().zip(successes.iter()).for_each(|(a, s)| *a += s);
        p.b.iter_mut().zip(failures.iter()).for_each(|(b, f)| *b += f);
    })
    .unwrap();

    let e = beta.expectations().e.clone();
    assert_approx_eq!(e[[0]], 9.0 / 12.0);
    assert_approx_eq!(e[[1]], 1.0 / 12.0);
    assert_approx_eq!(e[[2]], 0.5);

    let mut rng = SmallRng::seed_from_u64(1729);
    let draws = beta.sample_n(10000, &mut rng).unwrap();
    assert_eq!(draws.shape(), &[10000, 3]);
    let means = draws.mean_axis(Axis(0)).unwrap();
    for i in 0..3 {
        assert_approx_eq!(means[[i]], e[[i]], 0.01);
    }
}
