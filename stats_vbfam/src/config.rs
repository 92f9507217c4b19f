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

//! Loading Beta priors from yaml config files.

use core_vbfam::{DistributionError, DistributionResult, IntoParameter};
use log::debug;
use ndarray::{Array, ArrayView1, Dimension, IxDyn};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;
use yaml_rust::{Yaml, YamlLoader};

use crate::beta::BetaDistribution;
use crate::errors::{ParsingError, StatsResult};

/// A shape parameter as written in a config, either one value for every entry or a flat,
/// row-major list of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Fills the whole dimension
    Scalar(f64),
    /// Reshaped to the dimension, or broadcast along the last axis if it's shorter
    Values(Vec<f64>),
}

impl<'a> IntoParameter<IxDyn> for &'a ParameterValue {
    fn into_parameter(
        self,
        name: &'static str,
        dim: &IxDyn,
    ) -> DistributionResult<Array<f64, IxDyn>> {
        match self {
            ParameterValue::Scalar(value) => (*value).into_parameter(name, dim),
            ParameterValue::Values(values) => {
                match Array::from_shape_vec(dim.clone(), values.clone()) {
                    Ok(array) => Ok(array),
                    Err(_) => ArrayView1::from(&values[..])
                        .into_parameter(name, dim)
                        .map_err(|_| DistributionError::DimensionMismatch {
                            name,
                            expected: dim.slice().to_vec(),
                            found: vec![values.len()],
                        }),
                }
            }
        }
    }
}

/// The parameters needed to build a Beta node. Minimal example below.
/// ```yaml
/// ---
/// dim: [2, 3]
/// a: 1.0
/// b: [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
/// ```
/// `dim` may also be a single integer for a vector of variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaConfig {
    /// Shape of the node
    pub dim: Vec<usize>,
    /// First shape parameter
    pub a: ParameterValue,
    /// Second shape parameter
    pub b: ParameterValue,
}

fn yaml_f64(value: &Yaml) -> Option<f64> {
    match value {
        Yaml::Integer(i) => Some(*i as f64),
        other => other.as_f64(),
    }
}

fn yaml_usize(value: &Yaml) -> Option<usize> {
    value.as_i64().filter(|i| *i >= 0).map(|i| i as usize)
}

fn read_field<'y>(params: &'y Yaml, file_name: &str, field: &str) -> StatsResult<&'y Yaml> {
    let value = &params[field];
    if value.is_badvalue() || value.is_null() {
        Err(ParsingError::MissingYamlError {
            file_name: file_name.to_string(),
            field: field.to_string(),
        }
        .into())
    } else {
        Ok(value)
    }
}

fn malformed(file_name: &str, field: &str) -> ParsingError {
    ParsingError::MalformedYamlError {
        file_name: file_name.to_string(),
        field: field.to_string(),
    }
}

fn read_parameter(params: &Yaml, file_name: &str, field: &str) -> StatsResult<ParameterValue> {
    let value = read_field(params, file_name, field)?;
    if let Some(scalar) = yaml_f64(value) {
        return Ok(ParameterValue::Scalar(scalar));
    }
    let values = value
        .as_vec()
        .ok_or_else(|| malformed(file_name, field))?
        .iter()
        .map(yaml_f64)
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| malformed(file_name, field))?;
    Ok(ParameterValue::Values(values))
}

impl BetaConfig {
    /// Reads the config from a yaml file on disk.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> StatsResult<BetaConfig> {
        let file_name = path.as_ref().display().to_string();
        let config = read_to_string(&path)?;
        let params_files = YamlLoader::load_from_str(&config)?;
        let params = params_files.get(0).ok_or_else(|| ParsingError::MissingYamlError {
            file_name: file_name.clone(),
            field: "dim".to_string(),
        })?;

        let dim_yaml = read_field(params, &file_name, "dim")?;
        let dim = match yaml_usize(dim_yaml) {
            Some(len) => vec![len],
            None => dim_yaml
                .as_vec()
                .ok_or_else(|| malformed(&file_name, "dim"))?
                .iter()
                .map(yaml_usize)
                .collect::<Option<Vec<usize>>>()
                .ok_or_else(|| malformed(&file_name, "dim"))?,
        };
        let a = read_parameter(params, &file_name, "a")?;
        let b = read_parameter(params, &file_name, "b")?;

        debug!("Loaded beta config from {} with dim {:?}", file_name, dim);
        Ok(BetaConfig { dim, a, b })
    }

    /// Builds the node this config describes.
    pub fn build(&self) -> StatsResult<BetaDistribution<IxDyn>> {
        BetaDistribution::new(IxDyn(&self.dim), &self.a, &self.b)
    }
}

impl BetaDistribution<IxDyn> {
    /// Given a yaml file on disk, it builds a Beta node. See [`BetaConfig`] for the format.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> StatsResult<BetaDistribution<IxDyn>> {
        BetaConfig::from_yaml(path)?.build()
    }
}
