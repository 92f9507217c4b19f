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

//! The errors that can occur when a Beta node is loading, updating or sampling.
//! Dimension errors are floated up from `core_vbfam`, the rest come from config i/o and the
//! variate generator.

use core_vbfam::DistributionError;
use ndarray::ShapeError;
use rand_distr::BetaError;
use std::error::Error;
use std::fmt;
use std::io;
use yaml_rust::ScanError;

/// Helper type for a call that could go wrong.
pub type StatsResult<T> = Result<T, StatsError>;

/// Error type for the stats nodes. Mostly a wrapper around `DistributionError`.
#[derive(Debug)]
pub enum StatsError {
    /// The held arrays don't agree with the node's dimension
    DistributionError(DistributionError),
    /// IO error when opening config files
    IoError(io::Error),
    /// Parsing error when loading a yaml config
    ParsingError(ParsingError),
    /// The variate generator rejected a pair of shape parameters
    SamplingError(BetaError),
    /// Draws could not be laid out in the requested shape
    ShapeError(ShapeError),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            StatsError::DistributionError(ref e) => write!(f, "{}", e),
            StatsError::IoError(ref e) => write!(f, "{}", e),
            StatsError::ParsingError(ref e) => write!(f, "{}", e),
            StatsError::SamplingError(ref e) => {
                write!(f, "unable to sample from the beta distribution: {}", e)
            }
            StatsError::ShapeError(ref e) => write!(f, "{}", e),
        }
    }
}

impl Error for StatsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            StatsError::DistributionError(ref e) => Some(e),
            StatsError::IoError(ref e) => Some(e),
            StatsError::ParsingError(ref e) => Some(e),
            StatsError::SamplingError(..) => None,
            StatsError::ShapeError(ref e) => Some(e),
        }
    }
}

impl From<DistributionError> for StatsError {
    fn from(err: DistributionError) -> Self {
        StatsError::DistributionError(err)
    }
}

impl From<io::Error> for StatsError {
    fn from(err: io::Error) -> Self {
        StatsError::IoError(err)
    }
}

impl From<ParsingError> for StatsError {
    fn from(err: ParsingError) -> Self {
        StatsError::ParsingError(err)
    }
}

impl From<ScanError> for StatsError {
    fn from(err: ScanError) -> Self {
        StatsError::ParsingError(ParsingError::ScanError(err))
    }
}

impl From<BetaError> for StatsError {
    fn from(err: BetaError) -> Self {
        StatsError::SamplingError(err)
    }
}

impl From<ShapeError> for StatsError {
    fn from(err: ShapeError) -> Self {
        StatsError::ShapeError(err)
    }
}

/// A parsing error occored while reading a config
#[derive(Debug)]
pub enum ParsingError {
    /// Yaml was messed up
    MalformedYamlError {
        /// The file that was messed up
        file_name: String,
        /// The value that was messed up
        field: String,
    },
    /// A needed field was missing from the file.
    MissingYamlError {
        /// The file
        file_name: String,
        /// The missing field
        field: String,
    },
    /// The yaml scanner gave up on the file
    ScanError(ScanError),
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParsingError::MalformedYamlError {
                ref file_name,
                ref field,
            } => write!(f, "there is a error reading '{}' in {}", field, file_name),
            ParsingError::MissingYamlError {
                ref file_name,
                ref field,
            } => write!(f, "'{}' is not set in {}", field, file_name),
            ParsingError::ScanError(ref e) => write!(f, "{}", e),
        }
    }
}

impl Error for ParsingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ParsingError::MalformedYamlError { .. } => None,
            ParsingError::MissingYamlError { .. } => None,
            ParsingError::ScanError(ref e) => Some(e),
        }
    }
}
