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

//! The errors that can occur when a distribution node is built or its parameters are replaced.

use std::error::Error;
use std::fmt;

/// Helper type for a call that could go wrong.
pub type DistributionResult<T> = Result<T, DistributionError>;

/// Error type for the distribution bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionError {
    /// One of the arrays a node holds does not have the node's declared dimension,
    /// or could not be broadcast to it.
    DimensionMismatch {
        /// Name of the offending array
        name: &'static str,
        /// The declared dimension of the node
        expected: Vec<usize>,
        /// The shape that was actually provided
        found: Vec<usize>,
    },
}

impl fmt::Display for DistributionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DistributionError::DimensionMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "dimensionality mismatch in '{}': expected {:?}, found {:?}",
                name, expected, found
            ),
        }
    }
}

#[allow(deprecated)]
impl Error for DistributionError {
    fn description(&self) -> &str {
        match self {
            DistributionError::DimensionMismatch { .. } => {
                "an array does not match the dimension of the distribution"
            }
        }
    }

    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DistributionError::DimensionMismatch { .. } => None,
        }
    }
}
