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

//! # Stats nodes for variational models
//!
//! Distribution nodes for variational Bayesian latent variable models. A node owns its
//! parameters and keeps the expectations the inference loop reads consistent with them.
//!
//! Currently this is the Beta node, [`BetaDistribution`], used for sparsity and
//! mixing priors. Randomness is always passed in explicitly, seed an `Rng` to reproduce draws.

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

pub mod errors;
pub use errors::{ParsingError, StatsError, StatsResult};

mod beta;
pub use beta::{BetaDistribution, BetaExpectations, BetaParameters, LN_E_INV_POLE};

mod config;
pub use config::{BetaConfig, ParameterValue};

pub use core_vbfam::{Distribution, DistributionError, IntoParameter};
