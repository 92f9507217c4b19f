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

//! # Beta distribution node
//!
//! A Beta node holds independent Beta variables laid out in an array of fixed dimension,
//! parameterized by the shapes `a` and `b`. The inference loop reads the expectations
//! `E[x]`, `E[ln x]` and `E[ln(1-x)]` and writes new shapes on every update,
//! so the expectations are refreshed every time the parameters change.
//!
//! ```text
//! p(x|a,b)     = Gamma(a+b)/(Gamma(a)*Gamma(b)) * x^(a-1) * (1-x)^(b-1)
//! E[x]         = a/(a+b)
//! E[ln x]      = digamma(a) - digamma(a+b)
//! E[ln(1-x)]   = digamma(b) - digamma(a+b)
//! var[x]       = a*b / ((a+b)^2 * (a+b+1))
//! ```

use core_vbfam::{Distribution, DistributionError, IntoParameter};
use log::{debug, info};
use ndarray::{Array, Axis, Dimension, Zip};
use rand::Rng;
use rand_distr::{Beta as BetaSampler, Distribution as RandDistribution};
use serde::{Deserialize, Serialize};
use statrs::function::gamma::{digamma, ln_gamma};

use crate::errors::StatsResult;

/// Below this `b` digamma is in its pole regime, `digamma(b) ~ -1/b`. When `b/(a+b)` is also
/// below it the mass of the distribution sits at 1, and `E[ln(1-x)]` is pinned to negative
/// infinity there.
///
/// The pin is a jump, not a limit: with `a = 5`, `b = 2e-6` gives about `-5e5` while
/// `b = 1e-6` gives `-inf`. Callers that need `E[ln(1-x)]` to be continuous in `b` must keep
/// `b` above this value.
pub const LN_E_INV_POLE: f64 = 1e-6;

#[inline]
fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

fn ln_pdf_scalar(x: f64, a: f64, b: f64) -> f64 {
    if x.is_nan() || !(0.0..=1.0).contains(&x) {
        return f64::NEG_INFINITY;
    }
    let ln_norm = -ln_beta(a, b);
    if x == 0.0 {
        if a < 1.0 {
            return f64::INFINITY;
        }
        if a > 1.0 {
            return f64::NEG_INFINITY;
        }
        return ln_norm;
    }
    if x == 1.0 {
        if b < 1.0 {
            return f64::INFINITY;
        }
        if b > 1.0 {
            return f64::NEG_INFINITY;
        }
        return ln_norm;
    }
    ln_norm + (a - 1.0) * x.ln() + (b - 1.0) * (-x).ln_1p()
}

/// The shape parameters. Every entry is an independent Beta(a, b).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaParameters<D: Dimension> {
    /// First shape, pulls mass toward 1
    pub a: Array<f64, D>,
    /// Second shape, pulls mass toward 0
    pub b: Array<f64, D>,
}

/// Expectations the inference loop reads, always derived from the current parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaExpectations<D: Dimension> {
    /// `E[x] = a/(a+b)`
    pub e: Array<f64, D>,
    /// `E[ln x] = digamma(a) - digamma(a+b)`
    pub ln_e: Array<f64, D>,
    /// `E[ln(1-x)] = digamma(b) - digamma(a+b)`, negative infinity when `b` collapses to 0
    pub ln_e_inv: Array<f64, D>,
}

impl<D: Dimension> BetaExpectations<D> {
    fn from_parameters(params: &BetaParameters<D>) -> BetaExpectations<D> {
        let a = &params.a;
        let b = &params.b;
        let total = a + b;
        let digamma_total = total.mapv(digamma);

        let e = a / &total;
        let ln_e = a.mapv(digamma) - &digamma_total;
        let mut ln_e_inv = b.mapv(digamma) - &digamma_total;

        // One sided: only a collapsing b with the mass at 1 sends ln(1-x) to the pole.
        let mut corrected = 0;
        Zip::from(&mut ln_e_inv).and(a).and(b).for_each(|v, &a, &b| {
            if v.is_infinite() || (b <= LN_E_INV_POLE && b / (a + b) <= LN_E_INV_POLE) {
                *v = f64::NEG_INFINITY;
                corrected += 1;
            }
        });
        if corrected > 0 {
            debug!(
                "Pinned {} entries of E[ln(1-x)] to -inf, their mass is at 1",
                corrected
            );
        }

        BetaExpectations { e, ln_e, ln_e_inv }
    }
}

/// A block of independent Beta variables sharing one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaDistribution<D: Dimension> {
    dim: D,
    params: BetaParameters<D>,
    expectations: BetaExpectations<D>,
}

impl<D: Dimension> Distribution for BetaDistribution<D> {
    type Dim = D;

    fn dim(&self) -> &D {
        &self.dim
    }

    fn held_shapes(&self) -> Vec<(&'static str, &[usize])> {
        vec![
            ("a", self.params.a.shape()),
            ("b", self.params.b.shape()),
            ("E", self.expectations.e.shape()),
            ("lnE", self.expectations.ln_e.shape()),
            ("lnEInv", self.expectations.ln_e_inv.shape()),
        ]
    }
}

impl<D: Dimension> BetaDistribution<D> {
    /// Creates a new node. `a` and `b` are broadcast to `dim`, scalars fill it.
    /// The expectations are computed right away.
    pub fn new<A, B>(dim: D, a: A, b: B) -> StatsResult<BetaDistribution<D>>
    where
        A: IntoParameter<D>,
        B: IntoParameter<D>,
    {
        let params = BetaParameters {
            a: a.into_parameter("a", &dim)?,
            b: b.into_parameter("b", &dim)?,
        };
        let expectations = BetaExpectations::from_parameters(&params);
        let beta = BetaDistribution {
            dim,
            params,
            expectations,
        };
        beta.check_dimensionalities()?;
        Ok(beta)
    }

    /// Same as `new`, but takes an expectation along with the parameters. The expectation is
    /// not used: the node is always initialized consistently with `a` and `b`. A notice is
    /// logged so that callers who expected a warm start can see it.
    pub fn with_expectation<A, B, E>(
        dim: D,
        a: A,
        b: B,
        _expectation: E,
    ) -> StatsResult<BetaDistribution<D>>
    where
        A: IntoParameter<D>,
        B: IntoParameter<D>,
        E: IntoParameter<D>,
    {
        info!(
            "The expectation of the Beta distribution is initialized consistently with the provided parameters (not with the provided expectation)"
        );
        BetaDistribution::new(dim, a, b)
    }

    /// The current shape parameters
    pub fn parameters(&self) -> &BetaParameters<D> {
        &self.params
    }

    /// The current expectations
    pub fn expectations(&self) -> &BetaExpectations<D> {
        &self.expectations
    }

    /// Recomputes `E[x]`, `E[ln x]` and `E[ln(1-x)]` from the current parameters.
    pub fn update_expectations(&mut self) {
        self.expectations = BetaExpectations::from_parameters(&self.params);
    }

    /// Replaces both shapes and refreshes the expectations.
    /// On error the node is left untouched.
    pub fn set_parameters<A, B>(&mut self, a: A, b: B) -> StatsResult<()>
    where
        A: IntoParameter<D>,
        B: IntoParameter<D>,
    {
        let params = BetaParameters {
            a: a.into_parameter("a", &self.dim)?,
            b: b.into_parameter("b", &self.dim)?,
        };
        self.params = params;
        self.update_expectations();
        Ok(())
    }

    /// Hands the parameters to `update` for an in place step, then refreshes the expectations.
    /// If `update` reshapes either array the step is rejected and the node is left untouched.
    pub fn update_parameters<F>(&mut self, update: F) -> StatsResult<()>
    where
        F: FnOnce(&mut BetaParameters<D>),
    {
        let mut params = self.params.clone();
        update(&mut params);
        for &(name, param) in [("a", &params.a), ("b", &params.b)].iter() {
            if param.raw_dim() != self.dim {
                return Err(DistributionError::DimensionMismatch {
                    name,
                    expected: self.dim.slice().to_vec(),
                    found: param.shape().to_vec(),
                }
                .into());
            }
        }
        self.params = params;
        self.update_expectations();
        Ok(())
    }

    /// Draws one variate per entry. The output has the node's dimension.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> StatsResult<Array<f64, D>> {
        let mut draws = Array::zeros(self.dim.clone());
        for ((draw, &a), &b) in draws
            .iter_mut()
            .zip(self.params.a.iter())
            .zip(self.params.b.iter())
        {
            *draw = BetaSampler::new(a, b)?.sample(rng);
        }
        Ok(draws)
    }

    /// Draws `n` independent variates per entry, stacked along a new leading axis of length `n`.
    pub fn sample_n<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> StatsResult<Array<f64, D::Larger>> {
        let samplers = self
            .params
            .a
            .iter()
            .zip(self.params.b.iter())
            .map(|(&a, &b)| BetaSampler::new(a, b))
            .collect::<Result<Vec<BetaSampler<f64>>, _>>()?;

        let mut shape = self.params.a.view().insert_axis(Axis(0)).raw_dim();
        shape[0] = n;

        let mut draws = Vec::with_capacity(n * samplers.len());
        for _ in 0..n {
            for sampler in samplers.iter() {
                draws.push(sampler.sample(rng));
            }
        }
        Ok(Array::from_shape_vec(shape, draws)?)
    }

    /// `var[x] = a*b / ((a+b)^2 * (a+b+1))`
    pub fn variance(&self) -> Array<f64, D> {
        Zip::from(&self.params.a)
            .and(&self.params.b)
            .map_collect(|&a, &b| {
                let total = a + b;
                a * b / (total * total * (total + 1.0))
            })
    }

    /// Log density of each entry at the matching entry of `x`. A scalar `x` is evaluated at
    /// every entry. Points outside of `[0, 1]` get negative infinity.
    pub fn ln_pdf<P: IntoParameter<D>>(&self, x: P) -> StatsResult<Array<f64, D>> {
        let x = x.into_parameter("x", &self.dim)?;
        Ok(Zip::from(&x)
            .and(&self.params.a)
            .and(&self.params.b)
            .map_collect(|&x, &a, &b| ln_pdf_scalar(x, a, b)))
    }

    /// Differential entropy of each entry,
    /// `ln B(a,b) - (a-1)digamma(a) - (b-1)digamma(b) + (a+b-2)digamma(a+b)`
    pub fn entropy(&self) -> Array<f64, D> {
        Zip::from(&self.params.a)
            .and(&self.params.b)
            .map_collect(|&a, &b| {
                ln_beta(a, b) - (a - 1.0) * digamma(a) - (b - 1.0) * digamma(b)
                    + (a + b - 2.0) * digamma(a + b)
            })
    }

    /// KL(self || other) for each pair of entries.
    /// from <http://bariskurt.com/kullback-leibler-divergence-between-two-dirichlet-and-beta-distributions/>
    pub fn kl_divergence(&self, other: &BetaDistribution<D>) -> StatsResult<Array<f64, D>> {
        if self.dim != other.dim {
            return Err(DistributionError::DimensionMismatch {
                name: "other",
                expected: self.dim.slice().to_vec(),
                found: other.dim.slice().to_vec(),
            }
            .into());
        }
        Ok(Zip::from(&self.params.a)
            .and(&self.params.b)
            .and(&other.params.a)
            .and(&other.params.b)
            .map_collect(|&a, &b, &other_a, &other_b| {
                let kld = ln_beta(other_a, other_b) - ln_beta(a, b)
                    + (a - other_a) * digamma(a)
                    + (b - other_b) * digamma(b)
                    + (other_a - a + other_b - b) * digamma(a + b);
                // for floating point errors, sometimes this is -0.000000001
                if kld < 0.0 {
                    0.0
                } else {
                    kld
                }
            }))
    }
}
