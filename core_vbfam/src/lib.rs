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

//! # Distribution bookkeeping
//!
//! Every node of a variational model holds a handful of parameter and expectation arrays
//! that all share the node's dimension. This crate carries the part every node has in common:
//! it knows its dimension, it can list the arrays it holds, and it can check that they agree.
//!
//! Parameters can be handed over as a scalar or as any array that broadcasts to the node's
//! dimension, see [`IntoParameter`].

use ndarray::{Array, ArrayBase, Data, Dimension};

pub mod errors;
pub use errors::{DistributionError, DistributionResult};

/// The base capability of a distribution node: dimension bookkeeping.
pub trait Distribution {
    /// The shape descriptor of the node, `Ix1` for a vector of independent variables,
    /// `IxDyn` for an arbitrary tensor.
    type Dim: Dimension;

    /// The dimension fixed at construction.
    fn dim(&self) -> &Self::Dim;

    /// Names and shapes of all the arrays this node holds.
    fn held_shapes(&self) -> Vec<(&'static str, &[usize])>;

    /// Checks that every held array has the shape of the node's dimension.
    /// Reports the first array that disagrees.
    fn check_dimensionalities(&self) -> DistributionResult<()> {
        let expected = self.dim().slice();
        for (name, shape) in self.held_shapes() {
            if shape != expected {
                return Err(DistributionError::DimensionMismatch {
                    name,
                    expected: expected.to_vec(),
                    found: shape.to_vec(),
                });
            }
        }
        Ok(())
    }
}

/// Something that can be materialized into a full `f64` array of a given dimension.
///
/// Scalars fill the array, arrays are broadcast with the usual numpy rules. An array that
/// can't be broadcast is a [`DistributionError::DimensionMismatch`].
pub trait IntoParameter<D: Dimension> {
    /// Builds the owned array. `name` is only used for the error.
    fn into_parameter(self, name: &'static str, dim: &D) -> DistributionResult<Array<f64, D>>;
}

impl<D: Dimension> IntoParameter<D> for f64 {
    fn into_parameter(self, _name: &'static str, dim: &D) -> DistributionResult<Array<f64, D>> {
        Ok(Array::from_elem(dim.clone(), self))
    }
}

impl<'a, S, E, D> IntoParameter<D> for &'a ArrayBase<S, E>
where
    S: Data<Elem = f64>,
    E: Dimension,
    D: Dimension,
{
    fn into_parameter(self, name: &'static str, dim: &D) -> DistributionResult<Array<f64, D>> {
        match self.broadcast(dim.clone()) {
            Some(view) => Ok(view.to_owned()),
            None => Err(DistributionError::DimensionMismatch {
                name,
                expected: dim.slice().to_vec(),
                found: self.shape().to_vec(),
            }),
        }
    }
}

impl<S, E, D> IntoParameter<D> for ArrayBase<S, E>
where
    S: Data<Elem = f64>,
    E: Dimension,
    D: Dimension,
{
    fn into_parameter(self, name: &'static str, dim: &D) -> DistributionResult<Array<f64, D>> {
        (&self).into_parameter(name, dim)
    }
}
