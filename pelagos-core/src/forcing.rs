//! Forcing objects: user reaction terms wrapped for per-cell evaluation.
//!
//! A [`Forcing`] carries a user function, an immutable parameter bundle, and
//! (for the continuous form) the ordered list of field names the function
//! depends on. The two forms correspond to the two evaluation idioms:
//! continuous forcings are expressed in physical coordinates and time, with
//! dependency values gathered for them; discrete forcings index the field
//! set themselves.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use crate::clock::{Clock, Time};
use crate::field::{FieldSet, FloatValue};
use crate::grid::RectilinearGrid;

/// An immutable, named, read-only parameter bundle passed through to user
/// functions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters {
    values: IndexMap<String, FloatValue>,
}

impl Parameters {
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Add a named value, consuming and returning the bundle.
    pub fn with(mut self, name: impl Into<String>, value: FloatValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<FloatValue> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Signature of a continuous-form reaction term: physical cell-center
/// coordinates, simulation time, dependency values in declared order, and
/// the forcing's parameters.
pub type ContinuousFn =
    dyn Fn(FloatValue, FloatValue, FloatValue, Time, &[FloatValue], &Parameters) -> FloatValue
        + Send
        + Sync;

/// Signature of a discrete-form reaction term: grid indices plus direct
/// access to the grid, clock, and full field set.
pub type DiscreteFn = dyn Fn(usize, usize, usize, &RectilinearGrid, &Clock, &FieldSet, &Parameters) -> FloatValue
    + Send
    + Sync;

/// Evaluation form of a [`Forcing`], selected at configuration time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForcingForm {
    Continuous,
    Discrete,
}

/// A reaction term expressed in physical coordinates and time.
#[derive(Clone)]
pub struct ContinuousForcing {
    func: Arc<ContinuousFn>,
    parameters: Parameters,
    dependencies: Vec<String>,
}

impl ContinuousForcing {
    /// Field names this forcing depends on; their values are passed to the
    /// user function in exactly this order.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Evaluate at cell `(i, j, k)`: map the indices to physical cell-center
    /// coordinates, gather each declared dependency at the cell in declared
    /// order, and invoke the user function.
    ///
    /// Panics if a declared dependency is missing from `fields`; validation
    /// rules this out before stepping begins.
    pub fn evaluate(
        &self,
        (i, j, k): (usize, usize, usize),
        grid: &RectilinearGrid,
        clock: &Clock,
        fields: &FieldSet,
    ) -> FloatValue {
        let (x, y, z) = grid.cell_center(i, j, k);
        let values: SmallVec<[FloatValue; 8]> = self
            .dependencies
            .iter()
            .map(|name| fields.value(name, i, j, k))
            .collect();
        (self.func)(x, y, z, clock.time(), &values, &self.parameters)
    }
}

impl fmt::Debug for ContinuousForcing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuousForcing")
            .field("dependencies", &self.dependencies)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// A reaction term with direct stencil access to the field set.
#[derive(Clone)]
pub struct DiscreteForcing {
    func: Arc<DiscreteFn>,
    parameters: Parameters,
}

impl DiscreteForcing {
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Invoke the user function directly; no coordinate extraction or value
    /// gathering is performed.
    pub fn evaluate(
        &self,
        (i, j, k): (usize, usize, usize),
        grid: &RectilinearGrid,
        clock: &Clock,
        fields: &FieldSet,
    ) -> FloatValue {
        (self.func)(i, j, k, grid, clock, fields, &self.parameters)
    }
}

impl fmt::Debug for DiscreteForcing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscreteForcing")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// A user reaction term plus its parameters and declared dependencies,
/// immutable once built.
#[derive(Clone, Debug)]
pub enum Forcing {
    Continuous(ContinuousForcing),
    Discrete(DiscreteForcing),
}

impl Forcing {
    /// Continuous-form forcing over the named field dependencies.
    ///
    /// The order of `dependencies` is exactly the order of the values slice
    /// the function receives.
    pub fn continuous<I, S, F>(dependencies: I, func: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(FloatValue, FloatValue, FloatValue, Time, &[FloatValue], &Parameters) -> FloatValue
            + Send
            + Sync
            + 'static,
    {
        Self::Continuous(ContinuousForcing {
            func: Arc::new(func),
            parameters: Parameters::new(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        })
    }

    /// Discrete-form forcing indexing the field set itself.
    pub fn discrete<F>(func: F) -> Self
    where
        F: Fn(usize, usize, usize, &RectilinearGrid, &Clock, &FieldSet, &Parameters) -> FloatValue
            + Send
            + Sync
            + 'static,
    {
        Self::Discrete(DiscreteForcing {
            func: Arc::new(func),
            parameters: Parameters::new(),
        })
    }

    /// Attach a parameter bundle.
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        match &mut self {
            Forcing::Continuous(forcing) => forcing.parameters = parameters,
            Forcing::Discrete(forcing) => forcing.parameters = parameters,
        }
        self
    }

    pub fn form(&self) -> ForcingForm {
        match self {
            Forcing::Continuous(_) => ForcingForm::Continuous,
            Forcing::Discrete(_) => ForcingForm::Discrete,
        }
    }

    /// Declared field dependencies (always empty for the discrete form).
    pub fn dependencies(&self) -> &[String] {
        match self {
            Forcing::Continuous(forcing) => &forcing.dependencies,
            Forcing::Discrete(_) => &[],
        }
    }

    pub fn parameters(&self) -> &Parameters {
        match self {
            Forcing::Continuous(forcing) => &forcing.parameters,
            Forcing::Discrete(forcing) => &forcing.parameters,
        }
    }
}
