//! Light-limited plankton models, continuous form.
//!
//! The single-tracer model grows phytoplankton on exponentially attenuated
//! surface light and removes it through linear mortality and particulate
//! sinking. The NPZ model couples a nutrient and a zooplankton pool to the
//! same growth term; everything leaving one pool enters another, so the
//! three transitions sum to zero at every cell.

use pelagos_core::error::ConfigResult;
use pelagos_core::field::FloatValue;
use pelagos_core::forcing::{Forcing, Parameters};
use pelagos_core::generic::GenericTracerReaction;
use serde::{Deserialize, Serialize};

// Tracer name constants shared with the host configuration.
pub const TRACER_NUTRIENT: &str = "N";
pub const TRACER_PLANKTON: &str = "P";
pub const TRACER_ZOOPLANKTON: &str = "Z";

/// Parameters for the single-tracer plankton model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanktonParameters {
    /// Maximum growth rate at the surface.
    /// unit: 1 / s
    pub mu0: FloatValue,
    /// e-folding depth of light availability.
    /// unit: m
    pub lambda: FloatValue,
    /// Linear mortality rate.
    /// unit: 1 / s
    pub mortality: FloatValue,
    /// Settling speed, positive downward.
    /// unit: m / s
    pub sinking_speed: FloatValue,
}

/// Growth minus mortality for plankton concentration `p` at depth `z`.
pub fn plankton_growth(
    parameters: &PlanktonParameters,
    z: FloatValue,
    p: FloatValue,
) -> FloatValue {
    parameters.mu0 * (z / parameters.lambda).exp() * p - parameters.mortality * p
}

/// Single-tracer plankton model: light-limited growth, linear mortality and
/// particulate sinking.
pub fn plankton_model(parameters: &PlanktonParameters) -> ConfigResult<GenericTracerReaction> {
    let captured = parameters.clone();
    let transition = Forcing::continuous([TRACER_PLANKTON], move |_x, _y, z, _t, values, _p| {
        plankton_growth(&captured, z, values[0])
    })
    .with_parameters(
        Parameters::new()
            .with("mu0", parameters.mu0)
            .with("lambda", parameters.lambda)
            .with("mortality", parameters.mortality),
    );

    let mut builder = GenericTracerReaction::builder([TRACER_PLANKTON]);
    builder.with_transition(TRACER_PLANKTON, transition);
    if parameters.sinking_speed != 0.0 {
        builder.with_drift_speed(TRACER_PLANKTON, parameters.sinking_speed);
    }
    builder.build()
}

/// Parameters for the nutrient-phytoplankton-zooplankton model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpzParameters {
    /// Maximum phytoplankton growth rate at the surface.
    /// unit: 1 / s
    pub mu0: FloatValue,
    /// e-folding depth of light availability.
    /// unit: m
    pub lambda: FloatValue,
    /// Half-saturation nutrient concentration.
    /// unit: mmol / m^3
    pub half_saturation: FloatValue,
    /// Grazing rate.
    /// unit: m^3 / (mmol s)
    pub grazing: FloatValue,
    /// Assimilated fraction of grazed material; the rest is returned to the
    /// nutrient pool.
    /// unit: dimensionless
    pub assimilation: FloatValue,
    /// Phytoplankton mortality.
    /// unit: 1 / s
    pub phytoplankton_mortality: FloatValue,
    /// Zooplankton mortality.
    /// unit: 1 / s
    pub zooplankton_mortality: FloatValue,
}

/// Nutrient-limited, light-limited growth and grazing rates at depth `z`.
fn npz_rates(
    parameters: &NpzParameters,
    z: FloatValue,
    n: FloatValue,
    p: FloatValue,
    zo: FloatValue,
) -> (FloatValue, FloatValue) {
    let growth =
        parameters.mu0 * (z / parameters.lambda).exp() * n / (n + parameters.half_saturation) * p;
    let grazed = parameters.grazing * p * zo;
    (growth, grazed)
}

/// Three-tracer NPZ model.
///
/// Every transition declares the dependencies `[N, P, Z]` in the same
/// order, and the three terms sum to zero at every cell (mass moves between
/// pools, it does not appear or vanish).
pub fn npz_model(parameters: &NpzParameters) -> ConfigResult<GenericTracerReaction> {
    let deps = [TRACER_NUTRIENT, TRACER_PLANKTON, TRACER_ZOOPLANKTON];

    let captured = parameters.clone();
    let nutrient = Forcing::continuous(deps, move |_, _, z, _, v, _| {
        let (growth, grazed) = npz_rates(&captured, z, v[0], v[1], v[2]);
        -growth
            + (1.0 - captured.assimilation) * grazed
            + captured.phytoplankton_mortality * v[1]
            + captured.zooplankton_mortality * v[2]
    });

    let captured = parameters.clone();
    let phytoplankton = Forcing::continuous(deps, move |_, _, z, _, v, _| {
        let (growth, grazed) = npz_rates(&captured, z, v[0], v[1], v[2]);
        growth - grazed - captured.phytoplankton_mortality * v[1]
    });

    let captured = parameters.clone();
    let zooplankton = Forcing::continuous(deps, move |_, _, z, _, v, _| {
        let (_, grazed) = npz_rates(&captured, z, v[0], v[1], v[2]);
        captured.assimilation * grazed - captured.zooplankton_mortality * v[2]
    });

    GenericTracerReaction::builder([TRACER_NUTRIENT, TRACER_PLANKTON, TRACER_ZOOPLANKTON])
        .with_transition(TRACER_NUTRIENT, nutrient)
        .with_transition(TRACER_PLANKTON, phytoplankton)
        .with_transition(TRACER_ZOOPLANKTON, zooplankton)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;
    use pelagos_core::clock::Clock;
    use pelagos_core::field::{Field, FieldSet};
    use pelagos_core::grid::RectilinearGrid;
    use pelagos_core::reaction::{evaluate_transition, ReactionModel};
    use pelagos_core::validate::validate_field_sets;

    fn parameters() -> PlanktonParameters {
        PlanktonParameters {
            mu0: 1e-5,
            lambda: 5.0,
            mortality: 2e-6,
            sinking_speed: 0.0,
        }
    }

    #[test]
    fn growth_formula() {
        let params = parameters();
        let z = -10.0;
        let p = 0.5;
        let expected = 1e-5 * (-2.0_f64).exp() * 0.5 - 2e-6 * 0.5;
        assert!(is_close!(plankton_growth(&params, z, p), expected));
    }

    #[test]
    fn model_requires_only_the_plankton_tracer() {
        let model = plankton_model(&parameters()).unwrap();
        assert_eq!(model.required_tracers(), [TRACER_PLANKTON]);
        assert!(model.required_auxiliary_fields().is_empty());
        assert!(model.drift_velocity(TRACER_PLANKTON).is_none());
    }

    #[test]
    fn transition_matches_the_growth_formula() {
        let grid = RectilinearGrid::new((2, 2, 4), (100.0, 100.0, 20.0));
        let model = plankton_model(&parameters()).unwrap();

        let mut tracers = FieldSet::new();
        tracers.insert(TRACER_PLANKTON, Field::from_fn(&grid, |_, _, z| (z / 10.0).exp()));
        let (tracers, _) =
            validate_field_sets(tracers, FieldSet::new(), &model, &grid).unwrap();

        let (i, j, k) = (1, 0, 2);
        let (_, _, z) = grid.cell_center(i, j, k);
        let p = tracers.value(TRACER_PLANKTON, i, j, k);
        let result = evaluate_transition(
            &model,
            TRACER_PLANKTON,
            (i, j, k),
            &grid,
            &Clock::new(0.0),
            &tracers,
        );
        assert!(is_close!(result, plankton_growth(&parameters(), z, p)));
    }

    #[test]
    fn npz_declares_tracers_in_order() {
        let model = npz_model(&NpzParameters {
            mu0: 1e-5,
            lambda: 5.0,
            half_saturation: 0.3,
            grazing: 1e-5,
            assimilation: 0.7,
            phytoplankton_mortality: 2e-6,
            zooplankton_mortality: 1e-6,
        })
        .unwrap();
        assert_eq!(
            model.required_tracers(),
            [TRACER_NUTRIENT, TRACER_PLANKTON, TRACER_ZOOPLANKTON]
        );
    }
}
