//! Reaction models and the per-cell transition evaluator.

use crate::clock::Clock;
use crate::field::{FieldSet, FloatValue};
use crate::forcing::Forcing;
use crate::grid::{AdvectionScheme, DriftVelocity, RectilinearGrid};

/// A reaction model attached to the host solver.
///
/// Implementations declare the tracer and auxiliary fields they need and
/// provide per-tracer forcings plus optional drift transport. Absence of a
/// capability is an explicit `None`, never an implicit fallback: a model
/// with no drift for a tracer returns `None` from [`drift_velocity`], and a
/// model with no reaction term returns `None` from [`forcing`] (which the
/// evaluator treats as a term of zero).
///
/// A model is constructed exactly once, at model-build time, and is
/// immutable thereafter.
///
/// [`drift_velocity`]: ReactionModel::drift_velocity
/// [`forcing`]: ReactionModel::forcing
pub trait ReactionModel: Send + Sync {
    /// Tracer names this model requires, in declared order.
    fn required_tracers(&self) -> &[String];

    /// Auxiliary field names this model requires, in declared order.
    fn required_auxiliary_fields(&self) -> &[String];

    /// Drift velocity for `tracer`, if transport beyond the bulk flow is
    /// configured.
    fn drift_velocity(&self, tracer: &str) -> Option<&DriftVelocity>;

    /// Advection scheme for `tracer`'s drift transport, if one was chosen.
    fn advection_scheme(&self, tracer: &str) -> Option<AdvectionScheme>;

    /// Reaction term for `tracer`, if one was configured.
    fn forcing(&self, tracer: &str) -> Option<&Forcing>;
}

/// The empty reaction model: no required fields, no drift, and a transition
/// of zero for every tracer, cell, and time.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoReaction;

impl ReactionModel for NoReaction {
    fn required_tracers(&self) -> &[String] {
        &[]
    }

    fn required_auxiliary_fields(&self) -> &[String] {
        &[]
    }

    fn drift_velocity(&self, _tracer: &str) -> Option<&DriftVelocity> {
        None
    }

    fn advection_scheme(&self, _tracer: &str) -> Option<AdvectionScheme> {
        None
    }

    fn forcing(&self, _tracer: &str) -> Option<&Forcing> {
        None
    }
}

/// Right-hand-side contribution of `model` for one tracer at one cell,
/// beyond the ambient advection-diffusion the host applies to every tracer
/// uniformly.
///
/// The reaction value comes from the tracer's forcing, dispatched on its
/// form (zero when none is configured). When a drift velocity is
/// configured, the flux divergence of (drift x tracer) under the tracer's
/// advection scheme is subtracted: a net outflow reduces local
/// concentration. A drift-transported tracer without a chosen scheme falls
/// back to the host default ([`AdvectionScheme::default`]).
///
/// Pure function of its inputs: nothing is mutated and identical inputs
/// yield identical results, so calls may run in parallel over
/// `(tracer, i, j, k)` without synchronization.
///
/// # Panics
///
/// Panics if a drift velocity is configured for a tracer absent from
/// `fields`, or if a continuous forcing declares a dependency absent from
/// `fields`. Both are programmer errors that
/// [`validate_field_sets`](crate::validate::validate_field_sets) rules out
/// before stepping begins.
pub fn evaluate_transition(
    model: &dyn ReactionModel,
    tracer: &str,
    (i, j, k): (usize, usize, usize),
    grid: &RectilinearGrid,
    clock: &Clock,
    fields: &FieldSet,
) -> FloatValue {
    let reaction = match model.forcing(tracer) {
        None => 0.0,
        Some(Forcing::Continuous(forcing)) => forcing.evaluate((i, j, k), grid, clock, fields),
        Some(Forcing::Discrete(forcing)) => forcing.evaluate((i, j, k), grid, clock, fields),
    };

    match model.drift_velocity(tracer) {
        None => reaction,
        Some(drift) => {
            let scheme = model.advection_scheme(tracer).unwrap_or_default();
            let field = fields
                .get(tracer)
                .unwrap_or_else(|| panic!("no tracer field named '{}'", tracer));
            reaction - grid.div_drift_flux(scheme, drift, field, i, j, k)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::generic::GenericTracerReaction;
    use is_close::is_close;

    fn grid() -> RectilinearGrid {
        RectilinearGrid::new((1, 1, 4), (1.0, 1.0, 4.0))
    }

    fn fields(grid: &RectilinearGrid) -> FieldSet {
        let mut fields = FieldSet::new();
        fields.insert("P", Field::from_fn(grid, |_, _, z| 1.0 + z * z));
        fields
    }

    #[test]
    fn no_reaction_is_zero_everywhere() {
        let grid = grid();
        let fields = fields(&grid);
        for k in 0..4 {
            let result =
                evaluate_transition(&NoReaction, "P", (0, 0, k), &grid, &Clock::new(3.0), &fields);
            assert_eq!(result, 0.0);
        }
    }

    #[test]
    fn reaction_without_drift_is_the_forcing_value() {
        let grid = grid();
        let fields = fields(&grid);
        let model = GenericTracerReaction::builder(["P"])
            .with_transition("P", Forcing::continuous(["P"], |_, _, _, _, v, _| 2.0 * v[0]))
            .build()
            .unwrap();

        let result = evaluate_transition(&model, "P", (0, 0, 1), &grid, &Clock::new(0.0), &fields);
        // cell (0, 0, 1) is at z = -2.5, so P = 1 + 6.25
        assert!(is_close!(result, 2.0 * 7.25));
    }

    #[test]
    fn drift_subtracts_flux_divergence() {
        let grid = grid();
        let fields = fields(&grid);
        let speed = 0.5;
        let model = GenericTracerReaction::builder(["P"])
            .with_transition("P", Forcing::continuous(["P"], |_, _, _, _, v, _| v[0]))
            .with_drift_speed("P", speed)
            .build()
            .unwrap();

        let (i, j, k) = (0, 0, 2);
        let p = |k: usize| fields.value("P", 0, 0, k);
        // Upwind with w < 0: each face carries the value of the cell above it.
        let divergence = (-speed * p(k + 1) - -speed * p(k)) / 1.0;
        let expected = p(k) - divergence;

        let result = evaluate_transition(&model, "P", (i, j, k), &grid, &Clock::new(0.0), &fields);
        assert!(is_close!(result, expected));
    }

    #[test]
    fn evaluation_is_pure() {
        let grid = grid();
        let fields = fields(&grid);
        let model = GenericTracerReaction::builder(["P"])
            .with_transition(
                "P",
                Forcing::continuous(["P"], |_, _, z, t, v, _| v[0] * (z + t).sin()),
            )
            .with_drift_speed("P", 1e-4)
            .build()
            .unwrap();

        let clock = Clock::new(12.25);
        let first = evaluate_transition(&model, "P", (0, 0, 1), &grid, &clock, &fields);
        let second = evaluate_transition(&model, "P", (0, 0, 1), &grid, &clock, &fields);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    #[should_panic(expected = "no tracer field named")]
    fn drift_for_missing_tracer_panics() {
        let grid = grid();
        let fields = FieldSet::new();
        let model = GenericTracerReaction::builder(["P"])
            .with_drift_speed("P", 1.0)
            .build()
            .unwrap();
        evaluate_transition(&model, "P", (0, 0, 0), &grid, &Clock::new(0.0), &fields);
    }
}
