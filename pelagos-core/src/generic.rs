//! A ready-made reaction model driven entirely by user-supplied per-tracer
//! functions, advection schemes, and drift speeds.

use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::{ConfigResult, ConfigurationError};
use crate::field::FloatValue;
use crate::forcing::Forcing;
use crate::grid::{AdvectionScheme, DriftVelocity};
use crate::reaction::ReactionModel;

/// Reaction model assembled from per-tracer forcings.
///
/// Built once through [`GenericTracerReactionBuilder`] and immutable
/// thereafter. The declared tracer order is preserved exactly; forcings and
/// drift velocities are looked up by tracer name in an ordinary associative
/// table.
#[derive(Clone, Debug)]
pub struct GenericTracerReaction {
    tracers: Vec<String>,
    auxiliary_fields: Vec<String>,
    forcings: IndexMap<String, Forcing>,
    drift_velocities: IndexMap<String, DriftVelocity>,
    scheme_overrides: IndexMap<String, AdvectionScheme>,
    default_scheme: AdvectionScheme,
}

impl GenericTracerReaction {
    /// Start building a model over the given tracer names.
    pub fn builder<I, S>(tracers: I) -> GenericTracerReactionBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GenericTracerReactionBuilder::new(tracers)
    }
}

impl ReactionModel for GenericTracerReaction {
    fn required_tracers(&self) -> &[String] {
        &self.tracers
    }

    fn required_auxiliary_fields(&self) -> &[String] {
        &self.auxiliary_fields
    }

    fn drift_velocity(&self, tracer: &str) -> Option<&DriftVelocity> {
        self.drift_velocities.get(tracer)
    }

    fn advection_scheme(&self, tracer: &str) -> Option<AdvectionScheme> {
        // A scheme is only meaningful for tracers with drift transport.
        if !self.drift_velocities.contains_key(tracer) {
            return None;
        }
        Some(
            self.scheme_overrides
                .get(tracer)
                .copied()
                .unwrap_or(self.default_scheme),
        )
    }

    fn forcing(&self, tracer: &str) -> Option<&Forcing> {
        self.forcings.get(tracer)
    }
}

/// Builder for [`GenericTracerReaction`].
///
/// [`build`](GenericTracerReactionBuilder::build) cross-checks every
/// configured name against the declared tracer list and every continuous
/// dependency against the declared tracers and auxiliary fields, so a
/// misspelled name fails the model build instead of being silently ignored.
#[derive(Clone, Debug, Default)]
pub struct GenericTracerReactionBuilder {
    tracers: Vec<String>,
    auxiliary_fields: Vec<String>,
    forcings: IndexMap<String, Forcing>,
    drift_velocities: IndexMap<String, DriftVelocity>,
    scheme_overrides: IndexMap<String, AdvectionScheme>,
    default_scheme: AdvectionScheme,
}

impl GenericTracerReactionBuilder {
    pub fn new<I, S>(tracers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tracers: tracers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Install `forcing` as the reaction term for `tracer`.
    pub fn with_transition(&mut self, tracer: impl Into<String>, forcing: Forcing) -> &mut Self {
        self.forcings.insert(tracer.into(), forcing);
        self
    }

    /// Expand a positive settling speed into downward drift `(0, 0, -speed)`.
    pub fn with_drift_speed(&mut self, tracer: impl Into<String>, speed: FloatValue) -> &mut Self {
        self.drift_velocities
            .insert(tracer.into(), DriftVelocity::sinking(speed));
        self
    }

    /// Supply a full three-component drift velocity directly.
    pub fn with_drift_velocity(
        &mut self,
        tracer: impl Into<String>,
        velocity: DriftVelocity,
    ) -> &mut Self {
        self.drift_velocities.insert(tracer.into(), velocity);
        self
    }

    /// Advection scheme used for every drift-transported tracer without a
    /// per-tracer override.
    pub fn with_advection_scheme(&mut self, scheme: AdvectionScheme) -> &mut Self {
        self.default_scheme = scheme;
        self
    }

    /// Override the advection scheme for one tracer.
    pub fn with_tracer_advection_scheme(
        &mut self,
        tracer: impl Into<String>,
        scheme: AdvectionScheme,
    ) -> &mut Self {
        self.scheme_overrides.insert(tracer.into(), scheme);
        self
    }

    /// Declare an auxiliary field the transitions may depend on.
    pub fn with_auxiliary_field(&mut self, name: impl Into<String>) -> &mut Self {
        self.auxiliary_fields.push(name.into());
        self
    }

    pub fn with_auxiliary_fields<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auxiliary_fields
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Cross-check the declared names and assemble the model.
    pub fn build(&self) -> ConfigResult<GenericTracerReaction> {
        for (idx, tracer) in self.tracers.iter().enumerate() {
            if self.tracers[..idx].contains(tracer) {
                return Err(ConfigurationError::DuplicateTracer {
                    tracer: tracer.clone(),
                });
            }
        }
        for (idx, name) in self.auxiliary_fields.iter().enumerate() {
            if self.auxiliary_fields[..idx].contains(name) || self.tracers.contains(name) {
                return Err(ConfigurationError::DuplicateAuxiliaryField { name: name.clone() });
            }
        }

        for tracer in self.forcings.keys() {
            if !self.tracers.contains(tracer) {
                return Err(ConfigurationError::UndeclaredTransition {
                    tracer: tracer.clone(),
                    declared: self.tracers.clone(),
                });
            }
        }
        for tracer in self.drift_velocities.keys() {
            if !self.tracers.contains(tracer) {
                return Err(ConfigurationError::UndeclaredDriftSpeed {
                    tracer: tracer.clone(),
                    declared: self.tracers.clone(),
                });
            }
        }
        for tracer in self.scheme_overrides.keys() {
            if !self.tracers.contains(tracer) {
                return Err(ConfigurationError::UndeclaredAdvectionScheme {
                    tracer: tracer.clone(),
                    declared: self.tracers.clone(),
                });
            }
        }

        // Every continuous dependency must resolve to a declared field.
        for (tracer, forcing) in &self.forcings {
            for dependency in forcing.dependencies() {
                if !self.tracers.contains(dependency)
                    && !self.auxiliary_fields.contains(dependency)
                {
                    return Err(ConfigurationError::UnknownDependency {
                        tracer: tracer.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        for tracer in &self.tracers {
            if !self.forcings.contains_key(tracer) && !self.drift_velocities.contains_key(tracer) {
                warn!(
                    "tracer '{}' has no transition or drift configured; its transition will be zero",
                    tracer
                );
            }
        }

        debug!(
            "built generic tracer reaction over {} tracer(s), {} auxiliary field(s)",
            self.tracers.len(),
            self.auxiliary_fields.len()
        );

        Ok(GenericTracerReaction {
            tracers: self.tracers.clone(),
            auxiliary_fields: self.auxiliary_fields.clone(),
            forcings: self.forcings.clone(),
            drift_velocities: self.drift_velocities.clone(),
            scheme_overrides: self.scheme_overrides.clone(),
            default_scheme: self.default_scheme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_forcing(dependencies: &[&str]) -> Forcing {
        Forcing::continuous(dependencies.to_vec(), |_, _, _, _, _, _| 0.0)
    }

    #[test]
    fn declared_order_is_preserved() {
        let model = GenericTracerReaction::builder(["P", "Z"])
            .with_transition("P", zero_forcing(&["P"]))
            .with_transition("Z", zero_forcing(&["Z"]))
            .build()
            .unwrap();
        assert_eq!(model.required_tracers(), ["P", "Z"]);
    }

    #[test]
    fn auxiliary_fields_are_declared_separately() {
        let model = GenericTracerReaction::builder(["P"])
            .with_auxiliary_field("light")
            .with_transition("P", zero_forcing(&["P", "light"]))
            .build()
            .unwrap();
        assert_eq!(model.required_auxiliary_fields(), ["light"]);
    }

    #[test]
    fn undeclared_transition_is_rejected() {
        let err = GenericTracerReaction::builder(["P"])
            .with_transition("Q", zero_forcing(&[]))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::UndeclaredTransition { tracer, .. } if tracer == "Q"
        ));
    }

    #[test]
    fn undeclared_drift_speed_is_rejected() {
        let err = GenericTracerReaction::builder(["P"])
            .with_drift_speed("Q", 1.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::UndeclaredDriftSpeed { tracer, .. } if tracer == "Q"
        ));
    }

    #[test]
    fn unknown_dependency_is_rejected() {
        let err = GenericTracerReaction::builder(["P"])
            .with_transition("P", zero_forcing(&["P", "light"]))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::UnknownDependency { dependency, .. } if dependency == "light"
        ));
    }

    #[test]
    fn duplicate_tracer_is_rejected() {
        let err = GenericTracerReaction::builder(["P", "P"]).build().unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateTracer { .. }));
    }

    #[test]
    fn drift_speed_maps_to_downward_velocity() {
        let model = GenericTracerReaction::builder(["P"])
            .with_drift_speed("P", 2.5)
            .build()
            .unwrap();
        assert_eq!(
            model.drift_velocity("P"),
            Some(&DriftVelocity::new(0.0, 0.0, -2.5))
        );
        assert_eq!(model.drift_velocity("Z"), None);
    }

    #[test]
    fn scheme_applies_only_to_drifting_tracers() {
        let model = GenericTracerReaction::builder(["P", "Z"])
            .with_drift_speed("P", 1.0)
            .with_advection_scheme(AdvectionScheme::Centered)
            .build()
            .unwrap();
        assert_eq!(model.advection_scheme("P"), Some(AdvectionScheme::Centered));
        // Z has no drift, so no scheme is reported for it.
        assert_eq!(model.advection_scheme("Z"), None);
    }

    #[test]
    fn per_tracer_scheme_overrides_the_default() {
        let model = GenericTracerReaction::builder(["P", "D"])
            .with_drift_speed("P", 1.0)
            .with_drift_speed("D", 2.0)
            .with_tracer_advection_scheme("D", AdvectionScheme::Centered)
            .build()
            .unwrap();
        assert_eq!(model.advection_scheme("P"), Some(AdvectionScheme::Upwind));
        assert_eq!(model.advection_scheme("D"), Some(AdvectionScheme::Centered));
    }
}
