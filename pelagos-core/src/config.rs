//! Declarative configuration for generic tracer reactions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::field::FloatValue;
use crate::forcing::Parameters;
use crate::generic::GenericTracerReactionBuilder;
use crate::grid::AdvectionScheme;

/// The declarative half of a
/// [`GenericTracerReaction`](crate::generic::GenericTracerReaction):
/// everything except the transition functions themselves, loadable from
/// TOML.
///
/// ```toml
/// tracers = ["P", "D"]
/// auxiliary_fields = ["light"]
/// advection_scheme = "Upwind"
///
/// [drift_speeds]
/// D = 1e-4
///
/// [parameters]
/// mu0 = 1e-5
/// lambda = 5.0
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericReactionConfig {
    pub tracers: Vec<String>,
    #[serde(default)]
    pub auxiliary_fields: Vec<String>,
    #[serde(default)]
    pub drift_speeds: IndexMap<String, FloatValue>,
    #[serde(default)]
    pub advection_scheme: AdvectionScheme,
    #[serde(default)]
    pub parameters: Parameters,
}

impl GenericReactionConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// A builder pre-populated with this configuration; attach the
    /// transition functions and call
    /// [`build`](GenericTracerReactionBuilder::build).
    pub fn to_builder(&self) -> GenericTracerReactionBuilder {
        let mut builder = GenericTracerReactionBuilder::new(self.tracers.clone());
        builder
            .with_auxiliary_fields(self.auxiliary_fields.clone())
            .with_advection_scheme(self.advection_scheme);
        for (tracer, speed) in &self.drift_speeds {
            builder.with_drift_speed(tracer.clone(), *speed);
        }
        builder
    }
}
