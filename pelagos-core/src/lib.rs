//! Extensible biogeochemical tracer transitions for ocean solvers.
//!
//! This crate lets a host solver attach arbitrary reaction-transport source
//! terms to named tracer fields (phytoplankton, nutrients, ...) without the
//! solver knowing anything about the reactions themselves. A
//! [`reaction::ReactionModel`] declares the tracer and auxiliary fields it
//! needs; [`validate::validate_field_sets`] guarantees those fields exist
//! before the simulation begins stepping; and
//! [`reaction::evaluate_transition`] computes, per tracer and per grid cell,
//! the reaction term plus any drift-driven transport (e.g. particulate
//! sinking) beyond the bulk advection-diffusion the host applies uniformly.

pub mod clock;
pub mod config;
pub mod error;
pub mod field;
pub mod forcing;
pub mod generic;
pub mod grid;
pub mod reaction;
pub mod validate;

pub use clock::{Clock, Time};
pub use config::GenericReactionConfig;
pub use error::{ConfigResult, ConfigurationError};
pub use field::{Field, FieldSet, FloatValue, Location};
pub use forcing::{Forcing, ForcingForm, Parameters};
pub use generic::{GenericTracerReaction, GenericTracerReactionBuilder};
pub use grid::{AdvectionScheme, DriftVelocity, RectilinearGrid};
pub use reaction::{evaluate_transition, NoReaction, ReactionModel};
pub use validate::validate_field_sets;
