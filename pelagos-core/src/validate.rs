//! Reconciliation of the host's field sets against a reaction model's
//! declared requirements.

use log::debug;

use crate::error::{ConfigResult, ConfigurationError};
use crate::field::{Field, FieldSet, Location};
use crate::grid::RectilinearGrid;
use crate::reaction::ReactionModel;

/// Ensure every field `model` requires exists in the tracer and auxiliary
/// field sets, returning the augmented pair.
///
/// Purely additive: names already present keep their existing field (never
/// replaced or mutated), and absent names are added as freshly allocated,
/// zero-initialized, cell-centered fields over `grid`. Validating a second
/// time with the same model is a no-op.
///
/// Fails with a [`ConfigurationError`] if a required name is present with an
/// incompatible representation (staggering location or shape).
pub fn validate_field_sets(
    tracers: FieldSet,
    auxiliary: FieldSet,
    model: &dyn ReactionModel,
    grid: &RectilinearGrid,
) -> ConfigResult<(FieldSet, FieldSet)> {
    let tracers = augment(tracers, model.required_tracers(), grid)?;
    let auxiliary = augment(auxiliary, model.required_auxiliary_fields(), grid)?;
    Ok((tracers, auxiliary))
}

fn augment(mut set: FieldSet, required: &[String], grid: &RectilinearGrid) -> ConfigResult<FieldSet> {
    for name in required {
        match set.get(name) {
            Some(field) => {
                if field.location() != Location::Center {
                    return Err(ConfigurationError::IncompatibleLocation {
                        name: name.clone(),
                        required: Location::Center,
                        found: field.location(),
                    });
                }
                if field.shape() != grid.shape() {
                    return Err(ConfigurationError::ShapeMismatch {
                        name: name.clone(),
                        expected: grid.shape(),
                        found: field.shape(),
                    });
                }
            }
            None => {
                debug!("allocating missing required field '{}'", name);
                set.insert(name.clone(), Field::zeros_centered(grid));
            }
        }
    }
    Ok(set)
}
