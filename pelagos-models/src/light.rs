//! Self-shaded plankton growth, discrete form.
//!
//! Light at a cell is the surface irradiance attenuated by the water above
//! it and by the plankton standing between the cell and the surface. The
//! column integral needs direct index access to the field set, so this term
//! uses the discrete forcing form rather than the coordinate-based one.

use pelagos_core::field::FloatValue;
use pelagos_core::forcing::{Forcing, Parameters};
use serde::{Deserialize, Serialize};

/// Parameters for the self-shaded growth term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadedGrowthParameters {
    /// Maximum growth rate at the surface.
    /// unit: 1 / s
    pub mu0: FloatValue,
    /// Light attenuation by clear water.
    /// unit: 1 / m
    pub water_attenuation: FloatValue,
    /// Additional attenuation per unit of standing stock.
    /// unit: m^2 / mmol
    pub self_shading: FloatValue,
    /// Linear mortality rate.
    /// unit: 1 / s
    pub mortality: FloatValue,
}

/// Fraction of surface light reaching depth `z` (negative) below a standing
/// stock of column integral `column`.
pub fn light_fraction(
    parameters: &ShadedGrowthParameters,
    z: FloatValue,
    column: FloatValue,
) -> FloatValue {
    (parameters.water_attenuation * z - parameters.self_shading * column).exp()
}

/// Discrete-form growth term for `tracer`: integrates the tracer column
/// above the query cell to attenuate the light reaching it, then applies
/// light-limited growth and linear mortality.
pub fn shaded_growth_forcing(parameters: &ShadedGrowthParameters, tracer: &str) -> Forcing {
    let captured = parameters.clone();
    let tracer = tracer.to_string();
    Forcing::discrete(move |i, j, k, grid, _clock, fields, _p| {
        let (_, _, dz) = grid.spacing();
        let (_, _, nz) = grid.shape();
        // Standing stock between this cell and the surface.
        let mut column = 0.0;
        for level in (k + 1)..nz {
            column += fields.value(&tracer, i, j, level) * dz;
        }
        let (_x, _y, z) = grid.cell_center(i, j, k);
        let p = fields.value(&tracer, i, j, k);
        captured.mu0 * light_fraction(&captured, z, column) * p - captured.mortality * p
    })
    .with_parameters(
        Parameters::new()
            .with("mu0", parameters.mu0)
            .with("water_attenuation", parameters.water_attenuation)
            .with("self_shading", parameters.self_shading)
            .with("mortality", parameters.mortality),
    )
}
