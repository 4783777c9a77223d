//! Uniform rectilinear grid descriptor and drift-flux divergence.

use serde::{Deserialize, Serialize};

use crate::field::{Field, FloatValue};

/// Advection scheme used to reconstruct face values for the drift-transport
/// flux divergence.
///
/// First-order upwind is diffusive but stable and is the default; the
/// centered scheme is second-order and suited to smooth fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvectionScheme {
    #[default]
    Upwind,
    Centered,
}

/// A constant tracer-specific velocity added on top of the bulk fluid
/// velocity (e.g. particulate sinking).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftVelocity {
    pub u: FloatValue,
    pub v: FloatValue,
    pub w: FloatValue,
}

impl DriftVelocity {
    pub fn new(u: FloatValue, v: FloatValue, w: FloatValue) -> Self {
        Self { u, v, w }
    }

    /// Downward transport for a positive settling speed.
    pub fn sinking(speed: FloatValue) -> Self {
        Self::new(0.0, 0.0, -speed)
    }
}

/// Uniform rectilinear ocean grid.
///
/// Cell centers sit at `x = (i + 1/2) dx`, `y = (j + 1/2) dy` and
/// `z = -lz + (k + 1/2) dz`: the vertical coordinate runs from `-lz` at the
/// bottom to `0` at the surface, with `k` increasing upward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectilinearGrid {
    nx: usize,
    ny: usize,
    nz: usize,
    dx: FloatValue,
    dy: FloatValue,
    dz: FloatValue,
    lz: FloatValue,
}

impl RectilinearGrid {
    /// Grid with `shape = (nx, ny, nz)` cells spanning `extent = (lx, ly, lz)`.
    ///
    /// # Panics
    ///
    /// Panics if any shape component is zero.
    pub fn new(shape: (usize, usize, usize), extent: (FloatValue, FloatValue, FloatValue)) -> Self {
        let (nx, ny, nz) = shape;
        let (lx, ly, lz) = extent;
        assert!(nx > 0 && ny > 0 && nz > 0, "grid shape must be non-zero");
        Self {
            nx,
            ny,
            nz,
            dx: lx / nx as FloatValue,
            dy: ly / ny as FloatValue,
            dz: lz / nz as FloatValue,
            lz,
        }
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    pub fn spacing(&self) -> (FloatValue, FloatValue, FloatValue) {
        (self.dx, self.dy, self.dz)
    }

    #[inline]
    pub fn xnode(&self, i: usize) -> FloatValue {
        (i as FloatValue + 0.5) * self.dx
    }

    #[inline]
    pub fn ynode(&self, j: usize) -> FloatValue {
        (j as FloatValue + 0.5) * self.dy
    }

    #[inline]
    pub fn znode(&self, k: usize) -> FloatValue {
        -self.lz + (k as FloatValue + 0.5) * self.dz
    }

    /// Physical coordinates of the cell center at `(i, j, k)`.
    #[inline]
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> (FloatValue, FloatValue, FloatValue) {
        (self.xnode(i), self.ynode(j), self.znode(k))
    }

    /// Divergence of (drift velocity x field) at cell `(i, j, k)`.
    ///
    /// Fluxes are reconstructed on the six cell faces per `scheme`; domain
    /// boundary faces carry zero flux, so material drifting into a boundary
    /// cell stays there.
    pub fn div_drift_flux(
        &self,
        scheme: AdvectionScheme,
        drift: &DriftVelocity,
        field: &Field,
        i: usize,
        j: usize,
        k: usize,
    ) -> FloatValue {
        let mut div = 0.0;

        if drift.u != 0.0 {
            let lo = if i > 0 {
                face_flux(scheme, drift.u, field.at(i - 1, j, k), field.at(i, j, k))
            } else {
                0.0
            };
            let hi = if i + 1 < self.nx {
                face_flux(scheme, drift.u, field.at(i, j, k), field.at(i + 1, j, k))
            } else {
                0.0
            };
            div += (hi - lo) / self.dx;
        }

        if drift.v != 0.0 {
            let lo = if j > 0 {
                face_flux(scheme, drift.v, field.at(i, j - 1, k), field.at(i, j, k))
            } else {
                0.0
            };
            let hi = if j + 1 < self.ny {
                face_flux(scheme, drift.v, field.at(i, j, k), field.at(i, j + 1, k))
            } else {
                0.0
            };
            div += (hi - lo) / self.dy;
        }

        if drift.w != 0.0 {
            let lo = if k > 0 {
                face_flux(scheme, drift.w, field.at(i, j, k - 1), field.at(i, j, k))
            } else {
                0.0
            };
            let hi = if k + 1 < self.nz {
                face_flux(scheme, drift.w, field.at(i, j, k), field.at(i, j, k + 1))
            } else {
                0.0
            };
            div += (hi - lo) / self.dz;
        }

        div
    }
}

/// Flux through the face between the lower-index cell (`lo`) and the
/// higher-index cell (`hi`) for a constant face velocity.
fn face_flux(
    scheme: AdvectionScheme,
    velocity: FloatValue,
    lo: FloatValue,
    hi: FloatValue,
) -> FloatValue {
    match scheme {
        // Positive velocity flows from lo to hi, so lo is upstream.
        AdvectionScheme::Upwind => {
            if velocity >= 0.0 {
                velocity * lo
            } else {
                velocity * hi
            }
        }
        AdvectionScheme::Centered => velocity * 0.5 * (lo + hi),
    }
}
