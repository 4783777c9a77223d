//! Facade crate re-exporting the pelagos framework and its ready-made
//! reaction models.

pub use pelagos_core::*;

pub mod models {
    pub use pelagos_models::*;
}
