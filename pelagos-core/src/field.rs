//! Tracer and auxiliary fields and the named collection holding them.

use indexmap::IndexMap;
use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::RectilinearGrid;

/// Scalar type used throughout.
pub type FloatValue = f64;

/// Staggering location of a field on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    /// Cell centers (all tracer and auxiliary fields).
    Center,
    XFace,
    YFace,
    ZFace,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Location::Center => "cell centers",
            Location::XFace => "x faces",
            Location::YFace => "y faces",
            Location::ZFace => "z faces",
        };
        write!(f, "{}", name)
    }
}

/// A scalar field over the grid.
///
/// Field contents evolve through the host solver's time stepping; this
/// subsystem only reads them during evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    data: Array3<FloatValue>,
    location: Location,
}

impl Field {
    pub fn new(data: Array3<FloatValue>, location: Location) -> Self {
        Self { data, location }
    }

    /// Zero-initialized cell-centered field over `grid`.
    pub fn zeros_centered(grid: &RectilinearGrid) -> Self {
        Self {
            data: Array3::zeros(grid.shape()),
            location: Location::Center,
        }
    }

    /// Cell-centered field initialized from a function of the physical
    /// cell-center coordinates.
    pub fn from_fn(
        grid: &RectilinearGrid,
        f: impl Fn(FloatValue, FloatValue, FloatValue) -> FloatValue,
    ) -> Self {
        let data = Array3::from_shape_fn(grid.shape(), |(i, j, k)| {
            let (x, y, z) = grid.cell_center(i, j, k);
            f(x, y, z)
        });
        Self {
            data,
            location: Location::Center,
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Value at cell `(i, j, k)`.
    ///
    /// Panics on out-of-range indices.
    #[inline]
    pub fn at(&self, i: usize, j: usize, k: usize) -> FloatValue {
        self.data[[i, j, k]]
    }

    pub fn data(&self) -> &Array3<FloatValue> {
        &self.data
    }

    /// Mutable access for the host solver's time stepping.
    pub fn data_mut(&mut self) -> &mut Array3<FloatValue> {
        &mut self.data
    }
}

/// An insertion-ordered collection of named fields.
///
/// Owned by the host solver and borrowed read-only by the evaluator. The
/// tracer set and the auxiliary set are separate `FieldSet`s.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSet {
    fields: IndexMap<String, Field>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Add a named field.
    ///
    /// Panics if a field with the same name already exists.
    pub fn insert(&mut self, name: impl Into<String>, field: Field) {
        let name = name.into();
        if self.fields.contains_key(&name) {
            panic!("field '{}' already exists", name);
        }
        self.fields.insert(name, field);
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Value of field `name` at cell `(i, j, k)`.
    ///
    /// Panics if no field with that name exists; validation guarantees every
    /// declared dependency is present before stepping begins.
    #[inline]
    pub fn value(&self, name: &str, i: usize, j: usize, k: usize) -> FloatValue {
        self.fields
            .get(name)
            .unwrap_or_else(|| panic!("no field named '{}'", name))
            .at(i, j, k)
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::RectilinearGrid;

    fn grid() -> RectilinearGrid {
        RectilinearGrid::new((2, 2, 2), (2.0, 2.0, 2.0))
    }

    #[test]
    fn zeros_centered_matches_grid() {
        let field = Field::zeros_centered(&grid());
        assert_eq!(field.shape(), (2, 2, 2));
        assert_eq!(field.location(), Location::Center);
        assert_eq!(field.at(1, 1, 1), 0.0);
    }

    #[test]
    fn from_fn_uses_cell_centers() {
        let field = Field::from_fn(&grid(), |x, y, z| x + 10.0 * y + 100.0 * z);
        // cell (0, 0, 1): x = 0.5, y = 0.5, z = -0.5
        assert_eq!(field.at(0, 0, 1), 0.5 + 5.0 - 50.0);
    }

    #[test]
    fn insert_and_lookup_preserve_order() {
        let mut fields = FieldSet::new();
        fields.insert("Z", Field::zeros_centered(&grid()));
        fields.insert("P", Field::zeros_centered(&grid()));
        assert_eq!(fields.names().collect::<Vec<_>>(), vec!["Z", "P"]);
        assert!(fields.contains("P"));
        assert_eq!(fields.value("P", 0, 0, 0), 0.0);
    }

    #[test]
    #[should_panic(expected = "already exists")]
    fn duplicate_insert_panics() {
        let mut fields = FieldSet::new();
        fields.insert("P", Field::zeros_centered(&grid()));
        fields.insert("P", Field::zeros_centered(&grid()));
    }

    #[test]
    #[should_panic(expected = "no field named")]
    fn missing_field_panics() {
        let fields = FieldSet::new();
        fields.value("P", 0, 0, 0);
    }

    #[test]
    fn serialise_round_trip() {
        let mut fields = FieldSet::new();
        fields.insert("P", Field::from_fn(&grid(), |_, _, z| z));
        let serialised = serde_json::to_string(&fields).unwrap();
        let deserialised: FieldSet = serde_json::from_str(&serialised).unwrap();
        assert_eq!(fields, deserialised);
    }
}
