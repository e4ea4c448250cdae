//! The per-sample material map exchanged with decay engines.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// One sample's composition: nuclide symbol -> fractional amount.
///
/// A material is plain data. Symbols are validated, and amounts checked for
/// sign and finiteness, when the material is turned into an
/// [`AbundanceTable`](crate::abundance::AbundanceTable).
///
/// # Examples
///
/// ```
/// use isodecay_core::material::Material;
/// let m = Material::from_iter([("Fe56", 0.5), ("Ni56", 0.5)]);
/// assert_eq!(m.get("Ni56"), Some(0.5));
/// assert_eq!(m.total(), 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Material {
    nuclides: BTreeMap<String, f64>,
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the amount for `symbol`, returning the previous amount.
    pub fn insert(&mut self, symbol: impl Into<String>, amount: f64) -> Option<f64> {
        self.nuclides.insert(symbol.into(), amount)
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.nuclides.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.nuclides.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.nuclides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nuclides.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, f64> {
        self.nuclides.iter()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.nuclides.keys().map(String::as_str)
    }

    /// Sum of all amounts.
    pub fn total(&self) -> f64 {
        self.nuclides.values().sum()
    }

    /// Overlay `other` onto this material: keys in `other` replace ours,
    /// keys only present here are kept.
    pub fn update(&mut self, other: &Material) {
        for (symbol, amount) in &other.nuclides {
            self.nuclides.insert(symbol.clone(), *amount);
        }
    }

    /// [`update`](Self::update) by value.
    pub fn updated_with(mut self, other: &Material) -> Self {
        self.update(other);
        self
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Material {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            nuclides: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<BTreeMap<String, f64>> for Material {
    fn from(nuclides: BTreeMap<String, f64>) -> Self {
        Self { nuclides }
    }
}

impl From<Material> for BTreeMap<String, f64> {
    fn from(material: Material) -> Self {
        material.nuclides
    }
}

impl<'a> IntoIterator for &'a Material {
    type Item = (&'a String, &'a f64);
    type IntoIter = btree_map::Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.nuclides.iter()
    }
}

impl IntoIterator for Material {
    type Item = (String, f64);
    type IntoIter = btree_map::IntoIter<String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.nuclides.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces() {
        let mut m = Material::new();
        assert_eq!(m.insert("Co60", 1.0), None);
        assert_eq!(m.insert("Co60", 0.25), Some(1.0));
        assert_eq!(m.get("Co60"), Some(0.25));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn update_overlays_without_dropping() {
        let mut m = Material::from_iter([("Ni56", 1.0), ("Fe56", 0.2)]);
        let decayed = Material::from_iter([("Ni56", 0.4), ("Co56", 0.6)]);
        m.update(&decayed);
        assert_eq!(m.get("Ni56"), Some(0.4));
        assert_eq!(m.get("Co56"), Some(0.6));
        // Not reported by the engine: carried forward.
        assert_eq!(m.get("Fe56"), Some(0.2));
    }

    #[test]
    fn update_with_empty_is_identity() {
        let m = Material::from_iter([("H3", 1.0)]);
        assert_eq!(m.clone().updated_with(&Material::new()), m);
    }

    #[test]
    fn serde_is_a_plain_map() {
        let m = Material::from_iter([("Ni56", 1.0)]);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"Ni56":1.0}"#);
        let back: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn symbols_are_sorted() {
        let m = Material::from_iter([("Ni56", 1.0), ("Co56", 1.0), ("Fe56", 1.0)]);
        let symbols: Vec<&str> = m.symbols().collect();
        assert_eq!(symbols, ["Co56", "Fe56", "Ni56"]);
    }
}
