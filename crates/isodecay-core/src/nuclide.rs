//! Nuclide identity and the symbol naming utility.
//!
//! A nuclide is identified by `(atomic_number, mass_number)`. This module maps
//! between that pair and the textual symbols found in material maps:
//!
//! - `Ni56`, `Ni-56`, `ni56`, `NI56` (element symbol then mass number)
//! - `56Ni` (mass number then element symbol)
//! - `28056` (numeric ZZZAAA identifier)
//! - `n`, `n1`, `neutron` (the free neutron, Z = 0)
//!
//! [`symbol_of`] always emits the canonical `Ni56` form, and
//! `identity_of(&symbol_of(z, a)?)` returns `(z, a)` for every valid nuclide.
//! Symbols are matched case-sensitively first, so `n` is the neutron and `N`
//! is nitrogen; other spellings fall back to case-insensitive matching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ELEMENT_SYMBOLS, MAX_ATOMIC_NUMBER, MAX_MASS_NUMBER, ZAID_MULTIPLIER};
use crate::error::NuclideError;

/// A nuclide: atomic number plus mass number.
///
/// Ordering is by atomic number, then mass number, which is the row order of
/// sorted abundance tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nuclide {
    atomic_number: u8,
    mass_number: u16,
}

impl Nuclide {
    /// Validate and build a nuclide.
    ///
    /// # Examples
    ///
    /// ```
    /// use isodecay_core::nuclide::Nuclide;
    /// let ni56 = Nuclide::new(28, 56).unwrap();
    /// assert_eq!(ni56.to_string(), "Ni56");
    /// assert!(Nuclide::new(28, 0).is_err());
    /// ```
    pub fn new(atomic_number: u8, mass_number: u16) -> Result<Self, NuclideError> {
        checked(atomic_number as u32, mass_number as i64)
    }

    pub fn atomic_number(&self) -> u8 {
        self.atomic_number
    }

    pub fn mass_number(&self) -> u16 {
        self.mass_number
    }

    /// Number of neutrons, `A - Z`.
    pub fn neutron_number(&self) -> u16 {
        self.mass_number - self.atomic_number as u16
    }

    /// Numeric ZZZAAA identifier (`Z * 1000 + A`).
    pub fn zaid(&self) -> u32 {
        self.atomic_number as u32 * ZAID_MULTIPLIER + self.mass_number as u32
    }

    /// Element symbol without the mass number.
    pub fn element_symbol(&self) -> &'static str {
        ELEMENT_SYMBOLS[self.atomic_number as usize]
    }

    /// Canonical symbol, e.g. `Fe56`.
    pub fn symbol(&self) -> String {
        format!("{}{}", self.element_symbol(), self.mass_number)
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.element_symbol(), self.mass_number)
    }
}

impl FromStr for Nuclide {
    type Err = NuclideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        identity_of(s)
    }
}

impl TryFrom<String> for Nuclide {
    type Error = NuclideError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        identity_of(&value)
    }
}

impl From<Nuclide> for String {
    fn from(nuclide: Nuclide) -> Self {
        nuclide.symbol()
    }
}

/// Resolve a textual or numeric nuclide identifier to its identity.
///
/// # Examples
///
/// ```
/// use isodecay_core::nuclide::identity_of;
/// let fe = identity_of("Fe56").unwrap();
/// assert_eq!((fe.atomic_number(), fe.mass_number()), (26, 56));
/// assert_eq!(identity_of("26056").unwrap(), fe);
/// assert_eq!(identity_of("56Fe").unwrap(), fe);
/// assert!(identity_of("Xx12").is_err());
/// ```
pub fn identity_of(identifier: &str) -> Result<Nuclide, NuclideError> {
    let id = identifier.trim();
    if id.is_empty() {
        return Err(NuclideError::Empty);
    }

    if id.bytes().all(|b| b.is_ascii_digit()) {
        return from_zaid(id);
    }

    if id.eq_ignore_ascii_case("neutron") {
        return checked(0, 1);
    }

    let (symbol, mass) =
        split_identifier(id).ok_or_else(|| NuclideError::Malformed(id.to_string()))?;
    let atomic_number = atomic_number_of(symbol)?;

    let mass_number = if mass.is_empty() {
        // Only the neutron has an implied mass number.
        if atomic_number != 0 {
            return Err(NuclideError::Malformed(id.to_string()));
        }
        1
    } else {
        mass.parse::<i64>()
            .map_err(|_| NuclideError::Malformed(id.to_string()))?
    };

    checked(atomic_number as u32, mass_number)
}

/// Format the canonical symbol for `(atomic_number, mass_number)`.
///
/// # Examples
///
/// ```
/// use isodecay_core::nuclide::symbol_of;
/// assert_eq!(symbol_of(28, 56).unwrap(), "Ni56");
/// assert_eq!(symbol_of(0, 1).unwrap(), "n1");
/// assert!(symbol_of(200, 400).is_err());
/// ```
pub fn symbol_of(atomic_number: u8, mass_number: u16) -> Result<String, NuclideError> {
    Ok(Nuclide::new(atomic_number, mass_number)?.symbol())
}

/// Resolve an element symbol to its atomic number.
pub fn atomic_number_of(symbol: &str) -> Result<u8, NuclideError> {
    if let Some(z) = ELEMENT_SYMBOLS.iter().position(|s| *s == symbol) {
        return Ok(z as u8);
    }

    let mut chars = symbol.chars();
    let normalized: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => return Err(NuclideError::Empty),
    };

    ELEMENT_SYMBOLS
        .iter()
        .position(|s| *s == normalized)
        .map(|z| z as u8)
        .ok_or_else(|| NuclideError::UnknownElement(symbol.to_string()))
}

fn from_zaid(digits: &str) -> Result<Nuclide, NuclideError> {
    let zaid: u32 = digits
        .parse()
        .map_err(|_| NuclideError::Malformed(digits.to_string()))?;
    checked(zaid / ZAID_MULTIPLIER, (zaid % ZAID_MULTIPLIER) as i64)
}

/// Split `Ni56` / `Ni-56` / `56Ni` into `(symbol, mass digits)`.
fn split_identifier(id: &str) -> Option<(&str, &str)> {
    let first = id.chars().next()?;

    if first.is_ascii_alphabetic() {
        let split = id
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(id.len());
        let (symbol, rest) = id.split_at(split);
        let mass = rest.strip_prefix('-').unwrap_or(rest);
        if rest.starts_with('-') && mass.is_empty() {
            return None;
        }
        mass.bytes().all(|b| b.is_ascii_digit()).then_some((symbol, mass))
    } else if first.is_ascii_digit() {
        let split = id.find(|c: char| !c.is_ascii_digit())?;
        let (mass, symbol) = id.split_at(split);
        symbol
            .bytes()
            .all(|b| b.is_ascii_alphabetic())
            .then_some((symbol, mass))
    } else {
        None
    }
}

fn checked(atomic_number: u32, mass_number: i64) -> Result<Nuclide, NuclideError> {
    if atomic_number > MAX_ATOMIC_NUMBER as u32 {
        return Err(NuclideError::AtomicNumberOutOfRange(atomic_number));
    }

    let invalid = NuclideError::InvalidMassNumber {
        atomic_number,
        mass_number,
    };
    if mass_number <= 0 || mass_number > MAX_MASS_NUMBER as i64 {
        return Err(invalid);
    }
    // A nucleus has at least Z nucleons; the free neutron is exactly A = 1.
    if atomic_number == 0 && mass_number != 1 {
        return Err(invalid);
    }
    if mass_number < atomic_number as i64 {
        return Err(invalid);
    }

    Ok(Nuclide {
        atomic_number: atomic_number as u8,
        mass_number: mass_number as u16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pair(id: &str) -> (u8, u16) {
        let n = identity_of(id).unwrap();
        (n.atomic_number(), n.mass_number())
    }

    // --- identity_of ---

    #[test]
    fn parses_symbol_then_mass() {
        assert_eq!(pair("Ni56"), (28, 56));
        assert_eq!(pair("Fe56"), (26, 56));
        assert_eq!(pair("U235"), (92, 235));
        assert_eq!(pair("H1"), (1, 1));
    }

    #[test]
    fn parses_dashed_and_case_variants() {
        assert_eq!(pair("Ni-56"), (28, 56));
        assert_eq!(pair("ni56"), (28, 56));
        assert_eq!(pair("NI56"), (28, 56));
        assert_eq!(pair("  Co57 "), (27, 57));
    }

    #[test]
    fn parses_mass_then_symbol() {
        assert_eq!(pair("56Ni"), (28, 56));
        assert_eq!(pair("4He"), (2, 4));
    }

    #[test]
    fn parses_zaid() {
        assert_eq!(pair("28056"), (28, 56));
        assert_eq!(pair("1001"), (1, 1));
        assert_eq!(pair("92235"), (92, 235));
    }

    #[test]
    fn neutron_spellings() {
        assert_eq!(pair("n"), (0, 1));
        assert_eq!(pair("n1"), (0, 1));
        assert_eq!(pair("neutron"), (0, 1));
        assert_eq!(pair("1"), (0, 1));
    }

    #[test]
    fn exact_case_wins_over_folding() {
        // "N" is nitrogen, "n" is the neutron.
        assert_eq!(pair("N14"), (7, 14));
        assert!(identity_of("n14").is_err());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(identity_of(""), Err(NuclideError::Empty));
        assert_eq!(identity_of("   "), Err(NuclideError::Empty));
    }

    #[test]
    fn rejects_unknown_element() {
        assert!(matches!(
            identity_of("Xx12"),
            Err(NuclideError::UnknownElement(_))
        ));
    }

    #[test]
    fn rejects_zero_mass_number() {
        assert!(matches!(
            identity_of("Ni0"),
            Err(NuclideError::InvalidMassNumber { .. })
        ));
        assert!(matches!(
            identity_of("28000"),
            Err(NuclideError::InvalidMassNumber { .. })
        ));
    }

    #[test]
    fn rejects_negative_mass_number() {
        // "Ni--56" is not a dashed form; a leading minus never parses.
        assert!(identity_of("Ni--56").is_err());
        assert!(identity_of("-56Ni").is_err());
    }

    #[test]
    fn rejects_mass_below_atomic_number() {
        assert!(matches!(
            identity_of("U10"),
            Err(NuclideError::InvalidMassNumber { .. })
        ));
    }

    #[test]
    fn rejects_element_without_mass() {
        assert!(matches!(identity_of("Fe"), Err(NuclideError::Malformed(_))));
        assert!(matches!(identity_of("Fe-"), Err(NuclideError::Malformed(_))));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(matches!(identity_of("Fe56x"), Err(NuclideError::Malformed(_))));
        assert!(matches!(identity_of("Am242m"), Err(NuclideError::Malformed(_))));
    }

    #[test]
    fn rejects_out_of_range_zaid() {
        assert!(matches!(
            identity_of("200400"),
            Err(NuclideError::AtomicNumberOutOfRange(200))
        ));
    }

    // --- symbol_of ---

    #[test]
    fn formats_canonical_symbols() {
        assert_eq!(symbol_of(26, 56).unwrap(), "Fe56");
        assert_eq!(symbol_of(28, 58).unwrap(), "Ni58");
        assert_eq!(symbol_of(0, 1).unwrap(), "n1");
    }

    #[test]
    fn symbol_of_validates() {
        assert!(symbol_of(28, 0).is_err());
        assert!(symbol_of(119, 300).is_err());
        assert!(symbol_of(0, 2).is_err());
    }

    // --- Nuclide ---

    #[test]
    fn ordering_is_z_then_a() {
        let mut v = vec![
            Nuclide::new(28, 58).unwrap(),
            Nuclide::new(26, 56).unwrap(),
            Nuclide::new(28, 56).unwrap(),
        ];
        v.sort();
        let symbols: Vec<String> = v.iter().map(Nuclide::symbol).collect();
        assert_eq!(symbols, ["Fe56", "Ni56", "Ni58"]);
    }

    #[test]
    fn zaid_and_neutron_number() {
        let co60 = Nuclide::new(27, 60).unwrap();
        assert_eq!(co60.zaid(), 27060);
        assert_eq!(co60.neutron_number(), 33);
    }

    #[test]
    fn serde_as_symbol_string() {
        let ni = Nuclide::new(28, 56).unwrap();
        let json = serde_json::to_string(&ni).unwrap();
        assert_eq!(json, "\"Ni56\"");
        let back: Nuclide = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ni);
        assert!(serde_json::from_str::<Nuclide>("\"Ni0\"").is_err());
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn symbol_identity_inverse(z in 1u8..=MAX_ATOMIC_NUMBER, extra in 0u16..=100) {
            let a = (z as u16 + extra).min(MAX_MASS_NUMBER);
            let symbol = symbol_of(z, a).unwrap();
            let back = identity_of(&symbol).unwrap();
            prop_assert_eq!((back.atomic_number(), back.mass_number()), (z, a));
        }

        #[test]
        fn zaid_identity_inverse(z in 1u8..=MAX_ATOMIC_NUMBER, extra in 0u16..=100) {
            let a = (z as u16 + extra).min(MAX_MASS_NUMBER);
            let n = Nuclide::new(z, a).unwrap();
            prop_assert_eq!(identity_of(&n.zaid().to_string()).unwrap(), n);
        }
    }
}
