//! Physical and naming constants shared across the workspace.

/// Element symbols indexed by atomic number.
///
/// Index 0 is the free neutron (`n`), so `ELEMENT_SYMBOLS[26] == "Fe"`.
///
/// # Examples
///
/// ```
/// use isodecay_core::constants::ELEMENT_SYMBOLS;
/// assert_eq!(ELEMENT_SYMBOLS[0], "n");
/// assert_eq!(ELEMENT_SYMBOLS[28], "Ni");
/// assert_eq!(ELEMENT_SYMBOLS[118], "Og");
/// ```
pub const ELEMENT_SYMBOLS: [&str; 119] = [
    "n", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", //
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", //
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", //
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", //
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", //
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", //
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", //
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", //
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", //
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", //
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", //
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Highest atomic number with an assigned element symbol.
pub const MAX_ATOMIC_NUMBER: u8 = 118;

/// Upper bound on accepted mass numbers. Comfortably above the heaviest
/// synthesized nuclide (A = 295).
pub const MAX_MASS_NUMBER: u16 = 300;

/// Multiplier separating Z from A in numeric ZZZAAA identifiers.
pub const ZAID_MULTIPLIER: u32 = 1000;

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Julian year (365.25 days), the convention used for half-life tables.
pub const SECONDS_PER_YEAR: f64 = 365.25 * SECONDS_PER_DAY;

/// Absolute tolerance used when checking that normalized columns sum to one.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-12;
