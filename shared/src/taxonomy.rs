//! Injury taxonomy
//!
//! Static reference data mapping each injury category to its ordered list of
//! injury types. A type flagged `critical` makes the request an emergency.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One selectable injury type within a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjuryType {
    pub id: &'static str,
    pub label: &'static str,
    pub critical: bool,
}

const fn injury(id: &'static str, label: &'static str, critical: bool) -> InjuryType {
    InjuryType { id, label, critical }
}

const TRAUMA: &[InjuryType] = &[
    injury("heavy_bleeding", "Heavy Bleeding", true),
    injury("breathing_difficulty", "Breathing Difficulty", true),
    injury("head_injury", "Head/Neck/Spinal", true),
    injury("fracture", "Fracture", false),
    injury("burn", "Burn Injury", false),
];

const POSTPARTUM: &[InjuryType] = &[
    injury("postpartum_hemorrhage", "Hemorrhage", true),
    injury("infection", "Infection", false),
    injury("preeclampsia", "Preeclampsia", false),
];

const GBV: &[InjuryType] = &[
    injury("gbv_emergency", "GBV Emergency", true),
    injury("assault", "Physical Assault", false),
];

const CHRONIC: &[InjuryType] = &[
    injury("diabetic_emergency", "Diabetic Emergency", false),
    injury("asthma_attack", "Asthma Attack", false),
    injury("heart_condition", "Heart Condition", false),
];

/// Injury category of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjuryCategory {
    Trauma,
    Postpartum,
    Gbv,
    Chronic,
}

impl InjuryCategory {
    pub const ALL: [InjuryCategory; 4] = [
        InjuryCategory::Trauma,
        InjuryCategory::Postpartum,
        InjuryCategory::Gbv,
        InjuryCategory::Chronic,
    ];

    /// Storage key of the category
    pub fn key(&self) -> &'static str {
        match self {
            InjuryCategory::Trauma => "trauma",
            InjuryCategory::Postpartum => "postpartum",
            InjuryCategory::Gbv => "gbv",
            InjuryCategory::Chronic => "chronic",
        }
    }

    /// Display label shown on the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            InjuryCategory::Trauma => "Physical Trauma",
            InjuryCategory::Postpartum => "Postpartum",
            InjuryCategory::Gbv => "GBV Emergency",
            InjuryCategory::Chronic => "Chronic Condition",
        }
    }

    /// Injury types of this category, in display order
    pub fn types(&self) -> &'static [InjuryType] {
        match self {
            InjuryCategory::Trauma => TRAUMA,
            InjuryCategory::Postpartum => POSTPARTUM,
            InjuryCategory::Gbv => GBV,
            InjuryCategory::Chronic => CHRONIC,
        }
    }

    /// Find a type by id within this category only
    pub fn find_type(&self, type_id: &str) -> Option<&'static InjuryType> {
        self.types().iter().find(|t| t.id == type_id)
    }
}

impl fmt::Display for InjuryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when parsing an unknown category key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown injury category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for InjuryCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InjuryCategory::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Resolve a (category, type) pair of raw keys against the taxonomy
pub fn lookup(category: &str, type_id: &str) -> Option<(InjuryCategory, &'static InjuryType)> {
    let category = category.parse::<InjuryCategory>().ok()?;
    category.find_type(type_id).map(|t| (category, t))
}
