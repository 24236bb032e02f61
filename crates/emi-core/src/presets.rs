use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Loan product categories offered by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanKind {
    Home,
    Personal,
    Car,
}

impl std::fmt::Display for LoanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Home => "Home Loan",
            Self::Personal => "Personal Loan",
            Self::Car => "Car Loan",
        };
        write!(f, "{}", s)
    }
}

/// Principal bounds and defaults for one loan product, mirroring the slider
/// ranges the UI offers per loan type.
#[derive(Debug, Clone, Serialize)]
pub struct LoanPreset {
    pub kind: LoanKind,
    pub label: &'static str,
    pub min_principal: Money,
    pub max_principal: Money,
    pub step: Money,
    pub default_principal: Money,
}

const PRESETS: [LoanPreset; 3] = [
    LoanPreset {
        kind: LoanKind::Home,
        label: "Home Loan",
        min_principal: dec!(100_000),
        max_principal: dec!(20_000_000),
        step: dec!(10_000),
        default_principal: dec!(5_000_000),
    },
    LoanPreset {
        kind: LoanKind::Personal,
        label: "Personal Loan",
        min_principal: dec!(50_000),
        max_principal: dec!(5_000_000),
        step: dec!(5_000),
        default_principal: dec!(500_000),
    },
    LoanPreset {
        kind: LoanKind::Car,
        label: "Car Loan",
        min_principal: dec!(100_000),
        max_principal: dec!(5_000_000),
        step: dec!(10_000),
        default_principal: dec!(1_000_000),
    },
];

/// All built-in loan presets, in display order.
pub fn all_presets() -> &'static [LoanPreset] {
    &PRESETS
}

/// The preset for a given loan kind.
pub fn preset_for(kind: LoanKind) -> &'static LoanPreset {
    match kind {
        LoanKind::Home => &PRESETS[0],
        LoanKind::Personal => &PRESETS[1],
        LoanKind::Car => &PRESETS[2],
    }
}

/// Clamp a requested principal into the preset's slider bounds.
pub fn clamp_principal(kind: LoanKind, amount: Money) -> Money {
    let preset = preset_for(kind);
    amount.clamp(preset.min_principal, preset.max_principal)
}
