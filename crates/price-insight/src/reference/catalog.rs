use serde::{Deserialize, Serialize};
use std::fmt;

/// Legal ownership form of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tenure {
    Freehold,
    Leasehold,
}

impl Tenure {
    pub const ALL: [Self; 2] = [Self::Freehold, Self::Leasehold];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Freehold => "Freehold",
            Self::Leasehold => "Leasehold",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tenure| tenure.label() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Flat,
    Detached,
    Terraced,
    #[serde(rename = "Semi-detached")]
    SemiDetached,
    Bungalow,
    Maisonette,
}

impl PropertyType {
    pub const ALL: [Self; 6] = [
        Self::Flat,
        Self::Detached,
        Self::Terraced,
        Self::SemiDetached,
        Self::Bungalow,
        Self::Maisonette,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::Detached => "Detached",
            Self::Terraced => "Terraced",
            Self::SemiDetached => "Semi-detached",
            Self::Bungalow => "Bungalow",
            Self::Maisonette => "Maisonette",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == value)
    }
}

/// Energy performance grade, A (best) through G (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnergyRating {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl EnergyRating {
    pub const ALL: [Self; 7] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rating| rating.label() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceCategory {
    Low,
    Medium,
    High,
}

impl PriceCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

macro_rules! display_label {
    ($($kind:ty),+) => {
        $(
            impl fmt::Display for $kind {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

display_label!(Tenure, PropertyType, EnergyRating, PriceCategory);

/// Joins the labels of a fixed table for use in validation messages.
pub(crate) fn joined_labels<T: Copy>(values: &[T], label: fn(T) -> &'static str) -> String {
    values
        .iter()
        .map(|value| label(*value))
        .collect::<Vec<_>>()
        .join(", ")
}
