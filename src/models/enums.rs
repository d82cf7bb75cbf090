use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Relationship {
    Father => "father",
    Mother => "mother",
    PaternalGrandfather => "paternal_grandfather",
    PaternalGrandmother => "paternal_grandmother",
    MaternalGrandfather => "maternal_grandfather",
    MaternalGrandmother => "maternal_grandmother",
});

str_enum!(SmokingStatus {
    NonSmoker => "non_smoker",
    PastSmoker => "past_smoker",
    CurrentSmoker => "current_smoker",
});

str_enum!(Gender {
    Male => "male",
    Female => "female",
});

str_enum!(RiskLevel {
    Low => "low",
    Moderate => "moderate",
    High => "high",
});

/// Scores at or above this are banded high and warrant a specialist consult.
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;

/// Scores at or above this (and below high) are banded moderate.
pub const MODERATE_RISK_THRESHOLD: f64 = 40.0;

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            Self::High
        } else if score >= MODERATE_RISK_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn recommends_consultation(&self) -> bool {
        matches!(self, Self::High)
    }
}

impl Relationship {
    pub const ALL: [Relationship; 6] = [
        Self::Father,
        Self::Mother,
        Self::PaternalGrandfather,
        Self::PaternalGrandmother,
        Self::MaternalGrandfather,
        Self::MaternalGrandmother,
    ];

    /// Parents are first-degree relatives; grandparents second-degree.
    pub fn is_first_degree(&self) -> bool {
        matches!(self, Self::Father | Self::Mother)
    }
}

impl SmokingStatus {
    pub fn has_exposure(&self) -> bool {
        !matches!(self, Self::NonSmoker)
    }
}
