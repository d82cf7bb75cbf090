use serde::{Deserialize, Serialize};

use super::enums::{Gender, SmokingStatus};

/// The user's own demographic, clinical and environmental record.
///
/// Clinical values use fixed units: blood pressure in mmHg, glucose and
/// lipids in mg/dL, height in cm, weight in kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalHealth {
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub smoking: SmokingStatus,
    #[serde(rename = "systolicBP")]
    pub systolic_bp: f64,
    #[serde(rename = "diastolicBP")]
    pub diastolic_bp: f64,
    pub fasting_glucose: f64,
    pub total_cholesterol: f64,
    pub ldl: f64,
    pub hdl: f64,
    pub triglycerides: f64,
    pub location: String,
    /// Assumed 0–100; not validated.
    pub environmental_risk_score: f64,
}

impl Default for PersonalHealth {
    fn default() -> Self {
        Self {
            age: 35,
            gender: Gender::Male,
            height: 175.0,
            weight: 70.0,
            smoking: SmokingStatus::NonSmoker,
            systolic_bp: 120.0,
            diastolic_bp: 80.0,
            fasting_glucose: 95.0,
            total_cholesterol: 180.0,
            ldl: 100.0,
            hdl: 60.0,
            triglycerides: 150.0,
            location: "서울".to_string(),
            environmental_risk_score: 5.0,
        }
    }
}

/// Typed edit of a single `PersonalHealth` field.
#[derive(Debug, Clone, PartialEq)]
pub enum PersonalHealthUpdate {
    Age(u32),
    Gender(Gender),
    Height(f64),
    Weight(f64),
    Smoking(SmokingStatus),
    SystolicBp(f64),
    DiastolicBp(f64),
    FastingGlucose(f64),
    TotalCholesterol(f64),
    Ldl(f64),
    Hdl(f64),
    Triglycerides(f64),
    Location(String),
    EnvironmentalRiskScore(f64),
}

impl PersonalHealth {
    pub fn apply(&mut self, update: PersonalHealthUpdate) {
        use PersonalHealthUpdate as U;
        match update {
            U::Age(v) => self.age = v,
            U::Gender(v) => self.gender = v,
            U::Height(v) => self.height = v,
            U::Weight(v) => self.weight = v,
            U::Smoking(v) => self.smoking = v,
            U::SystolicBp(v) => self.systolic_bp = v,
            U::DiastolicBp(v) => self.diastolic_bp = v,
            U::FastingGlucose(v) => self.fasting_glucose = v,
            U::TotalCholesterol(v) => self.total_cholesterol = v,
            U::Ldl(v) => self.ldl = v,
            U::Hdl(v) => self.hdl = v,
            U::Triglycerides(v) => self.triglycerides = v,
            U::Location(v) => self.location = v,
            U::EnvironmentalRiskScore(v) => self.environmental_risk_score = v,
        }
    }

    /// Named clinical measurements, in display order.
    pub fn measurements(&self) -> [(&'static str, f64); 9] {
        [
            ("height", self.height),
            ("weight", self.weight),
            ("systolicBP", self.systolic_bp),
            ("diastolicBP", self.diastolic_bp),
            ("fastingGlucose", self.fasting_glucose),
            ("totalCholesterol", self.total_cholesterol),
            ("ldl", self.ldl),
            ("hdl", self.hdl),
            ("triglycerides", self.triglycerides),
        ]
    }
}
