use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Relationship, SmokingStatus};
use super::ModelError;

/// Diagnosis age assigned to a freshly added disease entry.
pub const DEFAULT_DIAGNOSIS_AGE: u32 = 50;

/// One diagnosed condition of a family member.
///
/// An empty `name` is a normal state while the entry is being edited;
/// the request builder drops such entries before analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseHistory {
    pub name: String,
    pub diagnosis_age: u32,
    pub is_cause_of_death: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DiseaseHistory {
    pub fn new(name: impl Into<String>, diagnosis_age: u32) -> Self {
        Self {
            name: name.into(),
            diagnosis_age,
            is_cause_of_death: false,
            death_age: None,
            note: None,
        }
    }

    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

impl Default for DiseaseHistory {
    fn default() -> Self {
        Self::new("", DEFAULT_DIAGNOSIS_AGE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: Uuid,
    pub relationship: Relationship,
    pub smoking: SmokingStatus,
    pub deceased: bool,
    pub diseases: Vec<DiseaseHistory>,
}

impl FamilyMember {
    /// A living, non-smoking relative with no recorded diseases and a fresh id.
    pub fn new(relationship: Relationship) -> Self {
        Self {
            id: Uuid::new_v4(),
            relationship,
            smoking: SmokingStatus::NonSmoker,
            deceased: false,
            diseases: Vec::new(),
        }
    }

    pub fn with_disease(mut self, disease: DiseaseHistory) -> Self {
        self.diseases.push(disease);
        self
    }

    pub fn apply(&mut self, update: MemberUpdate) {
        match update {
            MemberUpdate::Relationship(r) => self.relationship = r,
            MemberUpdate::Smoking(s) => self.smoking = s,
            MemberUpdate::Deceased(d) => self.deceased = d,
        }
    }

    /// True when a disease is flagged as cause of death on a living member.
    pub fn has_death_conflict(&self) -> bool {
        !self.deceased && self.diseases.iter().any(|d| d.is_cause_of_death)
    }
}

/// Typed edit of a single `FamilyMember` field.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberUpdate {
    Relationship(Relationship),
    Smoking(SmokingStatus),
    Deceased(bool),
}

/// Typed edit of a single `DiseaseHistory` field.
#[derive(Debug, Clone, PartialEq)]
pub enum DiseaseUpdate {
    Name(String),
    DiagnosisAge(u32),
    CauseOfDeath(bool),
    DeathAge(Option<u32>),
    Note(Option<String>),
}

impl DiseaseHistory {
    pub fn apply(&mut self, update: DiseaseUpdate) {
        match update {
            DiseaseUpdate::Name(n) => self.name = n,
            DiseaseUpdate::DiagnosisAge(a) => self.diagnosis_age = a,
            DiseaseUpdate::CauseOfDeath(c) => self.is_cause_of_death = c,
            DiseaseUpdate::DeathAge(a) => self.death_age = a,
            DiseaseUpdate::Note(n) => self.note = n,
        }
    }
}

/// Caller-owned family history, edited during the input phase and
/// borrowed read-only by the analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyHistory {
    members: Vec<FamilyMember>,
}

impl FamilyHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &[FamilyMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// At least one relative must be recorded before moving on to the health step.
    pub fn is_ready(&self) -> bool {
        !self.members.is_empty()
    }

    /// Append a new member (father by default) and return its id.
    pub fn add_member(&mut self) -> Uuid {
        self.push(FamilyMember::new(Relationship::Father))
    }

    pub fn push(&mut self, member: FamilyMember) -> Uuid {
        let id = member.id;
        self.members.push(member);
        id
    }

    pub fn remove_member(&mut self, id: Uuid) -> Result<FamilyMember, ModelError> {
        let pos = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or(ModelError::MemberNotFound(id))?;
        Ok(self.members.remove(pos))
    }

    pub fn update_member(&mut self, id: Uuid, update: MemberUpdate) -> Result<(), ModelError> {
        self.member_mut(id)?.apply(update);
        Ok(())
    }

    /// Append a blank disease entry to a member; returns its index.
    pub fn add_disease(&mut self, id: Uuid) -> Result<usize, ModelError> {
        let member = self.member_mut(id)?;
        member.diseases.push(DiseaseHistory::default());
        Ok(member.diseases.len() - 1)
    }

    pub fn update_disease(
        &mut self,
        id: Uuid,
        index: usize,
        update: DiseaseUpdate,
    ) -> Result<(), ModelError> {
        let member = self.member_mut(id)?;
        let disease = member
            .diseases
            .get_mut(index)
            .ok_or(ModelError::DiseaseNotFound { member_id: id, index })?;
        disease.apply(update);
        Ok(())
    }

    pub fn remove_disease(&mut self, id: Uuid, index: usize) -> Result<DiseaseHistory, ModelError> {
        let member = self.member_mut(id)?;
        if index >= member.diseases.len() {
            return Err(ModelError::DiseaseNotFound { member_id: id, index });
        }
        Ok(member.diseases.remove(index))
    }

    fn member_mut(&mut self, id: Uuid) -> Result<&mut FamilyMember, ModelError> {
        self.members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ModelError::MemberNotFound(id))
    }
}

impl From<Vec<FamilyMember>> for FamilyHistory {
    fn from(members: Vec<FamilyMember>) -> Self {
        Self { members }
    }
}
