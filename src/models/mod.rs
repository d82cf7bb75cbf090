pub mod analysis;
pub mod enums;
pub mod family;
pub mod health;

pub use analysis::*;
pub use enums::*;
pub use family::*;
pub use health::*;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid value for {field}: '{value}'")]
    InvalidEnum { field: String, value: String },

    #[error("Family member not found: {0}")]
    MemberNotFound(Uuid),

    #[error("Disease index {index} out of range for member {member_id}")]
    DiseaseNotFound { member_id: Uuid, index: usize },
}
