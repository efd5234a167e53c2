//! Identity stat implementation

use super::{StatTrait, StatType};

/// Identity stat - draws the layer frame unchanged
#[derive(Debug, Clone, Copy)]
pub struct Identity;

impl StatTrait for Identity {
    fn stat_type(&self) -> StatType {
        StatType::Identity
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "identity")
    }
}
