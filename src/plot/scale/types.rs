//! Scale and guide types

use serde::{Deserialize, Serialize};

use super::{LabelFormat, ScaleTypeKind};
use crate::plot::aesthetic;

/// Scale for one aesthetic
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    /// Aesthetic this scale applies to (e.g. "y", "fill")
    pub aesthetic: String,
    /// Explicit scale type; inferred from the data when `None`
    pub scale_type: Option<ScaleTypeKind>,
    /// How to label breaks
    pub labels: Option<LabelFormat>,
    /// Axis or legend title
    pub name: Option<String>,
}

impl Scale {
    pub fn new(aesthetic: &str) -> Self {
        Self {
            aesthetic: aesthetic::normalize(aesthetic).to_string(),
            scale_type: None,
            labels: None,
            name: None,
        }
    }

    pub fn continuous(aesthetic: &str) -> Self {
        Self {
            scale_type: Some(ScaleTypeKind::Continuous),
            ..Self::new(aesthetic)
        }
    }

    pub fn discrete(aesthetic: &str) -> Self {
        Self {
            scale_type: Some(ScaleTypeKind::Discrete),
            ..Self::new(aesthetic)
        }
    }

    pub fn with_labels(mut self, labels: LabelFormat) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

/// Guide for one aesthetic (legend or axis)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub aesthetic: String,
    pub guide_type: GuideType,
    /// Show legend keys in reverse order
    pub reverse: bool,
}

/// Guide types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideType {
    Legend,
    Axis,
    /// Hide the guide
    None,
}

impl Guide {
    pub fn legend(aesthetic: &str) -> Self {
        Self {
            aesthetic: aesthetic::normalize(aesthetic).to_string(),
            guide_type: GuideType::Legend,
            reverse: false,
        }
    }

    pub fn none(aesthetic: &str) -> Self {
        Self {
            guide_type: GuideType::None,
            ..Self::legend(aesthetic)
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}
