//! Lifecycle status shared by accounts, VPCs and subnets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationErrors};

/// Status of an AWS resource record.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AwsStatus {
    #[default]
    Active,
    Inactive,
    PendingActivation,
}

impl AwsStatus {
    /// All values in declaration order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::PendingActivation];

    /// Stored and wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::PendingActivation => "PENDING_ACTIVATION",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::PendingActivation => "Pending Activation",
        }
    }

    /// Color tag used when rendering the status badge.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Active => "green",
            Self::Inactive => "red",
            Self::PendingActivation => "orange",
        }
    }
}

impl fmt::Display for AwsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AwsStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(ValidationErrors::single(
                    "status",
                    format!("\"{s}\" is not a valid choice."),
                ))
            })
    }
}

/// Read-side rendering of a status: value, label and color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub value: AwsStatus,
    pub label: &'static str,
    pub color: &'static str,
}

impl From<AwsStatus> for StatusView {
    fn from(status: AwsStatus) -> Self {
        Self {
            value: status,
            label: status.label(),
            color: status.color(),
        }
    }
}
