//! Checklist item status
//!
//! Each item moves through these states as the diligence work progresses.

use serde::{Deserialize, Serialize};

/// Verification status of a checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not yet requested or verified
    #[default]
    Pending,
    /// Requested, waiting on a registry office or third party
    Waiting,
    /// Verified and regular
    Ok,
    /// Verified with an irregularity
    Issue,
    /// Document obtained but no longer valid
    Expired,
    /// Not applicable to this transaction
    Waived,
}

impl Status {
    /// All statuses, in display order
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Waiting,
        Self::Ok,
        Self::Issue,
        Self::Expired,
        Self::Waived,
    ];

    /// Whether the item no longer needs work (`ok` or `waived`)
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Ok | Self::Waived)
    }

    /// Whether the item needs attention (`issue` or `expired`)
    #[must_use]
    pub const fn needs_attention(self) -> bool {
        matches!(self, Self::Issue | Self::Expired)
    }

    /// Portuguese label shown to operators
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Waiting => "Aguardando",
            Self::Ok => "Regular",
            Self::Issue => "Irregularidade",
            Self::Expired => "Vencido",
            Self::Waived => "Dispensado",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Waiting => write!(f, "waiting"),
            Self::Ok => write!(f, "ok"),
            Self::Issue => write!(f, "issue"),
            Self::Expired => write!(f, "expired"),
            Self::Waived => write!(f, "waived"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" | "pendente" => Ok(Self::Pending),
            "waiting" | "aguardando" => Ok(Self::Waiting),
            "ok" | "regular" => Ok(Self::Ok),
            "issue" | "irregularidade" => Ok(Self::Issue),
            "expired" | "vencido" => Ok(Self::Expired),
            "waived" | "dispensado" => Ok(Self::Waived),
            _ => Err(format!(
                "Invalid status: {s}. Use: pending, waiting, ok, issue, expired, waived"
            )),
        }
    }
}
