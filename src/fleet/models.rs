// ABOUTME: Wire types for the fleet API.
// ABOUTME: Capability flags decide which release protocol a fleet accepts.

use crate::build::ImageRecord;
use crate::project::Composition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability flags derived from the fleet's application type.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetCapabilities {
    pub is_legacy: bool,
    pub supports_multicontainer: bool,
}

/// A fleet as reported by the metadata API.
#[derive(Debug, Clone, Deserialize)]
pub struct Fleet {
    pub id: u64,
    pub slug: String,
    pub arch: String,
    pub device_type: String,

    #[serde(rename = "application_type")]
    pub capabilities: TargetCapabilities,
}

/// The authenticated user, as reported by whoami.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
}

/// Identifier returned by the legacy deploy endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ReleaseId(pub u64);

impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable, versioned deployment unit identified by a commit token.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub id: ReleaseId,
    pub commit: String,
}

/// Payload for the legacy single-image deploy protocol.
#[derive(Debug, Clone, Serialize)]
pub struct LegacyDeployRequest {
    pub fleet: String,
    pub username: String,
    pub image_name: String,
    /// Omitted when log upload is suppressed.
    pub build_logs: Option<String>,
}

/// Payload for the modern multi-container release protocol.
#[derive(Debug, Serialize)]
pub struct ReleaseRequest {
    pub fleet_id: u64,
    pub user_id: u64,
    pub composition: Composition,
    pub images: Vec<ImageRecord>,
    pub suppress_log_upload: bool,
}
