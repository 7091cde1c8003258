// Copyright (c) 2025, TheByteSlayer, InfraID
// Stable infrastructure identifiers for provisioned clusters, written in Rust.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::configuration::InstallConfig;
use crate::error::InfraIdResult;
use crate::infra_id::generate_infra_id;
use crate::normalize::is_well_formed_infra_id;
use crate::overrides::Overrides;

/// Resources named after the InfraID usually get suffixes like `-int`,
/// `-ext` or `-ctlp`, and most providers cap names at about 32 characters.
pub const MAX_INFRA_ID_LEN: usize = 27;

/// The unique ID of a cluster, immutable during the cluster's life.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClusterId {
    /// Globally unique identifier.
    pub uuid: String,
    /// Human friendly identifier used to name infrastructure resources.
    pub infra_id: String,
}

impl ClusterId {
    pub fn generate(config: &InstallConfig, overrides: &mut Overrides) -> InfraIdResult<Self> {
        Ok(Self {
            infra_id: generate_infra_id(config.cluster_name(), MAX_INFRA_ID_LEN, overrides)?,
            uuid: Uuid::new_v4().to_string(),
        })
    }

    pub fn is_valid(&self) -> bool {
        Uuid::parse_str(&self.uuid).is_ok() && is_well_formed_infra_id(&self.infra_id)
    }
}
