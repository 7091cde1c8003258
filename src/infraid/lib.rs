// Copyright (c) 2025, TheByteSlayer, InfraID
// Stable infrastructure identifiers for provisioned clusters, written in Rust.

pub mod cluster_id;
pub mod configuration;
pub mod error;
pub mod infra_id;
pub mod normalize;
pub mod overrides;
pub mod state;

pub use cluster_id::{ClusterId, MAX_INFRA_ID_LEN};
pub use configuration::InstallConfig;
pub use error::{ConfigError, InfraIdError};
pub use infra_id::{RANDOM_LEN, generate_infra_id};
pub use normalize::normalize;
pub use overrides::{Lookup, Overrides};
