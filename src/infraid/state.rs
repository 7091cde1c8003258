// Copyright (c) 2025, TheByteSlayer, InfraID
// Stable infrastructure identifiers for provisioned clusters, written in Rust.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::cluster_id::ClusterId;
use crate::configuration::InstallConfig;
use crate::error::ConfigResult;
use crate::overrides::Overrides;

pub const STATE_FILE: &str = ".clusterid.json";

pub fn state_path(dir: &Path) -> PathBuf {
    dir.join(STATE_FILE)
}

/// Reads a previously generated ClusterId from `dir`.
///
/// Returns `Ok(None)` when there is no state file, or when it does not hold
/// a valid record.
pub fn load(dir: &Path) -> ConfigResult<Option<ClusterId>> {
    let path = state_path(dir);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    match serde_json::from_str::<ClusterId>(&content) {
        Ok(cluster_id) if cluster_id.is_valid() => Ok(Some(cluster_id)),
        Ok(cluster_id) => {
            warn!("Discarding invalid cluster id in {}: {:?}", path.display(), cluster_id);
            Ok(None)
        }
        Err(e) => {
            warn!("Discarding unreadable state {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

pub fn save(dir: &Path, cluster_id: &ClusterId) -> ConfigResult<()> {
    let content = serde_json::to_string_pretty(cluster_id)?;
    fs::write(state_path(dir), content)?;
    Ok(())
}

/// Reuses the ClusterId stored in `dir`, or generates and stores a new one.
pub fn load_or_generate(
    dir: &Path,
    config: &InstallConfig,
    overrides: &mut Overrides,
) -> ConfigResult<ClusterId> {
    if let Some(cluster_id) = load(dir)? {
        info!("Resuming with cluster id {} from {}", cluster_id.infra_id, STATE_FILE);
        return Ok(cluster_id);
    }

    let cluster_id = ClusterId::generate(config, overrides)?;
    save(dir, &cluster_id)?;
    Ok(cluster_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, InfraIdError};
    use crate::overrides::INFRA_ID_SUFFIX_KEY;

    #[test]
    fn generates_then_resumes() {
        let dir = tempfile::tempdir().unwrap();
        let config = InstallConfig::new("poc");

        let first = load_or_generate(dir.path(), &config, &mut Overrides::new(dir.path())).unwrap();
        assert!(state_path(dir.path()).exists());

        let renamed = InstallConfig::new("renamed");
        let second =
            load_or_generate(dir.path(), &renamed, &mut Overrides::new(dir.path())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn leading_dash_cluster_id_is_resumed() {
        let dir = tempfile::tempdir().unwrap();
        let config = InstallConfig::new("@poc");

        let first = load_or_generate(dir.path(), &config, &mut Overrides::new(dir.path())).unwrap();
        assert!(first.infra_id.starts_with("-poc-"));

        let second =
            load_or_generate(dir.path(), &config, &mut Overrides::new(dir.path())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn double_dash_cluster_id_is_resumed() {
        let dir = tempfile::tempdir().unwrap();
        let config = InstallConfig::new("poc");
        let mut overrides = Overrides::new(dir.path()).with_env(INFRA_ID_SUFFIX_KEY, "_001");

        let first = load_or_generate(dir.path(), &config, &mut overrides).unwrap();
        assert_eq!(first.infra_id, "poc--001");
        assert_eq!(load(dir.path()).unwrap(), Some(first));
    }

    #[test]
    fn corrupt_state_is_regenerated() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(state_path(dir.path()), "{ not json").unwrap();

        let config = InstallConfig::new("poc");
        let id = load_or_generate(dir.path(), &config, &mut Overrides::new(dir.path())).unwrap();
        assert!(id.infra_id.starts_with("poc-"));
        assert_eq!(load(dir.path()).unwrap(), Some(id));
    }

    #[test]
    fn invalid_state_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            state_path(dir.path()),
            r#"{"uuid": "nope", "infra_id": "poc-001"}"#,
        )
        .unwrap();
        assert_eq!(load(dir.path()).unwrap(), None);
    }

    #[test]
    fn invalid_cluster_name_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let config = InstallConfig::new("...");
        let result = load_or_generate(dir.path(), &config, &mut Overrides::new(dir.path()));
        assert!(matches!(
            result,
            Err(ConfigError::InfraId(InfraIdError::InvalidInput(_)))
        ));
        assert!(!state_path(dir.path()).exists());
    }
}
