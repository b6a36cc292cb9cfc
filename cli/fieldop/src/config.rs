//! `fieldop.toml` configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use fieldop_platform::{CommandProbe, VersionFile};
use fieldop_rules::{default_rules_path, CachedFileRules, FileRules, RulesSource};
use serde::{Deserialize, Serialize};

/// Configuration file name searched for by [`FieldopConfig::find_and_load`].
pub const CONFIG_FILE_NAME: &str = "fieldop.toml";

/// The top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldopConfig {
    pub rules: RulesConfig,
    pub device: DeviceConfig,
    pub probe: ProbeConfig,
}

/// `[rules]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RulesConfig {
    /// Rules document path (default: next to the executable).
    pub path: Option<PathBuf>,
    /// Keep the parsed document until the file changes.
    pub cache: bool,
}

/// `[device]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct DeviceConfig {
    pub version_file: Option<PathBuf>,
}

/// `[probe]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProbeConfig {
    pub hwsku_command: Option<Vec<String>>,
    pub pci_command: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

impl FieldopConfig {
    /// Search upward from `start_dir` for `fieldop.toml`, parse and return it
    /// along with the path it was read from.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((config, candidate)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Effective rules path: `--rules` flag, then config, then the default.
    pub fn rules_path(&self, flag: Option<&Path>) -> Result<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.rules.path.clone())
            .or_else(default_rules_path)
            .context("cannot determine rules path; pass --rules")
    }

    /// Build the rules source.
    pub fn rules_source(&self, flag: Option<&Path>) -> Result<Box<dyn RulesSource>> {
        let path = self.rules_path(flag)?;
        Ok(if self.rules.cache {
            Box::new(CachedFileRules::new(path))
        } else {
            Box::new(FileRules::new(path))
        })
    }

    pub fn version_file(&self) -> VersionFile {
        match &self.device.version_file {
            Some(path) => VersionFile::new(path),
            None => VersionFile::default(),
        }
    }

    pub fn probe(&self) -> CommandProbe {
        CommandProbe::new(
            self.probe
                .hwsku_command
                .clone()
                .unwrap_or_else(CommandProbe::default_hwsku_command),
            self.probe
                .pci_command
                .clone()
                .unwrap_or_else(CommandProbe::default_pci_command),
            self.probe
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(CommandProbe::DEFAULT_TIMEOUT),
        )
    }
}

/// Load the configuration named by `--config`, or discover one from `cwd`.
pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<FieldopConfig> {
    if let Some(path) = explicit {
        return FieldopConfig::load(path);
    }
    Ok(FieldopConfig::find_and_load(cwd)?
        .map(|(config, path)| {
            tracing::debug!(path = %path.display(), "using configuration");
            config
        })
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = FieldopConfig::parse(
            r#"
[rules]
path = "/usr/share/fieldop/gcu_field_operation_validators.conf.json"
cache = true

[device]
version-file = "/tmp/sonic_version.yml"

[probe]
hwsku-command = ["cat", "/tmp/hwsku"]
pci-command = ["lspci"]
timeout-secs = 3
"#,
        )
        .unwrap();
        assert!(config.rules.cache);
        assert_eq!(
            config.device.version_file.as_deref(),
            Some(Path::new("/tmp/sonic_version.yml"))
        );
        let probe = config.probe();
        assert_eq!(probe.timeout(), Duration::from_secs(3));
        assert_eq!(config.version_file().path(), Path::new("/tmp/sonic_version.yml"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = FieldopConfig::parse("").unwrap();
        assert_eq!(config, FieldopConfig::default());
        assert_eq!(config.probe().timeout(), CommandProbe::DEFAULT_TIMEOUT);
        assert_eq!(
            config.version_file().path(),
            Path::new(fieldop_platform::DEFAULT_VERSION_FILE)
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FieldopConfig::parse("[rules]\nfile = \"x\"\n").is_err());
        assert!(FieldopConfig::parse("[telemetry]\n").is_err());
    }

    #[test]
    fn rules_flag_overrides_config() {
        let config = FieldopConfig::parse("[rules]\npath = \"/etc/a.json\"\n").unwrap();
        assert_eq!(config.rules_path(None).unwrap(), Path::new("/etc/a.json"));
        assert_eq!(
            config.rules_path(Some(Path::new("/tmp/b.json"))).unwrap(),
            Path::new("/tmp/b.json")
        );
    }

    #[test]
    fn find_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[rules]\ncache = true\n").unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = FieldopConfig::find_and_load(&nested).unwrap().unwrap();
        assert!(config.rules.cache);
        assert_eq!(path, dir.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn resolve_prefers_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "[probe]\ntimeout-secs = 1\n").unwrap();
        let config = resolve(Some(&explicit), dir.path()).unwrap();
        assert_eq!(config.probe.timeout_secs, Some(1));

        let missing = dir.path().join("missing.toml");
        assert!(resolve(Some(&missing), dir.path()).is_err());
    }
}
