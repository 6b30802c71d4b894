use crate::utils::error::{Result, UpdaterError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TARGET_FILE: &str = "pom.xml";

/// A repository every descriptor must declare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySpec {
    pub id: String,
    pub url: String,
    pub snapshots_enabled: bool,
}

impl RepositorySpec {
    pub fn new(id: impl Into<String>, url: impl Into<String>, snapshots_enabled: bool) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            snapshots_enabled,
        }
    }

    /// Compares the whole text, ignoring ASCII case only. Padded ids do not match.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id)
    }
}

/// Values pinned across every descriptor. Immutable once handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinConfig {
    pub target_file: String,
    pub snapshot_repository: RepositorySpec,
    pub milestone_repository: RepositorySpec,
    pub platform_version: String,
    pub secondary_version: String,
    pub secondary_artifact: String,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            target_file: DEFAULT_TARGET_FILE.to_string(),
            snapshot_repository: RepositorySpec::new(
                "spring-snapshots",
                "https://repo.spring.io/snapshot",
                true,
            ),
            milestone_repository: RepositorySpec::new(
                "spring-milestones",
                "https://repo.spring.io/milestone",
                false,
            ),
            platform_version: "2.0.6.RELEASE".to_string(),
            secondary_version: "Finchley.SR2".to_string(),
            secondary_artifact: "spring-cloud-dependencies".to_string(),
        }
    }
}

impl PinConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| UpdaterError::file_io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，未提供的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| UpdaterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOOT_VERSION})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| UpdaterError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Snapshot repository first, then milestones; this is also the insertion order.
    pub fn required_repositories(&self) -> [&RepositorySpec; 2] {
        [&self.snapshot_repository, &self.milestone_repository]
    }

    pub fn is_required_repository_id(&self, id: &str) -> bool {
        self.required_repositories()
            .iter()
            .any(|repo| repo.matches_id(id))
    }
}

impl Validate for PinConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_file_name("target_file", &self.target_file)?;

        for (field, repo) in [
            ("snapshot_repository", &self.snapshot_repository),
            ("milestone_repository", &self.milestone_repository),
        ] {
            validation::validate_non_empty_string(&format!("{}.id", field), &repo.id)?;
            validation::validate_url(&format!("{}.url", field), &repo.url)?;
        }
        validation::validate_distinct_ids(
            "milestone_repository.id",
            &self.snapshot_repository.id,
            &self.milestone_repository.id,
        )?;

        validation::validate_non_empty_string("platform_version", &self.platform_version)?;
        validation::validate_non_empty_string("secondary_version", &self.secondary_version)?;
        validation::validate_non_empty_string("secondary_artifact", &self.secondary_artifact)?;

        tracing::debug!("✅ Pin configuration validation passed");
        Ok(())
    }
}
