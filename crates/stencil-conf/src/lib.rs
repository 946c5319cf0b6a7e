use camino::Utf8Path;
use camino::Utf8PathBuf;
use config::Config;
use config::ConfigError as ExternalConfigError;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error")]
    Config(#[from] ExternalConfigError),
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub debug: bool,
    /// Content root that relative physical paths are computed against.
    pub root: Option<Utf8PathBuf>,
    /// Logical prefix hierarchical lookups stop at.
    pub base_path: String,
    /// Directory for the rolling log file. No file logging when unset.
    pub log_dir: Option<Utf8PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            root: None,
            base_path: "/".to_string(),
            log_dir: None,
        }
    }
}

impl Settings {
    pub fn new(project_root: &Utf8Path) -> Result<Self, ConfigError> {
        let user_config_file = ProjectDirs::from("com.github", "stencil", "stencil")
            .and_then(|dirs| Utf8PathBuf::from_path_buf(dirs.config_dir().join("stencil.toml")).ok());

        Self::load_from_paths(project_root, user_config_file.as_deref())
    }

    fn load_from_paths(
        project_root: &Utf8Path,
        user_config_path: Option<&Utf8Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            builder = builder.add_source(
                File::from(path.as_std_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            File::from(project_root.join(".stencil.toml").as_std_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            File::from(project_root.join("stencil.toml").as_std_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        tracing::debug!(?settings, %project_root, "loaded settings");
        Ok(settings)
    }

    /// The configured root, resolved against `project_root` when relative.
    #[must_use]
    pub fn resolved_root(&self, project_root: &Utf8Path) -> Option<Utf8PathBuf> {
        self.root.as_ref().map(|root| {
            if root.is_relative() {
                project_root.join(root)
            } else {
                root.clone()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn utf8(path: &std::path::Path) -> &Utf8Path {
        Utf8Path::from_path(path).unwrap()
    }

    mod defaults {
        use super::*;

        #[test]
        fn test_load_no_files() {
            let dir = tempdir().unwrap();
            let settings = Settings::load_from_paths(utf8(dir.path()), None).unwrap();
            assert_eq!(settings, Settings::default());
            assert_eq!(settings.base_path, "/");
        }
    }

    mod project_files {
        use super::*;

        #[test]
        fn test_load_stencil_toml_only() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("stencil.toml"), "debug = true").unwrap();
            let settings = Settings::load_from_paths(utf8(dir.path()), None).unwrap();
            assert!(settings.debug);
        }

        #[test]
        fn test_load_dot_stencil_toml_only() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join(".stencil.toml"), "debug = true").unwrap();
            let settings = Settings::load_from_paths(utf8(dir.path()), None).unwrap();
            assert!(settings.debug);
        }

        #[test]
        fn test_load_all_fields() {
            let dir = tempdir().unwrap();
            fs::write(
                dir.path().join("stencil.toml"),
                "root = \"site\"\nbase_path = \"/Areas/Admin\"\nlog_dir = \"/tmp/stencil\"\n",
            )
            .unwrap();
            let settings = Settings::load_from_paths(utf8(dir.path()), None).unwrap();
            assert_eq!(
                settings,
                Settings {
                    debug: false,
                    root: Some(Utf8PathBuf::from("site")),
                    base_path: "/Areas/Admin".to_string(),
                    log_dir: Some(Utf8PathBuf::from("/tmp/stencil")),
                }
            );
        }
    }

    mod priority {
        use super::*;

        #[test]
        fn test_stencil_overrides_dot_stencil() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join(".stencil.toml"), "debug = false").unwrap();
            fs::write(dir.path().join("stencil.toml"), "debug = true").unwrap();
            let settings = Settings::load_from_paths(utf8(dir.path()), None).unwrap();
            assert!(settings.debug);
        }

        #[test]
        fn test_project_overrides_user() {
            let user_dir = tempdir().unwrap();
            let project_dir = tempdir().unwrap();
            let user_conf_path = user_dir.path().join("stencil.toml");
            fs::write(&user_conf_path, "debug = true\nbase_path = \"/user\"").unwrap();
            fs::write(project_dir.path().join(".stencil.toml"), "debug = false").unwrap();

            let settings =
                Settings::load_from_paths(utf8(project_dir.path()), Some(utf8(&user_conf_path)))
                    .unwrap();
            assert!(!settings.debug);
            // Keys the project does not set still come from the user file.
            assert_eq!(settings.base_path, "/user");
        }
    }

    mod user_config {
        use super::*;

        #[test]
        fn test_load_user_config_only() {
            let user_dir = tempdir().unwrap();
            let project_dir = tempdir().unwrap();
            let user_conf_path = user_dir.path().join("stencil.toml");
            fs::write(&user_conf_path, "debug = true").unwrap();

            let settings =
                Settings::load_from_paths(utf8(project_dir.path()), Some(utf8(&user_conf_path)))
                    .unwrap();
            assert!(settings.debug);
        }

        #[test]
        fn test_missing_user_config_file_is_ignored() {
            let user_dir = tempdir().unwrap();
            let project_dir = tempdir().unwrap();
            let user_conf_path = user_dir.path().join("stencil.toml");

            let settings =
                Settings::load_from_paths(utf8(project_dir.path()), Some(utf8(&user_conf_path)))
                    .unwrap();
            assert_eq!(settings, Settings::default());
        }
    }

    mod root {
        use super::*;

        #[test]
        fn test_relative_root_is_joined() {
            let settings = Settings {
                root: Some(Utf8PathBuf::from("site")),
                ..Settings::default()
            };
            assert_eq!(
                settings.resolved_root(Utf8Path::new("/project")),
                Some(Utf8PathBuf::from("/project/site"))
            );
        }

        #[test]
        fn test_absolute_root_is_kept() {
            let settings = Settings {
                root: Some(Utf8PathBuf::from("/srv/site")),
                ..Settings::default()
            };
            assert_eq!(
                settings.resolved_root(Utf8Path::new("/project")),
                Some(Utf8PathBuf::from("/srv/site"))
            );
        }

        #[test]
        fn test_no_root() {
            assert_eq!(Settings::default().resolved_root(Utf8Path::new("/project")), None);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_invalid_toml_content() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("stencil.toml"), "debug = not_a_boolean").unwrap();
            let result = Settings::load_from_paths(utf8(dir.path()), None);
            assert!(matches!(result.unwrap_err(), ConfigError::Config(_)));
        }
    }
}
