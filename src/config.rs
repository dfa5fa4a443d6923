use crate::error::{Error, Result};
use shellexpand::tilde;
use std::{
    env,
    path::{Component, Path, PathBuf},
};

#[derive(Clone, Debug)]
pub struct BuildConfig {
    pub devtools_version: String,
    pub project_root: PathBuf,
}

impl BuildConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, env::VarError>,
    {
        let devtools_version = lookup("DEVTOOLS_VERSION")?;
        validate_devtools_version(&devtools_version)?;

        let raw_project_root = lookup("PROJECT_ROOT").unwrap_or(".".to_string());
        let project_root = Path::new(&tilde(&raw_project_root).to_string()).to_path_buf();

        let config = Self {
            devtools_version,
            project_root,
        };

        tracing::debug!("Configuration extraction successful: {:?}", config);

        Ok(config)
    }
}

// The version becomes a single path component under the serve-files directory.
fn validate_devtools_version(version: &str) -> Result<()> {
    let mut components = Path::new(version).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if !single_normal || version.trim() != version || version.contains(['/', '\\']) {
        return Err(Error::InvalidDevtoolsVersion(version.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> std::result::Result<String, env::VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned().ok_or(env::VarError::NotPresent)
    }

    #[test]
    fn reads_version_and_defaults_root() {
        let config = BuildConfig::from_lookup(lookup_from(&[("DEVTOOLS_VERSION", "1.2.3")]))
            .expect("config");
        assert_eq!(config.devtools_version, "1.2.3");
        assert_eq!(config.project_root, Path::new("."));
    }

    #[test]
    fn reads_project_root() {
        let config = BuildConfig::from_lookup(lookup_from(&[
            ("DEVTOOLS_VERSION", "@a1b2c3"),
            ("PROJECT_ROOT", "/srv/web"),
        ]))
        .expect("config");
        assert_eq!(config.project_root, Path::new("/srv/web"));
    }

    #[test]
    fn missing_version_is_an_error() {
        let err = BuildConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, Error::StdVarEnvError(env::VarError::NotPresent)));
    }

    #[test]
    fn rejects_versions_that_escape_the_servefiles_dir() {
        for version in ["", ".", "..", "../1.2.3", "1.2/3", "a\\b", " 1.2.3", "/abs"] {
            let err = BuildConfig::from_lookup(lookup_from(&[("DEVTOOLS_VERSION", version)]))
                .unwrap_err();
            assert!(
                matches!(err, Error::InvalidDevtoolsVersion(_)),
                "accepted {version:?}"
            );
        }
    }
}
