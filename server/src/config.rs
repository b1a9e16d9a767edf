use anyhow::{Result, anyhow};
use platform_db::RestSettings;

const DEFAULT_SITE_TITLE: &str = "Employee Directory Dashboard";

/// Where the directory reads employees from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSourceConfig {
    /// Direct Postgres connection via `DATABASE_URL`.
    Postgres,
    /// The hosted service's REST interface.
    Rest(RestSettings),
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_source: DataSourceConfig,
    pub site_title: String,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let env_required =
            |key: &str| env(key).ok_or_else(|| anyhow!("missing env {}", key));

        let supabase_url = env("SUPABASE_URL");
        let kind = env("DATA_SOURCE")
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_else(|| {
                if supabase_url.is_some() {
                    "rest".into()
                } else {
                    "postgres".into()
                }
            });
        let data_source = match kind.as_str() {
            "postgres" | "postgresql" => DataSourceConfig::Postgres,
            "rest" | "supabase" => DataSourceConfig::Rest(RestSettings {
                base_url: supabase_url.ok_or_else(|| anyhow!("missing env SUPABASE_URL"))?,
                api_key: env_required("SUPABASE_ANON_KEY")?,
            }),
            other => {
                return Err(anyhow!(
                    "unknown DATA_SOURCE {other:?}; expected postgres or rest"
                ));
            }
        };

        let site_title = env("SITE_TITLE").unwrap_or_else(|| DEFAULT_SITE_TITLE.into());

        let cors_allowed_origins = env("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            data_source,
            site_title,
            cors_allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_postgres() {
        let config = load(&[]).unwrap();
        assert_eq!(config.data_source, DataSourceConfig::Postgres);
        assert_eq!(config.site_title, DEFAULT_SITE_TITLE);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn supabase_url_selects_rest() {
        let config = load(&[
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, ,http://b.test"),
        ])
        .unwrap();
        assert_eq!(
            config.data_source,
            DataSourceConfig::Rest(RestSettings {
                base_url: "https://project.supabase.co".into(),
                api_key: "anon".into(),
            })
        );
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn explicit_postgres_wins_over_supabase_url() {
        let config = load(&[
            ("DATA_SOURCE", "Postgres"),
            ("SUPABASE_URL", "https://project.supabase.co"),
        ])
        .unwrap();
        assert_eq!(config.data_source, DataSourceConfig::Postgres);
    }

    #[test]
    fn rest_requires_anon_key() {
        let err = load(&[("SUPABASE_URL", "https://project.supabase.co")]).unwrap_err();
        assert_eq!(err.to_string(), "missing env SUPABASE_ANON_KEY");
    }

    #[test]
    fn unknown_source_is_rejected() {
        let err = load(&[("DATA_SOURCE", "mysql")]).unwrap_err();
        assert!(err.to_string().contains("unknown DATA_SOURCE"));
    }
}
