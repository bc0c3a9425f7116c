use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const ACTIVITIES_PATH: &str = "api/activities";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppProfile {
    Dev,
    Prod,
}

impl AppProfile {
    pub fn from_env(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            Some("prod") | Some("production") => Self::Prod,
            _ => Self::Dev,
        }
    }

    pub fn log_level(self) -> tracing::Level {
        match self {
            Self::Dev => tracing::Level::DEBUG,
            Self::Prod => tracing::Level::INFO,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub profile: AppProfile,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            profile: AppProfile::Dev,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        crate::config::load_dotenv();

        let mut config = Self::default();

        if let Some(url) = read_env("ACTIVITY_API_BASE_URL").filter(|url| !url.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }

        config.profile = AppProfile::from_env(read_env("ACTIVITY_PROFILE"));

        config
    }

    /// Collection endpoint, e.g. `http://localhost:8080/api/activities`.
    pub fn activities_endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            ACTIVITIES_PATH
        )
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| option_env_from_build(key).map(|s| s.to_string()))
}

fn option_env_from_build(key: &str) -> Option<&'static str> {
    match key {
        "ACTIVITY_API_BASE_URL" => option_env!("ACTIVITY_API_BASE_URL"),
        "ACTIVITY_PROFILE" => option_env!("ACTIVITY_PROFILE"),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            tracing::warn!("failed to load .env: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn load_dotenv() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_defaults_to_dev() {
        assert_eq!(AppProfile::from_env(None), AppProfile::Dev);
        assert_eq!(AppProfile::from_env(Some("staging".into())), AppProfile::Dev);
        assert_eq!(AppProfile::from_env(Some("prod".into())), AppProfile::Prod);
        assert_eq!(
            AppProfile::from_env(Some(" production ".into())),
            AppProfile::Prod
        );
    }

    #[test]
    fn profile_picks_log_level() {
        assert_eq!(AppProfile::Dev.log_level(), tracing::Level::DEBUG);
        assert_eq!(AppProfile::Prod.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let mut config = AppConfig::default();
        assert_eq!(
            config.activities_endpoint(),
            "http://localhost:8080/api/activities"
        );

        config.api_base_url = "https://tracker.example.com/".into();
        assert_eq!(
            config.activities_endpoint(),
            "https://tracker.example.com/api/activities"
        );
    }
}
