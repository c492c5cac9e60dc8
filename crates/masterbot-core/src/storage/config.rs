//! TOML-based user configuration.
//!
//! Stores:
//! - User profile and home location
//! - Reasoning backend selection and credentials
//! - Interests, preferred time slots and travel tolerance
//! - Recommendation engine settings
//!
//! Configuration is stored at `~/.config/masterbot/config.toml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use super::config_dir;
use crate::error::{ConfigError, CoreError, ValidationError};
use crate::preferences::{Preferences, TimeWindow, User};
use crate::reasoning::ReasoningProvider;
use crate::recommend::EnrichmentScope;

/// Who the user is and where they live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

/// Settings for one hosted reasoning backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiServiceConfig {
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Overrides the provider's public endpoint when non-empty.
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,
}

impl AiServiceConfig {
    fn defaults_for(provider: ReasoningProvider) -> Self {
        Self {
            api_key: String::new(),
            model: provider.default_model().to_string(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            base_url: String::new(),
            timeout_secs: default_request_timeout_secs(),
        }
    }

    /// The configured key, or the provider's environment variable when the
    /// configured key is empty.
    pub fn resolved_api_key(&self, provider: ReasoningProvider) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var(provider.api_key_env_var()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiServicesConfig {
    /// "openai" or "claude".
    #[serde(default = "default_provider")]
    pub default_provider: String,
    #[serde(default = "default_openai")]
    pub openai: AiServiceConfig,
    #[serde(default = "default_claude")]
    pub claude: AiServiceConfig,
}

impl AiServicesConfig {
    pub fn for_provider(&self, provider: ReasoningProvider) -> &AiServiceConfig {
        match provider {
            ReasoningProvider::OpenAi => &self.openai,
            ReasoningProvider::Claude => &self.claude,
        }
    }

    pub fn for_provider_mut(&mut self, provider: ReasoningProvider) -> &mut AiServiceConfig {
        match provider {
            ReasoningProvider::OpenAi => &mut self.openai,
            ReasoningProvider::Claude => &mut self.claude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    #[serde(default)]
    pub interests: BTreeMap<String, i64>,
    #[serde(default)]
    pub preferred_time_slots: Vec<TimeWindow>,
    #[serde(default = "default_max_travel_distance_km")]
    pub max_travel_distance_km: f64,
    #[serde(default = "default_transportation")]
    pub preferred_transportation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
    #[serde(default = "default_enrichment_timeout_secs")]
    pub enrichment_timeout_secs: u64,
    #[serde(default)]
    pub enrichment_scope: EnrichmentScope,
    /// Display threshold for the CLI; the engine itself ranks everything.
    #[serde(default)]
    pub min_recommendation_score: f64,
}

impl EngineConfig {
    pub fn enrichment_timeout(&self) -> Duration {
        Duration::from_secs(self.enrichment_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// The user settings document.
///
/// Serialized to/from TOML at `~/.config/masterbot/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub ai_services: AiServicesConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub app: AppConfig,
}

// Default functions
fn default_name() -> String {
    "User".into()
}
fn default_email() -> String {
    "user@example.com".into()
}
fn default_timezone() -> String {
    "UTC".into()
}
fn default_provider() -> String {
    ReasoningProvider::OpenAi.as_str().into()
}
fn default_openai() -> AiServiceConfig {
    AiServiceConfig::defaults_for(ReasoningProvider::OpenAi)
}
fn default_claude() -> AiServiceConfig {
    AiServiceConfig::defaults_for(ReasoningProvider::Claude)
}
fn default_max_tokens() -> u32 {
    1000
}
fn default_temperature() -> f64 {
    0.7
}
fn default_request_timeout_secs() -> u64 {
    60
}
fn default_max_travel_distance_km() -> f64 {
    25.0
}
fn default_transportation() -> Vec<String> {
    vec!["walking".into(), "public_transport".into()]
}
fn default_max_recommendations() -> usize {
    5
}
fn default_enrichment_timeout_secs() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            email: default_email(),
            phone_number: String::new(),
            location: LocationConfig::default(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            timezone: default_timezone(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

impl Default for AiServicesConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            openai: default_openai(),
            claude: default_claude(),
        }
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            interests: BTreeMap::new(),
            preferred_time_slots: Vec::new(),
            max_travel_distance_km: default_max_travel_distance_km(),
            preferred_transportation: default_transportation(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_recommendations: default_max_recommendations(),
            enrichment_timeout_secs: default_enrichment_timeout_secs(),
            enrichment_scope: EnrichmentScope::default(),
            min_recommendation_score: 0.0,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl UserConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn default_path() -> Result<PathBuf, CoreError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default path, writing defaults there if it is missing.
    ///
    /// # Errors
    ///
    /// See [`UserConfig::load_from`].
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`. A missing file is replaced by the defaults, which
    /// are written to `path` so the user has something to edit.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, creating defaults");
            let cfg = Self::default();
            cfg.save_to(path)?;
            return Ok(cfg);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(cfg)
    }

    /// Persist to the default path.
    ///
    /// # Errors
    ///
    /// See [`UserConfig::save_to`].
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::default_path()?)
    }

    /// Persist to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. The key must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    pub fn add_interest(&mut self, tag: impl Into<String>, weight: i64) {
        self.preferences.interests.insert(tag.into(), weight);
    }

    pub fn remove_interest(&mut self, tag: &str) -> bool {
        self.preferences.interests.remove(tag).is_some()
    }

    /// Set the backend and store its key.
    pub fn set_ai_provider(&mut self, provider: ReasoningProvider, api_key: impl Into<String>) {
        self.ai_services.default_provider = provider.as_str().to_string();
        self.ai_services.for_provider_mut(provider).api_key = api_key.into();
    }

    /// Every problem with this config. Empty means valid.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.profile.name.trim().is_empty() {
            errors.push(ValidationError::Empty {
                field: "profile.name".into(),
            });
        }
        if !self.profile.email.contains('@') {
            errors.push(ValidationError::InvalidEmail);
        }

        match self.ai_services.default_provider.parse::<ReasoningProvider>() {
            Ok(provider) => {
                let service = self.ai_services.for_provider(provider);
                if service.resolved_api_key(provider).is_empty() {
                    errors.push(ValidationError::MissingApiKey {
                        provider: provider.to_string(),
                    });
                }
                if !service.base_url.is_empty() {
                    if let Err(e) = Url::parse(&service.base_url) {
                        errors.push(ValidationError::InvalidValue {
                            field: format!("ai_services.{provider}.base_url"),
                            message: e.to_string(),
                        });
                    }
                }
            }
            Err(_) => errors.push(ValidationError::UnknownProvider(
                self.ai_services.default_provider.clone(),
            )),
        }

        if self.preferences.max_travel_distance_km <= 0.0 {
            errors.push(ValidationError::NonPositiveDistance(
                self.preferences.max_travel_distance_km,
            ));
        }

        for (index, slot) in self.preferences.preferred_time_slots.iter().enumerate() {
            for hour in [slot.start_hour, slot.end_hour] {
                if hour > 23 {
                    errors.push(ValidationError::HourOutOfRange { index, hour });
                }
            }
            if slot.is_wrap_around() {
                errors.push(ValidationError::WrapAroundSlot {
                    index,
                    start_hour: slot.start_hour,
                    end_hour: slot.end_hour,
                });
            }
        }

        errors
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Build the core preference model. The profile city is the home location.
    pub fn to_preferences(&self) -> Preferences {
        let mut preferences = Preferences::new();
        for (tag, weight) in &self.preferences.interests {
            preferences.add_interest(tag.clone(), *weight);
        }
        preferences.set_time_windows(self.preferences.preferred_time_slots.clone());
        preferences.set_home_location(self.profile.location.city.clone());
        preferences.set_max_travel_distance(self.preferences.max_travel_distance_km);
        preferences
    }

    pub fn to_user(&self) -> User {
        User::new(self.profile.name.clone(), self.profile.email.clone())
            .with_preferences(self.to_preferences())
    }

    /// Copy interest weights back from `preferences`, e.g. after reinforcement.
    pub fn absorb_interests(&mut self, preferences: &Preferences) {
        self.preferences.interests = preferences.interests().clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn valid_config() -> UserConfig {
        let mut cfg = UserConfig::default();
        cfg.set_ai_provider(ReasoningProvider::OpenAi, "sk-test");
        cfg
    }

    #[test]
    fn default_config_roundtrip() {
        let cfg = UserConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: UserConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.profile.name, "User");
        assert_eq!(parsed.ai_services.openai.model, "gpt-3.5-turbo");
        assert_eq!(parsed.ai_services.claude.model, "claude-3-sonnet-20240229");
        assert_eq!(parsed.engine.max_recommendations, 5);
    }

    #[test]
    fn partial_document_fills_defaults() {
        let parsed: UserConfig = toml::from_str(
            r#"
            [profile]
            name = "Ada"

            [profile.location]
            city = "San Francisco"

            [preferences.interests]
            music = 5
            technology = 3

            [[preferences.preferred_time_slots]]
            start_hour = 18
            end_hour = 23
            days = ["Fri", "saturday"]
            "#,
        )
        .unwrap();

        assert_eq!(parsed.profile.name, "Ada");
        assert_eq!(parsed.profile.email, "user@example.com");
        assert_eq!(parsed.profile.location.timezone, "UTC");
        assert_eq!(parsed.preferences.interests["music"], 5);
        assert_eq!(
            parsed.preferences.preferred_time_slots,
            [TimeWindow::new(18, 23).with_days([Weekday::Fri, Weekday::Sat])]
        );
        assert_eq!(parsed.preferences.max_travel_distance_km, 25.0);
        assert_eq!(parsed.ai_services.default_provider, "openai");
    }

    #[test]
    fn load_from_missing_path_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = UserConfig::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.profile.name, "User");
    }

    #[test]
    fn save_then_load_preserves_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = valid_config();
        cfg.add_interest("jazz", 4);
        cfg.preferences.preferred_time_slots = vec![TimeWindow::new(9, 12)];
        cfg.save_to(&path).unwrap();

        let loaded = UserConfig::load_from(&path).unwrap();
        assert_eq!(loaded.preferences.interests["jazz"], 4);
        assert_eq!(loaded.preferences.preferred_time_slots, [TimeWindow::new(9, 12)]);
        assert_eq!(loaded.ai_services.openai.api_key, "sk-test");
    }

    #[test]
    fn unparsable_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "profile = [not toml").unwrap();

        assert!(matches!(
            UserConfig::load_from(&path),
            Err(CoreError::Config(ConfigError::ParseFailed(_)))
        ));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = UserConfig::default();
        assert_eq!(cfg.get("profile.name").as_deref(), Some("User"));
        assert_eq!(cfg.get("engine.max_recommendations").as_deref(), Some("5"));
        assert_eq!(cfg.get("engine.enrichment_scope").as_deref(), Some("all_candidates"));
        assert!(cfg.get("profile.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = UserConfig::default();
        cfg.set("engine.max_recommendations", "8").unwrap();
        cfg.set("preferences.max_travel_distance_km", "12.5").unwrap();
        cfg.set("profile.location.city", "Oakland").unwrap();
        cfg.set("engine.enrichment_scope", "recommended").unwrap();

        assert_eq!(cfg.engine.max_recommendations, 8);
        assert_eq!(cfg.preferences.max_travel_distance_km, 12.5);
        assert_eq!(cfg.profile.location.city, "Oakland");
        assert_eq!(cfg.engine.enrichment_scope, EnrichmentScope::Recommended);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_type() {
        let mut cfg = UserConfig::default();
        assert!(matches!(
            cfg.set("profile.nickname", "x"),
            Err(CoreError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(matches!(
            cfg.set("engine.max_recommendations", "lots"),
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
        assert!(matches!(
            cfg.set("engine.enrichment_scope", "everything"),
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn valid_config_has_no_problems() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validation_collects_every_problem() {
        let mut cfg = valid_config();
        cfg.profile.name = " ".into();
        cfg.profile.email = "nobody".into();
        cfg.preferences.max_travel_distance_km = 0.0;
        cfg.preferences.preferred_time_slots = vec![TimeWindow::new(22, 2), TimeWindow::new(9, 25)];
        cfg.ai_services.openai.base_url = "not a url".into();

        let errors = cfg.validation_errors();
        assert!(errors.contains(&ValidationError::Empty { field: "profile.name".into() }));
        assert!(errors.contains(&ValidationError::InvalidEmail));
        assert!(errors.contains(&ValidationError::NonPositiveDistance(0.0)));
        assert!(errors.contains(&ValidationError::WrapAroundSlot {
            index: 0,
            start_hour: 22,
            end_hour: 2
        }));
        assert!(errors.contains(&ValidationError::HourOutOfRange { index: 1, hour: 25 }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidValue { field, .. } if field == "ai_services.openai.base_url")));
    }

    #[test]
    fn validation_flags_unknown_provider() {
        let mut cfg = valid_config();
        cfg.ai_services.default_provider = "gemini".into();
        assert!(cfg
            .validation_errors()
            .contains(&ValidationError::UnknownProvider("gemini".into())));
    }

    #[test]
    fn validation_flags_missing_key_without_env_fallback() {
        let mut cfg = UserConfig::default();
        cfg.ai_services.default_provider = "claude".into();
        if std::env::var("ANTHROPIC_API_KEY").is_err() {
            assert!(cfg.validation_errors().contains(&ValidationError::MissingApiKey {
                provider: "claude".into()
            }));
        }
    }

    #[test]
    fn to_user_carries_preferences() {
        let mut cfg = valid_config();
        cfg.profile.name = "Ada".into();
        cfg.profile.location.city = "SF".into();
        cfg.add_interest("music", 5);
        cfg.preferences.preferred_time_slots = vec![TimeWindow::new(18, 23)];

        let user = cfg.to_user();
        assert_eq!(user.name(), "Ada");
        assert_eq!(user.preferences().interest_weight("music"), 5);
        assert_eq!(user.preferences().home_location(), "SF");
        assert_eq!(user.preferences().time_windows(), [TimeWindow::new(18, 23)]);
        assert_eq!(user.preferences().max_travel_distance(), 25.0);
    }

    #[test]
    fn absorb_interests_writes_back_reinforced_weights() {
        let mut cfg = valid_config();
        cfg.add_interest("music", 1);
        let mut prefs = cfg.to_preferences();
        prefs.reinforce_interest("music");
        prefs.reinforce_interest("sports");

        cfg.absorb_interests(&prefs);
        assert_eq!(cfg.preferences.interests["music"], 2);
        assert_eq!(cfg.preferences.interests["sports"], 1);
    }

    #[test]
    fn remove_interest_reports_presence() {
        let mut cfg = UserConfig::default();
        cfg.add_interest("music", 1);
        assert!(cfg.remove_interest("music"));
        assert!(!cfg.remove_interest("music"));
    }
}
