use cosmic::cosmic_config::{self, Config, ConfigGet, ConfigSet, CosmicConfigEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const CONFIG_VERSION: u64 = 1;
const APP_ID: &str = "io.github.dubresearch.Storefront";

/// Layout boundary in logical pixels; windows at least this wide get the wide layout.
pub const DEFAULT_DESKTOP_BREAKPOINT: f32 = 768.0;
pub const DEFAULT_API_VERSION: &str = "2024-01";

pub const ENV_STORE_DOMAIN: &str = "STOREFRONT_STORE_DOMAIN";
pub const ENV_ACCESS_TOKEN: &str = "STOREFRONT_ACCESS_TOKEN";
pub const ENV_API_VERSION: &str = "STOREFRONT_API_VERSION";
pub const ENV_BUY_NOW_URL: &str = "STOREFRONT_BUY_NOW_URL";
pub const ENV_USE_SHOPIFY_CHECKOUT: &str = "STOREFRONT_USE_SHOPIFY_CHECKOUT";
pub const ENV_MANUAL_URL: &str = "STOREFRONT_MANUAL_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("store domain is not configured")]
    MissingStoreDomain,
    #[error("storefront access token is not configured")]
    MissingAccessToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AppTheme {
    System,
    #[default]
    Dark,
    Light,
}

impl AppTheme {
    pub const ALL: &'static [Self] = &[Self::System, Self::Dark, Self::Light];

    pub fn to_cosmic_theme(self) -> cosmic::Theme {
        match self {
            AppTheme::System => cosmic::theme::system_preference(),
            AppTheme::Dark => cosmic::Theme::dark(),
            AppTheme::Light => cosmic::Theme::light(),
        }
    }
}

impl fmt::Display for AppTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppTheme::System => write!(f, "System"),
            AppTheme::Dark => write!(f, "Dark"),
            AppTheme::Light => write!(f, "Light"),
        }
    }
}

/// Validated connection details for the storefront API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub store_domain: String,
    pub access_token: String,
    pub api_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    pub app_theme: AppTheme,
    pub store_domain: Option<String>,
    pub storefront_token: Option<String>,
    pub api_version: String,
    pub buy_now_url: Option<String>,
    pub use_shopify_checkout: bool,
    pub manual_url: Option<String>,
    pub desktop_breakpoint: f32,
    pub image_cache_size: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            app_theme: AppTheme::default(),
            store_domain: None,
            storefront_token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            buy_now_url: None,
            use_shopify_checkout: false,
            manual_url: None,
            desktop_breakpoint: DEFAULT_DESKTOP_BREAKPOINT,
            image_cache_size: 32,
        }
    }
}

impl StorefrontConfig {
    /// Layer environment variables over the stored values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|val| !val.trim().is_empty());

        if let Some(domain) = non_blank(ENV_STORE_DOMAIN) {
            self.store_domain = Some(domain);
        }
        if let Some(token) = non_blank(ENV_ACCESS_TOKEN) {
            self.storefront_token = Some(token);
        }
        if let Some(version) = non_blank(ENV_API_VERSION) {
            self.api_version = version;
        }
        if let Some(url) = non_blank(ENV_BUY_NOW_URL) {
            self.buy_now_url = Some(url);
        }
        if let Some(url) = non_blank(ENV_MANUAL_URL) {
            self.manual_url = Some(url);
        }
        // Only the literal "true" turns checkout on, anything else set turns it off
        if let Some(flag) = lookup(ENV_USE_SHOPIFY_CHECKOUT) {
            self.use_shopify_checkout = flag == "true";
        }

        self
    }

    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let store_domain = self
            .store_domain
            .as_deref()
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
            .ok_or(ConfigError::MissingStoreDomain)?;
        let access_token = self
            .storefront_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingAccessToken)?;

        Ok(Credentials {
            store_domain: store_domain.to_string(),
            access_token: access_token.to_string(),
            api_version: self.api_version.clone(),
        })
    }
}

impl CosmicConfigEntry for StorefrontConfig {
    const VERSION: u64 = CONFIG_VERSION;

    fn write_entry(&self, config: &cosmic_config::Config) -> Result<(), cosmic_config::Error> {
        config.set("app_theme", self.app_theme)?;
        config.set("store_domain", self.store_domain.clone())?;
        config.set("storefront_token", self.storefront_token.clone())?;
        config.set("api_version", self.api_version.clone())?;
        config.set("buy_now_url", self.buy_now_url.clone())?;
        config.set("use_shopify_checkout", self.use_shopify_checkout)?;
        config.set("manual_url", self.manual_url.clone())?;
        config.set("desktop_breakpoint", self.desktop_breakpoint)?;
        config.set("image_cache_size", self.image_cache_size)?;
        Ok(())
    }

    fn get_entry(
        config: &cosmic_config::Config,
    ) -> Result<Self, (Vec<cosmic_config::Error>, Self)> {
        let mut errors = Vec::new();
        let mut cfg = StorefrontConfig::default();

        macro_rules! get_field {
            ($name:literal, $field:ident, $type:ty) => {
                match config.get::<$type>($name) {
                    Ok(val) => cfg.$field = val,
                    Err(e) => errors.push(e),
                }
            };
        }

        get_field!("app_theme", app_theme, AppTheme);
        get_field!("store_domain", store_domain, Option<String>);
        get_field!("storefront_token", storefront_token, Option<String>);
        get_field!("api_version", api_version, String);
        get_field!("buy_now_url", buy_now_url, Option<String>);
        get_field!("use_shopify_checkout", use_shopify_checkout, bool);
        get_field!("manual_url", manual_url, Option<String>);
        get_field!("desktop_breakpoint", desktop_breakpoint, f32);
        get_field!("image_cache_size", image_cache_size, usize);

        if errors.is_empty() {
            Ok(cfg)
        } else {
            Err((errors, cfg))
        }
    }

    fn update_keys<T: AsRef<str>>(
        &mut self,
        config: &cosmic_config::Config,
        changed_keys: &[T],
    ) -> (Vec<cosmic_config::Error>, Vec<&'static str>) {
        let mut errors = Vec::new();
        let mut updated = Vec::new();

        for key in changed_keys {
            match key.as_ref() {
                "app_theme" => match config.get::<AppTheme>("app_theme") {
                    Ok(val) => {
                        self.app_theme = val;
                        updated.push("app_theme");
                    }
                    Err(e) => errors.push(e),
                },
                "buy_now_url" => match config.get::<Option<String>>("buy_now_url") {
                    Ok(val) => {
                        self.buy_now_url = val;
                        updated.push("buy_now_url");
                    }
                    Err(e) => errors.push(e),
                },
                "use_shopify_checkout" => match config.get::<bool>("use_shopify_checkout") {
                    Ok(val) => {
                        self.use_shopify_checkout = val;
                        updated.push("use_shopify_checkout");
                    }
                    Err(e) => errors.push(e),
                },
                "desktop_breakpoint" => match config.get::<f32>("desktop_breakpoint") {
                    Ok(val) => {
                        self.desktop_breakpoint = val;
                        updated.push("desktop_breakpoint");
                    }
                    Err(e) => errors.push(e),
                },
                _ => {}
            }
        }

        (errors, updated)
    }
}

pub fn config() -> Result<Config, cosmic_config::Error> {
    Config::new(APP_ID, CONFIG_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let cfg = StorefrontConfig::default();
        assert_eq!(cfg.desktop_breakpoint, 768.0);
        assert_eq!(cfg.api_version, "2024-01");
        assert!(!cfg.use_shopify_checkout);
        assert!(cfg.store_domain.is_none());
    }

    #[test]
    fn test_env_overrides_applied() {
        let vars = env(&[
            (ENV_STORE_DOMAIN, "dub.myshopify.com"),
            (ENV_ACCESS_TOKEN, "abc123"),
            (ENV_BUY_NOW_URL, "https://example.com/buy"),
            (ENV_USE_SHOPIFY_CHECKOUT, "true"),
        ]);

        let cfg = StorefrontConfig::default().with_overrides(|key| vars.get(key).cloned());

        assert_eq!(cfg.store_domain.as_deref(), Some("dub.myshopify.com"));
        assert_eq!(cfg.storefront_token.as_deref(), Some("abc123"));
        assert_eq!(cfg.buy_now_url.as_deref(), Some("https://example.com/buy"));
        assert!(cfg.use_shopify_checkout);
        assert_eq!(cfg.api_version, DEFAULT_API_VERSION);
    }

    #[test]
    fn test_checkout_flag_requires_literal_true() {
        let vars = env(&[(ENV_USE_SHOPIFY_CHECKOUT, "yes")]);
        let mut cfg = StorefrontConfig::default();
        cfg.use_shopify_checkout = true;

        let cfg = cfg.with_overrides(|key| vars.get(key).cloned());
        assert!(!cfg.use_shopify_checkout);
    }

    #[test]
    fn test_blank_env_does_not_clear_stored_value() {
        let vars = env(&[(ENV_STORE_DOMAIN, "  ")]);
        let mut cfg = StorefrontConfig::default();
        cfg.store_domain = Some("stored.myshopify.com".to_string());

        let cfg = cfg.with_overrides(|key| vars.get(key).cloned());
        assert_eq!(cfg.store_domain.as_deref(), Some("stored.myshopify.com"));
    }

    #[test]
    fn test_credentials_validation() {
        let mut cfg = StorefrontConfig::default();
        assert_eq!(cfg.credentials(), Err(ConfigError::MissingStoreDomain));

        cfg.store_domain = Some("dub.myshopify.com".to_string());
        cfg.storefront_token = Some("   ".to_string());
        assert_eq!(cfg.credentials(), Err(ConfigError::MissingAccessToken));

        cfg.storefront_token = Some("token".to_string());
        let creds = cfg.credentials().unwrap();
        assert_eq!(creds.store_domain, "dub.myshopify.com");
        assert_eq!(creds.access_token, "token");
        assert_eq!(creds.api_version, "2024-01");
    }
}
