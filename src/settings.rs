// Process-wide settings, read from environment variables exactly once and
// memoized for the process lifetime. Read-only after construction, so the
// memoized value is safe to share across request handlers without locking.

use std::env;
use std::sync::OnceLock;

/// Origins allowed by default when `BEAUTY_ALLOWED_ORIGINS` is unset. The env
/// var extends this list; it never replaces it. The slice itself is immutable,
/// each `Settings` gets its own owned copy.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:3000",
];

const DEFAULT_VERTEX_LOCATION: &str = "asia-southeast1";
const DEFAULT_VERTEX_MODEL_NAME: &str = "gemini-1.5-pro-preview-0514";
const DEFAULT_GEMINI_MODEL_NAME: &str = "gemini-1.5-flash";
const DEFAULT_AI_PRO_TIMEOUT_SECS: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct Settings {
    pub debug: bool,
    pub allowed_origins: Vec<String>,
    /// Project / location / model of the optional pro-tier remote backend.
    pub vertex_project_id: Option<String>,
    pub vertex_location: String,
    pub vertex_model_name: String,
    pub vertex_enabled: bool,
    /// Credentials for the default lightweight remote model.
    pub gemini_api_key: Option<String>,
    pub gemini_model_name: String,
    /// Timeout in seconds for pro-tier calls.
    pub ai_pro_timeout: f64,
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// The memoized process settings. The environment is read on the first
    /// call only.
    pub fn get() -> &'static Settings {
        SETTINGS.get_or_init(Settings::from_env)
    }

    fn from_env() -> Settings {
        Settings {
            debug: env_var("BEAUTY_DEBUG").as_deref() == Some("1"),
            allowed_origins: merge_origins(env_var("BEAUTY_ALLOWED_ORIGINS").as_deref()),
            vertex_project_id: env_var("VERTEX_PROJECT_ID"),
            vertex_location: env_var("VERTEX_LOCATION")
                .unwrap_or_else(|| DEFAULT_VERTEX_LOCATION.to_string()),
            vertex_model_name: env_var("VERTEX_MODEL_NAME")
                .unwrap_or_else(|| DEFAULT_VERTEX_MODEL_NAME.to_string()),
            // Read without the empty filter: VERTEX_ENABLED="" is an
            // explicit opt-out, only an unset variable means "auto".
            vertex_enabled: enabled_flag(env::var("VERTEX_ENABLED").ok().as_deref()),
            gemini_api_key: env_var("GEMINI_API_KEY"),
            gemini_model_name: env_var("GEMINI_MODEL_NAME")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL_NAME.to_string()),
            ai_pro_timeout: env_var("AI_PRO_TIMEOUT")
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_AI_PRO_TIMEOUT_SECS),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Enablement flag for the pro-tier backend: "1", "true" and "auto" are
/// truthy, case-insensitive; everything else is off.
pub fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "auto")
}

/// Pro-tier enablement from the raw env value: unset defaults to "auto",
/// any set value (including the empty string) is taken literally.
pub fn enabled_flag(raw: Option<&str>) -> bool {
    is_truthy(raw.unwrap_or("auto"))
}

/// Build the final allowed-origins list: the static defaults first, then any
/// novel entries from the comma-separated override. Entries are trimmed,
/// empties dropped, duplicates kept once, order preserved.
pub fn merge_origins(raw: Option<&str>) -> Vec<String> {
    let mut origins: Vec<String> = DEFAULT_ALLOWED_ORIGINS
        .iter()
        .map(|origin| origin.to_string())
        .collect();

    if let Some(raw) = raw {
        for entry in raw.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            if !origins.iter().any(|existing| existing == entry) {
                origins.push(entry.to_string());
            }
        }
    }

    origins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origins_without_override() {
        let origins = merge_origins(None);
        assert_eq!(
            origins,
            vec![
                "http://localhost:5173",
                "http://localhost:3000",
                "http://127.0.0.1:5173",
                "http://127.0.0.1:3000",
            ]
        );
    }

    #[test]
    fn test_override_extends_defaults() {
        let origins = merge_origins(Some("https://editor.example.com, https://app.example.com"));
        assert_eq!(origins.len(), 6);
        assert_eq!(origins[4], "https://editor.example.com");
        assert_eq!(origins[5], "https://app.example.com");
    }

    #[test]
    fn test_override_deduplicates_against_defaults() {
        let origins = merge_origins(Some(
            "http://localhost:3000,https://editor.example.com,https://editor.example.com",
        ));
        assert_eq!(origins.len(), 5);
        assert_eq!(
            origins
                .iter()
                .filter(|origin| *origin == "http://localhost:3000")
                .count(),
            1
        );
    }

    #[test]
    fn test_override_trims_and_drops_empty_entries() {
        let origins = merge_origins(Some("  https://a.example  ,, ,https://b.example"));
        assert_eq!(origins[4], "https://a.example");
        assert_eq!(origins[5], "https://b.example");
        assert_eq!(origins.len(), 6);
    }

    #[test]
    fn test_enabled_flag_env_states() {
        // Unset defaults to "auto" (on); explicitly empty is off.
        assert!(enabled_flag(None));
        assert!(!enabled_flag(Some("")));
        assert!(enabled_flag(Some("true")));
        assert!(!enabled_flag(Some("0")));
    }

    #[test]
    fn test_truthy_values() {
        for value in ["1", "true", "TRUE", "auto", "Auto", "AUTO", "True"] {
            assert!(is_truthy(value), "{value} should be truthy");
        }
        for value in ["0", "false", "off", "no", "", "yes", "2"] {
            assert!(!is_truthy(value), "{value} should be falsy");
        }
    }
}
