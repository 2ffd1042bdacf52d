//! Loader for PageGist configuration with TOML + environment overlays.
//!
//! Precedence, lowest to highest: built-in defaults, an optional TOML file,
//! `PAGEGIST__`-prefixed environment variables (`__` separates nesting, so
//! `PAGEGIST__LLM__MODEL` sets `llm.model`). `${VAR}` placeholders inside
//! file values are expanded from the environment after merging. The summary
//! credential additionally falls back to `OPENROUTER_API_KEY`; a missing
//! credential is a fatal [`ConfigError::MissingApiKey`] so the process halts
//! before any UI starts.
use config::{Config, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Environment variable consulted when no explicit credential is configured.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Chat-completion endpoint base used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Model identifier used when none is configured.
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-r1:free";

/// Errors from loading or validating configuration. All of these are fatal
/// at startup; none occur after the UI is running.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// No credential in any layer. Message matches what users of the
    /// hosted provider expect to see.
    #[error("OPENROUTER_API_KEY environment variable not set.")]
    MissingApiKey,

    /// A file could not be read or the merged sources did not deserialize.
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

/// Fully resolved configuration. Built once at startup by
/// [`PagegistConfigLoader::load`] and passed by reference into the
/// components that need it; nothing reads configuration ambiently.
#[derive(Debug, Clone)]
pub struct PagegistConfig {
    pub llm: LlmConfig,
    pub log: LogSettings,
}

/// Connection details for the chat-completion provider.
#[derive(Clone)]
pub struct LlmConfig {
    /// API base, e.g. `https://openrouter.ai/api/v1`.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Bearer credential. Guaranteed non-empty by the loader.
    pub api_key: String,
}

// Manual impl so the credential never lands in logs or panics.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"***")
            .finish()
    }
}

/// Logging knobs surfaced to the config file; the app maps these onto the
/// logging bootstrap in `pagegist-common`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Explicit log directory; `None` defers to `PAGEGIST_LOG_DIR` and the
    /// platform default.
    pub dir: Option<PathBuf>,
    /// Duplicate events to stderr. Off by default since the TUI owns the
    /// terminal.
    pub stderr: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    llm: RawLlm,
    log: LogSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawLlm {
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (TOML + env overrides).
pub struct PagegistConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for PagegistConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PagegistConfigLoader {
    /// Start an empty loader. Files merge in the order given; `PAGEGIST__`
    /// environment variables are merged last by [`load`](Self::load), so
    /// env always wins over files.
    ///
    /// ```
    /// use pagegist_config::PagegistConfigLoader;
    ///
    /// let config = PagegistConfigLoader::new()
    ///     .with_toml_str("[llm]\napi_key = \"sk-test\"")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.llm.model, pagegist_config::DEFAULT_MODEL);
    /// assert_eq!(config.llm.api_key, "sk-test");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a TOML file. A missing file is skipped so a bare environment
    /// (just the credential) is enough to run; an unreadable or invalid file
    /// still fails the load.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline TOML snippet; used by tests and doctests.
    ///
    /// ```
    /// use pagegist_config::PagegistConfigLoader;
    ///
    /// let cfg = PagegistConfigLoader::new()
    ///     .with_toml_str(
    ///         r#"
    /// [llm]
    /// model = "qwen/qwen-2.5-7b-instruct"
    /// api_key = "sk-or-abc"
    ///
    /// [log]
    /// stderr = true
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.llm.model, "qwen/qwen-2.5-7b-instruct");
    /// assert!(cfg.log.stderr);
    /// ```
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, config::FileFormat::Toml));
        self
    }

    /// Consume the builder and produce a fully resolved [`PagegistConfig`].
    ///
    /// Merged values go through `${VAR}` expansion before typing, so a file
    /// may carry `api_key = "${OPENROUTER_API_KEY}"` explicitly; when no
    /// layer sets a credential at all the loader falls back to the
    /// `OPENROUTER_API_KEY` variable itself.
    ///
    /// ```
    /// use pagegist_config::PagegistConfigLoader;
    ///
    /// unsafe { std::env::set_var("PAGEGIST_DOCTEST_KEY", "sk-injected"); }
    ///
    /// let cfg = PagegistConfigLoader::new()
    ///     .with_toml_str("[llm]\napi_key = \"${PAGEGIST_DOCTEST_KEY}\"")
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(cfg.llm.api_key, "sk-injected");
    ///
    /// unsafe { std::env::remove_var("PAGEGIST_DOCTEST_KEY"); }
    /// ```
    pub fn load(self) -> Result<PagegistConfig, ConfigError> {
        // Environment last: `PAGEGIST__LLM__MODEL` and friends override any
        // file layer.
        let cfg = self
            .builder
            .add_source(Environment::with_prefix("PAGEGIST").separator("__"))
            .build()?;

        // Merge into a loose tree first so ${VAR} expansion can run over
        // every string before the typed deserialize.
        let mut v: Value = cfg.try_deserialize()?;
        if v.is_null() {
            v = Value::Object(serde_json::Map::new());
        }
        expand_env_in_value(&mut v);

        let raw: RawConfig = serde_json::from_value(v)
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let api_key = match raw.llm.api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => key,
            None => std::env::var(API_KEY_ENV)
                .ok()
                .filter(|k| !k.trim().is_empty())
                .ok_or(ConfigError::MissingApiKey)?,
        };

        Ok(PagegistConfig {
            llm: LlmConfig {
                base_url: raw.llm.base_url,
                model: raw.llm.model,
                api_key,
            },
            log: raw.log,
        })
    }
}
