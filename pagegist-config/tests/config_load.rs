use pagegist_config::{DEFAULT_BASE_URL, PagegistConfigLoader};
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Write a TOML file into a temp dir and return its path.
fn write_toml(tmp: &TempDir, name: &str, toml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, toml).expect("write toml");
    p
}

#[test]
fn file_env_and_defaults_layer_together() {
    let tmp = TempDir::new().unwrap();

    // A file that sets some fields; env overrides a subset on top.
    let file_toml = r#"
[llm]
base_url = "https://gateway.internal/api/v1"
model = "mistralai/mistral-7b-instruct:free"

[log]
stderr = true
"#;
    let p = write_toml(&tmp, "pagegist.toml", file_toml);

    temp_env::with_vars(
        [
            ("PAGEGIST__LLM__MODEL", Some("qwen/qwen-2.5-72b-instruct")),
            ("OPENROUTER_API_KEY", Some("sk-or-v1-integration")),
        ],
        || {
            let config = PagegistConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load config");

            // env beats file, file beats defaults
            assert_eq!(config.llm.model, "qwen/qwen-2.5-72b-instruct");
            assert_eq!(config.llm.base_url, "https://gateway.internal/api/v1");
            assert_eq!(config.llm.api_key, "sk-or-v1-integration");
            assert!(config.log.stderr);
            assert!(config.log.dir.is_none());
        },
    );
}

#[test]
fn file_may_reference_env_vars_for_secrets() {
    let tmp = TempDir::new().unwrap();
    let p = write_toml(
        &tmp,
        "pagegist.toml",
        "[llm]\napi_key = \"${GIST_VAULT_TOKEN}\"\n",
    );

    temp_env::with_vars(
        [
            ("GIST_VAULT_TOKEN", Some("sk-from-vault")),
            ("OPENROUTER_API_KEY", None),
        ],
        || {
            let config = PagegistConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load config");

            assert_eq!(config.llm.api_key, "sk-from-vault");
            assert_eq!(config.llm.base_url, DEFAULT_BASE_URL);
        },
    );
}

#[test]
fn later_file_overrides_earlier_one() {
    let tmp = TempDir::new().unwrap();
    let base = write_toml(
        &tmp,
        "base.toml",
        "[llm]\nmodel = \"base-model\"\napi_key = \"sk-base\"\n",
    );
    let local = write_toml(&tmp, "local.toml", "[llm]\nmodel = \"local-model\"\n");

    // Pin the env keys the assertions depend on; with_vars also serializes
    // this test against the others through temp-env's lock.
    temp_env::with_vars([("PAGEGIST__LLM__MODEL", None::<&str>)], || {
        let config = PagegistConfigLoader::new()
            .with_file(&base)
            .with_file(&local)
            .load()
            .expect("load config");

        assert_eq!(config.llm.model, "local-model");
        assert_eq!(config.llm.api_key, "sk-base");
    });
}
