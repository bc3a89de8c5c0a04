use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_CARGO: &str = "cargo";
const DEFAULT_EMCC: &str = "emcc";
const DEFAULT_WASM_TARGET: &str = "wasm32-unknown-unknown";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7860";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_WORK_DIR_NAME: &str = "repo2wasm";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone)]
pub struct Repo2WasmConfig {
    /// Parent directory of per-request workspaces
    pub work_dir: PathBuf,
    pub cargo_bin: String,
    pub emcc_bin: String,
    /// Target triple passed to `cargo build --target`
    pub wasm_target: String,
    pub bind_addr: String,
    pub log_level: String,
}

impl Default for Repo2WasmConfig {
    fn default() -> Self {
        let work_dir = env::var("REPO2WASM_WORK_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join(DEFAULT_WORK_DIR_NAME));

        let cargo_bin = env_or("REPO2WASM_CARGO", DEFAULT_CARGO);
        let emcc_bin = env_or("REPO2WASM_EMCC", DEFAULT_EMCC);
        let wasm_target = env_or("REPO2WASM_WASM_TARGET", DEFAULT_WASM_TARGET);
        let bind_addr = env_or("REPO2WASM_BIND", DEFAULT_BIND_ADDR);

        let log_level = env::var("REPO2WASM_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            work_dir,
            cargo_bin,
            emcc_bin,
            wasm_target,
            bind_addr,
            log_level,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Repo2WasmConfig {
    /// Checks the settings every command depends on. The bind address is
    /// only checked by [`Self::socket_addr`], since only `serve` listens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cargo_bin.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Cargo binary must not be empty".to_string(),
            ));
        }

        if self.emcc_bin.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Emscripten compiler binary must not be empty".to_string(),
            ));
        }

        if !self.wasm_target.starts_with("wasm32-") && !self.wasm_target.starts_with("wasm64-") {
            return Err(ConfigError::ValidationFailed(format!(
                "Target '{}' is not a WebAssembly target triple",
                self.wasm_target
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::ParseError {
                field: "REPO2WASM_BIND".to_string(),
                error: e.to_string(),
            })
    }
}

impl fmt::Display for Repo2WasmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "repo2wasm Configuration:")?;
        writeln!(f, "  Work Dir: {}", self.work_dir.display())?;
        writeln!(f, "  Cargo: {}", self.cargo_bin)?;
        writeln!(f, "  Emscripten: {}", self.emcc_bin)?;
        writeln!(f, "  WASM Target: {}", self.wasm_target)?;
        writeln!(f, "  Bind Address: {}", self.bind_addr)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn valid_config() -> Repo2WasmConfig {
        Repo2WasmConfig {
            work_dir: PathBuf::from("/tmp/repo2wasm"),
            cargo_bin: "cargo".to_string(),
            emcc_bin: "emcc".to_string(),
            wasm_target: "wasm32-unknown-unknown".to_string(),
            bind_addr: "127.0.0.1:7860".to_string(),
            log_level: "info".to_string(),
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = [
            EnvGuard::unset("REPO2WASM_WORK_DIR"),
            EnvGuard::unset("REPO2WASM_CARGO"),
            EnvGuard::unset("REPO2WASM_EMCC"),
            EnvGuard::unset("REPO2WASM_WASM_TARGET"),
            EnvGuard::unset("REPO2WASM_BIND"),
            EnvGuard::unset("REPO2WASM_LOG_LEVEL"),
        ];

        let config = Repo2WasmConfig::default();

        assert_eq!(config.work_dir, env::temp_dir().join(DEFAULT_WORK_DIR_NAME));
        assert_eq!(config.cargo_bin, DEFAULT_CARGO);
        assert_eq!(config.emcc_bin, DEFAULT_EMCC);
        assert_eq!(config.wasm_target, DEFAULT_WASM_TARGET);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = [
            EnvGuard::set("REPO2WASM_WORK_DIR", "/srv/builds"),
            EnvGuard::set("REPO2WASM_CARGO", "/opt/rust/bin/cargo"),
            EnvGuard::set("REPO2WASM_EMCC", "/opt/emsdk/emcc"),
            EnvGuard::set("REPO2WASM_WASM_TARGET", "wasm32-wasip1"),
            EnvGuard::set("REPO2WASM_BIND", "0.0.0.0:8080"),
            EnvGuard::set("REPO2WASM_LOG_LEVEL", "DEBUG"),
        ];

        let config = Repo2WasmConfig::default();

        assert_eq!(config.work_dir, PathBuf::from("/srv/builds"));
        assert_eq!(config.cargo_bin, "/opt/rust/bin/cargo");
        assert_eq!(config.emcc_bin, "/opt/emsdk/emcc");
        assert_eq!(config.wasm_target, "wasm32-wasip1");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_blank_environment_values_fall_back_to_defaults() {
        let _guards = [
            EnvGuard::set("REPO2WASM_CARGO", "  "),
            EnvGuard::set("REPO2WASM_WORK_DIR", ""),
        ];

        let config = Repo2WasmConfig::default();

        assert_eq!(config.cargo_bin, DEFAULT_CARGO);
        assert_eq!(config.work_dir, env::temp_dir().join(DEFAULT_WORK_DIR_NAME));
    }

    #[test]
    fn test_configuration_validation_valid() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_configuration_validation_rejects_non_wasm_target() {
        let config = Repo2WasmConfig {
            wasm_target: "x86_64-unknown-linux-gnu".to_string(),
            ..valid_config()
        };

        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("x86_64-unknown-linux-gnu"));
    }

    #[test]
    fn test_bad_bind_address_only_fails_socket_addr() {
        let config = Repo2WasmConfig {
            bind_addr: "localhost".to_string(),
            ..valid_config()
        };

        assert!(config.validate().is_ok());
        match config.socket_addr() {
            Err(ConfigError::ParseError { field, .. }) => assert_eq!(field, "REPO2WASM_BIND"),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_configuration_validation_invalid_log_level() {
        let config = Repo2WasmConfig {
            log_level: "loud".to_string(),
            ..valid_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configuration_validation_empty_emcc() {
        let config = Repo2WasmConfig {
            emcc_bin: String::new(),
            ..valid_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_display() {
        let display = format!("{}", valid_config());
        assert!(display.contains("repo2wasm Configuration:"));
        assert!(display.contains("WASM Target: wasm32-unknown-unknown"));
    }
}
