//! Startup: logging, configuration and the event loop.

use std::path::{Path, PathBuf};

use vecscope_core::Options;

use crate::error::AppResult;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "VECSCOPE_CONFIG";

/// Picks the configuration file: the first command line argument wins over
/// the environment variable.
#[must_use]
pub fn config_path(
    mut args: impl Iterator<Item = String>,
    env_value: Option<String>,
) -> Option<PathBuf> {
    args.next()
        .or(env_value)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Loads options from `path`, or returns the defaults when there is none.
pub fn load_options(path: Option<&Path>) -> AppResult<Options> {
    match path {
        Some(path) => Ok(Options::load(path)?),
        None => {
            log::info!("no configuration file given, using defaults");
            Ok(Options::default())
        }
    }
}

/// Runs vecscope: initializes logging, loads the configuration and opens
/// the window. Blocks until the window is closed.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the window, GPU
/// device or line shader cannot be created.
pub fn run() -> AppResult<()> {
    let _ = env_logger::try_init();

    let path = config_path(std::env::args().skip(1), std::env::var(CONFIG_ENV).ok());
    let options = load_options(path.as_deref())?;
    log::info!("vecscope initialized");

    crate::app::run_app(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_argument_wins_over_env() {
        let path = config_path(args(&["a.json"]), Some("b.json".into()));
        assert_eq!(path, Some(PathBuf::from("a.json")));
    }

    #[test]
    fn test_env_used_without_argument() {
        let path = config_path(args(&[]), Some("b.json".into()));
        assert_eq!(path, Some(PathBuf::from("b.json")));
        assert_eq!(config_path(args(&[]), None), None);
        assert_eq!(config_path(args(&[]), Some(String::new())), None);
    }

    #[test]
    fn test_load_defaults() {
        let options = load_options(None).unwrap();
        assert_eq!(options.grid.slice_count, Options::default().grid.slice_count);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("vecscope-init-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "append_sum": true, "grid": { "enable_xz": true } }"#).unwrap();

        let options = load_options(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(options.append_sum);
        assert!(options.grid.enable_xz);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = load_options(Some(Path::new("/nonexistent/vecscope.json"))).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
