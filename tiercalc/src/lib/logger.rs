use directories::ProjectDirs;
use log::LevelFilter;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::lib::error::ConfigError;

/// Initialize the logger with stderr and optional file output
///
/// # Arguments
///
/// * `verbose` - Enable debug level logging
/// * `quiet` - Only log errors
/// * `log_file` - `Some(None)` writes to the platform log location,
///   `Some(Some(path))` to `path`
///
/// # Platform-specific log locations
///
/// * **macOS**: `~/Library/Application Support/com.tiercalc.tiercalc/tiercalc.log`
/// * **Linux**: `~/.local/share/tiercalc/tiercalc.log`
/// * **Windows**: `C:\Users\<User>\AppData\Local\tiercalc\tiercalc\data\tiercalc.log`
///
/// `RUST_LOG` overrides the level chosen from the flags.
pub fn init_logger(verbose: bool, quiet: bool, log_file: Option<Option<PathBuf>>) -> Result<()> {
    let log_level = level_for(verbose, quiet);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level).format_timestamp_secs();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    let log_path = match log_file {
        Some(Some(path)) => Some(path),
        Some(None) => Some(default_log_path()?),
        None => None,
    };

    match &log_path {
        Some(path) => {
            let file = open_log_file(path)?;

            struct TeeWriter {
                stderr: std::io::Stderr,
                file: fs::File,
            }

            impl Write for TeeWriter {
                fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                    self.stderr.write_all(buf)?;
                    self.file.write_all(buf)?;
                    Ok(buf.len())
                }

                fn flush(&mut self) -> std::io::Result<()> {
                    self.stderr.flush()?;
                    self.file.flush()?;
                    Ok(())
                }
            }

            builder.target(env_logger::Target::Pipe(Box::new(TeeWriter {
                stderr: std::io::stderr(),
                file,
            })));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    builder.try_init().map_err(|e| {
        ConfigError::InvalidValue(format!("Failed to initialize logger: {}", e))
    })?;

    if let Some(path) = log_path {
        log::debug!("Logging to: {}", path.display());
    }

    Ok(())
}

fn level_for(verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Platform data directory log path, falling back to the current directory
pub fn default_log_path() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "tiercalc", "tiercalc") {
        let log_dir = proj_dirs.data_local_dir();
        fs::create_dir_all(log_dir).map_err(|e| {
            ConfigError::FileError(format!("Failed to create log directory: {}", e))
        })?;
        Ok(log_dir.join("tiercalc.log"))
    } else {
        Ok(std::env::current_dir()
            .map_err(|e| {
                ConfigError::FileError(format!("Failed to get current directory: {}", e))
            })?
            .join("tiercalc.log"))
    }
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            ConfigError::FileError(format!("Failed to open log file {}: {}", path.display(), e))
        })?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(false, false), LevelFilter::Warn);
        assert_eq!(level_for(true, false), LevelFilter::Debug);
        assert_eq!(level_for(false, true), LevelFilter::Error);
    }

    #[test]
    fn test_open_log_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiercalc.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_log_file(&dir.path().join("missing").join("tiercalc.log")).unwrap_err();
        assert!(matches!(
            err,
            crate::TierCalcError::Config(ConfigError::FileError(_))
        ));
    }
}
