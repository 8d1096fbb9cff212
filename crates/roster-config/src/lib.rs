use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use roster_core::domain::normalize_domain;
use roster_core::extract::{
    ExtractOptions, SheetLayout, DEFAULT_DOMAIN, DEFAULT_EMAIL_HEADER, DEFAULT_HEADER_ROW,
    DEFAULT_NAME_HEADER, DEFAULT_SHEET_NAME,
};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "roster";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub domain: String,
    pub db_path: Option<PathBuf>,
    pub workbook: WorkbookConfig,
}

#[derive(Debug, Clone)]
pub struct WorkbookConfig {
    pub path: Option<PathBuf>,
    pub sheet: String,
    pub header_row: usize,
    pub name_header: String,
    pub email_header: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            db_path: None,
            workbook: WorkbookConfig {
                path: None,
                sheet: DEFAULT_SHEET_NAME.to_string(),
                header_row: DEFAULT_HEADER_ROW,
                name_header: DEFAULT_NAME_HEADER.to_string(),
                email_header: DEFAULT_EMAIL_HEADER.to_string(),
            },
        }
    }
}

impl AppConfig {
    pub fn extract_options(&self) -> Result<ExtractOptions> {
        let layout = SheetLayout::new(
            self.workbook.header_row,
            &self.workbook.name_header,
            &self.workbook.email_header,
        )
        .map_err(|err| ConfigError::InvalidWorkbookField {
            field: "layout",
            message: err.to_string(),
        })?;
        ExtractOptions::new(layout, &self.domain)
            .map_err(|_| ConfigError::InvalidDomain(self.domain.clone()))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid domain value: {0}")]
    InvalidDomain(String),
    #[error("invalid db_path value: {0}")]
    InvalidDbPath(PathBuf),
    #[error("invalid workbook.{field}: {message}")]
    InvalidWorkbookField {
        field: &'static str,
        message: String,
    },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    domain: Option<String>,
    db_path: Option<PathBuf>,
    workbook: Option<WorkbookFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkbookFile {
    path: Option<PathBuf>,
    sheet: Option<String>,
    header_row: Option<usize>,
    name_header: Option<String>,
    email_header: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path.clone()) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(Some(merge_config(parsed, base)?))
}

/// Relative paths in the file resolve against the file's own directory.
fn merge_config(parsed: ConfigFile, base: &Path) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(domain) = parsed.domain {
        config.domain =
            normalize_domain(&domain).map_err(|_| ConfigError::InvalidDomain(domain.clone()))?;
    }

    if let Some(db_path) = parsed.db_path {
        if db_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidDbPath(db_path));
        }
        config.db_path = Some(base.join(db_path));
    }

    if let Some(workbook) = parsed.workbook {
        if let Some(path) = workbook.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidWorkbookField {
                    field: "path",
                    message: "cannot be empty".to_string(),
                });
            }
            config.workbook.path = Some(base.join(path));
        }
        if let Some(sheet) = workbook.sheet {
            config.workbook.sheet = non_empty_field("sheet", sheet)?;
        }
        if let Some(header_row) = workbook.header_row {
            if header_row == 0 {
                return Err(ConfigError::InvalidWorkbookField {
                    field: "header_row",
                    message: "rows are numbered from 1".to_string(),
                });
            }
            config.workbook.header_row = header_row;
        }
        if let Some(label) = workbook.name_header {
            config.workbook.name_header = non_empty_field("name_header", label)?;
        }
        if let Some(label) = workbook.email_header {
            config.workbook.email_header = non_empty_field("email_header", label)?;
        }
    }

    Ok(config)
}

fn non_empty_field(field: &'static str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidWorkbookField {
            field,
            message: "cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
