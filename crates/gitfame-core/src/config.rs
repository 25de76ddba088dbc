use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::FameError;

/// Top-level configuration loaded from `.gitfame.toml`.
///
/// Resolution order: CLI flags > local config file > defaults.
///
/// # Examples
///
/// ```
/// use gitfame_core::FameConfig;
///
/// let config = FameConfig::default();
/// assert_eq!(config.charts.width, 1000);
/// assert_eq!(config.charts.commit_color, "blue");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FameConfig {
    /// Chart geometry and colors.
    #[serde(default)]
    pub charts: ChartsConfig,
    /// Artifact output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl FameConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FameError::Io`] if the file cannot be read, or
    /// [`FameError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gitfame_core::FameConfig;
    /// use std::path::Path;
    ///
    /// let config = FameConfig::from_file(Path::new(".gitfame.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, FameError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`FameError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitfame_core::FameConfig;
    ///
    /// let toml = r#"
    /// [charts]
    /// width = 1600
    /// "#;
    /// let config = FameConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.charts.width, 1600);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, FameError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Chart geometry and color configuration.
///
/// The defaults reproduce a 10x5-inch canvas at 100 dpi with the classic
/// blue commits / green ownership pairing.
///
/// # Examples
///
/// ```
/// use gitfame_core::ChartsConfig;
///
/// let config = ChartsConfig::default();
/// assert_eq!(config.height, 500);
/// assert_eq!(config.ownership_color, "green");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    /// SVG canvas width in pixels (default: 1000).
    #[serde(default = "default_width")]
    pub width: u32,
    /// SVG canvas height in pixels (default: 500).
    #[serde(default = "default_height")]
    pub height: u32,
    /// Bar color name for the commits chart (default: `"blue"`).
    #[serde(default = "default_commit_color")]
    pub commit_color: String,
    /// Bar color name for the ownership chart (default: `"green"`).
    #[serde(default = "default_ownership_color")]
    pub ownership_color: String,
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    500
}

fn default_commit_color() -> String {
    "blue".into()
}

fn default_ownership_color() -> String {
    "green".into()
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            commit_color: default_commit_color(),
            ownership_color: default_ownership_color(),
        }
    }
}

/// Artifact output configuration.
///
/// # Examples
///
/// ```
/// use gitfame_core::OutputConfig;
/// use std::path::Path;
///
/// let config = OutputConfig::default();
/// assert_eq!(config.dir, Path::new("."));
/// assert_eq!(config.top, 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory where chart files are written (default: current directory).
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Chart only the N highest entries; 0 charts every author (default: 0).
    #[serde(default)]
    pub top: usize,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            top: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = FameConfig::default();
        assert_eq!(config.charts.width, 1000);
        assert_eq!(config.charts.height, 500);
        assert_eq!(config.charts.commit_color, "blue");
        assert_eq!(config.charts.ownership_color, "green");
        assert_eq!(config.output.dir, PathBuf::from("."));
        assert_eq!(config.output.top, 0);
    }

    #[test]
    fn parse_minimal_toml() {
        let toml = r#"
[charts]
width = 800
commit_color = "purple"
"#;
        let config = FameConfig::from_toml(toml).unwrap();
        assert_eq!(config.charts.width, 800);
        assert_eq!(config.charts.commit_color, "purple");
        // Unspecified fields keep their defaults
        assert_eq!(config.charts.height, 500);
        assert_eq!(config.charts.ownership_color, "green");
    }

    #[test]
    fn parse_full_toml() {
        let toml = r#"
[charts]
width = 1600
height = 900
commit_color = "orange"
ownership_color = "gray"

[output]
dir = "charts"
top = 15
"#;
        let config = FameConfig::from_toml(toml).unwrap();
        assert_eq!(config.charts.width, 1600);
        assert_eq!(config.charts.height, 900);
        assert_eq!(config.charts.ownership_color, "gray");
        assert_eq!(config.output.dir, PathBuf::from("charts"));
        assert_eq!(config.output.top, 15);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = FameConfig::from_toml("").unwrap();
        assert_eq!(config.charts.width, 1000);
        assert_eq!(config.output.top, 0);
    }

    #[test]
    fn invalid_toml_returns_error() {
        let result = FameConfig::from_toml("{{invalid}}");
        assert!(result.is_err());
    }
}
