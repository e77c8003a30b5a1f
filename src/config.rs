use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

/// Environment variable naming the dataset when no argument is given.
pub const DATA_ENV_VAR: &str = "STUDENT_DASHBOARD_DATA";

/// Dataset opened when neither an argument nor the variable is set.
pub const DEFAULT_DATA_FILE: &str = "StudentsPerformance.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            window_title: "Student Performance Dashboard".to_string(),
            inner_size: [1200.0, 800.0],
            min_inner_size: [600.0, 400.0],
        }
    }
}

impl DashboardConfig {
    /// Resolve from the process arguments and environment.
    pub fn from_env() -> Self {
        Self::resolve(std::env::args().skip(1), std::env::var(DATA_ENV_VAR).ok())
    }

    /// First argument wins, then the environment value, then the default file.
    pub fn resolve(mut args: impl Iterator<Item = String>, env_path: Option<String>) -> Self {
        let non_blank = |p: &String| !p.trim().is_empty();
        let data_path = args
            .next()
            .filter(non_blank)
            .or_else(|| env_path.filter(non_blank))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        Self {
            data_path,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_takes_precedence() {
        let cfg = DashboardConfig::resolve(
            vec!["scores.parquet".to_string()].into_iter(),
            Some("env.csv".to_string()),
        );
        assert_eq!(cfg.data_path, PathBuf::from("scores.parquet"));
    }

    #[test]
    fn env_used_without_argument() {
        let cfg = DashboardConfig::resolve(std::iter::empty(), Some("env.csv".to_string()));
        assert_eq!(cfg.data_path, PathBuf::from("env.csv"));
    }

    #[test]
    fn blank_argument_falls_through_to_env() {
        let cfg = DashboardConfig::resolve(
            vec!["  ".to_string()].into_iter(),
            Some("env.csv".to_string()),
        );
        assert_eq!(cfg.data_path, PathBuf::from("env.csv"));
    }

    #[test]
    fn falls_back_to_default_file() {
        let cfg = DashboardConfig::resolve(std::iter::empty(), Some("  ".to_string()));
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(cfg.inner_size, [1200.0, 800.0]);
    }
}
