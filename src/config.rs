use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "CardioWell";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP port when `PORT` is not set (matches the legacy deployment).
pub const DEFAULT_PORT: u16 = 5000;

/// Get the application data directory
/// ~/CardioWell/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("CardioWell")
}

/// Get the SQLite database path
pub fn database_path() -> PathBuf {
    app_data_dir().join("cardiowell.db")
}

/// HTTP port from the `PORT` environment variable, falling back to 5000.
pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    format!("{}=info,tower_http=info", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("CardioWell"));
    }

    #[test]
    fn database_path_under_app_data() {
        let db = database_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("cardiowell.db"));
    }

    #[test]
    fn app_name_is_cardiowell() {
        assert_eq!(APP_NAME, "CardioWell");
    }

    #[test]
    fn default_filter_names_crate() {
        assert!(default_log_filter().starts_with("cardiowell="));
    }
}
