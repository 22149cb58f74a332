use crate::pagination::DEFAULT_PAGE_SIZE;
use serde::Serialize;
use std::env;
use std::fmt;

/// Service configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub http_addr: String,
    pub database: DatabaseConfig,
    pub page: PageSettings,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub table: String,
    pub max_connections: u32,
}

// Keeps the password out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .field("table", &self.table)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Presentation options for the log page.
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub page_size: i64,
    pub title: String,
    pub show_navbar: bool,
    pub nav_links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub title: String,
    pub url: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            title: "Raspberry Pi Weather Log".to_string(),
            show_navbar: true,
            nav_links: default_nav_links(),
        }
    }
}

fn default_nav_links() -> Vec<NavLink> {
    vec![
        NavLink {
            title: "Weather Summary".to_string(),
            url: "http://localhost:5000".to_string(),
        },
        NavLink {
            title: "Weather Dashboard".to_string(),
            url: "http://localhost:5001".to_string(),
        },
    ]
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, falling back to
    /// defaults for missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let defaults = PageSettings::default();

        let database = DatabaseConfig {
            host: var("DB_HOST", "localhost"),
            port: var("DB_PORT", "3306").parse().unwrap_or(3306),
            username: var("DB_USER", "pi"),
            password: var("DB_PASSWORD", ""),
            database: var("DB_NAME", "weather"),
            table: var("DB_TABLE", "data"),
            max_connections: var("DB_MAX_CONNECTIONS", "5").parse().unwrap_or(5),
        };

        let page = PageSettings {
            page_size: var("PAGE_SIZE", "96").parse().unwrap_or(DEFAULT_PAGE_SIZE),
            title: var("PAGE_TITLE", &defaults.title),
            show_navbar: parse_bool(&var("SHOW_NAVBAR", "true")).unwrap_or(true),
            nav_links: lookup("NAV_LINKS")
                .map(|raw| parse_nav_links(&raw))
                .unwrap_or(defaults.nav_links),
        };

        Config {
            http_addr: var("HTTP_ADDR", "0.0.0.0:8080"),
            database,
            page,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parses `Title=url,Title=url`. Malformed entries are skipped.
pub fn parse_nav_links(raw: &str) -> Vec<NavLink> {
    raw.split(',')
        .filter_map(|entry| {
            let (title, url) = entry.split_once('=')?;
            let (title, url) = (title.trim(), url.trim());
            if title.is_empty() || url.is_empty() {
                return None;
            }
            Some(NavLink {
                title: title.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}
