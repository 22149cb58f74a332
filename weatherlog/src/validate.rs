use crate::config::Config;
use crate::errors::{Error, Result};

const MAX_PAGE_SIZE: i64 = 10_000;
const MAX_TABLE_NAME_LEN: usize = 64;

/// Validates the configuration before the service starts
pub fn validate(config: &Config) -> Result<()> {
    // The table name is interpolated into SQL, it cannot be bound
    validate_table_name(&config.database.table)?;

    if config.database.host.trim().is_empty() {
        return Err(Error::Config("Database host cannot be empty".to_string()));
    }

    if config.database.database.trim().is_empty() {
        return Err(Error::Config("Database name cannot be empty".to_string()));
    }

    if config.database.max_connections == 0 {
        return Err(Error::Config(
            "Database max connections must be at least 1".to_string(),
        ));
    }

    let page_size = config.page.page_size;
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(Error::Config(format!(
            "Page size {} out of range [1, {}]",
            page_size, MAX_PAGE_SIZE
        )));
    }

    Ok(())
}

pub fn validate_table_name(table: &str) -> Result<()> {
    if table.is_empty() || table.len() > MAX_TABLE_NAME_LEN {
        return Err(Error::Config(format!(
            "Table name must be 1 to {} characters",
            MAX_TABLE_NAME_LEN
        )));
    }

    if !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(Error::Config(format!(
            "Table name {:?} may only contain letters, digits and underscores",
            table
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::from_lookup(|_| None)
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&config()).is_ok());
    }

    #[test]
    fn test_invalid_table_name() {
        let mut config = config();
        config.database.table = "data; DROP TABLE data".to_string();

        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_table_name() {
        let mut config = config();
        config.database.table = String::new();

        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_page_size() {
        let mut config = config();
        config.page.page_size = 0;

        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_host() {
        let mut config = config();
        config.database.host = " ".to_string();

        assert!(validate(&config).is_err());
    }
}
