use anyhow::Result;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_MONGODB_DATABASE: &str = "bookStore";
const DEFAULT_MONGODB_COLLECTION: &str = "books";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl AppConfig {
    // 環境変数（と、あれば .env ファイル）から設定を読み込む
    pub fn new() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // 任意のキー参照関数から設定を組み立てる。未設定のキーはデフォルト値になる
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| -> Result<String> {
            match lookup(key) {
                Some(value) if value.trim().is_empty() => {
                    anyhow::bail!("{key} must not be blank")
                }
                Some(value) => Ok(value),
                None => Ok(default.to_string()),
            }
        };

        let database = DatabaseConfig {
            uri: read("MONGODB_URI", DEFAULT_MONGODB_URI)?,
            database: read("MONGODB_DATABASE", DEFAULT_MONGODB_DATABASE)?,
            collection: read("MONGODB_COLLECTION", DEFAULT_MONGODB_COLLECTION)?,
        };
        let bind_addr = read("BIND_ADDR", DEFAULT_BIND_ADDR)?;

        Ok(Self {
            bind_addr,
            database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.database.uri, "mongodb://localhost:27017");
        assert_eq!(config.database.database, "bookStore");
        assert_eq!(config.database.collection, "books");
    }

    #[test]
    fn environment_values_override_defaults() {
        let env = HashMap::from([
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("MONGODB_DATABASE", "library"),
        ]);
        let config = AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.database.database, "library");
        assert_eq!(config.database.collection, "books");
    }

    #[test]
    fn blank_values_are_rejected() {
        let result = AppConfig::from_lookup(|key| (key == "MONGODB_URI").then(|| " ".to_string()));

        assert!(result.is_err());
    }
}
