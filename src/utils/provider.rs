use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio_rusqlite::{OptionalExtension, params};

/// Persistence namespace for one stored value. List documents live under the
/// global scope; per-guild settings such as the mod log live under the guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Guild(u64),
}

impl Scope {
    fn as_key(self) -> String {
        match self {
            Scope::Global => "global".to_string(),
            Scope::Guild(id) => id.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("settings database error: {0}")]
    Db(#[from] tokio_rusqlite::Error),
    #[error("stored value is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Key-value settings store over a single SQLite table. Values are arbitrary
/// JSON, stored as text, durable across restarts.
#[derive(Clone)]
pub struct SettingProvider {
    db: tokio_rusqlite::Connection,
}

impl SettingProvider {
    pub async fn open(path: &str) -> Result<Self, ProviderError> {
        let db = tokio_rusqlite::Connection::open(path).await?;
        db.call(|conn| {
            conn.execute(
                "CREATE TABLE IF NOT EXISTS settings (
                    scope TEXT NOT NULL,
                    key TEXT NOT NULL,
                    value TEXT NOT NULL,
                    PRIMARY KEY (scope, key)
                )",
                [],
            )?;
            Ok(())
        })
        .await?;

        Ok(Self { db })
    }

    pub async fn get(
        &self,
        scope: Scope,
        key: &str,
    ) -> Result<Option<serde_json::Value>, ProviderError> {
        let scope_key = scope.as_key();
        let key = key.to_string();

        let stored: Option<String> = self
            .db
            .call(move |conn| {
                let row = conn
                    .query_row(
                        "SELECT value FROM settings WHERE scope = ?1 AND key = ?2",
                        params![scope_key, key],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(row)
            })
            .await?;

        match stored {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    pub async fn set(
        &self,
        scope: Scope,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), ProviderError> {
        let scope_key = scope.as_key();
        let key = key.to_string();
        let text = value.to_string();

        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO settings (scope, key, value) VALUES (?1, ?2, ?3)
                     ON CONFLICT (scope, key) DO UPDATE SET value = excluded.value",
                    params![scope_key, key, text],
                )?;
                Ok(())
            })
            .await?;

        Ok(())
    }

    /// Typed read for settings structs.
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        scope: Scope,
        key: &str,
    ) -> Result<Option<T>, ProviderError> {
        match self.get(scope, key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Typed write for settings structs.
    pub async fn set_as<T: Serialize>(
        &self,
        scope: Scope,
        key: &str,
        value: &T,
    ) -> Result<(), ProviderError> {
        self.set(scope, key, serde_json::to_value(value)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_none_for_unset_key() {
        let provider = SettingProvider::open(":memory:").await.unwrap();
        let value = provider.get(Scope::Global, "missing").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_roundtrips_json() {
        let provider = SettingProvider::open(":memory:").await.unwrap();
        let value = serde_json::json!(["hello", "world"]);

        provider.set(Scope::Global, "thing", value.clone()).await.unwrap();
        let stored = provider.get(Scope::Global, "thing").await.unwrap();
        assert_eq!(stored, Some(value));
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        let provider = SettingProvider::open(":memory:").await.unwrap();

        provider
            .set(Scope::Global, "thing", serde_json::json!(["a"]))
            .await
            .unwrap();
        provider
            .set(Scope::Global, "thing", serde_json::json!(["a", "b"]))
            .await
            .unwrap();

        let stored = provider.get(Scope::Global, "thing").await.unwrap();
        assert_eq!(stored, Some(serde_json::json!(["a", "b"])));
    }

    #[tokio::test]
    async fn test_scopes_do_not_collide() {
        let provider = SettingProvider::open(":memory:").await.unwrap();

        provider
            .set(Scope::Global, "mod_log", serde_json::json!({"enabled": false}))
            .await
            .unwrap();
        provider
            .set(
                Scope::Guild(42),
                "mod_log",
                serde_json::json!({"enabled": true}),
            )
            .await
            .unwrap();

        let guild = provider.get(Scope::Guild(42), "mod_log").await.unwrap();
        assert_eq!(guild, Some(serde_json::json!({"enabled": true})));
        let global = provider.get(Scope::Global, "mod_log").await.unwrap();
        assert_eq!(global, Some(serde_json::json!({"enabled": false})));
    }
}
