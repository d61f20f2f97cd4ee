//! Signatory registry with durable persistence
//!
//! The full signatory list is stored as one JSON value under a single
//! settings key and fully rewritten on every mutation. On first use (empty
//! storage) a fixed three-entry seed is installed.

use crate::model::SignatoryProfile;
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

/// Settings key holding the JSON-serialized signatory list
const SETTINGS_KEY: &str = "assinaturas";

/// Fixed seed installed when no persisted list exists.
fn seed_profiles() -> Vec<SignatoryProfile> {
    vec![
        SignatoryProfile {
            name: "VALDILENE ROCHA COSTA ALVES".to_string(),
            role: "SECRETÁRIA DE SAÚDE".to_string(),
            decree: "017/2025".to_string(),
        },
        SignatoryProfile {
            name: "DIÊNIFER CERETTA PIMENTA MOTA".to_string(),
            role: "Diretora Executiva da Secretaria Municipal da Saúde".to_string(),
            decree: "Decreto nº 0046/2025".to_string(),
        },
        SignatoryProfile {
            name: "EUNICE CRISTINA PERES SIMÕES".to_string(),
            role: "Secretária Adjunta de Saúde".to_string(),
            decree: "Decreto nº 017/2025 – Portaria PMU/SMS nº 018/2025".to_string(),
        },
    ]
}

/// CRUD store of signatory profiles backed by the settings table.
pub struct SignatoryRegistry {
    db: SqlitePool,
}

impl SignatoryRegistry {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Return the persisted list, or install and persist the seed when
    /// storage is empty. A second call returns the same list without
    /// re-seeding.
    pub async fn load_or_seed(&self) -> Result<Vec<SignatoryProfile>> {
        let existing = self.load().await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        let seeded = seed_profiles();
        self.save(&seeded).await?;
        info!(count = seeded.len(), "Seeded default signatory profiles");
        Ok(seeded)
    }

    /// Current persisted list (possibly empty before the first seed).
    pub async fn list(&self) -> Result<Vec<SignatoryProfile>> {
        self.load().await
    }

    /// Append a profile and rewrite the stored list.
    pub async fn add(&self, profile: SignatoryProfile) -> Result<Vec<SignatoryProfile>> {
        validate(&profile)?;

        let mut profiles = self.load().await?;
        profiles.push(profile);
        self.save(&profiles).await?;
        Ok(profiles)
    }

    /// Replace the profile at `index`. The index is revalidated against the
    /// current list before writing.
    pub async fn update(
        &self,
        index: usize,
        profile: SignatoryProfile,
    ) -> Result<Vec<SignatoryProfile>> {
        validate(&profile)?;

        let mut profiles = self.load().await?;
        if index >= profiles.len() {
            return Err(Error::NotFound(format!("no signatory at index {index}")));
        }
        profiles[index] = profile;
        self.save(&profiles).await?;
        Ok(profiles)
    }

    /// Remove the profile at `index`, preserving the relative order of the
    /// remaining entries.
    pub async fn remove(&self, index: usize) -> Result<Vec<SignatoryProfile>> {
        let mut profiles = self.load().await?;
        if index >= profiles.len() {
            return Err(Error::NotFound(format!("no signatory at index {index}")));
        }
        profiles.remove(index);
        self.save(&profiles).await?;
        Ok(profiles)
    }

    async fn load(&self) -> Result<Vec<SignatoryProfile>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
            .bind(SETTINGS_KEY)
            .fetch_optional(&self.db)
            .await?;

        match row {
            Some((json,)) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, profiles: &[SignatoryProfile]) -> Result<()> {
        let json = serde_json::to_string(profiles)?;
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(SETTINGS_KEY)
        .bind(json)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}

/// A profile with any empty field is a user-facing validation error, not a
/// fault.
fn validate(profile: &SignatoryProfile) -> Result<()> {
    if profile.name.trim().is_empty()
        || profile.role.trim().is_empty()
        || profile.decree.trim().is_empty()
    {
        return Err(Error::Validation(
            "signatory name, role and decree are all required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_three_profiles() {
        assert_eq!(seed_profiles().len(), 3);
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let mut profile = SignatoryProfile {
            name: "A".to_string(),
            role: "B".to_string(),
            decree: "C".to_string(),
        };
        assert!(validate(&profile).is_ok());

        profile.role = "  ".to_string();
        assert!(matches!(validate(&profile), Err(Error::Validation(_))));
    }
}
