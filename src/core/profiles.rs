use crate::domain::model::GestationProfile;
use crate::utils::error::Result;
use crate::utils::validation::{validate_gestation_days, validate_non_empty_string};
use std::collections::HashMap;

pub const DEFAULT_SPECIES: &str = "bovine";
pub const DEFAULT_GESTATION_DAYS: i64 = 283;
pub const DEFAULT_CONFIRMATION_DAYS: i64 = 45;

/// (species, gestation_days, confirmation_days)
const BUILTIN_PROFILES: [(&str, i64, i64); 5] = [
    (DEFAULT_SPECIES, DEFAULT_GESTATION_DAYS, DEFAULT_CONFIRMATION_DAYS),
    ("equine", 340, 60),
    ("porcine", 114, 21),
    ("caprine", 150, 30),
    ("ovine", 147, 28),
];

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

fn builtin(key: &str) -> Option<GestationProfile> {
    BUILTIN_PROFILES
        .iter()
        .find(|(species, _, _)| *species == key)
        .map(|&(species, gestation_days, confirmation_days)| GestationProfile {
            species: species.to_string(),
            gestation_days,
            confirmation_days,
        })
}

impl Default for GestationProfile {
    fn default() -> Self {
        Self {
            species: DEFAULT_SPECIES.to_string(),
            gestation_days: DEFAULT_GESTATION_DAYS,
            confirmation_days: DEFAULT_CONFIRMATION_DAYS,
        }
    }
}

/// Built-in profile for `species`; unknown species get the bovine profile.
pub fn gestation_profile(species: &str) -> GestationProfile {
    builtin(&normalize_key(species)).unwrap_or_default()
}

/// Built-in species plus ranch-specific breeds.
///
/// Custom entries shadow built-ins with the same key. Lookups that match
/// neither fall back to the bovine profile, same as [`gestation_profile`].
#[derive(Debug, Clone, Default)]
pub struct ProfileTable {
    custom: HashMap<String, GestationProfile>,
}

impl ProfileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新增自訂品種，天數不合理時拒絕
    pub fn insert(&mut self, name: &str, gestation_days: i64, confirmation_days: i64) -> Result<()> {
        validate_non_empty_string("profiles", name)?;
        let key = normalize_key(name);
        validate_gestation_days(&format!("profiles.{}", key), gestation_days, confirmation_days)?;

        tracing::debug!(
            "Registered gestation profile '{}' ({} / {} days)",
            key,
            gestation_days,
            confirmation_days
        );
        self.custom.insert(
            key.clone(),
            GestationProfile {
                species: key,
                gestation_days,
                confirmation_days,
            },
        );
        Ok(())
    }

    pub fn lookup(&self, key: &str) -> GestationProfile {
        let key = normalize_key(key);
        self.custom
            .get(&key)
            .cloned()
            .or_else(|| builtin(&key))
            .unwrap_or_default()
    }

    /// 是否為已知鍵（內建或自訂），未知鍵仍可查詢但會落回牛
    pub fn contains(&self, key: &str) -> bool {
        let key = normalize_key(key);
        self.custom.contains_key(&key) || builtin(&key).is_some()
    }

    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }
}
