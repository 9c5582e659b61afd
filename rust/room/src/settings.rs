use cardroom_engine::rules::RoundConfig;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ROOM_TTL_MINUTES: u64 = 30;

/// Room-wide defaults applied to every new round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoomSettings {
    pub round: RoundConfig,
    /// Idle minutes before a room is expired
    pub room_ttl_minutes: u64,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            round: RoundConfig::default(),
            room_ttl_minutes: DEFAULT_ROOM_TTL_MINUTES,
        }
    }
}

impl RoomSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.room_ttl_minutes == 0 {
            return Err(SettingsError::InvalidValue(
                "room_ttl_minutes must be greater than 0".to_string(),
            ));
        }
        self.round
            .validate()
            .map_err(|e| SettingsError::InvalidValue(e.to_string()))
    }

    pub fn room_ttl(&self) -> Duration {
        Duration::from_secs(self.room_ttl_minutes * 60)
    }
}

/// In-memory settings, validated on every write.
#[derive(Debug, Default)]
pub struct SettingsStore {
    settings: RwLock<RoomSettings>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: RoomSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings: RwLock::new(settings),
        })
    }

    pub fn get(&self) -> Result<RoomSettings, SettingsError> {
        self.settings
            .read()
            .map(|guard| *guard)
            .map_err(|_| SettingsError::StoragePoisoned)
    }

    pub fn update(&self, new_settings: RoomSettings) -> Result<RoomSettings, SettingsError> {
        new_settings.validate()?;
        let mut guard = self
            .settings
            .write()
            .map_err(|_| SettingsError::StoragePoisoned)?;
        *guard = new_settings;
        Ok(new_settings)
    }

    /// Sets one field from a JSON value, e.g. `("blackjack_bet", 25)`.
    pub fn update_field(
        &self,
        field: &str,
        value: serde_json::Value,
    ) -> Result<RoomSettings, SettingsError> {
        let mut current = self.get()?;
        let as_u32 = |name: &str| {
            value
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| SettingsError::InvalidValue(format!("{name} must be a number")))
        };
        let as_bool = |name: &str| {
            value
                .as_bool()
                .ok_or_else(|| SettingsError::InvalidValue(format!("{name} must be a boolean")))
        };

        match field {
            "room_ttl_minutes" => {
                current.room_ttl_minutes = value.as_u64().ok_or_else(|| {
                    SettingsError::InvalidValue("room_ttl_minutes must be a number".to_string())
                })?;
            }
            "starting_chips" => current.round.starting_chips = as_u32(field)?,
            "blackjack_bet" => current.round.blackjack_bet = as_u32(field)?,
            "reshuffle_discard" => current.round.reshuffle_discard = as_bool(field)?,
            "uno_stacking" => current.round.rules.uno_stacking = as_bool(field)?,
            "schwimmen_three_aces" => current.round.rules.schwimmen_three_aces = as_bool(field)?,
            "schwimmen_fire_ends_round" => {
                current.round.rules.schwimmen_fire_ends_round = as_bool(field)?
            }
            _ => {
                return Err(SettingsError::InvalidValue(format!(
                    "unknown field: {field}"
                )))
            }
        }

        self.update(current)
    }

    pub fn reset(&self) -> Result<RoomSettings, SettingsError> {
        self.update(RoomSettings::default())
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
    #[error("Settings storage poisoned")]
    StoragePoisoned,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_valid() {
        let settings = RoomSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.room_ttl(), Duration::from_secs(30 * 60));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let settings = RoomSettings {
            room_ttl_minutes: 0,
            ..RoomSettings::default()
        };
        assert!(SettingsStore::with_settings(settings).is_err());
    }

    #[test]
    fn update_field_changes_round_rules() {
        let store = SettingsStore::new();
        let updated = store.update_field("uno_stacking", json!(false)).unwrap();
        assert!(!updated.round.rules.uno_stacking);
        let updated = store.update_field("blackjack_bet", json!(25)).unwrap();
        assert_eq!(updated.round.blackjack_bet, 25);
        assert_eq!(store.get().unwrap(), updated);
    }

    #[test]
    fn update_field_rejects_bad_input() {
        let store = SettingsStore::new();
        assert!(store.update_field("uno_stacking", json!(3)).is_err());
        assert!(store.update_field("blackjack_bet", json!("ten")).is_err());
        assert!(store.update_field("room_ttl_minutes", json!(0)).is_err());
        assert!(store.update_field("nope", json!(1)).is_err());
        assert_eq!(store.get().unwrap(), RoomSettings::default());
    }

    #[test]
    fn reset_restores_defaults() {
        let store = SettingsStore::new();
        store.update_field("starting_chips", json!(50)).unwrap();
        assert_eq!(store.reset().unwrap(), RoomSettings::default());
    }
}
