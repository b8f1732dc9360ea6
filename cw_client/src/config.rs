//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use crate::api_client::DEFAULT_API_URL;
use card_war::{BotDelay, SimpleWar, deck::STANDARD_DECK_SIZE};
use std::time::Duration;

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deck API configuration
    pub api: ApiConfig,
    /// Game rules and seating
    pub game: GameSettings,
    /// Bot opponent behavior
    pub bots: BotSettings,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the deck API
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct GameSettings {
    pub max_rounds: u32,
    pub points_per_round: u32,
    /// Display name of the human seat
    pub player_name: String,
    /// Number of bot opponents
    pub bot_count: usize,
}

#[derive(Debug, Clone)]
pub struct BotSettings {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Seed for reproducible bot delays and offline shuffles
    pub seed: Option<u64>,
}

/// Values given on the command line. They win over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub max_rounds: Option<u32>,
    pub points_per_round: Option<u32>,
    pub player_name: Option<String>,
    pub bot_count: Option<usize>,
    pub seed: Option<u64>,
}

impl ClientConfig {
    /// Load configuration from environment variables, applying `overrides`
    /// on top.
    ///
    /// Unparseable values fall back to their defaults; use
    /// [`validate`](Self::validate) to reject out-of-range ones.
    pub fn from_env(overrides: ConfigOverrides) -> Self {
        let api = ApiConfig {
            base_url: overrides
                .api_url
                .or_else(|| std::env::var("DECK_API_URL").ok())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout_secs: parse_env_or("DECK_API_TIMEOUT_SECS", 10),
        };

        let game = GameSettings {
            max_rounds: overrides
                .max_rounds
                .unwrap_or_else(|| parse_env_or("GAME_MAX_ROUNDS", 8)),
            points_per_round: overrides
                .points_per_round
                .unwrap_or_else(|| parse_env_or("GAME_POINTS_PER_ROUND", 1)),
            player_name: overrides
                .player_name
                .or_else(|| std::env::var("PLAYER_NAME").ok())
                .unwrap_or_else(|| "Player".to_string()),
            bot_count: overrides
                .bot_count
                .unwrap_or_else(|| parse_env_or("GAME_BOT_COUNT", 1)),
        };

        let bots = BotSettings {
            min_delay_ms: parse_env_or("BOT_MIN_DELAY_MS", 1000),
            max_delay_ms: parse_env_or("BOT_MAX_DELAY_MS", 3000),
            seed: overrides.seed.or_else(|| {
                std::env::var("BOT_SEED")
                    .ok()
                    .and_then(|v| v.parse().ok())
            }),
        };

        Self { api, game, bots }
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid {
                var: "DECK_API_URL".to_string(),
                reason: format!("Must be an http(s) URL, got '{}'", self.api.base_url),
            });
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "DECK_API_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.game.max_rounds == 0 {
            return Err(ConfigError::Invalid {
                var: "GAME_MAX_ROUNDS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.game.points_per_round == 0 {
            return Err(ConfigError::Invalid {
                var: "GAME_POINTS_PER_ROUND".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        // A player winning every round must not overflow the score.
        if self
            .game
            .max_rounds
            .checked_mul(self.game.points_per_round)
            .is_none()
        {
            return Err(ConfigError::Invalid {
                var: "GAME_POINTS_PER_ROUND".to_string(),
                reason: format!(
                    "Must be at most {} for {} rounds",
                    u32::MAX / self.game.max_rounds,
                    self.game.max_rounds
                ),
            });
        }

        if self.game.player_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "PLAYER_NAME".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        // One card per seat per round, so the table can't outgrow the deck.
        if self.game.bot_count == 0 || self.game.bot_count >= STANDARD_DECK_SIZE as usize {
            return Err(ConfigError::Invalid {
                var: "GAME_BOT_COUNT".to_string(),
                reason: format!("Must be between 1 and {}", STANDARD_DECK_SIZE - 1),
            });
        }

        if self.bots.min_delay_ms > self.bots.max_delay_ms {
            return Err(ConfigError::Invalid {
                var: "BOT_MAX_DELAY_MS".to_string(),
                reason: format!(
                    "Must be at least BOT_MIN_DELAY_MS ({})",
                    self.bots.min_delay_ms
                ),
            });
        }

        Ok(())
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn game_mode(&self) -> SimpleWar {
        SimpleWar::new(self.game.max_rounds, self.game.points_per_round)
    }

    pub fn bot_delay(&self) -> BotDelay {
        let min = Duration::from_millis(self.bots.min_delay_ms);
        let max = Duration::from_millis(self.bots.max_delay_ms);
        if min == max {
            BotDelay::Fixed(min)
        } else {
            BotDelay::Uniform { min, max }
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ClientConfig {
        ClientConfig {
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                timeout_secs: 10,
            },
            game: GameSettings {
                max_rounds: 8,
                points_per_round: 1,
                player_name: "Alice".to_string(),
                bot_count: 1,
            },
            bots: BotSettings {
                min_delay_ms: 1000,
                max_delay_ms: 3000,
                seed: None,
            },
        }
    }

    fn invalid_var(config: &ClientConfig) -> String {
        match config.validate().unwrap_err() {
            ConfigError::Invalid { var, .. } => var,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_overrides_win() {
        let config = ClientConfig::from_env(ConfigOverrides {
            api_url: Some("http://localhost:3000/api/deck".to_string()),
            max_rounds: Some(3),
            points_per_round: Some(2),
            player_name: Some("Bob".to_string()),
            bot_count: Some(4),
            seed: Some(99),
        });

        assert_eq!(config.api.base_url, "http://localhost:3000/api/deck");
        assert_eq!(config.game.max_rounds, 3);
        assert_eq!(config.game.points_per_round, 2);
        assert_eq!(config.game.player_name, "Bob");
        assert_eq!(config.game.bot_count, 4);
        assert_eq!(config.bots.seed, Some(99));
        assert_eq!(config.game_mode(), SimpleWar::new(3, 2));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            var: "GAME_MAX_ROUNDS".to_string(),
            reason: "Must be greater than 0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("GAME_MAX_ROUNDS"));
        assert!(msg.contains("Must be greater than 0"));
    }

    #[test]
    fn test_config_validation_url_scheme() {
        let mut config = valid_config();
        config.api.base_url = "deckofcardsapi.com/api/deck".to_string();
        assert_eq!(invalid_var(&config), "DECK_API_URL");
    }

    #[test]
    fn test_config_validation_zero_rounds() {
        let mut config = valid_config();
        config.game.max_rounds = 0;
        assert_eq!(invalid_var(&config), "GAME_MAX_ROUNDS");
    }

    #[test]
    fn test_config_validation_zero_points() {
        let mut config = valid_config();
        config.game.points_per_round = 0;
        assert_eq!(invalid_var(&config), "GAME_POINTS_PER_ROUND");
    }

    #[test]
    fn test_config_validation_points_overflow() {
        let mut config = valid_config();
        config.game.points_per_round = u32::MAX;
        assert_eq!(invalid_var(&config), "GAME_POINTS_PER_ROUND");

        config.game.points_per_round = u32::MAX / 8;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_blank_name() {
        let mut config = valid_config();
        config.game.player_name = "   ".to_string();
        assert_eq!(invalid_var(&config), "PLAYER_NAME");
    }

    #[test]
    fn test_config_validation_bot_count() {
        let mut config = valid_config();
        config.game.bot_count = 0;
        assert_eq!(invalid_var(&config), "GAME_BOT_COUNT");

        config.game.bot_count = 52;
        assert_eq!(invalid_var(&config), "GAME_BOT_COUNT");

        config.game.bot_count = 51;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_delay_range() {
        let mut config = valid_config();
        config.bots.min_delay_ms = 4000;
        assert_eq!(invalid_var(&config), "BOT_MAX_DELAY_MS");
    }

    #[test]
    fn test_bot_delay() {
        let mut config = valid_config();
        assert_eq!(
            config.bot_delay(),
            BotDelay::Uniform {
                min: Duration::from_secs(1),
                max: Duration::from_secs(3),
            }
        );

        config.bots.min_delay_ms = 500;
        config.bots.max_delay_ms = 500;
        assert_eq!(config.bot_delay(), BotDelay::Fixed(Duration::from_millis(500)));
    }
}
