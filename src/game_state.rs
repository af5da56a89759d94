use crate::constants::{BASE_POWER, POWER_PER_LEVEL, XP_CURVE_BASE, XP_CURVE_EXPONENT};
use serde::{Deserialize, Serialize};

/// Player progression values consumed by the reward calculator and the
/// per-tick production loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub power: u32,
    pub level: u32,
    pub xp: u64,
    pub pyreal: u64,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            power: BASE_POWER,
            level: 1,
            xp: 0,
            pyreal: 0,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Main game state containing all player progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: PlayerState,
    pub lifetime_enemies_defeated: u64,
    pub play_time_seconds: u64,
    /// Epoch seconds of the last durable save, used as the offline baseline.
    pub last_save_time: i64,
}

impl GameState {
    pub fn new(last_save_time: i64) -> Self {
        Self {
            player: PlayerState::new(),
            lifetime_enemies_defeated: 0,
            play_time_seconds: 0,
            last_save_time,
        }
    }
}

/// XP required to advance from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32) -> u64 {
    (XP_CURVE_BASE * (level as f64).powf(XP_CURVE_EXPONENT)).floor() as u64
}

/// Applies XP to the player, processing any level-ups.
///
/// Each level grants `POWER_PER_LEVEL` power. Returns the number of
/// level-ups that occurred (large offline grants can trigger several).
pub fn apply_xp(state: &mut GameState, amount: u64) -> u32 {
    state.player.xp = state.player.xp.saturating_add(amount);

    let mut level_ups = 0;
    loop {
        let needed = xp_for_next_level(state.player.level);
        if state.player.xp < needed {
            break;
        }
        state.player.xp -= needed;
        state.player.level += 1;
        state.player.power += POWER_PER_LEVEL;
        level_ups += 1;
    }
    level_ups
}
