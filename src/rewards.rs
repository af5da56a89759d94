//! Offline reward calculation.
//!
//! Maps time spent away to a catch-up bundle of enemies defeated, XP, and
//! pyreal. Enemies and XP are exact functions of power and minutes; pyreal
//! carries the designed reward variance, drawn from an injected RNG so tests
//! can seed it.

use crate::constants::{
    MAX_OFFLINE_MINUTES, OFFLINE_EFFICIENCY, PYREAL_FACTOR_MAX, PYREAL_FACTOR_MIN, XP_PER_KILL,
};
use crate::game_state::{apply_xp, GameState, PlayerState};
use rand::Rng;

/// Catch-up rewards for one absence. Built fresh per evaluation, consumed
/// once by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfflineRewards {
    /// Effective minutes used in the calculation, after the 8-hour cap.
    pub time_offline_minutes: i64,
    pub enemies_defeated: u64,
    pub xp_gained: u64,
    pub pyreal_gained: u64,
}

impl OfflineRewards {
    /// Whether the bundle is worth surfacing to the player.
    pub fn is_meaningful(&self) -> bool {
        self.enemies_defeated > 0
    }
}

/// Calculates rewards for `minutes_offline` away at the given player power.
///
/// Minutes are clamped to `[0, MAX_OFFLINE_MINUTES]`; sub-minute absences
/// return `None`. The player defeats enemies at a quarter of the online rate
/// of `power * 2` kills per hour.
pub fn calculate_offline_rewards<R: Rng>(
    minutes_offline: i64,
    player: &PlayerState,
    rng: &mut R,
) -> Option<OfflineRewards> {
    let minutes = minutes_offline.clamp(0, MAX_OFFLINE_MINUTES);
    if minutes < 1 {
        return None;
    }

    let hours = minutes as f64 / 60.0;
    let enemies_defeated =
        ((player.power as f64 * 2.0) * hours * OFFLINE_EFFICIENCY).floor() as u64;
    let xp_gained = (enemies_defeated as f64 * XP_PER_KILL).floor() as u64;

    let factor = rng.gen_range(PYREAL_FACTOR_MIN..PYREAL_FACTOR_MAX);
    let pyreal_gained = (enemies_defeated as f64 * factor * OFFLINE_EFFICIENCY).floor() as u64;

    Some(OfflineRewards {
        time_offline_minutes: minutes,
        enemies_defeated,
        xp_gained,
        pyreal_gained,
    })
}

/// Calculates and applies offline rewards to the game state, returning the
/// bundle so the caller can surface it.
pub fn apply_offline_rewards<R: Rng>(
    state: &mut GameState,
    minutes_offline: i64,
    rng: &mut R,
) -> Option<OfflineRewards> {
    let rewards = calculate_offline_rewards(minutes_offline, &state.player, rng)?;

    state.player.pyreal = state.player.pyreal.saturating_add(rewards.pyreal_gained);
    state.lifetime_enemies_defeated = state
        .lifetime_enemies_defeated
        .saturating_add(rewards.enemies_defeated);
    apply_xp(state, rewards.xp_gained);

    Some(rewards)
}
