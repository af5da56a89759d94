//! PetSoft Tycoon - Idle Pet Game Core Library
//!
//! The offline-progression core of an idle game: background time tracking,
//! catch-up reward calculation, a fixed-timestep production loop, and
//! debounced persisted counters. Presentation is left to the host.

pub mod background;
pub mod build_info;
pub mod constants;
pub mod counter;
pub mod economy;
pub mod game_loop;
pub mod game_state;
pub mod lifecycle;
pub mod rewards;
pub mod save_manager;
pub mod session;
pub mod storage;

pub use background::BackgroundTracker;
pub use constants::*;
pub use counter::PersistedCounter;
pub use game_loop::FixedTimestepLoop;
pub use game_state::{GameState, PlayerState};
pub use lifecycle::{AppState, LifecycleHub, Subscription};
pub use rewards::{calculate_offline_rewards, OfflineRewards};
pub use session::GameSession;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
