use crate::constants::SAVE_VERSION_MAGIC;
use crate::game_state::GameState;
use chrono::Utc;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Saves and loads game state in a checksummed binary format.
///
/// File layout: version magic (8 bytes LE), payload length (4 bytes LE),
/// bincode payload, SHA-256 checksum over the first three fields.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a SaveManager at the platform config directory.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "petsoft").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self::at_path(config_dir.join("save.dat")))
    }

    /// Creates a SaveManager at an explicit path (tests, simulator runs).
    pub fn at_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    /// Saves the game state, writing to a temp file and renaming so a crash
    /// mid-write cannot leave a truncated save behind.
    pub fn save(&self, state: &GameState) -> io::Result<()> {
        let data = bincode::serialize(state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let tmp_path = self.save_path.with_extension("dat.tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
            file.write_all(&data_len.to_le_bytes())?;
            file.write_all(&data)?;
            file.write_all(&checksum)?;
        }
        fs::rename(&tmp_path, &self.save_path)
    }

    /// Loads the game state, verifying the version magic and checksum.
    pub fn load(&self) -> io::Result<GameState> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, version
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();
        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        bincode::deserialize(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Loads the game state, degrading any failure (missing file, bad magic,
    /// corrupt payload) to a fresh state. Losing a save is cosmetic for an
    /// idle game; it must never surface as an error.
    pub fn load_or_default(&self) -> GameState {
        self.load()
            .unwrap_or_else(|_| GameState::new(Utc::now().timestamp()))
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}
