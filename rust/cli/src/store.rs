//! File-backed room store.
//!
//! Each room lives in `<dir>/<room_id>.json` as a [`StoredRoom`]. A mutation
//! holds `<room_id>.lock` (created exclusively) for its whole
//! read-apply-write cycle, and a write is refused unless the version on disk
//! still matches the version that was read. Writes go to a temp file that is
//! renamed over the document.
//!
//! A lock left behind by a process that died mid-update is broken once its
//! owner pid is gone or the file is older than [`LOCK_STALE_AFTER`].

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

use holdem_engine::room::Room;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CliError;

const LOCK_ATTEMPTS: u32 = 100;
const LOCK_BACKOFF: Duration = Duration::from_millis(20);
/// Age after which a lock file is considered abandoned.
pub const LOCK_STALE_AFTER: Duration = Duration::from_secs(30);

/// A room snapshot and its write counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRoom {
    pub version: u64,
    pub room: Room,
}

#[derive(Debug, Clone)]
pub struct RoomStore {
    dir: PathBuf,
}

/// Removes the lock file when dropped.
#[derive(Debug)]
struct LockGuard {
    path: PathBuf,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

impl RoomStore {
    /// Opens the store, creating `dir` when missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CliError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            CliError::Store(format!("cannot create store {}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn room_path(&self, room_id: &str) -> Result<PathBuf, CliError> {
        validate_room_id(room_id)?;
        Ok(self.dir.join(format!("{}.json", room_id)))
    }

    fn lock(&self, room_id: &str) -> Result<LockGuard, CliError> {
        validate_room_id(room_id)?;
        let path = self.dir.join(format!("{}.lock", room_id));
        for _ in 0..LOCK_ATTEMPTS {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut f) => {
                    let _ = writeln!(f, "{}", std::process::id());
                    return Ok(LockGuard { path });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if lock_is_stale(&path) {
                        warn!(room_id, lock = %path.display(), "breaking stale room lock");
                        match fs::remove_file(&path) {
                            Ok(()) => continue,
                            Err(e) if e.kind() == ErrorKind::NotFound => continue,
                            Err(e) => return Err(e.into()),
                        }
                    }
                    thread::sleep(LOCK_BACKOFF);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(CliError::Store(format!("room {} is locked by another process", room_id)))
    }

    /// Stores a brand-new room at version 1.
    pub fn create(&self, room: &Room) -> Result<StoredRoom, CliError> {
        let _guard = self.lock(&room.room_id)?;
        let path = self.room_path(&room.room_id)?;
        if path.exists() {
            return Err(CliError::Store(format!("room {} already exists", room.room_id)));
        }
        let stored = StoredRoom {
            version: 1,
            room: room.clone(),
        };
        self.write_atomic(&path, &stored)?;
        debug!(room_id = %room.room_id, version = 1, "room stored");
        Ok(stored)
    }

    pub fn load(&self, room_id: &str) -> Result<StoredRoom, CliError> {
        let path = self.room_path(room_id)?;
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CliError::Store(format!("room {} not found", room_id)));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&text)
            .map_err(|e| CliError::Store(format!("room {} is corrupted: {}", room_id, e)))
    }

    /// Writes `room` if the stored version is still `expected`. Returns the
    /// new version.
    pub fn save(&self, room: &Room, expected: u64) -> Result<u64, CliError> {
        let _guard = self.lock(&room.room_id)?;
        self.save_locked(room, expected)
    }

    fn save_locked(&self, room: &Room, expected: u64) -> Result<u64, CliError> {
        let current = self.load(&room.room_id)?;
        if current.version != expected {
            return Err(CliError::Store(format!(
                "room {} changed concurrently (version {} on disk, {} expected)",
                room.room_id, current.version, expected
            )));
        }
        let stored = StoredRoom {
            version: expected + 1,
            room: room.clone(),
        };
        self.write_atomic(&self.room_path(&room.room_id)?, &stored)?;
        debug!(room_id = %room.room_id, version = stored.version, "room stored");
        Ok(stored.version)
    }

    /// Serialized read-apply-write: loads the room under its lock, applies
    /// `f`, and writes the result back. Nothing is written when `f` fails.
    pub fn update<F>(&self, room_id: &str, f: F) -> Result<StoredRoom, CliError>
    where
        F: FnOnce(&Room) -> Result<Room, CliError>,
    {
        let _guard = self.lock(room_id)?;
        let current = self.load(room_id)?;
        let next = f(&current.room)?;
        let version = self.save_locked(&next, current.version)?;
        Ok(StoredRoom { version, room: next })
    }

    /// Room ids present in the store, sorted.
    pub fn list(&self) -> Result<Vec<String>, CliError> {
        let mut ids: Vec<String> = fs::read_dir(&self.dir)?
            .filter_map(Result::ok)
            .filter_map(|e| {
                let name = e.file_name().into_string().ok()?;
                name.strip_suffix(".json").map(str::to_string)
            })
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn write_atomic(&self, path: &Path, stored: &StoredRoom) -> Result<(), CliError> {
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(stored)?;
        {
            let mut f = File::create(&tmp)?;
            f.write_all(json.as_bytes())?;
            f.sync_all()?;
        }
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn lock_is_stale(path: &Path) -> bool {
    let age = fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| SystemTime::now().duration_since(t).ok());
    if age.is_some_and(|age| age > LOCK_STALE_AFTER) {
        return true;
    }
    // an empty file is a lock whose owner has not written its pid yet
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .is_some_and(|pid| !process_alive(pid))
}

#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

#[cfg(not(target_os = "linux"))]
fn process_alive(_pid: u32) -> bool {
    true
}

fn validate_room_id(room_id: &str) -> Result<(), CliError> {
    let ok = !room_id.is_empty()
        && room_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(CliError::InvalidInput(format!("invalid room id: {:?}", room_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::player::User;
    use holdem_engine::room::{join_room, TableConfig};

    fn room(id: &str) -> Room {
        Room::new(id, &User::new("h", "Host"), TableConfig::default(), 0)
    }

    #[test]
    fn create_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::open(dir.path()).unwrap();
        store.create(&room("abc")).unwrap();
        let loaded = store.load("abc").unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.room, room("abc"));
        assert_eq!(store.list().unwrap(), vec!["abc".to_string()]);
        assert!(!dir.path().join("abc.lock").exists());
    }

    #[test]
    fn duplicate_create_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::open(dir.path()).unwrap();
        store.create(&room("abc")).unwrap();
        assert!(matches!(store.create(&room("abc")), Err(CliError::Store(_))));
    }

    #[test]
    fn stale_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::open(dir.path()).unwrap();
        let first = store.create(&room("abc")).unwrap();
        let joined = join_room(&first.room, &User::new("x", "X")).unwrap();
        assert_eq!(store.save(&joined, first.version).unwrap(), 2);
        // a second writer that read version 1 loses
        let other = join_room(&first.room, &User::new("y", "Y")).unwrap();
        let err = store.save(&other, first.version).unwrap_err();
        assert!(err.to_string().contains("changed concurrently"));
        assert_eq!(store.load("abc").unwrap().room, joined);
    }

    #[test]
    fn failed_update_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::open(dir.path()).unwrap();
        store.create(&room("abc")).unwrap();
        let res = store.update("abc", |_| Err(CliError::InvalidInput("nope".into())));
        assert!(res.is_err());
        assert_eq!(store.load("abc").unwrap().version, 1);
        assert!(!dir.path().join("abc.lock").exists());
    }

    #[test]
    fn held_lock_blocks_writers() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::open(dir.path()).unwrap();
        store.create(&room("abc")).unwrap();
        let _held = store.lock("abc").unwrap();
        let err = store.update("abc", |r| Ok(r.clone())).unwrap_err();
        assert!(err.to_string().contains("locked"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn lock_of_a_dead_process_is_broken() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::open(dir.path()).unwrap();
        store.create(&room("abc")).unwrap();
        fs::write(dir.path().join("abc.lock"), format!("{}\n", u32::MAX)).unwrap();
        let joined = store
            .update("abc", |r| Ok(join_room(r, &User::new("x", "X"))?))
            .unwrap();
        assert_eq!(joined.version, 2);
        assert!(!dir.path().join("abc.lock").exists());
        store.update("abc", |r| Ok(r.clone())).unwrap();
    }

    #[test]
    fn old_lock_is_broken_even_if_owner_lives() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::open(dir.path()).unwrap();
        store.create(&room("abc")).unwrap();
        let lock = dir.path().join("abc.lock");
        fs::write(&lock, format!("{}\n", std::process::id())).unwrap();
        let old = SystemTime::now() - LOCK_STALE_AFTER - Duration::from_secs(5);
        File::options().write(true).open(&lock).unwrap().set_modified(old).unwrap();
        assert_eq!(store.update("abc", |r| Ok(r.clone())).unwrap().version, 2);
    }

    #[test]
    fn fresh_lock_of_a_live_process_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let lock = dir.path().join("abc.lock");
        fs::write(&lock, format!("{}\n", std::process::id())).unwrap();
        assert!(!lock_is_stale(&lock));
        fs::write(&lock, "").unwrap();
        assert!(!lock_is_stale(&lock));
    }

    #[test]
    fn concurrent_joins_are_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::open(dir.path()).unwrap();
        store.create(&room("abc")).unwrap();
        let handles: Vec<_> = (0..6)
            .map(|i| {
                let store = store.clone();
                thread::spawn(move || {
                    store.update("abc", |r| {
                        Ok(join_room(r, &User::new(format!("u{}", i), "U"))?)
                    })
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap().unwrap();
        }
        let stored = store.load("abc").unwrap();
        assert_eq!(stored.room.players.len(), 7);
        assert_eq!(stored.version, 7);
    }

    #[test]
    fn ids_cannot_escape_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::open(dir.path()).unwrap();
        assert!(matches!(store.load("../etc"), Err(CliError::InvalidInput(_))));
        assert!(matches!(store.load(""), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn missing_room() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoomStore::open(dir.path()).unwrap();
        assert_eq!(
            store.load("nope").unwrap_err().to_string(),
            "Store error: room nope not found"
        );
    }
}
