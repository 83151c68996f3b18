// Snapshot persistence for the whole hotel state.
// One JSON document holds every room and booking; it is rewritten in full on
// each save and read back once at startup.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    hotel::{Hotel, HotelError},
    model::{Booking, Room, RoomCategory},
};

// Bumped whenever the snapshot layout changes
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Inconsistent snapshot: {0}")]
    Inconsistent(#[from] HotelError),
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    rooms: &'a [Room],
    bookings: &'a [Booking],
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    #[serde(default)]
    rooms: Vec<Room>,
    #[serde(default)]
    bookings: Vec<Booking>,
}

pub fn sample_rooms() -> Vec<Room> {
    vec![
        Room::new(101, RoomCategory::Standard, 2000.0),
        Room::new(102, RoomCategory::Standard, 2000.0),
        Room::new(201, RoomCategory::Deluxe, 3500.0),
        Room::new(202, RoomCategory::Deluxe, 3500.0),
        Room::new(301, RoomCategory::Suite, 6000.0),
    ]
}

pub fn seeded_hotel() -> Hotel {
    let mut hotel = Hotel::new();
    for room in sample_rooms() {
        // fixed sample data, never clashes
        if let Err(e) = hotel.add_room(room) {
            warn!(error = %e, "skipping sample room");
        }
    }
    info!(rooms = hotel.rooms().len(), "seeded sample rooms");
    hotel
}

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored hotel, or seeds and saves a fresh one when there is
    /// no snapshot yet or the snapshot cannot be used. Never fails.
    pub fn load_or_create(&self) -> Hotel {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no snapshot found, creating a new hotel");
            return self.create();
        }

        match self.try_load() {
            Ok(hotel) => {
                info!(
                    path = %self.path.display(),
                    rooms = hotel.rooms().len(),
                    bookings = hotel.bookings().len(),
                    "loaded hotel state"
                );
                hotel
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to load snapshot, will create new");
                self.create()
            }
        }
    }

    pub fn try_load(&self) -> Result<Hotel, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        Ok(Hotel::from_parts(snapshot.rooms, snapshot.bookings)?)
    }

    /// Writes the full state, replacing any previous snapshot. Failures are
    /// logged and reported as `false`.
    pub fn save(&self, hotel: &Hotel) -> bool {
        match self.try_save(hotel) {
            Ok(()) => {
                info!(path = %self.path.display(), "saved hotel state");
                true
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to save hotel state");
                false
            }
        }
    }

    pub fn try_save(&self, hotel: &Hotel) -> Result<(), StoreError> {
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            rooms: hotel.rooms(),
            bookings: hotel.bookings(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;

        // write next to the target, then swap it in
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn create(&self) -> Hotel {
        let hotel = seeded_hotel();
        self.save(&hotel);
        hotel
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
