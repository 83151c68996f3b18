// Room and booking records shared by the hotel, the store and the shell

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type RoomId = u32;

// Date format used by the interactive shell
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    Standard,
    Deluxe,
    Suite,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 3] = [
        RoomCategory::Standard,
        RoomCategory::Deluxe,
        RoomCategory::Suite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomCategory::Standard => "standard",
            RoomCategory::Deluxe => "deluxe",
            RoomCategory::Suite => "suite",
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoomCategory::Standard => "Standard",
            RoomCategory::Deluxe => "Deluxe",
            RoomCategory::Suite => "Suite",
        };
        f.write_str(name)
    }
}

impl FromStr for RoomCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        RoomCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| format!("unknown room category '{}'", s.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub category: RoomCategory,
    pub price_per_night: f64,
}

impl Room {
    pub fn new(id: RoomId, category: RoomCategory, price_per_night: f64) -> Self {
        Self {
            id,
            category,
            price_per_night,
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Room {} [{}] {:.2}/night",
            self.id, self.category, self.price_per_night
        )
    }
}

/// Opaque booking identifier, a random v4 UUID generated when the booking is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(Uuid);

impl BookingId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub room_id: RoomId,
    pub guest_name: String,
    pub from: NaiveDate,
    // exclusive
    pub to: NaiveDate,
    pub amount_paid: f64,
}

impl Booking {
    // Half-open interval test: [from, to) against [self.from, self.to)
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        from < self.to && self.from < to
    }

    pub fn nights(&self) -> i64 {
        nights_between(self.from, self.to)
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Booking {} room={} guest='{}' from={} to={} paid={:.2}",
            self.id,
            self.room_id,
            self.guest_name,
            self.from.format(DATE_FORMAT),
            self.to.format(DATE_FORMAT),
            self.amount_paid
        )
    }
}

pub fn nights_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
}
