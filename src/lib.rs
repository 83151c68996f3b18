// Main library file for the hotel reservation manager

// Records, then the hotel that owns them, then everything built around it
pub mod model;
pub mod payment;
pub mod hotel;
pub mod store;
pub mod command;
pub mod shell;
pub mod config;
pub mod logging;

// Re-export key types for convenience
pub use command::{Command, Dispatcher, Outcome};
pub use config::{AppConfig, ConfigError};
pub use hotel::{Hotel, HotelError, ReservationError};
pub use model::{Booking, BookingId, Room, RoomCategory, RoomId};
pub use payment::{PaymentConfig, PaymentGateway, PaymentOutcome, SimulatedPayment};
pub use shell::Shell;
pub use store::{Store, StoreError};
