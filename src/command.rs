// Command dispatch: already-parsed commands in, outcomes out.
// Keeps the hotel, its store and the payment gateway together so the shell
// never touches them directly.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    hotel::{Hotel, ReservationError},
    model::{Booking, BookingId, Room, RoomCategory, RoomId},
    payment::PaymentGateway,
    store::Store,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ListRooms,
    Search {
        category: Option<RoomCategory>,
        from: NaiveDate,
        to: NaiveDate,
    },
    Reserve {
        guest_name: String,
        from: NaiveDate,
        to: NaiveDate,
        room_id: RoomId,
    },
    Cancel(BookingId),
    ViewBooking(BookingId),
    ListBookings,
    SaveAndExit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rooms(Vec<Room>),
    Available(Vec<Room>),
    Reserved(Booking),
    ReservationFailed(ReservationError),
    Cancelled { id: BookingId, removed: bool },
    BookingDetails(Option<Booking>),
    Bookings(Vec<Booking>),
    Exited { saved: bool },
}

pub struct Dispatcher {
    hotel: Hotel,
    store: Store,
    payment: Box<dyn PaymentGateway>,
}

impl Dispatcher {
    pub fn new(hotel: Hotel, store: Store, payment: Box<dyn PaymentGateway>) -> Self {
        Self {
            hotel,
            store,
            payment,
        }
    }

    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub async fn execute(&mut self, command: Command) -> Outcome {
        debug!(?command, "dispatching command");

        match command {
            Command::ListRooms => Outcome::Rooms(self.hotel.rooms().to_vec()),
            Command::Search { category, from, to } => Outcome::Available(
                self.hotel
                    .search_available(category, from, to)
                    .into_iter()
                    .copied()
                    .collect(),
            ),
            Command::Reserve {
                guest_name,
                from,
                to,
                room_id,
            } => {
                let result = self
                    .hotel
                    .make_reservation(room_id, &guest_name, from, to, self.payment.as_ref())
                    .await;

                match result {
                    Ok(booking) => {
                        info!(booking_id = %booking.id, room_id, "reservation confirmed");
                        Outcome::Reserved(booking)
                    }
                    Err(reason) => {
                        info!(room_id, %reason, "reservation rejected");
                        Outcome::ReservationFailed(reason)
                    }
                }
            }
            Command::Cancel(id) => {
                let removed = self.hotel.cancel_booking(&id);
                if removed {
                    info!(booking_id = %id, "booking cancelled");
                }
                Outcome::Cancelled { id, removed }
            }
            Command::ViewBooking(id) => Outcome::BookingDetails(self.hotel.find_booking(&id).cloned()),
            Command::ListBookings => Outcome::Bookings(self.hotel.bookings().to_vec()),
            Command::SaveAndExit => Outcome::Exited {
                saved: self.store.save(&self.hotel),
            },
        }
    }

    pub fn into_hotel(self) -> Hotel {
        self.hotel
    }
}
