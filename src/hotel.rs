// Hotel inventory and booking book-keeping

use std::collections::HashSet;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::{
    model::{nights_between, Booking, BookingId, Room, RoomCategory, RoomId},
    payment::PaymentGateway,
};

// Why a reservation did not produce a booking
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReservationError {
    #[error("Room {0} does not exist")]
    RoomNotFound(RoomId),

    #[error("Room {room_id} is already booked between {from} and {to}")]
    Unavailable {
        room_id: RoomId,
        from: NaiveDate,
        to: NaiveDate,
    },

    #[error("Stay from {from} to {to} covers no nights")]
    EmptyStay { from: NaiveDate, to: NaiveDate },

    #[error("Payment of {amount:.2} was declined")]
    PaymentDeclined { amount: f64 },
}

// Inconsistent inventory or booking data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HotelError {
    #[error("Duplicate room id: {0}")]
    DuplicateRoom(RoomId),

    #[error("Invalid nightly price {price} for room {room_id}")]
    InvalidPrice { room_id: RoomId, price: f64 },

    #[error("Duplicate booking id: {0}")]
    DuplicateBooking(BookingId),

    #[error("Booking {booking_id} references unknown room {room_id}")]
    UnknownRoom {
        booking_id: BookingId,
        room_id: RoomId,
    },

    #[error("Booking {booking_id} has an empty or inverted stay")]
    InvalidStay { booking_id: BookingId },

    #[error("Bookings {first} and {second} overlap on room {room_id}")]
    OverlappingBookings {
        room_id: RoomId,
        first: BookingId,
        second: BookingId,
    },
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Hotel {
    rooms: Vec<Room>,
    bookings: Vec<Booking>,
}

impl Hotel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a hotel from previously stored rooms and bookings.
    ///
    /// Every invariant `make_reservation` upholds is checked again here, so a
    /// hand-edited or damaged snapshot is rejected instead of being trusted.
    pub fn from_parts(rooms: Vec<Room>, bookings: Vec<Booking>) -> Result<Self, HotelError> {
        let mut hotel = Hotel::new();
        for room in rooms {
            hotel.add_room(room)?;
        }

        let mut seen = HashSet::new();
        for booking in &bookings {
            if !seen.insert(booking.id) {
                return Err(HotelError::DuplicateBooking(booking.id));
            }
            if hotel.room(booking.room_id).is_none() {
                return Err(HotelError::UnknownRoom {
                    booking_id: booking.id,
                    room_id: booking.room_id,
                });
            }
            if booking.from >= booking.to {
                return Err(HotelError::InvalidStay {
                    booking_id: booking.id,
                });
            }
        }

        for (i, first) in bookings.iter().enumerate() {
            let clash = bookings[i + 1..]
                .iter()
                .find(|other| other.room_id == first.room_id && other.overlaps(first.from, first.to));

            if let Some(second) = clash {
                return Err(HotelError::OverlappingBookings {
                    room_id: first.room_id,
                    first: first.id,
                    second: second.id,
                });
            }
        }

        hotel.bookings = bookings;
        Ok(hotel)
    }

    pub fn add_room(&mut self, room: Room) -> Result<(), HotelError> {
        if !(room.price_per_night.is_finite() && room.price_per_night > 0.0) {
            return Err(HotelError::InvalidPrice {
                room_id: room.id,
                price: room.price_per_night,
            });
        }
        if self.room(room.id).is_some() {
            return Err(HotelError::DuplicateRoom(room.id));
        }

        self.rooms.push(room);
        Ok(())
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    // `from` must be before `to`; callers validate the range
    pub fn is_available(&self, room_id: RoomId, from: NaiveDate, to: NaiveDate) -> bool {
        !self
            .bookings
            .iter()
            .any(|b| b.room_id == room_id && b.overlaps(from, to))
    }

    pub fn search_available(
        &self,
        category: Option<RoomCategory>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<&Room> {
        self.rooms
            .iter()
            .filter(|r| category.map_or(true, |c| r.category == c))
            .filter(|r| self.is_available(r.id, from, to))
            .collect()
    }

    /// Books `room_id` for `[from, to)` once the payment gateway approves the
    /// full stay amount. Nothing is recorded when any step fails.
    pub async fn make_reservation(
        &mut self,
        room_id: RoomId,
        guest_name: &str,
        from: NaiveDate,
        to: NaiveDate,
        payment: &dyn PaymentGateway,
    ) -> Result<Booking, ReservationError> {
        let room = self
            .room(room_id)
            .copied()
            .ok_or(ReservationError::RoomNotFound(room_id))?;

        if !self.is_available(room_id, from, to) {
            return Err(ReservationError::Unavailable { room_id, from, to });
        }

        let nights = nights_between(from, to);
        if nights <= 0 {
            return Err(ReservationError::EmptyStay { from, to });
        }

        let amount = nights as f64 * room.price_per_night;
        if !payment.decide(amount).await.is_approved() {
            return Err(ReservationError::PaymentDeclined { amount });
        }

        let booking = Booking {
            id: BookingId::generate(),
            room_id,
            guest_name: guest_name.to_string(),
            from,
            to,
            amount_paid: amount,
        };
        debug!(booking_id = %booking.id, room_id, nights, "booking recorded");

        self.bookings.push(booking.clone());
        Ok(booking)
    }

    pub fn cancel_booking(&mut self, booking_id: &BookingId) -> bool {
        match self.bookings.iter().position(|b| &b.id == booking_id) {
            Some(index) => {
                self.bookings.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn find_booking(&self, booking_id: &BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|b| &b.id == booking_id)
    }
}
