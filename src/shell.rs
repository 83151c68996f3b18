// Interactive menu on top of the dispatcher. Reads one line at a time, turns
// menu choices and prompts into commands and prints the outcomes.

use std::io::{self, Write};

use chrono::NaiveDate;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::{
    command::{Command, Dispatcher, Outcome},
    model::{parse_date, BookingId, RoomCategory, RoomId},
};

const MENU: &str = "
--- Hotel Reservation System ---
1) List rooms
2) Search available rooms
3) Make reservation
4) Cancel reservation
5) View booking details
6) List bookings
7) Save & Exit";

// What a menu choice turned into
enum Step {
    Run(Command),
    Skip,
}

pub struct Shell<R, W> {
    input: Lines<R>,
    output: W,
    dispatcher: Dispatcher,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, output: W, dispatcher: Dispatcher) -> Self {
        Self {
            input: input.lines(),
            output,
            dispatcher,
        }
    }

    /// Runs until "Save & Exit" is chosen or input ends; both save the hotel.
    /// Hands the dispatcher back so callers can inspect the final state.
    pub async fn run(mut self) -> io::Result<Dispatcher> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Choose: ").await? else {
                let outcome = self.dispatcher.execute(Command::SaveAndExit).await;
                self.render(&outcome)?;
                break;
            };

            let command = match self.read_command(&choice).await? {
                Step::Run(command) => command,
                Step::Skip => continue,
            };

            if matches!(command, Command::Reserve { .. }) {
                writeln!(self.output, "Processing payment...")?;
                self.output.flush()?;
            }

            let outcome = self.dispatcher.execute(command).await;
            self.render(&outcome)?;

            if matches!(outcome, Outcome::Exited { .. }) {
                break;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(self.dispatcher)
    }

    async fn read_command(&mut self, choice: &str) -> io::Result<Step> {
        // end of input in the middle of a prompt means the same as option 7
        let exit = Step::Run(Command::SaveAndExit);

        let command = match choice {
            "1" => Command::ListRooms,
            "2" => {
                let Some(category) = self.read_category().await? else {
                    return Ok(exit);
                };
                let Some((from, to)) = self.read_date_range().await? else {
                    return Ok(exit);
                };
                Command::Search { category, from, to }
            }
            "3" => {
                let Some(guest_name) = self.prompt("Guest name: ").await? else {
                    return Ok(exit);
                };
                let Some((from, to)) = self.read_date_range().await? else {
                    return Ok(exit);
                };
                let Some(raw) = self.prompt("Enter room id to book: ").await? else {
                    return Ok(exit);
                };
                let Ok(room_id) = raw.parse::<RoomId>() else {
                    writeln!(self.output, "Invalid room id '{raw}'.")?;
                    return Ok(Step::Skip);
                };
                Command::Reserve {
                    guest_name,
                    from,
                    to,
                    room_id,
                }
            }
            "4" => match self.read_booking_id("Booking id to cancel: ").await? {
                Some(Some(id)) => Command::Cancel(id),
                Some(None) => return Ok(Step::Skip),
                None => return Ok(exit),
            },
            "5" => match self.read_booking_id("Booking id: ").await? {
                Some(Some(id)) => Command::ViewBooking(id),
                Some(None) => return Ok(Step::Skip),
                None => return Ok(exit),
            },
            "6" => Command::ListBookings,
            "7" => Command::SaveAndExit,
            _ => {
                writeln!(self.output, "Invalid option.")?;
                return Ok(Step::Skip);
            }
        };

        Ok(Step::Run(command))
    }

    fn render(&mut self, outcome: &Outcome) -> io::Result<()> {
        let out = &mut self.output;

        match outcome {
            Outcome::Rooms(rooms) => {
                writeln!(out, "Rooms:")?;
                for room in rooms {
                    writeln!(out, "  {room}")?;
                }
            }
            Outcome::Available(rooms) if rooms.is_empty() => {
                writeln!(out, "No rooms available for that range.")?;
            }
            Outcome::Available(rooms) => {
                writeln!(out, "Available rooms:")?;
                for room in rooms {
                    writeln!(out, "  {room}")?;
                }
            }
            Outcome::Reserved(booking) => writeln!(out, "Booking successful: {booking}")?,
            // the reason is logged by the dispatcher; guests get one message
            Outcome::ReservationFailed(_) => writeln!(
                out,
                "Booking failed (room may be unavailable or payment failed)."
            )?,
            Outcome::Cancelled { removed: true, .. } => writeln!(out, "Booking cancelled.")?,
            Outcome::Cancelled { removed: false, .. } | Outcome::BookingDetails(None) => {
                writeln!(out, "No such booking.")?
            }
            Outcome::BookingDetails(Some(booking)) => writeln!(out, "{booking}")?,
            Outcome::Bookings(bookings) => {
                writeln!(out, "Bookings:")?;
                for booking in bookings {
                    writeln!(out, "  {booking}")?;
                }
            }
            Outcome::Exited { saved: true } => writeln!(
                out,
                "Saved hotel state to {}",
                self.dispatcher.store().path().display()
            )?,
            Outcome::Exited { saved: false } => {
                writeln!(out, "Failed to save hotel state, see the log for details.")?
            }
        }

        Ok(())
    }

    // Prints `text` and reads one trimmed line; `None` once input is exhausted
    async fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let line = self.input.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    // Anything that is not a known category means "no filter"
    async fn read_category(&mut self) -> io::Result<Option<Option<RoomCategory>>> {
        let answer = self
            .prompt("Filter by room type? (standard/deluxe/suite/none): ")
            .await?;
        Ok(answer.map(|a| a.parse::<RoomCategory>().ok()))
    }

    // Re-prompts until both dates parse and `from` is before `to`
    async fn read_date_range(&mut self) -> io::Result<Option<(NaiveDate, NaiveDate)>> {
        loop {
            let Some(from) = self.prompt("From (yyyy-MM-dd): ").await? else {
                return Ok(None);
            };
            let Some(to) = self.prompt("To (yyyy-MM-dd) (exclusive): ").await? else {
                return Ok(None);
            };

            match (parse_date(&from), parse_date(&to)) {
                (Ok(from), Ok(to)) if from < to => return Ok(Some((from, to))),
                (Ok(_), Ok(_)) => writeln!(self.output, "'From' must be before 'To'. Try again.")?,
                _ => writeln!(self.output, "Invalid date format, please use yyyy-MM-dd.")?,
            }
        }
    }

    // Outer `None` is end of input, inner `None` an id that cannot exist
    async fn read_booking_id(&mut self, text: &str) -> io::Result<Option<Option<BookingId>>> {
        let Some(raw) = self.prompt(text).await? else {
            return Ok(None);
        };

        match raw.parse::<BookingId>() {
            Ok(id) => Ok(Some(Some(id))),
            Err(_) => {
                writeln!(self.output, "No such booking.")?;
                Ok(Some(None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::mock::FixedPayment;
    use crate::store::{seeded_hotel, Store};
    use tempfile::{tempdir, TempDir};

    fn dispatcher(dir: &TempDir) -> Dispatcher {
        Dispatcher::new(
            seeded_hotel(),
            Store::new(dir.path().join("hotel.json")),
            Box::new(FixedPayment::approve_all()),
        )
    }

    async fn session(dir: &TempDir, script: &str) -> (String, Dispatcher) {
        let mut output = Vec::new();
        let dispatcher = Shell::new(script.as_bytes(), &mut output, dispatcher(dir))
            .run()
            .await
            .unwrap();
        (String::from_utf8(output).unwrap(), dispatcher)
    }

    #[tokio::test]
    async fn test_list_rooms_and_exit() {
        let dir = tempdir().unwrap();
        let (out, _) = session(&dir, "1\n7\n").await;

        assert!(out.contains("--- Hotel Reservation System ---"));
        assert!(out.contains("Rooms:\n  Room 101 [Standard] 2000.00/night"));
        assert!(out.contains("  Room 301 [Suite] 6000.00/night"));
        assert!(out.contains("Saved hotel state to"));
        assert!(out.ends_with("Goodbye!\n"));
        assert!(dir.path().join("hotel.json").exists());
    }

    #[tokio::test]
    async fn test_reservation_flow() {
        let dir = tempdir().unwrap();
        let script = "3\nAlice\n2024-01-01\n2024-01-03\n101\n6\n7\n";
        let (out, dispatcher) = session(&dir, script).await;

        assert!(out.contains("Processing payment..."));
        assert!(out.contains("Booking successful: Booking"));
        assert!(out.contains("guest='Alice' from=2024-01-01 to=2024-01-03 paid=4000.00"));

        let bookings = dispatcher.hotel().bookings();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].room_id, 101);
    }

    #[tokio::test]
    async fn test_date_range_is_reprompted() {
        let dir = tempdir().unwrap();
        let script = "2\ndeluxe\n2024-13-01\n2024-01-02\n2024-01-05\n2024-01-05\n2024-01-05\n2024-01-06\n7\n";
        let (out, _) = session(&dir, script).await;

        assert!(out.contains("Invalid date format, please use yyyy-MM-dd."));
        assert!(out.contains("'From' must be before 'To'. Try again."));
        assert!(out.contains("Available rooms:\n  Room 201 [Deluxe] 3500.00/night\n  Room 202 [Deluxe] 3500.00/night\n"));
        assert!(!out.contains("Room 101"));
    }

    #[tokio::test]
    async fn test_unknown_filter_means_all_rooms() {
        let dir = tempdir().unwrap();
        let (out, _) = session(&dir, "2\nanything\n2024-01-01\n2024-01-02\n7\n").await;

        for id in [101, 102, 201, 202, 301] {
            assert!(out.contains(&format!("Room {id} ")), "room {id} missing");
        }
    }

    #[tokio::test]
    async fn test_bad_input_never_ends_the_session() {
        let dir = tempdir().unwrap();
        let script = "9\n3\nBob\n2024-01-01\n2024-01-02\nroom-one\n4\nnot-an-id\n5\n00000000-0000-0000-0000-000000000000\n7\n";
        let (out, dispatcher) = session(&dir, script).await;

        assert!(out.contains("Invalid option."));
        assert!(out.contains("Invalid room id 'room-one'."));
        assert_eq!(out.matches("No such booking.").count(), 2);
        assert!(out.ends_with("Goodbye!\n"));
        assert!(dispatcher.hotel().bookings().is_empty());
    }

    #[tokio::test]
    async fn test_conflicting_reservation_reports_failure() {
        let dir = tempdir().unwrap();
        let script = "3\nAlice\n2024-01-01\n2024-01-03\n101\n3\nBob\n2024-01-02\n2024-01-04\n101\n7\n";
        let (out, dispatcher) = session(&dir, script).await;

        assert!(out.contains("Booking failed (room may be unavailable or payment failed)."));
        assert_eq!(dispatcher.hotel().bookings().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_and_view_by_id() {
        let dir = tempdir().unwrap();
        let (_, dispatcher) = session(&dir, "3\nAlice\n2024-01-01\n2024-01-03\n101\n7\n").await;
        let id = dispatcher.hotel().bookings()[0].id;

        // reload from the saved snapshot and drive a second session
        let hotel = Store::new(dir.path().join("hotel.json")).try_load().unwrap();
        let restored = Dispatcher::new(
            hotel,
            Store::new(dir.path().join("hotel.json")),
            Box::new(FixedPayment::approve_all()),
        );
        let script = format!("5\n{id}\n4\n{id}\n5\n{id}\n7\n");
        let mut output = Vec::new();
        let dispatcher = Shell::new(script.as_bytes(), &mut output, restored)
            .run()
            .await
            .unwrap();
        let out = String::from_utf8(output).unwrap();

        assert!(out.contains(&format!("Booking {id} room=101 guest='Alice'")));
        assert!(out.contains("Booking cancelled."));
        assert!(out.contains("No such booking."));
        assert!(dispatcher.hotel().bookings().is_empty());
    }

    #[tokio::test]
    async fn test_end_of_input_saves() {
        let dir = tempdir().unwrap();
        let (out, _) = session(&dir, "3\nAlice\n2024-01-01\n").await;

        assert!(out.contains("Saved hotel state to"));
        assert!(out.ends_with("Goodbye!\n"));
        assert!(dir.path().join("hotel.json").exists());
    }
}
