use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hotel_reservation::{payment::mock::FixedPayment, Hotel, Room, RoomCategory};

// Builds a hotel with `rooms` rooms, each booked back to back for a year in 3-night stays
fn busy_hotel(rooms: u32) -> Hotel {
    let mut hotel = Hotel::new();
    let payment = FixedPayment::approve_all();
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    for id in 0..rooms {
        let category = RoomCategory::ALL[id as usize % RoomCategory::ALL.len()];
        hotel.add_room(Room::new(id, category, 100.0)).unwrap();
    }

    for id in 0..rooms {
        for stay in 0..120 {
            let from = start + Duration::days(stay * 3);
            let to = from + Duration::days(3);
            tokio_test::block_on(hotel.make_reservation(id, "Guest", from, to, &payment)).unwrap();
        }
    }

    hotel
}

pub fn availability_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("hotel_availability");
    let from = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();

    for rooms in [5u32, 50, 200].iter() {
        let hotel = busy_hotel(*rooms);

        group.bench_with_input(BenchmarkId::new("search_all", rooms), rooms, |b, _| {
            b.iter(|| black_box(hotel.search_available(None, black_box(from), black_box(to)).len()))
        });

        group.bench_with_input(BenchmarkId::new("search_suite", rooms), rooms, |b, _| {
            b.iter(|| {
                black_box(
                    hotel
                        .search_available(Some(RoomCategory::Suite), black_box(from), black_box(to))
                        .len(),
                )
            })
        });

        group.bench_with_input(BenchmarkId::new("is_available", rooms), rooms, |b, &rooms| {
            b.iter(|| black_box(hotel.is_available(rooms - 1, black_box(from), black_box(to))))
        });
    }

    group.finish();
}

criterion_group!(benches, availability_benchmark);
criterion_main!(benches);
