//! PNR and seat-number allocation.
//!
//! Both draws take an explicit random source so callers can seed a
//! deterministic generator in tests.

use rand::Rng;
use std::collections::HashSet;

pub const PNR_LEN: usize = 8;
const PNR_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const SEAT_MIN: i32 = 1;
pub const SEAT_MAX: i32 = 100;

/// Draw one PNR candidate: 8 uppercase alphanumeric characters.
/// Uniqueness against existing bookings is the caller's job.
pub fn draw_pnr<R: Rng>(rng: &mut R) -> String {
    (0..PNR_LEN)
        .map(|_| PNR_CHARSET[rng.gen_range(0..PNR_CHARSET.len())] as char)
        .collect()
}

/// Allocate `count` distinct seat numbers in 1..=100 by rejection sampling.
/// Seat numbers are unique within one booking only; the train keeps no
/// per-seat occupancy map. Terminates because `count` is capped well below
/// the seat space.
pub fn allocate_seats<R: Rng>(rng: &mut R, count: usize) -> Vec<i32> {
    debug_assert!(count <= (SEAT_MAX - SEAT_MIN + 1) as usize);
    let mut taken = HashSet::with_capacity(count);
    let mut seats = Vec::with_capacity(count);
    while seats.len() < count {
        let seat = rng.gen_range(SEAT_MIN..=SEAT_MAX);
        if taken.insert(seat) {
            seats.push(seat);
        }
    }
    seats
}
