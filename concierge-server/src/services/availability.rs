//! Room and table availability
//!
//! A bookable entity is free when no blocking reservation overlaps the
//! requested half-open window. Rooms compare `[check_in, check_out)` date
//! ranges; tables compare `[time, time + duration)` minute windows on one
//! date.

use std::collections::HashSet;

use chrono::NaiveDate;
use shared::BusinessType;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use crate::db::models::{DEFAULT_TABLE_DURATION, Reservation, Room, Table};
use crate::db::repository::{
    BaseRepository, RepoResult, ReservationRepository, RoomRepository, TableRepository,
};

const MINUTES_PER_DAY: i32 = 24 * 60;

const ROOM_TABLE: &str = "room";
const TABLE_TABLE: &str = "dining_table";

/// Half-open ranges `[start, end)` and `[existing_start, existing_end)` overlap
pub fn overlaps<T: PartialOrd>(start: T, end: T, existing_start: T, existing_end: T) -> bool {
    existing_start < end && existing_end > start
}

/// Minutes since midnight of an `HH:mm` string
pub fn parse_minutes(time: &str) -> Option<i32> {
    let (hours, minutes) = time.trim().split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Minute window held by a table booking; without a usable time the whole day
fn table_window(time: Option<&str>, duration: Option<i32>) -> (i32, i32) {
    match time.and_then(parse_minutes) {
        Some(start) => {
            let duration = duration
                .unwrap_or(DEFAULT_TABLE_DURATION)
                .clamp(0, MINUTES_PER_DAY);
            (start, start + duration)
        }
        None => (0, MINUTES_PER_DAY),
    }
}

fn same_record(table: &str, reference: &str, id: Option<&RecordId>) -> bool {
    match (BaseRepository::record_id(table, reference), id) {
        (Ok(Some(reference)), Some(id)) => &reference == id,
        _ => false,
    }
}

#[derive(Clone)]
pub struct AvailabilityService {
    rooms: RoomRepository,
    tables: TableRepository,
    reservations: ReservationRepository,
}

impl AvailabilityService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            rooms: RoomRepository::new(db.clone()),
            tables: TableRepository::new(db.clone()),
            reservations: ReservationRepository::new(db),
        }
    }

    /// Available rooms sleeping `adults + children` with no stay overlapping
    /// `[check_in, check_out)`
    pub async fn available_rooms(
        &self,
        business_id: &str,
        business_type: BusinessType,
        check_in: NaiveDate,
        check_out: NaiveDate,
        adults: i32,
        children: Option<i32>,
    ) -> RepoResult<Vec<Room>> {
        if check_out <= check_in {
            return Ok(Vec::new());
        }
        let capacity = adults.saturating_add(children.unwrap_or(0));

        let rooms = self
            .rooms
            .find_bookable(business_id, business_type, capacity)
            .await?;
        let blocking = self
            .reservations
            .find_blocking_rooms(business_id, business_type)
            .await?;

        let taken: Vec<&str> = blocking
            .iter()
            .filter_map(|r| r.booking.as_room())
            .filter(|stay| overlaps(check_in, check_out, stay.check_in, stay.check_out))
            .map(|stay| stay.room_id.as_str())
            .collect();

        Ok(rooms
            .into_iter()
            .filter(|room| {
                !taken
                    .iter()
                    .any(|room_id| same_record(ROOM_TABLE, room_id, room.id.as_ref()))
            })
            .collect())
    }

    pub async fn available_rooms_count(
        &self,
        business_id: &str,
        business_type: BusinessType,
        check_in: NaiveDate,
        check_out: NaiveDate,
        adults: i32,
        children: Option<i32>,
    ) -> RepoResult<usize> {
        let rooms = self
            .available_rooms(business_id, business_type, check_in, check_out, adults, children)
            .await?;
        Ok(rooms.len())
    }

    /// Available tables seating `party_size` with no sitting on `date`
    /// overlapping the requested window
    pub async fn available_tables(
        &self,
        business_id: &str,
        business_type: BusinessType,
        date: NaiveDate,
        time: Option<&str>,
        duration: Option<i32>,
        party_size: i32,
    ) -> RepoResult<Vec<Table>> {
        let (start, end) = table_window(time, duration);
        if end <= start {
            return Ok(Vec::new());
        }

        let tables = self
            .tables
            .find_bookable(business_id, business_type, party_size)
            .await?;
        let blocking = self
            .reservations
            .find_blocking_tables(business_id, business_type, date)
            .await?;

        let taken = taken_tables(&blocking, start, end);
        Ok(tables
            .into_iter()
            .filter(|table| {
                !taken
                    .iter()
                    .any(|table_id| same_record(TABLE_TABLE, table_id, table.id.as_ref()))
            })
            .collect())
    }
}

/// Table ids whose sitting overlaps `[start, end)`
fn taken_tables(reservations: &[Reservation], start: i32, end: i32) -> HashSet<String> {
    reservations
        .iter()
        .filter_map(|r| {
            let booking = r.booking.as_table()?;
            let (existing_start, existing_end) = table_window(r.time.as_deref(), r.duration);
            overlaps(start, end, existing_start, existing_end).then(|| booking.table_id.clone())
        })
        .collect()
}
