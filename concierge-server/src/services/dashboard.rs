//! Dashboard figures
//!
//! Metrics count the reservations created on the selected days. The
//! calendar counts reservations by the day they are booked for. Slot
//! availability splits a restaurant's service periods into fixed slots
//! and closes a slot once it holds its quota of reservations.

use async_graphql::SimpleObject;
use chrono::{Datelike, Days, NaiveDate};
use shared::{AppError, AppResult, BusinessType, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Booking, BusinessSettings, Reservation, ReservationStatus};
use crate::db::repository::{BusinessRepository, ReservationRepository};

use super::availability::parse_minutes;

/// Statuses that take up a restaurant slot
const SLOT_STATUSES: [ReservationStatus; 2] =
    [ReservationStatus::Pending, ReservationStatus::Confirmed];

#[derive(Debug, Clone, Default, PartialEq, SimpleObject)]
pub struct DashboardMetrics {
    pub total_reservations: i32,
    /// Sum of `total_amount` over confirmed reservations
    pub revenue: f64,
    pub confirmed_guests: i32,
    /// Confirmed guests over the seats offered in the period, two decimals
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct TimeSlot {
    /// HH:mm
    pub time: String,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub count: i32,
}

/// People covered by one booking
fn guests(reservation: &Reservation) -> i32 {
    match &reservation.booking {
        Booking::Room(stay) => match (stay.adults, stay.children) {
            (None, None) => stay.guests,
            (adults, children) => adults.unwrap_or(0) + children.unwrap_or(0),
        },
        Booking::Table(table) => table.party_size,
        Booking::Service(_) => 1,
    }
}

pub fn metrics(reservations: &[Reservation]) -> DashboardMetrics {
    let confirmed = reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Confirmed);

    let (revenue, confirmed_guests) = confirmed.fold((0.0, 0), |(revenue, people), r| {
        (revenue + r.total_amount.unwrap_or_default(), people + guests(r))
    });

    DashboardMetrics {
        total_reservations: reservations.len() as i32,
        revenue,
        confirmed_guests,
        occupancy_rate: 0.0,
    }
}

/// Slot start times in minutes since midnight, period by period
pub fn slot_starts(settings: &BusinessSettings) -> Vec<i32> {
    let interval = settings.slot_interval();
    settings
        .service_periods()
        .iter()
        .filter_map(|period| Some((parse_minutes(&period.opening)?, parse_minutes(&period.closing)?)))
        .flat_map(|(opening, closing)| (opening..closing).step_by(interval as usize))
        .collect()
}

/// Seats one slot can take: the smaller of the room size and the slot quota,
/// when either is configured
fn seats_per_slot(settings: &BusinessSettings) -> Option<i32> {
    [settings.total_capacity, settings.max_reservations_per_slot]
        .into_iter()
        .flatten()
        .filter(|seats| *seats > 0)
        .min()
}

/// Confirmed guests over the seats offered across `days` days
pub fn occupancy_rate(confirmed_guests: i32, days: i64, settings: &BusinessSettings) -> f64 {
    let Some(seats) = seats_per_slot(settings) else {
        return 0.0;
    };
    let offered = days as f64 * slot_starts(settings).len() as f64 * f64::from(seats);
    if offered <= 0.0 {
        return 0.0;
    }
    (f64::from(confirmed_guests) / offered * 100.0).round() / 100.0
}

pub fn format_minutes(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Open slots for a party; a slot closes once it holds `slot_capacity`
/// reservations, and a party larger than the dining room fits nowhere
pub fn slot_availability(
    settings: &BusinessSettings,
    reservations: &[Reservation],
    party_size: i32,
) -> Vec<TimeSlot> {
    let fits = settings
        .total_capacity
        .is_none_or(|seats| party_size <= seats);
    let capacity = settings.slot_capacity() as usize;

    slot_starts(settings)
        .into_iter()
        .map(|start| {
            let booked = reservations
                .iter()
                .filter(|r| r.time.as_deref().and_then(parse_minutes) == Some(start))
                .count();
            TimeSlot {
                time: format_minutes(start),
                available: fits && booked < capacity,
            }
        })
        .collect()
}

/// First day of a `YYYY-MM` month and of the month after
pub fn month_bounds(month: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (year, month) = month.trim().split_once('-')?;
    let start = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?;
    let end = start.checked_add_months(chrono::Months::new(1))?;
    Some((start, end))
}

/// One entry per day in `[start, end)`, zero when nothing is booked
pub fn calendar(reservations: &[Reservation], start: NaiveDate, end: NaiveDate) -> Vec<CalendarDay> {
    start
        .iter_days()
        .take_while(|day| *day < end)
        .map(|day| CalendarDay {
            date: day,
            count: reservations.iter().filter(|r| r.date == day).count() as i32,
        })
        .collect()
}

fn day_start_millis(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

#[derive(Clone)]
pub struct DashboardService {
    reservations: ReservationRepository,
    businesses: BusinessRepository,
}

impl DashboardService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            reservations: ReservationRepository::new(db.clone()),
            businesses: BusinessRepository::new(db),
        }
    }

    async fn settings(&self, business_id: &str) -> AppResult<BusinessSettings> {
        Ok(self
            .businesses
            .find_by_id(business_id)
            .await?
            .map(|business| business.settings)
            .unwrap_or_default())
    }

    /// Reservations created between `from` and `to` inclusive (default today)
    pub async fn metrics(
        &self,
        business_id: &str,
        business_type: BusinessType,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<DashboardMetrics> {
        let from = from.unwrap_or_else(shared::util::today);
        let to = to.unwrap_or(from);
        if to < from {
            return Err(AppError::with_message(
                ErrorCode::InvalidDateRange,
                "End date is before start date",
            ));
        }
        let until = to.checked_add_days(Days::new(1)).unwrap_or(to);

        let reservations = self
            .reservations
            .find_created_between(
                business_id,
                business_type,
                day_start_millis(from),
                day_start_millis(until),
            )
            .await?;

        let mut figures = metrics(&reservations);
        let days = (to - from).num_days() + 1;
        figures.occupancy_rate =
            occupancy_rate(figures.confirmed_guests, days, &self.settings(business_id).await?);
        Ok(figures)
    }

    /// Reservations created on `date`, newest first
    pub async fn reservations_by_date(
        &self,
        business_id: &str,
        business_type: BusinessType,
        date: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
        Ok(self
            .reservations
            .find_created_between(
                business_id,
                business_type,
                day_start_millis(date),
                day_start_millis(next),
            )
            .await?)
    }

    pub async fn slot_availability(
        &self,
        business_id: &str,
        business_type: BusinessType,
        date: NaiveDate,
        party_size: i32,
    ) -> AppResult<Vec<TimeSlot>> {
        let settings = self.settings(business_id).await?;
        let reservations = self
            .reservations
            .find_on_date(business_id, business_type, date, &SLOT_STATUSES)
            .await?;
        Ok(slot_availability(&settings, &reservations, party_size))
    }

    pub async fn calendar(
        &self,
        business_id: &str,
        business_type: BusinessType,
        month: &str,
    ) -> AppResult<Vec<CalendarDay>> {
        let (start, end) = month_bounds(month)
            .ok_or_else(|| AppError::validation(format!("Invalid month '{}', expected YYYY-MM", month)))?;
        let reservations = self
            .reservations
            .find_dated_between(business_id, business_type, start, end)
            .await?;
        tracing::debug!(
            business_id = %business_id,
            year = start.year(),
            month = start.month(),
            reservations = reservations.len(),
            "Calendar loaded"
        );
        Ok(calendar(&reservations, start, end))
    }
}
