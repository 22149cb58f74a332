use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One stored weather observation, as written by the station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reading {
    pub id: i32,
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub rain: f64,
    /// mm/s
    pub rain_rate: f64,
    pub luminance: f64,
    /// m/s
    pub wind_speed: f64,
    /// degrees
    pub wind_direction: f64,
    pub day: i32,
    pub week: i32,
    pub month: i32,
    pub year: i32,
}

/// A reading converted and formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub id: i32,
    pub timestamp: String,
    pub temperature: String,
    pub pressure: String,
    pub humidity: String,
    pub rain: String,
    /// mm/hr
    pub rain_rate: String,
    pub luminance: String,
    /// mph
    pub wind_speed: String,
    pub wind_direction: String,
    pub day: i32,
    pub week: i32,
    pub month: i32,
    pub year: i32,
}

/// Resolved position of a page within the readings table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Current page, 1-based. Zero only when the table is empty.
    pub page: i64,
    pub pages: i64,
    pub total: i64,
    pub page_size: i64,
    pub offset: i64,
    /// 1-based index of the first row shown, zero when nothing is shown.
    pub first_index: i64,
    pub last_index: i64,
}

/// One page of readings ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ReadingsPage {
    pub pagination: Pagination,
    pub rows: Vec<DisplayRow>,
}
