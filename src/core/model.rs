//! Predictive rate-of-change models.
//!
//! A model answers one question: at a given minute of the day and weekday,
//! how fast is a resource's fullness changing, in units per minute?
//! Negative rates mean consumption, positive rates mean restocking. Models
//! are loaded once at startup, one per resource, and never mutated.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, Local, Timelike};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const MINUTES_PER_DAY: u32 = 1440;
pub const DAYS_PER_WEEK: u32 = 7;

/// Opaque per-resource predictive model.
pub trait RateModel: Send + Sync {
    /// Predicted rate of change in fullness units per minute at the given
    /// minute of day (0-1439) and weekday (Sunday=0 .. Saturday=6).
    fn rate(&self, minute_of_day: u32, weekday: u32) -> f64;
}

/// A point in the weekly cycle the models are indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekClock {
    pub minute_of_day: u32,
    /// Sunday=0 .. Saturday=6
    pub weekday: u32,
}

impl WeekClock {
    pub fn new(minute_of_day: u32, weekday: u32) -> Self {
        Self {
            minute_of_day: minute_of_day % MINUTES_PER_DAY,
            weekday: weekday % DAYS_PER_WEEK,
        }
    }

    /// The current wall-clock position in the weekly cycle.
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub fn from_datetime(dt: &DateTime<Local>) -> Self {
        Self {
            minute_of_day: dt.hour() * 60 + dt.minute(),
            weekday: dt.weekday().num_days_from_sunday(),
        }
    }

    /// Advance by one minute, wrapping the day and stepping the weekday at
    /// midnight.
    pub fn tick(&mut self) {
        self.minute_of_day = (self.minute_of_day + 1) % MINUTES_PER_DAY;
        if self.minute_of_day == 0 {
            self.weekday = (self.weekday + 1) % DAYS_PER_WEEK;
        }
    }
}

/// Hourly rate table covering the full week.
///
/// The store is a JSON object with a `rates` array of 7 rows (Sunday
/// first), 24 hourly values each. Queries resolve to the hour containing
/// the requested minute.
#[derive(Debug, Clone)]
pub struct TableRateModel {
    rates: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct TableRateModelFile {
    rates: Vec<Vec<f64>>,
}

impl TableRateModel {
    pub fn new(rates: Vec<Vec<f64>>) -> Result<Self> {
        if rates.len() != DAYS_PER_WEEK as usize {
            bail!("rate table must have {} rows, got {}", DAYS_PER_WEEK, rates.len());
        }
        for (day, row) in rates.iter().enumerate() {
            if row.len() != 24 {
                bail!("rate table row {} must have 24 values, got {}", day, row.len());
            }
        }
        Ok(Self { rates })
    }

    /// A model that always answers the same rate. Used by tests and by
    /// `init-config` sample models.
    pub fn constant(rate: f64) -> Self {
        Self {
            rates: vec![vec![rate; 24]; DAYS_PER_WEEK as usize],
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model file: {:?}", path))?;
        let file: TableRateModelFile = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse model file: {:?}", path))?;
        Self::new(file.rates).with_context(|| format!("Invalid model file: {:?}", path))
    }
}

impl RateModel for TableRateModel {
    fn rate(&self, minute_of_day: u32, weekday: u32) -> f64 {
        let day = (weekday % DAYS_PER_WEEK) as usize;
        let hour = ((minute_of_day % MINUTES_PER_DAY) / 60) as usize;
        self.rates[day][hour]
    }
}
