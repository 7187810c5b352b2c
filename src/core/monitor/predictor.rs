//! Depletion prediction by forward simulation of the rate model.

use crate::core::model::{RateModel, WeekClock};

/// Query the model at a point in the weekly cycle.
pub fn predict_rate(model: &dyn RateModel, clock: WeekClock) -> f64 {
    model.rate(clock.minute_of_day, clock.weekday)
}

/// Simulate forward from `start` in one-minute steps until the level
/// reaches zero, returning the elapsed minutes.
///
/// Only negative rates (consumption) deplete the level; positive rates
/// (restocking) are ignored for this estimate. The simulation gives up
/// after `horizon_days` simulated days and returns `None`: a model that
/// never predicts consumption would otherwise never terminate.
pub fn predict_depletion(
    level: f64,
    model: &dyn RateModel,
    start: WeekClock,
    horizon_days: u32,
) -> Option<u64> {
    if level <= 0.0 {
        return Some(0);
    }

    let horizon_minutes = u64::from(horizon_days) * 1440;
    let mut clock = start;
    let mut level = level;
    let mut elapsed: u64 = 0;

    while elapsed < horizon_minutes {
        let rate = model.rate(clock.minute_of_day, clock.weekday);
        if rate < 0.0 {
            level += rate;
        }
        elapsed += 1;
        clock.tick();
        if level <= 0.0 {
            return Some(elapsed);
        }
    }

    None
}

/// Render elapsed minutes as "N days, N hours, N minutes".
pub fn format_minutes(total_minutes: u64) -> String {
    let days = total_minutes / (24 * 60);
    let remaining = total_minutes % (24 * 60);
    let hours = remaining / 60;
    let minutes = remaining % 60;
    format!("{} days, {} hours, {} minutes", days, hours, minutes)
}
