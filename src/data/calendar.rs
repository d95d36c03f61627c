//! Weekly roll calendar
//!
//! Turns daily closes into Friday-to-Friday roll cycles. Weeks run Saturday
//! through Friday and are labelled by their Friday. A cycle is only formed
//! between two weeks that both traded on their Friday; the volatility for a
//! cycle is the rolling realized volatility of daily log returns up to and
//! including the sell date.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::DailyBar;
use crate::models::annualized_vol;

/// Last close of a Saturday-to-Friday week
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyClose {
    /// The Friday ending the week
    pub week_ending: NaiveDate,
    /// Last close in the week
    pub close: f64,
    /// Whether the Friday itself traded
    pub on_week_ending: bool,
}

/// One sell-Friday to buy-back-Friday cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollCycle {
    pub sell_date: NaiveDate,
    pub buy_date: NaiveDate,
    pub spot_start: f64,
    pub spot_end: f64,
    /// Annualized realized volatility through the sell date
    pub volatility: Option<f64>,
}

/// Friday closing the week that contains `date`
pub fn week_ending_friday(date: NaiveDate) -> NaiveDate {
    let weekday = date.weekday().num_days_from_monday() as i64;
    // Friday is day 4; weekend days roll to the next Friday
    date + Duration::days((4 - weekday).rem_euclid(7))
}

/// Weekly closes from date-ordered daily bars
pub fn weekly_closes(bars: &[DailyBar]) -> Vec<WeeklyClose> {
    let mut weeks: Vec<WeeklyClose> = Vec::new();

    for bar in bars {
        let week_ending = week_ending_friday(bar.date);
        let entry = WeeklyClose {
            week_ending,
            close: bar.close,
            on_week_ending: bar.date == week_ending,
        };
        match weeks.last_mut() {
            Some(last) if last.week_ending == week_ending => *last = entry,
            _ => weeks.push(entry),
        }
    }

    weeks
}

/// Roll cycles between consecutive weeks that both traded on Friday
pub fn build_cycles(bars: &[DailyBar], vol_window: usize) -> Vec<RollCycle> {
    // (date of the later bar, log return)
    let returns: Vec<(NaiveDate, f64)> = bars
        .windows(2)
        .map(|w| (w[1].date, (w[1].close / w[0].close).ln()))
        .collect();
    let values: Vec<f64> = returns.iter().map(|(_, r)| *r).collect();

    let weeks = weekly_closes(bars);
    let mut cycles = Vec::with_capacity(weeks.len().saturating_sub(1));

    for pair in weeks.windows(2) {
        let (sell, buy) = (pair[0], pair[1]);
        if !(sell.on_week_ending && buy.on_week_ending) {
            tracing::debug!(
                sell = %sell.week_ending,
                buy = %buy.week_ending,
                "skipping cycle without Friday closes"
            );
            continue;
        }

        let through_sell = returns.partition_point(|(date, _)| *date <= sell.week_ending);

        cycles.push(RollCycle {
            sell_date: sell.week_ending,
            buy_date: buy.week_ending,
            spot_start: sell.close,
            spot_end: buy.close,
            volatility: annualized_vol(&values[..through_sell], vol_window),
        });
    }

    cycles
}
