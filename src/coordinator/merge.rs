//! Splices a realtime dollar quote onto the historical correlation series.

use chrono::NaiveDate;

use crate::models::{CorrelationPoint, CorrelationSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Today's point already existed; its dollar index was replaced.
    Replaced,
    /// A new point for today was appended, inheriting the last gold price.
    Appended,
    /// Empty series, nothing to merge onto.
    NoSeries,
}

/// Reconciles one realtime dollar-index observation into the series.
///
/// Today's point is still "open", so repeated merges within one calendar
/// day replace its dollar index in place. The gold price is never touched:
/// no new gold close exists until the next historical fetch. The series
/// therefore grows by at most one point per calendar day, however often
/// the quote refreshes.
pub fn merge_realtime(
    series: &mut CorrelationSeries,
    quote_price: f64,
    today: NaiveDate,
) -> MergeOutcome {
    let Some(last) = series.last_mut() else {
        return MergeOutcome::NoSeries;
    };

    if last.date == today {
        last.dollar_index = quote_price;
        MergeOutcome::Replaced
    } else {
        let gold_price = last.gold_price;
        series.push(CorrelationPoint {
            date: today,
            gold_price,
            dollar_index: quote_price,
        });
        MergeOutcome::Appended
    }
}
