//! Range table presentation
//!
//! Turns an effective classification table into display-ready rows, one per
//! band in ascending order. The open-ended bands are rendered as a single
//! bound: band 0 as its upper bound, band 7 as its lower bound. Integral
//! bounds print without a decimal point ("25", not "25.0").

use crate::types::{Band, ClassificationTable, RangeEntry, RangeTable};

/// Build the display range table for an effective classification table.
pub fn range_table(table: &ClassificationTable) -> RangeTable {
    let entries = table
        .bands()
        .map(|(band, range)| {
            let range = match band {
                Band::VerySeverelyUnderweight => fmt_bound(range.high),
                Band::ObeseClassIII => fmt_bound(range.low),
                _ => format!("{}-{}", fmt_bound(range.low), fmt_bound(range.high)),
            };
            RangeEntry {
                label: band.label(),
                range,
            }
        })
        .collect();
    RangeTable::new(entries)
}

fn fmt_bound(value: f64) -> String {
    // `{}` on f64 already drops the trailing ".0" for integral values.
    format!("{}", value)
}
