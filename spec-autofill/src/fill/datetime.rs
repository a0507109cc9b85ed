//! Document date range validation.
//!
//! The first pass: checks the region timezone is a real IANA zone and
//! derives `start_ts`/`end_ts` from the document's date range, interpreted
//! as local wall-clock times in that zone.

use chrono_tz::Tz;
use tracing::debug;

use crate::domain::{SpecDocument, time};

use super::AutofillError;

pub fn fill_datetime(mut doc: SpecDocument) -> Result<SpecDocument, AutofillError> {
    let tz: Tz = doc
        .region
        .timezone
        .parse()
        .map_err(|_| AutofillError::InvalidTimezone {
            timezone: doc.region.timezone.clone(),
        })?;

    doc.start_ts = Some(time::timestamp_in(&doc.start_fmt_date, tz)?);
    doc.end_ts = Some(time::timestamp_in(&doc.end_fmt_date, tz)?);
    debug!(
        "date range {} .. {} resolved to {:?} .. {:?} in {}",
        doc.start_fmt_date, doc.end_fmt_date, doc.start_ts, doc.end_ts, tz
    );

    Ok(doc)
}
