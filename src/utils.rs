/// Calendar and URL helpers
use crate::errors::AvailabilityError;
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, TimeZone, Utc};

const CALENDAR_FORMAT: &str = "%Y-%m-%d";

/// Every 37 sols and every 1493 sols add one extra day of drift.
const SOL_DRIFT_SHORT: u32 = 37;
const SOL_DRIFT_LONG: u32 = 1493;

/// Format a date as zero padded `YYYY-MM-DD`
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(CALENDAR_FORMAT).to_string()
}

/// Parse a bare `YYYY-MM-DD` calendar date
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, AvailabilityError> {
    NaiveDate::parse_from_str(s.trim(), CALENDAR_FORMAT).map_err(|source| {
        AvailabilityError::MalformedDate {
            value: s.to_string(),
            source,
        }
    })
}

/// Earth calendar date of a sol, counted from the date of the first manifest entry
pub fn sol_to_earth_date(min_date: NaiveDate, sol: u32) -> Result<NaiveDate, AvailabilityError> {
    let offset = u64::from(sol) + u64::from(sol / SOL_DRIFT_SHORT) + u64::from(sol / SOL_DRIFT_LONG);
    min_date
        .checked_add_days(Days::new(offset))
        .ok_or(AvailabilityError::DateOutOfRange { sol })
}

/// Parse an EPIC capture timestamp (`YYYY-MM-DD HH:MM:SS` or RFC 3339)
pub fn parse_epic_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = s.parse::<DateTime<Utc>>() {
        return Some(dt);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

/// Archive URL of an EPIC natural-color image
pub fn epic_image_url(base_url: &str, image: &str, date: NaiveDate, api_key: &str) -> String {
    let mut url = format!(
        "{}/EPIC/archive/natural/{}/png/{}.png",
        base_url.trim_end_matches('/'),
        date.format("%Y/%m/%d"),
        image
    );
    if !api_key.is_empty() {
        url.push_str("?api_key=");
        url.push_str(api_key);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_calendar_date_zero_padded() {
        assert_eq!(format_calendar_date(ymd(2004, 1, 5)), "2004-01-05");
        assert_eq!(format_calendar_date(ymd(2012, 11, 26)), "2012-11-26");
    }

    #[test]
    fn test_parse_calendar_date() {
        assert_eq!(parse_calendar_date("2020-02-29").unwrap(), ymd(2020, 2, 29));
        assert_eq!(parse_calendar_date(" 2020-01-03 ").unwrap(), ymd(2020, 1, 3));
    }

    #[test]
    fn test_parse_calendar_date_malformed() {
        let err = parse_calendar_date("2019-02-29").unwrap_err();
        assert!(matches!(err, AvailabilityError::MalformedDate { ref value, .. } if value == "2019-02-29"));
        assert!(parse_calendar_date("not a date").is_err());
    }

    #[test]
    fn test_sol_to_earth_date_without_drift() {
        let min = ymd(2020, 1, 1);
        assert_eq!(sol_to_earth_date(min, 0).unwrap(), min);
        assert_eq!(sol_to_earth_date(min, 36).unwrap(), ymd(2020, 2, 6));
    }

    #[test]
    fn test_sol_to_earth_date_with_drift() {
        let min = ymd(2020, 1, 1);
        // 37 + 1 extra day
        assert_eq!(sol_to_earth_date(min, 37).unwrap(), ymd(2020, 2, 8));
        // 1493 + 40 + 1
        let expected = min + Days::new(1534);
        assert_eq!(sol_to_earth_date(min, 1493).unwrap(), expected);
    }

    #[test]
    fn test_sol_to_earth_date_is_strictly_increasing() {
        let min = ymd(2004, 1, 4);
        let mut prev = sol_to_earth_date(min, 0).unwrap();
        for sol in 1..4000 {
            let next = sol_to_earth_date(min, sol).unwrap();
            assert!(next > prev, "sol {} did not advance", sol);
            prev = next;
        }
    }

    #[test]
    fn test_sol_to_earth_date_out_of_range() {
        let err = sol_to_earth_date(NaiveDate::MAX, 1).unwrap_err();
        assert!(matches!(err, AvailabilityError::DateOutOfRange { sol: 1 }));
    }

    #[test]
    fn test_parse_epic_timestamp() {
        let dt = parse_epic_timestamp("2015-10-31 00:31:45").unwrap();
        assert_eq!(dt.date_naive(), ymd(2015, 10, 31));
        assert!(parse_epic_timestamp("2015-10-31T00:31:45Z").is_some());
        assert!(parse_epic_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_epic_image_url() {
        let url = epic_image_url(
            "https://api.nasa.gov/",
            "epic_1b_20151031003633",
            ymd(2015, 10, 31),
            "DEMO_KEY",
        );
        assert_eq!(
            url,
            "https://api.nasa.gov/EPIC/archive/natural/2015/10/31/png/epic_1b_20151031003633.png?api_key=DEMO_KEY"
        );
        let bare = epic_image_url("https://epic.gsfc.nasa.gov", "img", ymd(2016, 1, 2), "");
        assert_eq!(bare, "https://epic.gsfc.nasa.gov/EPIC/archive/natural/2016/01/02/png/img.png");
    }
}
