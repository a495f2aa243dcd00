/// Rover availability: usable date range and dates without imagery
use crate::domain::{Manifest, RoverAvailability};
use crate::errors::AvailabilityError;
use crate::utils::sol_to_earth_date;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Largest gap tolerated between a sol's recorded earth date and its mapped date.
const MAX_SOL_DATE_DRIFT_DAYS: i64 = 30;

/// Compute the selectable date range and disabled dates of a rover manifest.
///
/// The most recent `cutoff_window` entries are treated as not yet usable: the
/// first of them becomes both the upper bound and the default date. Every sol
/// between 0 and the last recorded sol that is absent from the manifest maps to
/// a disabled calendar date.
pub fn compute_availability(manifest: &Manifest) -> Result<RoverAvailability, AvailabilityError> {
    let rover = manifest.name;
    let photos = &manifest.photos;
    let cutoff = rover.cutoff_window();

    if photos.is_empty() {
        return Err(AvailabilityError::invalid_manifest(
            rover.as_str(),
            "manifest contains no photos",
        ));
    }
    if cutoff >= photos.len() {
        return Err(AvailabilityError::invalid_manifest(
            rover.as_str(),
            format!(
                "{} entries do not exceed the cutoff window of {}",
                photos.len(),
                cutoff
            ),
        ));
    }
    if let Some(i) = photos
        .windows(2)
        .position(|w| w[1].sol <= w[0].sol || w[1].earth_date < w[0].earth_date)
    {
        return Err(AvailabilityError::invalid_manifest(
            rover.as_str(),
            format!("entries out of order at position {}", i + 1),
        ));
    }

    let first = &photos[0];
    let last = &photos[photos.len() - 1];
    let boundary = &photos[photos.len() - cutoff];

    let min_date = first.earth_date;

    if let Some(max_sol) = manifest.max_sol.filter(|m| *m != last.sol) {
        return Err(AvailabilityError::invalid_manifest(
            rover.as_str(),
            format!("max_sol {} differs from last recorded sol {}", max_sol, last.sol),
        ));
    }
    let mapped_last = sol_to_earth_date(min_date, last.sol)?;
    if (mapped_last - last.earth_date).num_days().abs() > MAX_SOL_DATE_DRIFT_DAYS {
        return Err(AvailabilityError::invalid_manifest(
            rover.as_str(),
            format!(
                "sol {} maps to {} but was recorded on {}",
                last.sol, mapped_last, last.earth_date
            ),
        ));
    }

    let recorded_sols: HashSet<u32> = photos.iter().map(|p| p.sol).collect();
    let recorded_dates: HashSet<_> = photos.iter().map(|p| p.earth_date).collect();

    let mut disabled_dates = BTreeSet::new();
    for sol in (0..=last.sol).filter(|s| !recorded_sols.contains(s)) {
        let date = sol_to_earth_date(min_date, sol)?;
        if date != min_date && !recorded_dates.contains(&date) {
            disabled_dates.insert(date);
        }
    }

    debug!(
        rover = rover.as_str(),
        entries = photos.len(),
        last_sol = last.sol,
        disabled = disabled_dates.len(),
        "computed rover availability"
    );

    Ok(RoverAvailability {
        min_date,
        max_date: boundary.earth_date,
        disabled_dates,
        completed_date: last.earth_date,
        start_date: boundary.earth_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ManifestSol, RoverName};
    use chrono::{Days, NaiveDate};

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    }

    fn entry(sol: u32) -> ManifestSol {
        ManifestSol {
            sol,
            earth_date: sol_to_earth_date(base(), sol).unwrap(),
            total_photos: 10,
            cameras: vec!["NAVCAM".to_string()],
        }
    }

    fn manifest(name: RoverName, sols: impl IntoIterator<Item = u32>) -> Manifest {
        let photos: Vec<ManifestSol> = sols.into_iter().map(entry).collect();
        Manifest {
            name,
            landing_site: None,
            launch_date: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
            landing_date: base(),
            status: "active".to_string(),
            max_sol: photos.last().map(|p| p.sol),
            max_date: photos.last().map(|p| p.earth_date),
            total_photos: photos.iter().map(|p| p.total_photos).sum(),
            photos,
        }
    }

    #[test]
    fn test_gapless_manifest_has_no_disabled_dates() {
        for rover in RoverName::ALL {
            let m = manifest(rover, 0..40);
            let availability = compute_availability(&m).unwrap();
            assert!(availability.disabled_dates.is_empty(), "{}", rover);
        }
    }

    #[test]
    fn test_date_ordering_invariant() {
        let sols = [0, 1, 2, 5, 8, 9, 13, 21, 34, 35, 36, 40, 41, 50, 55, 60, 61, 62, 70, 80, 81, 99];
        for rover in RoverName::ALL {
            let a = compute_availability(&manifest(rover, sols)).unwrap();
            assert!(a.min_date <= a.start_date);
            assert!(a.start_date <= a.max_date);
            assert!(a.max_date <= a.completed_date);
        }
    }

    #[test]
    fn test_single_missing_sol() {
        for k in [1u32, 17, 36, 37, 38, 74] {
            let m = manifest(RoverName::Opportunity, (0..=80).filter(|s| *s != k));
            let a = compute_availability(&m).unwrap();
            let expected = base() + Days::new(u64::from(k + k / 37 + k / 1493));
            assert_eq!(a.disabled_dates.len(), 1, "missing sol {}", k);
            assert!(a.disabled_dates.contains(&expected), "missing sol {}", k);
        }
    }

    #[test]
    fn test_missing_sol_past_long_drift() {
        let k = 1500;
        let m = manifest(RoverName::Curiosity, (0..=1510).filter(|s| *s != k));
        let a = compute_availability(&m).unwrap();
        let expected = base() + Days::new(u64::from(k + k / 37 + k / 1493));
        assert_eq!(a.disabled_dates.into_iter().collect::<Vec<_>>(), vec![expected]);
    }

    #[test]
    fn test_cutoff_boundary_per_rover() {
        let m = manifest(RoverName::Curiosity, 0..20);
        let dates: Vec<NaiveDate> = m.photos.iter().map(|p| p.earth_date).collect();

        let curiosity = compute_availability(&m).unwrap();
        assert_eq!(curiosity.max_date, dates[19]);
        assert_eq!(curiosity.start_date, dates[19]);

        let spirit = compute_availability(&Manifest {
            name: RoverName::Spirit,
            ..m.clone()
        })
        .unwrap();
        assert_eq!(spirit.max_date, dates[3]);

        let opportunity = compute_availability(&Manifest {
            name: RoverName::Opportunity,
            ..m.clone()
        })
        .unwrap();
        assert_eq!(opportunity.max_date, dates[15]);
        assert_eq!(opportunity.completed_date, dates[19]);
        assert_eq!(opportunity.min_date, dates[0]);
    }

    #[test]
    fn test_idempotent() {
        let m = manifest(RoverName::Spirit, (0..60).filter(|s| s % 7 != 3));
        assert_eq!(compute_availability(&m).unwrap(), compute_availability(&m).unwrap());
    }

    #[test]
    fn test_length_equal_to_cutoff_fails() {
        for rover in RoverName::ALL {
            let m = manifest(rover, 0..rover.cutoff_window() as u32);
            let err = compute_availability(&m).unwrap_err();
            assert!(matches!(err, AvailabilityError::InvalidManifest { .. }), "{}", rover);
        }
    }

    #[test]
    fn test_empty_manifest_fails() {
        let m = manifest(RoverName::Curiosity, std::iter::empty());
        assert!(matches!(
            compute_availability(&m),
            Err(AvailabilityError::InvalidManifest { .. })
        ));
    }

    #[test]
    fn test_two_entry_opportunity_manifest_fails() {
        let mut m = manifest(RoverName::Opportunity, [0, 2]);
        m.photos[0].earth_date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        m.photos[1].earth_date = NaiveDate::from_ymd_opt(2020, 1, 3).unwrap();
        let err = compute_availability(&m).unwrap_err();
        assert!(err.to_string().contains("cutoff window of 5"));
    }

    #[test]
    fn test_last_sol_far_from_recorded_date_fails() {
        let mut m = manifest(RoverName::Curiosity, [0, 1, 2]);
        m.photos[2].sol = 30_000_000;
        m.max_sol = Some(30_000_000);
        let err = compute_availability(&m).unwrap_err();
        assert!(matches!(err, AvailabilityError::InvalidManifest { .. }));
        assert!(err.to_string().contains("sol 30000000 maps to"));
    }

    #[test]
    fn test_max_sol_mismatch_fails() {
        let mut m = manifest(RoverName::Curiosity, 0..10);
        m.max_sol = Some(11);
        let err = compute_availability(&m).unwrap_err();
        assert!(err.to_string().contains("max_sol 11 differs from last recorded sol 9"));
    }

    #[test]
    fn test_out_of_order_manifest_fails() {
        let mut m = manifest(RoverName::Curiosity, 0..10);
        m.photos.swap(3, 4);
        assert!(matches!(
            compute_availability(&m),
            Err(AvailabilityError::InvalidManifest { .. })
        ));
    }

    #[test]
    fn test_disabled_dates_exclude_min_and_recorded_dates() {
        // first recorded sol is 3, so sols 0..3 are missing; sol 0 maps onto min_date
        let mut m = manifest(RoverName::Curiosity, 3..20);
        for p in m.photos.iter_mut() {
            p.earth_date = p.earth_date - Days::new(3);
        }
        let a = compute_availability(&m).unwrap();
        assert!(!a.disabled_dates.contains(&a.min_date));
        for p in &m.photos {
            assert!(!a.disabled_dates.contains(&p.earth_date));
        }
    }
}
