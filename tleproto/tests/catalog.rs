//! Parse and decode a small mixed-quality catalog

use tleproto::*;

const CATALOG: &str = include_str!("../test_fixtures/catalog.tle");

#[test]
fn catalog_records_and_skips() {
    let set = parse_tle_set(CATALOG).unwrap();

    let names: Vec<&str> = set.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["ISS (ZARYA)", "GEO1", "GEO2", "RETROGRADE-TYPO"]);

    assert_eq!(set.skipped.len(), 1);
    assert_eq!(set.skipped[0].index, 3);
    assert_eq!(set.skipped[0].name, "CORRUPTED");
    assert_eq!(
        set.skipped[0].error,
        TleError::Checksum {
            line: 2,
            expected: 2,
            found: '3'
        }
    );
}

#[test]
fn catalog_elements() {
    let set = parse_tle_set(CATALOG).unwrap();

    let (elements, errors): (Vec<_>, Vec<_>) = set
        .records
        .iter()
        .map(extract_elements)
        .partition(Result::is_ok);
    assert_eq!(elements.len(), 3);
    assert_eq!(errors.len(), 1);

    let ids: Vec<u32> = elements
        .into_iter()
        .map(|e| e.unwrap().norad_id)
        .collect();
    assert_eq!(ids, [25544, 37481, 39120]);

    assert!(matches!(
        errors[0],
        Err(TleError::FieldRange {
            field: "inclination",
            ..
        })
    ));
}

#[test]
fn catalog_epochs_resolve() {
    let set = parse_tle_set(CATALOG).unwrap();
    let geo1 = extract_elements(&set.records[1]).unwrap();
    let t = geo1.epoch.instant().unwrap();
    assert_eq!(t.date_naive().to_string(), "2023-07-09");
}
