mod common;

use hrsim_core::{Catalog, SalaryBand, validate_generated};
use hrsim_generate::{FakeSource, LocaleKey, RecordFactory};

use common::{ScriptedSource, small_catalog, today};

#[test]
fn generates_requested_count_of_valid_records() {
    let catalog = Catalog::builtin();
    let band = SalaryBand::default();
    let factory = RecordFactory::new(&catalog, band, today());
    let mut source = FakeSource::seeded(42, LocaleKey::EnUs);

    for count in [0_usize, 1, 25, 300] {
        let records = factory.generate(count, &mut source).expect("generate");
        assert_eq!(records.len(), count);
        for record in &records {
            validate_generated(&catalog, &band, record, today()).expect("valid record");
            assert_eq!(record.salary % 1000, 0);
            assert!(record.event_type.is_none());
            assert!(record.event_date.is_none());
        }
    }
}

#[test]
fn pt_br_locale_produces_valid_records() {
    let catalog = Catalog::builtin();
    let band = SalaryBand::default();
    let factory = RecordFactory::new(&catalog, band, today());
    let mut source = FakeSource::seeded(9, LocaleKey::PtBr);

    let records = factory.generate(50, &mut source).expect("generate");
    for record in &records {
        validate_generated(&catalog, &band, record, today()).expect("valid record");
    }
}

#[test]
fn same_seed_same_records() {
    let catalog = Catalog::builtin();
    let factory = RecordFactory::new(&catalog, SalaryBand::default(), today());

    let a = factory
        .generate(20, &mut FakeSource::seeded(5, LocaleKey::EnUs))
        .expect("generate a");
    let b = factory
        .generate(20, &mut FakeSource::seeded(5, LocaleKey::EnUs))
        .expect("generate b");
    assert_eq!(a, b);
}

#[test]
fn position_matches_drawn_department() {
    let catalog = small_catalog();
    let factory = RecordFactory::new(&catalog, SalaryBand::default(), today());
    let mut source = FakeSource::seeded(1, LocaleKey::EnUs);

    let record = factory.generate_one(&mut source).expect("generate");
    assert!(["Engineering", "Sales"].contains(&record.department.as_str()));
    assert!(catalog.contains_pair(&record.department, &record.position));
}

#[test]
fn both_departments_appear_at_scale() {
    let catalog = small_catalog();
    let factory = RecordFactory::new(&catalog, SalaryBand::default(), today());
    let mut source = FakeSource::seeded(77, LocaleKey::EnUs);

    let records = factory.generate(200, &mut source).expect("generate");
    assert!(records.iter().any(|r| r.department == "Sales"));
    assert!(records.iter().any(|r| r.department == "Engineering"));
}

#[test]
fn salary_draw_rounds_to_nearest_thousand() {
    let catalog = small_catalog();
    let factory = RecordFactory::new(&catalog, SalaryBand::default(), today());

    let mut source = ScriptedSource::new().with_ints(&[47_499, 47_501, 119_999, 35_000]);
    assert_eq!(factory.draw_salary(&mut source), 47_000);
    assert_eq!(factory.draw_salary(&mut source), 48_000);
    assert_eq!(factory.draw_salary(&mut source), 120_000);
    assert_eq!(factory.draw_salary(&mut source), 35_000);
}

#[test]
fn scripted_draws_pick_department_then_position() {
    let catalog = small_catalog();
    let factory = RecordFactory::new(&catalog, SalaryBand::default(), today());
    // Departments are ordered: Engineering, Sales.
    let mut source = ScriptedSource::new().with_indices(&[0, 1]);

    let record = factory.generate_one(&mut source).expect("generate");
    assert_eq!(record.department, "Engineering");
    assert_eq!(record.position, "Manager");
    assert_eq!(record.first_name, "Ada");
    assert_eq!(record.salary, 35_000);
}
