// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ClassForm, ClassTypeId, FieldError, Frequency, InstructorId, RecurrenceRule,
    validate_class_form,
};
use chrono::{NaiveDate, NaiveTime};

fn create_valid_form() -> ClassForm {
    ClassForm {
        name: String::from("Morning Flow"),
        class_type_id: Some(ClassTypeId::new(1)),
        instructor_id: Some(InstructorId::new(1)),
        room_id: None,
        date: NaiveDate::from_ymd_opt(2025, 1, 6),
        start_time: NaiveTime::from_hms_opt(9, 0, 0),
        duration_minutes: 45,
        capacity: 12,
        waitlist_capacity: 5,
        late_cancel_allowed: false,
        visible: true,
        recurrence: RecurrenceRule::disabled(),
    }
}

#[test]
fn test_validate_class_form_accepts_valid_form() {
    assert!(validate_class_form(&create_valid_form()).is_empty());
}

#[test]
fn test_validate_class_form_rejects_blank_name() {
    let mut form: ClassForm = create_valid_form();
    form.name = String::from("   ");

    assert_eq!(validate_class_form(&form), vec![FieldError::MissingName]);
}

#[test]
fn test_validate_class_form_capacity_bounds() {
    for (capacity, valid) in [(0, false), (1, true), (100, true), (101, false)] {
        let mut form: ClassForm = create_valid_form();
        form.capacity = capacity;
        assert_eq!(validate_class_form(&form).is_empty(), valid, "capacity {capacity}");
    }
}

#[test]
fn test_validate_class_form_duration_bounds() {
    for (minutes, valid) in [(14, false), (15, true), (180, true), (181, false)] {
        let mut form: ClassForm = create_valid_form();
        form.duration_minutes = minutes;
        let errors: Vec<FieldError> = validate_class_form(&form);
        assert_eq!(errors.is_empty(), valid, "duration {minutes}");
        if !valid {
            assert_eq!(errors, vec![FieldError::DurationOutOfRange(minutes)]);
        }
    }
}

#[test]
fn test_validate_class_form_rejects_large_waitlist() {
    let mut form: ClassForm = create_valid_form();
    form.waitlist_capacity = 101;

    assert_eq!(validate_class_form(&form), vec![FieldError::WaitlistTooLarge(101)]);
}

#[test]
fn test_validate_class_form_collects_every_missing_field() {
    let form: ClassForm = ClassForm {
        name: String::new(),
        class_type_id: None,
        instructor_id: None,
        date: None,
        start_time: None,
        ..create_valid_form()
    };

    let fields: Vec<&str> = validate_class_form(&form).iter().map(FieldError::field).collect();
    assert_eq!(
        fields,
        vec!["name", "class_type_id", "instructor_id", "date", "start_time"]
    );
}

#[test]
fn test_validate_class_form_recurrence_count() {
    let mut form: ClassForm = create_valid_form();
    form.recurrence = RecurrenceRule::repeating(Frequency::Weekly, 7);
    assert_eq!(
        validate_class_form(&form),
        vec![FieldError::RecurrenceCountOutOfRange(7)]
    );

    form.recurrence = RecurrenceRule::repeating(Frequency::Weekly, 0);
    assert_eq!(
        validate_class_form(&form),
        vec![FieldError::RecurrenceCountOutOfRange(0)]
    );

    form.recurrence = RecurrenceRule::repeating(Frequency::Weekly, 6);
    assert!(validate_class_form(&form).is_empty());
}

#[test]
fn test_validate_class_form_ignores_disabled_recurrence() {
    let mut form: ClassForm = create_valid_form();
    form.recurrence = RecurrenceRule {
        enabled: false,
        count: 99,
        ..RecurrenceRule::disabled()
    };

    assert!(validate_class_form(&form).is_empty());
}

#[test]
fn test_validate_class_form_rejects_until_before_start() {
    let mut form: ClassForm = create_valid_form();
    let until: NaiveDate = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    form.recurrence = RecurrenceRule::repeating(Frequency::Daily, 3).until(until);

    let errors: Vec<FieldError> = validate_class_form(&form);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field(), "recurrence.until");
}
