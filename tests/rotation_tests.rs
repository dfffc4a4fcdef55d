use workout_schedule::{ProgramTable, Rotation, unique_day_labels};

fn table(days: &[&str]) -> ProgramTable {
    let mut values = vec![vec!["Week".to_string(), "Day".into(), "Exercise".into()]];
    for (i, day) in days.iter().enumerate() {
        values.push(vec!["1".into(), day.to_string(), format!("Exercise {i}")]);
    }
    ProgramTable::from_values(values).unwrap()
}

#[test]
fn labels_keep_first_seen_order_without_duplicates() {
    let table = table(&["Push", "Pull", "Push", "Legs"]);
    assert_eq!(unique_day_labels(&table), vec!["Push", "Pull", "Legs"]);
}

#[test]
fn labels_are_grouped_case_sensitively() {
    let table = table(&["Push", "push", "Push"]);
    assert_eq!(unique_day_labels(&table), vec!["Push", "push"]);
}

#[test]
fn empty_cells_and_short_rows_contribute_no_labels() {
    let values = vec![
        vec!["Week".to_string(), "Day".into(), "Exercise".into()],
        vec!["1".into()],
        vec!["1".into(), "".into(), "Bench".into()],
        vec!["1".into(), "Pull".into()],
    ];
    let table = ProgramTable::from_values(values).unwrap();
    assert_eq!(unique_day_labels(&table), vec!["Pull"]);
}

#[test]
fn rotation_is_periodic_in_its_length() {
    let rotation = Rotation::from_table(&table(&["A", "B", "C", "A", "D"])).unwrap();
    let len = rotation.labels().len() as u64;
    assert_eq!(len, 4);
    for offset in 0..50 {
        assert_eq!(
            rotation.label_at_offset(offset),
            rotation.label_at_offset(offset + len)
        );
    }
    assert_eq!(rotation.label_at_offset(4), "A");
    assert_eq!(rotation.label_at_offset(7), "D");
}

#[test]
fn single_label_always_resolves_to_itself() {
    let rotation = Rotation::from_table(&table(&["Full Body"])).unwrap();
    assert_eq!(rotation.label_at_offset(0), "Full Body");
    assert_eq!(rotation.label_at_offset(365), "Full Body");
}

#[test]
fn blank_day_cells_never_become_labels() {
    let table = table(&["Push", " ", "\t", "Pull"]);
    assert_eq!(table.rows().len(), 2);
    assert_eq!(unique_day_labels(&table), vec!["Push", "Pull"]);
}
