//! Month grid and summary invariants, exercised over arbitrary inputs.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use hearth_core::Store;
use hearth_core::db::query;
use hearth_core::model::{NewPerson, TaskKind};
use hearth_core::store::GRID_DAYS;
use proptest::prelude::*;

fn store_with_person() -> (Store, i64) {
    let mut store = Store::open_in_memory().expect("open store");
    let person = store
        .create_person(&NewPerson {
            name: "Isaac".into(),
            role: "kid".into(),
            theme: None,
        })
        .expect("create person");
    (store, person.id)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month");
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("valid next month");
    u32::try_from((next - first).num_days()).expect("positive month length")
}

proptest! {
    #[test]
    fn grid_shape_holds_for_any_month(year in 1970i32..=2100, month in 1u32..=12) {
        let (store, person_id) = store_with_person();
        let cells = store.month_grid(person_id, year, month).expect("grid");

        prop_assert_eq!(cells.len() as u64, GRID_DAYS);
        prop_assert_eq!(cells[0].date.weekday(), Weekday::Sun);

        for pair in cells.windows(2) {
            prop_assert_eq!(pair[1].date, pair[0].date + Days::new(1));
        }

        let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month");
        prop_assert!(cells[..7].iter().any(|c| c.date == first),
            "the 1st must land in the grid's first week");

        let in_month = cells.iter().filter(|c| c.is_current_month).count() as u32;
        prop_assert_eq!(in_month, days_in_month(year, month));

        for cell in &cells {
            prop_assert!(cell.completed_tasks <= cell.total_tasks);
        }
    }

    #[test]
    fn summaries_always_satisfy_the_level2_rule(toggles in prop::collection::vec(
        (0u32..14, any::<bool>()), 1..40,
    )) {
        let (mut store, person_id) = store_with_person();
        let mut task_ids = Vec::new();
        for n in 0..4 {
            task_ids.push(store.create_global_task(&format!("Chore {n}")).expect("task").id);
        }
        let base = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");

        for (slot, completed) in toggles {
            let task_id = task_ids[(slot % 4) as usize];
            let day = base + Days::new(u64::from(slot / 4));
            store
                .set_completion_on(person_id, task_id, TaskKind::Global, completed, day)
                .expect("toggle");
        }

        for offset in 0..4u64 {
            let day = base + Days::new(offset);
            if let Some(summary) = query::day_summary(store.connection(), person_id, day).expect("query") {
                prop_assert_eq!(
                    summary.is_level2,
                    summary.total_tasks > 0 && summary.completed_tasks == summary.total_tasks,
                );
                prop_assert!(summary.completed_tasks <= summary.total_tasks);
                let recounted = query::completions_for_day(store.connection(), person_id, day)
                    .expect("ledger rows");
                prop_assert_eq!(summary.total_tasks as usize, recounted.len());
            }
        }
    }

    #[test]
    fn snapshot_progress_stays_in_bounds(completed_slots in prop::collection::vec(any::<bool>(), 0..8)) {
        let (mut store, person_id) = store_with_person();
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");

        for (n, completed) in completed_slots.iter().enumerate() {
            let task = store.create_global_task(&format!("Chore {n}")).expect("task");
            store
                .set_completion_on(person_id, task.id, TaskKind::Global, *completed, day)
                .expect("toggle");
        }

        let snapshot = store.person_snapshot_on(person_id, day).expect("snapshot");
        prop_assert!(snapshot.progress <= 100);
        if snapshot.total_tasks == 0 {
            prop_assert_eq!(snapshot.progress, 0);
        }
        if snapshot.is_level2 {
            prop_assert_eq!(snapshot.progress, 100);
        }
    }
}

#[test]
fn december_grid_pads_into_next_year() {
    let (store, person_id) = store_with_person();
    let cells = store.month_grid(person_id, 2024, 12).expect("grid");

    // Dec 1 2024 is a Sunday, so the grid opens on the month itself and the
    // tail pads into January 2025.
    assert_eq!(
        cells[0].date,
        NaiveDate::from_ymd_opt(2024, 12, 1).expect("valid date")
    );
    assert_eq!(
        cells[41].date,
        NaiveDate::from_ymd_opt(2025, 1, 11).expect("valid date")
    );
    assert!(!cells[41].is_current_month);
}

#[test]
fn all_month_grids_cover_every_person() {
    let (mut store, _) = store_with_person();
    store
        .create_person(&NewPerson {
            name: "Mara".into(),
            role: "parent".into(),
            theme: None,
        })
        .expect("second person");

    let months = store.all_month_grids(2024, 2).expect("grids");
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].name, "Isaac");
    assert_eq!(months[1].name, "Mara");
    assert!(months.iter().all(|m| m.days.len() as u64 == GRID_DAYS));
}
