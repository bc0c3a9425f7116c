use crate::models::{Activity, ActivityId};

pub fn activity(
    id: i64,
    name: &str,
    category: &str,
    date: &str,
    duration_minutes: u32,
    description: Option<&str>,
) -> Activity {
    Activity {
        id: ActivityId::Numeric(id),
        name: name.to_string(),
        description: description.map(str::to_string),
        category: category.to_string(),
        date: date.to_string(),
        duration_minutes,
    }
}

pub fn morning_run_and_reading() -> Vec<Activity> {
    vec![
        activity(1, "Morning Run", "Exercise", "2024-01-15", 30, None),
        activity(2, "Reading", "Learning", "2024-01-16", 60, None),
    ]
}

/// Small mixed collection: two exercise entries, one learning, one work.
pub fn sample_activities() -> Vec<Activity> {
    vec![
        activity(
            1,
            "Morning Run",
            "Exercise",
            "2024-01-15",
            30,
            Some("5km run in the park"),
        ),
        activity(
            2,
            "Reading",
            "Learning",
            "2024-01-16",
            60,
            Some("Read React documentation"),
        ),
        activity(3, "Standup", "Work", "2024-01-17", 15, None),
        activity(
            4,
            "Evening Walk",
            "Exercise",
            "2024-01-17",
            45,
            Some("Around the lake"),
        ),
    ]
}
