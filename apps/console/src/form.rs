use std::collections::BTreeMap;

use thiserror::Error;

use crate::api::ClientResult;
use crate::models::{parse_iso_date, Activity, ActivityId, ActivityInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Category,
    Date,
    DurationMinutes,
    Description,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Category => "Category",
            Self::Date => "Date",
            Self::DurationMinutes => "Duration (minutes)",
            Self::Description => "Description",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(ActivityId),
}

/// Raw text as typed into the inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub category: String,
    pub date: String,
    pub duration_minutes: String,
    pub description: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Category => &self.category,
            FormField::Date => &self.date,
            FormField::DurationMinutes => &self.duration_minutes,
            FormField::Description => &self.description,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Category => &mut self.category,
            FormField::Date => &mut self.date,
            FormField::DurationMinutes => &mut self.duration_minutes,
            FormField::Description => &mut self.description,
        }
    }
}

impl From<&Activity> for FormFields {
    fn from(activity: &Activity) -> Self {
        Self {
            name: activity.name.clone(),
            category: activity.category.clone(),
            date: activity.date.clone(),
            duration_minutes: activity.duration_minutes.to_string(),
            description: activity.description.clone().unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Error)]
#[error("{} field(s) need attention", .errors.len())]
pub struct ValidationError {
    pub errors: BTreeMap<FormField, String>,
}

impl ValidationError {
    pub fn message(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("a submission is already in progress")]
    InFlight,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A validated draft ready for the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub mode: FormMode,
    pub input: ActivityInput,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityForm {
    pub fields: FormFields,
    pub mode: FormMode,
    pub errors: BTreeMap<FormField, String>,
    pub submitting: bool,
}

impl ActivityForm {
    pub fn editing(activity: &Activity) -> Self {
        Self {
            fields: FormFields::from(activity),
            mode: FormMode::Edit(activity.id.clone()),
            ..Self::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Typing into a field clears that field's error.
    pub fn set_field(&mut self, field: FormField, value: String) {
        *self.fields.slot(field) = value;
        self.errors.remove(&field);
    }

    /// Switches to edit mode unless a submission is in flight.
    pub fn start_edit(&mut self, activity: &Activity) -> bool {
        if self.submitting {
            return false;
        }
        *self = Self::editing(activity);
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Drops back to create mode when the record being edited was deleted.
    pub fn release_deleted(&mut self, id: &ActivityId) -> bool {
        let targets_deleted = matches!(&self.mode, FormMode::Edit(current) if current == id);
        if targets_deleted && !self.submitting {
            self.reset();
            return true;
        }
        false
    }

    pub fn validate(&self) -> Result<ActivityInput, ValidationError> {
        validate_fields(&self.fields)
    }

    /// Validates and marks the form busy. Field errors are stored on the form
    /// so the view can render them.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitBlocked> {
        if self.submitting {
            return Err(SubmitBlocked::InFlight);
        }

        match self.validate() {
            Ok(input) => {
                self.errors.clear();
                self.submitting = true;
                Ok(Submission {
                    mode: self.mode.clone(),
                    input,
                })
            }
            Err(invalid) => {
                self.errors = invalid.errors.clone();
                Err(SubmitBlocked::Invalid(invalid))
            }
        }
    }

    /// Success resets to an empty create form; failure keeps what was typed.
    pub fn finish_submit(&mut self, result: &ClientResult<Activity>) {
        match result {
            Ok(_) => self.reset(),
            Err(_) => self.submitting = false,
        }
    }
}

pub fn validate_fields(fields: &FormFields) -> Result<ActivityInput, ValidationError> {
    let mut errors = BTreeMap::new();

    let name = fields.name.trim();
    if name.is_empty() {
        errors.insert(FormField::Name, "Name is required".to_string());
    }

    let category = fields.category.trim();
    if category.is_empty() {
        errors.insert(FormField::Category, "Category is required".to_string());
    }

    let date = fields.date.trim();
    if date.is_empty() {
        errors.insert(FormField::Date, "Date is required".to_string());
    } else if parse_iso_date(date).is_none() {
        errors.insert(
            FormField::Date,
            "Date must be a valid YYYY-MM-DD date".to_string(),
        );
    }

    let duration = fields
        .duration_minutes
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|minutes| *minutes > 0);
    if duration.is_none() {
        errors.insert(
            FormField::DurationMinutes,
            "Duration must be a positive number".to_string(),
        );
    }

    match duration {
        Some(duration_minutes) if errors.is_empty() => {
            let description = fields.description.trim();
            Ok(ActivityInput {
                name: name.to_string(),
                description: (!description.is_empty()).then(|| description.to_string()),
                category: category.to_string(),
                date: date.to_string(),
                duration_minutes,
            })
        }
        _ => Err(ValidationError { errors }),
    }
}
