use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::user::User;

/// A task row as stored in the `tasks` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Local date-time, no zone attached.
    pub due_date: NaiveDateTime,
    pub complete: bool,
    /// Owner. Every task belongs to exactly one user.
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A task ready to be persisted for its owner.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
    pub complete: bool,
    pub user_id: i64,
}

/// Payload for `POST /api/tasks`.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// At most 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[serde(deserialize_with = "deserialize_due_date")]
    pub due_date: NaiveDateTime,

    #[serde(default, alias = "completed")]
    pub complete: bool,
}

/// Payload for `PUT /api/tasks/{id}`. Absent fields are left untouched.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    /// `Some(None)` (an explicit `null`) clears the description.
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[validate(length(max = 1000))]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_optional_due_date")]
    pub due_date: Option<NaiveDateTime>,

    #[serde(alias = "completed")]
    pub complete: Option<bool>,
}

/// The JSON shape of a task returned by the API, with its owner embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
    pub user: User,
}

impl NewTask {
    pub fn new(input: TaskInput, owner: &User) -> Self {
        Self {
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            complete: input.complete,
            user_id: owner.id,
        }
    }
}

impl Task {
    /// Applies the fields present in `update`.
    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(complete) = update.complete {
            self.complete = complete;
        }
    }

    pub fn into_response(self, owner: &User) -> TaskResponse {
        TaskResponse {
            id: self.id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            complete: self.complete,
            created_at: self.created_at,
            user: owner.clone(),
        }
    }
}

/// Parses the due-date formats clients send: ISO local date-time with or
/// without fractional seconds, `datetime-local` (no seconds), RFC 3339 with an
/// offset (normalized to UTC) and a bare date (midnight).
pub fn parse_due_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_due_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid dueDate: {:?}", raw)))
}

/// Keeps an explicit `null` apart from a missing field.
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn deserialize_optional_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_due_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid dueDate: {:?}", raw))),
        None => Ok(None),
    }
}
