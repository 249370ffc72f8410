//! SurrealDB implementation of [`EventRepository`].

use chrono::{DateTime, NaiveDate, Utc};
use steward_core::error::StewardResult;
use steward_core::models::event::{Event, EventInstance, EventType, UpdateEvent};
use steward_core::repository::{EventRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::{CountRow, format_date, parse_date, parse_uuid};
use crate::error::DbError;

const ENTITY: &str = "event";

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct EventRow {
    title: String,
    description: String,
    event_date: String,
    start_time: String,
    location: String,
    event_type: String,
    zoom_link: Option<String>,
    attendees: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct EventRowWithId {
    record_id: String,
    title: String,
    description: String,
    event_date: String,
    start_time: String,
    location: String,
    event_type: String,
    zoom_link: Option<String>,
    attendees: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_event_type(raw: &str) -> Result<EventType, DbError> {
    raw.parse().map_err(|_| DbError::Decode {
        entity: ENTITY,
        message: format!("unknown event type `{raw}`"),
    })
}

impl EventRow {
    fn into_event(self, id: Uuid) -> Result<Event, DbError> {
        Ok(Event {
            id,
            title: self.title,
            description: self.description,
            date: parse_date(ENTITY, &self.event_date)?,
            time: self.start_time,
            location: self.location,
            event_type: parse_event_type(&self.event_type)?,
            zoom_link: self.zoom_link,
            attendees: self.attendees,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl EventRowWithId {
    fn try_into_event(self) -> Result<Event, DbError> {
        let id = parse_uuid(ENTITY, &self.record_id)?;
        EventRow {
            title: self.title,
            description: self.description,
            event_date: self.event_date,
            start_time: self.start_time,
            location: self.location,
            event_type: self.event_type,
            zoom_link: self.zoom_link,
            attendees: self.attendees,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_event(id)
    }
}

/// SurrealDB implementation of the Event repository.
#[derive(Clone)]
pub struct SurrealEventRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealEventRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> EventRepository for SurrealEventRepository<C> {
    async fn create(&self, input: EventInstance) -> StewardResult<Event> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('event', $id) SET \
                 title = $title, description = $description, \
                 event_date = $event_date, start_time = $start_time, \
                 location = $location, event_type = $event_type, \
                 zoom_link = $zoom_link, attendees = 0",
            )
            .bind(("id", id_str.clone()))
            .bind(("title", input.title))
            .bind(("description", input.description))
            .bind(("event_date", format_date(input.date)))
            .bind(("start_time", input.time))
            .bind(("location", input.location))
            .bind(("event_type", input.event_type.as_str().to_string()))
            .bind(("zoom_link", input.zoom_link))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<EventRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_event(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> StewardResult<Event> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('event', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EventRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_event(id)?)
    }

    async fn list(&self, pagination: Pagination) -> StewardResult<PaginatedResult<Event>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM event GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM event \
                 ORDER BY event_date DESC, start_time DESC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EventRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(EventRowWithId::try_into_event)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_between(&self, from: NaiveDate, to: NaiveDate) -> StewardResult<Vec<Event>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM event \
                 WHERE event_date >= $from AND event_date <= $to \
                 ORDER BY event_date ASC, start_time ASC",
            )
            .bind(("from", format_date(from)))
            .bind(("to", format_date(to)))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EventRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .map(EventRowWithId::try_into_event)
            .collect::<Result<Vec<_>, DbError>>()?)
    }

    async fn update(&self, id: Uuid, input: UpdateEvent) -> StewardResult<Event> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.title.is_some() {
            sets.push("title = $title");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.date.is_some() {
            sets.push("event_date = $event_date");
        }
        if input.time.is_some() {
            sets.push("start_time = $start_time");
        }
        if input.location.is_some() {
            sets.push("location = $location");
        }
        if input.event_type.is_some() {
            sets.push("event_type = $event_type");
        }
        match &input.zoom_link {
            Some(Some(_)) => sets.push("zoom_link = $zoom_link"),
            Some(None) => sets.push("zoom_link = NONE"),
            None => {}
        }
        if input.attendees.is_some() {
            sets.push("attendees = $attendees");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('event', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(title) = input.title {
            builder = builder.bind(("title", title));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(date) = input.date {
            builder = builder.bind(("event_date", format_date(date)));
        }
        if let Some(time) = input.time {
            builder = builder.bind(("start_time", time));
        }
        if let Some(location) = input.location {
            builder = builder.bind(("location", location));
        }
        if let Some(event_type) = input.event_type {
            builder = builder.bind(("event_type", event_type.as_str().to_string()));
        }
        if let Some(Some(link)) = input.zoom_link {
            builder = builder.bind(("zoom_link", link));
        }
        if let Some(attendees) = input.attendees {
            builder = builder.bind(("attendees", attendees));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<EventRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_event(id)?)
    }

    async fn delete(&self, id: Uuid) -> StewardResult<()> {
        self.db
            .query("DELETE type::record('event', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }
}
