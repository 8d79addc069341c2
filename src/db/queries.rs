use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{AvailabilityMap, Booking, Location, Review, Space, SpaceType, User};

// ── Spaces ──

pub fn upsert_space(conn: &Connection, space: &Space) -> anyhow::Result<()> {
    let amenities = serde_json::to_string(&space.amenities)?;
    let images = serde_json::to_string(&space.images)?;
    let availability = serde_json::to_string(&space.availability)?;

    conn.execute(
        "INSERT INTO spaces (id, title, space_type, description, address, city, lat, lng, capacity, price_per_hour, amenities, images, host_id, rating, review_count, availability)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
         ON CONFLICT(id) DO UPDATE SET
           title = excluded.title,
           space_type = excluded.space_type,
           description = excluded.description,
           address = excluded.address,
           city = excluded.city,
           lat = excluded.lat,
           lng = excluded.lng,
           capacity = excluded.capacity,
           price_per_hour = excluded.price_per_hour,
           amenities = excluded.amenities,
           images = excluded.images,
           host_id = excluded.host_id,
           rating = excluded.rating,
           review_count = excluded.review_count,
           availability = excluded.availability",
        params![
            space.id,
            space.title,
            space.space_type.as_str(),
            space.description,
            space.location.address,
            space.location.city,
            space.location.lat,
            space.location.lng,
            space.capacity,
            space.price_per_hour,
            amenities,
            images,
            space.host_id,
            space.rating,
            space.review_count,
            availability,
        ],
    )?;
    Ok(())
}

const SPACE_COLUMNS: &str = "id, title, space_type, description, address, city, lat, lng, capacity, price_per_hour, amenities, images, host_id, rating, review_count, availability";

pub fn list_spaces(conn: &Connection) -> anyhow::Result<Vec<Space>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SPACE_COLUMNS} FROM spaces ORDER BY created_at ASC, id ASC"
    ))?;
    let rows = stmt.query_map([], |row| Ok(parse_space_row(row)))?;

    let mut spaces = vec![];
    for row in rows {
        spaces.push(row??);
    }
    Ok(spaces)
}

pub fn get_space(conn: &Connection, id: &str) -> anyhow::Result<Option<Space>> {
    let result = conn.query_row(
        &format!("SELECT {SPACE_COLUMNS} FROM spaces WHERE id = ?1"),
        params![id],
        |row| Ok(parse_space_row(row)),
    );

    match result {
        Ok(space) => Ok(Some(space?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_spaces_for_host(conn: &Connection, host_id: &str) -> anyhow::Result<Vec<Space>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SPACE_COLUMNS} FROM spaces WHERE host_id = ?1 ORDER BY created_at ASC, id ASC"
    ))?;
    let rows = stmt.query_map(params![host_id], |row| Ok(parse_space_row(row)))?;

    let mut spaces = vec![];
    for row in rows {
        spaces.push(row??);
    }
    Ok(spaces)
}

pub fn count_spaces(conn: &Connection) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM spaces", [], |row| row.get(0))?;
    Ok(count)
}

pub fn set_space_availability(
    conn: &Connection,
    space_id: &str,
    availability: &AvailabilityMap,
) -> anyhow::Result<bool> {
    let json = serde_json::to_string(availability)?;
    let count = conn.execute(
        "UPDATE spaces SET availability = ?1 WHERE id = ?2",
        params![json, space_id],
    )?;
    Ok(count > 0)
}

fn parse_space_row(row: &rusqlite::Row) -> anyhow::Result<Space> {
    let id: String = row.get(0)?;
    let title: String = row.get(1)?;
    let space_type_str: String = row.get(2)?;
    let description: String = row.get(3)?;
    let address: String = row.get(4)?;
    let city: String = row.get(5)?;
    let lat: f64 = row.get(6)?;
    let lng: f64 = row.get(7)?;
    let capacity: u32 = row.get(8)?;
    let price_per_hour: f64 = row.get(9)?;
    let amenities_json: String = row.get(10)?;
    let images_json: String = row.get(11)?;
    let host_id: String = row.get(12)?;
    let rating: f64 = row.get(13)?;
    let review_count: i64 = row.get(14)?;
    let availability_json: String = row.get(15)?;

    Ok(Space {
        id,
        title,
        space_type: SpaceType::parse(&space_type_str).unwrap_or(SpaceType::Consultorio),
        description,
        location: Location {
            address,
            city,
            lat,
            lng,
        },
        capacity,
        price_per_hour,
        amenities: serde_json::from_str(&amenities_json).unwrap_or_default(),
        images: serde_json::from_str(&images_json).unwrap_or_default(),
        host_id,
        rating,
        review_count,
        availability: serde_json::from_str(&availability_json).unwrap_or_default(),
    })
}

// ── Bookings ──

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    let snapshot = serde_json::to_string(&booking.space)?;
    let created_at = booking.created_at.format("%Y-%m-%d %H:%M:%S").to_string();

    conn.execute(
        "INSERT INTO bookings (id, user_id, space_id, space_snapshot, date, start_time, end_time, total_price, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            booking.id,
            booking.user_id,
            booking.space.id,
            snapshot,
            booking.date.to_string(),
            booking.start_time,
            booking.end_time,
            booking.total_price,
            created_at,
        ],
    )?;
    Ok(())
}

const BOOKING_COLUMNS: &str =
    "id, user_id, space_snapshot, date, start_time, end_time, total_price, created_at";

pub fn get_bookings_for_space_on_date(
    conn: &Connection,
    space_id: &str,
    date: &str,
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE space_id = ?1 AND date = ?2 ORDER BY start_time ASC"
    ))?;
    let rows = stmt.query_map(params![space_id, date], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_bookings_for_user(conn: &Connection, user_id: &str) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = ?1 ORDER BY date ASC, start_time ASC"
    ))?;
    let rows = stmt.query_map(params![user_id], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// Bookings received across every space the host owns.
pub fn get_bookings_for_host(conn: &Connection, host_id: &str) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings
         WHERE space_id IN (SELECT id FROM spaces WHERE host_id = ?1)
         ORDER BY date ASC, start_time ASC"
    ))?;
    let rows = stmt.query_map(params![host_id], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let snapshot_json: String = row.get(2)?;
    let date_str: String = row.get(3)?;
    let start_time: String = row.get(4)?;
    let end_time: String = row.get(5)?;
    let total_price: f64 = row.get(6)?;
    let created_at_str: String = row.get(7)?;

    let space: Space = serde_json::from_str(&snapshot_json)?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .unwrap_or_else(|_| Utc::now().date_naive());
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Booking {
        id,
        user_id,
        space,
        date,
        start_time,
        end_time,
        total_price,
        created_at,
    })
}

// ── Users ──

pub fn save_user(conn: &Connection, user: &User) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO users (id, name, email, avatar_url, is_host, bio)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
           name = excluded.name,
           email = excluded.email,
           avatar_url = excluded.avatar_url,
           is_host = excluded.is_host,
           bio = excluded.bio",
        params![
            user.id,
            user.name,
            user.email,
            user.avatar_url,
            user.is_host as i32,
            user.bio,
        ],
    )?;
    Ok(())
}

pub fn get_user(conn: &Connection, id: &str) -> anyhow::Result<Option<User>> {
    let result = conn.query_row(
        "SELECT id, name, email, avatar_url, is_host, bio FROM users WHERE id = ?1",
        params![id],
        |row| {
            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                avatar_url: row.get(3)?,
                is_host: row.get::<_, i32>(4)? != 0,
                bio: row.get(5)?,
            })
        },
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Sessions ──

pub fn create_session(conn: &Connection, token: &str, user_id: &str) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO sessions (token, user_id) VALUES (?1, ?2)",
        params![token, user_id],
    )?;
    Ok(())
}

pub fn get_session_user(conn: &Connection, token: &str) -> anyhow::Result<Option<User>> {
    let result = conn.query_row(
        "SELECT u.id, u.name, u.email, u.avatar_url, u.is_host, u.bio
         FROM sessions s INNER JOIN users u ON u.id = s.user_id
         WHERE s.token = ?1",
        params![token],
        |row| {
            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                avatar_url: row.get(3)?,
                is_host: row.get::<_, i32>(4)? != 0,
                bio: row.get(5)?,
            })
        },
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn delete_session(conn: &Connection, token: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
    Ok(count > 0)
}

// ── Favorites ──

/// Toggle a favorite; returns true when the space ends up favorited.
pub fn toggle_favorite(conn: &Connection, user_id: &str, space_id: &str) -> anyhow::Result<bool> {
    let removed = conn.execute(
        "DELETE FROM favorites WHERE user_id = ?1 AND space_id = ?2",
        params![user_id, space_id],
    )?;
    if removed > 0 {
        return Ok(false);
    }
    conn.execute(
        "INSERT INTO favorites (user_id, space_id) VALUES (?1, ?2)",
        params![user_id, space_id],
    )?;
    Ok(true)
}

pub fn list_favorites(conn: &Connection, user_id: &str) -> anyhow::Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT space_id FROM favorites WHERE user_id = ?1 ORDER BY space_id ASC")?;
    let rows = stmt.query_map(params![user_id], |row| row.get::<_, String>(0))?;

    let mut ids = vec![];
    for row in rows {
        ids.push(row?);
    }
    Ok(ids)
}

// ── Reviews ──

pub fn insert_review(conn: &Connection, review: &Review) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO reviews (id, space_id, user_id, rating, comment, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
           rating = excluded.rating,
           comment = excluded.comment,
           created_at = excluded.created_at",
        params![
            review.id,
            review.space_id,
            review.user_id,
            review.rating,
            review.comment,
            review.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_reviews_for_space(conn: &Connection, space_id: &str) -> anyhow::Result<Vec<Review>> {
    let mut stmt = conn.prepare(
        "SELECT id, space_id, user_id, rating, comment, created_at
         FROM reviews WHERE space_id = ?1 ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map(params![space_id], |row| {
        Ok(Review {
            id: row.get(0)?,
            space_id: row.get(1)?,
            user_id: row.get(2)?,
            rating: row.get(3)?,
            comment: row.get(4)?,
            created_at: row.get(5)?,
        })
    })?;

    let mut reviews = vec![];
    for row in rows {
        reviews.push(row?);
    }
    Ok(reviews)
}

pub fn count_reviews(conn: &Connection) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))?;
    Ok(count)
}
