use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    info!("Running SQLite migrations");

    create_inr_table(conn)?;
    create_blood_pressure_table(conn)?;
    create_record_time_indexes(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the INR records table
fn create_inr_table(conn: &Connection) -> Result<(), rusqlite::Error> {
    info!("Creating inr_records table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS inr_records (
            id TEXT PRIMARY KEY,
            value REAL NOT NULL,
            record_time TEXT NOT NULL,
            warfarin_dose_mg REAL NOT NULL,
            is_in_range INTEGER,
            target_range_low REAL,
            target_range_high REAL,
            note TEXT
        )",
        [],
    )?;

    Ok(())
}

/// Create the blood pressure records table
fn create_blood_pressure_table(conn: &Connection) -> Result<(), rusqlite::Error> {
    info!("Creating blood_pressure_records table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS blood_pressure_records (
            id TEXT PRIMARY KEY,
            systolic INTEGER NOT NULL,
            diastolic INTEGER NOT NULL,
            heart_rate INTEGER,
            position TEXT,
            record_time TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// Create indexes on record_time for range filtering
fn create_record_time_indexes(conn: &Connection) -> Result<(), rusqlite::Error> {
    info!("Creating indexes on record_time");

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_inr_records_record_time
            ON inr_records (record_time DESC);
         CREATE INDEX IF NOT EXISTS idx_blood_pressure_records_record_time
            ON blood_pressure_records (record_time DESC);",
    )?;

    Ok(())
}
