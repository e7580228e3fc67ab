//! SQL schema for the Muster SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Check-ins are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS check_ins (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name    TEXT NOT NULL,
    middle_name   TEXT,
    last_name     TEXT NOT NULL,
    id_passport   TEXT NOT NULL,
    email         TEXT NOT NULL,
    phone         TEXT NOT NULL,
    ethnicity     TEXT,
    gender        TEXT,
    course        TEXT NOT NULL,
    week_number   INTEGER NOT NULL CHECK (week_number >= 1),
    check_in_time TEXT NOT NULL    -- RFC 3339 UTC, fixed width; server-assigned
);

CREATE INDEX IF NOT EXISTS check_ins_course_week_idx ON check_ins(course, week_number);
CREATE INDEX IF NOT EXISTS check_ins_time_idx        ON check_ins(check_in_time);
";

/// Column list shared by every `SELECT`; order matches
/// [`crate::encode::RawCheckIn::from_row`].
pub const COLUMNS: &str = "id, first_name, middle_name, last_name, id_passport, email, phone, \
                           ethnicity, gender, course, week_number, check_in_time";
