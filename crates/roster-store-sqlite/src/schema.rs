//! SQL schema for the roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS area (
    area TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS competence (
    competence TEXT PRIMARY KEY,
    area       TEXT NOT NULL REFERENCES area(area)
                 ON DELETE CASCADE ON UPDATE CASCADE
);

CREATE TABLE IF NOT EXISTS member (
    ist_id         INTEGER PRIMARY KEY,
    name           TEXT NOT NULL,
    available_date TEXT NOT NULL      -- YYYY-MM-DD; 1970-01-01 when unset
);

CREATE TABLE IF NOT EXISTS project (
    project_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL UNIQUE,
    begin_date TEXT                   -- YYYY-MM-DD or NULL
);

CREATE TABLE IF NOT EXISTS member_competence (
    ist_id     INTEGER NOT NULL REFERENCES member(ist_id) ON DELETE CASCADE,
    competence TEXT    NOT NULL REFERENCES competence(competence)
                 ON DELETE CASCADE ON UPDATE CASCADE,
    rating     REAL    NOT NULL,
    PRIMARY KEY (ist_id, competence)
);

CREATE TABLE IF NOT EXISTS project_competence (
    project_id INTEGER NOT NULL REFERENCES project(project_id) ON DELETE CASCADE,
    competence TEXT    NOT NULL REFERENCES competence(competence)
                 ON DELETE CASCADE ON UPDATE CASCADE,
    PRIMARY KEY (project_id, competence)
);

-- One row per competence a member brings to a project.
CREATE TABLE IF NOT EXISTS member_project_competence (
    ist_id     INTEGER NOT NULL REFERENCES member(ist_id) ON DELETE CASCADE,
    project_id INTEGER NOT NULL REFERENCES project(project_id) ON DELETE CASCADE,
    competence TEXT    NOT NULL REFERENCES competence(competence)
                 ON DELETE CASCADE ON UPDATE CASCADE,
    PRIMARY KEY (ist_id, project_id, competence)
);

CREATE INDEX IF NOT EXISTS competence_area_idx ON competence(area);
CREATE INDEX IF NOT EXISTS member_name_idx     ON member(name);

PRAGMA user_version = 1;
";
