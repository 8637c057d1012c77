//! Persistence for the profile and projects.
//!
//! [`PortfolioStore`] is the seam the HTTP layer talks to; [`SqliteStore`] is
//! the production implementation. Tables are created on open; there is no
//! migration machinery.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use folio_core::{Error, Profile, ProfileUpdate, Project, ProjectInput, Result};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};
use uuid::Uuid;

/// Persistence collaborator for site content.
#[cfg_attr(test, mockall::automock)]
pub trait PortfolioStore: Send + Sync {
    /// The site profile, if one was saved.
    fn get_profile(&self) -> Result<Option<Profile>>;

    /// Create the profile or overwrite the existing one.
    fn upsert_profile(&self, update: ProfileUpdate) -> Result<Profile>;

    /// All projects, newest first.
    fn list_projects(&self) -> Result<Vec<Project>>;

    /// One project by id.
    fn get_project(&self, id: &str) -> Result<Option<Project>>;

    /// Insert a project.
    fn create_project(&self, input: ProjectInput) -> Result<Project>;

    /// Replace a project's fields. Fails with `NotFound` for unknown ids.
    fn update_project(&self, id: &str, input: ProjectInput) -> Result<Project>;

    /// Delete a project. Deleting an unknown id succeeds.
    fn delete_project(&self, id: &str) -> Result<()>;
}

const CREATE_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS profile (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        bio TEXT,
        email TEXT NOT NULL,
        profession TEXT,
        province TEXT,
        school_or_company TEXT,
        gender TEXT,
        age INTEGER,
        phone TEXT,
        github TEXT,
        linkedin TEXT,
        twitter TEXT,
        facebook TEXT,
        youtube TEXT,
        tiktok TEXT,
        website TEXT,
        avatar TEXT,
        logo TEXT,
        background_music TEXT,
        enable_background_music INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS project (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        image TEXT,
        url TEXT,
        github_url TEXT,
        tech_stack TEXT,
        featured INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_project_created_at ON project (created_at DESC);
";

const PROFILE_COLUMNS: &str = "id, name, bio, email, profession, province, school_or_company, \
    gender, age, phone, github, linkedin, twitter, facebook, youtube, tiktok, website, avatar, \
    logo, background_music, enable_background_music, created_at, updated_at";

const PROJECT_COLUMNS: &str =
    "id, title, description, image, url, github_url, tech_stack, featured, created_at, updated_at";

/// SQLite-backed store.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| Error::FileSystem {
                path: parent.to_path_buf(),
                message: format!("Failed to create database directory: {e}"),
            })?;
        }

        let conn = Connection::open(path).map_err(Error::storage)?;
        info!("Opened database {}", path.display());
        Self::init(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Error::storage)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(CREATE_TABLES).map_err(Error::storage)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_profile(conn: &Connection, profile: &Profile) -> rusqlite::Result<()> {
        conn.execute(
            &format!(
                "INSERT INTO profile ({PROFILE_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                         ?17, ?18, ?19, ?20, ?21, ?22, ?23)
                 ON CONFLICT(id) DO UPDATE SET
                     name = excluded.name, bio = excluded.bio, email = excluded.email,
                     profession = excluded.profession, province = excluded.province,
                     school_or_company = excluded.school_or_company, gender = excluded.gender,
                     age = excluded.age, phone = excluded.phone, github = excluded.github,
                     linkedin = excluded.linkedin, twitter = excluded.twitter,
                     facebook = excluded.facebook, youtube = excluded.youtube,
                     tiktok = excluded.tiktok, website = excluded.website,
                     avatar = excluded.avatar, logo = excluded.logo,
                     background_music = excluded.background_music,
                     enable_background_music = excluded.enable_background_music,
                     updated_at = excluded.updated_at"
            ),
            params![
                profile.id,
                profile.name,
                profile.bio,
                profile.email,
                profile.profession,
                profile.province,
                profile.school_or_company,
                profile.gender,
                profile.age,
                profile.phone,
                profile.github,
                profile.linkedin,
                profile.twitter,
                profile.facebook,
                profile.youtube,
                profile.tiktok,
                profile.website,
                profile.avatar,
                profile.logo,
                profile.background_music,
                profile.enable_background_music,
                timestamp(profile.created_at),
                timestamp(profile.updated_at),
            ],
        )?;
        Ok(())
    }

    fn select_profile(conn: &Connection) -> rusqlite::Result<Option<Profile>> {
        conn.query_row(
            &format!("SELECT {PROFILE_COLUMNS} FROM profile ORDER BY created_at LIMIT 1"),
            [],
            profile_from_row,
        )
        .optional()
    }

    fn select_project(conn: &Connection, id: &str) -> rusqlite::Result<Option<Project>> {
        conn.query_row(
            &format!("SELECT {PROJECT_COLUMNS} FROM project WHERE id = ?1"),
            [id],
            project_from_row,
        )
        .optional()
    }
}

impl PortfolioStore for SqliteStore {
    fn get_profile(&self) -> Result<Option<Profile>> {
        Self::select_profile(&self.conn()).map_err(Error::storage)
    }

    fn upsert_profile(&self, update: ProfileUpdate) -> Result<Profile> {
        // one guard across read and write so concurrent first saves share a row
        let conn = self.conn();
        let existing = Self::select_profile(&conn).map_err(Error::storage)?;
        let now = Utc::now();

        let profile = match existing {
            Some(mut profile) => {
                profile.apply(update, now);
                profile
            }
            None => {
                info!("Creating site profile");
                Profile::from_update(Uuid::new_v4().to_string(), update, now)
            }
        };

        Self::write_profile(&conn, &profile).map_err(Error::storage)?;
        debug!("Saved profile {}", profile.id);
        Ok(profile)
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {PROJECT_COLUMNS} FROM project ORDER BY created_at DESC"
            ))
            .map_err(Error::storage)?;
        let projects = stmt
            .query_map([], project_from_row)
            .map_err(Error::storage)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::storage)?;
        Ok(projects)
    }

    fn get_project(&self, id: &str) -> Result<Option<Project>> {
        Self::select_project(&self.conn(), id).map_err(Error::storage)
    }

    fn create_project(&self, input: ProjectInput) -> Result<Project> {
        let project = Project::new(Uuid::new_v4().to_string(), input, Utc::now());
        self.conn()
            .execute(
                &format!(
                    "INSERT INTO project ({PROJECT_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
                ),
                params![
                    project.id,
                    project.title,
                    project.description,
                    project.image,
                    project.url,
                    project.github_url,
                    project.tech_stack,
                    project.featured,
                    timestamp(project.created_at),
                    timestamp(project.updated_at),
                ],
            )
            .map_err(Error::storage)?;
        info!("Created project {} ({})", project.id, project.title);
        Ok(project)
    }

    fn update_project(&self, id: &str, input: ProjectInput) -> Result<Project> {
        let conn = self.conn();
        let mut project = Self::select_project(&conn, id)
            .map_err(Error::storage)?
            .ok_or_else(|| Error::project_not_found(id))?;

        project.apply(input, Utc::now());
        conn.execute(
            "UPDATE project SET title = ?2, description = ?3, image = ?4, url = ?5,
                 github_url = ?6, tech_stack = ?7, featured = ?8, updated_at = ?9
             WHERE id = ?1",
            params![
                project.id,
                project.title,
                project.description,
                project.image,
                project.url,
                project.github_url,
                project.tech_stack,
                project.featured,
                timestamp(project.updated_at),
            ],
        )
        .map_err(Error::storage)?;
        info!("Updated project {}", project.id);
        Ok(project)
    }

    fn delete_project(&self, id: &str) -> Result<()> {
        let removed = self
            .conn()
            .execute("DELETE FROM project WHERE id = ?1", [id])
            .map_err(Error::storage)?;
        if removed == 0 {
            debug!("Project {} already gone", id);
        } else {
            info!("Deleted project {}", id);
        }
        Ok(())
    }
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        name: row.get(1)?,
        bio: row.get(2)?,
        email: row.get(3)?,
        profession: row.get(4)?,
        province: row.get(5)?,
        school_or_company: row.get(6)?,
        gender: row.get(7)?,
        age: row.get(8)?,
        phone: row.get(9)?,
        github: row.get(10)?,
        linkedin: row.get(11)?,
        twitter: row.get(12)?,
        facebook: row.get(13)?,
        youtube: row.get(14)?,
        tiktok: row.get(15)?,
        website: row.get(16)?,
        avatar: row.get(17)?,
        logo: row.get(18)?,
        background_music: row.get(19)?,
        enable_background_music: row.get(20)?,
        created_at: parse_timestamp(row, 21)?,
        updated_at: parse_timestamp(row, 22)?,
    })
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        image: row.get(3)?,
        url: row.get(4)?,
        github_url: row.get(5)?,
        tech_stack: row.get(6)?,
        featured: row.get(7)?,
        created_at: parse_timestamp(row, 8)?,
        updated_at: parse_timestamp(row, 9)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn profile_update(name: &str) -> ProfileUpdate {
        ProfileUpdate {
            name: name.to_string(),
            email: "owner@example.com".to_string(),
            age: Some("31".to_string()),
            background_music: Some("https://youtu.be/9bZkp7q19f0".to_string()),
            enable_background_music: true,
            ..Default::default()
        }
    }

    fn project_input(title: &str) -> ProjectInput {
        ProjectInput {
            title: title.to_string(),
            description: "Built with care".to_string(),
            tech_stack: Some("Rust, SQLite".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_database() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get_profile().unwrap().is_none());
        assert!(store.list_projects().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_profile_keeps_single_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        let first = store.upsert_profile(profile_update("First")).unwrap();
        let second = store.upsert_profile(profile_update("Second")).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);

        let stored = store.get_profile().unwrap().unwrap();
        assert_eq!(stored.name, "Second");
        assert_eq!(stored.age, Some(31));
        assert!(stored.enable_background_music);
    }

    #[test]
    fn test_concurrent_first_saves_share_one_row() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .upsert_profile(profile_update(&format!("Owner {i}")))
                        .unwrap()
                        .id
                })
            })
            .collect();

        let ids: HashSet<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(ids.len(), 1);

        let rows: i64 = store
            .conn()
            .query_row("SELECT COUNT(*) FROM profile", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_project_crud() {
        let store = SqliteStore::open_in_memory().unwrap();
        let created = store.create_project(project_input("Folio")).unwrap();

        let fetched = store.get_project(&created.id).unwrap().unwrap();
        assert_eq!(fetched, created);

        let updated = store
            .update_project(
                &created.id,
                ProjectInput {
                    featured: true,
                    ..project_input("Folio v2")
                },
            )
            .unwrap();
        assert_eq!(updated.title, "Folio v2");
        assert!(updated.featured);
        assert_eq!(updated.created_at, created.created_at);

        store.delete_project(&created.id).unwrap();
        assert!(store.get_project(&created.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_project_is_ok() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.delete_project("does-not-exist").unwrap();
    }

    #[test]
    fn test_update_missing_project_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store
            .update_project("nope", project_input("X"))
            .unwrap_err();
        assert_eq!(err.kind(), folio_core::ErrorKind::NotFound);
    }

    #[test]
    fn test_projects_newest_first() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.create_project(project_input("A")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = store.create_project(project_input("B")).unwrap();

        let ids: Vec<_> = store
            .list_projects()
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("folio.db");
        let store = SqliteStore::open(&path).unwrap();
        store.create_project(project_input("Persisted")).unwrap();
        drop(store);

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.list_projects().unwrap().len(), 1);
    }
}
