//! SQLite entity store
//!
//! Durable implementation of the cat, mission and target store traits. One
//! connection is shared behind a mutex and every call runs on the blocking
//! pool. Operations touching more than one row run in a transaction; the
//! schema carries the same cascade rules as the memory store.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use shared::{component_debug, component_info, Cat, CatId, Component, Mission, MissionId, Target, TargetId};

use crate::error::{AgencyError, AgencyResult};
use crate::state::{missing_cat, missing_mission, missing_target};
use crate::traits::{CatStore, MissionStore, NewCat, NewTarget, TargetStore};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS cats (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        years_experience INTEGER NOT NULL,
        breed TEXT NOT NULL,
        salary REAL NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS missions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        cat_id INTEGER REFERENCES cats(id) ON DELETE SET NULL,
        complete INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_missions_cat_id ON missions(cat_id);
    CREATE TABLE IF NOT EXISTS targets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        mission_id INTEGER NOT NULL REFERENCES missions(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        country TEXT NOT NULL,
        notes TEXT NOT NULL DEFAULT '',
        complete INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_targets_mission_id ON targets(mission_id);
";

const CAT_COLUMNS: &str = "id, name, years_experience, breed, salary, created_at, updated_at";
const MISSION_COLUMNS: &str = "id, cat_id, complete, created_at, updated_at";
const TARGET_COLUMNS: &str = "id, mission_id, name, country, notes, complete, created_at, updated_at";

/// Real SQLite store implementation
#[derive(Clone)]
pub struct RealSqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl RealSqliteStore {
    /// Open (or create) the database file at `path` and apply the schema
    pub fn open(path: impl AsRef<Path>) -> AgencyResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(|e| AgencyError::internal_with(format!("failed to open database {}", path.display()), e))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let store = Self::with_connection(conn)?;
        component_info!(Component::Store, "💾 SQLite store opened at {}", path.display());
        Ok(store)
    }

    /// Private in-memory database, gone when the last clone is dropped
    pub fn open_in_memory() -> AgencyResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> AgencyResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `op` against the connection on the blocking pool
    async fn call<T, F>(&self, op: F) -> AgencyResult<T>
    where
        F: FnOnce(&mut Connection) -> AgencyResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|_| AgencyError::internal("database connection lock poisoned"))?;
            op(&mut conn)
        })
        .await
        .map_err(|e| AgencyError::internal_with("database task failed", e))?
    }
}

fn row_id(row: &Row<'_>, index: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(index)? as u64)
}

fn cat_from_row(row: &Row<'_>) -> rusqlite::Result<Cat> {
    Ok(Cat {
        id: CatId(row_id(row, 0)?),
        name: row.get(1)?,
        years_experience: row.get(2)?,
        breed: row.get(3)?,
        salary: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn target_from_row(row: &Row<'_>) -> rusqlite::Result<Target> {
    Ok(Target {
        id: TargetId(row_id(row, 0)?),
        mission_id: MissionId(row_id(row, 1)?),
        name: row.get(2)?,
        country: row.get(3)?,
        notes: row.get(4)?,
        complete: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Mission row without its relations
fn mission_from_row(row: &Row<'_>) -> rusqlite::Result<Mission> {
    Ok(Mission {
        id: MissionId(row_id(row, 0)?),
        cat_id: row.get::<_, Option<i64>>(1)?.map(|id| CatId(id as u64)),
        complete: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
        cat: None,
        targets: Vec::new(),
    })
}

fn find_cat(conn: &Connection, id: CatId) -> AgencyResult<Option<Cat>> {
    let sql = format!("SELECT {CAT_COLUMNS} FROM cats WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id.value() as i64], cat_from_row).optional()?)
}

fn load_cat(conn: &Connection, id: CatId) -> AgencyResult<Cat> {
    find_cat(conn, id)?.ok_or_else(|| missing_cat(id))
}

fn load_targets(conn: &Connection, mission_id: MissionId) -> AgencyResult<Vec<Target>> {
    let sql = format!("SELECT {TARGET_COLUMNS} FROM targets WHERE mission_id = ?1 ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let targets = stmt
        .query_map(params![mission_id.value() as i64], target_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(targets)
}

/// Attach the assigned cat and the targets
fn hydrate(conn: &Connection, mut mission: Mission) -> AgencyResult<Mission> {
    mission.cat = match mission.cat_id {
        Some(cat_id) => find_cat(conn, cat_id)?,
        None => None,
    };
    mission.targets = load_targets(conn, mission.id)?;
    Ok(mission)
}

fn load_mission(conn: &Connection, id: MissionId) -> AgencyResult<Mission> {
    let sql = format!("SELECT {MISSION_COLUMNS} FROM missions WHERE id = ?1");
    let mission = conn
        .query_row(&sql, params![id.value() as i64], mission_from_row)
        .optional()?
        .ok_or_else(|| missing_mission(id))?;
    hydrate(conn, mission)
}

fn mission_exists(conn: &Connection, id: MissionId) -> AgencyResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM missions WHERE id = ?1", params![id.value() as i64], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

fn insert_target(conn: &Connection, mission_id: MissionId, target: NewTarget) -> AgencyResult<Target> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO targets (mission_id, name, country, notes, complete, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)",
        params![mission_id.value() as i64, target.name, target.country, target.notes, now],
    )?;
    Ok(Target {
        id: TargetId(conn.last_insert_rowid() as u64),
        mission_id,
        name: target.name,
        country: target.country,
        notes: target.notes,
        complete: false,
        created_at: now,
        updated_at: now,
    })
}

#[async_trait]
impl CatStore for RealSqliteStore {
    async fn create_cat(&self, cat: NewCat) -> AgencyResult<Cat> {
        self.call(move |conn| {
            let now = Utc::now();
            conn.execute(
                "INSERT INTO cats (name, years_experience, breed, salary, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![cat.name, cat.years_experience, cat.breed, cat.salary, now],
            )?;
            let cat = Cat {
                id: CatId(conn.last_insert_rowid() as u64),
                name: cat.name,
                years_experience: cat.years_experience,
                breed: cat.breed,
                salary: cat.salary,
                created_at: now,
                updated_at: now,
            };
            component_debug!(Component::Store, cat_id = %cat.id, "Inserted cat {}", cat.id);
            Ok(cat)
        })
        .await
    }

    async fn list_cats(&self) -> AgencyResult<Vec<Cat>> {
        self.call(|conn| {
            let sql = format!("SELECT {CAT_COLUMNS} FROM cats ORDER BY id");
            let mut stmt = conn.prepare(&sql)?;
            let cats = stmt.query_map([], cat_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(cats)
        })
        .await
    }

    async fn get_cat(&self, id: CatId) -> AgencyResult<Cat> {
        self.call(move |conn| load_cat(conn, id)).await
    }

    async fn update_cat(&self, cat: &Cat) -> AgencyResult<()> {
        let cat = cat.clone();
        self.call(move |conn| {
            let changed = conn.execute(
                "UPDATE cats SET name = ?1, years_experience = ?2, breed = ?3, salary = ?4, updated_at = ?5
                 WHERE id = ?6",
                params![cat.name, cat.years_experience, cat.breed, cat.salary, Utc::now(), cat.id.value() as i64],
            )?;
            if changed == 0 {
                return Err(missing_cat(cat.id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_cat(&self, id: CatId) -> AgencyResult<()> {
        self.call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "UPDATE missions SET cat_id = NULL, updated_at = ?1 WHERE cat_id = ?2",
                params![Utc::now(), id.value() as i64],
            )?;
            let deleted = tx.execute("DELETE FROM cats WHERE id = ?1", params![id.value() as i64])?;
            if deleted == 0 {
                return Err(missing_cat(id));
            }
            tx.commit()?;
            component_debug!(Component::Store, cat_id = %id, "Deleted cat {}", id);
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl MissionStore for RealSqliteStore {
    async fn create_mission(&self, targets: Vec<NewTarget>) -> AgencyResult<Mission> {
        self.call(move |conn| {
            let tx = conn.transaction()?;
            let now = Utc::now();
            tx.execute(
                "INSERT INTO missions (cat_id, complete, created_at, updated_at) VALUES (NULL, 0, ?1, ?1)",
                params![now],
            )?;
            let mission_id = MissionId(tx.last_insert_rowid() as u64);
            let targets = targets
                .into_iter()
                .map(|target| insert_target(&tx, mission_id, target))
                .collect::<AgencyResult<Vec<_>>>()?;
            tx.commit()?;

            component_debug!(Component::Store, mission_id = %mission_id, "Inserted mission {}", mission_id);
            Ok(Mission {
                id: mission_id,
                cat_id: None,
                complete: false,
                created_at: now,
                updated_at: now,
                cat: None,
                targets,
            })
        })
        .await
    }

    async fn list_missions(&self) -> AgencyResult<Vec<Mission>> {
        self.call(|conn| {
            let sql = format!("SELECT {MISSION_COLUMNS} FROM missions ORDER BY id");
            let mut stmt = conn.prepare(&sql)?;
            let missions = stmt
                .query_map([], mission_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            missions.into_iter().map(|mission| hydrate(conn, mission)).collect()
        })
        .await
    }

    async fn get_mission(&self, id: MissionId) -> AgencyResult<Mission> {
        self.call(move |conn| load_mission(conn, id)).await
    }

    async fn update_mission(&self, mission: &Mission) -> AgencyResult<()> {
        let (id, cat_id, complete) = (mission.id, mission.cat_id, mission.complete);
        self.call(move |conn| {
            let tx = conn.transaction()?;
            if let Some(cat_id) = cat_id {
                load_cat(&tx, cat_id)?;
            }
            let changed = tx.execute(
                "UPDATE missions SET cat_id = ?1, complete = ?2, updated_at = ?3 WHERE id = ?4",
                params![cat_id.map(|id| id.value() as i64), complete, Utc::now(), id.value() as i64],
            )?;
            if changed == 0 {
                return Err(missing_mission(id));
            }
            tx.commit()?;
            Ok(())
        })
        .await
    }

    async fn delete_mission(&self, id: MissionId) -> AgencyResult<()> {
        self.call(move |conn| {
            let deleted = conn.execute("DELETE FROM missions WHERE id = ?1", params![id.value() as i64])?;
            if deleted == 0 {
                return Err(missing_mission(id));
            }
            component_debug!(Component::Store, mission_id = %id, "Deleted mission {} and its targets", id);
            Ok(())
        })
        .await
    }

    async fn get_active_mission_by_cat(&self, cat_id: CatId) -> AgencyResult<Option<Mission>> {
        self.call(move |conn| {
            let sql = format!(
                "SELECT {MISSION_COLUMNS} FROM missions WHERE cat_id = ?1 AND complete = 0 ORDER BY id LIMIT 1"
            );
            conn.query_row(&sql, params![cat_id.value() as i64], mission_from_row)
                .optional()?
                .map(|mission| hydrate(conn, mission))
                .transpose()
        })
        .await
    }
}

#[async_trait]
impl TargetStore for RealSqliteStore {
    async fn create_target(&self, mission_id: MissionId, target: NewTarget) -> AgencyResult<Target> {
        self.call(move |conn| {
            let tx = conn.transaction()?;
            if !mission_exists(&tx, mission_id)? {
                return Err(missing_mission(mission_id));
            }
            let target = insert_target(&tx, mission_id, target)?;
            tx.commit()?;
            Ok(target)
        })
        .await
    }

    async fn get_target(&self, id: TargetId) -> AgencyResult<Target> {
        self.call(move |conn| {
            let sql = format!("SELECT {TARGET_COLUMNS} FROM targets WHERE id = ?1");
            conn.query_row(&sql, params![id.value() as i64], target_from_row)
                .optional()?
                .ok_or_else(|| missing_target(id))
        })
        .await
    }

    async fn update_target(&self, target: &Target) -> AgencyResult<()> {
        let (id, notes, complete) = (target.id, target.notes.clone(), target.complete);
        self.call(move |conn| {
            let changed = conn.execute(
                "UPDATE targets SET notes = ?1, complete = ?2, updated_at = ?3 WHERE id = ?4",
                params![notes, complete, Utc::now(), id.value() as i64],
            )?;
            if changed == 0 {
                return Err(missing_target(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_target(&self, id: TargetId) -> AgencyResult<()> {
        self.call(move |conn| {
            let deleted = conn.execute("DELETE FROM targets WHERE id = ?1", params![id.value() as i64])?;
            if deleted == 0 {
                return Err(missing_target(id));
            }
            Ok(())
        })
        .await
    }

    async fn count_targets_by_mission(&self, mission_id: MissionId) -> AgencyResult<usize> {
        self.call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM targets WHERE mission_id = ?1",
                params![mission_id.value() as i64],
                |row| row.get(0),
            )?;
            Ok(count as usize)
        })
        .await
    }
}
