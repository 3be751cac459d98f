//! [`SqliteStore`]: the SQLite implementation of [`RosterStore`].

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{OptionalExtension as _, types::Value};

use roster_core::{
  Error as RosterError, Result as RosterResult,
  area::Area,
  association::{MemberCompetence, MemberProject, ProjectCompetence},
  competence::Competence,
  member::Member,
  project::{NewProject, Project},
  store::RosterStore,
};

use crate::{
  Error, Result,
  encode::{RawCompetence, RawMember, RawProject, decode_area, encode_date},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster store backed by a single SQLite file.
///
/// One background thread owns the connection; concurrent callers queue for
/// it. Cloning shares the underlying connection.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

/// Wrap a crate-local error as a storage fault carrying `message`.
fn storage<E: Into<Error>>(message: &'static str) -> impl FnOnce(E) -> RosterError {
  move |e| {
    let cause: Error = e.into();
    RosterError::storage(message, cause)
  }
}

fn text(s: &str) -> Value { Value::Text(s.to_owned()) }

/// Escape `term` so `LIKE ... ESCAPE '\'` matches it literally.
fn escape_like(term: &str) -> String {
  term
    .replace('\\', "\\\\")
    .replace('%', "\\%")
    .replace('_', "\\_")
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run one data-modifying statement and return the affected row count.
  async fn execute(&self, sql: &'static str, params: Vec<Value>) -> Result<usize> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(sql, rusqlite::params_from_iter(params))?)
      })
      .await?;
    Ok(changed)
  }

  /// Run a query and map every row with `map`, preserving store order.
  async fn query<T, F>(
    &self,
    sql: &'static str,
    params: Vec<Value>,
    map: F,
  ) -> Result<Vec<T>>
  where
    T: Send + 'static,
    F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), map)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// Run a keyed query that matches at most one row.
  async fn query_one<T, F>(
    &self,
    sql: &'static str,
    params: Vec<Value>,
    map: F,
  ) -> Result<Option<T>>
  where
    T: Send + 'static,
    F: FnOnce(&rusqlite::Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let row = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(sql, rusqlite::params_from_iter(params), map)
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }

  async fn members_where(
    &self,
    sql: &'static str,
    params: Vec<Value>,
    message: &'static str,
  ) -> RosterResult<Vec<Member>> {
    self
      .query(sql, params, RawMember::from_row)
      .await
      .map_err(storage(message))?
      .into_iter()
      .map(RawMember::into_member)
      .collect::<Result<_>>()
      .map_err(storage(message))
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  // ── Areas ─────────────────────────────────────────────────────────────────

  async fn create_area(&self, name: &str) -> RosterResult<Area> {
    let area = Area::new(name)?;

    self
      .execute("INSERT INTO area (area) VALUES (?1)", vec![text(area.name())])
      .await
      .map_err(storage("failed to create area"))?;

    tracing::debug!(area = area.name(), "area created");
    Ok(area)
  }

  async fn get_area(&self, name: &str) -> RosterResult<Area> {
    let found = self
      .query_one(
        "SELECT area FROM area WHERE area = ?1",
        vec![text(name)],
        |row| row.get::<_, String>(0),
      )
      .await
      .map_err(storage("failed to fetch area"))?
      .ok_or_else(|| RosterError::not_found(format!("there is no area named {name:?}")))?;

    decode_area(found).map_err(storage("failed to fetch area"))
  }

  async fn delete_area(&self, area: &Area) -> RosterResult<()> {
    self
      .execute("DELETE FROM area WHERE area = ?1", vec![text(area.name())])
      .await
      .map_err(storage("failed to delete area"))?;
    Ok(())
  }

  // ── Competences ───────────────────────────────────────────────────────────

  async fn create_competence(
    &self,
    name: &str,
    area: &Area,
  ) -> RosterResult<Competence> {
    let competence = Competence::new(name, area.clone())?;

    self
      .get_area(area.name())
      .await
      .map_err(|e| e.or_storage("failed to resolve the competence's area"))?;

    self
      .execute(
        "INSERT INTO competence (competence, area) VALUES (?1, ?2)",
        vec![text(competence.name()), text(area.name())],
      )
      .await
      .map_err(storage("failed to create competence"))?;

    tracing::debug!(competence = competence.name(), area = area.name(), "competence created");
    Ok(competence)
  }

  async fn get_competence(&self, name: &str) -> RosterResult<Competence> {
    const MESSAGE: &str = "failed to fetch competence";

    let raw = self
      .query_one(
        "SELECT competence, area FROM competence WHERE competence = ?1",
        vec![text(name)],
        RawCompetence::from_row,
      )
      .await
      .map_err(storage(MESSAGE))?
      .ok_or_else(|| {
        RosterError::not_found(format!("there is no competence named {name:?}"))
      })?;

    let area = self
      .get_area(&raw.area)
      .await
      .map_err(|e| e.or_storage(MESSAGE))?;

    raw.into_competence(area).map_err(storage(MESSAGE))
  }

  async fn list_competences_by_area(
    &self,
    area: &Area,
  ) -> RosterResult<Vec<Competence>> {
    const MESSAGE: &str = "failed to list competences by area";

    self
      .query(
        "SELECT competence, area FROM competence WHERE area = ?1",
        vec![text(area.name())],
        RawCompetence::from_row,
      )
      .await
      .map_err(storage(MESSAGE))?
      .into_iter()
      .map(|raw| raw.into_competence(area.clone()))
      .collect::<Result<_>>()
      .map_err(storage(MESSAGE))
  }

  async fn delete_competence(&self, competence: &Competence) -> RosterResult<()> {
    self
      .execute(
        "DELETE FROM competence WHERE competence = ?1",
        vec![text(competence.name())],
      )
      .await
      .map_err(storage("failed to delete competence"))?;
    Ok(())
  }

  // ── Members ───────────────────────────────────────────────────────────────

  async fn create_member(
    &self,
    ist_id: i64,
    name: &str,
    available_date: Option<NaiveDate>,
  ) -> RosterResult<Member> {
    let member = Member::new(ist_id, name, available_date)?;

    self
      .execute(
        "INSERT INTO member (ist_id, name, available_date) VALUES (?1, ?2, ?3)",
        vec![
          Value::Integer(member.ist_id()),
          text(member.name()),
          Value::Text(encode_date(member.available_date())),
        ],
      )
      .await
      .map_err(storage("failed to create member"))?;

    tracing::debug!(ist_id = member.ist_id(), "member created");
    Ok(member)
  }

  async fn get_member(&self, ist_id: i64) -> RosterResult<Member> {
    self
      .query_one(
        "SELECT ist_id, name, available_date FROM member WHERE ist_id = ?1",
        vec![Value::Integer(ist_id)],
        RawMember::from_row,
      )
      .await
      .map_err(storage("failed to fetch member"))?
      .ok_or_else(|| RosterError::not_found(format!("there is no member with IST ID {ist_id}")))?
      .into_member()
      .map_err(storage("failed to fetch member"))
  }

  async fn search_members(&self, term: &str) -> RosterResult<Vec<Member>> {
    self
      .members_where(
        "SELECT ist_id, name, available_date FROM member
         WHERE name LIKE '%' || ?1 || '%' ESCAPE '\\'",
        vec![text(&escape_like(term))],
        "failed to search members by name",
      )
      .await
  }

  async fn list_members(&self) -> RosterResult<Vec<Member>> {
    self
      .members_where(
        "SELECT ist_id, name, available_date FROM member",
        vec![],
        "failed to list members",
      )
      .await
  }

  async fn update_member(&self, member: &Member) -> RosterResult<()> {
    self
      .execute(
        "UPDATE member SET name = ?1, available_date = ?2 WHERE ist_id = ?3",
        vec![
          text(member.name()),
          Value::Text(encode_date(member.available_date())),
          Value::Integer(member.ist_id()),
        ],
      )
      .await
      .map_err(storage("failed to update member"))?;

    tracing::debug!(ist_id = member.ist_id(), "member updated");
    Ok(())
  }

  async fn delete_member(&self, member: &Member) -> RosterResult<()> {
    self
      .execute(
        "DELETE FROM member WHERE ist_id = ?1",
        vec![Value::Integer(member.ist_id())],
      )
      .await
      .map_err(storage("failed to delete member"))?;
    Ok(())
  }

  // ── Projects ──────────────────────────────────────────────────────────────

  async fn create_project(
    &self,
    name: &str,
    begin_date: Option<NaiveDate>,
  ) -> RosterResult<Project> {
    let draft = NewProject::new(name, begin_date)?;

    let name_val = text(draft.name());
    let date_val = draft
      .begin_date()
      .map_or(Value::Null, |d| Value::Text(encode_date(d)));

    let project_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO project (name, begin_date) VALUES (?1, ?2)",
          rusqlite::params_from_iter([name_val, date_val]),
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(storage("failed to create project"))?;

    tracing::debug!(project_id, name = draft.name(), "project created");
    draft
      .with_id(project_id)
      .map_err(storage("failed to create project"))
  }

  async fn get_project_by_name(&self, name: &str) -> RosterResult<Project> {
    self
      .query_one(
        "SELECT project_id, name, begin_date FROM project WHERE name = ?1",
        vec![text(name)],
        RawProject::from_row,
      )
      .await
      .map_err(storage("failed to fetch project by name"))?
      .ok_or_else(|| RosterError::not_found(format!("there is no project named {name:?}")))?
      .into_project()
      .map_err(storage("failed to fetch project by name"))
  }

  async fn get_project_by_id(&self, project_id: i64) -> RosterResult<Project> {
    self
      .query_one(
        "SELECT project_id, name, begin_date FROM project WHERE project_id = ?1",
        vec![Value::Integer(project_id)],
        RawProject::from_row,
      )
      .await
      .map_err(storage("failed to fetch project by id"))?
      .ok_or_else(|| {
        RosterError::not_found(format!("there is no project with id {project_id}"))
      })?
      .into_project()
      .map_err(storage("failed to fetch project by id"))
  }

  async fn list_projects(&self) -> RosterResult<Vec<Project>> {
    self
      .query(
        "SELECT project_id, name, begin_date FROM project",
        vec![],
        RawProject::from_row,
      )
      .await
      .map_err(storage("failed to list projects"))?
      .into_iter()
      .map(RawProject::into_project)
      .collect::<Result<_>>()
      .map_err(storage("failed to list projects"))
  }

  async fn rename_project(
    &self,
    project: &Project,
    new_name: &str,
  ) -> RosterResult<Project> {
    if new_name == project.name() {
      return Ok(project.clone());
    }
    let renamed = project.renamed(new_name)?;

    self
      .execute(
        "UPDATE project SET name = ?1 WHERE name = ?2",
        vec![text(renamed.name()), text(project.name())],
      )
      .await
      .map_err(storage("failed to rename project"))?;

    tracing::debug!(from = project.name(), to = renamed.name(), "project renamed");
    Ok(renamed)
  }

  async fn delete_project(&self, project: &Project) -> RosterResult<()> {
    self
      .execute(
        "DELETE FROM project WHERE project_id = ?1",
        vec![Value::Integer(project.project_id())],
      )
      .await
      .map_err(storage("failed to delete project"))?;
    Ok(())
  }

  // ── Member ↔ Competence ───────────────────────────────────────────────────

  async fn add_member_competence(
    &self,
    member: &Member,
    competence: &Competence,
    rating: f64,
  ) -> RosterResult<MemberCompetence> {
    let link = MemberCompetence::new(member.clone(), competence.clone(), rating)?;

    self
      .execute(
        "INSERT INTO member_competence (ist_id, competence, rating)
         VALUES (?1, ?2, ?3)",
        vec![
          Value::Integer(member.ist_id()),
          text(competence.name()),
          Value::Real(link.rating()),
        ],
      )
      .await
      .map_err(storage("failed to add competence to member"))?;

    Ok(link)
  }

  async fn get_member_competence(
    &self,
    member: &Member,
    competence: &Competence,
  ) -> RosterResult<MemberCompetence> {
    let rating: f64 = self
      .query_one(
        "SELECT rating FROM member_competence WHERE ist_id = ?1 AND competence = ?2",
        vec![Value::Integer(member.ist_id()), text(competence.name())],
        |row| row.get(0),
      )
      .await
      .map_err(storage("failed to fetch member competence"))?
      .ok_or_else(|| {
        RosterError::not_found(format!(
          "member {} has no competence {:?}",
          member.ist_id(),
          competence.name()
        ))
      })?;

    MemberCompetence::new(member.clone(), competence.clone(), rating)
      .map_err(storage("failed to fetch member competence"))
  }

  async fn delete_member_competence(&self, link: &MemberCompetence) -> RosterResult<()> {
    self
      .execute(
        "DELETE FROM member_competence WHERE ist_id = ?1 AND competence = ?2",
        vec![
          Value::Integer(link.member().ist_id()),
          text(link.competence().name()),
        ],
      )
      .await
      .map_err(storage("failed to remove competence from member"))?;
    Ok(())
  }

  // ── Project ↔ Competence ──────────────────────────────────────────────────

  async fn add_project_competence(
    &self,
    project: &Project,
    competence: &Competence,
  ) -> RosterResult<ProjectCompetence> {
    self
      .execute(
        "INSERT INTO project_competence (project_id, competence) VALUES (?1, ?2)",
        vec![Value::Integer(project.project_id()), text(competence.name())],
      )
      .await
      .map_err(storage("failed to add competence to project"))?;

    Ok(ProjectCompetence::new(project.clone(), competence.clone()))
  }

  async fn delete_project_competence(
    &self,
    link: &ProjectCompetence,
  ) -> RosterResult<()> {
    self
      .execute(
        "DELETE FROM project_competence WHERE project_id = ?1 AND competence = ?2",
        vec![
          Value::Integer(link.project().project_id()),
          text(link.competence().name()),
        ],
      )
      .await
      .map_err(storage("failed to remove competence from project"))?;
    Ok(())
  }

  // ── Member ↔ Project ──────────────────────────────────────────────────────

  async fn add_member_to_project(
    &self,
    member: &Member,
    project: &Project,
    competences: &[Competence],
  ) -> RosterResult<MemberProject> {
    let link =
      MemberProject::new(member.clone(), project.clone(), competences.to_vec())?;

    let tuples = vec!["(?, ?, ?)"; competences.len()].join(", ");
    let sql = format!(
      "INSERT INTO member_project_competence (ist_id, project_id, competence)
       VALUES {tuples}"
    );
    let params: Vec<Value> = competences
      .iter()
      .flat_map(|c| {
        [
          Value::Integer(member.ist_id()),
          Value::Integer(project.project_id()),
          text(c.name()),
        ]
      })
      .collect();

    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params_from_iter(params))?;
        Ok(())
      })
      .await
      .map_err(storage("failed to add member to project"))?;

    tracing::debug!(
      ist_id = member.ist_id(),
      project_id = project.project_id(),
      competences = competences.len(),
      "member added to project"
    );
    Ok(link)
  }

  async fn get_member_with_project(
    &self,
    ist_id: i64,
    project_name: &str,
  ) -> RosterResult<Option<MemberProject>> {
    const MESSAGE: &str = "failed to fetch member with project";

    let member = self
      .get_member(ist_id)
      .await
      .map_err(|e| e.or_storage(MESSAGE))?;
    let project = self
      .get_project_by_name(project_name)
      .await
      .map_err(|e| e.or_storage(MESSAGE))?;

    let names: Vec<String> = self
      .query(
        "SELECT competence FROM member_project_competence
         WHERE ist_id = ?1 AND project_id = ?2",
        vec![
          Value::Integer(member.ist_id()),
          Value::Integer(project.project_id()),
        ],
        |row| row.get(0),
      )
      .await
      .map_err(storage(MESSAGE))?;

    if names.is_empty() {
      return Ok(None);
    }

    let mut competences = Vec::with_capacity(names.len());
    for name in &names {
      let competence = self
        .get_competence(name)
        .await
        .map_err(|e| e.or_storage(MESSAGE))?;
      competences.push(competence);
    }

    Ok(Some(MemberProject::new(member, project, competences)?))
  }

  async fn remove_member_from_project(&self, link: &MemberProject) -> RosterResult<()> {
    self
      .execute(
        "DELETE FROM member_project_competence WHERE ist_id = ?1 AND project_id = ?2",
        vec![
          Value::Integer(link.member().ist_id()),
          Value::Integer(link.project().project_id()),
        ],
      )
      .await
      .map_err(storage("failed to remove member from project"))?;
    Ok(())
  }
}
