//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use roster_core::{
  ErrorKind,
  area::Area,
  member::UNSET_AVAILABLE_DATE,
  store::RosterStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Count rows in a table through the raw connection.
async fn count(s: &SqliteStore, table: &'static str) -> i64 {
  s.conn
    .call(move |conn| {
      Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| {
        r.get(0)
      })?)
    })
    .await
    .unwrap()
}

// ─── Areas ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_area() {
  let s = store().await;
  let area = s.create_area("Engineering").await.unwrap();
  assert_eq!(area.name(), "Engineering");

  let fetched = s.get_area("Engineering").await.unwrap();
  assert_eq!(fetched, area);
}

#[tokio::test]
async fn get_missing_area_is_not_found() {
  let s = store().await;
  let err = s.get_area("Nowhere").await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn duplicate_area_is_a_storage_error() {
  let s = store().await;
  s.create_area("Design").await.unwrap();
  let err = s.create_area("Design").await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Storage);
  assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn empty_area_name_fails_validation() {
  let s = store().await;
  let err = s.create_area("").await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(count(&s, "area").await, 0);
}

// ─── Competences ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn competence_resolves_its_area() {
  let s = store().await;
  let area = s.create_area("Engineering").await.unwrap();
  s.create_competence("Rust", &area).await.unwrap();

  let fetched = s.get_competence("Rust").await.unwrap();
  assert_eq!(fetched.name(), "Rust");
  assert_eq!(fetched.area(), &area);
}

#[tokio::test]
async fn competence_with_missing_area_is_not_found_and_not_written() {
  let s = store().await;
  let ghost = Area::new("Ghost").unwrap();

  let err = s.create_competence("Haunting", &ghost).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
  assert_eq!(count(&s, "competence").await, 0);
}

#[tokio::test]
async fn get_missing_competence_is_not_found() {
  let s = store().await;
  let err = s.get_competence("Alchemy").await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn list_competences_by_area_filters() {
  let s = store().await;
  let eng = s.create_area("Engineering").await.unwrap();
  let design = s.create_area("Design").await.unwrap();
  s.create_competence("Rust", &eng).await.unwrap();
  s.create_competence("SQL", &eng).await.unwrap();
  s.create_competence("Typography", &design).await.unwrap();

  let names: Vec<String> = s
    .list_competences_by_area(&eng)
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.name().to_owned())
    .collect();
  assert_eq!(names.len(), 2);
  assert!(names.contains(&"Rust".to_owned()));
  assert!(names.contains(&"SQL".to_owned()));

  let empty = s.create_area("Empty").await.unwrap();
  assert!(s.list_competences_by_area(&empty).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_an_area_cascades_to_its_competences() {
  let s = store().await;
  let area = s.create_area("Engineering").await.unwrap();
  s.create_competence("Rust", &area).await.unwrap();

  s.delete_area(&area).await.unwrap();
  assert_eq!(count(&s, "competence").await, 0);
}

// ─── Members ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_member_then_get_defaults_date_to_epoch() {
  let s = store().await;
  s.create_member(81234, "Ana Silva", None).await.unwrap();

  let member = s.get_member(81234).await.unwrap();
  assert_eq!(member.name(), "Ana Silva");
  assert_eq!(member.available_date(), UNSET_AVAILABLE_DATE);
}

#[tokio::test]
async fn create_member_keeps_explicit_date() {
  let s = store().await;
  let d = date(2025, 6, 30);
  s.create_member(1, "Rui", Some(d)).await.unwrap();
  assert_eq!(s.get_member(1).await.unwrap().available_date(), d);
}

#[tokio::test]
async fn negative_ist_id_fails_validation_without_insert() {
  let s = store().await;
  let err = s.create_member(-1, "Rui", None).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(count(&s, "member").await, 0);
}

#[tokio::test]
async fn get_missing_member_is_not_found() {
  let s = store().await;
  let err = s.get_member(42).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn search_members_by_substring() {
  let s = store().await;
  s.create_member(1, "Ana Silva", None).await.unwrap();
  s.create_member(2, "Mariana Costa", None).await.unwrap();
  s.create_member(3, "Bruno Dias", None).await.unwrap();

  let found = s.search_members("ana").await.unwrap();
  let mut ids: Vec<i64> = found.iter().map(|m| m.ist_id()).collect();
  ids.sort();
  assert_eq!(ids, vec![1, 2]);

  assert!(s.search_members("zzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn list_members_returns_everyone() {
  let s = store().await;
  assert!(s.list_members().await.unwrap().is_empty());

  s.create_member(1, "Ana", None).await.unwrap();
  s.create_member(2, "Rui", None).await.unwrap();
  assert_eq!(s.list_members().await.unwrap().len(), 2);
}

#[tokio::test]
async fn setters_are_not_durable_until_update() {
  let s = store().await;
  let mut member = s.create_member(5, "Ana", None).await.unwrap();

  member.set_name("Ana Maria").unwrap();
  member.set_available_date(date(2026, 1, 15));
  assert_eq!(s.get_member(5).await.unwrap().name(), "Ana");

  s.update_member(&member).await.unwrap();
  let fetched = s.get_member(5).await.unwrap();
  assert_eq!(fetched.name(), "Ana Maria");
  assert_eq!(fetched.available_date(), date(2026, 1, 15));
}

#[tokio::test]
async fn delete_member_twice_is_fine() {
  let s = store().await;
  let member = s.create_member(9, "Rui", None).await.unwrap();

  s.delete_member(&member).await.unwrap();
  s.delete_member(&member).await.unwrap();
  assert_eq!(s.get_member(9).await.unwrap_err().kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn delete_area_twice_is_fine() {
  let s = store().await;
  let area = s.create_area("Design").await.unwrap();

  s.delete_area(&area).await.unwrap();
  s.delete_area(&area).await.unwrap();
  assert_eq!(s.get_area("Design").await.unwrap_err().kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn delete_competence_twice_is_fine() {
  let s = store().await;
  let area = s.create_area("Engineering").await.unwrap();
  let rust = s.create_competence("Rust", &area).await.unwrap();
  s.create_competence("SQL", &area).await.unwrap();

  s.delete_competence(&rust).await.unwrap();
  s.delete_competence(&rust).await.unwrap();
  assert_eq!(
    s.get_competence("Rust").await.unwrap_err().kind(),
    ErrorKind::NotFound
  );
  assert_eq!(s.list_competences_by_area(&area).await.unwrap().len(), 1);
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
  let s = store().await;
  s.create_member(1, "aXa", None).await.unwrap();
  s.create_member(2, "a_a", None).await.unwrap();
  s.create_member(3, "50% Dias", None).await.unwrap();
  s.create_member(4, "back\\slash", None).await.unwrap();

  let ids = |found: Vec<roster_core::member::Member>| {
    found.iter().map(|m| m.ist_id()).collect::<Vec<_>>()
  };
  assert_eq!(ids(s.search_members("a_a").await.unwrap()), vec![2]);
  assert_eq!(ids(s.search_members("%").await.unwrap()), vec![3]);
  assert_eq!(ids(s.search_members("k\\s").await.unwrap()), vec![4]);
}

// ─── Projects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_project_assigns_positive_id() {
  let s = store().await;
  let d = Some(date(2024, 9, 1));
  let project = s.create_project("Apollo", d).await.unwrap();
  assert!(project.project_id() > 0);

  let fetched = s.get_project_by_id(project.project_id()).await.unwrap();
  assert_eq!(fetched.name(), "Apollo");
  assert_eq!(fetched.begin_date(), d);
}

#[tokio::test]
async fn project_begin_date_may_be_null() {
  let s = store().await;
  s.create_project("Gemini", None).await.unwrap();
  let fetched = s.get_project_by_name("Gemini").await.unwrap();
  assert_eq!(fetched.begin_date(), None);
}

#[tokio::test]
async fn get_missing_project_is_not_found() {
  let s = store().await;
  assert_eq!(
    s.get_project_by_name("Nope").await.unwrap_err().kind(),
    ErrorKind::NotFound
  );
  assert_eq!(
    s.get_project_by_id(77).await.unwrap_err().kind(),
    ErrorKind::NotFound
  );
}

#[tokio::test]
async fn list_projects_returns_every_row() {
  let s = store().await;
  s.create_project("Apollo", None).await.unwrap();
  s.create_project("Gemini", None).await.unwrap();

  let mut names: Vec<String> = s
    .list_projects()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.name().to_owned())
    .collect();
  names.sort();
  assert_eq!(names, vec!["Apollo", "Gemini"]);
}

#[tokio::test]
async fn rename_is_keyed_by_the_old_name() {
  let s = store().await;
  let project = s.create_project("Apollo", None).await.unwrap();

  let renamed = s.rename_project(&project, "Artemis").await.unwrap();
  assert_eq!(renamed.project_id(), project.project_id());
  assert_eq!(renamed.name(), "Artemis");

  assert_eq!(
    s.get_project_by_name("Apollo").await.unwrap_err().kind(),
    ErrorKind::NotFound
  );
  let fetched = s.get_project_by_id(project.project_id()).await.unwrap();
  assert_eq!(fetched.name(), "Artemis");

  let again = s.rename_project(&renamed, "Artemis").await.unwrap();
  assert_eq!(again, renamed);
}

#[tokio::test]
async fn rename_through_a_stale_name_changes_nothing() {
  let s = store().await;
  let project = s.create_project("Apollo", None).await.unwrap();
  s.rename_project(&project, "Artemis").await.unwrap();

  // `project` still carries the old name, which no row matches any more.
  let stale = s.rename_project(&project, "Gemini").await.unwrap();
  assert_eq!(stale.name(), "Gemini");

  let fetched = s.get_project_by_id(project.project_id()).await.unwrap();
  assert_eq!(fetched.name(), "Artemis");
}

#[tokio::test]
async fn rename_to_blank_fails_validation() {
  let s = store().await;
  let project = s.create_project("Apollo", None).await.unwrap();
  let err = s.rename_project(&project, "").await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn delete_project_twice_is_fine() {
  let s = store().await;
  let project = s.create_project("Apollo", None).await.unwrap();
  s.delete_project(&project).await.unwrap();
  s.delete_project(&project).await.unwrap();
  assert_eq!(count(&s, "project").await, 0);
}

// ─── Associations ────────────────────────────────────────────────────────────

#[tokio::test]
async fn member_competence_roundtrip_and_delete() {
  let s = store().await;
  let area = s.create_area("Engineering").await.unwrap();
  let rust = s.create_competence("Rust", &area).await.unwrap();
  let member = s.create_member(1, "Ana", None).await.unwrap();

  let link = s.add_member_competence(&member, &rust, 4.5).await.unwrap();
  assert_eq!(link.rating(), 4.5);
  assert_eq!(link.member(), &member);
  assert_eq!(count(&s, "member_competence").await, 1);

  let fetched = s.get_member_competence(&member, &rust).await.unwrap();
  assert_eq!(fetched, link);

  s.delete_member_competence(&link).await.unwrap();
  s.delete_member_competence(&link).await.unwrap();
  assert_eq!(count(&s, "member_competence").await, 0);
  assert_eq!(
    s.get_member_competence(&member, &rust).await.unwrap_err().kind(),
    ErrorKind::NotFound
  );
}

#[tokio::test]
async fn nan_rating_fails_validation_without_insert() {
  let s = store().await;
  let area = s.create_area("Engineering").await.unwrap();
  let rust = s.create_competence("Rust", &area).await.unwrap();
  let member = s.create_member(1, "Ana", None).await.unwrap();

  let err = s
    .add_member_competence(&member, &rust, f64::NAN)
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(count(&s, "member_competence").await, 0);
}

#[tokio::test]
async fn project_competence_roundtrip_and_delete() {
  let s = store().await;
  let area = s.create_area("Engineering").await.unwrap();
  let rust = s.create_competence("Rust", &area).await.unwrap();
  let project = s.create_project("Apollo", None).await.unwrap();

  let link = s.add_project_competence(&project, &rust).await.unwrap();
  assert_eq!(link.project(), &project);
  assert_eq!(count(&s, "project_competence").await, 1);

  s.delete_project_competence(&link).await.unwrap();
  s.delete_project_competence(&link).await.unwrap();
  assert_eq!(count(&s, "project_competence").await, 0);
}

#[tokio::test]
async fn add_to_project_writes_one_row_per_competence() {
  let s = store().await;
  let area = s.create_area("Engineering").await.unwrap();
  let rust = s.create_competence("Rust", &area).await.unwrap();
  let sql = s.create_competence("SQL", &area).await.unwrap();
  let member = s.create_member(1, "Ana", None).await.unwrap();
  let project = s.create_project("Apollo", None).await.unwrap();

  let link = s
    .add_member_to_project(&member, &project, &[rust.clone(), sql.clone()])
    .await
    .unwrap();
  assert_eq!(link.competences().len(), 2);

  let rows: Vec<(i64, i64, String)> = s
    .conn
    .call(|conn| {
      let mut stmt = conn.prepare(
        "SELECT ist_id, project_id, competence FROM member_project_competence",
      )?;
      let rows = stmt
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      Ok(rows)
    })
    .await
    .unwrap();

  assert_eq!(rows.len(), 2);
  assert!(
    rows
      .iter()
      .all(|(ist, pid, _)| *ist == 1 && *pid == project.project_id())
  );
  let mut names: Vec<&str> = rows.iter().map(|(_, _, c)| c.as_str()).collect();
  names.sort();
  assert_eq!(names, vec!["Rust", "SQL"]);
}

#[tokio::test]
async fn add_to_project_without_competences_fails_validation() {
  let s = store().await;
  let member = s.create_member(1, "Ana", None).await.unwrap();
  let project = s.create_project("Apollo", None).await.unwrap();

  let err = s
    .add_member_to_project(&member, &project, &[])
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(count(&s, "member_project_competence").await, 0);
}

#[tokio::test]
async fn duplicate_assignment_fails_as_one_batch() {
  let s = store().await;
  let area = s.create_area("Engineering").await.unwrap();
  let rust = s.create_competence("Rust", &area).await.unwrap();
  let sql = s.create_competence("SQL", &area).await.unwrap();
  let member = s.create_member(1, "Ana", None).await.unwrap();
  let project = s.create_project("Apollo", None).await.unwrap();

  s.add_member_to_project(&member, &project, &[rust.clone()])
    .await
    .unwrap();

  // `Rust` is already linked, so the whole statement is rejected and `SQL`
  // is not written either.
  let err = s
    .add_member_to_project(&member, &project, &[sql, rust])
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Storage);
  assert_eq!(count(&s, "member_project_competence").await, 1);
}

#[tokio::test]
async fn get_member_with_project_resolves_competences() {
  let s = store().await;
  let area = s.create_area("Engineering").await.unwrap();
  let rust = s.create_competence("Rust", &area).await.unwrap();
  let member = s.create_member(1, "Ana", None).await.unwrap();
  let project = s.create_project("Apollo", None).await.unwrap();
  s.add_member_to_project(&member, &project, &[rust.clone()])
    .await
    .unwrap();

  let link = s
    .get_member_with_project(1, "Apollo")
    .await
    .unwrap()
    .expect("assignment exists");
  assert_eq!(link.member(), &member);
  assert_eq!(link.project(), &project);
  assert_eq!(link.competences(), &[rust]);
}

#[tokio::test]
async fn get_member_with_project_is_none_when_unlinked() {
  let s = store().await;
  s.create_member(1, "Ana", None).await.unwrap();
  s.create_project("Apollo", None).await.unwrap();

  assert!(s.get_member_with_project(1, "Apollo").await.unwrap().is_none());
}

#[tokio::test]
async fn get_member_with_project_propagates_not_found() {
  let s = store().await;
  s.create_project("Apollo", None).await.unwrap();
  let err = s.get_member_with_project(1, "Apollo").await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);

  s.create_member(1, "Ana", None).await.unwrap();
  let err = s.get_member_with_project(1, "Gemini").await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn remove_member_from_project_clears_all_rows() {
  let s = store().await;
  let area = s.create_area("Engineering").await.unwrap();
  let rust = s.create_competence("Rust", &area).await.unwrap();
  let sql = s.create_competence("SQL", &area).await.unwrap();
  let member = s.create_member(1, "Ana", None).await.unwrap();
  let project = s.create_project("Apollo", None).await.unwrap();

  let link = s
    .add_member_to_project(&member, &project, &[rust, sql])
    .await
    .unwrap();
  s.remove_member_from_project(&link).await.unwrap();
  s.remove_member_from_project(&link).await.unwrap();

  assert!(s.get_member_with_project(1, "Apollo").await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_a_member_cascades_to_join_rows() {
  let s = store().await;
  let area = s.create_area("Engineering").await.unwrap();
  let rust = s.create_competence("Rust", &area).await.unwrap();
  let member = s.create_member(1, "Ana", None).await.unwrap();
  let project = s.create_project("Apollo", None).await.unwrap();
  s.add_member_competence(&member, &rust, 3.0).await.unwrap();
  s.add_member_to_project(&member, &project, &[rust])
    .await
    .unwrap();

  s.delete_member(&member).await.unwrap();
  assert_eq!(count(&s, "member_competence").await, 0);
  assert_eq!(count(&s, "member_project_competence").await, 0);
}
