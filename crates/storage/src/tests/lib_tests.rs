use super::*;

#[tokio::test]
async fn empty_store_has_no_best() {
    let store = ScoreStore::new("sqlite::memory:").await.expect("db");
    assert_eq!(store.load().await.expect("load"), StoredBest::default());
    assert_eq!(store.load_best().await.expect("load best"), None);
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let store = ScoreStore::new("sqlite::memory:").await.expect("db");
    store.health_check().await.expect("health check");
}

#[tokio::test]
async fn saves_and_overwrites_both_fields() {
    let store = ScoreStore::new("sqlite::memory:").await.expect("db");
    store.save(Score::new(5, 120)).await.expect("save");
    store.save(Score::new(5, 90)).await.expect("overwrite");

    let stored = store.load().await.expect("load");
    assert_eq!(stored.best_errors, Some(5));
    assert_eq!(stored.best_seconds, Some(90));
    assert_eq!(stored.score(), Some(Score::new(5, 90)));
}

#[tokio::test]
async fn clear_removes_the_best() {
    let store = ScoreStore::new("sqlite::memory:").await.expect("db");
    store.save_best(Score::new(2, 30)).await.expect("save");
    store.clear_best().await.expect("clear");
    assert_eq!(store.load_best().await.expect("load"), None);
}

#[tokio::test]
async fn half_a_best_is_no_best() {
    let store = ScoreStore::new("sqlite::memory:").await.expect("db");
    sqlx::query("INSERT INTO best_score (field, value) VALUES (?1, ?2)")
        .bind(BEST_ERRORS_FIELD)
        .bind(3_i64)
        .execute(store.pool())
        .await
        .expect("insert");

    let stored = store.load().await.expect("load");
    assert_eq!(stored.best_errors, Some(3));
    assert_eq!(stored.best_seconds, None);
    assert_eq!(stored.score(), None);
}

#[tokio::test]
async fn negative_values_are_treated_as_missing() {
    let store = ScoreStore::new("sqlite::memory:").await.expect("db");
    store.save(Score::new(1, 10)).await.expect("save");
    sqlx::query("UPDATE best_score SET value = -1 WHERE field = ?1")
        .bind(BEST_TIME_FIELD)
        .execute(store.pool())
        .await
        .expect("update");

    assert_eq!(store.load_best().await.expect("load"), None);
}

#[tokio::test]
async fn unrelated_rows_do_not_break_loading() {
    let store = ScoreStore::new("sqlite::memory:").await.expect("db");
    store.save(Score::new(0, 5)).await.expect("save");
    sqlx::query("INSERT INTO best_score (field, value) VALUES (?1, ?2)")
        .bind("note")
        .bind("hello")
        .execute(store.pool())
        .await
        .expect("insert note");

    assert_eq!(
        store.load_best().await.expect("load"),
        Some(Score::new(0, 5))
    );
}

#[tokio::test]
async fn text_in_a_score_field_is_treated_as_missing() {
    let store = ScoreStore::new("sqlite::memory:").await.expect("db");
    store.save(Score::new(2, 40)).await.expect("save");
    sqlx::query("UPDATE best_score SET value = ?1 WHERE field = ?2")
        .bind("oops")
        .bind(BEST_ERRORS_FIELD)
        .execute(store.pool())
        .await
        .expect("update");

    let stored = store.load().await.expect("load");
    assert_eq!(stored.best_errors, None);
    assert_eq!(stored.best_seconds, Some(40));
}

#[tokio::test]
async fn best_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let database_url = database_url_for(&dir.path().join("nested"));

    let store = ScoreStore::new(&database_url).await.expect("db");
    store.save(Score::new(4, 75)).await.expect("save");
    store.pool().close().await;
    drop(store);

    let reopened = ScoreStore::new(&database_url).await.expect("reopen");
    assert_eq!(
        reopened.load_best().await.expect("load"),
        Some(Score::new(4, 75))
    );
    assert!(dir.path().join("nested").join("scores.sqlite3").exists());
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/scores.db"),
        "sqlite://./data/scores.db"
    );
}

#[test]
fn keeps_existing_sqlite_urls() {
    assert_eq!(
        normalize_database_url("sqlite://./scores.db"),
        "sqlite://./scores.db"
    );
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(
        normalize_database_url("sqlite:data\\scores.db"),
        "sqlite://data/scores.db"
    );
}

#[test]
fn memory_urls_have_no_file_path() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/scores.db?mode=rwc"),
        Some(PathBuf::from("./data/scores.db"))
    );
}
