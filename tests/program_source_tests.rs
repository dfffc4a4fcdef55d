use mockito::Matcher;
use std::fs;
use tempfile::tempdir;
use workout_schedule::{CsvFileSource, ProgramSource, SheetsValuesSource, SourceError, StaticSource};

#[tokio::test]
async fn csv_file_source_builds_a_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("program.csv");
    fs::write(
        &path,
        "Week,Day,Exercise,Sets\n1,Push,Bench,3\n1,Push,\"Dips, weighted\",3\n1,Pull\n",
    )
    .unwrap();

    let table = CsvFileSource::new(&path).fetch_table().await;
    assert_eq!(table.rows().len(), 3);
    assert_eq!(
        table.exercises_for(1, "Push"),
        vec!["Bench".to_string(), "Dips, weighted".to_string()]
    );
}

#[tokio::test]
async fn missing_csv_file_becomes_an_empty_table() {
    let source = CsvFileSource::new("/nonexistent/program.csv");
    assert!(matches!(source.fetch_values().await, Err(SourceError::Io(_))));
    assert!(source.fetch_table().await.is_empty());
}

#[tokio::test]
async fn table_without_required_headers_becomes_empty() {
    let source = StaticSource::from_rows([["Week", "Day"], ["1", "Push"]]);
    assert!(source.fetch_table().await.is_empty());
}

#[tokio::test]
async fn sheets_source_reads_the_values_range() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            Matcher::Regex("^/v4/spreadsheets/sheet-1/values/Sheet1!A:Z".into()),
        )
        .match_query(Matcher::UrlEncoded("key".into(), "secret".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "range": "Sheet1!A1:C4",
                "majorDimension": "ROWS",
                "values": [
                    ["Week", "Day", "Exercise"],
                    ["1", "Upper", "Bench"],
                    [1, "Lower"],
                    ["1", "Lower", "Squat"]
                ]
            }"#,
        )
        .create_async()
        .await;

    let source = SheetsValuesSource::new("sheet-1", "Sheet1!A:Z")
        .with_base_url(server.url())
        .with_api_key(Some("secret".into()));
    let table = source.fetch_table().await;

    mock.assert_async().await;
    assert_eq!(table.rows().len(), 3);
    assert_eq!(table.rows()[1].week.as_deref(), Some("1"));
    assert_eq!(table.exercises_for(1, "Lower"), vec!["Squat".to_string()]);
}

#[tokio::test]
async fn sheets_errors_become_an_empty_table() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex("^/v4/spreadsheets/".into()))
        .with_status(403)
        .with_body(r#"{"error": {"code": 403}}"#)
        .expect(2)
        .create_async()
        .await;

    let source = SheetsValuesSource::new("sheet-1", "Sheet1!A:Z").with_base_url(server.url());
    assert!(matches!(
        source.fetch_values().await,
        Err(SourceError::Status(status)) if status.as_u16() == 403
    ));
    assert!(source.fetch_table().await.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn sheets_range_without_values_is_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"range": "Sheet1!A1:Z1000", "majorDimension": "ROWS"}"#)
        .create_async()
        .await;

    let source = SheetsValuesSource::new("sheet-1", "Sheet1!A:Z").with_base_url(server.url());
    assert!(source.fetch_values().await.unwrap().is_empty());
    assert!(source.fetch_table().await.is_empty());
}
