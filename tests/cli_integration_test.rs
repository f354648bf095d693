//! CLI integration tests.
//!
//! Tests cover:
//! - Request loading from JSON files (valid, malformed, missing)
//! - Search over a CSV journal rendered as JSON
//! - Settings read from INI files on disk
//! - Property listing
//! - Exit codes from `cli::run`
//! - Import into SQLite followed by a database search

mod common;

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tempfile::TempDir;
use tradejournal::adapters::csv_adapter::read_trades;
use tradejournal::adapters::file_config_adapter::FileConfigAdapter;
use tradejournal::adapters::memory_store::InMemoryTradeStore;
use tradejournal::cli::{self, Cli};
use tradejournal::domain::error::JournalError;
use tradejournal::domain::query::{FilterClause, SearchRequest, SortClause};
use tradejournal::domain::search::{SearchSettings, TradeSearch};

const JOURNAL_CSV: &str = "id,symbol,opened,closed,balance,size,result\n\
    1,BHP,2024-01-02T10:00:00Z,2024-01-09T15:00:00Z,-80,4,Loss\n\
    2,CBA,2024-01-03T10:00:00Z,,,2,\n\
    3,WBC,2024-01-04T10:00:00Z,2024-02-12,240,6,Win\n\
    4,NAB,2024-01-05T10:00:00Z,2024-02-15,,1,\n\
    5,RIO,2024-01-06T10:00:00Z,,0,3,BreakEven\n\
    6,FMG,2024-01-07T10:00:00Z,2024-02-20,35,5,Mediocre\n";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    path
}

fn same_code(a: ExitCode, b: ExitCode) -> bool {
    format!("{:?}", a) == format!("{:?}", b)
}

mod request_loading {
    use super::*;

    #[test]
    fn load_request_reads_camel_case_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "request.json",
            r#"{"page": 1, "pageSize": 10,
                "sort": [{"property": "Size", "ascending": false}],
                "filter": [{"propertyName": "Balance", "operator": "ge", "comparisonValue": "100.00"}]}"#,
        );
        let request = cli::load_request(&path).unwrap();
        assert_eq!(request.page_size, 10);
        assert_eq!(request.sort, vec![SortClause::desc("Size")]);
        assert_eq!(
            request.filter,
            vec![FilterClause::new("Balance", "ge", "100.00")]
        );
    }

    #[test]
    fn malformed_json_is_a_bad_request() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "request.json", "{\"page\": ");
        match cli::load_request(&path) {
            Err(JournalError::Validation(errors)) => assert_eq!(errors.fields(), vec!["request"]),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_field_type_is_a_bad_request() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "request.json", r#"{"page": "first"}"#);
        assert!(matches!(
            cli::load_request(&path),
            Err(JournalError::Validation(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = cli::load_request(&PathBuf::from("/nonexistent/request.json"));
        assert!(matches!(result, Err(JournalError::Io(_))));
    }
}

mod csv_search {
    use super::*;

    fn journal_store() -> InMemoryTradeStore {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "journal.csv", JOURNAL_CSV);
        InMemoryTradeStore::new(read_trades(&path).unwrap())
    }

    #[test]
    fn search_json_renders_page() {
        let store = journal_store();
        let request = SearchRequest::default()
            .with_filter(FilterClause::null("Closed", "ne"))
            .with_sort(SortClause::desc("Balance"))
            .with_page(1, 2);

        let json = cli::search_json(&TradeSearch::default(), &store, &request, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["totalCount"], 4);
        assert_eq!(value["page"], 1);
        assert_eq!(value["pageSize"], 2);
        let items = value["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["symbol"], "WBC");
        assert_eq!(items[1]["symbol"], "FMG");
    }

    #[test]
    fn missing_values_render_as_null() {
        let store = journal_store();
        let request = SearchRequest::default().with_filter(FilterClause::new("Size", "eq", "2"));

        let json = cli::search_json(&TradeSearch::default(), &store, &request, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let item = &value["items"][0];
        assert_eq!(item["symbol"], "CBA");
        assert!(item["closed"].is_null());
        assert!(item["balance"].is_null());
        assert!(item["result"].is_null());
    }

    #[test]
    fn search_json_reports_validation_errors() {
        let store = journal_store();
        let request = SearchRequest::default()
            .with_filter(FilterClause::new("Symbol", "eq", "BHP"))
            .with_page(0, 20);

        let err = cli::search_json(&TradeSearch::default(), &store, &request, false).unwrap_err();
        let JournalError::Validation(errors) = &err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.fields(), vec!["filter[0].propertyName", "page"]);
        assert!(same_code(ExitCode::from(&err), ExitCode::from(4)));
    }
}

mod settings {
    use super::*;

    #[test]
    fn settings_from_ini_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "journal.ini",
            "[search]\nmax_page_size = 3\ndefault_sort = Size:asc\n",
        );
        let config = FileConfigAdapter::from_file(&path).unwrap();
        let search = TradeSearch::new(SearchSettings::from_config(&config).unwrap());
        assert_eq!(search.max_page_size(), 3);

        let store = InMemoryTradeStore::new(common::mixed_trades());
        let page = search
            .search(&store, &SearchRequest::default().with_page(1, 3))
            .unwrap();
        let ids: Vec<i64> = page.items.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![4, 2, 5]);

        let err = search
            .search(&store, &SearchRequest::default().with_page(1, 4))
            .unwrap_err();
        assert!(matches!(err, JournalError::Validation(_)));
    }

    #[test]
    fn unknown_default_sort_property_rejected() {
        let config = FileConfigAdapter::from_string("[search]\ndefault_sort = Symbol:asc\n").unwrap();
        assert!(matches!(
            SearchSettings::from_config(&config),
            Err(JournalError::ConfigInvalid { .. })
        ));
    }
}

mod properties {
    use super::*;

    #[test]
    fn describe_properties_lists_every_property() {
        let lines = cli::describe_properties();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Opened"));
        assert!(lines[0].contains("required"));
        assert!(lines[1].starts_with("Closed"));
        assert!(lines[1].contains("nullable"));
        assert!(lines[4].starts_with("Result"));
        assert!(lines.iter().all(|l| l.ends_with("eq ne gt ge lt le")));
    }

    #[test]
    fn properties_command_succeeds() {
        let code = cli::run(Cli::parse_from(["tradejournal", "properties"]));
        assert!(same_code(code, ExitCode::SUCCESS));
    }
}

mod run_command {
    use super::*;

    #[test]
    fn search_over_csv_succeeds() {
        let dir = TempDir::new().unwrap();
        let csv = write_file(&dir, "journal.csv", JOURNAL_CSV);
        let request = write_file(
            &dir,
            "request.json",
            r#"{"filter": [{"propertyName": "Result", "operator": "eq", "comparisonValue": "win"}]}"#,
        );

        let code = cli::run(Cli::parse_from([
            "tradejournal",
            "search",
            "--request",
            request.to_str().unwrap(),
            "--csv",
            csv.to_str().unwrap(),
        ]));
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn invalid_request_exits_with_validation_code() {
        let dir = TempDir::new().unwrap();
        let csv = write_file(&dir, "journal.csv", JOURNAL_CSV);
        let request = write_file(
            &dir,
            "request.json",
            r#"{"filter": [{"propertyName": "Balance", "operator": "gt", "comparisonValue": "null", "isLiteral": true}]}"#,
        );

        let code = cli::run(Cli::parse_from([
            "tradejournal",
            "search",
            "--request",
            request.to_str().unwrap(),
            "--csv",
            csv.to_str().unwrap(),
        ]));
        assert!(same_code(code, ExitCode::from(4)));
    }

    #[test]
    fn bad_csv_exits_with_import_code() {
        let dir = TempDir::new().unwrap();
        let csv = write_file(
            &dir,
            "journal.csv",
            "id,symbol,opened,closed,balance,size,result\n1,BHP,yesterday,,,1,\n",
        );
        let request = write_file(&dir, "request.json", "{}");

        let code = cli::run(Cli::parse_from([
            "tradejournal",
            "search",
            "--request",
            request.to_str().unwrap(),
            "--csv",
            csv.to_str().unwrap(),
        ]));
        assert!(same_code(code, ExitCode::from(5)));
    }

    #[test]
    fn unreadable_config_exits_with_config_code() {
        let dir = TempDir::new().unwrap();
        let request = write_file(&dir, "request.json", "{}");
        let missing = dir.path().join("missing.ini");

        assert!(matches!(
            FileConfigAdapter::from_file(&missing),
            Err(JournalError::ConfigParse { .. })
        ));
        let code = cli::run(Cli::parse_from([
            "tradejournal",
            "search",
            "--request",
            request.to_str().unwrap(),
            "--config",
            missing.to_str().unwrap(),
        ]));
        assert!(same_code(code, ExitCode::from(2)));
    }

    #[test]
    fn search_without_source_fails() {
        let dir = TempDir::new().unwrap();
        let request = write_file(&dir, "request.json", "{}");
        let code = cli::run(Cli::parse_from([
            "tradejournal",
            "search",
            "--request",
            request.to_str().unwrap(),
        ]));
        assert!(same_code(code, ExitCode::from(1)));
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn import_then_search_database() {
        use tradejournal::adapters::sqlite_adapter::SqliteTradeStore;

        let dir = TempDir::new().unwrap();
        let csv = write_file(&dir, "journal.csv", JOURNAL_CSV);
        let db = dir.path().join("journal.db");
        let config = write_file(
            &dir,
            "journal.ini",
            &format!("[sqlite]\npath = {}\npool_size = 1\n", db.display()),
        );

        let code = cli::run(Cli::parse_from([
            "tradejournal",
            "import",
            "--config",
            config.to_str().unwrap(),
            "--csv",
            csv.to_str().unwrap(),
        ]));
        assert!(same_code(code, ExitCode::SUCCESS));

        let adapter = FileConfigAdapter::from_file(&config).unwrap();
        let store = SqliteTradeStore::from_config(&adapter).unwrap();
        let request = SearchRequest::default()
            .with_filter(FilterClause::null("Result", "eq"))
            .with_sort(SortClause::asc("Opened"));
        let page = TradeSearch::default().search(&store, &request).unwrap();
        let symbols: Vec<&str> = page.items.iter().map(|v| v.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["CBA", "NAB"]);

        let request_path = write_file(&dir, "request.json", "{}");
        let code = cli::run(Cli::parse_from([
            "tradejournal",
            "search",
            "--request",
            request_path.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ]));
        assert!(same_code(code, ExitCode::SUCCESS));
    }
}
