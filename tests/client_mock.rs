mod common;

use common::{MockServer, Route, refused_base_url, standard_server};
use covid_tracker::{Client, Config, Tracker};

fn client_for(base_url: &str) -> Client {
    Client::new(&Config::default().with_base_url(base_url)).unwrap()
}

#[test]
fn global_snapshot_is_decoded() {
    let server = standard_server();
    let snap = client_for(&server.base_url).global_stats().unwrap();
    assert_eq!(snap.cases, 1_000_000.0);
    assert_eq!(snap.deaths_per_one_million, 250.0);
    assert_eq!(snap.updated, Some(1_700_000_000_000));
    assert_eq!(server.requests(), vec!["/all".to_string()]);
}

#[test]
fn country_name_is_sent_as_one_encoded_segment() {
    let server = standard_server();
    let client = client_for(&server.base_url);
    let snap = client.country_stats("germany").unwrap();
    assert_eq!(snap.country.as_deref(), Some("Germany"));

    let err = client.country_stats("South Korea").unwrap_err();
    assert!(err.is_status());
    assert_eq!(
        server.requests().last().map(String::as_str),
        Some("/countries/South%20Korea")
    );
}

#[test]
fn historical_defaults_to_thirty_days() {
    let server = standard_server();
    let client = client_for(&server.base_url);
    let series = client.historical_stats("usa", None).unwrap();
    assert_eq!(series.country, "USA");
    assert_eq!(series.len(), 3);
    client.historical_stats("usa", Some(7)).unwrap();
    assert_eq!(
        server.requests(),
        vec![
            "/historical/usa?lastdays=30".to_string(),
            "/historical/usa?lastdays=7".to_string()
        ]
    );
}

#[test]
fn historical_days_are_not_clamped_by_the_client() {
    let server = standard_server();
    let err = client_for(&server.base_url)
        .historical_stats("usa", Some(90))
        .unwrap_err();
    assert!(err.is_status());
    assert_eq!(server.requests(), vec!["/historical/usa?lastdays=90".to_string()]);
}

#[test]
fn unknown_country_is_a_status_error() {
    let server = standard_server();
    let err = client_for(&server.base_url)
        .country_stats("atlantis")
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    assert!(err.to_string().contains("/countries/atlantis"));
}

#[test]
fn refused_connection_is_a_transport_error() {
    let client = client_for(&refused_base_url());
    assert!(client.global_stats().unwrap_err().is_transport());
    assert!(client.country_stats("germany").unwrap_err().is_transport());
    assert!(client.historical_stats("usa", Some(5)).unwrap_err().is_transport());
}

#[test]
fn server_error_is_not_retried() {
    let server = MockServer::start(vec![Route::status("/all", 500, "{}")]);
    let err = client_for(&server.base_url).global_stats().unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    assert_eq!(server.requests().len(), 1);
}

#[test]
fn malformed_body_is_a_decode_error() {
    let server = MockServer::start(vec![Route::ok("/all", "<html>maintenance</html>")]);
    let err = client_for(&server.base_url).global_stats().unwrap_err();
    assert!(err.is_decode(), "{err}");
}

#[test]
fn missing_field_is_reported_by_name() {
    let server = MockServer::start(vec![Route::ok(
        "/countries/germany",
        r#"{"country":"Germany","cases":1,"deaths":1,"recovered":1,"active":1}"#,
    )]);
    let err = client_for(&server.base_url)
        .country_stats("germany")
        .unwrap_err();
    assert!(err.is_missing_field());
    let msg = err.to_string();
    assert!(msg.contains("`critical`"), "{msg}");
    assert!(msg.contains("/countries/germany"), "{msg}");
}

#[test]
fn tracker_collapses_failures_to_none_with_one_line() {
    let tracker = Tracker::new(Config::default().with_base_url(refused_base_url())).unwrap();

    let mut out = Vec::new();
    assert!(tracker.global(&mut out).unwrap().is_none());
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("Error fetching global data: "));

    let mut out = Vec::new();
    assert!(tracker.historical(&mut out, "usa", 10).unwrap().is_none());
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Error fetching historical data for usa: "));
}

#[test]
fn status_and_transport_failures_collapse_the_same_way() {
    let server = standard_server();
    let found = Tracker::new(Config::default().with_base_url(&server.base_url)).unwrap();
    let refused = Tracker::new(Config::default().with_base_url(refused_base_url())).unwrap();

    let mut a = Vec::new();
    let mut b = Vec::new();
    assert!(found.country(&mut a, "atlantis").unwrap().is_none());
    assert!(refused.country(&mut b, "atlantis").unwrap().is_none());
    let a = String::from_utf8(a).unwrap();
    let b = String::from_utf8(b).unwrap();
    assert!(a.starts_with("Error fetching data for atlantis: "));
    assert!(b.starts_with("Error fetching data for atlantis: "));
    assert_eq!(a.lines().count(), 1);
    assert_eq!(b.lines().count(), 1);
}

#[test]
fn failed_report_prints_only_the_diagnostic() {
    let tracker = Tracker::new(Config::default().with_base_url(refused_base_url())).unwrap();
    let mut out = Vec::new();
    tracker.show_country(&mut out, "germany").unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(!text.contains("STATISTICS"));
}
