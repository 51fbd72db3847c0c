//! Prober integration tests against a mock leak test service

use super::*;
use crate::{
    client::NetworkClient,
    models::RecordKind,
};
use wiremock::{
    matchers::{method, path, path_regex, query_param},
    Mock, MockServer, ResponseTemplate,
};

const SAMPLE_BODY: &str = r#"[
    {"ip":"203.0.113.7","country":"DE","country_name":"Germany","asn":"AS3320 Deutsche Telekom AG","type":"ip"},
    {"ip":"8.8.8.8","country":"US","country_name":"United States","asn":"AS15169 Google LLC","type":"dns"},
    {"ip":"8.8.4.4","country":"US","country_name":"United States","asn":"AS15169 Google LLC","type":"dns"},
    {"ip":"194.25.0.60","country":"DE","country_name":"Germany","asn":"AS3320 Deutsche Telekom AG","type":"dns"},
    {"ip":"DNS may be leaking.","country":null,"country_name":null,"asn":null,"type":"conclusion"}
]"#;

/// Mock service with both trigger and result routes under one origin
struct MockLeakService {
    server: MockServer,
}

impl MockLeakService {
    async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    fn config(&self) -> Config {
        Config {
            trigger_url_template: format!("{}/trigger/{{index}}/{{token}}", self.server.uri()),
            result_url_template: format!("{}/dnsleak/test/{{token}}?json", self.server.uri()),
            ..Config::default()
        }
    }

    fn prober(&self) -> Prober {
        let config = self.config();
        let client = Arc::new(NetworkClient::new(&config).unwrap());
        let logger = ProbeLogger::new(&config);
        Prober::new(client, config, logger)
    }

    async fn mock_result(&self, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/dnsleak/test/1234567"))
            .and(query_param("json", ""))
            .respond_with(template)
            .expect(1)
            .mount(&self.server)
            .await;
    }
}

fn token() -> Token {
    Token::new(1234567).unwrap()
}

#[tokio::test]
async fn test_trigger_fans_out_to_service() {
    let service = MockLeakService::new().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/trigger/([1-9]|10)/1234567$"))
        .respond_with(ResponseTemplate::new(404))
        .expect(10)
        .mount(&service.server)
        .await;

    let prober = service.prober();
    let elapsed = tokio::time::timeout(Duration::from_secs(10), prober.trigger(token()))
        .await
        .expect("trigger phase should finish");
    assert!(elapsed > Duration::ZERO);
}

#[tokio::test]
async fn test_trigger_with_slow_backends_joins_all() {
    let service = MockLeakService::new().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/trigger/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .expect(10)
        .mount(&service.server)
        .await;

    let elapsed = service.prober().trigger(token()).await;
    assert!(elapsed >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_trigger_with_unreachable_backend_returns() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = Config {
        trigger_url_template: format!("http://127.0.0.1:{}/{{index}}/{{token}}", port),
        ..Config::default()
    };
    let client = Arc::new(NetworkClient::new(&config).unwrap());
    let prober = Prober::new(client, config.clone(), ProbeLogger::new(&config));

    let result = tokio::time::timeout(Duration::from_secs(10), prober.trigger(token())).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_fetch_result_preserves_sequence() {
    let service = MockLeakService::new().await;
    service
        .mock_result(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
        .await;

    let records = service.prober().fetch_result(token()).await.unwrap();

    assert_eq!(records, vec![
        ResultRecord::new(RecordKind::Ip, "203.0.113.7", "DE", "Germany", "AS3320 Deutsche Telekom AG"),
        ResultRecord::new(RecordKind::Dns, "8.8.8.8", "US", "United States", "AS15169 Google LLC"),
        ResultRecord::new(RecordKind::Dns, "8.8.4.4", "US", "United States", "AS15169 Google LLC"),
        ResultRecord::new(RecordKind::Dns, "194.25.0.60", "DE", "Germany", "AS3320 Deutsche Telekom AG"),
        ResultRecord::conclusion("DNS may be leaking."),
    ]);
}

#[tokio::test]
async fn test_fetch_result_server_error_is_empty() {
    let service = MockLeakService::new().await;
    service
        .mock_result(ResponseTemplate::new(500).set_body_string("internal error"))
        .await;

    let records = service.prober().fetch_result(token()).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_fetch_result_malformed_json_is_error() {
    let service = MockLeakService::new().await;
    service
        .mock_result(ResponseTemplate::new(200).set_body_string("[{\"ip\": \"1.2.3.4\", "))
        .await;

    let error = service.prober().fetch_result(token()).await.unwrap_err();
    assert_eq!(error.category(), "PARSE");
}

#[tokio::test]
async fn test_fetch_result_non_array_is_error() {
    let service = MockLeakService::new().await;
    service
        .mock_result(ResponseTemplate::new(200).set_body_string(r#"{"error":"unknown id"}"#))
        .await;

    assert!(service.prober().fetch_result(token()).await.is_err());
}

#[tokio::test]
async fn test_fetch_result_keeps_records_around_untyped_entry() {
    let service = MockLeakService::new().await;
    service
        .mock_result(ResponseTemplate::new(200).set_body_string(
            r#"[{"ip":"203.0.113.7","type":"ip"},{"ip":"extra"},{"ip":"9.9.9.9","type":null},{"ip":"8.8.8.8","type":"dns"}]"#,
        ))
        .await;

    let records = service.prober().fetch_result(token()).await.unwrap();
    let report = crate::output::LeakReport::from_records(&records);

    assert_eq!(records.len(), 4);
    assert_eq!(report.resolver_count(), 1);
    assert!(report.lines()[0].plain_text().starts_with("Your IP Address: 203.0.113.7"));
}
