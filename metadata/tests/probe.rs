use pitoken_metadata::{ProbeIssue, Prober, ValidationIssue};
use pitoken_types::NetworkId;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ISSUER: &str = "GAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQDZ7H";

fn document(image: &str) -> String {
    format!(
        r#"NETWORK_PASSPHRASE = "Pi Testnet"

[[CURRENCIES]]
code = "TST"
issuer = "{ISSUER}"
name = "Test Token"
desc = "A token for testing"
image = "{image}"
"#
    )
}

async fn serve(server: &MockServer, body: String, content_type: &str) {
    Mock::given(method("GET"))
        .and(path("/.well-known/pi.toml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.into_bytes(), content_type),
        )
        .mount(server)
        .await;
}

fn prober() -> Prober {
    Prober::insecure(5).unwrap()
}

#[tokio::test]
async fn published_document_passes() {
    let server = MockServer::start().await;
    let image = format!("{}/tst.png", server.uri());
    serve(&server, document(&image), "text/plain; charset=utf-8").await;
    Mock::given(method("HEAD"))
        .and(path("/tst.png"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let url = format!("{}/.well-known/pi.toml", server.uri());
    let report = prober().probe(&url).await;

    assert_eq!(report.status, Some(200));
    assert_eq!(report.document.as_ref().unwrap().currencies.len(), 1);
    assert!(report.is_ok(), "unexpected issues: {:?}", report.issues);
}

#[tokio::test]
async fn other_network_passphrase_is_reported() {
    let server = MockServer::start().await;
    let image = format!("{}/tst.png", server.uri());
    serve(&server, document(&image), "text/plain").await;
    Mock::given(method("HEAD"))
        .and(path("/tst.png"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let url = format!("{}/.well-known/pi.toml", server.uri());

    let report = prober().for_network(NetworkId::PiTestnet).probe(&url).await;
    assert!(report.is_ok(), "unexpected issues: {:?}", report.issues);

    let report = prober()
        .for_network(NetworkId::StellarTestnet)
        .probe(&url)
        .await;
    assert_eq!(
        report.issues,
        vec![ProbeIssue::Invalid(vec![ValidationIssue::NetworkMismatch {
            expected: NetworkId::StellarTestnet.passphrase().to_string(),
            found: "Pi Testnet".into(),
        }])]
    );
}

#[tokio::test]
async fn missing_image_is_reported() {
    let server = MockServer::start().await;
    let image = format!("{}/gone.png", server.uri());
    serve(&server, document(&image), "text/plain").await;
    Mock::given(method("HEAD"))
        .and(path("/gone.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let report = prober()
        .probe(&format!("{}/.well-known/pi.toml", server.uri()))
        .await;

    assert!(report.issues.contains(&ProbeIssue::ImageUnreachable {
        url: image,
        reason: "HTTP 404".into(),
    }));
}

#[tokio::test]
async fn wrong_content_type_is_reported() {
    let server = MockServer::start().await;
    let image = format!("{}/tst.png", server.uri());
    serve(&server, document(&image), "text/html").await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let report = prober()
        .probe(&format!("{}/.well-known/pi.toml", server.uri()))
        .await;

    assert!(report
        .issues
        .contains(&ProbeIssue::WrongContentType("text/html".into())));
}

#[tokio::test]
async fn missing_document_is_reported() {
    let server = MockServer::start().await;

    let report = prober()
        .probe(&format!("{}/.well-known/pi.toml", server.uri()))
        .await;

    assert_eq!(report.status, Some(404));
    assert!(report.document.is_none());
    assert!(report.issues.contains(&ProbeIssue::HttpStatus(404)));
}

#[tokio::test]
async fn incomplete_record_is_reported() {
    let server = MockServer::start().await;
    serve(
        &server,
        format!("[[CURRENCIES]]\ncode = \"TST\"\nissuer = \"{ISSUER}\"\n"),
        "text/plain",
    )
    .await;

    let report = prober()
        .probe(&format!("{}/.well-known/pi.toml", server.uri()))
        .await;

    let invalid = report
        .issues
        .iter()
        .find_map(|issue| match issue {
            ProbeIssue::Invalid(issues) => Some(issues.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(invalid.len(), 3);
}

#[tokio::test]
async fn plain_http_is_refused_by_default() {
    let report = Prober::new(5)
        .unwrap()
        .probe("http://127.0.0.1:1/.well-known/pi.toml")
        .await;
    assert_eq!(report.issues, vec![ProbeIssue::NotHttps]);
    assert!(report.status.is_none());
}
