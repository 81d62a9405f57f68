use std::io::Write;

use nscheck_client::credentials::ApplicationDefaultCredentials;
use nscheck_core::{CredentialProvider, NsCheckError};
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_KEY: &str = include_str!("fixtures/test-service-account.pem");

fn credentials_file(content: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn authorized_user_refresh_token_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=rt-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.user",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = credentials_file(&json!({
        "type": "authorized_user",
        "client_id": "client.apps.googleusercontent.com",
        "client_secret": "secret",
        "refresh_token": "rt-123",
        "token_uri": format!("{}/token", server.uri())
    }));

    let creds = ApplicationDefaultCredentials::new()
        .credentials_file(file.path())
        .obtain()
        .await
        .unwrap();
    assert_eq!(creds.access_token(), "ya29.user");
    assert_eq!(creds.source(), "adc");
}

#[tokio::test]
async fn service_account_jwt_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant-type%3Ajwt-bearer"))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.sa",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = credentials_file(&json!({
        "type": "service_account",
        "project_id": "proj",
        "client_email": "audit@proj.iam.gserviceaccount.com",
        "private_key": TEST_KEY,
        "token_uri": format!("{}/token", server.uri())
    }));

    let creds = ApplicationDefaultCredentials::new()
        .credentials_file(file.path())
        .obtain()
        .await
        .unwrap();
    assert_eq!(creds.access_token(), "ya29.sa");
}

#[tokio::test]
async fn rejected_refresh_token_is_a_credentials_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Token has been expired or revoked."
        })))
        .mount(&server)
        .await;

    let file = credentials_file(&json!({
        "type": "authorized_user",
        "client_id": "id",
        "client_secret": "secret",
        "refresh_token": "revoked",
        "token_uri": format!("{}/token", server.uri())
    }));

    let err = ApplicationDefaultCredentials::new()
        .credentials_file(file.path())
        .obtain()
        .await
        .unwrap_err();
    assert!(matches!(err, NsCheckError::Credentials(ref msg) if msg.contains("invalid_grant")));
}

#[tokio::test]
async fn metadata_server_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/computeMetadata/v1/instance/service-accounts/default/token"))
        .and(header("Metadata-Flavor", "Google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.gce",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .mount(&server)
        .await;

    let provider = ApplicationDefaultCredentials::new().metadata_url(format!(
        "{}/computeMetadata/v1/instance/service-accounts/default/token",
        server.uri()
    ));

    // The metadata server is only consulted when no credentials file exists
    if std::env::var_os("GOOGLE_APPLICATION_CREDENTIALS").is_none()
        && !dirs_well_known_exists()
    {
        let creds = provider.obtain().await.unwrap();
        assert_eq!(creds.access_token(), "ya29.gce");
        assert_eq!(creds.source(), "metadata");
    }
}

#[tokio::test]
async fn unreadable_file_is_a_credentials_error() {
    let err = ApplicationDefaultCredentials::new()
        .credentials_file("/nonexistent/adc.json")
        .obtain()
        .await
        .unwrap_err();
    assert!(matches!(err, NsCheckError::Credentials(_)));
}

fn dirs_well_known_exists() -> bool {
    std::env::var_os("HOME")
        .map(std::path::PathBuf::from)
        .is_some_and(|home| {
            home.join(".config/gcloud/application_default_credentials.json")
                .exists()
        })
}
