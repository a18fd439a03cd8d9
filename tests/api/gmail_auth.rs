use crate::helpers::{spawn_app, spawn_authorization_app, TOKEN_PATH};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn gmail_auth_returns_the_consent_url() {
    let app = spawn_app().await;

    let response = app.get_gmail_auth().await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Visit this URL to authorize Gmail API access"
    );
    let url = reqwest::Url::parse(body["authorization_url"].as_str().unwrap()).unwrap();
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("client_id".into(), "test-client-id".into())));
    assert!(pairs.contains(&("access_type".into(), "offline".into())));
    assert!(pairs.contains(&("prompt".into(), "consent".into())));
    assert!(pairs.contains(&(
        "scope".into(),
        "https://www.googleapis.com/auth/gmail.send".into()
    )));
}

#[tokio::test]
async fn callback_without_a_code_is_rejected_with_a_400() {
    let app = spawn_app().await;
    Mock::given(body_string_contains("grant_type=authorization_code"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.google_server)
        .await;

    for query in [vec![], vec![("code", "")]] {
        let response = app.get_gmail_callback(&query).await;

        assert_eq!(400, response.status().as_u16());
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "Authorization code not provided" })
        );
    }
}

#[tokio::test]
async fn callback_returns_the_exchanged_refresh_token() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=valid-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.new",
            "refresh_token": "1//new-refresh-token",
            "expires_in": 3599,
            "scope": "https://www.googleapis.com/auth/gmail.send",
            "token_type": "Bearer",
        })))
        .expect(1)
        .mount(&app.google_server)
        .await;

    let response = app.get_gmail_callback(&[("code", "valid-code")]).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "message": "Authorization successful",
            "refresh_token": "1//new-refresh-token",
            "note": "Add the refresh_token to your .env file as GOOGLE_REFRESH_TOKEN",
        })
    );
}

#[tokio::test]
async fn callback_reports_a_null_refresh_token_when_google_omits_it() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=authorization_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.new",
            "expires_in": 3599,
        })))
        .expect(1)
        .mount(&app.google_server)
        .await;

    let response = app.get_gmail_callback(&[("code", "valid-code")]).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["refresh_token"].is_null());
}

#[tokio::test]
async fn callback_returns_a_500_if_the_exchange_fails() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=authorization_code"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Bad Request",
        })))
        .expect(1)
        .mount(&app.google_server)
        .await;

    let response = app.get_gmail_callback(&[("code", "expired-code")]).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Authentication failed");
    assert!(body["message"].as_str().unwrap().contains("invalid_grant"));
}

#[tokio::test]
async fn authorization_server_only_serves_the_oauth_routes() {
    let app = spawn_authorization_app().await;

    let auth = app
        .api_client
        .get(&format!("{}/api/gmail/auth", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    let register = app
        .api_client
        .post(&format!("{}/api/register", &app.address))
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, auth.status().as_u16());
    assert_eq!(404, register.status().as_u16());
}
