use crate::{
    domain::gmail_auth::{models::AuthorizationCallback, ports::GmailAuthService},
    inbound::http::{errors::AppError, state::SharedGmailAuthState},
};
use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;

#[derive(serde::Serialize)]
struct AuthorizationUrlResponse {
    authorization_url: String,
    message: &'static str,
}

#[derive(serde::Serialize)]
struct AuthorizedResponse {
    message: &'static str,
    refresh_token: Option<String>,
    note: &'static str,
}

#[tracing::instrument(name = "Building Gmail authorization URL", skip(state))]
pub async fn authorize<GS: GmailAuthService>(
    state: web::Data<SharedGmailAuthState<GS>>,
) -> HttpResponse {
    HttpResponse::Ok().json(AuthorizationUrlResponse {
        authorization_url: state.gmail_auth_service().authorization_url(),
        message: "Visit this URL to authorize Gmail API access",
    })
}

#[tracing::instrument(name = "Handling Gmail authorization callback", skip(query, state))]
pub async fn callback<GS: GmailAuthService>(
    query: web::Query<AuthorizationCallback>,
    state: web::Data<SharedGmailAuthState<GS>>,
) -> Result<HttpResponse, AppError> {
    let token = state
        .gmail_auth_service()
        .complete_authorization(query.into_inner().code)
        .await?;

    Ok(HttpResponse::Ok().json(AuthorizedResponse {
        message: "Authorization successful",
        refresh_token: token
            .refresh_token
            .map(|secret| secret.expose_secret().to_string()),
        note: "Add the refresh_token to your .env file as GOOGLE_REFRESH_TOKEN",
    }))
}
