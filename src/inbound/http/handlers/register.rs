use crate::{
    domain::registration::{
        models::user::{RegistrationRequest, User},
        ports::RegistrationService,
    },
    inbound::http::{errors::AppError, state::SharedRegistrationState},
};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};

pub const REGISTERED_MESSAGE: &str =
    "User registered successfully. A welcome email has been sent.";

#[derive(serde::Serialize)]
struct UserView {
    id: uuid::Uuid,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name.as_ref().to_string(),
            email: user.email.into(),
            created_at: user.created_at,
        }
    }
}

#[derive(serde::Serialize)]
struct RegisteredData {
    user: UserView,
}

#[derive(serde::Serialize)]
struct RegisteredResponse {
    success: bool,
    message: &'static str,
    data: RegisteredData,
}

#[tracing::instrument(
    name = "Registering a new user",
    skip(request, state),
    fields(
        user_email = ?request.email,
        user_name = ?request.name,
    )
)]
pub async fn register<RS: RegistrationService>(
    request: web::Json<RegistrationRequest>,
    state: web::Data<SharedRegistrationState<RS>>,
) -> Result<HttpResponse, AppError> {
    let user = state
        .registration_service()
        .register(request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(RegisteredResponse {
        success: true,
        message: REGISTERED_MESSAGE,
        data: RegisteredData { user: user.into() },
    }))
}
