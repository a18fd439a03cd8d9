use crate::domain::gmail_auth::ports::GmailAuthService;
use crate::domain::registration::ports::RegistrationService;
use std::sync::Arc;

#[derive(Debug)]
pub struct RegistrationState<RS: RegistrationService> {
    registration_service: RS,
}

#[derive(Debug)]
pub struct SharedRegistrationState<RS: RegistrationService>(Arc<RegistrationState<RS>>);

impl<RS: RegistrationService> SharedRegistrationState<RS> {
    pub fn new(registration_service: RS) -> Self {
        Self(Arc::new(RegistrationState {
            registration_service,
        }))
    }

    pub fn registration_service(&self) -> &RS {
        &self.0.registration_service
    }
}

impl<RS: RegistrationService> Clone for SharedRegistrationState<RS> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

#[derive(Debug)]
pub struct GmailAuthState<GS: GmailAuthService> {
    gmail_auth_service: GS,
}

#[derive(Debug)]
pub struct SharedGmailAuthState<GS: GmailAuthService>(Arc<GmailAuthState<GS>>);

impl<GS: GmailAuthService> SharedGmailAuthState<GS> {
    pub fn new(gmail_auth_service: GS) -> Self {
        Self(Arc::new(GmailAuthState { gmail_auth_service }))
    }

    pub fn gmail_auth_service(&self) -> &GS {
        &self.0.gmail_auth_service
    }
}

impl<GS: GmailAuthService> Clone for SharedGmailAuthState<GS> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}
