mod gmail_auth;
mod register;
