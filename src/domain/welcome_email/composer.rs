use super::models::message::{EmailError, EmailHtmlContent, EmailMessage, EmailSubject};
use crate::domain::registration::models::name::UserName;
use handlebars::Handlebars;

const WELCOME_TEMPLATE_NAME: &str = "welcome";

const WELCOME_TEMPLATE: &str = r#"<div style='font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;'>
    <h2 style='color: #333;'>Hello {{user_name}}!</h2>
    <p style='color: #666; line-height: 1.6;'>
        Welcome to our platform! We are excited to have you on board.
    </p>
    <p style='color: #666; line-height: 1.6;'>
        Thank you for registering with us. Your account has been successfully created.
    </p>
    <p style='color: #666; line-height: 1.6;'>
        You can now start exploring all the features we have to offer.
    </p>
    <div style='text-align: center; margin: 30px 0;'>
        <a href='{{home_url}}' style='background-color: #4CAF50; color: white; padding: 12px 30px; text-decoration: none; border-radius: 4px; display: inline-block;'>
            Get Started
        </a>
    </div>
    <p style='color: #666; line-height: 1.6;'>
        If you have any questions, feel free to reach out to our support team.
    </p>
    <p style='color: #666; margin-top: 30px;'>
        Best regards,<br>
        {{app_name}} Team
    </p>
</div>
"#;

#[derive(thiserror::Error, Debug)]
pub enum ComposeError {
    #[error("Failed to render the welcome email template: {0}")]
    Template(String),
    #[error(transparent)]
    InvalidMessage(#[from] EmailError),
}

#[derive(serde::Serialize)]
struct WelcomeTemplateData<'a> {
    user_name: &'a str,
    app_name: &'a str,
    home_url: &'a str,
}

/// Renders the welcome email. Every interpolated value is HTML escaped, user
/// supplied names included.
#[derive(Debug, Clone)]
pub struct WelcomeEmailComposer {
    templates: Handlebars<'static>,
    app_name: String,
    home_url: String,
}

impl WelcomeEmailComposer {
    pub fn new(app_name: &str, home_url: &str) -> Result<Self, ComposeError> {
        let mut templates = Handlebars::new();
        templates.set_strict_mode(true);
        templates
            .register_template_string(WELCOME_TEMPLATE_NAME, WELCOME_TEMPLATE)
            .map_err(|e| ComposeError::Template(e.to_string()))?;
        Ok(Self {
            templates,
            app_name: app_name.to_string(),
            home_url: home_url.to_string(),
        })
    }

    pub fn compose(&self, user_name: &UserName) -> Result<EmailMessage, ComposeError> {
        let data = WelcomeTemplateData {
            user_name: user_name.as_ref(),
            app_name: &self.app_name,
            home_url: &self.home_url,
        };
        let html = self
            .templates
            .render(WELCOME_TEMPLATE_NAME, &data)
            .map_err(|e| ComposeError::Template(e.to_string()))?;

        let subject = EmailSubject::try_from(format!("Welcome to {}", self.app_name))?;
        let html_content = EmailHtmlContent::try_from(html)?;

        Ok(EmailMessage::new(subject, html_content))
    }
}
