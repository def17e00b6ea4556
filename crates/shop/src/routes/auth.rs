//! Authentication route handlers.
//!
//! Registration, login, logout, and the login-history page. Validation and
//! credential failures re-render the form with the message inline and the
//! submitted user name preserved.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub password: String,
    pub password2: String,
    pub email: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub user_name: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub user_name: String,
    pub email: String,
}

/// Registration success page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register_success.html")]
pub struct RegisterSuccessTemplate {
    pub user_name: String,
}

/// Login history row for the history page.
pub struct LoginRecordView {
    pub date_time: String,
    pub user_agent: String,
}

/// Login history page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/history.html")]
pub struct HistoryTemplate {
    pub user_name: String,
    pub records: Vec<LoginRecordView>,
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {
        error: None,
        user_name: String::new(),
        email: String::new(),
    }
}

/// Handle registration form submission.
#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth
        .register(&form.user_name, &form.password, &form.password2, &form.email)
        .await
    {
        Ok(user) => RegisterSuccessTemplate {
            user_name: user.user_name.to_string(),
        }
        .into_response(),
        Err(e) => {
            tracing::warn!("Registration failed: {e}");
            RegisterTemplate {
                error: Some(register_error_message(&e)),
                user_name: form.user_name,
                email: form.email,
            }
            .into_response()
        }
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {
        error: None,
        user_name: String::new(),
    }
}

/// Handle login form submission.
///
/// On success the user snapshot (name, email, login history) is stored in
/// the session. On failure the form is re-rendered with the submitted user
/// name preserved for repopulation.
#[instrument(skip(state, session, form, headers))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_owned();

    let auth = AuthService::new(state.pool());

    match auth.login(&form.user_name, &form.password, &user_agent).await {
        Ok(user) => {
            let current = CurrentUser::from(&user);
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to set session: {e}");
                return LoginTemplate {
                    error: Some("Could not establish a session, please try again".to_string()),
                    user_name: form.user_name,
                }
                .into_response();
            }

            Redirect::to("/shop").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            LoginTemplate {
                error: Some(login_error_message(&e)),
                user_name: form.user_name,
            }
            .into_response()
        }
    }
}

/// Handle logout.
///
/// Destroys the whole session: cart and user snapshot both go.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session user: {e}");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/").into_response()
}

// =============================================================================
// Login History Route
// =============================================================================

/// Display the login history from the session snapshot.
///
/// Rendered from the snapshot stored at login, not a fresh fetch; sign-ins
/// from other sessions appear after the next login here.
pub async fn history(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    HistoryTemplate {
        user_name: user.user_name.to_string(),
        records: user
            .login_history
            .iter()
            .rev()
            .map(|record| LoginRecordView {
                date_time: record.date_time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                user_agent: record.user_agent.clone(),
            })
            .collect(),
    }
}

// =============================================================================
// Error Messages
// =============================================================================

/// Human-readable registration failure message for the form.
fn register_error_message(error: &AuthError) -> String {
    match error {
        AuthError::PasswordMismatch => "Passwords do not match".to_string(),
        AuthError::UserAlreadyExists => "User name already taken".to_string(),
        AuthError::InvalidUserName(e) => e.to_string(),
        AuthError::InvalidEmail(e) => e.to_string(),
        AuthError::WeakPassword(msg) => msg.clone(),
        _ => "There was an error creating the user".to_string(),
    }
}

/// Human-readable login failure message for the form.
///
/// A failed history write is reported distinctly: the credentials were
/// right, but the sign-in was not recorded and no session was created.
fn login_error_message(error: &AuthError) -> String {
    match error {
        AuthError::UserNotFound | AuthError::InvalidCredentials => {
            "Incorrect user name or password".to_string()
        }
        AuthError::InvalidUserName(e) => e.to_string(),
        AuthError::HistoryWrite(_) => {
            "Could not record this sign-in, please try again".to_string()
        }
        _ => "There was an error signing in".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_messages_do_not_leak_which_part_failed() {
        // Unknown user and wrong password read the same to the client
        let unknown = login_error_message(&AuthError::UserNotFound);
        let wrong = login_error_message(&AuthError::InvalidCredentials);
        assert_eq!(unknown, wrong);
    }

    #[test]
    fn test_history_write_failure_is_distinct_from_credential_failure() {
        let history = login_error_message(&AuthError::HistoryWrite(
            crate::db::RepositoryError::NotFound,
        ));
        let wrong = login_error_message(&AuthError::InvalidCredentials);
        assert_ne!(history, wrong);
    }

    #[test]
    fn test_register_error_messages() {
        assert_eq!(
            register_error_message(&AuthError::PasswordMismatch),
            "Passwords do not match"
        );
        assert_eq!(
            register_error_message(&AuthError::UserAlreadyExists),
            "User name already taken"
        );
    }
}
