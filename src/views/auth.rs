//! Login and registration forms

use crate::client::MovieApi;
use crate::error::ClientResult;
use crate::guard::Route;
use crate::models::{LoginRequest, Session, SignupRequest};
use crate::session::{SessionContext, SessionStorage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Editable form inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    UserId,
    Name,
    Mobile,
    Email,
    Password,
    ConfirmPassword,
}

/// Request produced by a valid submit
#[derive(Debug, Clone, PartialEq)]
pub enum AuthRequest {
    Login(LoginRequest),
    Signup(SignupRequest),
}

/// State of the login/registration page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub user_id: String,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub error: Option<String>,
    pub success: Option<String>,
    pub loading: bool,
}

impl AuthForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Update one input; typing dismisses a displayed error
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::UserId => self.user_id = value,
            Field::Name => self.name = value,
            Field::Mobile => self.mobile = value,
            Field::Email => self.email = value,
            Field::Password => self.password = value,
            Field::ConfirmPassword => self.confirm_password = value,
        }
        self.error = None;
    }

    /// Switch forms, resetting every field and message.
    ///
    /// A submit still in flight keeps the form busy.
    pub fn set_mode(&mut self, mode: AuthMode) {
        let loading = self.loading;
        *self = Self::with_mode(mode);
        self.loading = loading;
    }

    pub fn switch_mode(&mut self) {
        let next = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.set_mode(next);
    }

    /// First failing check, in form order
    pub fn validate(&self) -> Result<(), String> {
        let check = |ok: bool, message: &str| if ok { Ok(()) } else { Err(message.to_string()) };

        match self.mode {
            AuthMode::Login => {
                check(!self.user_id.trim().is_empty(), "User ID is required")?;
                check(!self.password.is_empty(), "Password is required")
            }
            AuthMode::Register => {
                check(!self.name.trim().is_empty(), "Name is required")?;
                check(!self.mobile.trim().is_empty(), "Mobile number is required")?;
                check(!self.email.trim().is_empty(), "Email is required")?;
                check(!self.password.is_empty(), "Password is required")?;
                check(self.password == self.confirm_password, "Passwords do not match")
            }
        }
    }

    /// Validate and start a submit.
    ///
    /// Returns `None` when validation fails (the error is set) or a submit is
    /// already running.
    pub fn begin_submit(&mut self) -> Option<AuthRequest> {
        if self.loading {
            return None;
        }

        self.success = None;
        if let Err(message) = self.validate() {
            self.error = Some(message);
            return None;
        }

        self.error = None;
        self.loading = true;

        Some(match self.mode {
            AuthMode::Login => AuthRequest::Login(LoginRequest {
                user_id: self.user_id.clone(),
                password: self.password.clone(),
            }),
            AuthMode::Register => AuthRequest::Signup(SignupRequest {
                name: self.name.clone(),
                mobile: self.mobile.clone(),
                email: self.email.clone(),
                password: self.password.clone(),
                confirm_password: self.confirm_password.clone(),
            }),
        })
    }

    /// Record the outcome of the request started by [`begin_submit`](Self::begin_submit)
    pub fn finish(&mut self, result: &ClientResult<Session>) {
        self.loading = false;
        match (result, self.mode) {
            (Ok(_), AuthMode::Login) => {
                self.success = Some("Login successful! Redirecting...".to_string());
            }
            (Ok(_), AuthMode::Register) => {
                self.success = Some("Account created successfully!".to_string());
            }
            (Err(e), AuthMode::Login) => {
                self.error = Some(e.user_message_or("Login failed. Please check your credentials."));
            }
            (Err(e), AuthMode::Register) => {
                self.error = Some(e.user_message_or("Registration failed. Please try again."));
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Welcome Back",
            AuthMode::Register => "Create Account",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.mode, self.loading) {
            (AuthMode::Login, false) => "Sign In",
            (AuthMode::Login, true) => "Signing In...",
            (AuthMode::Register, false) => "Create Account",
            (AuthMode::Register, true) => "Creating Account...",
        }
    }
}

/// Run a submit end to end.
///
/// On success the returned user becomes the current session and the route to
/// navigate to is returned. On failure the form carries the error.
pub async fn submit<A, S>(api: &A, ctx: &SessionContext<S>, form: &mut AuthForm) -> Option<Route>
where
    A: MovieApi + ?Sized,
    S: SessionStorage,
{
    let request = form.begin_submit()?;

    let result = match &request {
        AuthRequest::Login(req) => api.login(req).await,
        AuthRequest::Signup(req) => api.signup(req).await,
    };
    form.finish(&result);

    match result {
        Ok(session) => {
            if let Err(e) = ctx.sign_in(session) {
                tracing::warn!("Session not saved: {}", e);
            }
            Some(Route::Movies)
        }
        Err(e) => {
            tracing::warn!(mode = ?form.mode, "Authentication failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStorage, SessionStore, SESSION_KEY};
    use crate::views::testing::FakeApi;

    fn context() -> SessionContext<MemoryStorage> {
        SessionContext::new(SessionStore::new(MemoryStorage::new()))
    }

    fn login_form(user_id: &str, password: &str) -> AuthForm {
        let mut form = AuthForm::new();
        form.set_field(Field::UserId, user_id);
        form.set_field(Field::Password, password);
        form
    }

    #[tokio::test]
    async fn test_login_success_stores_session_and_navigates() {
        let api = FakeApi::default();
        let ctx = context();
        let mut form = login_form("ana@example.com", "secret");

        let next = submit(&api, &ctx, &mut form).await;

        assert_eq!(next, Some(Route::Movies));
        assert_eq!(form.success.as_deref(), Some("Login successful! Redirecting..."));
        assert!(!form.loading);

        let raw = ctx.store().storage().get(SESSION_KEY).unwrap().unwrap();
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored["name"], "Ana");
        assert!(stored.get("password").is_none());
    }

    #[tokio::test]
    async fn test_login_failure_shows_server_message() {
        let api = FakeApi::default();
        let ctx = context();
        let mut form = login_form("ana@example.com", "wrong");

        assert_eq!(submit(&api, &ctx, &mut form).await, None);
        assert_eq!(form.error.as_deref(), Some("Wrong Password"));
        assert!(!ctx.is_signed_in());
    }

    #[tokio::test]
    async fn test_signup_mismatched_passwords_sends_nothing() {
        let api = FakeApi::default();
        let ctx = context();
        let mut form = AuthForm::with_mode(AuthMode::Register);
        form.set_field(Field::Name, "Ana");
        form.set_field(Field::Mobile, "5550100");
        form.set_field(Field::Email, "ana@example.com");
        form.set_field(Field::Password, "secret");
        form.set_field(Field::ConfirmPassword, "secret2");

        assert_eq!(submit(&api, &ctx, &mut form).await, None);
        assert_eq!(form.error.as_deref(), Some("Passwords do not match"));
        assert!(api.calls().is_empty());
        assert!(!form.loading);
    }

    #[tokio::test]
    async fn test_signup_success() {
        let api = FakeApi::default();
        let ctx = context();
        let mut form = AuthForm::with_mode(AuthMode::Register);
        form.set_field(Field::Name, "Bo");
        form.set_field(Field::Mobile, "5550100");
        form.set_field(Field::Email, "bo@example.com");
        form.set_field(Field::Password, "pw");
        form.set_field(Field::ConfirmPassword, "pw");

        assert_eq!(submit(&api, &ctx, &mut form).await, Some(Route::Movies));
        assert_eq!(api.calls(), vec!["signup bo@example.com"]);
        assert_eq!(ctx.current().map(|s| s.name), Some("Bo".to_string()));
        assert_eq!(form.success.as_deref(), Some("Account created successfully!"));
    }

    #[test]
    fn test_validation_order() {
        let mut form = AuthForm::new();
        assert_eq!(form.validate(), Err("User ID is required".to_string()));
        form.set_field(Field::UserId, "  ana ");
        assert_eq!(form.validate(), Err("Password is required".to_string()));

        let mut form = AuthForm::with_mode(AuthMode::Register);
        assert_eq!(form.validate(), Err("Name is required".to_string()));
        form.set_field(Field::Name, "Ana");
        assert_eq!(form.validate(), Err("Mobile number is required".to_string()));
        form.set_field(Field::Mobile, "555");
        assert_eq!(form.validate(), Err("Email is required".to_string()));
    }

    #[test]
    fn test_typing_dismisses_error_and_switch_resets() {
        let mut form = AuthForm::new();
        assert!(form.begin_submit().is_none());
        assert!(form.error.is_some());

        form.set_field(Field::UserId, "a");
        assert_eq!(form.error, None);

        form.set_field(Field::Password, "pw");
        form.switch_mode();
        assert_eq!(form, AuthForm::with_mode(AuthMode::Register));
        form.switch_mode();
        assert_eq!(form.mode, AuthMode::Login);
    }

    #[test]
    fn test_double_submit_refused_while_loading() {
        let mut form = login_form("ana", "pw");
        assert!(form.begin_submit().is_some());
        assert!(form.loading);
        assert_eq!(form.submit_label(), "Signing In...");
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_switching_forms_keeps_pending_submit() {
        let mut form = login_form("ana", "pw");
        assert!(form.begin_submit().is_some());

        form.switch_mode();
        assert_eq!(form.mode, AuthMode::Register);
        assert!(form.loading);
        assert_eq!(form.submit_label(), "Creating Account...");

        form.set_field(Field::Name, "Ana");
        form.set_field(Field::Mobile, "555");
        form.set_field(Field::Email, "ana@example.com");
        form.set_field(Field::Password, "pw");
        form.set_field(Field::ConfirmPassword, "pw");
        assert!(form.begin_submit().is_none());

        form.finish(&Err(crate::error::ClientError::Transport("reset".to_string())));
        assert!(!form.loading);
        assert!(form.begin_submit().is_some());
    }
}
