//! Session state: the active connection and the login form

use crate::store::ServerConfig;

/// Input focus on the connect screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Url,
    Username,
    Password,
    ServerName,
}

impl LoginField {
    pub fn next(&self) -> LoginField {
        match self {
            LoginField::Url => LoginField::Username,
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::ServerName,
            LoginField::ServerName => LoginField::Url,
        }
    }

    pub fn previous(&self) -> LoginField {
        match self {
            LoginField::Url => LoginField::ServerName,
            LoginField::Username => LoginField::Url,
            LoginField::Password => LoginField::Username,
            LoginField::ServerName => LoginField::Password,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoginField::Url => "Server URL",
            LoginField::Username => "Username",
            LoginField::Password => "Password",
            LoginField::ServerName => "Name (optional)",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub url: String,
    pub username: String,
    pub password: String,
    pub server_name: String,
    pub focus: LoginField,
}

impl LoginForm {
    pub fn active_value_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Url => &mut self.url,
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
            LoginField::ServerName => &mut self.server_name,
        }
    }

    pub fn value_of(&self, field: LoginField) -> &str {
        match field {
            LoginField::Url => &self.url,
            LoginField::Username => &self.username,
            LoginField::Password => &self.password,
            LoginField::ServerName => &self.server_name,
        }
    }

    /// Pre-fill from a saved login; the password is never stored, so the
    /// focus lands there
    pub fn prefill(&mut self, config: &ServerConfig) {
        self.url = config.url.clone();
        self.username = config.username.clone();
        self.server_name = config.server_name.clone();
        self.password.clear();
        self.focus = LoginField::Password;
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionModel {
    /// Connection the browser is using; None means the connect screen
    pub active: Option<ServerConfig>,
    /// Saved logins, newest first, mirrored from the store
    pub history: Vec<ServerConfig>,
    pub form: LoginForm,
    /// Highlighted row in the history list, if the cursor is down there
    pub history_cursor: Option<usize>,
    pub login_in_flight: bool,
    /// Error line on the connect screen
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cycle_is_closed() {
        let mut field = LoginField::Url;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, LoginField::Url);
        assert_eq!(LoginField::Url.previous(), LoginField::ServerName);
    }

    #[test]
    fn test_prefill_skips_password() {
        let mut form = LoginForm {
            password: "stale".to_string(),
            ..LoginForm::default()
        };
        form.prefill(&ServerConfig {
            url: "http://nas.local".to_string(),
            username: "admin".to_string(),
            token: "t".to_string(),
            server_name: "NAS".to_string(),
        });
        assert_eq!(form.url, "http://nas.local");
        assert_eq!(form.username, "admin");
        assert_eq!(form.server_name, "NAS");
        assert!(form.password.is_empty());
        assert_eq!(form.focus, LoginField::Password);
    }
}
