use thiserror::Error;

use crate::config::Config;

/// Proof that the operator logged into the back-office.
///
/// Protected screens take a reference to one, so they cannot be reached
/// without passing the login screen. It only gates the terminal UI; the HTTP
/// API checks its own bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    operator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("ADMIN_PASSWORD is not set")]
    NotConfigured,
    #[error("Wrong password")]
    WrongPassword,
}

impl AdminSession {
    pub fn login(config: &Config, operator: &str, password: &str) -> Result<Self, LoginError> {
        let expected = config
            .admin_password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(LoginError::NotConfigured)?;

        if password != expected {
            return Err(LoginError::WrongPassword);
        }

        let operator = operator.trim();
        Ok(Self {
            operator: if operator.is_empty() {
                "admin".to_string()
            } else {
                operator.to_string()
            },
        })
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }
}
