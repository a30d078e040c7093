use std::fmt;

use crate::auth::AuthError;

pub const APP_TITLE: &str = "CRYPTO";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Warning,
    Critical,
}

/// A blocking message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub title: &'static str,
    pub message: &'static str,
}

impl Notice {
    pub fn registered() -> Self {
        Self {
            severity: Severity::Information,
            title: "Registrasi",
            message: "Registrasi berhasil!",
        }
    }
}

impl From<&AuthError> for Notice {
    fn from(err: &AuthError) -> Self {
        match err {
            AuthError::EmptyInput => Self {
                severity: Severity::Warning,
                title: "Input Kosong",
                message: "Isi semua data!",
            },
            AuthError::UsernameTaken => Self {
                severity: Severity::Critical,
                title: "Gagal",
                message: "Username sudah digunakan",
            },
            AuthError::AuthenticationFailed => Self {
                severity: Severity::Critical,
                title: "Login Gagal",
                message: "Username atau password salah",
            },
            AuthError::Internal(_) => Self {
                severity: Severity::Critical,
                title: "Kesalahan",
                message: "Terjadi kesalahan, silakan coba lagi",
            },
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Information => "info",
            Severity::Warning => "peringatan",
            Severity::Critical => "galat",
        };
        write!(f, "[{tag}] {}: {}", self.title, self.message)
    }
}

pub fn welcome(username: &str) -> String {
    format!("Selamat datang, {username}!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_failure_notice_is_generic() {
        let notice = Notice::from(&AuthError::AuthenticationFailed);
        assert_eq!(notice.title, "Login Gagal");
        assert_eq!(
            notice.to_string(),
            "[galat] Login Gagal: Username atau password salah"
        );
    }

    #[test]
    fn internal_notice_hides_details() {
        let notice = Notice::from(&AuthError::Internal(anyhow::anyhow!("disk I/O error at /var")));
        assert!(!notice.to_string().contains("/var"));
        assert_eq!(notice.severity, Severity::Critical);
    }

    #[test]
    fn welcome_includes_username() {
        assert_eq!(welcome("dewi"), "Selamat datang, dewi!");
    }
}
