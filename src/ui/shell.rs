use std::io::{self, BufRead, Write};

use console::Term;
use dialoguer::Password;
use tracing::debug;

use crate::auth::{CredentialManager, CredentialStore, Credentials};
use crate::ui::notice::{welcome, Notice, APP_TITLE};
use crate::ui::screen::{Navigator, Screen, Transition};

/// Where the password field of a form is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordInput {
    /// Same line reader as every other field.
    Echoed,
    /// Hidden prompt on the controlling terminal.
    Masked,
}

/// Line-oriented front-end over the three screens.
///
/// Every read blocks the calling thread; store calls are awaited in turn.
pub struct Shell<'a, S, R, W> {
    manager: &'a CredentialManager<S>,
    nav: Navigator,
    input: R,
    output: W,
    password_input: PasswordInput,
}

impl<'a, S, R, W> Shell<'a, S, R, W>
where
    S: CredentialStore,
    R: BufRead,
    W: Write,
{
    pub fn new(manager: &'a CredentialManager<S>, input: R, output: W) -> Self {
        Self {
            manager,
            nav: Navigator::new(),
            input,
            output,
            password_input: PasswordInput::Echoed,
        }
    }

    /// Reads passwords through a hidden terminal prompt when `masked`.
    pub fn mask_passwords(mut self, masked: bool) -> Self {
        self.password_input = if masked {
            PasswordInput::Masked
        } else {
            PasswordInput::Echoed
        };
        self
    }

    #[cfg(test)]
    pub fn screen(&self) -> &Screen {
        self.nav.current()
    }

    /// Runs until the user quits or input ends.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "== {APP_TITLE} ==")?;
        loop {
            self.render()?;
            let Some(choice) = self.read_line()? else {
                break;
            };
            let screen = self.nav.current().clone();
            let keep_going = match (&screen, choice.trim()) {
                (_, "q") => false,
                (Screen::Login, "1") => self.login().await?,
                (Screen::Login, "2") => {
                    self.nav.apply(Transition::OpenRegister)?;
                    true
                }
                (Screen::Register, "1") => self.register().await?,
                (Screen::Register, "2") => {
                    self.nav.apply(Transition::BackToLogin)?;
                    true
                }
                (Screen::Home { .. }, "1") => {
                    self.nav.apply(Transition::Logout)?;
                    true
                }
                (_, other) => {
                    debug!(choice = %other, "unknown menu choice");
                    writeln!(self.output, "Pilihan tidak dikenal.")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn render(&mut self) -> std::io::Result<()> {
        writeln!(self.output)?;
        match self.nav.current() {
            Screen::Login => {
                writeln!(self.output, "Silahkan Login")?;
                writeln!(self.output, "  1) Login")?;
                writeln!(self.output, "  2) Belum punya akun? Registrasi")?;
            }
            Screen::Register => {
                writeln!(self.output, "Buat Akun Baru")?;
                writeln!(self.output, "  1) Daftar")?;
                writeln!(self.output, "  2) Kembali ke Login")?;
            }
            Screen::Home { username } => {
                writeln!(self.output, "{}", welcome(username))?;
                writeln!(self.output, "  1) Keluar")?;
            }
        }
        writeln!(self.output, "  q) Tutup aplikasi")?;
        write!(self.output, "> ")?;
        self.output.flush()
    }

    async fn login(&mut self) -> anyhow::Result<bool> {
        let Some(creds) = self.read_form("Username", "Password")? else {
            return Ok(false);
        };
        match self.manager.login(&creds.username, &creds.password).await {
            Ok(user) => {
                self.nav.apply(Transition::LoggedIn(user.username))?;
            }
            Err(e) => writeln!(self.output, "{}", Notice::from(&e))?,
        }
        Ok(true)
    }

    async fn register(&mut self) -> anyhow::Result<bool> {
        let Some(creds) = self.read_form("Username Baru", "Password Baru")? else {
            return Ok(false);
        };
        match self.manager.register(&creds.username, &creds.password).await {
            Ok(_) => {
                writeln!(self.output, "{}", Notice::registered())?;
                self.nav.apply(Transition::BackToLogin)?;
            }
            Err(e) => writeln!(self.output, "{}", Notice::from(&e))?,
        }
        Ok(true)
    }

    fn read_form(&mut self, user_prompt: &str, pass_prompt: &str) -> io::Result<Option<Credentials>> {
        write!(self.output, "{user_prompt}: ")?;
        self.output.flush()?;
        let Some(username) = self.read_line()? else {
            return Ok(None);
        };
        let password = match self.password_input {
            PasswordInput::Echoed => {
                write!(self.output, "{pass_prompt}: ")?;
                self.output.flush()?;
                match self.read_line()? {
                    Some(p) => p,
                    None => return Ok(None),
                }
            }
            PasswordInput::Masked => Password::new()
                .with_prompt(pass_prompt)
                .allow_empty_password(true)
                .interact_on(&Term::stdout())
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?,
        };
        Ok(Some(Credentials::new(username, password)))
    }

    /// Returns `None` at end of input. Only the line terminator is stripped;
    /// invalid UTF-8 is replaced rather than rejected.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::light_hasher;
    use crate::auth::SqliteStore;
    use crate::db::Database;

    async fn manager() -> (tempfile::TempDir, CredentialManager<SqliteStore>) {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = Database::new(dir.path().join("users.db"));
        db.init().await.expect("init");
        let manager = CredentialManager::new(SqliteStore::new(db), light_hasher()).unwrap();
        (dir, manager)
    }

    async fn session(
        manager: &CredentialManager<SqliteStore>,
        script: &[u8],
    ) -> (Screen, String) {
        let mut out = Vec::new();
        let screen = {
            let mut shell = Shell::new(manager, script, &mut out);
            shell.run().await.expect("shell run");
            shell.screen().clone()
        };
        (screen, String::from_utf8(out).expect("utf-8 output"))
    }

    #[tokio::test]
    async fn register_login_logout() {
        let (_dir, manager) = manager().await;
        let script = b"2\n1\nrina\nrahasia\n1\nrina\nrahasia\n";
        let (screen, out) = session(&manager, script).await;

        assert!(out.contains("Buat Akun Baru"));
        assert!(out.contains("[info] Registrasi: Registrasi berhasil!"));
        assert!(out.contains("Selamat datang, rina!"));
        assert_eq!(
            screen,
            Screen::Home {
                username: "rina".into()
            }
        );

        let (screen, _) = session(&manager, b"1\nrina\nrahasia\n1\n").await;
        assert_eq!(screen, Screen::Login);
    }

    #[tokio::test]
    async fn failed_logins_share_one_message() {
        let (_dir, manager) = manager().await;
        manager.register("rina", "rahasia").await.unwrap();

        let (screen, out) = session(&manager, b"1\nrina\nsalah\n1\nhantu\nrahasia\nq\n").await;
        assert_eq!(screen, Screen::Login);
        assert_eq!(
            out.matches("[galat] Login Gagal: Username atau password salah")
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn register_errors_keep_register_screen() {
        let (_dir, manager) = manager().await;
        manager.register("rina", "rahasia").await.unwrap();

        let (screen, out) = session(&manager, b"2\n1\n\nrahasia\n1\nrina\nlain\n").await;
        assert_eq!(screen, Screen::Register);
        assert!(out.contains("[peringatan] Input Kosong: Isi semua data!"));
        assert!(out.contains("[galat] Gagal: Username sudah digunakan"));
    }

    #[tokio::test]
    async fn unknown_choice_and_crlf_input() {
        let (_dir, manager) = manager().await;
        manager.register("rina", "rahasia").await.unwrap();

        let (screen, out) = session(&manager, b"9\r\n1\r\nrina\r\nrahasia\r\n").await;
        assert!(out.contains("Pilihan tidak dikenal."));
        assert_eq!(
            screen,
            Screen::Home {
                username: "rina".into()
            }
        );
    }

    #[tokio::test]
    async fn invalid_utf8_line_keeps_session_alive() {
        let (_dir, manager) = manager().await;
        manager.register("rina", "rahasia").await.unwrap();

        let (screen, out) = session(&manager, b"1\nrina\n\xff\xfe\n1\nrina\nrahasia\n").await;
        assert!(out.contains("[galat] Login Gagal: Username atau password salah"));
        assert_eq!(
            screen,
            Screen::Home {
                username: "rina".into()
            }
        );
    }

    #[tokio::test]
    async fn passwords_echo_unless_masked() {
        let (_dir, manager) = manager().await;
        let mut out = Vec::new();
        let shell = Shell::new(&manager, &b""[..], &mut out);
        assert_eq!(shell.password_input, PasswordInput::Echoed);
        let shell = shell.mask_passwords(true);
        assert_eq!(shell.password_input, PasswordInput::Masked);
        let shell = shell.mask_passwords(false);
        assert_eq!(shell.password_input, PasswordInput::Echoed);
    }

    #[tokio::test]
    async fn eof_inside_form_ends_session() {
        let (_dir, manager) = manager().await;
        let (screen, out) = session(&manager, b"2\n1\nrina\n").await;
        assert_eq!(screen, Screen::Register);
        assert!(out.contains("Password Baru: "));
        assert!(manager.store().find_by_username("rina").await.unwrap().is_none());
    }
}
