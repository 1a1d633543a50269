//! Interactive credential prompts.
//!
//! Portal URL, username, and password are asked for at each run; they have no
//! flag, env, or config surface, so they cannot land in shell history or a
//! config file. The password prompt does not echo.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};

/// What the user typed. Held in memory for the lifetime of the run only.
pub struct Credentials {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

/// Prompts for portal base URL, username, and password.
///
/// All three are required; an empty answer aborts instead of sending a login
/// that cannot succeed.
pub fn read_credentials() -> Result<Credentials> {
    let base_url = read_line("Portal URL (e.g. https://acme.example.com): ")?;
    let username = read_line("Username (email): ")?;
    let password = rpassword::prompt_password("Password: ").context("read password")?;

    if !all_filled(&base_url, &username, &password) {
        bail!("portal URL, username, and password are all required");
    }

    Ok(Credentials {
        base_url,
        username,
        password,
    })
}

fn all_filled(base_url: &str, username: &str, password: &str) -> bool {
    !base_url.is_empty() && !username.is_empty() && !password.is_empty()
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush().context("flush prompt")?;
    let mut line = String::new();
    io::stdin().read_line(&mut line).context("read input")?;
    Ok(line.trim().to_string())
}
