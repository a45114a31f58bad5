use std::str::FromStr;

/// The tokens the MCU may send, one per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Clean,
    PubGet,
    Upgrade,
}

impl FromStr for Token {
    type Err = ();
    /// Expects the canonical form produced by [`normalize`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLEAN" => Ok(Token::Clean),
            "PUBGET" => Ok(Token::PubGet),
            "UPGRADE" => Ok(Token::Upgrade),
            _ => Err(()),
        }
    }
}

/// Canonical token form: surrounding whitespace stripped, uppercased.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Static token -> shell command mapping, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct CommandTable {
    clean: String,
    pub_get: String,
    upgrade: String,
}

impl CommandTable {
    pub fn new(clean: &str, pub_get: &str, upgrade: &str) -> Self {
        Self {
            clean: clean.into(),
            pub_get: pub_get.into(),
            upgrade: upgrade.into(),
        }
    }

    pub fn flutter() -> Self {
        Self::new("flutter clean", "flutter pub get", "flutter upgrade")
    }

    pub fn command(&self, token: Token) -> &str {
        match token {
            Token::Clean => &self.clean,
            Token::PubGet => &self.pub_get,
            Token::Upgrade => &self.upgrade,
        }
    }

    /// The program every command resolves through; the readiness probe
    /// checks this before the daemon starts listening.
    pub fn tool(&self) -> &str {
        self.clean.split_whitespace().next().unwrap_or(&self.clean)
    }
}
