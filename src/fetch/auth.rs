use clap::ValueEnum;
use std::str::FromStr;

/// Credentials sent with HTTP fetches
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// Use an API key authentication via headers
    Apikey(String),
    /// Use username and password authentication via Basic Auth headers
    Basic(String, String),
    /// Don't use any authentication
    None,
}

impl Auth {
    pub fn new(
        r#type: &AuthType,
        username: Option<String>,
        password: Option<String>,
        apikey: Option<String>,
    ) -> Self {
        match (r#type, username, password, apikey) {
            (AuthType::Apikey, _, _, Some(apikey)) => Self::Apikey(apikey),
            (AuthType::Basic, Some(username), Some(password), _) => Self::Basic(username, password),
            _ => Self::None,
        }
    }

    /// Pick credentials from `YAML_SOURCE_*` environment variables
    ///
    /// An API key wins over username/password. With `type` set, only that
    /// kind of credential is considered.
    pub fn from_env(r#type: Option<&AuthType>) -> Self {
        let username = std::env::var("YAML_SOURCE_USERNAME").ok();
        let password = std::env::var("YAML_SOURCE_PASSWORD").ok();
        let apikey = std::env::var("YAML_SOURCE_APIKEY").ok();

        let r#type = match r#type {
            Some(r#type) => r#type.clone(),
            None if apikey.is_some() => AuthType::Apikey,
            None if username.is_some() && password.is_some() => AuthType::Basic,
            None => AuthType::None,
        };
        Self::new(&r#type, username, password, apikey)
    }
}

impl std::fmt::Display for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apikey(_) => write!(f, "Apikey"),
            Self::Basic(_, _) => write!(f, "Basic"),
            Self::None => write!(f, "None"),
        }
    }
}

// Credentials stay out of debug logs
impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Auth::{}", self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AuthType {
    Apikey,
    Basic,
    None,
}

impl FromStr for AuthType {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apikey" => Ok(Self::Apikey),
            "basic" => Ok(Self::Basic),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}
