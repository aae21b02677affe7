use anyhow::{bail, Context, Result};

/// S3-compatible object storage settings. All-or-nothing: either every
/// variable is set or resume files are not stored.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// HTTP mail relay settings. Without them alert emails are skipped.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub relay_url: String,
    pub api_key: String,
    pub from: String,
}

/// Credentials for the admin account ensured at startup.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub auth_secret: String,
    pub app_base_url: String,
    pub cookie_secure: bool,
    pub seed_jobs: bool,
    pub storage: Option<StorageConfig>,
    pub mail: Option<MailConfig>,
    pub admin: Option<AdminBootstrap>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let auth_secret = require_env("AUTH_SECRET")?;
        if auth_secret.len() < 16 {
            bail!("AUTH_SECRET must be at least 16 characters");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            auth_secret,
            app_base_url: optional_env("APP_BASE_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            cookie_secure: parse_flag("COOKIE_SECURE", false)?,
            seed_jobs: parse_flag("SEED_JOBS", true)?,
            storage: storage_from_env()?,
            mail: mail_from_env(),
            admin: admin_from_env()?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn storage_from_env() -> Result<Option<StorageConfig>> {
    let vars = [
        optional_env("S3_BUCKET"),
        optional_env("S3_ENDPOINT"),
        optional_env("AWS_ACCESS_KEY_ID"),
        optional_env("AWS_SECRET_ACCESS_KEY"),
    ];
    match vars {
        [Some(bucket), Some(endpoint), Some(access_key_id), Some(secret_access_key)] => {
            Ok(Some(StorageConfig {
                bucket,
                endpoint,
                region: optional_env("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                access_key_id,
                secret_access_key,
            }))
        }
        [None, None, None, None] => Ok(None),
        _ => bail!(
            "S3_BUCKET, S3_ENDPOINT, AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together"
        ),
    }
}

fn mail_from_env() -> Option<MailConfig> {
    let relay_url = optional_env("MAIL_RELAY_URL")?;
    let api_key = optional_env("MAIL_RELAY_API_KEY")?;
    Some(MailConfig {
        relay_url,
        api_key,
        from: optional_env("MAIL_FROM").unwrap_or_else(|| "alerts@rolerocket.app".to_string()),
    })
}

fn admin_from_env() -> Result<Option<AdminBootstrap>> {
    match (optional_env("ADMIN_EMAIL"), optional_env("ADMIN_PASSWORD")) {
        (Some(email), Some(password)) => {
            if password.chars().count() < 8 {
                bail!("ADMIN_PASSWORD must be at least 8 characters");
            }
            Ok(Some(AdminBootstrap {
                email: email.trim().to_lowercase(),
                password,
            }))
        }
        (None, None) => Ok(None),
        _ => bail!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together"),
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(key: &str, default: bool) -> Result<bool> {
    match optional_env(key) {
        None => Ok(default),
        Some(v) => parse_bool(&v).with_context(|| format!("{key} must be true or false")),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid boolean '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool(" yes ").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(!parse_bool("off").unwrap());
    }

    #[test]
    fn test_parse_bool_rejects_garbage() {
        assert!(parse_bool("maybe").is_err());
    }
}
