//! Issue a bearer token for a user id with the configured shared secret.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;

use clap::Parser;
use ortho_config::OrthoConfig;
use places_backend::domain::UserId;
use places_backend::outbound::token::{DEFAULT_TOKEN_TTL_SECS, JwtTokenCodec};
use places_backend::settings::AppSettings;

/// `mint-token` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mint-token",
    about = "Sign an HS256 bearer token for the places API",
    version
)]
struct CliArgs {
    /// Id of the user the token authenticates.
    #[arg(long = "user-id", value_name = "uuid")]
    user_id: UserId,
    /// Optional email claim.
    #[arg(long, value_name = "address")]
    email: Option<String>,
    /// Token lifetime in seconds.
    #[arg(long = "ttl-secs", value_name = "seconds", default_value_t = DEFAULT_TOKEN_TTL_SECS)]
    ttl_secs: i64,
    /// Signing secret. Falls back to `PLACES_JWT_SECRET` when omitted.
    #[arg(long, value_name = "secret")]
    secret: Option<String>,
}

fn resolve_secret(explicit: Option<String>) -> io::Result<String> {
    if let Some(secret) = explicit.filter(|s| !s.trim().is_empty()) {
        return Ok(secret);
    }
    // Settings are read from the environment only; the CLI belongs to clap.
    let settings = AppSettings::load_from_iter([OsString::from("mint-token")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    settings
        .jwt_secret()
        .map_err(|error| io::Error::other(error.to_string()))
}

fn main() -> io::Result<()> {
    let args = CliArgs::parse();
    let secret = resolve_secret(args.secret)?;
    let codec = JwtTokenCodec::new(&secret).with_ttl(chrono::Duration::seconds(args.ttl_secs));
    let token = codec
        .issue(&args.user_id, args.email.as_deref())
        .map_err(|error| io::Error::other(error.to_string()))?;
    println!("{token}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use env_lock::lock_env;
    use rstest::rstest;

    #[rstest]
    #[case::help("--help", ErrorKind::DisplayHelp)]
    #[case::version("--version", ErrorKind::DisplayVersion)]
    fn informational_flags_exit_cleanly(#[case] flag: &str, #[case] kind: ErrorKind) {
        let err = CliArgs::try_parse_from(["mint-token", flag]).expect_err("display request");
        assert_eq!(err.kind(), kind);
        assert_eq!(err.exit_code(), 0);
    }

    #[rstest]
    fn parses_user_id_and_defaults_ttl() {
        let user = UserId::random();
        let args = CliArgs::try_parse_from(["mint-token", "--user-id", &user.to_string()])
            .expect("valid args");
        assert_eq!(args.user_id, user);
        assert_eq!(args.ttl_secs, DEFAULT_TOKEN_TTL_SECS);
        assert!(args.secret.is_none());
    }

    #[rstest]
    fn explicit_secret_wins() {
        let secret = resolve_secret(Some("cli-secret".to_owned())).expect("secret");
        assert_eq!(secret, "cli-secret");
    }

    #[rstest]
    fn blank_secret_falls_back_to_environment() {
        let _guard = lock_env([("PLACES_JWT_SECRET", Some("env-secret".to_owned()))]);
        let secret = resolve_secret(Some("   ".to_owned())).expect("secret");
        assert_eq!(secret, "env-secret");
    }
}
