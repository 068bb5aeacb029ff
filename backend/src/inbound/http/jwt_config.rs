//! Bearer token configuration parsing and validation.
//!
//! Token settings come from the environment so key material never passes
//! through command-line arguments or config files:
//!
//! - `JWT_KEY_FILE`: path to the HMAC key (default `/var/run/secrets/jwt_key`).
//! - `JWT_ISSUER` / `JWT_AUDIENCE`: stamped into and required on tokens when
//!   non-blank.
//! - `JWT_ALLOW_EPHEMERAL`: permit a random per-process key (debug only).

use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

const JWT_KEY_DEFAULT_PATH: &str = "/var/run/secrets/jwt_key";
const JWT_KEY_MIN_LEN: usize = 32;
const EPHEMERAL_KEY_LEN: usize = 64;
const FINGERPRINT_BYTES: usize = 8;
const KEY_FILE_ENV: &str = "JWT_KEY_FILE";
const ISSUER_ENV: &str = "JWT_ISSUER";
const AUDIENCE_ENV: &str = "JWT_AUDIENCE";
const ALLOW_EPHEMERAL_ENV: &str = "JWT_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing keys and invalid toggles with warnings.
    Debug,
    /// Release builds require a readable key of adequate length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Token settings derived from the environment.
pub struct JwtSettings {
    /// HMAC signing key, wiped on drop.
    pub key: Zeroizing<Vec<u8>>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl JwtSettings {
    /// Truncated SHA-256 fingerprint of the key, safe to log.
    #[must_use]
    pub fn key_fingerprint(&self) -> String {
        key_fingerprint(&self.key)
    }
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("key", &self.key_fingerprint())
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum JwtConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the key file failed.
    #[error("failed to read token key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file exists but is too short for release builds.
    #[error("token key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not allow ephemeral keys.
    #[error("JWT_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build token settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use clinica_backend::inbound::http::jwt_config::{jwt_settings_from_env, BuildMode};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("jwt_key_example");
/// std::fs::write(&key_path, vec![b'k'; 32])?;
///
/// let key_path = key_path.to_str().expect("valid path").to_string();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "JWT_KEY_FILE" => Some(key_path.clone()),
///     "JWT_ISSUER" => Some("clinica".to_string()),
///     _ => None,
/// });
///
/// let settings = jwt_settings_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.issuer.as_deref(), Some("clinica"));
/// # Ok(())
/// # }
/// ```
pub fn jwt_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<JwtSettings, JwtConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let key = key_from_env(env, mode, allow_ephemeral)?;
    Ok(JwtSettings {
        key,
        issuer: non_blank(env.string(ISSUER_ENV)),
        audience: non_blank(env.string(AUDIENCE_ENV)),
    })
}

/// First eight bytes of the key's SHA-256 digest, hex encoded.
#[must_use]
pub fn key_fingerprint(key: &[u8]) -> String {
    let digest = Sha256::digest(key);
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, JwtConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(JwtConfigError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid JWT_ALLOW_EPHEMERAL; defaulting to disabled");
            Ok(false)
        }
        None => Err(JwtConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn ephemeral_key() -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; EPHEMERAL_KEY_LEN]);
    rand::thread_rng().fill_bytes(key.as_mut_slice());
    key
}

fn key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Zeroizing<Vec<u8>>, JwtConfigError> {
    let key_path = env
        .string(KEY_FILE_ENV)
        .unwrap_or_else(|| JWT_KEY_DEFAULT_PATH.to_string());
    let path = PathBuf::from(key_path);

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < JWT_KEY_MIN_LEN {
                if mode == BuildMode::Release {
                    bytes.zeroize();
                    return Err(JwtConfigError::KeyTooShort {
                        path,
                        length,
                        min_len: JWT_KEY_MIN_LEN,
                    });
                }
                warn!(path = %path.display(), length, "token key shorter than recommended");
            }
            Ok(Zeroizing::new(bytes))
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary token key (dev only)"
                );
                Ok(ephemeral_key())
            } else {
                Err(JwtConfigError::KeyRead {
                    path,
                    source: error,
                })
            }
        }
    }
}
