//! Argon2id password hashing

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};
use core_config::{ConfigError, FromEnv, env_parse};

use crate::error::{UserError, UserResult};

/// Hashing cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    /// Argon2 time cost (iterations)
    pub work_factor: u32,
    /// Argon2 memory cost in KiB
    pub memory_kib: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            work_factor: Params::DEFAULT_T_COST,
            memory_kib: Params::DEFAULT_M_COST,
        }
    }
}

/// Environment variables:
/// - `PASSWORD_WORK_FACTOR` (default: 2)
/// - `PASSWORD_MEMORY_KIB` (default: 19456)
impl FromEnv for PasswordConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            work_factor: env_parse("PASSWORD_WORK_FACTOR", "2")?,
            memory_kib: env_parse("PASSWORD_MEMORY_KIB", "19456")?,
        })
    }
}

/// One-way salted password hashing producing PHC strings
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Fails when argon2 rejects the cost combination (e.g. a zero work factor)
    pub fn new(config: PasswordConfig) -> UserResult<Self> {
        let params = Params::new(config.memory_kib, config.work_factor, 1, None)
            .map_err(|e| UserError::PasswordHash(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, plaintext: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    /// `false` for a wrong password or a hash that does not parse
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                self.argon2()
                    .verify_password(plaintext.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::DEFAULT,
        }
    }
}
