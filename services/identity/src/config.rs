use chrono::Duration;

/// Identity service configuration loaded from environment variables.
#[derive(Debug)]
pub struct IdentityConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// TCP port to listen on (default 3110). Env var: `IDENTITY_PORT`.
    pub identity_port: u16,
    /// bcrypt work factor (default 12). Env var: `BCRYPT_COST`.
    pub bcrypt_cost: u32,
    /// Verification-code lifetime in hours (default 24). Env var: `VERIFICATION_EXPIRY_HOURS`.
    pub verification_expiry_hours: i64,
    /// Reset-token lifetime in hours (default 1). Env var: `RESET_EXPIRY_HOURS`.
    pub reset_expiry_hours: i64,
    /// Idle timeout after which a session is rejected and deleted
    /// (default 1800). Env var: `SESSION_IDLE_TIMEOUT_SECS`.
    pub session_idle_timeout_secs: i64,
    /// Sweep cutoff in days for the `sweep` binary (default 30).
    /// Env var: `SESSION_SWEEP_MAX_IDLE_DAYS`.
    pub session_sweep_max_idle_days: i64,
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            identity_port: env_or("IDENTITY_PORT", 3110),
            bcrypt_cost: env_or("BCRYPT_COST", bcrypt::DEFAULT_COST),
            verification_expiry_hours: env_or("VERIFICATION_EXPIRY_HOURS", 24),
            reset_expiry_hours: env_or("RESET_EXPIRY_HOURS", 1),
            session_idle_timeout_secs: env_or("SESSION_IDLE_TIMEOUT_SECS", 1800),
            session_sweep_max_idle_days: env_or("SESSION_SWEEP_MAX_IDLE_DAYS", 30),
        }
    }

    /// The tunables the use cases need, as one value object.
    pub fn security_policy(&self) -> SecurityPolicy {
        SecurityPolicy {
            bcrypt_cost: self.bcrypt_cost,
            verification_expiry: Duration::hours(self.verification_expiry_hours),
            reset_expiry: Duration::hours(self.reset_expiry_hours),
            session_idle_timeout: Duration::seconds(self.session_idle_timeout_secs),
        }
    }
}

/// Expiry windows and hashing cost, passed into each use case explicitly
/// rather than read from ambient statics.
#[derive(Debug, Clone)]
pub struct SecurityPolicy {
    pub bcrypt_cost: u32,
    pub verification_expiry: Duration,
    pub reset_expiry: Duration,
    pub session_idle_timeout: Duration,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
