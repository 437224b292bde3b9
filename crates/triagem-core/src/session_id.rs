//! Session identifier conventions.
//!
//! A session id reads `<PREFIX>-<unix millis>-<random>`, for example
//! `AN-1760000000000-3f9a1`. The prefix is derived from the instrument id so
//! an operator can tell which screening a record belongs to at a glance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

const PREFIX_LEN: usize = 2;
const RANDOM_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct SessionId(String);

impl SessionId {
    /// Allocate a fresh id for a session of `instrument_id` started at `now`.
    pub fn generate(instrument_id: &str, now: jiff::Timestamp) -> Result<Self, CoreError> {
        let prefix = prefix_for(instrument_id)?;
        let random = uuid::Uuid::new_v4().simple().to_string();
        Ok(Self(format!(
            "{prefix}-{}-{}",
            now.as_millisecond(),
            &random[..RANDOM_LEN]
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The instrument prefix segment (e.g. `AN`).
    pub fn prefix(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }
}

/// Upper-cased first two alphanumeric characters of an instrument id.
pub fn prefix_for(instrument_id: &str) -> Result<String, CoreError> {
    let prefix: String = instrument_id
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(PREFIX_LEN)
        .collect::<String>()
        .to_ascii_uppercase();

    if prefix.len() < PREFIX_LEN {
        return Err(CoreError::InvalidPrefix(instrument_id.to_string()));
    }
    Ok(prefix)
}

impl FromStr for SessionId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidSessionId(s.to_string());

        let mut parts = s.splitn(3, '-');
        let (Some(prefix), Some(millis), Some(random)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let prefix_ok = prefix.len() == PREFIX_LEN
            && prefix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        let millis_ok = !millis.is_empty() && millis.chars().all(|c| c.is_ascii_digit());
        let random_ok = random.len() == RANDOM_LEN && random.chars().all(|c| c.is_ascii_alphanumeric());

        if prefix_ok && millis_ok && random_ok {
            Ok(Self(s.to_string()))
        } else {
            Err(invalid())
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
