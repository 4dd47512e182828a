// src/timesheet/actor.rs
// "me" shorthand resolution against the configured actor

use crate::error::{ProductiveError, Result};

/// Token callers use to mean "the configured user"
pub const CURRENT_ACTOR: &str = "me";

/// Resolve a person reference.
///
/// Any token other than `"me"` is an explicit id and is returned untouched;
/// whether it exists is for the Productive API to decide.
pub fn resolve_actor(token: &str, configured: Option<&str>) -> Result<String> {
    if token != CURRENT_ACTOR {
        return Ok(token.to_string());
    }
    configured
        .map(str::to_string)
        .ok_or(ProductiveError::NoActorConfigured)
}

/// Process-wide identity behind `"me"`, fixed at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorIdentity(Option<String>);

impl ActorIdentity {
    pub fn new(person_id: Option<String>) -> Self {
        Self(person_id.filter(|id| !id.trim().is_empty()))
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn person_id(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    pub fn resolve(&self, token: &str) -> Result<String> {
        resolve_actor(token, self.person_id())
    }

    /// Resolve an optional filter value, leaving `None` alone
    pub fn resolve_opt(&self, token: Option<&str>) -> Result<Option<String>> {
        token.map(|t| self.resolve(t)).transpose()
    }
}
