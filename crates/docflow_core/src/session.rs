//! Identity context: the one active role of a console session.
//!
//! # Invariants
//! - At most one session is active; login replaces it, logout clears it.
//! - Only the console changes the session. Engines receive the role as an
//!   argument and never read it on their own.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ConsoleError, ConsoleResult};
use crate::model::role::Role;

/// An authenticated session. Credentials are checked upstream; any producer
/// of a `Role` satisfies the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub role: Role,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct SessionContext {
    current: RwLock<Option<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session for `role`, replacing any active one.
    pub fn login(&self, role: Role, now: DateTime<Utc>) -> ConsoleResult<Session> {
        let session = Session {
            id: Uuid::new_v4(),
            role,
            started_at: now,
        };
        let mut guard = self
            .current
            .write()
            .map_err(|_| ConsoleError::SessionLockPoisoned)?;
        if let Some(previous) = guard.replace(session.clone()) {
            info!(
                "event=session_replaced module=session status=ok previous_id={} previous_role={}",
                previous.id, previous.role
            );
        }
        info!(
            "event=session_start module=session status=ok session_id={} role={}",
            session.id, session.role
        );
        Ok(session)
    }

    /// Ends the active session. Returns the session that was closed, if any.
    pub fn logout(&self) -> ConsoleResult<Option<Session>> {
        let mut guard = self
            .current
            .write()
            .map_err(|_| ConsoleError::SessionLockPoisoned)?;
        let closed = guard.take();
        match &closed {
            Some(session) => info!(
                "event=session_end module=session status=ok session_id={} role={}",
                session.id, session.role
            ),
            None => info!("event=session_end module=session status=noop"),
        }
        Ok(closed)
    }

    pub fn current(&self) -> ConsoleResult<Option<Session>> {
        let guard = self
            .current
            .read()
            .map_err(|_| ConsoleError::SessionLockPoisoned)?;
        Ok(guard.clone())
    }

    /// The role every other component consumes.
    pub fn current_role(&self) -> ConsoleResult<Role> {
        let guard = self
            .current
            .read()
            .map_err(|_| ConsoleError::SessionLockPoisoned)?;
        guard
            .as_ref()
            .map(|session| session.role)
            .ok_or(ConsoleError::NoActiveSession)
    }
}
