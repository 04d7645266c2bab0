//! Authentication state
//!
//! One tagged state, one accessor. Whether the current user is an admin is
//! derived from the state instead of being tracked separately.

use crate::api::AccountsApi;
use crate::types::ClientError;
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Instructor,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
            Role::Student => "student",
        })
    }
}

/// Who is logged in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// ID number for students and instructors, login name for admins
    pub id: String,
    pub display_name: String,
}

impl Profile {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Profile {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    LoggedOut,
    LoggedIn { role: Role, profile: Profile },
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    state: AuthState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn login(&mut self, role: Role, profile: Profile) {
        info!(%role, id = %profile.id, "Logged in");
        self.state = AuthState::LoggedIn { role, profile };
    }

    /// Drop the local session; returns the state that was replaced
    pub fn logout(&mut self) -> AuthState {
        std::mem::take(&mut self.state)
    }

    pub fn role(&self) -> Option<Role> {
        match &self.state {
            AuthState::LoggedIn { role, .. } => Some(*role),
            AuthState::LoggedOut => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    /// The logged-in profile if the session has `role`
    pub fn require(&self, role: Role) -> Result<&Profile, ClientError> {
        match &self.state {
            AuthState::LoggedIn {
                role: current,
                profile,
            } if *current == role => Ok(profile),
            _ => Err(ClientError::not_authenticated(&role.to_string())),
        }
    }

    /// Log out, telling the server first when the user is a student
    ///
    /// If the server refuses, the session stays logged in and the error is
    /// returned.
    pub async fn logout_remote(
        &mut self,
        api: &dyn AccountsApi,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError> {
        if let AuthState::LoggedIn {
            role: Role::Student,
            profile,
        } = &self.state
        {
            api.logout_student(&profile.id, cancel).await?;
        }
        self.logout();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_logged_out() {
        let session = Session::new();
        assert_eq!(session.state(), &AuthState::LoggedOut);
        assert!(!session.is_admin());
        assert!(session.role().is_none());
    }

    #[test]
    fn test_admin_is_derived_from_state() {
        let mut session = Session::new();
        session.login(Role::Admin, Profile::new("admin", "Administrator"));
        assert!(session.is_admin());

        session.login(Role::Instructor, Profile::new("I1", "Carla Reyes"));
        assert!(!session.is_admin());
    }

    #[test]
    fn test_logout_returns_previous_state() {
        let mut session = Session::new();
        session.login(Role::Student, Profile::new("S1", "Ana Cruz"));

        let previous = session.logout();
        assert!(matches!(
            previous,
            AuthState::LoggedIn {
                role: Role::Student,
                ..
            }
        ));
        assert_eq!(session.state(), &AuthState::LoggedOut);
    }

    #[test]
    fn test_require_checks_role() {
        let mut session = Session::new();
        assert_eq!(
            session.require(Role::Admin),
            Err(ClientError::not_authenticated("admin"))
        );

        session.login(Role::Admin, Profile::new("admin", "Administrator"));
        assert_eq!(session.require(Role::Admin).map(|p| p.id.as_str()), Ok("admin"));
        assert!(session.require(Role::Student).is_err());
    }
}
