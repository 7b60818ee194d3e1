//! # Access Guard
//!
//! Route table and role-based navigation decisions.
//!
//! The guard never renders a protected view for the wrong audience: an unauthenticated visitor
//! is sent to `/login`, and an authenticated user outside the route's role set is sent to their
//! own home view rather than shown an "access denied" page.

use std::fmt;

use crate::errors::{DeskError, DeskResult};
use crate::models::Role;

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    /// Identity has not been resolved yet (persisted session still being read).
    Loading,
    Unauthenticated,
    Authenticated(Role),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    AdminHome,
    AdminUserDetails(String),
    TutorHome,
    StudentHome,
}

impl Route {
    /// Parses a navigation path such as `/admin/user/42`.
    pub fn parse(path: &str) -> DeskResult<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Ok(Route::Root),
            ["login"] => Ok(Route::Login),
            ["admin"] => Ok(Route::AdminHome),
            ["admin", "user", id] => Ok(Route::AdminUserDetails((*id).to_string())),
            ["tutor"] => Ok(Route::TutorHome),
            ["student"] => Ok(Route::StudentHome),
            _ => Err(DeskError::NotFound(format!("No view at {path:?}"))),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::AdminHome => "/admin".to_string(),
            Route::AdminUserDetails(id) => format!("/admin/user/{id}"),
            Route::TutorHome => "/tutor".to_string(),
            Route::StudentHome => "/student".to_string(),
        }
    }

    /// Roles allowed to view this route. `None` means the route is public.
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Route::Root | Route::Login => None,
            Route::AdminHome | Route::AdminUserDetails(_) => Some(&[Role::Admin]),
            Route::TutorHome => Some(&[Role::Tutor]),
            Route::StudentHome => Some(&[Role::Student]),
        }
    }

    pub fn home_for(role: Role) -> Route {
        match role {
            Role::Admin => Route::AdminHome,
            Role::Tutor => Route::TutorHome,
            Role::Student => Route::StudentHome,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Identity still loading; show a placeholder and decide later.
    Placeholder,
    Redirect(Route),
    Render,
}

/// Decides what to do with a navigation that requires one of `allowed` roles.
pub fn guard(state: AccessState, allowed: &[Role]) -> GuardDecision {
    match state {
        AccessState::Loading => GuardDecision::Placeholder,
        AccessState::Unauthenticated => GuardDecision::Redirect(Route::Login),
        AccessState::Authenticated(role) if allowed.contains(&role) => GuardDecision::Render,
        AccessState::Authenticated(role) => GuardDecision::Redirect(Route::home_for(role)),
    }
}

/// Resolves a full navigation to `route`, including the public routes.
pub fn navigate(state: AccessState, route: &Route) -> GuardDecision {
    match route {
        Route::Root => GuardDecision::Redirect(Route::Login),
        Route::Login => GuardDecision::Render,
        protected => match protected.allowed_roles() {
            Some(roles) => guard(state, roles),
            None => GuardDecision::Render,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_paths_round_trip() {
        for path in ["/", "/login", "/admin", "/admin/user/u-7", "/tutor", "/student"] {
            assert_eq!(Route::parse(path).unwrap().path(), path);
        }
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(Route::parse("/tutor/").unwrap(), Route::TutorHome);
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert!(matches!(Route::parse("/settings"), Err(DeskError::NotFound(_))));
    }
}
