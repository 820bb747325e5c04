use crate::models::Role;

/// Client-facing views an actor can be steered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    OwnerHome,
    UserDashboard,
}

impl View {
    pub fn path(&self) -> &'static str {
        match self {
            View::Login => "/login",
            View::OwnerHome => "/owner",
            View::UserDashboard => "/dashboard",
        }
    }

    fn home_of(role: Role) -> View {
        match role {
            Role::Owner => View::OwnerHome,
            Role::User => View::UserDashboard,
        }
    }
}

/// Outcome of the role gate. A mismatched role is steered to its own home
/// view, never hard-denied; the gate is advisory, not a security boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Permit,
    RedirectTo(View),
}

/// Decides whether the current actor may use a route, given the role the
/// route requires (`None` means any authenticated actor).
pub fn route_access(actor: Option<Role>, required: Option<Role>) -> Access {
    let Some(role) = actor else {
        return Access::RedirectTo(View::Login);
    };
    match required {
        Some(required) if required != role => Access::RedirectTo(View::home_of(role)),
        _ => Access::Permit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_actor_goes_to_login() {
        assert_eq!(
            route_access(None, Some(Role::Owner)),
            Access::RedirectTo(View::Login)
        );
        assert_eq!(route_access(None, None), Access::RedirectTo(View::Login));
    }

    #[test]
    fn matching_role_is_permitted() {
        assert_eq!(
            route_access(Some(Role::Owner), Some(Role::Owner)),
            Access::Permit
        );
        assert_eq!(
            route_access(Some(Role::User), Some(Role::User)),
            Access::Permit
        );
    }

    #[test]
    fn any_role_passes_when_none_is_required() {
        assert_eq!(route_access(Some(Role::User), None), Access::Permit);
        assert_eq!(route_access(Some(Role::Owner), None), Access::Permit);
    }

    #[test]
    fn mismatched_role_is_steered_home_not_denied() {
        assert_eq!(
            route_access(Some(Role::User), Some(Role::Owner)),
            Access::RedirectTo(View::UserDashboard)
        );
        assert_eq!(
            route_access(Some(Role::Owner), Some(Role::User)),
            Access::RedirectTo(View::OwnerHome)
        );
    }

    #[test]
    fn view_paths_are_stable() {
        assert_eq!(View::Login.path(), "/login");
        assert_eq!(View::OwnerHome.path(), "/owner");
        assert_eq!(View::UserDashboard.path(), "/dashboard");
    }
}
