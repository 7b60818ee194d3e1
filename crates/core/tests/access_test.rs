use classdesk_core::access::{guard, navigate, AccessState, GuardDecision, Route};
use classdesk_core::models::Role;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn loading_defers_with_placeholder() {
    assert_eq!(guard(AccessState::Loading, &[Role::Admin]), GuardDecision::Placeholder);
}

#[test]
fn unauthenticated_goes_to_login() {
    assert_eq!(
        guard(AccessState::Unauthenticated, &[Role::Tutor]),
        GuardDecision::Redirect(Route::Login)
    );
}

#[rstest]
#[case(Role::Admin, &[Role::Tutor], Route::AdminHome)]
#[case(Role::Admin, &[Role::Student], Route::AdminHome)]
#[case(Role::Tutor, &[Role::Admin], Route::TutorHome)]
#[case(Role::Tutor, &[Role::Student], Route::TutorHome)]
#[case(Role::Student, &[Role::Admin], Route::StudentHome)]
#[case(Role::Student, &[Role::Tutor], Route::StudentHome)]
fn misrouted_user_lands_on_own_home(
    #[case] role: Role,
    #[case] allowed: &[Role],
    #[case] expected: Route,
) {
    assert_eq!(
        guard(AccessState::Authenticated(role), allowed),
        GuardDecision::Redirect(expected)
    );
}

#[rstest]
#[case(Role::Admin)]
#[case(Role::Tutor)]
#[case(Role::Student)]
fn allowed_role_renders(#[case] role: Role) {
    assert_eq!(guard(AccessState::Authenticated(role), &[role]), GuardDecision::Render);
}

#[test]
fn disallowed_roles_never_render() {
    let homes = [Route::AdminHome, Route::TutorHome, Route::StudentHome, Route::Login];
    let protected = [
        Route::AdminHome,
        Route::AdminUserDetails("u1".to_string()),
        Route::TutorHome,
        Route::StudentHome,
    ];

    for route in &protected {
        let allowed = route.allowed_roles().unwrap();
        let states = Role::ALL
            .iter()
            .filter(|r| !allowed.contains(*r))
            .map(|r| AccessState::Authenticated(*r))
            .chain(std::iter::once(AccessState::Unauthenticated));

        for state in states {
            match navigate(state, route) {
                GuardDecision::Redirect(target) => assert!(homes.contains(&target)),
                other => panic!("{state:?} reached {route} with {other:?}"),
            }
        }
    }
}

#[test]
fn root_redirects_to_login_even_when_signed_in() {
    assert_eq!(
        navigate(AccessState::Authenticated(Role::Tutor), &Route::Root),
        GuardDecision::Redirect(Route::Login)
    );
}

#[test]
fn login_is_public() {
    assert_eq!(navigate(AccessState::Unauthenticated, &Route::Login), GuardDecision::Render);
}

#[test]
fn user_details_is_admin_only() {
    let route = Route::parse("/admin/user/abc").unwrap();
    assert_eq!(route, Route::AdminUserDetails("abc".to_string()));
    assert_eq!(
        navigate(AccessState::Authenticated(Role::Student), &route),
        GuardDecision::Redirect(Route::StudentHome)
    );
    assert_eq!(
        navigate(AccessState::Authenticated(Role::Admin), &route),
        GuardDecision::Render
    );
}
