use super::*;

#[test]
fn member_routes_require_auth_only() {
    for id in [RouteId::Home, RouteId::GiveMeal, RouteId::ReceiveMeal, RouteId::DonationRequest] {
        let route = id.descriptor();
        assert!(route.requires_auth, "{id:?}");
        assert!(!route.requires_admin, "{id:?}");
    }
}

#[test]
fn admin_route_requires_auth_and_admin() {
    let route = RouteId::Admin.descriptor();
    assert_eq!(route.path, "/admin");
    assert!(route.requires_auth);
    assert!(route.requires_admin);
}

#[test]
fn error_and_login_routes_are_open() {
    for id in [RouteId::Login, RouteId::Unauthorized, RouteId::Forbidden, RouteId::NotFound] {
        let route = id.descriptor();
        assert!(!route.requires_auth, "{id:?}");
        assert!(!route.requires_admin, "{id:?}");
    }
}

#[test]
fn every_route_id_maps_back_to_its_path() {
    for route in &ROUTES {
        assert_eq!(route.id.descriptor(), route);
        assert_eq!(route.id.path(), route.path);
    }
}

#[test]
fn not_found_is_the_catch_all() {
    assert_eq!(RouteId::NotFound.descriptor(), &NOT_FOUND);
    assert_eq!(RouteId::NotFound.path(), "*");
}
