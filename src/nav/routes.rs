//! Static route table with per-route access requirements.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// Every view the router can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteId {
    Home,
    Login,
    GiveMeal,
    ReceiveMeal,
    DonationRequest,
    Admin,
    Unauthorized,
    Forbidden,
    NotFound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub id: RouteId,
    pub requires_auth: bool,
    pub requires_admin: bool,
}

const fn open(path: &'static str, id: RouteId) -> RouteDescriptor {
    RouteDescriptor { path, id, requires_auth: false, requires_admin: false }
}

const fn member(path: &'static str, id: RouteId) -> RouteDescriptor {
    RouteDescriptor { path, id, requires_auth: true, requires_admin: false }
}

pub static ROUTES: [RouteDescriptor; 8] = [
    open("/login", RouteId::Login),
    member("/", RouteId::Home),
    member("/give-meal", RouteId::GiveMeal),
    member("/receive-meal", RouteId::ReceiveMeal),
    member("/donation-request", RouteId::DonationRequest),
    RouteDescriptor { path: "/admin", id: RouteId::Admin, requires_auth: true, requires_admin: true },
    open("/401", RouteId::Unauthorized),
    open("/403", RouteId::Forbidden),
];

/// Catch-all for paths not in [`ROUTES`].
pub static NOT_FOUND: RouteDescriptor = open("*", RouteId::NotFound);

impl RouteId {
    pub fn descriptor(self) -> &'static RouteDescriptor {
        ROUTES.iter().find(|r| r.id == self).unwrap_or(&NOT_FOUND)
    }

    pub fn path(self) -> &'static str {
        self.descriptor().path
    }
}
