//! Static error views for `/401`, `/403` and unknown paths.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::nav::routes::RouteId;

#[component]
fn ErrorView(code: &'static str, title: &'static str, detail: &'static str, link: RouteId) -> impl IntoView {
    let label = if link == RouteId::Login { "Sign in" } else { "Back to home" };
    view! {
        <div class="error-page">
            <h1>{code}</h1>
            <h2>{title}</h2>
            <p>{detail}</p>
            <A href=link.path()>{label}</A>
        </div>
    }
}

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    view! {
        <ErrorView
            code="401"
            title="Not signed in"
            detail="Your session has ended or you have not signed in yet."
            link=RouteId::Login
        />
    }
}

#[component]
pub fn ForbiddenPage() -> impl IntoView {
    view! {
        <ErrorView
            code="403"
            title="Not allowed"
            detail="This page is only available to administrators."
            link=RouteId::Home
        />
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <ErrorView
            code="404"
            title="Page not found"
            detail="There is nothing at this address."
            link=RouteId::Home
        />
    }
}
