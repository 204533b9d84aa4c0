//! Admin page: menu upload, daily claims summary, pending requests.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached only by users the guard saw as admins. Deployments configured with
//! the shared-password gate additionally ask for that password before showing
//! the tools (see [`crate::state::admin_gate`]).

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
#[cfg(feature = "csr")]
use crate::net::api::ApiClient;
use crate::net::types::{DonationClaimSummary, DonationRequestSummary};
use crate::state::admin_gate::AdminGate;
use crate::util::dates::parse_iso;

/// Counts shown above the claims table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClaimTotals {
    pub donated: usize,
    pub claimed: usize,
    pub unclaimed: usize,
}

pub fn summarize_claims(rows: &[DonationClaimSummary]) -> ClaimTotals {
    let claimed = rows.iter().filter(|r| r.claimed).count();
    ClaimTotals { donated: rows.len(), claimed, unclaimed: rows.len() - claimed }
}

/// Split one CSV record, honoring double-quoted fields.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Check a `date,description` menu CSV before uploading it.
///
/// Blank lines are ignored; every other line needs exactly two fields, an
/// ISO date and a non-empty description.
///
/// # Errors
///
/// Returns a message naming the first offending line.
pub fn validate_meal_csv(csv: &str) -> Result<String, String> {
    let mut rows = 0;
    for (index, line) in csv.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let n = index + 1;
        let fields = split_record(line);
        let [date, description] = fields.as_slice() else {
            return Err(format!("Line {n}: expected date,description"));
        };
        if parse_iso(date).is_none() {
            return Err(format!("Line {n}: invalid date {:?}", date.trim()));
        }
        if description.trim().is_empty() {
            return Err(format!("Line {n}: missing description"));
        }
        rows += 1;
    }
    if rows == 0 {
        return Err("Paste at least one date,description line.".to_owned());
    }
    Ok(csv.trim().to_owned())
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let gate = expect_context::<AdminGate>();
    let unlocked = RwSignal::new(!config.admin_password_gate || gate.is_authenticated());

    view! {
        <div class="admin-page">
            <h1>"Admin"</h1>
            <Show when=move || unlocked.get() fallback=move || view! { <AdminPassword unlocked=unlocked /> }>
                <MenuUpload />
                <ClaimsSummary />
                <PendingRequests />
            </Show>
        </div>
    }
}

#[component]
fn AdminPassword(unlocked: RwSignal<bool>) -> impl IntoView {
    #[cfg(feature = "csr")]
    let gate = expect_context::<AdminGate>();
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let value = password.get();
        if value.is_empty() {
            info.set("Enter the admin password.".to_owned());
            return;
        }
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let gate = gate.clone();
            leptos::task::spawn_local(async move {
                if gate.login(&value).await {
                    unlocked.set(true);
                } else {
                    info.set("Incorrect password.".to_owned());
                }
                password.set(String::new());
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (value, unlocked);
    };

    view! {
        <form class="admin-password" on:submit=on_submit>
            <input
                class="text-input"
                type="password"
                placeholder="Admin password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <button class="btn" type="submit" disabled=move || busy.get()>
                "Unlock"
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="page-message">{move || info.get()}</p>
            </Show>
        </form>
    }
}

#[component]
fn MenuUpload() -> impl IntoView {
    #[cfg(feature = "csr")]
    let api = expect_context::<ApiClient>();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();
    let csv = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let body = match validate_meal_csv(&csv.get()) {
            Ok(body) => body,
            Err(message) => {
                info.set(message);
                return;
            }
        };
        busy.set(true);
        info.set("Uploading...".to_owned());

        #[cfg(feature = "csr")]
        {
            let api = api.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match api.upload_meals(&body).await {
                    Ok(()) => {
                        csv.set(String::new());
                        info.set("Menu uploaded.".to_owned());
                    }
                    Err(e) => {
                        if !crate::util::auth::follow_error_redirect(&e, &navigate) {
                            info.set(format!("Upload failed: {e}"));
                        }
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = body;
    };

    view! {
        <section class="admin-section">
            <h2>"Upload menu"</h2>
            <form on:submit=on_submit>
                <textarea
                    class="csv-input"
                    rows="8"
                    placeholder="2024-05-06,Chicken curry"
                    prop:value=move || csv.get()
                    on:input=move |ev| csv.set(event_target_value(&ev))
                ></textarea>
                <button class="btn" type="submit" disabled=move || busy.get()>
                    "Upload"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="page-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}

#[component]
fn ClaimsSummary() -> impl IntoView {
    let rows = RwSignal::new(Vec::<DonationClaimSummary>::new());
    let info = RwSignal::new(String::new());

    #[cfg(feature = "csr")]
    {
        let api = expect_context::<ApiClient>();
        let navigate = use_navigate();
        leptos::task::spawn_local(async move {
            match api.claims_summary(None).await {
                Ok(list) => rows.set(list),
                Err(e) => {
                    if !crate::util::auth::follow_error_redirect(&e, &navigate) {
                        info.set(format!("Could not load claims: {e}"));
                    }
                }
            }
        });
    }

    let totals = move || summarize_claims(&rows.get());

    view! {
        <section class="admin-section">
            <h2>"Today's donations"</h2>
            <p class="claims-totals">
                {move || {
                    let t = totals();
                    format!("{} donated, {} claimed, {} waiting", t.donated, t.claimed, t.unclaimed)
                }}
            </p>
            <table class="claims-table">
                <tr>
                    <th>"Meal"</th>
                    <th>"Donor"</th>
                    <th>"Recipient"</th>
                </tr>
                {move || {
                    rows.get()
                        .into_iter()
                        .map(|r| {
                            let recipient = if r.claimed { r.recipient_name } else { "-".to_owned() };
                            view! {
                                <tr>
                                    <td>{r.description}</td>
                                    <td>{r.donor_name}</td>
                                    <td>{recipient}</td>
                                </tr>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </table>
            <Show when=move || !info.get().is_empty()>
                <p class="page-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}

#[component]
fn PendingRequests() -> impl IntoView {
    let requests = RwSignal::new(Vec::<DonationRequestSummary>::new());

    #[cfg(feature = "csr")]
    {
        let api = expect_context::<ApiClient>();
        leptos::task::spawn_local(async move {
            match api.pending_donation_requests().await {
                Ok(list) => requests.set(list),
                Err(e) => log::warn!("could not load pending requests: {e}"),
            }
        });
    }

    view! {
        <section class="admin-section">
            <h2>"Pending requests"</h2>
            <Show
                when=move || !requests.get().is_empty()
                fallback=|| view! { <p>"Nobody is waiting for a meal."</p> }
            >
                <ul class="request-list">
                    {move || {
                        requests
                            .get()
                            .into_iter()
                            .map(|r| view! { <li><strong>{r.requester_name}</strong> ": " {r.description}</li> })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>
        </section>
    }
}
