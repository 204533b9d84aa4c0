//! Donation-request page: ask to be matched with a future donation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The user ticks every meal on today's menu they would accept. The request
//! stays pending until someone donates one of them; the user's requests for
//! today are listed underneath with their status.

#[cfg(test)]
#[path = "donation_request_test.rs"]
mod donation_request_test;

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;

#[cfg(feature = "csr")]
use crate::net::api::ApiClient;
use crate::net::types::{DonationRequestCreate, DonationRequestSummary, Meal};
use crate::state::session::Session;
use crate::util::prefs;
use crate::util::storage::SharedStore;

/// Add `meal_id` to the selection, or drop it if already there.
pub fn toggle_selection(selected: &mut Vec<u64>, meal_id: u64) {
    if let Some(pos) = selected.iter().position(|id| *id == meal_id) {
        selected.remove(pos);
    } else {
        selected.push(meal_id);
    }
}

/// Mirrors the server's own validation messages.
///
/// # Errors
///
/// Returns the message for a blank name or an empty selection.
pub fn validate_request(requester_name: &str, meal_ids: &[u64]) -> Result<DonationRequestCreate, &'static str> {
    let requester_name = requester_name.trim();
    if requester_name.is_empty() {
        return Err("requesterName is required");
    }
    if meal_ids.is_empty() {
        return Err("at least one meal must be selected");
    }
    Ok(DonationRequestCreate { requester_name: requester_name.to_owned(), meal_ids: meal_ids.to_vec() })
}

#[component]
pub fn DonationRequestPage() -> impl IntoView {
    #[cfg(feature = "csr")]
    let api = expect_context::<ApiClient>();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();
    let storage = expect_context::<SharedStore>();
    let session = expect_context::<RwSignal<Session>>();

    let name = RwSignal::new(prefs::prefill_name(storage.as_ref(), session.get_untracked().user()));
    let meals = RwSignal::new(Vec::<Meal>::new());
    let selected = RwSignal::new(Vec::<u64>::new());
    let requests = RwSignal::new(Vec::<DonationRequestSummary>::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    let load_requests = {
        let api = api.clone();
        move |requester: String| {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                if requester.is_empty() {
                    return;
                }
                let today = crate::util::dates::today_iso();
                match api.user_donation_requests(&requester, Some(&today)).await {
                    Ok(list) => requests.set(list),
                    Err(e) => log::warn!("could not load donation requests: {e}"),
                }
            });
        }
    };

    #[cfg(feature = "csr")]
    {
        let api = api.clone();
        let navigate = navigate.clone();
        load_requests(name.get_untracked().trim().to_owned());
        leptos::task::spawn_local(async move {
            match api.meals_today().await {
                Ok(list) => meals.set(list),
                Err(e) => {
                    if !crate::util::auth::follow_error_redirect(&e, &navigate) {
                        info.set(format!("Could not load today's menu: {e}"));
                    }
                }
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_request(&name.get(), &selected.get()) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Sending request...".to_owned());

        #[cfg(feature = "csr")]
        {
            let api = api.clone();
            let navigate = navigate.clone();
            let storage = storage.clone();
            let load_requests = load_requests.clone();
            leptos::task::spawn_local(async move {
                match api.create_donation_request(&request).await {
                    Ok(()) => {
                        prefs::remember_name(storage.as_ref(), &request.requester_name);
                        selected.set(Vec::new());
                        info.set("Request sent. We'll match you with the next donation.".to_owned());
                        load_requests(request.requester_name);
                    }
                    Err(e) => {
                        if !crate::util::auth::follow_error_redirect(&e, &navigate) {
                            info.set(format!("Request failed: {e}"));
                        }
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (request, &storage);
    };

    view! {
        <div class="donation-request-page">
            <h1>"Request a meal"</h1>
            <form class="request-form" on:submit=on_submit>
                <input
                    class="text-input"
                    type="text"
                    placeholder="Your name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <ul class="meal-list">
                    {move || {
                        meals
                            .get()
                            .into_iter()
                            .map(|meal| {
                                let id = meal.id;
                                view! {
                                    <li>
                                        <label>
                                            <input
                                                type="checkbox"
                                                prop:checked=move || selected.get().contains(&id)
                                                on:change=move |_| selected.update(|s| toggle_selection(s, id))
                                            />
                                            {meal.description}
                                        </label>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
                <button class="btn" type="submit" disabled=move || busy.get()>
                    "Request"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="page-message">{move || info.get()}</p>
            </Show>
            <Show when=move || !requests.get().is_empty()>
                <h2>"Your requests today"</h2>
                <ul class="request-list">
                    {move || {
                        requests
                            .get()
                            .into_iter()
                            .map(|r| view! { <li>{r.description} " - " {r.status.label()}</li> })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>
        </div>
    }
}
