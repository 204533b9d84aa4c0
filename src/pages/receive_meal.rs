//! Receive-meal page: claim one of today's unclaimed donations.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shows the donation the user already claimed today, if any, and otherwise
//! the list of donations still up for grabs. One claim per person per day is
//! enforced by the server.

#[cfg(test)]
#[path = "receive_meal_test.rs"]
mod receive_meal_test;

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;

#[cfg(feature = "csr")]
use crate::net::api::ApiClient;
use crate::net::types::{ClaimedDonation, DonationClaimCreate, UnclaimedDonation};
use crate::state::session::Session;
use crate::util::prefs;
use crate::util::storage::SharedStore;

/// # Errors
///
/// Returns the message to show for a missing donation or claimant name.
pub fn validate_claim(donation_id: Option<u64>, name: &str) -> Result<DonationClaimCreate, &'static str> {
    let Some(donation_id) = donation_id else {
        return Err("Choose a meal to claim.");
    };
    let name = name.trim();
    if name.is_empty() {
        return Err("Enter your name.");
    }
    Ok(DonationClaimCreate { donation_id, name: name.to_owned() })
}

#[component]
pub fn ReceiveMealPage() -> impl IntoView {
    #[cfg(feature = "csr")]
    let api = expect_context::<ApiClient>();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();
    let storage = expect_context::<SharedStore>();
    let session = expect_context::<RwSignal<Session>>();

    let name = RwSignal::new(prefs::prefill_name(storage.as_ref(), session.get_untracked().user()));
    let donations = RwSignal::new(Vec::<UnclaimedDonation>::new());
    let claimed = RwSignal::new(None::<ClaimedDonation>);
    let selected = RwSignal::new(None::<u64>);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    {
        let api = api.clone();
        let navigate = navigate.clone();
        let claimant = name.get_untracked().trim().to_owned();
        leptos::task::spawn_local(async move {
            if !claimant.is_empty() {
                match api.donation_claim(&claimant).await {
                    Ok(claim) => claimed.set(claim),
                    Err(e) => log::warn!("could not look up today's claim: {e}"),
                }
            }
            match api.unclaimed_donations().await {
                Ok(list) => donations.set(list),
                Err(e) => {
                    if !crate::util::auth::follow_error_redirect(&e, &navigate) {
                        info.set(format!("Could not load donations: {e}"));
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
        let claim = match validate_claim(selected.get(), &name.get()) {
            Ok(claim) => claim,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Claiming...".to_owned());

        #[cfg(feature = "csr")]
        {
            let api = api.clone();
            let navigate = navigate.clone();
            let storage = storage.clone();
            leptos::task::spawn_local(async move {
                match api.claim_donation(&claim).await {
                    Ok(()) => {
                        prefs::remember_name(storage.as_ref(), &claim.name);
                        let taken = donations
                            .get_untracked()
                            .into_iter()
                            .find(|d| d.id == claim.donation_id);
                        claimed.set(taken.map(|d| ClaimedDonation {
                            id: d.id,
                            description: d.description,
                            donor_name: d.donor_name,
                        }));
                        donations.update(|list| list.retain(|d| d.id != claim.donation_id));
                        selected.set(None);
                        info.set("Enjoy your lunch!".to_owned());
                    }
                    Err(e) => {
                        if !crate::util::auth::follow_error_redirect(&e, &navigate) {
                            info.set(format!("Claim failed: {e}"));
                        }
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (claim, &storage);
    };

    view! {
        <div class="receive-meal-page">
            <h1>"Receive a meal"</h1>
            <Show when=move || claimed.get().is_some()>
                <p class="claim-notice">
                    "You claimed "
                    <strong>{move || claimed.get().map(|c| c.description).unwrap_or_default()}</strong>
                    " from "
                    {move || claimed.get().map(|c| c.donor_name).unwrap_or_default()}
                    " today."
                </p>
            </Show>
            <form class="claim-form" on:submit=on_submit>
                <input
                    class="text-input"
                    type="text"
                    placeholder="Your name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <Show
                    when=move || !donations.get().is_empty()
                    fallback=|| view! { <p>"No donated meals are available right now."</p> }
                >
                    <ul class="meal-list">
                        {move || {
                            donations
                                .get()
                                .into_iter()
                                .map(|donation| {
                                    let id = donation.id;
                                    view! {
                                        <li>
                                            <label>
                                                <input
                                                    type="radio"
                                                    name="donation"
                                                    prop:checked=move || selected.get() == Some(id)
                                                    on:change=move |_| selected.set(Some(id))
                                                />
                                                {donation.description}
                                                " (from "
                                                {donation.donor_name}
                                                ")"
                                            </label>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </ul>
                </Show>
                <button
                    class="btn"
                    type="submit"
                    disabled=move || busy.get() || claimed.get().is_some()
                >
                    "Claim"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="page-message">{move || info.get()}</p>
            </Show>
        </div>
    }
}
