//! Give-meal page: donate one of today's meals.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists today's menu and posts a donation under the donor's name. The name
//! field is pre-filled from the remembered display name and remembered again
//! after a successful donation.

#[cfg(test)]
#[path = "give_meal_test.rs"]
mod give_meal_test;

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;

#[cfg(feature = "csr")]
use crate::net::api::ApiClient;
use crate::net::types::{DonationCreate, Meal};
use crate::state::session::Session;
use crate::util::prefs;
use crate::util::storage::SharedStore;

/// # Errors
///
/// Returns the message to show for a missing meal or donor name.
pub fn validate_donation(meal_id: Option<u64>, donor_name: &str) -> Result<DonationCreate, &'static str> {
    let Some(meal_id) = meal_id else {
        return Err("Choose the meal you are donating.");
    };
    let donor_name = donor_name.trim();
    if donor_name.is_empty() {
        return Err("Enter your name.");
    }
    Ok(DonationCreate { meal_id, donor_name: donor_name.to_owned() })
}

#[component]
pub fn GiveMealPage() -> impl IntoView {
    #[cfg(feature = "csr")]
    let api = expect_context::<ApiClient>();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();
    let storage = expect_context::<SharedStore>();
    let session = expect_context::<RwSignal<Session>>();

    let name = RwSignal::new(prefs::prefill_name(storage.as_ref(), session.get_untracked().user()));
    let meals = RwSignal::new(Vec::<Meal>::new());
    let selected = RwSignal::new(None::<u64>);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    {
        let api = api.clone();
        let navigate = navigate.clone();
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
        let donation = match validate_donation(selected.get(), &name.get()) {
            Ok(donation) => donation,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Donating...".to_owned());

        #[cfg(feature = "csr")]
        {
            let api = api.clone();
            let navigate = navigate.clone();
            let storage = storage.clone();
            leptos::task::spawn_local(async move {
                match api.donate(&donation).await {
                    Ok(()) => {
                        prefs::remember_name(storage.as_ref(), &donation.donor_name);
                        selected.set(None);
                        info.set("Thank you! Your meal is now available to a colleague.".to_owned());
                    }
                    Err(e) => {
                        if !crate::util::auth::follow_error_redirect(&e, &navigate) {
                            info.set(format!("Donation failed: {e}"));
                        }
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (donation, &storage);
    };

    view! {
        <div class="give-meal-page">
            <h1>"Give a meal"</h1>
            <form class="donation-form" on:submit=on_submit>
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
                                                type="radio"
                                                name="meal"
                                                prop:checked=move || selected.get() == Some(id)
                                                on:change=move |_| selected.set(Some(id))
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
                    "Donate"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="page-message">{move || info.get()}</p>
            </Show>
        </div>
    }
}
