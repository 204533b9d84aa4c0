//! Home page: this week's menu and the user's Monday-to-Thursday order.
//!
//! SYSTEM CONTEXT
//! ==============
//! The landing route for signed-in users. Loads the week's meals and any
//! order already placed, then lets the user pick at most one meal per day.
//! The server rejects a second order for the same week with 409.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;
use time::Date;

#[cfg(feature = "csr")]
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{Meal, MealOrder, MealOrderCreate, OrderDay};
use crate::util::dates::{format_iso, monday_date, order_day_of, parse_iso, thursday_date};

/// Serving date of `meal`, tolerating a trailing time component.
pub fn meal_day(meal: &Meal) -> Option<Date> {
    parse_iso(meal.date.get(..10).unwrap_or(&meal.date))
}

/// Bucket `meals` into the four orderable days.
///
/// `week_start` and `week_end` are inclusive ISO dates. Meals outside them,
/// served on a non-orderable weekday, or with unreadable dates are dropped.
pub fn group_meals_by_day(meals: &[Meal], week_start: &str, week_end: &str) -> Vec<(OrderDay, Vec<Meal>)> {
    let mut days: Vec<(OrderDay, Vec<Meal>)> = OrderDay::ALL.iter().map(|day| (*day, Vec::new())).collect();
    for meal in meals {
        let Some(served) = meal_day(meal) else {
            continue;
        };
        let iso = format_iso(served);
        if iso.as_str() < week_start || iso.as_str() > week_end {
            continue;
        }
        let bucket = order_day_of(served).and_then(|day| days.iter_mut().find(|(d, _)| *d == day));
        if let Some((_, served_that_day)) = bucket {
            served_that_day.push(meal.clone());
        }
    }
    days
}

/// Validate the user's picks before posting them.
///
/// # Errors
///
/// Returns the message to show when nothing was picked.
pub fn build_order(draft: &MealOrderCreate) -> Result<MealOrderCreate, &'static str> {
    if draft.week_start_date.is_empty() {
        return Err("The week could not be determined.");
    }
    if draft.is_empty() {
        return Err("Pick a meal for at least one day.");
    }
    Ok(draft.clone())
}

pub fn order_error_message(error: &ApiError) -> String {
    match error.status() {
        Some(409) => "You have already ordered for this week.".to_owned(),
        _ => format!("Order failed: {error}"),
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    #[cfg(feature = "csr")]
    let api = expect_context::<ApiClient>();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();

    let week_start = monday_date();
    let week_end = thursday_date();

    let days = RwSignal::new(group_meals_by_day(&[], &week_start, &week_end));
    let existing = RwSignal::new(None::<MealOrder>);
    let draft = RwSignal::new(MealOrderCreate::new(week_start.clone()));
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(true);

    #[cfg(feature = "csr")]
    {
        let api = api.clone();
        let navigate = navigate.clone();
        let week_start = week_start.clone();
        leptos::task::spawn_local(async move {
            match api.meals(&week_start, &week_end).await {
                Ok(meals) => days.set(group_meals_by_day(&meals, &week_start, &week_end)),
                Err(e) => {
                    if !crate::util::auth::follow_error_redirect(&e, &navigate) {
                        info.set(format!("Could not load the menu: {e}"));
                    }
                }
            }
            match api.meal_order(&week_start).await {
                Ok(order) => existing.set(order),
                Err(e) => log::warn!("could not load this week's order: {e}"),
            }
            busy.set(false);
        });
    }

    view! {
        <div class="home-page">
            <h1>"Week of " {week_start.clone()}</h1>
            <Show
                when=move || existing.get().is_none()
                fallback=move || view! { <PlacedOrder order=existing /> }
            >
                <OrderForm days=days draft=draft existing=existing info=info busy=busy />
            </Show>
            <Show when=move || !info.get().is_empty()>
                <p class="page-message">{move || info.get()}</p>
            </Show>
        </div>
    }
}

#[component]
fn OrderForm(
    days: RwSignal<Vec<(OrderDay, Vec<Meal>)>>,
    draft: RwSignal<MealOrderCreate>,
    existing: RwSignal<Option<MealOrder>>,
    info: RwSignal<String>,
    busy: RwSignal<bool>,
) -> impl IntoView {
    #[cfg(feature = "csr")]
    let api = expect_context::<ApiClient>();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();
    #[cfg(not(feature = "csr"))]
    let _ = existing;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let order = match build_order(&draft.get()) {
            Ok(order) => order,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Placing order...".to_owned());

        #[cfg(feature = "csr")]
        {
            let api = api.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match api.create_meal_order(&order).await {
                    Ok(()) => {
                        info.set("Order placed.".to_owned());
                        if let Ok(placed) = api.meal_order(&order.week_start_date).await {
                            existing.set(placed);
                        }
                    }
                    Err(e) => {
                        if !crate::util::auth::follow_error_redirect(&e, &navigate) {
                            info.set(order_error_message(&e));
                        }
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = order;
    };

    view! {
        <form class="order-form" on:submit=on_submit>
            {move || {
                days.get()
                    .into_iter()
                    .map(|(day, meals)| view! { <DayPicker day=day meals=meals draft=draft /> })
                    .collect::<Vec<_>>()
            }}
            <button class="btn" type="submit" disabled=move || busy.get()>
                "Place order"
            </button>
        </form>
    }
}

#[component]
fn DayPicker(day: OrderDay, meals: Vec<Meal>, draft: RwSignal<MealOrderCreate>) -> impl IntoView {
    let on_change = move |ev| {
        let value = event_target_value(&ev);
        draft.update(|d| d.set(day, value.parse().ok()));
    };
    let empty = meals.is_empty();

    view! {
        <label class="order-form__day">
            <span>{day.label()}</span>
            <select on:change=on_change disabled=empty>
                <option value="">{if empty { "No menu yet" } else { "No lunch" }}</option>
                {meals
                    .into_iter()
                    .map(|m| view! { <option value=m.id.to_string()>{m.description}</option> })
                    .collect::<Vec<_>>()}
            </select>
        </label>
    }
}

#[component]
fn PlacedOrder(order: RwSignal<Option<MealOrder>>) -> impl IntoView {
    let rows = move || {
        order.get().map_or_else(Vec::new, |placed| {
            OrderDay::ALL
                .iter()
                .map(|day| {
                    let meal = placed.meal_for(*day).map_or("No lunch".to_owned(), |m| m.description.clone());
                    (day.label(), meal)
                })
                .collect()
        })
    };

    view! {
        <section class="placed-order">
            <h2>"Your order"</h2>
            <ul>
                {move || {
                    rows()
                        .into_iter()
                        .map(|(label, meal)| view! { <li><strong>{label}</strong> ": " {meal}</li> })
                        .collect::<Vec<_>>()
                }}
            </ul>
        </section>
    }
}
