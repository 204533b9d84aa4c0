use time::macros::date;

use super::*;

fn meal(id: u64, date: &str) -> Meal {
    Meal { id, description: format!("meal-{id}"), date: date.to_owned() }
}

#[test]
fn meal_day_accepts_plain_and_timestamped_dates() {
    assert_eq!(meal_day(&meal(1, "2024-05-06")), Some(date!(2024 - 05 - 06)));
    assert_eq!(meal_day(&meal(1, "2024-05-06T00:00:00Z")), Some(date!(2024 - 05 - 06)));
    assert_eq!(meal_day(&meal(1, "soon")), None);
}

#[test]
fn group_meals_by_day_buckets_monday_to_thursday() {
    let meals = [
        meal(1, "2024-05-06"),
        meal(2, "2024-05-06"),
        meal(3, "2024-05-08"),
        meal(4, "2024-05-10"),
        meal(5, "2024-05-13"),
        meal(6, "bad"),
        meal(7, "2024-05-09T00:00:00Z"),
        meal(8, "2024-05-03"),
    ];
    let grouped = group_meals_by_day(&meals, "2024-05-06", "2024-05-09");
    let ids: Vec<(OrderDay, Vec<u64>)> =
        grouped.into_iter().map(|(d, ms)| (d, ms.into_iter().map(|m| m.id).collect())).collect();
    assert_eq!(
        ids,
        vec![
            (OrderDay::Monday, vec![1, 2]),
            (OrderDay::Tuesday, vec![]),
            (OrderDay::Wednesday, vec![3]),
            (OrderDay::Thursday, vec![7]),
        ]
    );
}

#[test]
fn group_meals_by_day_starts_empty_for_every_day() {
    let grouped = group_meals_by_day(&[], "2024-05-06", "2024-05-09");
    assert_eq!(grouped.iter().map(|(d, _)| *d).collect::<Vec<_>>(), OrderDay::ALL.to_vec());
    assert!(grouped.iter().all(|(_, meals)| meals.is_empty()));
}

#[test]
fn build_order_requires_a_pick() {
    let draft = MealOrderCreate::new("2024-05-06");
    assert_eq!(build_order(&draft), Err("Pick a meal for at least one day."));
}

#[test]
fn build_order_requires_week() {
    let mut draft = MealOrderCreate::new("");
    draft.set(OrderDay::Monday, Some(1));
    assert_eq!(build_order(&draft), Err("The week could not be determined."));
}

#[test]
fn build_order_keeps_picks() {
    let mut draft = MealOrderCreate::new("2024-05-06");
    draft.set(OrderDay::Tuesday, Some(7));
    let order = build_order(&draft).unwrap();
    assert_eq!(order.get(OrderDay::Tuesday), Some(7));
    assert_eq!(order.get(OrderDay::Monday), None);
}

#[test]
fn duplicate_order_has_friendly_message() {
    let conflict = ApiError::Status { status: 409, message: "order exists".to_owned() };
    assert_eq!(order_error_message(&conflict), "You have already ordered for this week.");
    let other = ApiError::Status { status: 500, message: "boom".to_owned() };
    assert_eq!(order_error_message(&other), "Order failed: status 500: boom");
}
