//! Integration tests for RSVPs and the dashboard.

#![allow(clippy::unwrap_used)]

use revelion_core::{EventMode, RsvpStatus};
use revelion_integration_tests::TestContext;
use revelion_planner::models::RsvpSubmission;

#[test]
fn test_resubmission_from_another_session_updates_record() {
    let ctx = TestContext::new();
    let first = ctx
        .planner_in("phone")
        .participants_mut()
        .upsert(
            RsvpSubmission::new("Ana", RsvpStatus::Maybe, EventMode::NewYear)
                .with_dietary("vegetarian")
                .with_guests(vec!["Ion".to_owned()]),
        )
        .unwrap();

    let mut laptop = ctx.planner_in("laptop");
    let second = laptop
        .participants_mut()
        .upsert(RsvpSubmission::new("ana", RsvpStatus::Confirmed, EventMode::NewYear))
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.status, RsvpStatus::Confirmed);
    assert_eq!(second.dietary.as_deref(), Some("vegetarian"));
    assert_eq!(second.guests, vec!["Ion"]);
    assert_eq!(ctx.planner().participants().list_all().len(), 1);
}

#[test]
fn test_dashboard_counts_and_guest_list() {
    let ctx = TestContext::new();
    let mut planner = ctx.planner();
    let ana = planner.accounts_mut().register("Ana", "1111").unwrap();
    planner.accounts_mut().register("Ion", "2222").unwrap();

    let participants = planner.participants_mut();
    participants
        .upsert(
            RsvpSubmission::new("Ana", RsvpStatus::Confirmed, EventMode::NewYear)
                .with_guests(vec!["Radu".to_owned(), "Maria".to_owned()]),
        )
        .unwrap();
    participants
        .upsert(RsvpSubmission::new("Ion", RsvpStatus::Declined, EventMode::NewYear))
        .unwrap();
    participants
        .upsert(RsvpSubmission::new("Ana", RsvpStatus::Confirmed, EventMode::Christmas))
        .unwrap();

    let cake = planner.shopping_mut().add("Cake", &ana.id).unwrap();
    planner.shopping_mut().add("Wine", &ana.id).unwrap();
    planner.shopping_mut().toggle_checked(&cake.id).unwrap();

    let newyear = ctx.planner().dashboard(EventMode::NewYear);
    assert_eq!(newyear.confirmed, 2);
    assert_eq!(newyear.bought_items, 1);
    assert_eq!(newyear.total_items, 2);
    assert_eq!(newyear.accounts, 2);
    assert_eq!(newyear.event.guests.len(), 2);
    assert_eq!(newyear.event.headcount, 3);

    let christmas = ctx.planner().dashboard(EventMode::Christmas);
    assert_eq!(christmas.event.guests.len(), 1);
    assert_eq!(christmas.event.headcount, 1);
}

#[test]
fn test_rsvp_message_follows_configuration() {
    let ctx = TestContext::new();
    let planner = ctx.planner();
    let confirmed = planner.config().rsvp_message(RsvpStatus::Confirmed);
    let declined = planner.config().rsvp_message(RsvpStatus::Declined);
    assert_ne!(confirmed.title, declined.title);
}

#[test]
fn test_removed_rsvp_stays_removed() {
    let ctx = TestContext::new();
    let record = ctx
        .planner()
        .participants_mut()
        .upsert(RsvpSubmission::new("Ana", RsvpStatus::Confirmed, EventMode::NewYear))
        .unwrap();

    assert!(ctx.planner().participants_mut().remove(&record.id).unwrap());
    assert!(ctx.planner().participants().list_all().is_empty());
}
