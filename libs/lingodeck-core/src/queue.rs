//! Due-set selection.

use chrono::{DateTime, Utc};

use crate::types::{Flashcard, Schedule};

/// A card is due when it was never scheduled or its review time has arrived.
pub fn is_due(schedule: &Schedule, now: DateTime<Utc>) -> bool {
    match schedule.next_review_date {
        None => true,
        Some(next) => next <= now,
    }
}

/// Cards due at `now`, in their original order.
pub fn due_cards<'a>(cards: &'a [Flashcard], now: DateTime<Utc>) -> Vec<&'a Flashcard> {
    cards.iter().filter(|card| is_due(&card.schedule, now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
    }

    fn card(front: &str, next_review_date: Option<DateTime<Utc>>) -> Flashcard {
        let mut card = Flashcard::new(Uuid::nil(), front, "-", now());
        card.schedule.next_review_date = next_review_date;
        card
    }

    #[test]
    fn unscheduled_card_is_due() {
        assert!(is_due(&Schedule::default(), now()));
    }

    #[test]
    fn boundary_is_inclusive() {
        let schedule = Schedule {
            next_review_date: Some(now()),
            ..Default::default()
        };
        assert!(is_due(&schedule, now()));
        assert!(!is_due(&schedule, now() - Duration::seconds(1)));
    }

    #[test]
    fn selects_due_subset_in_order() {
        let cards = vec![
            card("a", None),
            card("b", Some(now() + Duration::days(3))),
            card("c", Some(now() - Duration::days(1))),
            card("d", Some(now())),
        ];
        let fronts: Vec<&str> = due_cards(&cards, now()).iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, vec!["a", "c", "d"]);
    }

    #[test]
    fn repeated_selection_is_stable() {
        let cards = vec![
            card("a", Some(now() + Duration::hours(1))),
            card("b", None),
        ];
        let first: Vec<Uuid> = due_cards(&cards, now()).iter().map(|c| c.id).collect();
        let second: Vec<Uuid> = due_cards(&cards, now()).iter().map(|c| c.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_collection_has_nothing_due() {
        assert!(due_cards(&[], now()).is_empty());
    }
}
