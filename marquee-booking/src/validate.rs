use chrono::{DateTime, Utc};
use marquee_domain::{EngineError, Seat, Show};
use uuid::Uuid;

/// Precondition checks run before any mutation. Returns the seat ids in
/// sorted order, which doubles as the allocator's stable lock order.
pub(crate) fn validate_selection(
    show: &Show,
    now: DateTime<Utc>,
    seat_ids: &[Uuid],
) -> Result<Vec<Uuid>, EngineError> {
    if !show.is_bookable(now) {
        return Err(EngineError::invalid("show has already started"));
    }
    if seat_ids.is_empty() {
        return Err(EngineError::invalid("seat selection is empty"));
    }

    let mut ordered = seat_ids.to_vec();
    ordered.sort_unstable();
    if ordered.windows(2).any(|w| w[0] == w[1]) {
        return Err(EngineError::invalid("duplicate seats in selection"));
    }
    Ok(ordered)
}

/// Every requested seat must resolve and belong to the booked show.
pub(crate) fn check_seats_belong(
    show_id: Uuid,
    requested: &[Uuid],
    seats: &[Seat],
) -> Result<(), EngineError> {
    for id in requested {
        match seats.iter().find(|s| s.id == *id) {
            None => return Err(EngineError::not_found("seat", *id)),
            Some(seat) if seat.show_id != show_id => {
                return Err(EngineError::invalid(format!(
                    "seat {} does not belong to show {}",
                    seat.label, show_id
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use marquee_domain::SeatType;
    use rust_decimal_macros::dec;

    fn show_starting_in(minutes: i64) -> Show {
        let now = Utc::now();
        Show {
            id: Uuid::new_v4(),
            movie_id: Uuid::new_v4(),
            start_time: now + Duration::minutes(minutes),
            end_time: now + Duration::minutes(minutes + 120),
            base_price: dec!(10.00),
            created_at: now,
        }
    }

    fn seat(show_id: Uuid, label: &str) -> Seat {
        Seat {
            id: Uuid::new_v4(),
            show_id,
            label: label.to_string(),
            seat_type: SeatType::Standard,
        }
    }

    #[test]
    fn accepts_a_clean_selection_and_sorts_it() {
        let show = show_starting_in(60);
        let ids = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let ordered = validate_selection(&show, Utc::now(), &ids).unwrap();
        let mut expected = ids.clone();
        expected.sort_unstable();
        assert_eq!(ordered, expected);
    }

    #[test]
    fn rejects_empty_selection() {
        let show = show_starting_in(60);
        assert!(matches!(
            validate_selection(&show, Utc::now(), &[]),
            Err(EngineError::InvalidRequest(_))
        ));
    }

    #[test]
    fn rejects_duplicate_seats() {
        let show = show_starting_in(60);
        let id = Uuid::new_v4();
        assert!(matches!(
            validate_selection(&show, Utc::now(), &[id, Uuid::new_v4(), id]),
            Err(EngineError::InvalidRequest(_))
        ));
    }

    #[test]
    fn rejects_started_show_regardless_of_seats() {
        let show = show_starting_in(-5);
        assert!(matches!(
            validate_selection(&show, Utc::now(), &[Uuid::new_v4()]),
            Err(EngineError::InvalidRequest(_))
        ));
    }

    #[test]
    fn unknown_seat_id_is_not_found() {
        let show_id = Uuid::new_v4();
        let known = seat(show_id, "A1");
        let missing = Uuid::new_v4();
        let err = check_seats_belong(show_id, &[known.id, missing], &[known]).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { entity: "seat", id } if id == missing));
    }

    #[test]
    fn seat_from_another_show_is_invalid() {
        let show_id = Uuid::new_v4();
        let foreign = seat(Uuid::new_v4(), "B7");
        assert!(matches!(
            check_seats_belong(show_id, &[foreign.id], &[foreign]),
            Err(EngineError::InvalidRequest(_))
        ));
    }
}
