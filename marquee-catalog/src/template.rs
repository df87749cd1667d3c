use marquee_domain::SeatType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("room template has no rows")]
    Empty,
    #[error("room template row {0} has no seats")]
    EmptyRow(String),
    #[error("duplicate row label in room template: {0}")]
    DuplicateRow(String),
}

/// One row of a room layout: a row label and one seat type per seat,
/// left to right.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowTemplate {
    pub row: String,
    pub seat_types: Vec<SeatType>,
}

/// An immutable room layout, defined once per room so the cinema owner
/// never configures seating per show. Show creation copies the template
/// into per-show seat instances; the allocator only ever sees instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTemplate {
    pub rows: Vec<RowTemplate>,
}

impl RoomTemplate {
    pub fn new(rows: Vec<RowTemplate>) -> Self {
        Self { rows }
    }

    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.rows.is_empty() {
            return Err(TemplateError::Empty);
        }
        let mut seen = HashSet::new();
        for row in &self.rows {
            if row.seat_types.is_empty() {
                return Err(TemplateError::EmptyRow(row.row.clone()));
            }
            if !seen.insert(row.row.as_str()) {
                return Err(TemplateError::DuplicateRow(row.row.clone()));
            }
        }
        Ok(())
    }

    /// Seat labels and types in render order: "A1", "A2", ..., "B1", ...
    /// Seat numbers are zero-padded to the width of the row's last seat
    /// ("A01".."A12" for a twelve-seat row) so text ordering of labels
    /// matches seat ordering.
    pub fn seat_layout(&self) -> Vec<(String, SeatType)> {
        self.rows
            .iter()
            .flat_map(|row| {
                let width = row.seat_types.len().to_string().len();
                row.seat_types
                    .iter()
                    .enumerate()
                    .map(move |(i, t)| (format!("{}{:0width$}", row.row, i + 1), *t))
            })
            .collect()
    }

    pub fn capacity(&self) -> usize {
        self.rows.iter().map(|r| r.seat_types.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_row_template() -> RoomTemplate {
        RoomTemplate::new(vec![
            RowTemplate {
                row: "A".to_string(),
                seat_types: vec![SeatType::Standard, SeatType::Standard, SeatType::Vip],
            },
            RowTemplate {
                row: "B".to_string(),
                seat_types: vec![SeatType::Couple, SeatType::SuperVip],
            },
        ])
    }

    #[test]
    fn layout_labels_follow_row_and_position() {
        let template = two_row_template();
        assert!(template.validate().is_ok());
        assert_eq!(template.capacity(), 5);

        let layout = template.seat_layout();
        let labels: Vec<&str> = layout.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["A1", "A2", "A3", "B1", "B2"]);
        assert_eq!(layout[2].1, SeatType::Vip);
        assert_eq!(layout[3].1, SeatType::Couple);
    }

    #[test]
    fn wide_rows_zero_pad_labels_so_text_order_matches_seat_order() {
        let template = RoomTemplate::new(vec![RowTemplate {
            row: "A".to_string(),
            seat_types: vec![SeatType::Standard; 12],
        }]);
        let layout = template.seat_layout();
        let labels: Vec<&str> = layout.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels[0], "A01");
        assert_eq!(labels[9], "A10");
        assert_eq!(labels[11], "A12");

        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, labels);
    }

    #[test]
    fn rejects_degenerate_templates() {
        assert!(matches!(
            RoomTemplate::new(vec![]).validate(),
            Err(TemplateError::Empty)
        ));

        let dup = RoomTemplate::new(vec![
            RowTemplate {
                row: "A".to_string(),
                seat_types: vec![SeatType::Standard],
            },
            RowTemplate {
                row: "A".to_string(),
                seat_types: vec![SeatType::Vip],
            },
        ]);
        assert!(matches!(dup.validate(), Err(TemplateError::DuplicateRow(_))));

        let empty_row = RoomTemplate::new(vec![RowTemplate {
            row: "A".to_string(),
            seat_types: vec![],
        }]);
        assert!(matches!(empty_row.validate(), Err(TemplateError::EmptyRow(_))));
    }
}
