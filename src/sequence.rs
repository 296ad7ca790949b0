//! Reconciles the routing service's waypoint order with the form selections.
//!
//! The service decides the visiting order; this module only applies the
//! permutation it returns and pins the first and last entries.

use crate::entities::{LocationCandidate, Position, TravelSequenceEntry};
use crate::error::{upstream_error, validation_error, Error};

pub const MISSING_START: &str = "Please select a start location.";
pub const MISSING_DESTINATION: &str = "Please select an end location or add at least one waypoint.";

/// Derives the travel sequence `start, stops..., end`.
///
/// `order` is the permutation of `waypoints` indices returned by the routing
/// service; `None` keeps the as-selected order. Without an explicit `end` the
/// last waypoint in the resulting order finishes the trip.
pub fn reconcile(
    start: Option<&LocationCandidate>,
    end: Option<&LocationCandidate>,
    waypoints: &[LocationCandidate],
    order: Option<&[usize]>,
) -> Result<Vec<TravelSequenceEntry>, Error> {
    let start = start.ok_or_else(|| validation_error(MISSING_START))?;

    if end.is_none() && waypoints.is_empty() {
        return Err(validation_error(MISSING_DESTINATION));
    }

    let mut ordered: Vec<&LocationCandidate> = match order {
        Some(order) => apply_order(waypoints, order)?,
        None => waypoints.iter().collect(),
    };

    let finish = match end {
        Some(end) => end,
        // non-empty: checked above
        None => ordered.pop().ok_or_else(|| validation_error(MISSING_DESTINATION))?,
    };

    let mut sequence = Vec::with_capacity(ordered.len() + 2);
    sequence.push(TravelSequenceEntry::new(Position::Start, &start.label));
    sequence.extend(ordered.iter().enumerate().map(|(index, stop)| {
        TravelSequenceEntry::new(Position::Stop { number: index + 1 }, &stop.label)
    }));
    sequence.push(TravelSequenceEntry::new(Position::End, &finish.label));

    Ok(sequence)
}

fn apply_order<'a>(
    waypoints: &'a [LocationCandidate],
    order: &[usize],
) -> Result<Vec<&'a LocationCandidate>, Error> {
    if order.len() != waypoints.len() {
        tracing::warn!(
            expected = waypoints.len(),
            received = order.len(),
            "waypoint order does not cover every waypoint"
        );
        return Err(upstream_error());
    }

    let mut seen = vec![false; waypoints.len()];

    order
        .iter()
        .map(|&index| match seen.get_mut(index) {
            Some(visited) if !*visited => {
                *visited = true;
                Ok(&waypoints[index])
            }
            _ => {
                tracing::warn!(index, "waypoint order is not a permutation");
                Err(upstream_error())
            }
        })
        .collect()
}
