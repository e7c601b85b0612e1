//! Rentals slice reducer - the checklist state machine
//!
//! `idle → collecting → reviewing → submitting`, then back to idle on
//! success or to reviewing on failure. The first scanned item fixes the
//! checklist's kind: an available item starts a rent, an unavailable one
//! a return.

use stockpile_core::types::RentalKind;

use crate::action::RentalsAction;
use crate::state::{RentalPhase, RentalsState};

pub fn reduce(state: &mut RentalsState, action: &RentalsAction) {
    match action {
        RentalsAction::StartRentalSuccess { item } => {
            state.phase = RentalPhase::Collecting;
            state.kind = Some(if item.available {
                RentalKind::Rent
            } else {
                RentalKind::Return
            });
            state.checklist = vec![item.clone()];
        }
        // Keyed by barcode: a duplicate add never grows the list. The
        // effect already rejects duplicates before this action is emitted.
        RentalsAction::AddToRentalsSuccess { item } => {
            if !state.contains(&item.barcode) {
                state.checklist.push(item.clone());
            }
        }
        RentalsAction::RemoveFromRentals { barcode } => {
            state.checklist.retain(|item| item.barcode != *barcode);
        }

        RentalsAction::Review => {
            state.phase = RentalPhase::Reviewing;
        }
        RentalsAction::Rent { .. } | RentalsAction::Return { .. } => {
            state.phase = RentalPhase::Submitting;
        }
        RentalsAction::RentSuccess | RentalsAction::ReturnSuccess => {
            *state = RentalsState::default();
        }
        RentalsAction::RentFail { .. } | RentalsAction::ReturnFail { .. } => {
            state.phase = RentalPhase::Reviewing;
        }

        // Requests and add/start failures leave the checklist as it is.
        RentalsAction::StartRental { .. }
        | RentalsAction::StartRentalFail { .. }
        | RentalsAction::AddToRentals { .. }
        | RentalsAction::AddToRentalsFail { .. } => {}
    }
}
