//! Layout slice reducer - the modal loading message

use crate::action::LayoutAction;
use crate::state::LayoutState;

pub fn reduce(state: &mut LayoutState, action: &LayoutAction) {
    match action {
        LayoutAction::ShowLoadingMessage { message } => {
            state.loading_message = Some(message.clone());
        }
        LayoutAction::HideLoadingMessage => {
            state.loading_message = None;
        }
    }
}
