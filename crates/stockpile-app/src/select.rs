//! Change-driven views over the state snapshot stream
//!
//! A [`Selection`] wraps a watch receiver with a projection function and
//! yields only distinct projected values. Screens subscribe to the slice
//! they render and stay asleep while unrelated parts of the state churn.

use tokio::sync::watch;

use crate::state::AppState;

/// One projected view over the store's state stream.
///
/// Created through `StoreHandle::select`. Equality on the projected value
/// decides what counts as a change.
pub struct Selection<T, F> {
    rx: watch::Receiver<AppState>,
    projector: F,
    last: Option<T>,
}

impl<T, F> Selection<T, F>
where
    F: FnMut(&AppState) -> T,
    T: Clone + PartialEq,
{
    pub(crate) fn new(rx: watch::Receiver<AppState>, projector: F) -> Self {
        Self {
            rx,
            projector,
            last: None,
        }
    }

    /// The next distinct projected value.
    ///
    /// The first call yields the projection of the current snapshot;
    /// later calls wait until the projection differs from the last value
    /// returned. Yields `None` once the store has stopped publishing.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            let value = {
                let snapshot = self.rx.borrow_and_update();
                (self.projector)(&snapshot)
            };
            if self.last.as_ref() != Some(&value) {
                self.last = Some(value.clone());
                return Some(value);
            }
            if self.rx.changed().await.is_err() {
                return None;
            }
        }
    }

    /// The projection of the current snapshot, without waiting and
    /// without affecting what [`next`](Self::next) considers seen.
    pub fn current(&mut self) -> T {
        let snapshot = self.rx.borrow();
        (self.projector)(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    use crate::state::ItemsState;

    fn loading_message(state: &AppState) -> Option<String> {
        state.layout.loading_message.clone()
    }

    #[tokio::test]
    async fn test_first_next_yields_the_current_projection() {
        let (_tx, rx) = watch::channel(AppState::default());
        let mut selection = Selection::new(rx, loading_message);

        assert_eq!(selection.next().await, Some(None));
    }

    #[tokio::test]
    async fn test_next_skips_changes_to_other_slices() {
        let (tx, rx) = watch::channel(AppState::default());
        let mut selection = Selection::new(rx, loading_message);
        assert_eq!(selection.next().await, Some(None));

        // Churn in an unrelated slice, then a real change.
        tx.send_replace(AppState {
            items: ItemsState {
                show_loading_spinner: true,
                ..ItemsState::default()
            },
            ..AppState::default()
        });
        tx.send_replace(AppState {
            layout: crate::state::LayoutState {
                loading_message: Some("Creating item...".to_string()),
            },
            ..AppState::default()
        });

        let value = timeout(Duration::from_secs(1), selection.next())
            .await
            .expect("selection never woke");
        assert_eq!(value, Some(Some("Creating item...".to_string())));
    }

    #[tokio::test]
    async fn test_next_ends_when_the_publisher_drops() {
        let (tx, rx) = watch::channel(AppState::default());
        let mut selection = Selection::new(rx, loading_message);
        assert_eq!(selection.next().await, Some(None));

        drop(tx);
        assert_eq!(selection.next().await, None);
    }

    #[tokio::test]
    async fn test_current_does_not_consume_the_change() {
        let (tx, rx) = watch::channel(AppState::default());
        let mut selection = Selection::new(rx, loading_message);
        assert_eq!(selection.next().await, Some(None));

        tx.send_replace(AppState {
            layout: crate::state::LayoutState {
                loading_message: Some("Saving...".to_string()),
            },
            ..AppState::default()
        });

        assert_eq!(selection.current(), Some("Saving...".to_string()));
        // next() still reports the same change.
        assert_eq!(selection.next().await, Some(Some("Saving...".to_string())));
    }
}
