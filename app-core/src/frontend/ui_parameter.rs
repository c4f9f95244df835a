use std::sync::mpsc::TryRecvError;

use log::warn;

use crate::backend::LinkReceiver;

/// A value shown by the UI that may be waiting on a reply from the backend
/// thread (e.g. a dataset that is still being fetched).
#[derive(Debug)]
pub struct UIParameter<T> {
    pending_update_rx: Option<LinkReceiver<T>>,
    value: T,
}

impl<T: Clone> Clone for UIParameter<T> {
    fn clone(&self) -> Self {
        // A pending reply can only be received once, so clones start settled.
        Self {
            pending_update_rx: None,
            value: self.value.clone(),
        }
    }
}

impl<T: Default> Default for UIParameter<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> UIParameter<T> {
    pub fn new(val: T) -> Self {
        UIParameter {
            pending_update_rx: None,
            value: val,
        }
    }

    /// Polls the pending reply. Returns `true` if the value changed or the
    /// request was abandoned, so the caller knows to redraw.
    pub fn try_update(&mut self) -> bool {
        let Some(rx) = &self.pending_update_rx else {
            return false;
        };
        match rx.try_recv() {
            Ok(val) => {
                self.value = val;
                self.pending_update_rx = None;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                warn!("Tried to receive message from closed channel.");
                self.pending_update_rx = None;
                true
            }
        }
    }

    pub fn is_up_to_date(&self) -> bool {
        self.pending_update_rx.is_none()
    }

    /// Replaces any pending request; dropping the old receiver cancels it.
    pub fn set_recv(&mut self, rx: LinkReceiver<T>) {
        self.pending_update_rx = Some(rx);
    }

    pub fn set_value(&mut self, val: T) {
        self.pending_update_rx = None;
        self.value = val;
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}
