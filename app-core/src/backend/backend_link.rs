use log::{debug, warn};
use std::{
    marker::PhantomData,
    sync::{
        atomic::{AtomicBool, Ordering::SeqCst},
        mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError},
        Arc,
    },
};

use crate::{
    backend::{BackendEventLoop, BackendState},
    frontend::UIParameter,
    BACKEND_HUNG_UP_MSG,
};

/// The link is sent to the backend thread, runs its action there and
/// replies through a channel once the action is done.
pub struct BackendLink<T, F, S>
where
    F: Fn(&mut BackendEventLoop<S>) -> T,
    S: BackendState,
{
    backchannel: Sender<T>,
    action: F,
    is_cancelled: Arc<AtomicBool>,
    description: String,
    _marker: PhantomData<S>,
}

impl<T, F, S> BackendLink<T, F, S>
where
    F: Fn(&mut BackendEventLoop<S>) -> T,
    S: BackendState,
{
    pub fn new(description: &str, action: F) -> (LinkReceiver<T>, Self) {
        let (tx, rx) = channel();
        let is_cancelled = Arc::new(AtomicBool::new(false));
        let rx = LinkReceiver {
            rx,
            is_cancelled: is_cancelled.clone(),
        };
        (
            rx,
            Self {
                backchannel: tx,
                action,
                description: description.to_owned(),
                is_cancelled,
                _marker: PhantomData,
            },
        )
    }

    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled.load(SeqCst)
    }
}

impl<T, F, S> BackendLink<T, F, S>
where
    F: Fn(&mut BackendEventLoop<S>) -> T + Send + 'static,
    S: BackendState + Send + 'static,
    T: Send + 'static,
{
    /// Sends `action` to the backend and lets `parameter` pick up its result
    /// on a later `try_update`.
    pub fn request_parameter_update(
        parameter: &mut UIParameter<T>,
        description: &str,
        action: F,
        request_tx: &mut Sender<Box<dyn BackendRequest<S>>>,
    ) {
        let (rx, linker) = BackendLink::new(description, action);
        debug!("requesting '{description}'");
        if request_tx.send(Box::new(linker)).is_err() {
            log::error!("{BACKEND_HUNG_UP_MSG} (request '{description}')");
            return;
        }
        parameter.set_recv(rx);
    }
}

pub trait BackendRequest<S>: Send
where
    S: BackendState,
{
    fn run_on_backend(&self, backend: &mut BackendEventLoop<S>);
    fn describe(&self) -> &str;
}

impl<T, F, S> BackendRequest<S> for BackendLink<T, F, S>
where
    F: Fn(&mut BackendEventLoop<S>) -> T + Send,
    S: BackendState + Send,
    T: Send,
{
    fn run_on_backend(&self, backend: &mut BackendEventLoop<S>) {
        if self.is_cancelled() {
            debug!("skipping cancelled request '{}'", self.description);
            return;
        }
        let result = (self.action)(backend);
        // The receiver may have been dropped while the action ran.
        if !self.is_cancelled() {
            let _ = self.backchannel.send(result).map_err(|_| {
                warn!(
                    "Trying to send message for request '{}' on closed channel.",
                    self.description
                )
            });
        }
    }
    fn describe(&self) -> &str {
        &self.description
    }
}

pub struct LinkReceiver<T> {
    rx: Receiver<T>,
    is_cancelled: Arc<AtomicBool>,
}

impl<T> std::fmt::Debug for LinkReceiver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkReceiver")
            .field("is_cancelled", &self.is_cancelled.load(SeqCst))
            .finish()
    }
}

impl<T> LinkReceiver<T> {
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        self.rx.try_recv()
    }
    pub fn recv_timeout(&self, duration: std::time::Duration) -> Result<T, RecvTimeoutError> {
        self.rx.recv_timeout(duration)
    }
}

impl<T> Drop for LinkReceiver<T> {
    fn drop(&mut self) {
        debug!("dropping link receiver");
        self.is_cancelled.store(true, SeqCst);
    }
}
