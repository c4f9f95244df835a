/// Outcome of applying an event once.
#[derive(Debug, PartialEq, Eq)]
pub enum EventState {
    /// The event is done and can be dropped.
    Finished,
    /// The event waits on something (e.g. a file dialog) and must be applied
    /// again in the next frame.
    Busy,
}

pub trait AppEvent {
    type App;
    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String>;
}
