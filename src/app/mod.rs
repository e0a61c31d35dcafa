pub mod clock;
pub mod ops;
pub mod state;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use state::{ClearRequest, Theme, View, ViewState};
pub use store::NoteStore;
