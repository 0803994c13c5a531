pub mod component;

pub use component::{CancelOutcome, PageRequest, RenderContext, Reservations};
