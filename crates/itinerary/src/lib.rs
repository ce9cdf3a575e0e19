mod bulk;
mod day;
mod draft;
mod error;
mod history;
mod repository;
mod selection;
mod session;
mod store;

pub use bulk::*;
pub use day::*;
pub use draft::*;
pub use error::*;
pub use history::*;
pub use repository::*;
pub use selection::*;
pub use session::*;
pub use store::*;
