pub use error::*;
pub use service::*;
pub use settings::*;
pub use store::*;

mod error;
mod service;
mod settings;
mod store;
