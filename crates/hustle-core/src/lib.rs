pub mod actions;
pub mod config;
pub mod document;
pub mod error;
pub mod forms;
pub mod html;
pub mod persistence;
pub mod reducer;
pub mod router;
pub mod sample;
pub mod state;
pub mod views;

pub use actions::*;
pub use config::*;
pub use document::*;
pub use error::*;
pub use persistence::*;
pub use reducer::*;
pub use state::*;
