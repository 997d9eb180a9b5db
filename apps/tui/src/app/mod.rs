// App module for country-explorer
// Holds the card deck, the selection and the background lookups

pub mod actions;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::App;
