mod app_state;
mod top_bar;

pub use app_state::*;
pub use top_bar::TopBar;
