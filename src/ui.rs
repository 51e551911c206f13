//! Console front-end: the numbered main menu and the prompts behind each
//! entry. The loop in [`App::run`] is the only place that decides what a menu
//! number means; every command then calls into the codec, the store, the
//! ingestion controller, and the table renderer.

mod app;
mod helpers;
mod menu;

pub use app::App;
pub use menu::Command;
