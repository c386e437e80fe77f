//! Vote Board Frontend Entry Point

use leptos::prelude::*;
use vote_board_ui::{app::App, config};

fn main() {
    console_error_panic_hook::set_once();
    config::init();
    mount_to_body(App);
}
