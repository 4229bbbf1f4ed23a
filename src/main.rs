use color_eyre::Result;

mod app;
mod config;
mod editor;
mod navbar;
mod request;
mod state;
mod types;
mod ui;
mod utils;
mod viewer;

use app::App;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let terminal = ratatui::init();
    let app_result = App::default().run(terminal).await;
    ratatui::restore();
    app_result
}
