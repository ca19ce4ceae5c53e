use std::path::PathBuf;

use maquette::MaquetteApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let assets_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"));

    MaquetteApp::new(assets_dir).run()
}
