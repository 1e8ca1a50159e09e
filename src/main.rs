use starfield::prelude::*;

fn main() {
    init_logging(LoggingConfig::default());

    let config = StarfieldConfig::new().with_palette(Palette::Starlight);
    log::info!("Space or P toggles playful mode, Escape quits");

    if let Err(e) = run(config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
