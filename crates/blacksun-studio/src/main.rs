use anyhow::Result;

use blacksun_engine::logging::{init_logging, LoggingConfig};
use blacksun_fx::BlackSun;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("starting blacksun studio");

    BlackSun::new()
        .title("Black Sun")
        .size(1280.0, 720.0)
        .intro_text("BLACK SUN")
        .run()
}
