//! Site Preview Example
//!
//! Mounts the Stamina views on a fresh context, then walks through a few
//! language and page changes, printing the page after each one.
//!
//! The start-up language comes from the first argument or `LANG`
//! (e.g. `fr_FR.UTF-8`).

use stamina_core::view::{GlobalMenu, StaminaApp};
use stamina_core::{install_console, AppContext, LogConfig, LogLevel, LogSettings, Mounted};

fn main() -> Result<(), stamina_core::Error> {
    println!("=== Stamina Site Preview ===\n");

    install_console();
    let settings = LogSettings::new(LogConfig {
        level: LogLevel::Info,
        ..LogConfig::default()
    });
    let ctx = AppContext::new(settings)?;

    let app = Mounted::mount(&ctx, StaminaApp);
    let menu = Mounted::mount(&ctx, GlobalMenu);

    let tag = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("LANG").ok());
    let language = ctx.start(tag.as_deref().map(|t| t.split('.').next().unwrap_or(t)))?;
    println!("Start-up language: {}\n", language);
    println!("{}\n", app.html());

    ctx.actions().navigate("/gsbpm")?;
    println!("After navigating to /gsbpm:\n{}\n", app.html());

    ctx.actions().set_language("fr")?;
    println!("After switching to French:\n{}\n", app.html());

    ctx.actions().set_language("de")?;
    println!("After asking for German (falls back to English):\n{}\n", menu.html());

    match ctx.dictionary().get_entry("welcome_gamso") {
        Ok(text) => println!("welcome_gamso = {}", text),
        Err(e) => println!("Lookup failed as expected: {}", e),
    }

    println!(
        "\nRenders: {} = {}, {} = {}",
        app.name(),
        app.render_count(),
        menu.name(),
        menu.render_count()
    );
    println!("\n=== Preview Complete ===");
    Ok(())
}
