use deck_demo::run_demo;
use swipedeck_ui::DeckConfig;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== swipedeck headless demo ===");
    println!("Set RUST_LOG=debug to follow gestures and the shuffle cycle.");

    let scene = run_demo(DeckConfig::default())?;
    println!("{scene}");
    Ok(())
}
