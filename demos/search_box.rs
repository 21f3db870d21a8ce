use chrono::Local;
use debounced::{DebouncerBuilder, TimeUnit};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn now() -> String {
    Local::now().format("%H:%M:%S%.3f").to_string()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("debounced_runtime=debug")),
        )
        .init();

    let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/../demos/config/debounce.toml");
    println!("Config file: {}\n", config_path);

    // Search box: one stream per input field, delay from ${search.delay}
    let search = DebouncerBuilder::with_toml(config_path)
        .delay_str("${search.delay:250ms}")
        .build_keyed(|(field, query): (&'static str, String)| {
            println!("[{}] search {:>8}: {:?}", now(), field, query);
        })?;

    // Autosave: whole-second unit for the bare number in ${autosave.delay}
    let autosave = DebouncerBuilder::with_toml(config_path)
        .delay_str("${autosave.delay}")
        .time_unit(TimeUnit::Seconds)
        .build(|body: String| {
            println!("[{}] autosave: {} bytes", now(), body.len());
        })?;

    println!("Typing 'tokio' into the users field and 'rust' into the repos field...");
    for len in 1..=5 {
        let users: String = "tokio".chars().take(len).collect();
        let repos: String = "rust".chars().take(len).collect();
        search.debounce("users", ("users", users.clone()))?;
        search.debounce("repos", ("repos", repos))?;
        autosave.debounce(users);
        tokio::time::sleep(Duration::from_millis(60)).await;
    }
    tokio::time::sleep(Duration::from_millis(300)).await;

    println!("\nTyping into the orders field, then pressing Enter (flush)...");
    search.debounce("orders", ("orders", "42".to_string()))?;
    search.flush("orders");

    println!("\nTyping into the archive field, then closing it (cancel)...");
    search.debounce("archive", ("archive", "old".to_string()))?;
    search.cancel("archive");

    println!("\nLeaving the page: deliver whatever is still pending...");
    search.debounce("users", ("users", "tokio-rs".to_string()))?;
    let flushed = search.flush_all();
    println!("[{}] flushed {} pending search(es)", now(), flushed);
    autosave.flush();

    search.dispose();
    autosave.dispose();

    Ok(())
}
