//! Mints a local identity token for poking the API without the real auth
//! provider:
//!
//!   cargo run --bin devtoken -- shopper@example.com "Test Shopper"

use healthpoints::{auth::JwtKeys, config::AppConfig};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let email = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: devtoken <email> [name]"))?;
    let name = args.next().unwrap_or_else(|| email.clone());

    let config = AppConfig::from_env()?;
    let token = JwtKeys::from_config(&config.jwt).sign_identity(&email, &name)?;
    println!("{token}");
    Ok(())
}
