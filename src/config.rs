use std::net::SocketAddr;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub filter_page_size: u64,
    pub search_page_size: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let listen_addr = format!("{host}:{port}")
            .parse()
            .context("invalid HOST/PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://kinoteka.db?mode=rwc".to_string());

        let filter_page_size = page_size_var("FILTER_PAGE_SIZE", 2)?;
        let search_page_size = page_size_var("SEARCH_PAGE_SIZE", 1)?;

        Ok(Self {
            listen_addr,
            database_url,
            filter_page_size,
            search_page_size,
        })
    }
}

fn page_size_var(name: &str, default: u64) -> anyhow::Result<u64> {
    let size = match std::env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("invalid {name}"))?,
        Err(_) => default,
    };
    Ok(size.max(1))
}
