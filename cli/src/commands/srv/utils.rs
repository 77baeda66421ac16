//! # cardchat HTTP Server Utilities
//!
//! File: cli/src/commands/srv/utils.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Helpers for the server startup output:
//! - Local network IP detection, so the page can be opened from other devices
//! - The startup banner listing URLs and active settings
//!
use super::config::ServerConfig;
use std::net::{IpAddr, SocketAddr, UdpSocket};
use tracing::{info, warn};

/// # Get Local IP Address (`get_local_ip`)
///
/// Finds the address of the interface used for outbound traffic by
/// connecting a UDP socket (no packet is sent). Falls back to `"localhost"`.
pub fn get_local_ip() -> String {
    info!("Attempting to detect local network IP address");

    let detected = UdpSocket::bind("0.0.0.0:0")
        .and_then(|socket| {
            socket.connect("192.0.2.1:80")?;
            socket.local_addr()
        })
        .map(|addr| addr.ip());

    match detected {
        Ok(ip) if usable_ip(ip) => {
            info!("Found local IP: {}", ip);
            ip.to_string()
        }
        Ok(ip) => {
            warn!("Detected address {} is not reachable from the network", ip);
            "localhost".to_string()
        }
        Err(e) => {
            warn!("Could not detect local network IP ({}), falling back to 'localhost'", e);
            "localhost".to_string()
        }
    }
}

fn usable_ip(ip: IpAddr) -> bool {
    !ip.is_loopback() && !ip.is_unspecified()
}

/// # Print Startup Banner (`print_banner`)
pub fn print_banner(config: &ServerConfig, addr: SocketAddr, local_ip: &str) {
    println!("\n=================================================================");
    println!("💬 Chat page:         http://localhost:{}", addr.port());
    if local_ip != "localhost" {
        println!("🔗 Network URL:       http://{}:{}", local_ip, addr.port());
    }
    println!("⚙️  Binding to address: {}", addr);
    println!("🤖 Chat backend:      {}", config.backend.chat_url);
    println!("🏢 Branding:          {}", config.branding.company_name);
    match &config.static_dir {
        Some(dir) => println!("📂 Static files:      {}", dir.display()),
        None => println!("📂 Static files:      (none)"),
    }
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("=================================================================\n");
}
