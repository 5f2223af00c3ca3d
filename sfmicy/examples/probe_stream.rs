//! Example: Probe a radio stream for its current title
//!
//! This example demonstrates:
//! - Creating an ICY probe
//! - Asking a stream what it is playing
//! - Reading the fallback source of the answer
//!
//! Run with: cargo run --example probe_stream -- <stream-url>

use sfmicy::{IcyProbe, Result, TitleSource};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://ice1.somafm.com/groovesalad-128-mp3".to_string());

    println!("Static FM - Stream Probe");
    println!("========================\n");
    println!("Stream: {}\n", url);

    let probe = IcyProbe::new()?;
    let playing = probe.now_playing(&url).await;

    println!("Now Playing: {}", playing.title);
    if let Some(station) = &playing.station {
        println!("Station:     {}", station);
    }

    match playing.source {
        TitleSource::Stream => println!("Source:      interleaved metadata"),
        TitleSource::StationName => println!("Source:      icy-name header"),
        TitleSource::Placeholder => println!("Source:      placeholder (stream said nothing)"),
    }

    Ok(())
}
