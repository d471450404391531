//! Upload a file and schedule a post that uses it.
//!
//! ```text
//! cargo run -p robopost-core --example schedule_post -- robopost.toml images/sample1.jpg <channel-id>
//! ```
//!
//! Point `base_url` in the config at a running `mock-server` to try it offline.

use chrono::{Duration, Utc};
use robopost_core::{ApiError, ClientConfig, RobopostClient, ScheduledPostRequest};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ApiError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(config_path), Some(file), Some(channel)) = (args.next(), args.next(), args.next())
    else {
        eprintln!("usage: schedule_post <config.toml> <file> <channel-id>");
        std::process::exit(2);
    };

    let client = RobopostClient::from_config(ClientConfig::load_from_path(&config_path)?)?;

    let media = client.upload_media(&file)?;
    println!("uploaded media: {media:?}");

    let request = ScheduledPostRequest::new("Test scheduled post in 5 seconds!", [channel])
        .with_image(media.storage_object_id)
        .scheduled_at(Utc::now() + Duration::seconds(5));
    for post in client.create_scheduled_posts(&request)? {
        println!("scheduled post {} at {}", post.id, post.schedule_at);
    }
    Ok(())
}
