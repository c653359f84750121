//! List the cameras of a gateway with their preview URLs.
//!
//! ```bash
//! export ARTEMIS_ENDPOINT=https://10.0.0.1:443
//! export ARTEMIS_ACCESS_KEY=your-access-key
//! export ARTEMIS_SECRET_KEY=your-secret-key
//! cargo run -p artemis --example list_cameras
//! ```

use artemis::{ClientBuilder, Result};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let client = ClientBuilder::from_env()?.build()?;

    let cameras = client.cameras(20, 0).await?;
    println!("{} cameras in total", cameras.total);
    for camera in cameras.data {
        match client.preview_url(&camera.index_code, 1, 0).await {
            Ok(preview) => println!("{}\t{}\t{}", camera.index_code, camera.name, preview.data.url),
            Err(err) => println!("{}\t{}\t{err}", camera.index_code, camera.name),
        }
    }
    Ok(())
}
