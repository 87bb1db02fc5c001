use super::Context;
use gamesense::error::SenseResult;
use gamesense::updates::{fetch_latest_release, UpdateStatus};
use tracing::error;

/// Reports whether a newer release exists. Downloading it is left to the user.
pub fn run(ctx: &Context) -> SenseResult<()> {
    let params = &ctx.config.updates;
    println!("\n=== CHECKING FOR UPDATES ===");

    let release = fetch_latest_release(&params.release_url, &params.current_version)
        .inspect_err(|e| error!("Update check failed: {}", e))?;
    let status = UpdateStatus::evaluate(&params.current_version, &release)?;
    status.save(ctx.config.paths.update_file())?;

    if status.update_available {
        println!(
            "⬆️  Update available: v{} (you have v{})",
            status.latest_version, status.current_version
        );
        if let Some(body) = release.body.as_deref().filter(|b| !b.trim().is_empty()) {
            println!("\nChangelog:\n{}", body);
        }
        if let Some(asset) = release.package() {
            println!("\nDownload: {}", asset.browser_download_url);
        }
    } else {
        println!("✅ You're running the latest version (v{}).", status.current_version);
    }
    Ok(())
}
