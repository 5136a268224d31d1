use std::io::Write;

use crate::config::Config;
use crate::error::Result;
use crate::youtube::{DateWindow, VideoRecord, YouTube, collect_video_ids, fetch_video_records};

/// Collect a channel's videos, fetch their statistics, and write the CSV
/// report to stdout. Nothing is written until both stages have completed.
pub async fn run(config: &Config, channel_id: &str, window: &DateWindow) -> Result<()> {
    let youtube = YouTube::new(config)?;

    eprintln!("Fetching videos for channel {}...", channel_id);
    let video_ids = collect_video_ids(&youtube, channel_id, window).await?;

    eprintln!("Found {} video(s), fetching statistics...", video_ids.len());
    let records = fetch_video_records(&youtube, &video_ids).await?;

    write_csv(std::io::stdout().lock(), &records)
}

/// Write the `Views,Title,URL` header and one row per record, in the order
/// given. The csv writer quotes fields containing delimiters, quotes, or
/// line breaks and doubles embedded quotes.
pub fn write_csv<W: Write>(out: W, records: &[VideoRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record(["Views", "Title", "URL"])?;
    for record in records {
        writer.write_record([
            record.views.to_string().as_str(),
            record.title.as_str(),
            record.url.as_str(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}
