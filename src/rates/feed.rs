use log::warn;
use thiserror::Error;

use crate::core::EmptyResult;

use super::RateChangeEvent;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Malformed interest rate feed: {reason}")]
    MalformedFeed {reason: String},
}

/// Adapts some raw rate feed format to rate change events.
pub trait RateFeed: Send + Sync {
    fn name(&self) -> &str;
    fn parse(&self, data: &str) -> Result<Vec<RateChangeEvent>, FeedError>;
}

/// Reads all records of a CSV feed skipping its header, handing each non-malformed one to the
/// specified handler. Returns the number of records which have been successfully handled.
pub fn read_records<F>(feed: &str, data: &str, mut handler: F) -> Result<usize, FeedError>
    where F: FnMut(&csv::StringRecord) -> EmptyResult
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut count = 0;

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping {} of {feed} feed: {e}.", location(data, e.position()));
                continue;
            },
        };

        if record.iter().all(str::is_empty) {
            continue;
        }

        match handler(&record) {
            Ok(()) => count += 1,
            Err(e) => warn!("Skipping {} of {feed} feed: {e}.", location(data, record.position())),
        }
    }

    if count == 0 {
        return Err(FeedError::MalformedFeed {reason: format!("{feed} feed has no valid records")});
    }

    Ok(count)
}

/// The reader reports the position where it started to read a record, which precedes the blank lines it
/// skipped before the record.
fn location(data: &str, position: Option<&csv::Position>) -> String {
    let Some(position) = position else {
        return "a record".to_owned();
    };

    let offset = usize::try_from(position.byte()).unwrap_or(usize::MAX);
    let skipped = data.as_bytes().get(offset..).unwrap_or_default().iter()
        .take_while(|&&byte| byte == b'\n' || byte == b'\r')
        .filter(|&&byte| byte == b'\n')
        .count();

    format!("line #{}", position.line() + skipped as u64)
}
