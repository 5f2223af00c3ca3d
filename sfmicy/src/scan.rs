//! Locating the interleaved metadata block in a stream body
//!
//! With `Icy-MetaData: 1` acknowledged, the body is raw audio with one
//! metadata block spliced in every `icy-metaint` bytes: the byte at that
//! offset is a length byte (value times 16 gives the block size), the
//! block follows, then audio resumes. The scanner walks the chunked body
//! counting audio bytes until the length byte falls inside the current
//! chunk, reassembles the block even when it spans chunk boundaries, and
//! stops reading the moment it has an answer.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tracing::debug;

use crate::error::{Error, Result};
use crate::metadata::title_from_block;

/// What the first metadata block of a stream said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The block carried a `StreamTitle` field (possibly empty).
    Title(String),
    /// Zero-length block, or a block without a `StreamTitle` field.
    NoTitle,
}

/// Scan a chunked body for the first metadata block and extract its title.
///
/// `interval` is the advertised `icy-metaint`: the length byte sits at
/// exactly that offset from the start of the body. `overshoot_limit`
/// bounds the scan: walking more than `interval + overshoot_limit` bytes
/// without having located the length byte aborts with
/// [`Error::BudgetExceeded`]. Byte accounting is contiguous, so a well
/// formed body always reaches the length byte first and the budget only
/// trips on miscounted or hostile bodies.
///
/// The stream is dropped by the caller; this function merely stops
/// polling it as soon as the outcome is known.
pub async fn scan_for_title<S, E>(
    mut chunks: S,
    interval: usize,
    overshoot_limit: usize,
) -> Result<ScanOutcome>
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Unpin,
    E: Into<Error>,
{
    let target = interval as u64;
    let budget = target.saturating_add(overshoot_limit as u64);
    let mut received: u64 = 0;

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(Into::into)?;
        let end = received + chunk.len() as u64;

        if target >= received && target < end {
            let offset = (target - received) as usize;
            let block_len = chunk[offset] as usize * 16;
            debug!(
                offset = target,
                block_len, "metadata length byte located"
            );
            if block_len == 0 {
                return Ok(ScanOutcome::NoTitle);
            }
            let block = collect_block(&mut chunks, &chunk, offset + 1, block_len).await?;
            return Ok(match title_from_block(&block) {
                Some(title) => ScanOutcome::Title(title),
                None => ScanOutcome::NoTitle,
            });
        }

        received = end;
        if received > budget {
            return Err(Error::BudgetExceeded { consumed: received });
        }
    }

    Err(Error::StreamEnded)
}

/// Gather `block_len` metadata bytes starting at `start` in `chunk`,
/// pulling further chunks when the block crosses a boundary.
async fn collect_block<S, E>(
    chunks: &mut S,
    chunk: &Bytes,
    start: usize,
    block_len: usize,
) -> Result<Vec<u8>>
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Unpin,
    E: Into<Error>,
{
    let mut block = Vec::with_capacity(block_len);
    let available = chunk.len().min(start + block_len);
    block.extend_from_slice(&chunk[start..available]);

    while block.len() < block_len {
        match chunks.next().await {
            Some(chunk) => {
                let chunk = chunk.map_err(Into::into)?;
                let take = (block_len - block.len()).min(chunk.len());
                block.extend_from_slice(&chunk[..take]);
            }
            None => return Err(Error::StreamEnded),
        }
    }
    Ok(block)
}
