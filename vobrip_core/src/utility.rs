/*!
# Vob Rip: I/O Odds and Ends
*/

use std::{
	fs::File,
	io,
	os::unix::fs::FileExt,
};



/// # Is the Block Blank?
///
/// A destination sector counts as blank iff every one of its bytes is zero.
pub(crate) fn is_blank(block: &[u8]) -> bool {
	block.iter().all(|&b| b == 0)
}

/// # Positional Read, In Full.
///
/// Read from `offset` until the buffer is full or the file runs out,
/// retrying on interruption. Returns the number of bytes actually obtained,
/// which is only less than the buffer length at EOF.
///
/// ## Errors
///
/// Non-transient I/O errors are bubbled up.
pub(crate) fn read_at_full(file: &File, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
	let mut total = 0;

	while total < buf.len() {
		match file.read_at(&mut buf[total..], offset + total as u64) {
			Ok(0) => break,
			Ok(n) => { total += n; },
			Err(e) if e.kind() == io::ErrorKind::Interrupted => {},
			Err(e) => return Err(e),
		}
	}

	Ok(total)
}

/// # Positional Write, All of It.
///
/// Write the whole slice at `offset`, retrying on interruption. A write that
/// cannot make progress is an error; partially-written destination state is
/// left as-is for the caller to report.
///
/// ## Errors
///
/// Non-transient I/O errors are bubbled up.
pub(crate) fn write_at_all(file: &File, offset: u64, buf: &[u8]) -> io::Result<()> {
	let mut total = 0;

	while total < buf.len() {
		match file.write_at(&buf[total..], offset + total as u64) {
			Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
			Ok(n) => { total += n; },
			Err(e) if e.kind() == io::ErrorKind::Interrupted => {},
			Err(e) => return Err(e),
		}
	}

	Ok(())
}
