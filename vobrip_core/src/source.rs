/*!
# Vob Rip: Block Sources
*/

use crate::{
	BLOCK_SIZE,
	utility,
	VobRipError,
};
use std::{
	fs::File,
	path::Path,
};



/// # Block Source.
///
/// Anything that can serve 2048-byte logical blocks by address: a mounted
/// disc, a previously ripped tree, a simulated surface in the tests.
pub trait BlockSource {
	/// # Read Blocks.
	///
	/// Read up to `count` blocks starting at `lba` into the front of `buf`,
	/// which must hold at least `count * 2048` bytes.
	///
	/// `Ok(n)` with `n < count` is a partial read — the media gave up partway
	/// through. `Ok(0)` means no data at all at this address.
	///
	/// ## Errors
	///
	/// An `Err` is an unrecoverable read failure at `lba`. Callers decide
	/// whether that dooms the operation or merely the chunk.
	fn read_blocks(
		&self,
		lba: usize,
		count: usize,
		buf: &mut [u8],
	) -> Result<usize, VobRipError>;
}



#[derive(Debug)]
/// # One Backing File.
struct SourcePart {
	file: File,
	blocks: usize,
}

#[derive(Debug)]
/// # Filesystem Block Source.
///
/// Serves a VOB domain from the source `VIDEO_TS` tree. A menu domain is a
/// single file; a title domain is the in-order concatenation of its one-GiB
/// parts, so block addresses carry straight across part boundaries the same
/// way they do on disc.
pub struct VobSource {
	label: String,
	parts: Vec<SourcePart>,
}

impl VobSource {
	/// # Open.
	///
	/// Open the given files, in order, as one contiguous block address space.
	///
	/// ## Errors
	///
	/// Errors if any file cannot be opened, or if a non-final file has a
	/// length that is not a whole number of blocks (concatenation would
	/// smear every subsequent address). A ragged tail on the *last* file is
	/// tolerated; the fraction is simply unreachable.
	pub fn open<P>(label: &str, paths: &[P]) -> Result<Self, VobRipError>
	where P: AsRef<Path> {
		let mut parts = Vec::with_capacity(paths.len());
		for (k, path) in paths.iter().enumerate() {
			let path = path.as_ref();
			let nice = path.to_string_lossy();
			let file = File::open(path)
				.map_err(|_| VobRipError::SourceOpen(nice.to_string()))?;
			let len = file.metadata()
				.map_err(|_| VobRipError::SourceOpen(nice.to_string()))?
				.len();
			if len % BLOCK_SIZE as u64 != 0 && k + 1 < paths.len() {
				return Err(VobRipError::BlockAlign(nice.to_string()));
			}
			let blocks = usize::try_from(len.wrapping_div(BLOCK_SIZE as u64))
				.map_err(|_| VobRipError::SourceOpen(nice.to_string()))?;
			parts.push(SourcePart { file, blocks });
		}

		Ok(Self { label: label.to_owned(), parts })
	}

	#[must_use]
	/// # Total Blocks Across All Parts.
	pub fn total_blocks(&self) -> usize {
		self.parts.iter().map(|p| p.blocks).sum()
	}
}

impl BlockSource for VobSource {
	/// # Read Blocks.
	///
	/// Reads span part boundaries transparently. If an I/O error strikes
	/// after some blocks were already obtained, the partial count is
	/// reported; an error on the very first block is unrecoverable.
	fn read_blocks(
		&self,
		lba: usize,
		count: usize,
		buf: &mut [u8],
	) -> Result<usize, VobRipError> {
		let mut total = 0;

		'parts: while total < count {
			// Locate the part holding the next address.
			let mut local = lba + total;
			for part in &self.parts {
				if local < part.blocks {
					let take = usize::min(count - total, part.blocks - local);
					let dst = &mut buf[total * BLOCK_SIZE..(total + take) * BLOCK_SIZE];
					match utility::read_at_full(&part.file, (local * BLOCK_SIZE) as u64, dst) {
						Ok(bytes) => {
							let got = bytes.wrapping_div(BLOCK_SIZE);
							total += got;
							if got < take { break 'parts; }
						},
						Err(_) if total > 0 => break 'parts,
						Err(_) => return Err(VobRipError::SourceRead(self.label.clone(), lba)),
					}
					continue 'parts;
				}
				local -= part.blocks;
			}

			// Off the end of the last part.
			break;
		}

		Ok(total)
	}
}
