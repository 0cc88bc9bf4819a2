/*!
# Vob Rip: Block Buffer
*/

use crate::{
	BLOCK_SIZE,
	BUFFER_BLOCKS,
};



#[derive(Debug)]
/// # Block Buffer.
///
/// One MiB of scratch space, 512 logical blocks of 2048 bytes each, shared
/// by the scanner and the fill executor so each file operation allocates
/// exactly once.
pub(crate) struct BlockBuf(Box<[u8]>);

impl BlockBuf {
	/// # New (Zeroed) Buffer.
	pub(crate) fn new() -> Self {
		Self(vec![0_u8; BUFFER_BLOCKS * BLOCK_SIZE].into_boxed_slice())
	}

	/// # First N Blocks.
	///
	/// ## Panics
	///
	/// Callers must keep `blocks` within [`BUFFER_BLOCKS`].
	pub(crate) fn blocks(&self, blocks: usize) -> &[u8] {
		&self.0[..blocks * BLOCK_SIZE]
	}

	/// # First N Blocks, Mutably.
	///
	/// ## Panics
	///
	/// Callers must keep `blocks` within [`BUFFER_BLOCKS`].
	pub(crate) fn blocks_mut(&mut self, blocks: usize) -> &mut [u8] {
		&mut self.0[..blocks * BLOCK_SIZE]
	}

	/// # One Block.
	///
	/// Return the 2048-byte window for block `idx` of the buffer.
	pub(crate) fn block(&self, idx: usize) -> &[u8] {
		&self.0[idx * BLOCK_SIZE..(idx + 1) * BLOCK_SIZE]
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_buf_windows() {
		let mut buf = BlockBuf::new();
		assert_eq!(buf.blocks(BUFFER_BLOCKS).len(), BUFFER_BLOCKS * BLOCK_SIZE);
		assert_eq!(buf.blocks(3).len(), 3 * BLOCK_SIZE);

		buf.blocks_mut(2)[BLOCK_SIZE] = 0xAB;
		assert_eq!(buf.block(1)[0], 0xAB);
		assert_eq!(buf.block(0), &[0_u8; BLOCK_SIZE]);
	}
}
