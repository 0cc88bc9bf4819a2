/*!
# Vob Rip: Destination Scanner
*/

use crate::{
	BLOCK_SIZE,
	BlockBuf,
	BUFFER_BLOCKS,
	GapPlan,
	utility,
	VobRipError,
};
use std::fs::File;



#[derive(Debug, Default)]
/// # Destination Scan.
///
/// The observed state of an output file: which of its sectors are zero-filled
/// runs, how many blocks it actually holds, and its raw length.
///
/// The truncated tail — everything between `full_blocks` and the expected
/// size — is deliberately *not* part of the plan; the orchestrator appends it
/// so tail-adjacent runs coalesce through the ordinary [`GapPlan::add`] path.
pub(crate) struct FileScan {
	plan: GapPlan,
	blank_blocks: usize,
	full_blocks: usize,
	existing_bytes: u64,
}

impl FileScan {
	/// # Scan a Destination File.
	///
	/// Walk the file positionally in chunks of up to 512 blocks, recording
	/// every run of all-zero sectors within the first
	/// `min(full_blocks, expected_blocks)` blocks. A trailing sub-block
	/// fragment is ignored here and counts toward the missing tail instead.
	///
	/// ## Errors
	///
	/// Any read failure discards the partial result and errors out; the
	/// caller gives up on the file.
	pub(crate) fn read(
		file: &File,
		path: &str,
		expected_blocks: usize,
		buf: &mut BlockBuf,
	) -> Result<Self, VobRipError> {
		let existing_bytes = file.metadata()
			.map_err(|_| VobRipError::Read(path.to_owned()))?
			.len();
		let full_blocks = usize::try_from(existing_bytes / BLOCK_SIZE as u64)
			.map_err(|_| VobRipError::Read(path.to_owned()))?;
		let scan_blocks = usize::min(full_blocks, expected_blocks);

		let mut plan = GapPlan::default();
		let mut blank_blocks = 0;
		let mut pending_start = None;
		let mut processed = 0;

		while processed < scan_blocks {
			let chunk = usize::min(scan_blocks - processed, BUFFER_BLOCKS);
			let bytes = utility::read_at_full(
				file,
				(processed * BLOCK_SIZE) as u64,
				buf.blocks_mut(chunk),
			)
				.map_err(|_| VobRipError::Read(path.to_owned()))?;

			// Whole blocks only; a short read here means the file shrank
			// under us, so stop where the data stops.
			let have = bytes.wrapping_div(BLOCK_SIZE);
			if have == 0 { break; }

			for i in 0..have {
				let block = processed + i;
				if utility::is_blank(buf.block(i)) {
					if pending_start.is_none() { pending_start = Some(block); }
				}
				else if let Some(start) = pending_start.take() {
					let run = block - start;
					plan.add(start, run);
					blank_blocks += run;
				}
			}

			processed += have;
			if have < chunk { break; }
		}

		// Flush a run still open at the end of the scan.
		if let Some(start) = pending_start {
			let run = processed - start;
			plan.add(start, run);
			blank_blocks += run;
		}

		Ok(Self { plan, blank_blocks, full_blocks, existing_bytes })
	}
}

impl FileScan {
	/// # The Gap Plan (So Far).
	pub(crate) fn plan(&self) -> &GapPlan { &self.plan }

	/// # Take the Plan.
	pub(crate) fn into_plan(self) -> GapPlan { self.plan }

	/// # Blank Blocks Found.
	pub(crate) const fn blank_blocks(&self) -> usize { self.blank_blocks }

	/// # Whole Blocks Present.
	pub(crate) const fn full_blocks(&self) -> usize { self.full_blocks }

	/// # Raw File Length in Bytes.
	pub(crate) const fn existing_bytes(&self) -> u64 { self.existing_bytes }
}
