/*!
# Vob Rip: Verification Samples
*/

use crate::{
	BLOCK_SIZE,
	BlockSource,
	GapPlan,
	utility,
	VobRipError,
};
use std::fs::File;



/// # Collect Verification Samples.
///
/// Pick up to `desired` block indices from `[0, available_blocks)` that fall
/// *outside* the plan, spread roughly evenly across the file. Each candidate
/// walks forward out of any gap it lands in, falling back to a backward walk
/// when the tail of the file is all gap; candidates with nowhere to go are
/// dropped, as are adjacent duplicates.
///
/// The result is strictly increasing and possibly empty (e.g. a brand-new
/// file is all gap, and there is nothing worth confirming).
pub(crate) fn collect_samples(
	plan: &GapPlan,
	available_blocks: usize,
	desired: usize,
) -> Vec<usize> {
	if available_blocks == 0 || desired == 0 { return Vec::new(); }
	let target = usize::min(desired, available_blocks);

	let mut samples: Vec<usize> = Vec::with_capacity(target);
	for i in 0..target {
		let mut candidate = usize::try_from(
			((i as u64 + 1) * available_blocks as u64).wrapping_div(target as u64 + 1)
		).unwrap_or(available_blocks - 1);
		if candidate >= available_blocks { candidate = available_blocks - 1; }

		let mut pick = candidate;
		while pick < available_blocks && plan.contains(pick) { pick += 1; }
		if pick >= available_blocks {
			let mut back = candidate;
			while back > 0 && plan.contains(back) { back -= 1; }
			if plan.contains(back) { continue; }
			pick = back;
		}

		if samples.last() == Some(&pick) { continue; }
		samples.push(pick);
	}

	samples
}

/// # Verify Samples.
///
/// Read each sample block from both the disc and the destination and require
/// byte-exact agreement. This runs before a gap fill writes anything: if the
/// data already on hand no longer matches the disc, overwriting it blind
/// could replace a good old read with a bad new one.
///
/// ## Errors
///
/// The first disagreement fails the whole file with an error naming the
/// sector; read failures on either side are likewise fatal.
pub(crate) fn verify_samples<S>(
	src: &S,
	src_offset: usize,
	dst: &File,
	path: &str,
	samples: &[usize],
) -> Result<(), VobRipError>
where S: BlockSource + ?Sized {
	let mut disc_block = [0_u8; BLOCK_SIZE];
	let mut file_block = [0_u8; BLOCK_SIZE];

	for &block in samples {
		if src.read_blocks(src_offset + block, 1, &mut disc_block)? != 1 {
			return Err(VobRipError::SourceRead(path.to_owned(), src_offset + block));
		}

		let bytes = utility::read_at_full(dst, (block * BLOCK_SIZE) as u64, &mut file_block)
			.map_err(|_| VobRipError::Read(path.to_owned()))?;
		if bytes != BLOCK_SIZE {
			return Err(VobRipError::Read(path.to_owned()));
		}

		if disc_block != file_block {
			return Err(VobRipError::Verify(path.to_owned(), block));
		}
	}

	Ok(())
}
