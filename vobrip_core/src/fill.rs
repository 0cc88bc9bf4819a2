/*!
# Vob Rip: Fill Executor
*/

use crate::{
	BLOCK_SIZE,
	BlockBuf,
	BlockSource,
	BUFFER_BLOCKS,
	FillStrategy,
	GapPlan,
	GapRange,
	ReadErrorStrategy,
	utility,
	VobRipError,
};
use fyi_msg::{
	Msg,
	Progless,
};
use std::fs::File;



#[derive(Debug)]
/// # Gap Filler.
///
/// A per-file fill session. It walks the plan in whatever order the strategy
/// dictates, writing only the sectors the source actually delivers, and
/// keeps the running filled count even when a hard error cuts the session
/// short (the report still wants the number).
pub(crate) struct Filler<'a, S: ?Sized> {
	src: &'a S,
	src_offset: usize,
	dst: &'a File,
	label: &'a str,
	errors: ReadErrorStrategy,
	progress: Option<&'a Progless>,
	filled: usize,
}

impl<'a, S: BlockSource + ?Sized> Filler<'a, S> {
	/// # New Session.
	pub(crate) const fn new(
		src: &'a S,
		src_offset: usize,
		dst: &'a File,
		label: &'a str,
		errors: ReadErrorStrategy,
		progress: Option<&'a Progless>,
	) -> Self {
		Self {
			src,
			src_offset,
			dst,
			label,
			errors,
			progress,
			filled: 0,
		}
	}

	#[must_use]
	/// # Blocks Written So Far.
	pub(crate) const fn filled(&self) -> usize { self.filled }

	/// # Fill!
	///
	/// Attempt every range in the plan, ordered per the strategy. Within a
	/// range the work proceeds in chunks of up to 512 blocks; the random
	/// strategy pre-chops all ranges into such chunks and shuffles those.
	///
	/// ## Errors
	///
	/// Short writes are always fatal, as are short reads under
	/// [`ReadErrorStrategy::Abort`]. Previously written sectors stay valid
	/// either way.
	pub(crate) fn run(
		&mut self,
		plan: &GapPlan,
		strategy: FillStrategy,
		buf: &mut BlockBuf,
	) -> Result<(), VobRipError> {
		if plan.is_empty() { return Ok(()); }

		match strategy {
			FillStrategy::Forward => for range in plan.ranges() {
				self.segment(range.start(), range.count(), buf)?;
			},
			FillStrategy::Reverse => for range in plan.ranges() {
				let mut processed = 0;
				while processed < range.count() {
					let chunk = usize::min(range.count() - processed, BUFFER_BLOCKS);
					let start = range.start() + range.count() - processed - chunk;
					self.segment(start, chunk, buf)?;
					processed += chunk;
				}
			},
			FillStrategy::OutsideIn => for range in plan.ranges() {
				let mut front = 0;
				let mut back = range.count();
				let mut use_front = true;
				while front < back {
					let chunk = usize::min(back - front, BUFFER_BLOCKS);
					if use_front {
						self.segment(range.start() + front, chunk, buf)?;
						front += chunk;
					}
					else {
						self.segment(range.start() + back - chunk, chunk, buf)?;
						back -= chunk;
					}
					use_front = ! use_front;
				}
			},
			FillStrategy::Random(seed) => {
				let mut segments = segment_list(plan);
				shuffle(&mut segments, seed);
				for s in segments {
					self.segment(s.start(), s.count(), buf)?;
				}
			},
		}

		Ok(())
	}

	/// # Fill One Segment.
	///
	/// The common chunk contract: read up to 512 blocks, write whatever
	/// usable prefix came back, and let the read-error strategy decide how
	/// much of the shortfall to step over, bounded by the segment remainder.
	fn segment(
		&mut self,
		start: usize,
		count: usize,
		buf: &mut BlockBuf,
	) -> Result<(), VobRipError> {
		let mut cursor = 0;

		while cursor < count {
			let chunk = usize::min(count - cursor, BUFFER_BLOCKS);
			let read_block = start + cursor;

			let got = match self.src.read_blocks(
				self.src_offset + read_block,
				chunk,
				buf.blocks_mut(chunk),
			) {
				Ok(n) if n == chunk => n,
				Ok(n) if n > 0 => {
					Msg::warning(format!(
						"Gap fill for {}: read {n} of {chunk} blocks at {read_block}.",
						self.label,
					)).eprint();
					n
				},
				Ok(_) | Err(_) => {
					Msg::warning(format!(
						"Gap fill for {}: read failure at block {read_block}.",
						self.label,
					)).eprint();
					0
				},
			};

			if got != 0 {
				utility::write_at_all(
					self.dst,
					(read_block * BLOCK_SIZE) as u64,
					buf.blocks(got),
				)
					.map_err(|_| VobRipError::Write(self.label.to_owned()))?;
				self.filled += got;
			}

			if got < chunk {
				let remaining = count - (cursor + got);
				if remaining == 0 {
					cursor = count;
					continue;
				}

				let skip = match self.errors {
					ReadErrorStrategy::Abort => return Err(
						VobRipError::SourceRead(self.label.to_owned(), read_block + got)
					),
					ReadErrorStrategy::SkipBlock => 1,
					ReadErrorStrategy::SkipMultiblock => usize::max(1, chunk - got),
				};

				cursor += got + usize::min(skip, remaining);
			}
			else { cursor += chunk; }

			if let Some(p) = self.progress { p.increment(); }
		}

		Ok(())
	}
}



#[derive(Debug, Clone, Copy)]
/// # Shuffle RNG.
///
/// The classic 31-bit linear congruential generator, fixed here rather than
/// borrowed from the platform so a given seed produces the same segment
/// order everywhere.
struct SegmentRng(u32);

impl SegmentRng {
	/// # Next Value.
	///
	/// Advance the state and return bits 16..31 of it.
	fn next(&mut self) -> u32 {
		self.0 = self.0.wrapping_mul(1_103_515_245).wrapping_add(12_345);
		(self.0 >> 16) & 0x7FFF
	}
}

/// # Chop a Plan Into Segments.
///
/// Flatten every range into front-aligned chunks of up to 512 blocks, in
/// plan order.
fn segment_list(plan: &GapPlan) -> Vec<GapRange> {
	let mut segments = Vec::new();

	for range in plan.ranges() {
		let mut produced = 0;
		while produced < range.count() {
			let chunk = usize::min(range.count() - produced, BUFFER_BLOCKS);
			segments.push(GapRange {
				start: range.start() + produced,
				count: chunk,
			});
			produced += chunk;
		}
	}

	segments
}

/// # Shuffle Segments.
///
/// Fisher–Yates with indices drawn from the seeded [`SegmentRng`]; for a
/// given seed the resulting order is a pure function of the input list.
fn shuffle(segments: &mut [GapRange], seed: u32) {
	let mut rng = SegmentRng(seed);
	for i in (2..=segments.len()).rev() {
		let j = rng.next() as usize % i;
		segments.swap(i - 1, j);
	}
}
