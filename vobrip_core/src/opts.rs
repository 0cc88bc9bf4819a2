/*!
# Vob Rip: Rip Options
*/

use crate::VobRipError;



/// # FLAG: Compare Only.
const FLAG_COMPARE: u8 =      0b0000_0001;

/// # FLAG: Fill Gaps.
const FLAG_FILL_GAPS: u8 =    0b0000_0010;

/// # FLAG: Accumulate Gap Map.
const FLAG_GAP_MAP: u8 =      0b0000_0100;

/// # FLAG: Refuse to Overwrite.
const FLAG_NO_OVERWRITE: u8 = 0b0000_1000;

/// # FLAG: Show Progress.
const FLAG_PROGRESS: u8 =     0b0001_0000;

/// # FLAG: Default.
const FLAG_DEFAULT: u8 = 0;



#[derive(Debug, Clone, Copy)]
/// # Rip Options.
///
/// This struct holds the run-wide settings: operating mode, gap fill order,
/// and the short-read policy.
///
/// Options are set using builder-style methods, like:
///
/// ```
/// use vobrip_core::{FillStrategy, RipOptions};
///
/// let opts = RipOptions::default()
///     .with_fill_gaps(true)
///     .with_strategy(FillStrategy::Reverse);
///
/// assert!(opts.fill_gaps());
/// assert_eq!(opts.strategy(), FillStrategy::Reverse);
/// ```
pub struct RipOptions {
	errors: ReadErrorStrategy,
	strategy: FillStrategy,
	flags: u8,
}

impl Default for RipOptions {
	fn default() -> Self {
		Self {
			errors: ReadErrorStrategy::Abort,
			strategy: FillStrategy::Forward,
			flags: FLAG_DEFAULT,
		}
	}
}

macro_rules! with_flag {
	($fn:ident, $flag:ident, $($doc:literal),+ $(,)?) => (
		#[must_use]
		$(
			#[doc = $doc]
		)+
		pub const fn $fn(self, v: bool) -> Self {
			let flags =
				if v { self.flags | $flag }
				else { self.flags & ! $flag };

			Self {
				flags,
				..self
			}
		}
	)
}

/// ## Setters.
impl RipOptions {
	with_flag!(
		with_compare,
		FLAG_COMPARE,
		"# Compare Only.",
		"",
		"When `true`, check the output tree against the disc without writing",
		"a single byte.",
		"",
		"The default is `false`.",
	);

	with_flag!(
		with_fill_gaps,
		FLAG_FILL_GAPS,
		"# Fill Gaps.",
		"",
		"When `true`, existing output files are kept; their blank and missing",
		"sectors are re-attempted after the surviving data has been spot-",
		"checked against the disc. When `false`, files are copied from",
		"scratch.",
		"",
		"The default is `false`.",
	);

	with_flag!(
		with_gap_map,
		FLAG_GAP_MAP,
		"# Accumulate the Gap Map.",
		"",
		"When `true`, every blank or missing sector observed during the run",
		"is recorded so a map of the disc surface can be printed at the end.",
		"",
		"The default is `false`.",
	);

	with_flag!(
		with_no_overwrite,
		FLAG_NO_OVERWRITE,
		"# Refuse to Overwrite.",
		"",
		"When `true`, a plain (non-gap) copy errors out rather than truncate",
		"an output file that already exists.",
		"",
		"The default is `false`.",
	);

	with_flag!(
		with_progress,
		FLAG_PROGRESS,
		"# Show Progress.",
		"",
		"When `true`, long operations get a progress bar on STDERR.",
		"",
		"The default is `false`.",
	);

	#[must_use]
	/// # Read Error Strategy.
	///
	/// What to do when the source cannot deliver a requested block: give up
	/// on the file, skip a single block, or skip the remainder of the
	/// attempted chunk.
	///
	/// The default is [`ReadErrorStrategy::Abort`].
	pub const fn with_errors(self, errors: ReadErrorStrategy) -> Self {
		Self {
			errors,
			..self
		}
	}

	#[must_use]
	/// # Fill Strategy.
	///
	/// The order in which gap sectors are attempted. Damaged media often
	/// respond differently to different head-seek patterns, so when one
	/// order stalls out, another may still make progress.
	///
	/// The default is [`FillStrategy::Forward`].
	pub const fn with_strategy(self, strategy: FillStrategy) -> Self {
		Self {
			strategy,
			..self
		}
	}
}

macro_rules! get_flag {
	($fn:ident, $flag:ident, $title:literal) => (
		#[must_use]
		#[doc = concat!("# ", $title, "?")]
		pub const fn $fn(&self) -> bool { $flag == self.flags & $flag }
	);
}

/// ## Getters.
impl RipOptions {
	get_flag!(compare, FLAG_COMPARE, "Compare Only");
	get_flag!(fill_gaps, FLAG_FILL_GAPS, "Fill Gaps");
	get_flag!(gap_map, FLAG_GAP_MAP, "Accumulate the Gap Map");
	get_flag!(no_overwrite, FLAG_NO_OVERWRITE, "Refuse to Overwrite");
	get_flag!(progress, FLAG_PROGRESS, "Show Progress");

	#[must_use]
	/// # Read Error Strategy.
	pub const fn errors(&self) -> ReadErrorStrategy { self.errors }

	#[must_use]
	/// # Fill Strategy.
	pub const fn strategy(&self) -> FillStrategy { self.strategy }
}



#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
/// # Read Error Strategy.
///
/// The policy applied when the source comes up short partway through a
/// chunk.
pub enum ReadErrorStrategy {
	#[default]
	/// # Give Up on the File.
	Abort,

	/// # Skip One Block.
	SkipBlock,

	/// # Skip the Rest of the Chunk.
	SkipMultiblock,
}

impl TryFrom<&[u8]> for ReadErrorStrategy {
	type Error = VobRipError;

	fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
		match src {
			b"abort" => Ok(Self::Abort),
			b"skip" => Ok(Self::SkipBlock),
			b"skip-multiblock" => Ok(Self::SkipMultiblock),
			_ => Err(VobRipError::ReadStrategy),
		}
	}
}

impl ReadErrorStrategy {
	#[must_use]
	/// # As String Slice.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Abort => "abort",
			Self::SkipBlock => "skip",
			Self::SkipMultiblock => "skip-multiblock",
		}
	}
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Fill Strategy.
///
/// The order in which the fill executor attempts the planned ranges.
pub enum FillStrategy {
	/// # Front to Back.
	Forward,

	/// # Back to Front.
	Reverse,

	/// # Alternate Ends, Working Inward.
	OutsideIn,

	/// # Shuffled Segments.
	///
	/// The seed makes the shuffle, and therefore the write order,
	/// reproducible from run to run.
	Random(u32),
}

impl Default for FillStrategy {
	#[inline]
	fn default() -> Self { Self::Forward }
}

impl TryFrom<&[u8]> for FillStrategy {
	type Error = VobRipError;

	fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
		match src {
			b"forward" => Ok(Self::Forward),
			b"reverse" => Ok(Self::Reverse),
			b"outside-in" => Ok(Self::OutsideIn),
			b"random" => Ok(Self::Random(0)),
			_ => Err(VobRipError::GapStrategy),
		}
	}
}

impl FillStrategy {
	#[must_use]
	/// # With Seed.
	///
	/// Replace the seed of a [`FillStrategy::Random`]; the other variants
	/// pass through unchanged.
	pub const fn with_seed(self, seed: u32) -> Self {
		match self {
			Self::Random(_) => Self::Random(seed),
			other => other,
		}
	}

	#[must_use]
	/// # As String Slice.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Forward => "forward",
			Self::Reverse => "reverse",
			Self::OutsideIn => "outside-in",
			Self::Random(_) => "random",
		}
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_rip_flags() {
		// Make sure our flags are unique.
		let mut all = vec![
			FLAG_COMPARE,
			FLAG_FILL_GAPS,
			FLAG_GAP_MAP,
			FLAG_NO_OVERWRITE,
			FLAG_PROGRESS,
		];
		all.sort_unstable();
		all.dedup();
		assert_eq!(all.len(), 5);
	}

	#[test]
	fn t_rip_options_flags() {
		macro_rules! t_flags {
			($name:literal, $set:ident, $get:ident) => (
				let mut opts = RipOptions::default();
				for v in [false, true, false, true] {
					opts = opts.$set(v);
					assert_eq!(
						opts.$get(),
						v,
						concat!("Setting ", $name, " to {} failed."),
						v
					);
				}
			);
		}

		t_flags!("compare", with_compare, compare);
		t_flags!("fill_gaps", with_fill_gaps, fill_gaps);
		t_flags!("gap_map", with_gap_map, gap_map);
		t_flags!("no_overwrite", with_no_overwrite, no_overwrite);
		t_flags!("progress", with_progress, progress);
	}

	#[test]
	fn t_rip_options_strategies() {
		for v in [
			FillStrategy::Forward,
			FillStrategy::Reverse,
			FillStrategy::OutsideIn,
			FillStrategy::Random(42),
		] {
			let opts = RipOptions::default().with_strategy(v);
			assert_eq!(opts.strategy(), v);
		}

		for v in [
			ReadErrorStrategy::Abort,
			ReadErrorStrategy::SkipBlock,
			ReadErrorStrategy::SkipMultiblock,
		] {
			let opts = RipOptions::default().with_errors(v);
			assert_eq!(opts.errors(), v);
		}
	}

	#[test]
	fn t_strategy_parse() {
		for (raw, expected) in [
			(b"forward".as_slice(), FillStrategy::Forward),
			(b"reverse", FillStrategy::Reverse),
			(b"outside-in", FillStrategy::OutsideIn),
			(b"random", FillStrategy::Random(0)),
		] {
			let parsed = FillStrategy::try_from(raw).expect("Parse failed.");
			assert_eq!(parsed, expected);
			assert_eq!(parsed.as_str().as_bytes(), raw);
		}
		assert!(FillStrategy::try_from(b"sideways".as_slice()).is_err());

		// The seed only sticks to the random variant.
		assert_eq!(
			FillStrategy::Random(0).with_seed(42),
			FillStrategy::Random(42),
		);
		assert_eq!(
			FillStrategy::Forward.with_seed(42),
			FillStrategy::Forward,
		);

		for (raw, expected) in [
			(b"abort".as_slice(), ReadErrorStrategy::Abort),
			(b"skip", ReadErrorStrategy::SkipBlock),
			(b"skip-multiblock", ReadErrorStrategy::SkipMultiblock),
		] {
			let parsed = ReadErrorStrategy::try_from(raw).expect("Parse failed.");
			assert_eq!(parsed, expected);
			assert_eq!(parsed.as_str().as_bytes(), raw);
		}
		assert!(ReadErrorStrategy::try_from(b"panic".as_slice()).is_err());
	}
}
