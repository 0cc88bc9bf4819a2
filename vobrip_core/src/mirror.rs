/*!
# Vob Rip: Mirror
*/

use crate::{
	BLOCK_SIZE,
	BlockBuf,
	BlockSource,
	BUFFER_BLOCKS,
	DiscLayout,
	FileScan,
	Filler,
	GapMap,
	ReadErrorStrategy,
	RipOptions,
	sample,
	SAMPLE_TARGET,
	TitleSet,
	utility,
	VobRipError,
	VobSource,
};
use dactyl::NicePercent;
use fyi_msg::{
	Msg,
	Progless,
};
use std::{
	fs::{
		File,
		OpenOptions,
	},
	path::{
		Path,
		PathBuf,
	},
};



#[derive(Debug)]
/// # Mirror Session.
///
/// This struct drives one whole run: every title set, VMG first, and within
/// each set the IFO/BUP pair, then the menu VOB, then the title VOB parts.
///
/// Each output file goes through one of three flows depending on the
/// options: a plain sequential copy, a scan→verify→fill gap refresh, or a
/// write-nothing comparison.
pub struct Mirror<'a> {
	layout: &'a DiscLayout,
	src_dir: &'a Path,
	dst_dir: PathBuf,
	opts: &'a RipOptions,
	map: GapMap,
	progress: Progless,
}

impl<'a> Mirror<'a> {
	#[must_use]
	/// # New Session.
	///
	/// `src_dir` is the source `VIDEO_TS` directory; `dst_dir` the output
	/// one. Both are expected to exist (directory creation is the caller's
	/// job).
	pub fn new(
		layout: &'a DiscLayout,
		src_dir: &'a Path,
		dst_dir: PathBuf,
		opts: &'a RipOptions,
	) -> Self {
		Self {
			layout,
			src_dir,
			dst_dir,
			opts,
			map: GapMap::default(),
			progress: Progless::default(),
		}
	}

	#[must_use]
	/// # The Accumulated Gap Map.
	///
	/// Meaningful after [`Mirror::run`], and worth rendering even when the
	/// run failed partway; whatever was examined is in here.
	pub const fn gap_map(&self) -> &GapMap { &self.map }

	/// # Run!
	///
	/// Process every title set. The first file-level failure aborts the
	/// whole run, like the rest of the tooling expects.
	///
	/// ## Errors
	///
	/// Any I/O, verification, comparison, or structural error is bubbled
	/// up.
	pub fn run(&mut self) -> Result<(), VobRipError> {
		for ts in self.layout.sets() {
			self.ifo_bup(ts)?;
			self.menu(ts)?;
			for part in 1..=ts.vob_count() {
				self.title_part(ts, part)?;
			}
		}

		if self.opts.progress() { self.progress.finish(); }
		Ok(())
	}
}

/// ## Per-File Dispatch.
impl Mirror<'_> {
	/// # IFO and BUP.
	///
	/// The info files are small, so they are rewritten whole on every copy
	/// run — gap mode included — and the backup is just a second identical
	/// write.
	fn ifo_bup(&mut self, ts: &TitleSet) -> Result<(), VobRipError> {
		if ts.size_ifo() == 0 { return Ok(()); }
		let blocks = ts.ifo_blocks()?;

		let src_path = self.src_dir.join(ts.ifo_name());
		let data = std::fs::read(&src_path)
			.map_err(|_| VobRipError::SourceOpen(src_path.to_string_lossy().into_owned()))?;
		if data.len() != blocks * BLOCK_SIZE {
			return Err(VobRipError::BlockAlign(format!(
				"The IFO of title set {}", ts.index(),
			)));
		}

		for name in [ts.ifo_name(), ts.bup_name()] {
			let path = self.dst_dir.join(&name);
			let nice = path.to_string_lossy().into_owned();

			if self.opts.compare() {
				self.compare_ifo(&data, blocks, &path, &nice)?;
				continue;
			}

			if let Ok(meta) = path.metadata() {
				if ! meta.is_file() {
					return Err(VobRipError::Invalid(nice));
				}
				if self.opts.fill_gaps() {
					Msg::info(format!("{nice} exists; refreshing it.")).eprint();
				}
				else if self.opts.no_overwrite() {
					return Err(VobRipError::Exists(nice));
				}
				else {
					Msg::info(format!("{nice} exists; truncating before copy.")).eprint();
				}
			}

			let dst = File::create(&path)
				.map_err(|_| VobRipError::Create(nice.clone()))?;
			utility::write_at_all(&dst, 0, &data)
				.map_err(|_| VobRipError::Write(nice.clone()))?;

			self.map_file(&dst, &nice, blocks);
		}

		Ok(())
	}

	/// # Menu VOB.
	fn menu(&mut self, ts: &TitleSet) -> Result<(), VobRipError> {
		if ts.size_menu() == 0 { return Ok(()); }
		let name = ts.menu_name();
		if ! ts.menu_aligned() {
			Msg::warning(format!(
				"The menu VOB of title set {} ({name}) does not have a valid DVD size.",
				ts.index(),
			)).eprint();
		}
		let blocks = ts.menu_blocks();
		if blocks == 0 { return Ok(()); }

		let src = VobSource::open(&name, &[self.src_dir.join(&name)])?;
		self.process_file(&src, 0, blocks, &name)
	}

	/// # One Title VOB Part.
	fn title_part(&mut self, ts: &TitleSet, part: usize) -> Result<(), VobRipError> {
		let blocks = ts.vob_blocks(part)?;
		if blocks == 0 { return Ok(()); }
		let offset = ts.vob_offset(part)?;
		let name = ts.vob_name(part);

		// The title domain spans all parts; block addresses continue from
		// one into the next.
		let paths: Vec<PathBuf> = (1..=ts.vob_count())
			.map(|i| self.src_dir.join(ts.vob_name(i)))
			.collect();
		let src = VobSource::open(&name, &paths)?;

		self.process_file(&src, offset, blocks, &name)
	}

	/// # Copy, Refresh, or Compare.
	fn process_file(
		&mut self,
		src: &VobSource,
		src_offset: usize,
		blocks: usize,
		name: &str,
	) -> Result<(), VobRipError> {
		let path = self.dst_dir.join(name);
		let nice = path.to_string_lossy().into_owned();

		if self.opts.compare() {
			return self.compare_vob(src, src_offset, blocks, &path, &nice);
		}

		let dst = self.open_dst(&path, &nice)?;
		if self.opts.fill_gaps() {
			self.fill_file(src, src_offset, blocks, &dst, name, &nice)
		}
		else {
			self.initial_copy(src, src_offset, blocks, &dst, name, &nice)
		}
	}

	/// # Open a Destination File.
	///
	/// Gap mode keeps whatever is already there, opening read/write without
	/// truncation; plain mode truncates, unless the user asked it not to.
	fn open_dst(&self, path: &Path, nice: &str) -> Result<File, VobRipError> {
		if let Ok(meta) = path.metadata() {
			if ! meta.is_file() {
				return Err(VobRipError::Invalid(nice.to_owned()));
			}

			if self.opts.fill_gaps() {
				Msg::info(format!("{nice} exists; checking for gaps.")).eprint();
				OpenOptions::new().read(true).write(true).open(path)
					.map_err(|_| VobRipError::Open(nice.to_owned()))
			}
			else if self.opts.no_overwrite() {
				Err(VobRipError::Exists(nice.to_owned()))
			}
			else {
				Msg::info(format!("{nice} exists; truncating before copy.")).eprint();
				OpenOptions::new().write(true).truncate(true).open(path)
					.map_err(|_| VobRipError::Open(nice.to_owned()))
			}
		}
		else if self.opts.fill_gaps() {
			OpenOptions::new().read(true).write(true).create(true).open(path)
				.map_err(|_| VobRipError::Create(nice.to_owned()))
		}
		else {
			OpenOptions::new().write(true).create(true).open(path)
				.map_err(|_| VobRipError::Create(nice.to_owned()))
		}
	}
}

/// ## The Three Flows.
impl Mirror<'_> {
	/// # Plain Sequential Copy.
	///
	/// The baseline: read front to back, write everything obtained, and pad
	/// shortfalls with zeroes per the read-error strategy so the file keeps
	/// its shape. Those zero runs are exactly what a later gap refresh will
	/// go hunting for.
	fn initial_copy(
		&mut self,
		src: &VobSource,
		src_offset: usize,
		blocks: usize,
		dst: &File,
		name: &str,
		nice: &str,
	) -> Result<(), VobRipError> {
		let mut buf = BlockBuf::new();
		let zeroes = BlockBuf::new();

		if self.opts.progress() {
			let _res = self.progress.reset(
				u32::try_from(blocks.div_ceil(BUFFER_BLOCKS)).unwrap_or(u32::MAX)
			);
			self.progress.set_title(Some(Msg::custom(name, 199, "Copying…")));
		}

		let mut cursor = 0;
		while cursor < blocks {
			let to_read = usize::min(blocks - cursor, BUFFER_BLOCKS);
			let offset = src_offset + cursor;

			let got = match src.read_blocks(offset, to_read, buf.blocks_mut(to_read)) {
				Ok(n) => n,
				Err(_) => 0,
			};

			if got > 0 {
				utility::write_at_all(dst, (cursor * BLOCK_SIZE) as u64, buf.blocks(got))
					.map_err(|_| VobRipError::Write(nice.to_owned()))?;
				cursor += got;
			}

			if got < to_read {
				Msg::warning(format!("Error reading {name} at block {}.", offset + got)).eprint();

				let blanks = match self.opts.errors() {
					ReadErrorStrategy::Abort => return Err(
						VobRipError::SourceRead(name.to_owned(), offset + got)
					),
					ReadErrorStrategy::SkipBlock => 1,
					ReadErrorStrategy::SkipMultiblock => to_read - got,
				};

				Msg::warning(format!(
					"Padding {blanks} block{} for {name}.",
					if blanks == 1 { "" } else { "s" },
				)).eprint();
				utility::write_at_all(dst, (cursor * BLOCK_SIZE) as u64, zeroes.blocks(blanks))
					.map_err(|_| VobRipError::Write(nice.to_owned()))?;
				cursor += blanks;
			}

			if self.opts.progress() { self.progress.increment(); }
		}

		// Gap-fill mode never truncates, but this mode owns the file.
		dst.set_len((blocks * BLOCK_SIZE) as u64)
			.map_err(|_| VobRipError::Truncate(nice.to_owned()))?;

		self.map_file(dst, nice, blocks);
		Ok(())
	}

	/// # Scan, Verify, Fill.
	///
	/// The gap refresh: figure out which sectors are blank or missing,
	/// confirm the surviving data still matches the disc, then attempt only
	/// the gaps. The file is re-scanned afterward for the report; nothing is
	/// ever truncated here.
	fn fill_file(
		&mut self,
		src: &VobSource,
		src_offset: usize,
		blocks: usize,
		dst: &File,
		name: &str,
		nice: &str,
	) -> Result<(), VobRipError> {
		let mut buf = BlockBuf::new();

		let scan = FileScan::read(dst, nice, blocks, &mut buf)?;
		let blank_before = scan.blank_blocks();
		let existing = usize::min(scan.full_blocks(), blocks);
		let truncated_before = blocks - existing;
		let mut plan = scan.into_plan();
		plan.add(existing, truncated_before);

		// No writes happen unless the data already present checks out.
		let samples = sample::collect_samples(&plan, blocks, SAMPLE_TARGET);
		if ! samples.is_empty() {
			sample::verify_samples(src, src_offset, dst, name, &samples)?;
		}

		let progress =
			if self.opts.progress() {
				let chunks: usize = plan.ranges()
					.iter()
					.map(|r| r.count().div_ceil(BUFFER_BLOCKS))
					.sum();
				let _res = self.progress.reset(u32::try_from(chunks).unwrap_or(u32::MAX));
				self.progress.set_title(Some(Msg::custom(name, 199, "Filling gaps…")));
				Some(&self.progress)
			}
			else { None };

		let mut filler = Filler::new(
			src,
			src_offset,
			dst,
			name,
			self.opts.errors(),
			progress,
		);
		let status = filler.run(&plan, self.opts.strategy(), &mut buf);
		let filled = filler.filled();

		// Re-scan (best effort) so the report reflects where things landed.
		let mut blank_after = blank_before;
		let mut truncated_after = truncated_before;
		if status.is_ok() {
			if let Ok(rescan) = FileScan::read(dst, nice, blocks, &mut buf) {
				blank_after = rescan.blank_blocks();
				truncated_after = blocks.saturating_sub(rescan.full_blocks());
				if self.opts.gap_map() {
					self.map.record_file(
						blocks,
						rescan.plan(),
						usize::min(rescan.full_blocks(), blocks),
					);
				}
			}
		}
		else if self.opts.gap_map() {
			// The pre-fill plan already includes the missing tail.
			self.map.record_file(blocks, &plan, blocks);
		}

		println!(
			"Gaps report for {nice}: filled {filled} sectors; before {blank_before} zeroed ({}), {truncated_before} missing ({}); after {blank_after} zeroed ({}), {truncated_after} missing ({})",
			pct(blank_before, blocks),
			pct(truncated_before, blocks),
			pct(blank_after, blocks),
			pct(truncated_after, blocks),
		);

		status
	}

	/// # Compare a VOB Against the Disc.
	///
	/// Strictly read-only. The sizes must agree exactly, then every block
	/// must match byte for byte; the first divergence names its sector.
	fn compare_vob(
		&mut self,
		src: &VobSource,
		src_offset: usize,
		blocks: usize,
		path: &Path,
		nice: &str,
	) -> Result<(), VobRipError> {
		let Ok(meta) = path.metadata() else {
			self.map_missing(blocks);
			return Err(VobRipError::Missing(nice.to_owned()));
		};
		if ! meta.is_file() {
			self.map_missing(blocks);
			return Err(VobRipError::Missing(nice.to_owned()));
		}
		if meta.len() != (blocks * BLOCK_SIZE) as u64 {
			self.map_missing(blocks);
			return Err(VobRipError::SizeMismatch(nice.to_owned()));
		}

		let dst = File::open(path)
			.map_err(|_| VobRipError::Open(nice.to_owned()))?;
		self.map_file(&dst, nice, blocks);

		if self.opts.progress() {
			let _res = self.progress.reset(
				u32::try_from(blocks.div_ceil(BUFFER_BLOCKS)).unwrap_or(u32::MAX)
			);
			self.progress.set_title(Some(Msg::custom(nice, 199, "Comparing…")));
		}

		let mut disc_buf = BlockBuf::new();
		let mut file_buf = BlockBuf::new();
		let mut done = 0;
		while done < blocks {
			let to_read = usize::min(blocks - done, BUFFER_BLOCKS);

			// Compare mode has no tolerance for source shortfalls.
			let got = src.read_blocks(src_offset + done, to_read, disc_buf.blocks_mut(to_read))?;
			if got != to_read {
				return Err(VobRipError::SourceRead(nice.to_owned(), src_offset + done + got));
			}

			let bytes = utility::read_at_full(
				&dst,
				(done * BLOCK_SIZE) as u64,
				file_buf.blocks_mut(to_read),
			)
				.map_err(|_| VobRipError::Read(nice.to_owned()))?;
			if bytes != to_read * BLOCK_SIZE {
				return Err(VobRipError::SizeMismatch(nice.to_owned()));
			}

			if disc_buf.blocks(to_read) != file_buf.blocks(to_read) {
				for i in 0..to_read {
					if disc_buf.block(i) != file_buf.block(i) {
						return Err(VobRipError::Mismatch(nice.to_owned(), done + i));
					}
				}
			}

			done += to_read;
			if self.opts.progress() { self.progress.increment(); }
		}

		Ok(())
	}

	/// # Compare an Info File.
	fn compare_ifo(
		&mut self,
		data: &[u8],
		blocks: usize,
		path: &Path,
		nice: &str,
	) -> Result<(), VobRipError> {
		let Ok(meta) = path.metadata() else {
			self.map_missing(blocks);
			return Err(VobRipError::Missing(nice.to_owned()));
		};
		if ! meta.is_file() {
			self.map_missing(blocks);
			return Err(VobRipError::Missing(nice.to_owned()));
		}
		if meta.len() != data.len() as u64 {
			self.map_missing(blocks);
			return Err(VobRipError::SizeMismatch(nice.to_owned()));
		}

		let dst = File::open(path)
			.map_err(|_| VobRipError::Open(nice.to_owned()))?;
		self.map_file(&dst, nice, blocks);

		let mut copy = vec![0_u8; data.len()];
		let bytes = utility::read_at_full(&dst, 0, &mut copy)
			.map_err(|_| VobRipError::Read(nice.to_owned()))?;
		if bytes != data.len() {
			return Err(VobRipError::SizeMismatch(nice.to_owned()));
		}

		if copy != data {
			for (i, (a, b)) in data.chunks(BLOCK_SIZE).zip(copy.chunks(BLOCK_SIZE)).enumerate() {
				if a != b {
					return Err(VobRipError::Mismatch(nice.to_owned(), i));
				}
			}
		}

		Ok(())
	}
}

/// ## Gap Map Feeding.
impl Mirror<'_> {
	/// # Record a File's Blank/Missing Sectors.
	///
	/// Best effort; a scan failure records the whole file as missing so the
	/// global origin stays aligned either way.
	fn map_file(&mut self, dst: &File, nice: &str, blocks: usize) {
		if ! self.opts.gap_map() { return; }

		let mut buf = BlockBuf::new();
		match FileScan::read(dst, nice, blocks, &mut buf) {
			Ok(scan) => {
				self.map.record_file(
					blocks,
					scan.plan(),
					usize::min(scan.full_blocks(), blocks),
				);
			},
			Err(_) => { self.map.record_missing(blocks); },
		}
	}

	/// # Record a Wholly Missing File.
	fn map_missing(&mut self, blocks: usize) {
		if self.opts.gap_map() {
			self.map.record_missing(blocks);
		}
	}
}



/// # Percentage of Total.
fn pct(part: usize, total: usize) -> NicePercent {
	if total == 0 { NicePercent::from(0.0) }
	else { NicePercent::from(part as f64 / total as f64) }
}



#[cfg(test)]
mod test {
	use super::*;
	use crate::FillStrategy;
	use std::io::Write;

	/// # The Simulated Disc.
	///
	/// VMG plus one title set with a two-part title domain.
	const SOURCE_FILES: [(&str, u8, usize); 6] = [
		("VIDEO_TS.IFO", 2, 2),
		("VIDEO_TS.VOB", 30, 3),
		("VTS_01_0.IFO", 60, 2),
		("VTS_01_0.VOB", 90, 4),
		("VTS_01_1.VOB", 120, 10),
		("VTS_01_2.VOB", 150, 6),
	];

	/// # Patterned, Never-Blank File Contents.
	fn pattern(seed: u8, blocks: usize) -> Vec<u8> {
		let mut out = Vec::with_capacity(blocks * BLOCK_SIZE);
		for b in 0..blocks {
			out.extend(std::iter::repeat(seed.wrapping_add(b as u8) | 1).take(BLOCK_SIZE));
		}
		out
	}

	/// # Populate a Source Tree.
	fn seed_source(dir: &Path) {
		for (name, seed, blocks) in SOURCE_FILES {
			let mut file = File::create(dir.join(name)).expect("Create failed.");
			file.write_all(&pattern(seed, blocks)).expect("Write failed.");
		}
	}

	/// # Run a Whole Mirror Session.
	fn run_mirror(src: &Path, dst: &Path, opts: &RipOptions) -> Result<(), VobRipError> {
		let layout = DiscLayout::discover(src).expect("Discovery failed.");
		let mut mirror = Mirror::new(&layout, src, dst.to_path_buf(), opts);
		mirror.run()
	}

	/// # Check Every Output Matches the Source.
	fn assert_tree(dst: &Path) {
		for (name, seed, blocks) in SOURCE_FILES {
			let expected = pattern(seed, blocks);
			let real = std::fs::read(dst.join(name)).expect("Missing output.");
			assert_eq!(real, expected, "Output bytes diverged for {name}.");
		}

		// The backups are byte-identical copies of their info files.
		for (ifo, bup) in [
			("VIDEO_TS.IFO", "VIDEO_TS.BUP"),
			("VTS_01_0.IFO", "VTS_01_0.BUP"),
		] {
			assert_eq!(
				std::fs::read(dst.join(ifo)).expect("Missing IFO."),
				std::fs::read(dst.join(bup)).expect("Missing BUP."),
			);
		}
	}

	/// # Overwrite Part of an Output File.
	fn stomp(path: &Path, start_block: usize, count: usize, fill: u8) {
		let file = OpenOptions::new().write(true).open(path).expect("Open failed.");
		utility::write_at_all(
			&file,
			(start_block * BLOCK_SIZE) as u64,
			&vec![fill; count * BLOCK_SIZE],
		).expect("Write failed.");
	}

	#[test]
	fn t_mirror_initial() {
		let src = tempfile::tempdir().expect("Tempdir failed.");
		let dst = tempfile::tempdir().expect("Tempdir failed.");
		seed_source(src.path());

		run_mirror(src.path(), dst.path(), &RipOptions::default())
			.expect("Initial copy failed.");
		assert_tree(dst.path());

		// Exact size, not just prefix.
		let meta = std::fs::metadata(dst.path().join("VTS_01_1.VOB"))
			.expect("Missing output.");
		assert_eq!(meta.len(), 10 * BLOCK_SIZE as u64);
	}

	#[test]
	fn t_mirror_gaps_idempotent() {
		let src = tempfile::tempdir().expect("Tempdir failed.");
		let dst = tempfile::tempdir().expect("Tempdir failed.");
		seed_source(src.path());

		run_mirror(src.path(), dst.path(), &RipOptions::default())
			.expect("Initial copy failed.");

		// A refresh over a perfect tree changes nothing.
		let opts = RipOptions::default().with_fill_gaps(true);
		run_mirror(src.path(), dst.path(), &opts).expect("Refresh failed.");
		assert_tree(dst.path());
	}

	#[test]
	fn t_mirror_gap_fill() {
		let src = tempfile::tempdir().expect("Tempdir failed.");
		let dst = tempfile::tempdir().expect("Tempdir failed.");
		seed_source(src.path());

		run_mirror(src.path(), dst.path(), &RipOptions::default())
			.expect("Initial copy failed.");

		// Blank out a few sectors, as a failed read pass would have.
		let victim = dst.path().join("VTS_01_1.VOB");
		stomp(&victim, 3, 2, 0);
		stomp(&victim, 7, 1, 0);

		let opts = RipOptions::default().with_fill_gaps(true);
		run_mirror(src.path(), dst.path(), &opts).expect("Refresh failed.");
		assert_tree(dst.path());
	}

	#[test]
	fn t_mirror_gap_tail() {
		let src = tempfile::tempdir().expect("Tempdir failed.");
		let dst = tempfile::tempdir().expect("Tempdir failed.");
		seed_source(src.path());

		run_mirror(src.path(), dst.path(), &RipOptions::default())
			.expect("Initial copy failed.");

		// Chop one file short and delete another outright; the refresh
		// rebuilds both.
		let victim = dst.path().join("VTS_01_2.VOB");
		let file = OpenOptions::new().write(true).open(&victim).expect("Open failed.");
		file.set_len(2 * BLOCK_SIZE as u64).expect("Truncate failed.");
		drop(file);
		std::fs::remove_file(dst.path().join("VTS_01_0.VOB")).expect("Remove failed.");

		let opts = RipOptions::default().with_fill_gaps(true);
		run_mirror(src.path(), dst.path(), &opts).expect("Refresh failed.");
		assert_tree(dst.path());
	}

	#[test]
	fn t_mirror_verify_mismatch() {
		let src = tempfile::tempdir().expect("Tempdir failed.");
		let dst = tempfile::tempdir().expect("Tempdir failed.");
		seed_source(src.path());

		run_mirror(src.path(), dst.path(), &RipOptions::default())
			.expect("Initial copy failed.");

		// Corrupt a sector with *non-zero* wrong bytes: not a gap, so it
		// must trip verification rather than get overwritten.
		let victim = dst.path().join("VTS_01_1.VOB");
		stomp(&victim, 2, 1, 0xEE);

		let opts = RipOptions::default().with_fill_gaps(true);
		let res = run_mirror(src.path(), dst.path(), &opts);
		match res {
			Err(VobRipError::Verify(label, 2)) => assert_eq!(label, "VTS_01_1.VOB"),
			other => panic!("Expected a verification mismatch at sector 2, got {other:?}."),
		}

		// And nothing was written over the evidence.
		let real = std::fs::read(&victim).expect("Missing output.");
		assert!(real[2 * BLOCK_SIZE..3 * BLOCK_SIZE].iter().all(|&b| b == 0xEE));
	}

	#[test]
	fn t_mirror_gap_fill_random() {
		let src = tempfile::tempdir().expect("Tempdir failed.");
		let dst = tempfile::tempdir().expect("Tempdir failed.");
		seed_source(src.path());

		run_mirror(src.path(), dst.path(), &RipOptions::default())
			.expect("Initial copy failed.");

		let victim = dst.path().join("VTS_01_1.VOB");
		stomp(&victim, 2, 2, 0);
		stomp(&victim, 6, 3, 0);

		let opts = RipOptions::default()
			.with_fill_gaps(true)
			.with_strategy(FillStrategy::Random(42));
		run_mirror(src.path(), dst.path(), &opts).expect("Refresh failed.");
		assert_tree(dst.path());
	}

	#[test]
	fn t_mirror_compare() {
		let src = tempfile::tempdir().expect("Tempdir failed.");
		let dst = tempfile::tempdir().expect("Tempdir failed.");
		seed_source(src.path());

		run_mirror(src.path(), dst.path(), &RipOptions::default())
			.expect("Initial copy failed.");

		// A faithful tree compares clean.
		let opts = RipOptions::default().with_compare(true);
		run_mirror(src.path(), dst.path(), &opts).expect("Compare failed.");

		// One divergent sector gets named.
		let victim = dst.path().join("VTS_01_2.VOB");
		stomp(&victim, 3, 1, 0xEE);
		match run_mirror(src.path(), dst.path(), &opts) {
			Err(VobRipError::Mismatch(_, 3)) => {},
			other => panic!("Expected a mismatch at sector 3, got {other:?}."),
		}

		// Compare never writes, even when unhappy.
		let real = std::fs::read(&victim).expect("Missing output.");
		assert!(real[3 * BLOCK_SIZE..4 * BLOCK_SIZE].iter().all(|&b| b == 0xEE));

		// A missing file is its own kind of failure.
		std::fs::remove_file(&victim).expect("Remove failed.");
		assert!(matches!(
			run_mirror(src.path(), dst.path(), &opts),
			Err(VobRipError::Missing(_)),
		));
	}

	#[test]
	fn t_mirror_no_overwrite() {
		let src = tempfile::tempdir().expect("Tempdir failed.");
		let dst = tempfile::tempdir().expect("Tempdir failed.");
		seed_source(src.path());

		run_mirror(src.path(), dst.path(), &RipOptions::default())
			.expect("Initial copy failed.");

		let opts = RipOptions::default().with_no_overwrite(true);
		assert!(matches!(
			run_mirror(src.path(), dst.path(), &opts),
			Err(VobRipError::Exists(_)),
		));
	}

	#[test]
	fn t_mirror_gap_map() {
		let src = tempfile::tempdir().expect("Tempdir failed.");
		let dst = tempfile::tempdir().expect("Tempdir failed.");
		seed_source(src.path());

		run_mirror(src.path(), dst.path(), &RipOptions::default())
			.expect("Initial copy failed.");

		// Blank one menu sector. Compare mode records the file's state
		// before failing on it, so the map holds the IFO/BUP pair plus the
		// menu, with the blank sector marked.
		stomp(&dst.path().join("VIDEO_TS.VOB"), 1, 1, 0);

		let opts = RipOptions::default().with_compare(true).with_gap_map(true);
		let layout = DiscLayout::discover(src.path()).expect("Discovery failed.");
		let mut mirror = Mirror::new(&layout, src.path(), dst.path().to_path_buf(), &opts);
		assert!(mirror.run().is_err());

		let map = mirror.gap_map();
		assert_eq!(map.total_blocks(), 2 + 2 + 3);
		assert!(map.to_string().contains('#'));
	}
}
