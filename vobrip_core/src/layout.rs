/*!
# Vob Rip: Disc Layout
*/

use crate::{
	BLOCK_SIZE,
	VobRipError,
};
use std::path::Path;



/// # Maximum Title VOB Parts.
///
/// A title set splits its video objects into at most nine one-GiB parts.
const MAX_VOB_PARTS: usize = 9;

/// # Maximum Title Sets.
const MAX_TITLE_SETS: usize = 99;



#[derive(Debug, Clone)]
/// # Title Set.
///
/// The observed sizes of one title set's files, in bytes. Index zero is the
/// VMG (`VIDEO_TS.*`), which has no title parts.
pub struct TitleSet {
	index: usize,
	size_ifo: u64,
	size_menu: u64,
	size_vob: Vec<u64>,
}

/// ## Getters.
impl TitleSet {
	#[must_use]
	/// # Title Set Number.
	pub const fn index(&self) -> usize { self.index }

	#[must_use]
	/// # Info File Size in Bytes.
	pub const fn size_ifo(&self) -> u64 { self.size_ifo }

	#[must_use]
	/// # Menu VOB Size in Bytes.
	pub const fn size_menu(&self) -> u64 { self.size_menu }

	#[must_use]
	/// # Number of Title VOB Parts.
	pub fn vob_count(&self) -> usize { self.size_vob.len() }
}

/// ## File Names.
impl TitleSet {
	#[must_use]
	/// # Info File Name.
	pub fn ifo_name(&self) -> String {
		if self.index == 0 { "VIDEO_TS.IFO".to_owned() }
		else { format!("VTS_{:02}_0.IFO", self.index) }
	}

	#[must_use]
	/// # Backup File Name.
	pub fn bup_name(&self) -> String {
		if self.index == 0 { "VIDEO_TS.BUP".to_owned() }
		else { format!("VTS_{:02}_0.BUP", self.index) }
	}

	#[must_use]
	/// # Menu VOB Name.
	pub fn menu_name(&self) -> String {
		if self.index == 0 { "VIDEO_TS.VOB".to_owned() }
		else { format!("VTS_{:02}_0.VOB", self.index) }
	}

	#[must_use]
	/// # Title VOB Part Name.
	///
	/// Parts are numbered from one.
	pub fn vob_name(&self, part: usize) -> String {
		format!("VTS_{:02}_{}.VOB", self.index, part)
	}
}

/// ## Block Math.
impl TitleSet {
	/// # Info File Size in Blocks.
	///
	/// ## Errors
	///
	/// Errors if the size is not a whole number of blocks.
	pub fn ifo_blocks(&self) -> Result<usize, VobRipError> {
		blocks_exact(self.size_ifo)
			.ok_or_else(|| VobRipError::BlockAlign(format!(
				"The IFO of title set {}", self.index,
			)))
	}

	#[must_use]
	/// # Menu VOB Size in Blocks, Rounded Down.
	///
	/// Menu VOBs occasionally carry a ragged tail in the wild; the fraction
	/// is unreachable through block addressing, so it is simply not copied.
	pub const fn menu_blocks(&self) -> usize {
		self.size_menu.wrapping_div(BLOCK_SIZE as u64) as usize
	}

	#[must_use]
	/// # Is the Menu Size Block-Aligned?
	pub const fn menu_aligned(&self) -> bool {
		self.size_menu % BLOCK_SIZE as u64 == 0
	}

	/// # Title VOB Part Size in Blocks.
	///
	/// ## Errors
	///
	/// Errors if the size is not a whole number of blocks.
	pub fn vob_blocks(&self, part: usize) -> Result<usize, VobRipError> {
		blocks_exact(self.size_vob[part - 1])
			.ok_or_else(|| VobRipError::BlockAlign(self.vob_name(part)))
	}

	/// # Title Domain Offset of a Part.
	///
	/// The title domain is the concatenation of all parts, so part N begins
	/// after the blocks of parts 1..N.
	///
	/// ## Errors
	///
	/// Errors if any earlier part is not a whole number of blocks.
	pub fn vob_offset(&self, part: usize) -> Result<usize, VobRipError> {
		let mut offset = 0;
		for i in 1..part {
			offset += self.vob_blocks(i)?;
		}
		Ok(offset)
	}
}



#[derive(Debug, Clone)]
/// # Disc Layout.
///
/// Every title set found in the source `VIDEO_TS` directory, VMG first.
pub struct DiscLayout(Vec<TitleSet>);

impl DiscLayout {
	/// # Discover.
	///
	/// Stat the source tree: the VMG files, then each numbered title set
	/// while its info file exists. Within a title set, parts are collected
	/// while contiguous; a hole in the numbering ends the set.
	///
	/// ## Errors
	///
	/// Errors if the directory contains no recognizable DVD structure at
	/// all.
	pub fn discover(video_ts: &Path) -> Result<Self, VobRipError> {
		let mut sets = Vec::new();

		// The VMG.
		let vmg = TitleSet {
			index: 0,
			size_ifo: file_size(&video_ts.join("VIDEO_TS.IFO")),
			size_menu: file_size(&video_ts.join("VIDEO_TS.VOB")),
			size_vob: Vec::new(),
		};
		let mut any = vmg.size_ifo != 0 || vmg.size_menu != 0;
		sets.push(vmg);

		// The numbered title sets.
		for index in 1..=MAX_TITLE_SETS {
			let size_ifo = file_size(&video_ts.join(format!("VTS_{index:02}_0.IFO")));
			if size_ifo == 0 { break; }
			any = true;

			let size_menu = file_size(&video_ts.join(format!("VTS_{index:02}_0.VOB")));
			let mut size_vob = Vec::new();
			for part in 1..=MAX_VOB_PARTS {
				let size = file_size(&video_ts.join(format!("VTS_{index:02}_{part}.VOB")));
				if size == 0 { break; }
				size_vob.push(size);
			}

			sets.push(TitleSet { index, size_ifo, size_menu, size_vob });
		}

		if any { Ok(Self(sets)) }
		else {
			Err(VobRipError::NoTitleSets(video_ts.to_string_lossy().into_owned()))
		}
	}

	#[must_use]
	/// # Title Sets.
	pub fn sets(&self) -> &[TitleSet] { &self.0 }
}



/// # Size of a Regular File, or Zero.
fn file_size(path: &Path) -> u64 {
	std::fs::metadata(path)
		.ok()
		.filter(std::fs::Metadata::is_file)
		.map_or(0, |m| m.len())
}

/// # Bytes to Exact Blocks.
fn blocks_exact(bytes: u64) -> Option<usize> {
	if bytes % BLOCK_SIZE as u64 == 0 {
		usize::try_from(bytes.wrapping_div(BLOCK_SIZE as u64)).ok()
	}
	else { None }
}
