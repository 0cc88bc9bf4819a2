/*!
# Vob Rip: Library
*/

#![deny(unsafe_code)]

#![warn(
	clippy::filetype_is_file,
	clippy::integer_division,
	clippy::needless_borrow,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::suboptimal_flops,
	clippy::unneeded_field_pattern,
	macro_use_extern_crate,
	missing_copy_implementations,
	missing_debug_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unreachable_pub,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![allow(
	clippy::doc_markdown,
	clippy::module_name_repetitions,
	clippy::redundant_pub_crate,
)]

mod buf;
mod error;
mod fill;
mod layout;
mod map;
mod mirror;
mod opts;
mod plan;
mod sample;
mod scan;
mod source;
mod utility;

pub(crate) use buf::BlockBuf;
pub use error::VobRipError;
pub(crate) use fill::Filler;
pub use layout::{
	DiscLayout,
	TitleSet,
};
pub use map::GapMap;
pub use mirror::Mirror;
pub use opts::{
	FillStrategy,
	ReadErrorStrategy,
	RipOptions,
};
pub use plan::{
	GapPlan,
	GapRange,
};
pub(crate) use scan::FileScan;
pub use source::{
	BlockSource,
	VobSource,
};



/// # Bytes Per Logical Block.
///
/// The DVD sector size. All engine arithmetic is done in blocks; byte offsets
/// only appear at the I/O boundary.
pub const BLOCK_SIZE: usize = 2048;

/// # I/O Buffer Size in Blocks.
///
/// Reads and writes are issued in chunks of up to this many blocks, i.e. one
/// MiB at a time.
pub const BUFFER_BLOCKS: usize = 512;

/// # Maximum VOB Size in Blocks.
///
/// Title VOBs are split into one-GiB parts on disc.
pub const MAX_VOB_BLOCKS: usize = 524_288;

/// # Verification Sample Target.
///
/// The number of pre-existing sectors to spot-check against the disc before
/// a gap refresh is allowed to write anything.
pub(crate) const SAMPLE_TARGET: usize = 32;
