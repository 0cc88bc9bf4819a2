/*!
# Vob Rip: Errors
*/

use fyi_msg::Msg;
use std::{
	error::Error,
	fmt,
};



#[cfg(feature = "bin")]
/// # Help Text.
const HELP: &str = concat!(r#"
     .--------.
    /  .----.  \     "#, "\x1b[38;5;199mVob Rip!\x1b[0;38;5;69m v", env!("CARGO_PKG_VERSION"), "\x1b[0m", r#"
   |  |  ()  |  |    Resumable, gap-filling
    \  '----'  /     DVD-Video mirroring.
     '--------'

USAGE:
    vobrip [OPTIONS]

BASIC SETTINGS:
    -s, --source <DIR>
                      The root of the source disc (the directory containing
                      VIDEO_TS), e.g. a mount point like /media/dvd, or the
                      VIDEO_TS directory itself.
    -t, --target <DIR>
                      The directory to mirror into. The output lands at
                      <DIR>/<NAME>/VIDEO_TS/. [default: .]
    -n, --name <NAME> The name for the mirrored disc. [default: the source
                      directory name, uppercased]
        --error <abort|skip|skip-multiblock>
                      What to do when the source cannot deliver a block:
                      give up on the file, skip a single block, or skip the
                      rest of the attempted chunk. [default: abort]

GAP REFRESHING:
    Re-running against damaged media rarely yields the same sectors twice.
    With --gaps, existing output files are kept and only their blank or
    missing sectors are (re)attempted, after spot-checking that the data
    already present still matches the disc.

        --gaps        Scan existing output files and fill their gaps instead
                      of starting over.
        --gap-strategy <forward|reverse|outside-in|random>
                      The order in which gap sectors are attempted, to vary
                      the head-seek pattern on a struggling drive.
                      [default: forward]
        --gap-random-seed <NUM>
                      The seed for the random strategy, for reproducible
                      orderings. [default: 0]
        --gap-map     Accumulate every blank/missing sector seen during the
                      run and print a 20x60 map of the disc surface at the
                      end, inner radius at the top.

VERIFICATION:
        --compare     Compare the output tree against the disc without
                      writing anything, naming the first divergent sector.

MISCELLANEOUS:
        --no-overwrite
                      Refuse to truncate existing output files when copying
                      without --gaps.
        --progress    Show progress bars while copying.
    -h, --help        Print help information to STDOUT and exit.
    -V, --version     Print version information to STDOUT and exit.
"#);



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Errors.
pub enum VobRipError {
	/// # Structural Mismatch.
	BlockAlign(String),

	/// # Unable to create a destination file.
	Create(String),

	/// # Refusing to overwrite.
	Exists(String),

	/// # Invalid fill strategy.
	GapStrategy,

	/// # Destination is not a regular file.
	Invalid(String),

	/// # Compare Mismatch.
	Mismatch(String, usize),

	/// # Compare Target Missing.
	Missing(String),

	/// # No DVD structure in the source.
	NoTitleSets(String),

	/// # Unable to open a destination file.
	Open(String),

	/// # Destination read failure.
	Read(String),

	/// # Invalid read error strategy.
	ReadStrategy,

	/// # Compare Size Mismatch.
	SizeMismatch(String),

	/// # Unable to open a source file.
	SourceOpen(String),

	/// # Source read failure at a given block.
	SourceRead(String, usize),

	/// # Unable to truncate a destination file.
	Truncate(String),

	/// # Verification Sample Mismatch.
	Verify(String, usize),

	/// # Destination write failure.
	Write(String),

	#[cfg(feature = "bin")]
	/// # Invalid CLI Option Value.
	CliParse(&'static str),

	#[cfg(feature = "bin")]
	/// # Print Help (Not an Error).
	PrintHelp,

	#[cfg(feature = "bin")]
	/// # Print Version (Not an Error).
	PrintVersion,
}

impl Error for VobRipError {}

impl From<VobRipError> for Msg {
	#[inline]
	fn from(src: VobRipError) -> Self { Self::error(src.to_string()) }
}

impl fmt::Display for VobRipError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::BlockAlign(s) => write!(f, "{s} does not have a valid DVD size."),
			Self::Create(s) => write!(f, "Unable to create {s}."),
			Self::Exists(s) => write!(f, "{s} exists; refusing to overwrite without --gaps."),
			Self::GapStrategy => f.write_str("Invalid gap strategy."),
			Self::Invalid(s) => write!(f, "{s} is not a regular file."),
			Self::Mismatch(s, b) => write!(f, "Data mismatch for {s} at sector {b}."),
			Self::Missing(s) => write!(f, "Cannot compare {s}; the file is missing or invalid."),
			Self::NoTitleSets(s) => write!(f, "No DVD structure found in {s}."),
			Self::Open(s) => write!(f, "Unable to open {s}."),
			Self::Read(s) => write!(f, "Unable to read from {s}."),
			Self::ReadStrategy => f.write_str("Invalid read error strategy."),
			Self::SizeMismatch(s) => write!(f, "The size of {s} does not match the disc."),
			Self::SourceOpen(s) => write!(f, "Unable to open source file {s}."),
			Self::SourceRead(s, b) => write!(f, "Error reading {s} at block {b}."),
			Self::Truncate(s) => write!(f, "Unable to truncate {s}."),
			Self::Verify(s, b) => write!(f, "Verification sample mismatch for {s} at sector {b}."),
			Self::Write(s) => write!(f, "Unable to write to {s}."),

			#[cfg(feature = "bin")]
			Self::CliParse(s) => write!(f, "Invalid CLI option value: {s}"),

			#[cfg(feature = "bin")]
			Self::PrintHelp => f.write_str(HELP),

			#[cfg(feature = "bin")]
			Self::PrintVersion => f.write_str(concat!("Vob Rip! v", env!("CARGO_PKG_VERSION"))),
		}
	}
}
