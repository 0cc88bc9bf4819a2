/*!
# Vob Rip: CLI
*/

use argyle::Argument;
use dactyl::traits::BytesToUnsigned;
use std::path::{
	Path,
	PathBuf,
};
use vobrip_core::{
	FillStrategy,
	ReadErrorStrategy,
	RipOptions,
	VobRipError,
};



/// # Parsed Settings.
pub(super) struct Settings {
	pub(super) opts: RipOptions,
	pub(super) source: PathBuf,
	pub(super) target: PathBuf,
	pub(super) name: String,
}



/// # Parse Options.
pub(super) fn parse() -> Result<Settings, VobRipError> {
	let args = argyle::args()
		.with_keywords(include!(concat!(env!("OUT_DIR"), "/argyle.rs")));

	let mut opts = RipOptions::default();
	let mut strategy = FillStrategy::default();
	let mut seed = 0_u32;
	let mut source = None;
	let mut target = None;
	let mut name = None;
	for arg in args {
		match arg {
			Argument::Key("--compare") => { opts = opts.with_compare(true); },
			Argument::Key("--gap-map") => { opts = opts.with_gap_map(true); },
			Argument::Key("--gaps") => { opts = opts.with_fill_gaps(true); },
			Argument::Key("-h" | "--help") => return Err(VobRipError::PrintHelp),
			Argument::Key("--no-overwrite") => { opts = opts.with_no_overwrite(true); },
			Argument::Key("--progress") => { opts = opts.with_progress(true); },
			Argument::Key("-V" | "--version") => return Err(VobRipError::PrintVersion),

			Argument::KeyWithValue("--error", s) => {
				let s = ReadErrorStrategy::try_from(s.trim().as_bytes())
					.map_err(|_| VobRipError::CliParse("--error"))?;
				opts = opts.with_errors(s);
			},
			Argument::KeyWithValue("--gap-random-seed", s) => {
				seed = u32::btou(s.trim().as_bytes())
					.ok_or(VobRipError::CliParse("--gap-random-seed"))?;
			},
			Argument::KeyWithValue("--gap-strategy", s) => {
				strategy = FillStrategy::try_from(s.trim().as_bytes())
					.map_err(|_| VobRipError::CliParse("--gap-strategy"))?;
			},
			Argument::KeyWithValue("-n" | "--name", s) => { name.replace(s); },
			Argument::KeyWithValue("-s" | "--source", s) => {
				source.replace(PathBuf::from(s));
			},
			Argument::KeyWithValue("-t" | "--target", s) => {
				target.replace(PathBuf::from(s));
			},

			_ => {},
		}
	}

	let Some(source) = source else {
		return Err(VobRipError::CliParse("-s/--source"));
	};
	let name = name
		.filter(|n| ! n.trim().is_empty())
		.unwrap_or_else(|| default_name(&source));

	Ok(Settings {
		opts: opts.with_strategy(strategy.with_seed(seed)),
		target: target.unwrap_or_else(|| PathBuf::from(".")),
		source,
		name,
	})
}

/// # Default Disc Name.
///
/// The source directory's own name, uppercased (stepping over a trailing
/// VIDEO_TS component), with a generic fallback when the path is too bare to
/// say anything.
fn default_name(source: &Path) -> String {
	let mut dir = source;
	if dir.file_name().is_some_and(|n| n.eq_ignore_ascii_case("VIDEO_TS")) {
		if let Some(parent) = dir.parent() { dir = parent; }
	}

	dir.file_name()
		.and_then(std::ffi::OsStr::to_str)
		.map(str::to_ascii_uppercase)
		.filter(|s| ! s.is_empty())
		.unwrap_or_else(|| "DVD_VIDEO".to_owned())
}
