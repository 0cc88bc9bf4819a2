/*!
# Vob Rip!
*/

#![forbid(unsafe_code)]

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



mod cli;

use dactyl::NiceElapsed;
use fyi_msg::Msg;
use std::{
	borrow::Cow,
	path::{
		Path,
		PathBuf,
	},
};
use vobrip_core::{
	DiscLayout,
	Mirror,
	VobRipError,
};



/// # Main.
///
/// This lets us bubble up startup errors so they can be pretty-printed.
fn main() {
	match _main() {
		Ok(()) => {},
		Err(e @ (VobRipError::PrintHelp | VobRipError::PrintVersion)) => {
			println!("{e}");
		},
		Err(e) => {
			Msg::from(e).eprint();
			std::process::exit(1);
		},
	}
}

#[inline]
/// # Actual Main.
///
/// This does all the stuff.
fn _main() -> Result<(), VobRipError> {
	let settings = cli::parse()?;

	// The source may point at the disc root or straight at VIDEO_TS.
	let video_ts = video_ts_dir(&settings.source);
	let layout = DiscLayout::discover(&video_ts)?;

	// The output tree; directory creation is our job, not the mirror's.
	let dst_dir = settings.target.join(&settings.name).join("VIDEO_TS");
	if ! settings.opts.compare() {
		std::fs::create_dir_all(&dst_dir)
			.map_err(|_| VobRipError::Create(dst_dir.to_string_lossy().into_owned()))?;
	}

	summary(&settings, &video_ts, &dst_dir);

	// Mirror, mirror!
	let now = std::time::Instant::now();
	let mut mirror = Mirror::new(&layout, &video_ts, dst_dir, &settings.opts);
	let result = mirror.run();

	// The map covers whatever got examined, failure or no.
	if settings.opts.gap_map() {
		print!("{}", mirror.gap_map());
	}

	result?;
	Msg::success(format!("Finished in {}.", NiceElapsed::from(now))).eprint();
	Ok(())
}

/// # Locate VIDEO_TS.
///
/// Accept either the disc root or its VIDEO_TS directory; everything
/// downstream wants the latter.
fn video_ts_dir(source: &Path) -> PathBuf {
	let nested = source.join("VIDEO_TS");
	if nested.is_dir() { nested }
	else { source.to_path_buf() }
}

/// # Run Summary.
///
/// Spell out the chosen settings before getting to work.
fn summary(settings: &cli::Settings, video_ts: &Path, dst: &Path) {
	let opts = &settings.opts;
	let mode =
		if opts.compare() { "Compare" }
		else if opts.fill_gaps() { "Fill gaps" }
		else { "Copy" };

	let set = [
		("Source:", video_ts.to_string_lossy(), true),
		("Destination:", dst.to_string_lossy(), ! opts.compare()),
		("Mode:", Cow::Borrowed(mode), true),
		("Gap Strategy:", Cow::Borrowed(opts.strategy().as_str()), opts.fill_gaps()),
		("Read Errors:", Cow::Borrowed(opts.errors().as_str()), ! opts.compare()),
		("Gap Map:", yesno(opts.gap_map()), opts.gap_map()),
	];
	let max_label = set.iter().map(|(k, _, _)| k.len()).max().unwrap_or(0);

	eprintln!("\x1b[1;38;5;199mVob Rip…\x1b[0m");
	for (k, v, enabled) in set {
		if enabled {
			eprintln!("  {k:max_label$} \x1b[1m{v}\x1b[0m");
		}
		else {
			eprintln!("  \x1b[2;9m{k:max_label$} {v}\x1b[0m");
		}
	}
	eprintln!();
}

#[inline]
/// # Bool to Yes/No Cow.
const fn yesno(v: bool) -> Cow<'static, str> {
	if v { Cow::Borrowed("Yes") }
	else { Cow::Borrowed("No") }
}
