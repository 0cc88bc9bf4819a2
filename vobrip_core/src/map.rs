/*!
# Vob Rip: Gap Map
*/

use crate::GapPlan;
use std::fmt;



/// # Grid Rows.
const ROWS: usize = 20;

/// # Grid Columns.
const COLS: usize = 60;

/// # Blocks Per Turn at the Inner Radius.
///
/// The turn lengths are heuristic averages for single-layer DVD geometry;
/// the map is a diagnostic aid, not a measurement.
const INNER_TURN: usize = 192;

/// # Blocks Per Turn at the Outer Radius.
const OUTER_TURN: usize = 432;



#[derive(Debug, Clone, Default)]
/// # Gap Map.
///
/// A rip-wide accumulator of blank/missing sectors, kept in a single global
/// block space: each examined file advances the origin by its expected
/// size, so for a given disc and configuration the coordinates are
/// deterministic.
///
/// Its `Display` impl draws the sectors onto a fixed 20×60 grid, reading the
/// flat block index as a spiral: rows run inner to outer radius, columns
/// approximate the angular position within the turn.
pub struct GapMap {
	entries: Vec<(usize, usize)>,
	total_blocks: usize,
}

impl GapMap {
	/// # Record a Scanned File.
	///
	/// Add the file's blank runs plus its missing tail (everything past what
	/// actually exists), then advance the origin by the expected size.
	pub fn record_file(
		&mut self,
		expected_blocks: usize,
		plan: &GapPlan,
		existing_blocks: usize,
	) {
		let base = self.total_blocks;
		for range in plan.ranges() {
			self.push(base + range.start(), range.count());
		}
		if existing_blocks < expected_blocks {
			self.push(base + existing_blocks, expected_blocks - existing_blocks);
		}
		self.total_blocks += expected_blocks;
	}

	/// # Record a Wholly Missing File.
	pub fn record_missing(&mut self, expected_blocks: usize) {
		self.push(self.total_blocks, expected_blocks);
		self.total_blocks += expected_blocks;
	}

	/// # Add an Entry.
	fn push(&mut self, start: usize, count: usize) {
		if count != 0 { self.entries.push((start, count)); }
	}

	#[must_use]
	/// # Total Blocks Examined.
	pub const fn total_blocks(&self) -> usize { self.total_blocks }

	#[must_use]
	/// # Any Sectors Examined?
	pub const fn is_empty(&self) -> bool { self.total_blocks == 0 }

	/// # Rasterize.
	///
	/// Mark each recorded sector onto the grid. Long entries are subsampled
	/// so marking cost stays proportional to the entry count rather than the
	/// disc size; half a column's worth of samples is plenty to light up a
	/// cell.
	fn rasterize(&self) -> [[bool; COLS]; ROWS] {
		let mut grid = [[false; COLS]; ROWS];

		for &(start, count) in &self.entries {
			let step = usize::max(1, count.wrapping_div(COLS.wrapping_div(2) + 1));
			let mut block = start;
			while block < start + count {
				let relative = usize::min(block, self.total_blocks - 1);
				let row = usize::min(
					(relative * ROWS).wrapping_div(self.total_blocks),
					ROWS - 1,
				);

				// Interpolate the turn length for this radius.
				let turn = usize::max(
					1,
					INNER_TURN + ((OUTER_TURN - INNER_TURN) * row).wrapping_div(ROWS - 1),
				);
				let col = usize::min(
					((relative % turn) * COLS).wrapping_div(turn),
					COLS - 1,
				);

				grid[row][col] = true;
				block += step;
			}
		}

		grid
	}
}

impl fmt::Display for GapMap {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_empty() {
			return f.write_str("Gap map: no sectors examined.\n");
		}

		f.write_str("Gap map (rows = inner to outer radius, columns = approximate angle):\n")?;
		for row in &self.rasterize() {
			f.write_str("|")?;
			for &cell in row {
				f.write_str(if cell { "#" } else { "." })?;
			}
			f.write_str("|\n")?;
		}
		f.write_str("# marks sectors that appear blank or missing. Angle is estimated using an average turn length.\n")
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_map_empty() {
		let map = GapMap::default();
		assert!(map.is_empty());
		assert_eq!(map.to_string(), "Gap map: no sectors examined.\n");
	}

	#[test]
	fn t_map_shape() {
		let mut map = GapMap::default();
		map.record_missing(10_000);

		let out = map.to_string();
		let lines: Vec<&str> = out.lines().collect();
		assert_eq!(lines.len(), ROWS + 2);

		// Everything is missing, so every row should have marks.
		for line in &lines[1..=ROWS] {
			assert_eq!(line.len(), COLS + 2);
			assert!(line.starts_with('|') && line.ends_with('|'));
			assert!(line.contains('#'));
		}
	}

	#[test]
	fn t_map_coordinates() {
		// A single block at the very start lands in the top-left cell.
		let mut map = GapMap::default();
		let mut plan = GapPlan::default();
		plan.add(0, 1);
		map.record_file(10_000, &plan, 10_000);
		assert_eq!(map.total_blocks(), 10_000);

		let grid = map.rasterize();
		assert!(grid[0][0]);
		assert_eq!(
			grid.iter().flatten().filter(|&&c| c).count(),
			1,
		);

		// A single block at the very end lands in the outermost row, at the
		// angle implied by the outer turn length.
		let mut map = GapMap::default();
		let mut plan = GapPlan::default();
		plan.add(9_999, 1);
		map.record_file(10_000, &plan, 10_000);

		let grid = map.rasterize();
		let col = ((9_999 % OUTER_TURN) * COLS) / OUTER_TURN;
		assert!(grid[ROWS - 1][col]);
	}

	#[test]
	fn t_map_origin_advances() {
		// The second file's gaps are offset by the first file's size.
		let mut map = GapMap::default();
		map.record_file(5_000, &GapPlan::default(), 5_000);

		let mut plan = GapPlan::default();
		plan.add(0, 1);
		map.record_file(5_000, &plan, 5_000);

		assert_eq!(map.total_blocks(), 10_000);
		assert_eq!(map.entries, &[(5_000, 1)]);

		// A short file's tail is recorded from where the data stops.
		let mut map = GapMap::default();
		map.record_file(100, &GapPlan::default(), 60);
		assert_eq!(map.entries, &[(60, 40)]);
		assert_eq!(map.total_blocks(), 100);
	}
}
