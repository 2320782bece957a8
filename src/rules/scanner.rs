//! Text scanner: finds candidate word runs on the grid.

use smallvec::SmallVec;

use crate::core::{EntityId, TypeRegistry};
use crate::grid::{LevelMap, Position};

/// All word entities stacked in one cell.
pub type Slot = SmallVec<[EntityId; 2]>;

/// A maximal horizontal or vertical sequence of word-occupied cells.
pub type Run = Vec<Slot>;

/// Shortest run that could spell a rule: subject, verb, effect.
const MIN_RUN_LEN: usize = 3;

/// Scan every row left-to-right and every column top-to-bottom for runs of
/// consecutive word tiles.
///
/// Rows and columns are scanned independently, so one cell can contribute to
/// both a horizontal and a vertical run. Diagonals are never scanned. A run
/// ends at any cell holding no word entity; only runs of length >= 3 survive.
#[must_use]
pub fn scan(map: &LevelMap, registry: &TypeRegistry) -> Vec<Run> {
    let mut runs = Vec::new();
    for y in 0..map.height() {
        scan_line(map, registry, (0..map.width()).map(|x| Position::new(x, y)), &mut runs);
    }
    for x in 0..map.width() {
        scan_line(map, registry, (0..map.height()).map(|y| Position::new(x, y)), &mut runs);
    }
    runs
}

fn scan_line(
    map: &LevelMap,
    registry: &TypeRegistry,
    cells: impl Iterator<Item = Position>,
    runs: &mut Vec<Run>,
) {
    let mut current: Run = Vec::new();
    for pos in cells {
        let words: Slot = map
            .entities_at(pos)
            .filter(|&id| registry.is_text(map.entity(id).type_id))
            .collect();
        if words.is_empty() {
            if current.len() >= MIN_RUN_LEN {
                runs.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        } else {
            current.push(words);
        }
    }
    if current.len() >= MIN_RUN_LEN {
        runs.push(current);
    }
}
