use rand::Rng;

use crate::config::GameConfig;
use crate::Coords;

/// Picks any cell of the canvas uniformly. The snake's body is not
/// excluded, so food may land underneath it.
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Coords {
    let cells = config.cells();
    let x = rng.gen_range(0..cells) * config.grid_size;
    let y = rng.gen_range(0..cells) * config.grid_size;
    (x, y)
}
