use image::imageops;
use image::GenericImageView;
use image::Rgba;
use image::RgbaImage;

use crate::data::TileSet;
use crate::error::WaveError;
use crate::traits::Constraint;
use crate::types::Direction;
use crate::wave::Wave;

/// Color of slots in contradiction in an exported image.
pub const CONTRADICTION: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// The default constraint for image tiles: two tiles may be neighbors when their facing edges
/// agree.
///
/// Only 3 pixels per edge are considered. For the top edge, those are the top-left, top-middle
/// and top-right pixels; likewise for the right edge, the top-right, middle-right and
/// bottom-right ones. Tiles that should be able to touch need the same colors at these points.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeSampling;

impl EdgeSampling {
    /// The 3 points sampled along the edge of a `width` by `height` tile that faces `direction`.
    fn samples(width: u32, height: u32, direction: Direction) -> [(u32, u32); 3] {
        let (right, bottom) = (width - 1, height - 1);

        match direction {
            Direction::Up => [(0, 0), (width / 2, 0), (right, 0)],
            Direction::Down => [(0, bottom), (width / 2, bottom), (right, bottom)],
            Direction::Left => [(0, 0), (0, height / 2), (0, bottom)],
            Direction::Right => [(right, 0), (right, height / 2), (right, bottom)],
        }
    }
}

impl<I> Constraint<I> for EdgeSampling
where
    I: GenericImageView,
    I::Pixel: PartialEq,
{
    fn compatible(&self, from: &I, to: &I, direction: Direction) -> bool {
        let (fw, fh) = from.dimensions();
        let (tw, th) = to.dimensions();

        // a tile without pixels has no edge to match
        if fw == 0 || fh == 0 || tw == 0 || th == 0 {
            return false;
        }

        let ours = Self::samples(fw, fh, direction);
        let theirs = Self::samples(tw, th, direction.opposite());

        ours.iter()
            .zip(theirs.iter())
            .all(|(&(ax, ay), &(bx, by))| from.get_pixel(ax, ay) == to.get_pixel(bx, by))
    }
}

impl<I> TileSet<I>
where
    I: GenericImageView,
{
    /// Constructs a `TileSet` from a list of images, in order.
    ///
    /// Fails if the list is empty, if a tile has no pixels, or if the tiles are not all the size
    /// of the first one.
    pub fn from_images(tiles: Vec<I>) -> Result<Self, WaveError> {
        validate_images(&tiles)?;

        Ok(TileSet::new(tiles))
    }
}

/// Checks that `tiles` is not empty, and that every tile has pixels and the size of the first one.
fn validate_images<I>(tiles: &[I]) -> Result<(), WaveError>
where
    I: GenericImageView,
{
    let expected = tiles.first().ok_or(WaveError::EmptyTileSet)?.dimensions();

    for (index, tile) in tiles.iter().enumerate() {
        let found = tile.dimensions();

        if found.0 == 0 || found.1 == 0 {
            return Err(WaveError::ZeroSizedTile { index });
        }

        if found != expected {
            return Err(WaveError::TileSizeMismatch {
                index,
                expected,
                found,
            });
        }
    }

    Ok(())
}

#[cfg(not(feature = "parallel"))]
impl<I> TileSet<I>
where
    I: GenericImageView,
    I::Pixel: PartialEq,
{
    /// Build a `Wave` whose adjacency rules come from `EdgeSampling`.
    ///
    /// The tiles are checked as in `TileSet::from_images` first.
    pub fn wave(self, width: usize, height: usize) -> Result<Wave<I>, WaveError> {
        validate_images(&self.data)?;

        self.wave_with(width, height, EdgeSampling)
    }
}

#[cfg(feature = "parallel")]
impl<I> TileSet<I>
where
    I: GenericImageView + Sync,
    I::Pixel: PartialEq,
{
    /// Build a `Wave` whose adjacency rules come from `EdgeSampling`.
    ///
    /// The tiles are checked as in `TileSet::from_images` first.
    pub fn wave(self, width: usize, height: usize) -> Result<Wave<I>, WaveError> {
        validate_images(&self.data)?;

        self.wave_with(width, height, EdgeSampling)
    }
}

impl<I> Wave<I>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    /// Takes the current state of the wave and exports it as an image, each slot covering one
    /// tile. Slots that have not been collapsed are transparent, contradictions are red.
    ///
    /// The size of a tile is taken from the first module of the catalog.
    pub fn export_image(&self) -> RgbaImage {
        let (u, v) = self
            .modules()
            .first()
            .map_or((0, 0), |m| m.content().dimensions());

        let mut image = RgbaImage::new(self.width() as u32 * u, self.height() as u32 * v);

        for slot in self.slots() {
            let (x, y) = (slot.x() as u32 * u, slot.y() as u32 * v);

            if let Some(module) = slot.module().and_then(|id| self.module(id)) {
                // clip to the slot, tiles of another size must not spill over their neighbors
                let (tw, th) = module.content().dimensions();
                let tile = module.content().view(0, 0, tw.min(u), th.min(v));
                imageops::overlay(&mut image, &*tile, i64::from(x), i64::from(y));
            } else if slot.is_contradiction() {
                for px in x..x + u {
                    for py in y..y + v {
                        image.put_pixel(px, py, CONTRADICTION);
                    }
                }
            }
        }

        image
    }
}
