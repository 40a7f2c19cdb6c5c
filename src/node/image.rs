use super::error::*;
use super::{NodeKind, QuadtreeNode, Region};

impl QuadtreeNode {
	/// Draws this quadtree into the supplied image buffer.
	///
	/// Each leaf paints its region with the leaf color at full opacity;
	/// a branch is painted by its four quadrant subtrees, in build order.
	/// Pixels of `img` that no leaf region covers (the one-pixel strip
	/// left under any odd-sized region) are not written at all, so
	/// callers that need defined content there should draw over a buffer
	/// that already holds it.
	///
	/// Returns an `Err` if this node's region does not lie within `img`.
	/// Child regions are contained in their parent, so only the root
	/// is checked.
	pub fn to_image(&self, img: &mut image::RgbaImage) -> Result<(), DrawError> {
		if !self.region.fits_within(img.width(), img.height()) {
			return Err(DrawError::RegionOutOfBounds);
		}
		self.draw(img);
		Ok(())
	}

	fn draw(&self, img: &mut image::RgbaImage) {
		match &self.kind {
			NodeKind::Leaf(color) => {
				let fill = image::RgbaImage::from_pixel(
					self.region.size,
					self.region.size,
					image::Rgba([color.0[0], color.0[1], color.0[2], 0xff]),
				);
				image::imageops::replace(img, &fill, self.region.x, self.region.y);
			},
			NodeKind::Branch(sections) => {
				for section in sections.iter() {
					section.draw(img);
				}
			}
		}
	}
}

/// Lossily compresses an image by quadtree approximation.
///
/// Builds a quadtree over the leading `min(width, height)` square of
/// `img` with the given per-channel `tolerance` and renders it over a
/// copy of the source, collapsing every visually uniform region into a
/// flat square of its average color. Pixels outside the encoded square
/// (the strip a non-square image leaves over) and the strips under
/// odd-sized regions pass through from the source unchanged.
///
/// Returns an `Err` if `img` has zero width or zero height.
pub fn compress(img: &image::RgbaImage, tolerance: u8) -> Result<image::RgbaImage, CompressError> {
	if img.width() == 0 || img.height() == 0 {
		return Err(CompressError::EmptyImage);
	}
	let square_size = std::cmp::min(img.width(), img.height());
	let tree = match QuadtreeNode::build(img, Region::new(0, 0, square_size), tolerance) {
		Ok(t) => t,
		// The root region is clamped to the shorter image edge
		Err(_) => unreachable!("root region out of bounds"),
	};
	let mut output = img.clone();
	match tree.to_image(&mut output) {
		Ok(()) => (),
		Err(_) => unreachable!("output dimensions differ from the source"),
	}
	Ok(output)
}
