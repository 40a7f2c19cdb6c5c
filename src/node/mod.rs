pub mod error;
pub mod stats;

use ::image::RgbaImage;

use stats::Color;

/// Axis-aligned square area of a pixel buffer, described by its top-left
/// corner and edge length, in pixels.
///
/// A region is a structural descriptor threaded through the recursion;
/// it owns no pixels of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
	pub x: u32,
	pub y: u32,
	pub size: u32,
}

impl Region {
	pub fn new(x: u32, y: u32, size: u32) -> Region {
		Region { x, y, size }
	}

	/// Whether the region lies entirely within a buffer of the given
	/// dimensions.
	pub fn fits_within(&self, width: u32, height: u32) -> bool {
		self.x as u64 + self.size as u64 <= width as u64 &&
			self.y as u64 + self.size as u64 <= height as u64
	}

	/// The four quadrant subregions, in northwest, northeast, southwest,
	/// southeast order.
	///
	/// Quadrants have edge length `size / 2`. When `size` is odd, the last
	/// row and column of the region belong to no quadrant.
	pub fn quadrants(&self) -> [Region; 4] {
		let half = self.size / 2;
		[
			Region::new(self.x, self.y, half),
			Region::new(self.x + half, self.y, half),
			Region::new(self.x, self.y + half, half),
			Region::new(self.x + half, self.y + half, half),
		]
	}
}

/// Node in a quadtree approximation of an image.
///
/// A leaf stands for a region that is uniform within the build tolerance
/// and carries that region's average color; a branch carries the four
/// quadrant subtrees of its region.
///
/// Every node records the region it covers, so the tree alone suffices
/// to redraw an image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuadtreeNode {
	pub region: Region,
	pub kind: NodeKind,
}

/// The two shapes a node can take.
///
/// A branch owns exactly four subtrees; a node with "some but not all"
/// children is not representable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// Terminal node: one color stands for every pixel of the region.
	Leaf(Color),
	/// Subdivided node: northwest, northeast, southwest and southeast
	/// subtrees, in that order.
	Branch(Box<[QuadtreeNode; 4]>),
}

impl QuadtreeNode {
	/// Analyzes a region of an image into a quadtree.
	///
	/// A region collapses to a leaf once every pixel in it sits within
	/// `tolerance` of the region's average color on all three channels
	/// (or once it is too small to split); anything else splits into four
	/// quadrants analyzed recursively with the same tolerance. Identical
	/// inputs always produce structurally identical trees.
	///
	/// Returns an `Err` if `region` does not lie within `img`. Subregions
	/// produced by splitting are contained in their parent, so only this
	/// entry point checks.
	pub fn build(
		img: &RgbaImage,
		region: Region,
		tolerance: u8
	) -> Result<QuadtreeNode, error::AnalyzeError> {
		if !region.fits_within(img.width(), img.height()) {
			return Err(error::AnalyzeError::RegionOutOfBounds);
		}
		Ok(Self::build_unchecked(img, region, tolerance))
	}

	fn build_unchecked(img: &RgbaImage, region: Region, tolerance: u8) -> QuadtreeNode {
		let average = stats::average_color(img, region);
		if region.size <= 1 || stats::is_homogeneous(img, region, average, tolerance) {
			return QuadtreeNode { region, kind: NodeKind::Leaf(average) };
		}
		let [nw, ne, sw, se] = region.quadrants();
		QuadtreeNode {
			region,
			kind: NodeKind::Branch(Box::new([
				Self::build_unchecked(img, nw, tolerance),
				Self::build_unchecked(img, ne, tolerance),
				Self::build_unchecked(img, sw, tolerance),
				Self::build_unchecked(img, se, tolerance),
			])),
		}
	}
}

pub mod image;

pub use self::image::compress;

#[cfg(test)]
mod tests {
	use super::*;

	use ::image::{Rgb, Rgba};

	fn uniform(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
		RgbaImage::from_pixel(width, height, Rgba(color))
	}

	fn collect_leaves(node: &QuadtreeNode, leaves: &mut Vec<(Region, Color)>) {
		match &node.kind {
			NodeKind::Leaf(color) => leaves.push((node.region, *color)),
			NodeKind::Branch(sections) => {
				for section in sections.iter() {
					collect_leaves(section, leaves);
				}
			}
		}
	}

	#[test]
	fn quadrants_tile_even_regions() {
		let quads = Region::new(2, 4, 6).quadrants();
		assert_eq!(quads[0], Region::new(2, 4, 3));
		assert_eq!(quads[1], Region::new(5, 4, 3));
		assert_eq!(quads[2], Region::new(2, 7, 3));
		assert_eq!(quads[3], Region::new(5, 7, 3));
	}

	#[test]
	fn odd_quadrants_stop_short_of_the_last_strip() {
		for quad in Region::new(0, 0, 5).quadrants().iter() {
			assert_eq!(quad.size, 2);
			assert!(quad.fits_within(4, 4));
		}
	}

	#[test]
	fn fits_within_does_not_overflow() {
		assert!(Region::new(0, 0, u32::max_value()).fits_within(u32::max_value(), u32::max_value()));
		assert!(!Region::new(1, 0, u32::max_value()).fits_within(u32::max_value(), u32::max_value()));
	}

	#[test]
	fn out_of_bounds_region_is_rejected_up_front() {
		let img = uniform(4, 4, [10, 10, 10, 255]);
		assert!(matches!(
			QuadtreeNode::build(&img, Region::new(2, 2, 4), 0),
			Err(error::AnalyzeError::RegionOutOfBounds)
		));
	}

	#[test]
	fn single_pixel_region_is_a_leaf_with_that_pixel() {
		let mut img = uniform(3, 3, [1, 2, 3, 255]);
		img.put_pixel(2, 1, Rgba([40, 50, 60, 255]));
		let tree = QuadtreeNode::build(&img, Region::new(2, 1, 1), 0).unwrap();
		assert_eq!(tree.region, Region::new(2, 1, 1));
		assert_eq!(tree.kind, NodeKind::Leaf(Rgb([40, 50, 60])));
	}

	#[test]
	fn flat_region_collapses_to_one_leaf() {
		let img = uniform(8, 8, [50, 60, 70, 255]);
		let tree = QuadtreeNode::build(&img, Region::new(0, 0, 8), 0).unwrap();
		assert_eq!(tree.region, Region::new(0, 0, 8));
		assert_eq!(tree.kind, NodeKind::Leaf(Rgb([50, 60, 70])));
	}

	#[test]
	fn outlier_pixel_forces_subdivision() {
		// 4x4 of (10, 10, 10) except (200, 200, 200) at (3, 3), tolerance 5.
		// The overall average (21, 21, 21) misses the outlier by far more
		// than 5, so the root must split.
		let mut img = uniform(4, 4, [10, 10, 10, 255]);
		img.put_pixel(3, 3, Rgba([200, 200, 200, 255]));
		let tree = QuadtreeNode::build(&img, Region::new(0, 0, 4), 5).unwrap();
		let sections = match &tree.kind {
			NodeKind::Branch(sections) => sections,
			NodeKind::Leaf(_) => panic!("outlier beyond tolerance did not split the root"),
		};
		// The three clean quadrants collapse immediately
		for section in sections[..3].iter() {
			assert_eq!(section.kind, NodeKind::Leaf(Rgb([10, 10, 10])));
		}
		// The southeast quadrant averages (57, 57, 57), still outside the
		// tolerance of both its colors, so it splits down to pixels and the
		// outlier keeps its own color instead of being merged away
		let se = match &sections[3].kind {
			NodeKind::Branch(sections) => sections,
			NodeKind::Leaf(_) => panic!("outlier quadrant did not split"),
		};
		assert_eq!(se[0].kind, NodeKind::Leaf(Rgb([10, 10, 10])));
		assert_eq!(se[3].region, Region::new(3, 3, 1));
		assert_eq!(se[3].kind, NodeKind::Leaf(Rgb([200, 200, 200])));
	}

	#[test]
	fn build_is_deterministic() {
		let img = RgbaImage::from_fn(8, 8, |x, y| {
			Rgba([(x * 32) as u8, (y * 32) as u8, ((x + y) * 16) as u8, 255])
		});
		let first = QuadtreeNode::build(&img, Region::new(0, 0, 8), 20).unwrap();
		let second = QuadtreeNode::build(&img, Region::new(0, 0, 8), 20).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn power_of_two_leaves_tile_the_root_exactly() {
		// All-distinct pixels with tolerance 0 force a full subdivision
		let img = RgbaImage::from_fn(4, 4, |x, y| Rgba([(x * 4 + y) as u8 * 16, 0, 0, 255]));
		let tree = QuadtreeNode::build(&img, Region::new(0, 0, 4), 0).unwrap();
		let mut leaves = Vec::new();
		collect_leaves(&tree, &mut leaves);
		let mut cover = [[0u32; 4]; 4];
		for (region, _) in leaves {
			for row in region.y..region.y + region.size {
				for col in region.x..region.x + region.size {
					cover[row as usize][col as usize] += 1;
				}
			}
		}
		assert!(cover.iter().flatten().all(|hits| *hits == 1), "gap or overlap: {:?}", cover);
	}

	#[test]
	fn every_leaf_honors_the_tolerance() {
		let img = RgbaImage::from_fn(8, 8, |x, y| {
			Rgba([(x * 30) as u8, (y * 30) as u8, 128, 255])
		});
		let tolerance = 16u8;
		let tree = QuadtreeNode::build(&img, Region::new(0, 0, 8), tolerance).unwrap();
		let mut leaves = Vec::new();
		collect_leaves(&tree, &mut leaves);
		for (region, color) in leaves {
			for row in region.y..region.y + region.size {
				for col in region.x..region.x + region.size {
					let pixel = img.get_pixel(col, row);
					for chan in 0..3 {
						let diff = (pixel.0[chan] as i16 - color.0[chan] as i16).abs();
						assert!(
							diff <= tolerance as i16,
							"leaf at {:?} misses pixel ({}, {}) by {}",
							region, col, row, diff
						);
					}
				}
			}
		}
	}
}
