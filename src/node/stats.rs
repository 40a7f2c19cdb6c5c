use super::Region;

/// A representative color: one byte each of red, green and blue.
pub type Color = image::Rgb<u8>;

fn abs_sub(a: u8, b: u8) -> u8 {
	(a as i16 - b as i16).abs() as u8
}

/// Integer mean of each channel over every pixel of `region`.
///
/// Channel sums are widened to `u64`, so no representable region can
/// overflow them; the final division truncates. Alpha is not read.
/// The mean over an empty region is black.
///
/// The region must lie within `img`.
pub fn average_color(img: &image::RgbaImage, region: Region) -> Color {
	let count = region.size as u64 * region.size as u64;
	if count == 0 {
		return image::Rgb([0; 3]);
	}
	let mut sums = [0u64; 3];
	for row in region.y..region.y + region.size {
		for col in region.x..region.x + region.size {
			let pixel = img.get_pixel(col, row);
			for chan in 0..3 {
				sums[chan] += pixel.0[chan] as u64;
			}
		}
	}
	image::Rgb([
		(sums[0] / count) as u8,
		(sums[1] / count) as u8,
		(sums[2] / count) as u8,
	])
}

/// Whether every pixel of `region` deviates from `average` by at most
/// `tolerance`, on each of the three channels independently.
///
/// The region must lie within `img`.
pub fn is_homogeneous(
	img: &image::RgbaImage,
	region: Region,
	average: Color,
	tolerance: u8
) -> bool {
	for row in region.y..region.y + region.size {
		for col in region.x..region.x + region.size {
			let pixel = img.get_pixel(col, row);
			for chan in 0..3 {
				if abs_sub(pixel.0[chan], average.0[chan]) > tolerance {
					return false;
				}
			}
		}
	}
	true
}
