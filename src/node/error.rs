/// Reason why an image couldn't be analyzed into a quadtree.
#[derive(Debug)]
pub enum AnalyzeError {
	/// The region to analyze extends beyond the image buffer.
	RegionOutOfBounds,
}

/// Reason why a quadtree couldn't be rendered to an image buffer.
#[derive(Debug)]
pub enum DrawError {
	/// The root node's region extends beyond the image buffer.
	RegionOutOfBounds,
}

/// Reason why an image couldn't be compressed.
#[derive(Debug)]
pub enum CompressError {
	/// The source image has zero width or zero height.
	EmptyImage,
}
