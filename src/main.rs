use image::error::ImageError;

use quadpress::{QuadtreeNode, Region};

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// `clap`-based CLI for quadtree-compressing images.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid image data
///
/// 5: computation limits exceeded
///
/// 10: other, potentially unknown error
fn main() {
	let clap_matches = clap::App::new("quadpress")
		.version("0.1.0")
		.about("Lossily compresses an image by collapsing visually uniform regions into flat quadtree cells.")
		.arg_from_usage("-t, --tolerance=[N] 'Per-channel color deviation allowed within a merged region (0-255); defaults to 1'")
		.arg_from_usage("<INPUT> 'Path to input image (PNG or JFIF)'")
		.arg_from_usage("[OUTPUT] 'Path to output file; defaults to INPUT with a modified file extension'")
		.get_matches();

	let input_path = clap_matches.value_of("INPUT").unwrap();
	let source = match image::open(input_path) {
		Ok(i) => i,
		Err(e) => {
			let (msg, code) = match e {
				ImageError::Decoding(_) => ("Invalid image data", 4),
				ImageError::Limits(_) => ("Computation limits exceeded", 5),
				ImageError::IoError(_) => ("File not found or could not be read", 3),
				_ => ("An error occurred", 10)
			};
			error_exit(msg, code)
		}
	}.into_rgba();
	let tolerance = match clap_matches.value_of("tolerance").unwrap_or("1").parse() {
		Ok(n) => n,
		Err(_) => error_exit("Tolerance must be a number from 0 to 255", 2)
	};

	if source.width() == 0 || source.height() == 0 {
		error_exit("Empty input image", 4);
	}
	// Only the leading square of a non-square image is encoded; the rest
	// of the output passes through from the source.
	let square_size = std::cmp::min(source.width(), source.height());
	let tree = match QuadtreeNode::build(&source, Region::new(0, 0, square_size), tolerance) {
		Ok(t) => t,
		Err(_) => error_exit("Input image has invalid dimensions", 4)
	};
	eprintln!("{} cells in {} nodes, {} levels deep", tree.leaf_count(),
		tree.node_count(), tree.depth());

	let mut output = source.clone();
	match tree.to_image(&mut output) {
		Ok(()) => (),
		Err(_) => error_exit("Invalid output dimensions", 2)
	}
	match output.save(clap_matches.value_of("OUTPUT")
		.unwrap_or(&(input_path.rsplitn(2, '.').last().unwrap().to_string() + ".quad.png"))) {
		Ok(_) => (),
		Err(_) => error_exit("Could not save output", 3)
	}
}
