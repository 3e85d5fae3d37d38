use std::{fs::File, io::Write, path::Path};

use julienne::{slice_mesh, SlicedMesh, SlicerConfig};
use julienne_mesh::DefaultMesh;

use crate::args;

pub fn svg_command(args: args::SvgArgs) -> anyhow::Result<()> {
    let config = SlicerConfig {
        layer_height: args.layer_height,
        ..Default::default()
    };
    let mesh = julienne_stl::read_stl::<DefaultMesh, _>(&args.stl_path)?;
    let slices = slice_mesh(&mesh, &config)?;
    generate_svg(&args.output, &slices)?;
    Ok(())
}

fn generate_svg<P: AsRef<Path>>(p: P, slices: &SlicedMesh) -> std::io::Result<()> {
    let mut f = File::create(p)?;
    writeln!(f, "<svg xmlns=\"http://www.w3.org/2000/svg\" >")?;
    writeln!(f, "  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>")?;
    writeln!(f, "  <g transform=\"translate(15, 20) scale(5)\">")?;

    // One frame per layer; the visibility animation cycles through the
    // frames so the whole stack can be inspected from one file.
    let mut frames = vec!["hidden"; slices.contours().len()];
    for (layer, contour) in slices.contours().iter().enumerate() {
        writeln!(f, "    <!-- Layer {} -->", layer)?;
        writeln!(f, "    <g id=\"frame{}\">", layer)?;
        for polygon in contour.polygons() {
            let points = polygon
                .points()
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(
                f,
                "      <polygon points=\"{}\" fill=\"none\" stroke=\"#000\" stroke-width=\"0.2\"/>",
                points
            )?;
        }
        frames[layer] = "visible";
        let values = frames.join("; ");
        frames[layer] = "hidden";
        writeln!(
            f,
            "      <animate attributeName=\"visibility\" values=\"{}\" dur=\"5s\" repeatCount=\"indefinite\" />",
            values
        )?;
        writeln!(f, "    </g>")?;
    }
    writeln!(f, "  </g>")?;
    writeln!(f, "</svg>")
}
