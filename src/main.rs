use docopt::Docopt;
use serde_derive::Deserialize;

use mazecarver::{
    builder::MazeBuilder,
    layout::{MazeLayout, Renderer},
};
use rand::{rngs::StdRng, SeedableRng};
use std::{fs::File, io, io::prelude::*};

const USAGE: &str = "Mazecarver

Usage:
    mazecarver_driver -h | --help
    mazecarver_driver [--rows=<r>] [--columns=<c>] [--seed=<s>] [--text-out=<path>] [--save-edges=<path>] [--show-corners]

Options:
    -h --help            Show this screen.
    --rows=<r>           Number of cell rows in the maze grid, clamped to a minimum of 2 [default: 2].
    --columns=<c>        Number of cell columns in the maze grid, clamped to a minimum of 2 [default: 2].
    --seed=<s>           Seed the random walk. The same seed, rows and columns reproduce the same maze.
    --text-out=<path>    Output file path for the textual rendering of the maze instead of printing it.
    --save-edges=<path>  Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --show-corners       Print the inferred corner piece placements after the maze.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_save_edges: String,
    flag_show_corners: bool,
}

// We'll put our errors in an `errors` module; `error_chain!` creates the Error,
// ErrorKind, ResultExt and Result types and the From conversions that let ? work.
mod errors {
    use error_chain::*;
    error_chain! {
        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

/// The stdout renderer collaborator: the maze as box-drawing text plus the door
/// coordinates and the explorability note the presentation layer cares about.
struct TextRenderer;

impl Renderer for TextRenderer {
    fn render_maze(&mut self, layout: &MazeLayout) {
        println!("{}", layout);
        println!("entrance: ({}, {}) west side open",
                 layout.entrance().row,
                 layout.entrance().column);
        println!("exit:     ({}, {}) east side open",
                 layout.exit().row,
                 layout.exit().column);
        if layout.is_explorable() {
            println!("explorable: yes");
        } else {
            println!("explorable: no (both dimensions must be < 21)");
        }
    }
}

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let mut rng = match args.flag_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let builder = MazeBuilder::new();
    let layout = builder.generate(args.flag_rows, args.flag_columns, &mut rng);

    if args.flag_text_out.is_empty() {
        let mut renderer = TextRenderer;
        renderer.render_maze(&layout);
    } else {
        write_text_to_file(&format!("{}", layout), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&layout, &args.flag_save_edges)?;
    }

    if args.flag_show_corners {
        for corner in layout.corners() {
            println!("corner ({}, {}) {:?} offset ({}, {}, {})",
                     corner.cell.row,
                     corner.cell.column,
                     corner.quadrant,
                     corner.offset.dx,
                     corner.offset.dy,
                     corner.offset.dz);
        }
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(layout: &MazeLayout, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    graph_data.push_str(layout.size().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(layout.passages_count().to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in layout.passages() {
        let index_a = layout
            .coordinate_to_index(src)
            .expect("Passages iter should give valid coordinate");
        let index_b = layout
            .coordinate_to_index(dst)
            .expect("Passages iter should give valid coordinate");
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
