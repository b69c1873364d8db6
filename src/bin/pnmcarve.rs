// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{value_t, App, Arg};
use failure::err_msg;
use log::info;
use pnmcarve::{
    carve, compute_energy, energy_to_grid, is_ascii_pnm, load_raster, parse_pnm, processed_path,
    save_raster, PixelGrid, PnmImage,
};
use std::fs;
use std::path::PathBuf;
use std::process;

struct Params {
    input: PathBuf,
    output: Option<PathBuf>,
    energy: Option<PathBuf>,
    vertical: usize,
    horizontal: usize,
}

// Plain anymaps keep their comments through the round trip; anything
// else goes through the image crate.
enum Source {
    Plain(PnmImage),
    Raster(PixelGrid),
}

impl Source {
    fn grid(&self) -> &PixelGrid {
        match self {
            Source::Plain(image) => image.grid(),
            Source::Raster(grid) => grid,
        }
    }
}

fn load(params: &Params) -> Result<Source, failure::Error> {
    let bytes = fs::read(&params.input)?;
    if is_ascii_pnm(&bytes) {
        let text = String::from_utf8(bytes)?;
        Ok(Source::Plain(parse_pnm(&text)?))
    } else {
        Ok(Source::Raster(load_raster(&params.input)?))
    }
}

fn run(params: Params) -> Result<PathBuf, failure::Error> {
    let source = load(&params)?;
    let (width, height) = source.grid().dimensions();
    info!(
        "loaded {} ({}x{}, {})",
        params.input.display(),
        width,
        height,
        source.grid().channels()
    );

    if params.vertical >= width || params.horizontal >= height {
        return Err(err_msg(format!(
            "requested seams ({},{}) exceed dimensions ({},{})",
            params.vertical, params.horizontal, width, height
        )));
    }

    if let Some(path) = &params.energy {
        let energy = energy_to_grid(&compute_energy(source.grid()))?;
        PnmImage::new(energy).save(path)?;
        info!("energy map written to {}", path.display());
    }

    let outfile = params
        .output
        .clone()
        .unwrap_or_else(|| processed_path(&params.input, params.vertical, params.horizontal));

    match source {
        Source::Plain(image) => {
            let grid = carve(image.grid().clone(), params.vertical, params.horizontal)?;
            image.with_grid(grid).save(&outfile)?;
        }
        Source::Raster(grid) => {
            let grid = carve(grid, params.vertical, params.horizontal)?;
            save_raster(&grid, &outfile)?;
        }
    }
    Ok(outfile)
}

fn main() {
    env_logger::init();

    let matches = App::new("pnmcarve")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware resizing for portable anymaps")
        .arg(
            Arg::with_name("input")
                .help("The image to carve (plain P2/P3, or anything the image crate reads)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("vertical")
                .help("Number of vertical seams to remove (narrows the image)")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("horizontal")
                .help("Number of horizontal seams to remove (shortens the image)")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("FILE")
                .help("Where to write the result [default: <input>_processed_<V>_<H>.<ext>]"),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .takes_value(true)
                .value_name("FILE")
                .help("Also write the input's energy map as a plain graymap"),
        )
        .get_matches();

    let params = Params {
        input: PathBuf::from(matches.value_of_os("input").unwrap_or_default()),
        output: matches.value_of_os("output").map(PathBuf::from),
        energy: matches.value_of_os("energy").map(PathBuf::from),
        vertical: value_t!(matches, "vertical", usize).unwrap_or_else(|e| e.exit()),
        horizontal: value_t!(matches, "horizontal", usize).unwrap_or_else(|e| e.exit()),
    };

    match run(params) {
        Ok(outfile) => println!("Saved: {}", outfile.display()),
        Err(err) => {
            eprintln!("Fatal: {}", err);
            process::exit(1);
        }
    }
}
