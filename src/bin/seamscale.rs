// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgMatches, Command};
use seamscale::{imageio, seamcarve, CarveConfig, EnergyMode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn command() -> Command {
    Command::new("seamscale")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image resizing by seam carving")
        .arg(
            Arg::new("input")
                .help("The image to resize")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("columns")
                .help("Target width in pixels")
                .required(true)
                .value_parser(value_parser!(u32).range(1..))
                .index(2),
        )
        .arg(
            Arg::new("rows")
                .help("Target height in pixels")
                .required(true)
                .value_parser(value_parser!(u32).range(1..))
                .index(3),
        )
        .arg(
            Arg::new("energy")
                .help("0 = regular energy, 1 = with local entropy, 2 = forward energy")
                .required(true)
                .value_parser(|s: &str| s.parse::<EnergyMode>().map_err(|e| e.to_string()))
                .index(4),
        )
        .arg(
            Arg::new("output")
                .help("Where to write the resized JPEG")
                .required(true)
                .index(5),
        )
}

fn run(matches: &ArgMatches) -> seamscale::Result<()> {
    // All five are required, so clap has already refused a missing one.
    let input = matches.get_one::<String>("input").expect("required");
    let output = matches.get_one::<String>("output").expect("required");
    let columns = *matches.get_one::<u32>("columns").expect("required");
    let rows = *matches.get_one::<u32>("rows").expect("required");
    let energy = *matches.get_one::<EnergyMode>("energy").expect("required");

    let grid = imageio::load(input)?;
    info!("Energy type: {}.", energy);
    let carved = seamcarve(grid, columns, rows, &CarveConfig::new(energy))?;
    imageio::save(&carved, output)?;
    info!("Done.");
    info!("Seam carved image saved at: {}.", output);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let matches = command().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
