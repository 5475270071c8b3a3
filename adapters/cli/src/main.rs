#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter over the Underdark spatial addressing crates.

mod config;
mod render;
mod room_transfer;

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use underdark_core::{Compass, Coord, Direction, Position, SlugSeparator};
use underdark_system_chamber::{room_name, room_url};
use underdark_system_movement::StepProof;
use underdark_system_tilemap::{step_outcome, GridSize, RoomTiles};

use crate::{config::Config, room_transfer::RoomTransfer};

/// Encode, decode and inspect Underdark positions and rooms.
#[derive(Debug, Parser)]
#[command(name = "underdark", version)]
struct Cli {
    /// Configuration file; defaults to `underdark.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (repeatable). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pack compass fields into a coordinate.
    Encode(CompassArgs),
    /// Decode a coordinate into its compass fields.
    Decode {
        /// Coordinate in decimal or `0x` hexadecimal.
        coord: Coord,
    },
    /// Render a coordinate as a slug.
    Slug {
        /// Coordinate in decimal or `0x` hexadecimal.
        coord: Coord,
        /// Depth appended as the `Y` token.
        #[arg(long, default_value_t = 0)]
        yonder: u32,
        /// Token separator; overrides the configuration.
        #[arg(long)]
        separator: Option<SlugSeparator>,
    },
    /// Move a coordinate one step.
    Offset {
        /// Coordinate in decimal or `0x` hexadecimal.
        coord: Coord,
        /// Direction of the step.
        #[arg(value_parser = parse_direction)]
        direction: Direction,
    },
    /// Show the chamber coordinate, name and route of a room level.
    Chamber {
        /// Room identifier.
        room: u16,
        /// Level within the room.
        level: u16,
    },
    /// Pack a JSON array of 256 tile codes into a room string.
    Pack {
        /// Room identifier.
        room: u16,
        /// Level within the room.
        level: u16,
        /// JSON file holding the tile codes.
        tiles: PathBuf,
    },
    /// Expand a room into its game tilemap.
    Expand {
        /// Room string or JSON file of tile codes.
        room: String,
        /// Side length of the expanded grid; overrides the configuration.
        #[arg(long, value_parser = parse_grid_size)]
        grid_size: Option<GridSize>,
    },
    /// Report what stepping onto a room tile sets off.
    Step {
        /// Room string or JSON file of tile codes.
        room: String,
        /// Row-major tile index.
        tile: u8,
        /// Direction the player faces.
        #[arg(value_parser = parse_direction)]
        facing: Direction,
    },
    /// Pack walked directions into a step proof.
    Proof {
        /// Directions in walking order.
        #[arg(value_parser = parse_direction)]
        steps: Vec<Direction>,
    },
}

#[derive(Debug, clap::Args)]
struct CompassArgs {
    /// Realm identifier.
    #[arg(long, default_value_t = 0)]
    realm: u16,
    /// Room identifier.
    #[arg(long, default_value_t = 0)]
    room: u16,
    /// Levels above the origin.
    #[arg(long, default_value_t = 0)]
    over: u16,
    /// Levels below the origin.
    #[arg(long, default_value_t = 0)]
    under: u16,
    /// Steps north of the origin.
    #[arg(long, default_value_t = 0)]
    north: u16,
    /// Steps east of the origin.
    #[arg(long, default_value_t = 0)]
    east: u16,
    /// Steps west of the origin.
    #[arg(long, default_value_t = 0)]
    west: u16,
    /// Steps south of the origin.
    #[arg(long, default_value_t = 0)]
    south: u16,
}

impl CompassArgs {
    fn compass(&self) -> Compass {
        Compass::default()
            .with_realm_id(self.realm)
            .with_room_id(self.room)
            .with_over(self.over)
            .with_under(self.under)
            .with_north(self.north)
            .with_east(self.east)
            .with_west(self.west)
            .with_south(self.south)
    }
}

/// Entry point for the Underdark command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load(cli.config.as_deref())?;
    let output = run(cli.command, &config)?;
    println!("{output}");
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, config: &Config) -> Result<String> {
    match command {
        Command::Encode(args) => {
            let compass = args.compass().validated().context(
                "provide exactly one of --north/--south and exactly one of --east/--west",
            )?;
            Ok(compass.to_coord().to_string())
        }
        Command::Decode { coord } => {
            let compass = Compass::try_from(coord)?;
            Ok(format!(
                "{}\nslug: {}",
                describe(&compass),
                compass.to_slug(0, config.slug.separator)
            ))
        }
        Command::Slug {
            coord,
            yonder,
            separator,
        } => {
            let compass = Compass::try_from(coord)?;
            Ok(compass.to_slug(yonder, separator.unwrap_or(config.slug.separator)))
        }
        Command::Offset { coord, direction } => {
            let moved = coord.offset(direction);
            if moved.is_empty() {
                bail!("moving {coord} {direction} does not reach a valid position");
            }
            Ok(moved.to_string())
        }
        Command::Chamber { room, level } => {
            let chamber = config.origin.chamber_id(room, level);
            if chamber.is_empty() {
                bail!(
                    "configured manor {} is not a valid position",
                    config.origin.manor
                );
            }
            Ok(format!(
                "{chamber}\n{}\n{}",
                room_name(room, level),
                room_url(room, level)
            ))
        }
        Command::Pack { room, level, tiles } => {
            let transfer = RoomTransfer {
                room_id: room,
                level,
                tiles: read_tile_file(&tiles)?,
            };
            Ok(transfer.encode())
        }
        Command::Expand { room, grid_size } => {
            let (label, tiles) = load_room(&room)?;
            let grid_size = grid_size.unwrap_or(config.tilemap.grid_size);
            let tilemap = tiles.expand(grid_size);
            let spawn = match tilemap.player_start() {
                Some(start) => describe_position(start),
                None => "none".to_owned(),
            };
            let origin = tilemap.grid_origin();
            Ok(format!(
                "{label}\ngrid: {size}x{size} origin ({x}, {y})\nspawn: {spawn}\n{map}",
                size = grid_size.get(),
                x = origin.x,
                y = origin.y,
                map = render::render_tilemap(&tilemap).trim_end(),
            ))
        }
        Command::Step { room, tile, facing } => {
            let (_, tiles) = load_room(&room)?;
            let outcome = step_outcome(&tiles, Position::new(tile, facing));
            let hazard = outcome
                .hazard
                .map_or_else(|| "none".to_owned(), |hazard| format!("{hazard:?}"));
            Ok(format!(
                "tile: {:?}\nhazard: {hazard}\nreached exit: {}",
                tiles.get(tile),
                outcome.reached_exit
            ))
        }
        Command::Proof { steps } => {
            let proof = StepProof::try_from(steps)?;
            Ok(format!("{} ({} steps)", proof.to_hex(), proof.len()))
        }
    }
}

fn load_room(input: &str) -> Result<(String, RoomTiles)> {
    if input.trim_start().starts_with(room_transfer::TRANSFER_HEADER) {
        let transfer = RoomTransfer::decode(input).context("failed to decode room string")?;
        let label = room_name(transfer.room_id, transfer.level);
        return Ok((label, transfer.tiles));
    }
    let path = PathBuf::from(input);
    let tiles = read_tile_file(&path)?;
    Ok((path.display().to_string(), tiles))
}

fn read_tile_file(path: &std::path::Path) -> Result<RoomTiles> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read tile file {}", path.display()))?;
    let codes: Vec<u8> = serde_json::from_str(&contents)
        .with_context(|| format!("tile file {} is not a JSON array of codes", path.display()))?;
    RoomTiles::from_codes(&codes).with_context(|| format!("invalid room in {}", path.display()))
}

fn describe(compass: &Compass) -> String {
    [
        ("realm_id", compass.realm_id()),
        ("room_id", compass.room_id()),
        ("over", compass.over()),
        ("under", compass.under()),
        ("north", compass.north()),
        ("east", compass.east()),
        ("west", compass.west()),
        ("south", compass.south()),
    ]
    .into_iter()
    .filter(|&(_, value)| value > 0)
    .map(|(name, value)| format!("{name}: {value}"))
    .collect::<Vec<_>>()
    .join("\n")
}

fn describe_position(position: Position) -> String {
    format!(
        "tile {} (column {}, row {}) facing {}",
        position.tile,
        position.column(),
        position.row(),
        position.facing
    )
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    Direction::ALL
        .into_iter()
        .find(|direction| direction.name().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown direction '{value}'"))
}

fn parse_grid_size(value: &str) -> Result<GridSize, String> {
    let size = value
        .parse::<u16>()
        .map_err(|error| format!("invalid grid size '{value}': {error}"))?;
    GridSize::new(size).map_err(|error| error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("underdark").chain(args.iter().copied()))?;
        run(cli.command, &Config::default())
    }

    #[test]
    fn encode_packs_lanes() {
        let output = run_args(&["encode", "--room", "5", "--north", "3", "--east", "7"])
            .expect("valid compass");
        let expected = Coord::new((5_u128 << 96) | (3_u128 << 48) | (7_u128 << 32));
        assert_eq!(output, expected.to_string());
    }

    #[test]
    fn encode_rejects_conflicting_axes() {
        assert!(run_args(&["encode", "--north", "1", "--south", "1", "--east", "1"]).is_err());
    }

    #[test]
    fn slug_and_decode_render_compass() {
        let coord = Compass::default()
            .with_room_id(2)
            .with_north(1)
            .with_east(4)
            .to_coord()
            .to_string();
        assert_eq!(
            run_args(&["slug", &coord, "--yonder", "9"]).expect("valid coord"),
            "#2,N1,E4,Y9"
        );
        assert_eq!(
            run_args(&["decode", &coord]).expect("valid coord"),
            "room_id: 2\nnorth: 1\neast: 4\nslug: #2,N1,E4"
        );
    }

    #[test]
    fn offset_reports_unreachable_positions() {
        let coord = Compass::default().with_south(1).with_east(1).to_coord().to_string();
        let moved = run_args(&["offset", &coord, "north"]).expect("valid step");
        assert_eq!(
            moved,
            Compass::default().with_north(1).with_east(1).to_coord().to_string()
        );
        assert!(run_args(&["offset", "0", "north"]).is_err());
    }

    #[test]
    fn chamber_uses_configured_origin() {
        let output = run_args(&["chamber", "5", "2"]).expect("valid origin");
        let expected = Coord::new(
            (1_u128 << 112) | (5_u128 << 96) | (2_u128 << 64) | (1_u128 << 48) | (1_u128 << 32),
        );
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![expected.to_string().as_str(), "Room #5 Level 2", "/room/5/2"]
        );
    }

    #[test]
    fn proof_packs_steps() {
        assert_eq!(
            run_args(&["proof", "north", "east", "south"]).expect("valid steps"),
            "0x310 (3 steps)"
        );
    }

    #[test]
    fn grid_size_parser_rejects_odd_sizes() {
        assert_eq!(parse_grid_size("20"), Ok(GridSize::TWENTY));
        assert!(parse_grid_size("17").is_err());
        assert!(parse_grid_size("big").is_err());
    }

    #[test]
    fn expand_and_step_accept_room_strings() {
        let mut codes = [0_u8; 256];
        codes[0] = 0x01;
        codes[18] = 0x10;
        let room = RoomTransfer {
            room_id: 4,
            level: 1,
            tiles: RoomTiles::from_codes(&codes).expect("valid codes"),
        }
        .encode();

        let expanded = run_args(&["expand", &room]).expect("valid room");
        let mut lines = expanded.lines();
        assert_eq!(lines.next(), Some("Room #4 Level 1"));
        assert_eq!(lines.next(), Some("grid: 18x18 origin (-1, -1)"));
        assert_eq!(
            lines.next(),
            Some("spawn: tile 0 (column 0, row 0) facing South")
        );
        assert_eq!(lines.count(), 18);

        let step = run_args(&["step", &room, "17", "east"]).expect("valid room");
        assert_eq!(step, "tile: Void\nhazard: MonsterNear\nreached exit: false");
    }
}
