//! Build script for hilstand-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time
//! - Generates the board constants the firmware includes

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Longest product name the banner buffer holds
const MAX_PRODUCT_LEN: usize = 40;

const DEFAULT_BAUDRATE: i64 = 115_200;
const BAUDRATE_RANGE: std::ops::RangeInclusive<i64> = 300..=921_600;

/// The status reply reports milliseconds
const REQUIRED_TICK_HZ: i64 = 1000;

/// Values extracted from board.toml
struct BoardConfig {
    product: String,
    baudrate: u32,
    tick_hz: u32,
}

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    setup_linker(&out_dir);
    let board = validate_config();
    generate_constants(&out_dir, &board);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml and pull out the values the firmware needs
fn validate_config() -> BoardConfig {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the hilstand-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let product = validate_board(&config, &mut errors);
    let baudrate = validate_serial(&config, &mut errors);
    let tick_hz = validate_clock(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=board.toml validated successfully");

    BoardConfig {
        product,
        baudrate: baudrate as u32,
        tick_hz: tick_hz as u32,
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            // Count characters; TOML errors may quote non-ASCII input
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `[board]`: product name for the banner
fn validate_board(config: &toml::Value, errors: &mut Vec<String>) -> String {
    let board = match config.get("board") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[board] must be a table".to_string());
            return String::new();
        }
        None => {
            errors.push("Missing [board] section".to_string());
            return String::new();
        }
    };

    let product = match board.get("product") {
        Some(toml::Value::String(s)) => s.clone(),
        Some(_) => {
            errors.push("[board] product must be a string".to_string());
            return String::new();
        }
        None => {
            errors.push("[board] missing 'product'".to_string());
            return String::new();
        }
    };

    if product.is_empty() {
        errors.push("[board] product cannot be empty".to_string());
    }
    if product.len() > MAX_PRODUCT_LEN {
        errors.push(format!(
            "[board] product must be at most {} characters",
            MAX_PRODUCT_LEN
        ));
    }
    if !product.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
        errors.push("[board] product must be printable ASCII".to_string());
    }

    product
}

/// `[serial]`: optional, defaults to 115200 baud
fn validate_serial(config: &toml::Value, errors: &mut Vec<String>) -> i64 {
    let baudrate = match config.get("serial").and_then(|s| s.get("baudrate")) {
        Some(toml::Value::Integer(b)) => *b,
        Some(_) => {
            errors.push("[serial] baudrate must be an integer".to_string());
            return DEFAULT_BAUDRATE;
        }
        None => DEFAULT_BAUDRATE,
    };

    if !BAUDRATE_RANGE.contains(&baudrate) {
        errors.push(format!(
            "[serial] baudrate must be {}-{}",
            BAUDRATE_RANGE.start(),
            BAUDRATE_RANGE.end()
        ));
    }

    baudrate
}

/// `[clock]`: optional, tick rate is fixed at 1 kHz
fn validate_clock(config: &toml::Value, errors: &mut Vec<String>) -> i64 {
    match config.get("clock").and_then(|c| c.get("tick_hz")) {
        Some(toml::Value::Integer(hz)) if *hz == REQUIRED_TICK_HZ => *hz,
        Some(_) => {
            errors.push(format!("[clock] tick_hz must be {}", REQUIRED_TICK_HZ));
            REQUIRED_TICK_HZ
        }
        None => REQUIRED_TICK_HZ,
    }
}

/// Write `$OUT_DIR/board_config.rs`
fn generate_constants(out_dir: &Path, board: &BoardConfig) {
    let source = format!(
        "/// Product name shown in the startup banner\n\
         pub const PRODUCT: &str = {:?};\n\
         \n\
         /// Serial rate of the command transport\n\
         pub const BAUDRATE: u32 = {};\n\
         \n\
         /// Uptime tick rate\n\
         pub const TICK_HZ: u32 = {};\n",
        board.product, board.baudrate, board.tick_hz
    );

    fs::write(out_dir.join("board_config.rs"), source).expect("write board_config.rs");
}
