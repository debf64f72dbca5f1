//! Build script for moodlist.
//!
//! Copies the `.env.example` configuration template into the user's local
//! data directory so a fresh install finds a ready-to-edit example next to
//! the place where `config::load_env` looks for `.env`:
//!
//! - Linux: `~/.local/share/moodlist/.env.example`
//! - macOS: `~/Library/Application Support/moodlist/.env.example`
//! - Windows: `%LOCALAPPDATA%/moodlist/.env.example`
//!
//! Problems only produce cargo warnings; the copy is a convenience and never
//! fails the build.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=.env.example");

    if let Err(e) = copy_env_example() {
        println!("cargo:warning=could not install .env.example: {}", e);
    }
}

fn copy_env_example() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("moodlist");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
