use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vocora_config::Config;

/// Root of user data, `VOCORA_HOME` or `.vocora`
pub fn vocora_home() -> PathBuf {
    std::env::var_os("VOCORA_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".vocora"))
}

fn profiles_dir(home: &Path) -> PathBuf {
    home.join("profiles")
}

fn profile_path(home: &Path, name: &str) -> PathBuf {
    profiles_dir(home).join(format!("{name}.json"))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)?;
    Ok(profile.value)
}

fn write_profile(path: &Path, name: &str, config: Config) -> anyhow::Result<()> {
    let profile = Profile {
        name: name.into(),
        value: config,
    };
    fs::write(path, serde_json::to_string_pretty(&profile)?)?;
    Ok(())
}

/// Create the profiles folder and a `main` profile from the environment if missing
pub fn init_user_config(home: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(profiles_dir(home))?;

    let main_profile = profile_path(home, "main");
    if !main_profile.exists() {
        write_profile(&main_profile, "main", Config::new())?;
        tracing::info!(path = %main_profile.display(), "created main profile");
    }

    Ok(())
}

/// Load a profile by name, falling back to `main` and then to the environment
pub fn load_user_profile(home: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = profile_path(home, name);
    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    tracing::warn!("profile {name} not found, falling back to main profile or environment");
    let main_file = profile_path(home, "main");
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        Ok(Config::new())
    }
}

/// Add a new profile cloned from main
pub fn add_profile_from_default(home: &Path, new_name: &str) -> anyhow::Result<PathBuf> {
    let config = load_user_profile(home, "main")?;
    let file = profile_path(home, new_name);
    fs::create_dir_all(profiles_dir(home))?;
    write_profile(&file, new_name, config)?;
    tracing::info!("created new profile: {new_name}");
    Ok(file)
}
