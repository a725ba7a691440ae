use std::path::PathBuf;

use crate::cli::commands::InitArgs;
use crate::io::config_io::{self, CONFIG_FILE};
use crate::model::config::{Backend, Config, StoreConfig};
use crate::store::open_store;

/// Create taskline.toml and an empty store in the target directory.
pub fn cmd_init(
    args: InitArgs,
    project_dir: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = match project_dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };

    if dir.join(CONFIG_FILE).exists() && !args.force {
        return Err(format!("{CONFIG_FILE} already exists (use --force to reinitialize)").into());
    }

    let backend = match args.backend.as_str() {
        "json" => Backend::Json,
        "sheet" => Backend::Sheet,
        other => {
            return Err(format!("unknown backend '{other}' (expected json or sheet)").into());
        }
    };
    let file = args
        .file
        .unwrap_or_else(|| StoreConfig::default_file_for(backend).to_string());

    let config = Config {
        store: StoreConfig { backend, file },
    };
    config_io::save_config(&dir, &config)?;

    // Seed the store so the header/empty list exists from the start
    let store = open_store(&dir, &config.store);
    if !dir.join(&config.store.file).exists() {
        store.save(&[])?;
    }

    println!("initialized taskline project in {}", dir.display());
    Ok(())
}
