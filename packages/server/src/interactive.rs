//! Interactive mode for the server.
//!
//! Prompts the user for the dataset path, bind address and port before
//! starting the server.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::ServerConfig;

/// Prompts for each setting, pre-filled from `defaults`.
///
/// Returns `None` if the user declines to start the server. Prompt
/// failures (e.g. no TTY) fall back to the default value.
#[must_use]
pub fn prompt(defaults: ServerConfig) -> Option<ServerConfig> {
    println!("NYC Street Tree Census Server");
    println!();

    let default_data = defaults.data_path.display().to_string();
    let data_path: String = Input::new()
        .with_prompt("Census CSV path")
        .default(default_data.clone())
        .interact_text()
        .unwrap_or(default_data);

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        return None;
    }

    Some(ServerConfig {
        data_path: PathBuf::from(data_path),
        bind_addr,
        port,
        static_dir: defaults.static_dir,
    })
}
